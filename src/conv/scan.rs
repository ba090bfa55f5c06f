use std::sync::Arc;

use crate::conv::{
	ConvertError, Destination, Mapping, MatchPlan, PlanCache, Result, ScanOptions, StructDescriptor, ToValue, classify, walk,
};

/// Per-call state threaded through every destination.
#[derive(Debug, Clone, Copy)]
pub struct ScanContext<'a> {
	options: &'a ScanOptions,
	plans: Option<&'a PlanCache>,
}

impl<'a> ScanContext<'a> {
	/// Context over `options`, optionally caching match plans in `plans`.
	pub fn new(options: &'a ScanOptions, plans: Option<&'a PlanCache>) -> Self {
		Self { options, plans }
	}

	/// Active options.
	pub fn options(&self) -> &'a ScanOptions {
		self.options
	}

	/// Match plan for a struct shape, cached when a cache is attached.
	pub fn plan(&self, descriptor: &'static StructDescriptor) -> Arc<MatchPlan> {
		match self.plans {
			Some(cache) => cache.plan(descriptor),
			None => Arc::new(MatchPlan::build(descriptor)),
		}
	}
}

/// Entry point bundling options with an optional plan cache.
#[derive(Debug, Clone)]
pub struct Converter {
	options: ScanOptions,
	plans: Option<Arc<PlanCache>>,
}

impl Default for Converter {
	fn default() -> Self {
		Self::new(ScanOptions::default())
	}
}

impl Converter {
	/// Converter using the process-wide cache when `options.cache_plans` is set.
	pub fn new(options: ScanOptions) -> Self {
		let plans = options.cache_plans.then(|| Arc::clone(PlanCache::global()));
		Self { options, plans }
	}

	/// Converter with an injected cache.
	pub fn with_cache(options: ScanOptions, cache: Arc<PlanCache>) -> Self {
		Self {
			options,
			plans: Some(cache),
		}
	}

	/// Converter that rebuilds match plans on every call.
	pub fn without_cache(options: ScanOptions) -> Self {
		Self { options, plans: None }
	}

	/// Active options.
	pub fn options(&self) -> &ScanOptions {
		&self.options
	}

	fn context(&self) -> ScanContext<'_> {
		ScanContext::new(&self.options, self.plans.as_deref())
	}

	/// Materialize `source` as an ordered string-keyed mapping.
	///
	/// Maps, structs, slices (paired as key, value, ...) and object/array
	/// text are accepted; a bare scalar fails with
	/// [`ConvertError::IncompatibleShape`]. An absent source yields an empty mapping.
	pub fn to_map<S: ToValue + ?Sized>(&self, source: &S) -> Result<Mapping> {
		let value = source.to_value();
		tracing::debug!(kind = %classify(&value), "materializing mapping");
		walk::to_mapping(&value, &self.context())
	}

	/// Assign `source` into `dest`, guided by the destination's shape.
	///
	/// Text is decoded, except when bound for a byte slice, and shape
	/// compatibility is checked before anything is written. A failure deeper
	/// in the walk leaves earlier writes in place.
	pub fn scan<S: ToValue + ?Sized, D: Destination>(&self, source: &S, dest: &mut D) -> Result<()> {
		let shape = D::shape_of();
		if !shape.is_scan_target() {
			return Err(ConvertError::InvalidDestination { shape: shape.to_string() });
		}

		let value = source.to_value();
		let cx = self.context();
		let prepared = walk::prepare_for(&value, &shape, &cx)?;
		tracing::debug!(kind = %classify(&prepared), %shape, "scanning into destination");
		walk::check_compatible(&prepared, &shape)?;
		dest.scan_from(&prepared, &cx)
	}
}

/// Materialize `source` as a mapping with default options.
pub fn to_map<S: ToValue + ?Sized>(source: &S) -> Result<Mapping> {
	Converter::default().to_map(source)
}

/// Scan `source` into `dest` with default options.
pub fn scan<S: ToValue + ?Sized, D: Destination>(source: &S, dest: &mut D) -> Result<()> {
	Converter::default().scan(source, dest)
}

#[cfg(test)]
mod tests;
