use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::conv::{MatchPlan, StructDescriptor};

/// Shape-keyed store of struct match plans.
///
/// Entries are only ever added. Concurrent misses for the same shape may
/// both build a plan; the first insert wins and the other is dropped.
#[derive(Debug, Default)]
pub struct PlanCache {
	plans: RwLock<HashMap<TypeId, Arc<MatchPlan>>>,
}

impl PlanCache {
	/// Empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Process-wide cache shared by default converters.
	pub fn global() -> &'static Arc<PlanCache> {
		static GLOBAL: OnceLock<Arc<PlanCache>> = OnceLock::new();
		GLOBAL.get_or_init(|| Arc::new(PlanCache::new()))
	}

	/// Cached plan for `descriptor`, building it on first use.
	pub fn plan(&self, descriptor: &'static StructDescriptor) -> Arc<MatchPlan> {
		if let Some(plan) = self.plans.read().unwrap_or_else(PoisonError::into_inner).get(&descriptor.type_id) {
			return Arc::clone(plan);
		}

		tracing::trace!(struct_name = descriptor.name, "match plan cache miss");
		let built = Arc::new(MatchPlan::build(descriptor));
		let mut plans = self.plans.write().unwrap_or_else(PoisonError::into_inner);
		Arc::clone(plans.entry(descriptor.type_id).or_insert(built))
	}

	/// Number of cached plans.
	pub fn len(&self) -> usize {
		self.plans.read().unwrap_or_else(PoisonError::into_inner).len()
	}

	/// Whether no plan is cached.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Drop every cached plan.
	pub fn clear(&self) {
		self.plans.write().unwrap_or_else(PoisonError::into_inner).clear();
	}
}
