use std::borrow::Cow;

use indexmap::IndexMap;

use crate::conv::coerce::{self, unwrap_source};
use crate::conv::{
	ConvertError, Destination, Kind, MapKey, NilRefPolicy, PathStep, Result, ScalarKind, ScanContext, Shape, StructValue, Value, classify, text,
};

/// Ordered string-keyed view produced by materializing a source as a mapping.
pub type Mapping = IndexMap<String, Value>;

type Entry<'v> = (Cow<'v, Value>, Cow<'v, Value>);

/// Whether `value` classifies as absent.
pub(crate) fn is_absent(value: &Value) -> bool {
	classify(value) == Kind::Absent
}

/// Peel references, unwrap wrapped values and decode structured text.
pub(crate) fn prepare<'v>(src: &'v Value, cx: &ScanContext<'_>) -> Result<Cow<'v, Value>> {
	expand_direct(unwrap_source(src), cx)
}

/// Like [`prepare`], but text bound for a byte slice is kept as raw text.
pub(crate) fn prepare_for<'v>(src: &'v Value, shape: &Shape, cx: &ScanContext<'_>) -> Result<Cow<'v, Value>> {
	let direct = unwrap_source(src);
	if is_byte_slice(shape) && classify(&direct).is_textual() {
		return Ok(direct);
	}
	expand_direct(direct, cx)
}

fn expand_direct<'v>(direct: Cow<'v, Value>, cx: &ScanContext<'_>) -> Result<Cow<'v, Value>> {
	if cx.options().decode_structured_text {
		if let Some(decoded) = text::expand(&direct)? {
			return Ok(Cow::Owned(decoded));
		}
	}
	Ok(direct)
}

/// `[]u8` behind any reference layers.
fn is_byte_slice(shape: &Shape) -> bool {
	matches!(shape.target(), Shape::Slice(item) if **item == Shape::Scalar(ScalarKind::U8))
}

/// Reject shape-level impossibilities before anything is written.
pub(crate) fn check_compatible(src: &Value, shape: &Shape) -> Result<()> {
	let kind = classify(src);
	let compatible = match shape.target() {
		Shape::Any => true,
		Shape::Scalar(_) => !kind.is_container(),
		Shape::Map { .. } | Shape::Struct(_) => kind == Kind::Absent || kind.is_container(),
		Shape::Slice(_) => kind == Kind::Absent || kind.is_container() || (kind.is_textual() && is_byte_slice(shape)),
		Shape::Ref(_) => false,
	};
	if compatible {
		Ok(())
	} else {
		Err(ConvertError::IncompatibleShape {
			from: kind,
			to: shape.to_string(),
		})
	}
}

/// Key/value entries of a prepared container source.
///
/// Maps yield their entries, structs their exported fields, and flat slices
/// pair consecutive elements as key then value.
pub(crate) fn entries<'v>(src: &'v Value, cx: &ScanContext<'_>, to: &Shape) -> Result<Vec<Entry<'v>>> {
	match src {
		Value::Null => Ok(Vec::new()),
		Value::Map(items) => Ok(items.iter().map(|(key, value)| (Cow::Borrowed(key), Cow::Borrowed(value))).collect()),
		Value::Struct(item) => Ok(struct_entries(item, cx)),
		Value::Slice(items) => Ok(pair_entries(items)),
		other => Err(ConvertError::IncompatibleShape {
			from: classify(other),
			to: to.to_string(),
		}),
	}
}

/// Pair `[k0, v0, k1, v1, ...]`; an unpaired final key gets an absent value.
fn pair_entries(items: &[Value]) -> Vec<Entry<'_>> {
	let mut out = Vec::with_capacity(items.len().div_ceil(2));
	let mut iter = items.iter();
	while let Some(key) = iter.next() {
		let value = iter.next().map_or(Cow::Owned(Value::Null), Cow::Borrowed);
		out.push((Cow::Borrowed(key), value));
	}
	out
}

fn struct_entries<'v>(item: &'v StructValue, cx: &ScanContext<'_>) -> Vec<Entry<'v>> {
	let mut out = Vec::with_capacity(item.fields.len());
	for field in item.fields.iter().filter(|field| field.exported) {
		let value = &field.value;
		if field.embedded {
			if let Some(inner) = struct_target(value) {
				out.extend(struct_entries(inner, cx));
				continue;
			}
		}

		let key = Cow::Owned(Value::String(field.name.clone()));
		if matches!(value, Value::Ref(_)) && is_absent(value) {
			if field.embedded || cx.options().nil_ref_fields == NilRefPolicy::Omit {
				continue;
			}
			out.push((key, Cow::Owned(Value::Null)));
			continue;
		}

		match struct_target(value) {
			Some(nested) => out.push((key, Cow::Owned(struct_map_value(nested, cx)))),
			None => out.push((key, Cow::Borrowed(value))),
		}
	}
	out
}

fn struct_target(value: &Value) -> Option<&StructValue> {
	match value {
		Value::Struct(item) => Some(item),
		Value::Ref(Some(target)) => struct_target(target),
		_ => None,
	}
}

fn struct_map_value(item: &StructValue, cx: &ScanContext<'_>) -> Value {
	Value::Map(
		struct_entries(item, cx)
			.into_iter()
			.map(|(key, value)| (key.into_owned(), value.into_owned()))
			.collect(),
	)
}

/// Materialize any container, struct or structured-text source as a string-keyed mapping.
pub(crate) fn to_mapping(src: &Value, cx: &ScanContext<'_>) -> Result<Mapping> {
	let prepared = prepare(src, cx)?;
	let shape = Shape::map(Shape::Scalar(ScalarKind::String), Shape::Any);
	let items = entries(&prepared, cx, &shape)?;

	let mut out = Mapping::with_capacity(items.len());
	for (key, value) in items {
		out.insert(coerce::to_string(&key)?, value.into_owned());
	}
	Ok(out)
}

fn key_step(key: &Value) -> PathStep {
	PathStep::Key(coerce::to_string(key).unwrap_or_default())
}

/// Walk a source's entries into a map destination through `insert`.
pub(crate) fn scan_map<K: MapKey>(
	src: &Value,
	cx: &ScanContext<'_>,
	shape: &Shape,
	mut insert: impl FnMut(K, &Value) -> Result<()>,
) -> Result<()> {
	let prepared = prepare(src, cx)?;
	for (key, value) in entries(&prepared, cx, shape)? {
		let converted = K::from_key(&key).map_err(|err| err.at(key_step(&key)))?;
		insert(converted, &value).map_err(|err| err.at(key_step(&key)))?;
	}
	Ok(())
}

/// Walk a source's elements into a slice destination, resizing it to the source length.
///
/// Every element is converted into a fresh default, so nothing from the
/// previous contents survives at any index.
pub(crate) fn scan_slice<T: Destination + Default>(dst: &mut Vec<T>, src: &Value, cx: &ScanContext<'_>) -> Result<()> {
	let shape = Shape::Slice(Box::new(T::shape_of()));
	let prepared = prepare_for(src, &shape, cx)?;
	match prepared.as_ref() {
		Value::Null => Ok(()),
		Value::Slice(items) => fill_slice(dst, items.iter(), cx),
		single @ (Value::Map(_) | Value::Struct(_)) => fill_slice(dst, std::iter::once(single), cx),
		raw_text @ (Value::String(_) | Value::Bytes(_)) if is_byte_slice(&shape) => {
			let raw: Vec<Value> = coerce::to_bytes(raw_text)?.into_iter().map(Value::U8).collect();
			fill_slice(dst, raw.iter(), cx)
		}
		other => Err(ConvertError::IncompatibleShape {
			from: classify(other),
			to: shape.to_string(),
		}),
	}
}

fn fill_slice<'v, T: Destination + Default>(dst: &mut Vec<T>, items: impl ExactSizeIterator<Item = &'v Value>, cx: &ScanContext<'_>) -> Result<()> {
	dst.truncate(items.len());
	for (idx, item) in items.enumerate() {
		let mut slot = T::default();
		slot.scan_from(item, cx).map_err(|err| err.at(PathStep::Index(idx)))?;
		match dst.get_mut(idx) {
			Some(existing) => *existing = slot,
			None => dst.push(slot),
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests;
