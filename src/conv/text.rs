use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::conv::{Result, Value, coerce};

/// Outcome of structured-text detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextForm {
	/// Begins with `{` after leading whitespace.
	Object,
	/// Begins with `[` after leading whitespace.
	Array,
	/// Anything else; treated as an opaque string scalar.
	Plain,
}

impl TextForm {
	/// Whether the text should be decoded before walking.
	pub fn is_structured(self) -> bool {
		!matches!(self, TextForm::Plain)
	}
}

/// Detect whether `text` is object or array notation.
pub fn detect(text: &[u8]) -> TextForm {
	match text.trim_ascii_start().first() {
		Some(b'{') => TextForm::Object,
		Some(b'[') => TextForm::Array,
		_ => TextForm::Plain,
	}
}

/// Decode structured text into a generic container.
///
/// Objects keep key order and numbers keep their literal text, so no
/// floating-point rounding happens before the final coercion.
pub fn decode(text: &[u8]) -> Result<Value> {
	let json: serde_json::Value = serde_json::from_slice(text)?;
	tracing::trace!(bytes = text.len(), "decoded structured text");
	Ok(Value::from(json))
}

/// Decode textual values that carry structured text; `None` for anything else.
pub(crate) fn expand(value: &Value) -> Result<Option<Value>> {
	let text = match value {
		Value::String(text) => text.as_bytes(),
		Value::Bytes(data) => data.as_slice(),
		_ => return Ok(None),
	};
	if !detect(text).is_structured() {
		return Ok(None);
	}
	decode(text).map(Some)
}

impl From<serde_json::Value> for Value {
	fn from(json: serde_json::Value) -> Self {
		use serde_json::Value as JsonValue;

		match json {
			JsonValue::Null => Value::Null,
			JsonValue::Bool(v) => Value::Bool(v),
			JsonValue::Number(n) => Value::Number(n.to_string().into_boxed_str()),
			JsonValue::String(v) => Value::String(v.into_boxed_str()),
			JsonValue::Array(items) => Value::Slice(items.into_iter().map(Value::from).collect()),
			JsonValue::Object(entries) => Value::Map(
				entries
					.into_iter()
					.map(|(key, value)| (Value::String(key.into_boxed_str()), Value::from(value)))
					.collect(),
			),
		}
	}
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		match self {
			Value::Null | Value::Ref(None) => serializer.serialize_unit(),
			Value::Bool(v) => serializer.serialize_bool(*v),
			Value::I8(v) => serializer.serialize_i8(*v),
			Value::I16(v) => serializer.serialize_i16(*v),
			Value::I32(v) => serializer.serialize_i32(*v),
			Value::I64(v) => serializer.serialize_i64(*v),
			Value::U8(v) => serializer.serialize_u8(*v),
			Value::U16(v) => serializer.serialize_u16(*v),
			Value::U32(v) => serializer.serialize_u32(*v),
			Value::U64(v) => serializer.serialize_u64(*v),
			Value::F32(v) => serializer.serialize_f32(*v),
			Value::F64(v) => serializer.serialize_f64(*v),
			Value::Number(literal) => serialize_literal(literal, serializer),
			Value::C64(_) | Value::C128(_) | Value::Bytes(_) => serializer.serialize_str(&scalar_text::<S>(self)?),
			Value::String(v) => serializer.serialize_str(v),
			Value::Slice(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Value::Map(entries) => {
				let mut map = serializer.serialize_map(Some(entries.len()))?;
				for (key, value) in entries {
					map.serialize_entry(&scalar_text::<S>(key)?, value)?;
				}
				map.end()
			}
			Value::Struct(item) => {
				let mut map = serializer.serialize_map(None)?;
				for field in item.fields.iter().filter(|field| field.exported) {
					map.serialize_entry(field.name.as_ref(), &field.value)?;
				}
				map.end()
			}
			Value::Ref(Some(target)) => target.serialize(serializer),
			Value::Wrapped(inner) => inner.native().serialize(serializer),
		}
	}
}

fn scalar_text<S: Serializer>(value: &Value) -> std::result::Result<String, S::Error> {
	coerce::to_string(value).map_err(S::Error::custom)
}

fn serialize_literal<S: Serializer>(literal: &str, serializer: S) -> std::result::Result<S::Ok, S::Error> {
	if let Ok(v) = literal.parse::<i64>() {
		serializer.serialize_i64(v)
	} else if let Ok(v) = literal.parse::<u64>() {
		serializer.serialize_u64(v)
	} else if let Ok(v) = literal.parse::<f64>() {
		serializer.serialize_f64(v)
	} else {
		serializer.serialize_str(literal)
	}
}
