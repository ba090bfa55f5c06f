use std::fmt;
use std::sync::Arc;

use num_complex::{Complex32, Complex64};

use crate::conv::StructDescriptor;

/// Capability of wrapper types that expose their underlying scalar or string export.
///
/// Wrapped sources are unwrapped through [`NativeValue::native`] before any
/// coercion, so destinations receive the exported value rather than the
/// wrapper's internal representation.
pub trait NativeValue: fmt::Debug + Send + Sync {
	/// Underlying value export.
	fn native(&self) -> Value;
}

/// A value of unknown static type, used as a read-only conversion source.
#[derive(Debug, Clone, Default)]
pub enum Value {
	/// No value.
	#[default]
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Signed 8-bit integer.
	I8(i8),
	/// Signed 16-bit integer.
	I16(i16),
	/// Signed 32-bit integer.
	I32(i32),
	/// Signed 64-bit integer.
	I64(i64),
	/// Unsigned 8-bit integer.
	U8(u8),
	/// Unsigned 16-bit integer.
	U16(u16),
	/// Unsigned 32-bit integer.
	U32(u32),
	/// Unsigned 64-bit integer.
	U64(u64),
	/// Single-precision float.
	F32(f32),
	/// Double-precision float.
	F64(f64),
	/// Complex number with `f32` parts.
	C64(Complex32),
	/// Complex number with `f64` parts.
	C128(Complex64),
	/// Numeric literal kept as text until final coercion.
	Number(Box<str>),
	/// UTF-8 text.
	String(Box<str>),
	/// Raw byte sequence.
	Bytes(Vec<u8>),
	/// Ordered elements.
	Slice(Vec<Value>),
	/// Ordered entries; keys may be of any kind.
	Map(Vec<(Value, Value)>),
	/// Struct instance.
	Struct(StructValue),
	/// One level of reference indirection; `None` is an absent reference.
	Ref(Option<Box<Value>>),
	/// Wrapper exposing a native value.
	Wrapped(Arc<dyn NativeValue>),
}

/// Source view of a struct instance.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
	/// Declared type name.
	pub type_name: Box<str>,
	/// Fields in declaration order.
	pub fields: Vec<FieldValue>,
}

/// One field of a [`StructValue`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field name as declared.
	pub name: Box<str>,
	/// Field content.
	pub value: Value,
	/// Unexported fields are invisible to conversions.
	pub exported: bool,
	/// Embedded fields are flattened into their parent's mapping.
	pub embedded: bool,
}

impl StructValue {
	/// Pair a descriptor's fields with their values, in declaration order.
	pub fn from_record(descriptor: &StructDescriptor, values: Vec<Value>) -> Self {
		let fields = descriptor
			.fields
			.iter()
			.zip(values)
			.map(|(field, value)| FieldValue {
				name: field.name.into(),
				value,
				exported: field.exported,
				embedded: field.embedded,
			})
			.collect();

		Self {
			type_name: descriptor.name.into(),
			fields,
		}
	}

	/// Look up an exported field by exact name.
	pub fn field(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| field.exported && field.name.as_ref() == name).map(|field| &field.value)
	}
}

impl Value {
	/// Wrap a native-value exporter.
	pub fn wrapped(inner: impl NativeValue + 'static) -> Self {
		Value::Wrapped(Arc::new(inner))
	}

	/// Byte-sequence value.
	pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
		Value::Bytes(data.into())
	}

	/// Map value from ordered entries.
	pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<Value>,
		V: Into<Value>,
	{
		Value::Map(entries.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}

	/// Slice value from elements.
	pub fn slice<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
		Value::Slice(items.into_iter().map(Into::into).collect())
	}

	/// Reference to a value.
	pub fn reference(target: Value) -> Self {
		Value::Ref(Some(Box::new(target)))
	}

	/// Text content of `String` values.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(text) => Some(text),
			_ => None,
		}
	}

	/// Look up a map entry whose key is the string `key`.
	pub fn get(&self, key: &str) -> Option<&Value> {
		match self {
			Value::Map(entries) => entries.iter().find(|(k, _)| k.as_str() == Some(key)).map(|(_, v)| v),
			Value::Struct(item) => item.field(key),
			_ => None,
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::Null, Value::Null) => true,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::I8(a), Value::I8(b)) => a == b,
			(Value::I16(a), Value::I16(b)) => a == b,
			(Value::I32(a), Value::I32(b)) => a == b,
			(Value::I64(a), Value::I64(b)) => a == b,
			(Value::U8(a), Value::U8(b)) => a == b,
			(Value::U16(a), Value::U16(b)) => a == b,
			(Value::U32(a), Value::U32(b)) => a == b,
			(Value::U64(a), Value::U64(b)) => a == b,
			(Value::F32(a), Value::F32(b)) => a == b,
			(Value::F64(a), Value::F64(b)) => a == b,
			(Value::C64(a), Value::C64(b)) => a == b,
			(Value::C128(a), Value::C128(b)) => a == b,
			(Value::Number(a), Value::Number(b)) => a == b,
			(Value::String(a), Value::String(b)) => a == b,
			(Value::Bytes(a), Value::Bytes(b)) => a == b,
			(Value::Slice(a), Value::Slice(b)) => a == b,
			(Value::Map(a), Value::Map(b)) => a == b,
			(Value::Struct(a), Value::Struct(b)) => a == b,
			(Value::Ref(a), Value::Ref(b)) => a == b,
			(Value::Wrapped(a), Value::Wrapped(b)) => Arc::ptr_eq(a, b) || a.native() == b.native(),
			_ => false,
		}
	}
}

macro_rules! value_from {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Value::$variant(value)
				}
			}
		)*
	};
}

value_from! {
	bool => Bool,
	i8 => I8,
	i16 => I16,
	i32 => I32,
	i64 => I64,
	u8 => U8,
	u16 => U16,
	u32 => U32,
	u64 => U64,
	f32 => F32,
	f64 => F64,
	Complex32 => C64,
	Complex64 => C128,
	Vec<u8> => Bytes,
	StructValue => Struct,
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.into())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value.into_boxed_str())
	}
}

impl From<()> for Value {
	fn from(_: ()) -> Self {
		Value::Null
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Value::Null, Into::into)
	}
}
