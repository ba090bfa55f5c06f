use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::conv::coerce::{self, unwrap_source};
use crate::conv::{ConvertError, Result, ScalarKind, Shape, Value, classify};

/// Comparable key that preserves the source key's kind.
#[derive(Debug, Clone)]
pub enum Key {
	/// Boolean key.
	Bool(bool),
	/// Signed integer key.
	Int(i64),
	/// Unsigned integer key.
	Uint(u64),
	/// Compared and hashed by bit pattern.
	Float(f64),
	/// Text key.
	String(Box<str>),
	/// Byte-sequence key.
	Bytes(Vec<u8>),
}

impl Key {
	/// Key for a source value; containers and absent values are not comparable.
	pub fn from_value(value: &Value) -> Result<Self> {
		let value = unwrap_source(value);
		let key = match value.as_ref() {
			Value::Bool(v) => Key::Bool(*v),
			Value::I8(_) | Value::I16(_) | Value::I32(_) | Value::I64(_) => Key::Int(coerce::to_i64(&value)?),
			Value::U8(_) | Value::U16(_) | Value::U32(_) | Value::U64(_) => Key::Uint(coerce::to_u64(&value)?),
			Value::F32(_) | Value::F64(_) => Key::Float(coerce::to_f64(&value)?),
			Value::Number(literal) => literal_key(literal),
			Value::C64(_) | Value::C128(_) => Key::String(coerce::to_string(&value)?.into_boxed_str()),
			Value::String(v) => Key::String(v.clone()),
			Value::Bytes(v) => Key::Bytes(v.clone()),
			other => {
				return Err(ConvertError::Conversion {
					from: classify(other),
					to: "key",
				});
			}
		};
		Ok(key)
	}

	/// Text content of `String` keys.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Key::String(v) => Some(v),
			_ => None,
		}
	}

	fn rank(&self) -> u8 {
		match self {
			Key::Bool(_) => 0,
			Key::Int(_) => 1,
			Key::Uint(_) => 2,
			Key::Float(_) => 3,
			Key::String(_) => 4,
			Key::Bytes(_) => 5,
		}
	}
}

/// Numeric literal keyed by its grammar, matching how [`classify`] types it.
fn literal_key(literal: &str) -> Key {
	if let Ok(v) = literal.parse::<i64>() {
		Key::Int(v)
	} else if let Ok(v) = literal.parse::<u64>() {
		Key::Uint(v)
	} else if let Ok(v) = literal.parse::<f64>() {
		Key::Float(v)
	} else {
		Key::String(literal.into())
	}
}

impl PartialEq for Key {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for Key {}

impl PartialOrd for Key {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Key {
	fn cmp(&self, other: &Self) -> Ordering {
		match (self, other) {
			(Key::Bool(a), Key::Bool(b)) => a.cmp(b),
			(Key::Int(a), Key::Int(b)) => a.cmp(b),
			(Key::Uint(a), Key::Uint(b)) => a.cmp(b),
			(Key::Float(a), Key::Float(b)) => a.total_cmp(b),
			(Key::String(a), Key::String(b)) => a.cmp(b),
			(Key::Bytes(a), Key::Bytes(b)) => a.cmp(b),
			(a, b) => a.rank().cmp(&b.rank()),
		}
	}
}

impl Hash for Key {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.rank().hash(state);
		match self {
			Key::Bool(v) => v.hash(state),
			Key::Int(v) => v.hash(state),
			Key::Uint(v) => v.hash(state),
			Key::Float(v) => v.to_bits().hash(state),
			Key::String(v) => v.hash(state),
			Key::Bytes(v) => v.hash(state),
		}
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Key::Bool(v) => write!(f, "{v}"),
			Key::Int(v) => write!(f, "{v}"),
			Key::Uint(v) => write!(f, "{v}"),
			Key::Float(v) => write!(f, "{v}"),
			Key::String(v) => f.write_str(v),
			Key::Bytes(v) => f.write_str(&String::from_utf8_lossy(v)),
		}
	}
}

impl From<&str> for Key {
	fn from(value: &str) -> Self {
		Key::String(value.into())
	}
}

impl From<Key> for Value {
	fn from(key: Key) -> Self {
		match key {
			Key::Bool(v) => Value::Bool(v),
			Key::Int(v) => Value::I64(v),
			Key::Uint(v) => Value::U64(v),
			Key::Float(v) => Value::F64(v),
			Key::String(v) => Value::String(v),
			Key::Bytes(v) => Value::Bytes(v),
		}
	}
}

/// Key type of a map destination.
pub trait MapKey: Sized {
	/// Shape of the key slot.
	fn key_shape() -> Shape;

	/// Convert a source key.
	fn from_key(key: &Value) -> Result<Self>;
}

impl MapKey for Key {
	fn key_shape() -> Shape {
		Shape::Any
	}

	fn from_key(key: &Value) -> Result<Self> {
		Key::from_value(key)
	}
}

impl MapKey for String {
	fn key_shape() -> Shape {
		Shape::Scalar(ScalarKind::String)
	}

	fn from_key(key: &Value) -> Result<Self> {
		coerce::to_string(key)
	}
}

macro_rules! scalar_key {
	($($ty:ty => $kind:ident, $conv:path;)*) => {
		$(
			impl MapKey for $ty {
				fn key_shape() -> Shape {
					Shape::Scalar(ScalarKind::$kind)
				}

				fn from_key(key: &Value) -> Result<Self> {
					$conv(key)
				}
			}
		)*
	};
}

scalar_key! {
	bool => Bool, coerce::to_bool;
	i8 => I8, coerce::to_i8;
	i16 => I16, coerce::to_i16;
	i32 => I32, coerce::to_i32;
	i64 => I64, coerce::to_i64;
	isize => Isize, coerce::to_isize;
	u8 => U8, coerce::to_u8;
	u16 => U16, coerce::to_u16;
	u32 => U32, coerce::to_u32;
	u64 => U64, coerce::to_u64;
	usize => Usize, coerce::to_usize;
}
