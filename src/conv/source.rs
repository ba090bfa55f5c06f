use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use indexmap::IndexMap;
use num_complex::{Complex32, Complex64};

use crate::conv::{Key, NativeValue, Value};

/// Presents a Rust value as a read-only conversion source.
pub trait ToValue {
	/// Generic view of `self`.
	fn to_value(&self) -> Value;
}

impl ToValue for Value {
	fn to_value(&self) -> Value {
		self.clone()
	}
}

impl<T: ToValue + ?Sized> ToValue for &T {
	fn to_value(&self) -> Value {
		(**self).to_value()
	}
}

macro_rules! copy_source {
	($($ty:ty),* $(,)?) => {
		$(
			impl ToValue for $ty {
				fn to_value(&self) -> Value {
					Value::from(*self)
				}
			}
		)*
	};
}

copy_source!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, Complex32, Complex64);

impl ToValue for isize {
	fn to_value(&self) -> Value {
		Value::I64(*self as i64)
	}
}

impl ToValue for usize {
	fn to_value(&self) -> Value {
		Value::U64(*self as u64)
	}
}

impl ToValue for str {
	fn to_value(&self) -> Value {
		Value::String(self.into())
	}
}

impl ToValue for String {
	fn to_value(&self) -> Value {
		Value::String(self.as_str().into())
	}
}

impl ToValue for Key {
	fn to_value(&self) -> Value {
		Value::from(self.clone())
	}
}

impl ToValue for serde_json::Value {
	fn to_value(&self) -> Value {
		Value::from(self.clone())
	}
}

impl ToValue for Arc<dyn NativeValue> {
	fn to_value(&self) -> Value {
		Value::Wrapped(Arc::clone(self))
	}
}

impl<T: ToValue> ToValue for [T] {
	fn to_value(&self) -> Value {
		Value::Slice(self.iter().map(ToValue::to_value).collect())
	}
}

impl<T: ToValue> ToValue for Vec<T> {
	fn to_value(&self) -> Value {
		self.as_slice().to_value()
	}
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
	fn to_value(&self) -> Value {
		self.as_slice().to_value()
	}
}

impl<T: ToValue> ToValue for Option<T> {
	fn to_value(&self) -> Value {
		Value::Ref(self.as_ref().map(|inner| Box::new(inner.to_value())))
	}
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
	fn to_value(&self) -> Value {
		Value::reference(self.as_ref().to_value())
	}
}

fn map_value<'a, K, V>(entries: impl Iterator<Item = (&'a K, &'a V)>) -> Value
where
	K: ToValue + 'a,
	V: ToValue + 'a,
{
	Value::Map(entries.map(|(key, value)| (key.to_value(), value.to_value())).collect())
}

impl<K: ToValue, V: ToValue, S> ToValue for HashMap<K, V, S> {
	fn to_value(&self) -> Value {
		map_value(self.iter())
	}
}

impl<K: ToValue, V: ToValue> ToValue for BTreeMap<K, V> {
	fn to_value(&self) -> Value {
		map_value(self.iter())
	}
}

impl<K: ToValue, V: ToValue, S> ToValue for IndexMap<K, V, S> {
	fn to_value(&self) -> Value {
		map_value(self.iter())
	}
}
