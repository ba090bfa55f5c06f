use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use indexmap::IndexMap;
use num_complex::{Complex32, Complex64};

use crate::conv::{MapKey, Result, ScalarKind, ScanContext, Shape, Value, coerce, walk};

/// A caller-owned receptacle that a scan writes into.
///
/// Scans have update semantics: implementations overwrite what the source
/// provides and leave everything else as it was.
pub trait Destination {
	/// Declared shape of this destination type.
	fn shape_of() -> Shape
	where
		Self: Sized;

	/// Assign `src` into `self`, converting as the shape requires.
	fn scan_from(&mut self, src: &Value, cx: &ScanContext<'_>) -> Result<()>;

	/// Field slots in declaration order, for struct destinations.
	///
	/// Reference slots allocate their target on access.
	fn fields_mut(&mut self) -> Option<Vec<&mut dyn Destination>> {
		None
	}
}

macro_rules! scalar_destination {
	($($ty:ty => $kind:ident, $conv:path;)*) => {
		$(
			impl Destination for $ty {
				fn shape_of() -> Shape {
					Shape::Scalar(ScalarKind::$kind)
				}

				fn scan_from(&mut self, src: &Value, _cx: &ScanContext<'_>) -> Result<()> {
					*self = $conv(src)?;
					Ok(())
				}
			}
		)*
	};
}

scalar_destination! {
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
	f32 => F32, coerce::to_f32;
	f64 => F64, coerce::to_f64;
	Complex32 => C64, coerce::to_complex32;
	Complex64 => C128, coerce::to_complex;
	String => String, coerce::to_string;
}

impl Destination for Value {
	fn shape_of() -> Shape {
		Shape::Any
	}

	fn scan_from(&mut self, src: &Value, _cx: &ScanContext<'_>) -> Result<()> {
		*self = coerce::unwrap_source(src).into_owned();
		Ok(())
	}
}

impl<T: Destination + Default> Destination for Vec<T> {
	fn shape_of() -> Shape {
		Shape::Slice(Box::new(T::shape_of()))
	}

	fn scan_from(&mut self, src: &Value, cx: &ScanContext<'_>) -> Result<()> {
		walk::scan_slice(self, src, cx)
	}
}

impl<K, V, S> Destination for HashMap<K, V, S>
where
	K: MapKey + Eq + Hash,
	V: Destination + Default,
	S: BuildHasher,
{
	fn shape_of() -> Shape {
		Shape::map(K::key_shape(), V::shape_of())
	}

	fn scan_from(&mut self, src: &Value, cx: &ScanContext<'_>) -> Result<()> {
		walk::scan_map(src, cx, &Self::shape_of(), |key: K, value| self.entry(key).or_default().scan_from(value, cx))
	}
}

impl<K, V> Destination for BTreeMap<K, V>
where
	K: MapKey + Ord,
	V: Destination + Default,
{
	fn shape_of() -> Shape {
		Shape::map(K::key_shape(), V::shape_of())
	}

	fn scan_from(&mut self, src: &Value, cx: &ScanContext<'_>) -> Result<()> {
		walk::scan_map(src, cx, &Self::shape_of(), |key: K, value| self.entry(key).or_default().scan_from(value, cx))
	}
}

impl<K, V, S> Destination for IndexMap<K, V, S>
where
	K: MapKey + Eq + Hash,
	V: Destination + Default,
	S: BuildHasher,
{
	fn shape_of() -> Shape {
		Shape::map(K::key_shape(), V::shape_of())
	}

	fn scan_from(&mut self, src: &Value, cx: &ScanContext<'_>) -> Result<()> {
		walk::scan_map(src, cx, &Self::shape_of(), |key: K, value| self.entry(key).or_default().scan_from(value, cx))
	}
}

impl<T: Destination + Default> Destination for Option<T> {
	fn shape_of() -> Shape {
		Shape::Ref(Box::new(T::shape_of()))
	}

	fn scan_from(&mut self, src: &Value, cx: &ScanContext<'_>) -> Result<()> {
		if walk::is_absent(src) {
			return Ok(());
		}
		self.get_or_insert_with(T::default).scan_from(src, cx)
	}

	fn fields_mut(&mut self) -> Option<Vec<&mut dyn Destination>> {
		self.get_or_insert_with(T::default).fields_mut()
	}
}

impl<T: Destination> Destination for Box<T> {
	fn shape_of() -> Shape {
		Shape::Ref(Box::new(T::shape_of()))
	}

	fn scan_from(&mut self, src: &Value, cx: &ScanContext<'_>) -> Result<()> {
		self.as_mut().scan_from(src, cx)
	}

	fn fields_mut(&mut self) -> Option<Vec<&mut dyn Destination>> {
		self.as_mut().fields_mut()
	}
}

#[cfg(test)]
mod tests;
