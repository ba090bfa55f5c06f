use std::fmt;

use crate::conv::Value;

/// Coarse category of a runtime value, used to select a conversion strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	/// Null value or absent reference.
	Absent,
	/// Boolean scalar.
	Bool,
	/// Signed integer.
	Int,
	/// Unsigned integer.
	Uint,
	/// Floating-point number.
	Float,
	/// Complex number.
	Complex,
	/// UTF-8 text.
	String,
	/// Raw byte sequence.
	Bytes,
	/// Ordered elements.
	Slice,
	/// Keyed entries.
	Map,
	/// Struct instance.
	Struct,
	/// Reference to a struct instance.
	StructReference,
	/// Wrapper exposing a native value.
	WrappedValue,
}

impl Kind {
	/// Scalar kinds the coercer handles directly.
	pub fn is_scalar(self) -> bool {
		matches!(
			self,
			Kind::Bool | Kind::Int | Kind::Uint | Kind::Float | Kind::Complex | Kind::String | Kind::Bytes
		)
	}

	/// Kinds that can be textual structured input.
	pub fn is_textual(self) -> bool {
		matches!(self, Kind::String | Kind::Bytes)
	}

	/// Kinds with entries or elements.
	pub fn is_container(self) -> bool {
		matches!(self, Kind::Slice | Kind::Map | Kind::Struct | Kind::StructReference)
	}
}

/// Classify a value, unwrapping one level of reference indirection.
///
/// Chains of references collapse onto their final target; an absent
/// reference anywhere in the chain classifies as [`Kind::Absent`].
pub fn classify(value: &Value) -> Kind {
	match value {
		Value::Ref(None) => Kind::Absent,
		Value::Ref(Some(target)) => match target.as_ref() {
			Value::Struct(_) => Kind::StructReference,
			other => classify(other),
		},
		other => classify_direct(other),
	}
}

fn classify_direct(value: &Value) -> Kind {
	match value {
		Value::Null => Kind::Absent,
		Value::Bool(_) => Kind::Bool,
		Value::I8(_) | Value::I16(_) | Value::I32(_) | Value::I64(_) => Kind::Int,
		Value::U8(_) | Value::U16(_) | Value::U32(_) | Value::U64(_) => Kind::Uint,
		Value::F32(_) | Value::F64(_) => Kind::Float,
		Value::C64(_) | Value::C128(_) => Kind::Complex,
		Value::Number(literal) => classify_literal(literal),
		Value::String(_) => Kind::String,
		Value::Bytes(_) => Kind::Bytes,
		Value::Slice(_) => Kind::Slice,
		Value::Map(_) => Kind::Map,
		Value::Struct(_) => Kind::Struct,
		Value::Ref(_) => classify(value),
		Value::Wrapped(_) => Kind::WrappedValue,
	}
}

fn classify_literal(literal: &str) -> Kind {
	if literal.parse::<i64>().is_ok() {
		Kind::Int
	} else if literal.parse::<u64>().is_ok() {
		Kind::Uint
	} else {
		Kind::Float
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Kind::Absent => "absent",
			Kind::Bool => "bool",
			Kind::Int => "int",
			Kind::Uint => "uint",
			Kind::Float => "float",
			Kind::Complex => "complex",
			Kind::String => "string",
			Kind::Bytes => "bytes",
			Kind::Slice => "slice",
			Kind::Map => "map",
			Kind::Struct => "struct",
			Kind::StructReference => "struct reference",
			Kind::WrappedValue => "wrapped value",
		};
		f.write_str(name)
	}
}

#[cfg(test)]
mod tests {
	use crate::conv::{Kind, Value, classify};

	#[test]
	fn scalars_classify_by_family() {
		assert_eq!(classify(&Value::I8(1)), Kind::Int);
		assert_eq!(classify(&Value::U64(1)), Kind::Uint);
		assert_eq!(classify(&Value::F32(1.0)), Kind::Float);
		assert_eq!(classify(&Value::from("x")), Kind::String);
		assert_eq!(classify(&Value::bytes("x")), Kind::Bytes);
		assert_eq!(classify(&Value::Null), Kind::Absent);
	}

	#[test]
	fn references_unwrap_one_level() {
		assert_eq!(classify(&Value::Ref(None)), Kind::Absent);
		assert_eq!(classify(&Value::reference(Value::I32(3))), Kind::Int);
		let item = Value::Struct(crate::conv::StructValue {
			type_name: "Item".into(),
			fields: Vec::new(),
		});
		assert_eq!(classify(&item), Kind::Struct);
		assert_eq!(classify(&Value::reference(item)), Kind::StructReference);
	}

	#[test]
	fn numeric_literals_classify_by_grammar() {
		assert_eq!(classify(&Value::Number("-4".into())), Kind::Int);
		assert_eq!(classify(&Value::Number("18446744073709551615".into())), Kind::Uint);
		assert_eq!(classify(&Value::Number("1.5e3".into())), Kind::Float);
	}
}
