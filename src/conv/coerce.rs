use std::borrow::Cow;
use std::fmt;

use num_complex::{Complex32, Complex64};

use crate::conv::{ConvertError, Result, Value, classify};

/// Scalar target of a coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
	/// `bool`.
	Bool,
	/// `i8`.
	I8,
	/// `i16`.
	I16,
	/// `i32`.
	I32,
	/// `i64`.
	I64,
	/// `isize`.
	Isize,
	/// `u8`.
	U8,
	/// `u16`.
	U16,
	/// `u32`.
	U32,
	/// `u64`.
	U64,
	/// `usize`.
	Usize,
	/// `f32`.
	F32,
	/// `f64`.
	F64,
	/// Complex number with `f32` parts.
	C64,
	/// Complex number with `f64` parts.
	C128,
	/// UTF-8 text.
	String,
	/// Raw byte sequence.
	Bytes,
}

impl ScalarKind {
	/// Lowercase name used in messages.
	pub fn name(self) -> &'static str {
		match self {
			ScalarKind::Bool => "bool",
			ScalarKind::I8 => "i8",
			ScalarKind::I16 => "i16",
			ScalarKind::I32 => "i32",
			ScalarKind::I64 => "i64",
			ScalarKind::Isize => "isize",
			ScalarKind::U8 => "u8",
			ScalarKind::U16 => "u16",
			ScalarKind::U32 => "u32",
			ScalarKind::U64 => "u64",
			ScalarKind::Usize => "usize",
			ScalarKind::F32 => "f32",
			ScalarKind::F64 => "f64",
			ScalarKind::C64 => "complex64",
			ScalarKind::C128 => "complex128",
			ScalarKind::String => "string",
			ScalarKind::Bytes => "bytes",
		}
	}
}

impl fmt::Display for ScalarKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Widest common representation of a numeric source.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Wide {
	Int(i64),
	Uint(u64),
	Float(f64),
	Complex(Complex64),
}

impl Wide {
	fn to_i64(self) -> i64 {
		match self {
			Wide::Int(v) => v,
			Wide::Uint(v) => v as i64,
			Wide::Float(v) => v as i64,
			Wide::Complex(v) => v.re as i64,
		}
	}

	fn to_u64(self) -> u64 {
		match self {
			Wide::Int(v) => v as u64,
			Wide::Uint(v) => v,
			Wide::Float(v) => v as u64,
			Wide::Complex(v) => v.re as u64,
		}
	}

	fn to_f64(self) -> f64 {
		match self {
			Wide::Int(v) => v as f64,
			Wide::Uint(v) => v as f64,
			Wide::Float(v) => v,
			Wide::Complex(v) => v.re,
		}
	}

	fn to_complex(self) -> Complex64 {
		match self {
			Wide::Complex(v) => v,
			other => Complex64::new(other.to_f64(), 0.0),
		}
	}
}

/// Peel references and unwrap wrapped values down to a direct value.
pub(crate) fn unwrap_source(value: &Value) -> Cow<'_, Value> {
	match value {
		Value::Ref(None) => Cow::Owned(Value::Null),
		Value::Ref(Some(target)) => unwrap_source(target),
		Value::Wrapped(inner) => match unwrap_source(&inner.native()) {
			Cow::Borrowed(direct) => Cow::Owned(direct.clone()),
			Cow::Owned(direct) => Cow::Owned(direct),
		},
		other => Cow::Borrowed(other),
	}
}

fn widen(value: &Value, to: ScalarKind) -> Result<Wide> {
	let value = unwrap_source(value);
	let wide = match value.as_ref() {
		Value::Null => Wide::Int(0),
		Value::Bool(v) => Wide::Int(i64::from(*v)),
		Value::I8(v) => Wide::Int(i64::from(*v)),
		Value::I16(v) => Wide::Int(i64::from(*v)),
		Value::I32(v) => Wide::Int(i64::from(*v)),
		Value::I64(v) => Wide::Int(*v),
		Value::U8(v) => Wide::Uint(u64::from(*v)),
		Value::U16(v) => Wide::Uint(u64::from(*v)),
		Value::U32(v) => Wide::Uint(u64::from(*v)),
		Value::U64(v) => Wide::Uint(*v),
		Value::F32(v) => Wide::Float(f64::from(*v)),
		Value::F64(v) => Wide::Float(*v),
		Value::C64(v) => Wide::Complex(Complex64::new(f64::from(v.re), f64::from(v.im))),
		Value::C128(v) => Wide::Complex(*v),
		Value::Number(literal) => parse_numeric(literal),
		Value::String(text) => parse_numeric(text),
		Value::Bytes(data) => parse_numeric(&String::from_utf8_lossy(data)),
		other => {
			return Err(ConvertError::Conversion {
				from: classify(other),
				to: to.name(),
			});
		}
	};
	Ok(wide)
}

/// Parse numeric text permissively: malformed input yields zero.
fn parse_numeric(text: &str) -> Wide {
	let text = text.trim();
	let unsigned = text.strip_prefix('+').unwrap_or(text);

	if let Ok(v) = text.parse::<i64>() {
		return Wide::Int(v);
	}
	if let Ok(v) = unsigned.parse::<u64>() {
		return Wide::Uint(v);
	}
	if let Some(hex) = unsigned.strip_prefix("0x").or_else(|| unsigned.strip_prefix("0X")) {
		if let Ok(v) = u64::from_str_radix(hex, 16) {
			return Wide::Uint(v);
		}
	}
	if let Some(hex) = text.strip_prefix("-0x").or_else(|| text.strip_prefix("-0X")) {
		if let Ok(v) = i64::from_str_radix(hex, 16) {
			return Wide::Int(v.wrapping_neg());
		}
	}
	match text.parse::<f64>() {
		Ok(v) => Wide::Float(v),
		Err(_) => Wide::Int(0),
	}
}

/// Coerce to `bool`: numbers are true when nonzero, text per the usual falsy words.
pub fn to_bool(value: &Value) -> Result<bool> {
	let value = unwrap_source(value);
	match value.as_ref() {
		Value::Null => Ok(false),
		Value::Bool(v) => Ok(*v),
		Value::String(text) => Ok(text_truthy(text)),
		Value::Bytes(data) => Ok(text_truthy(&String::from_utf8_lossy(data))),
		Value::Number(literal) => Ok(parse_numeric(literal).to_f64() != 0.0),
		other => {
			let wide = widen(other, ScalarKind::Bool)?;
			Ok(match wide {
				Wide::Int(v) => v != 0,
				Wide::Uint(v) => v != 0,
				Wide::Float(v) => v != 0.0,
				Wide::Complex(v) => v.re != 0.0 || v.im != 0.0,
			})
		}
	}
}

fn text_truthy(text: &str) -> bool {
	let text = text.trim();
	!(text.is_empty()
		|| text == "0"
		|| text.eq_ignore_ascii_case("false")
		|| text.eq_ignore_ascii_case("off")
		|| text.eq_ignore_ascii_case("no"))
}

/// Coerce to `i64`, truncating floats and wrapping unsigned overflow.
pub fn to_i64(value: &Value) -> Result<i64> {
	Ok(widen(value, ScalarKind::I64)?.to_i64())
}

/// Coerce to `u64`, wrapping negative integers.
pub fn to_u64(value: &Value) -> Result<u64> {
	Ok(widen(value, ScalarKind::U64)?.to_u64())
}

/// Coerce to `f64`.
pub fn to_f64(value: &Value) -> Result<f64> {
	Ok(widen(value, ScalarKind::F64)?.to_f64())
}

/// Coerce to a double-precision complex number.
pub fn to_complex(value: &Value) -> Result<Complex64> {
	Ok(widen(value, ScalarKind::C128)?.to_complex())
}

macro_rules! narrow {
	($($name:ident: $ty:ty => $kind:ident via $wide:ident;)*) => {
		$(
			#[doc = concat!("Coerce to `", stringify!($ty), "` with native narrowing.")]
			pub fn $name(value: &Value) -> Result<$ty> {
				Ok(widen(value, ScalarKind::$kind)?.$wide() as $ty)
			}
		)*
	};
}

narrow! {
	to_i8: i8 => I8 via to_i64;
	to_i16: i16 => I16 via to_i64;
	to_i32: i32 => I32 via to_i64;
	to_isize: isize => Isize via to_i64;
	to_u8: u8 => U8 via to_u64;
	to_u16: u16 => U16 via to_u64;
	to_u32: u32 => U32 via to_u64;
	to_usize: usize => Usize via to_u64;
	to_f32: f32 => F32 via to_f64;
}

/// Coerce to a single-precision complex number.
pub fn to_complex32(value: &Value) -> Result<Complex32> {
	let wide = to_complex(value)?;
	Ok(Complex32::new(wide.re as f32, wide.im as f32))
}

/// Format any value as text; containers render as JSON.
pub fn to_string(value: &Value) -> Result<String> {
	let value = unwrap_source(value);
	let text = match value.as_ref() {
		Value::Null => String::new(),
		Value::Bool(v) => v.to_string(),
		Value::I8(v) => v.to_string(),
		Value::I16(v) => v.to_string(),
		Value::I32(v) => v.to_string(),
		Value::I64(v) => v.to_string(),
		Value::U8(v) => v.to_string(),
		Value::U16(v) => v.to_string(),
		Value::U32(v) => v.to_string(),
		Value::U64(v) => v.to_string(),
		Value::F32(v) => v.to_string(),
		Value::F64(v) => v.to_string(),
		Value::C64(v) => format!("({}{:+}i)", v.re, v.im),
		Value::C128(v) => format!("({}{:+}i)", v.re, v.im),
		Value::Number(literal) => literal.to_string(),
		Value::String(text) => text.to_string(),
		Value::Bytes(data) => String::from_utf8_lossy(data).into_owned(),
		container => serde_json::to_string(container).map_err(|source| ConvertError::JsonEncode { source })?,
	};
	Ok(text)
}

/// Encode any value as a byte sequence; text is UTF-8.
pub fn to_bytes(value: &Value) -> Result<Vec<u8>> {
	let value = unwrap_source(value);
	match value.as_ref() {
		Value::Bytes(data) => Ok(data.clone()),
		other => Ok(to_string(other)?.into_bytes()),
	}
}

/// Coerce `value` to the scalar `target`, returning a value of that kind.
pub fn coerce(value: &Value, target: ScalarKind) -> Result<Value> {
	let out = match target {
		ScalarKind::Bool => Value::Bool(to_bool(value)?),
		ScalarKind::I8 => Value::I8(to_i8(value)?),
		ScalarKind::I16 => Value::I16(to_i16(value)?),
		ScalarKind::I32 => Value::I32(to_i32(value)?),
		ScalarKind::I64 | ScalarKind::Isize => Value::I64(to_i64(value)?),
		ScalarKind::U8 => Value::U8(to_u8(value)?),
		ScalarKind::U16 => Value::U16(to_u16(value)?),
		ScalarKind::U32 => Value::U32(to_u32(value)?),
		ScalarKind::U64 | ScalarKind::Usize => Value::U64(to_u64(value)?),
		ScalarKind::F32 => Value::F32(to_f32(value)?),
		ScalarKind::F64 => Value::F64(to_f64(value)?),
		ScalarKind::C64 => Value::C64(to_complex32(value)?),
		ScalarKind::C128 => Value::C128(to_complex(value)?),
		ScalarKind::String => Value::String(to_string(value)?.into_boxed_str()),
		ScalarKind::Bytes => Value::Bytes(to_bytes(value)?),
	};
	Ok(out)
}
