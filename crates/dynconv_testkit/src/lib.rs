//! Shared fixtures and helpers for workspace tests.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use dynconv::conv::{NativeValue, ToValue, Value};
use num_complex::{Complex32, Complex64};
use tracing_subscriber::filter::LevelFilter;

/// Layout used when a [`Timestamp`] exports itself as text.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Object text decoded by the structured-text fixtures.
pub const MARS_JSON: &str = r#"{"Name": "Mars", "Place": "奥林帕斯山"}"#;

static TRACING: LazyLock<()> = LazyLock::new(|| {
	let _ = tracing_subscriber::fmt()
		.with_max_level(LevelFilter::TRACE)
		.with_test_writer()
		.with_target(false)
		.try_init();
});

/// Install a test-writer subscriber once per process.
pub fn init_tracing() {
	LazyLock::force(&TRACING);
}

dynconv::record! {
	/// Two text fields filled by every scan fixture.
	#[derive(Debug, Default, Clone, PartialEq)]
	pub struct Planet {
		/// Body name.
		pub name: String,
		/// Notable surface feature.
		pub place: String,
	}
}

impl Planet {
	/// Planet with both fields set.
	pub fn new(name: &str, place: &str) -> Self {
		Self {
			name: name.to_owned(),
			place: place.to_owned(),
		}
	}
}

/// Generic container that exports whatever it holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Var(pub Value);

impl Var {
	/// Wrap anything convertible into a value.
	pub fn new(inner: impl Into<Value>) -> Self {
		Self(inner.into())
	}
}

impl NativeValue for Var {
	fn native(&self) -> Value {
		self.0.clone()
	}
}

impl ToValue for Var {
	fn to_value(&self) -> Value {
		Value::wrapped(self.clone())
	}
}

/// Calendar timestamp that exports itself as formatted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(pub NaiveDateTime);

impl Timestamp {
	/// Parse text laid out as [`TIMESTAMP_FORMAT`].
	pub fn parse(text: &str) -> Result<Self, chrono::ParseError> {
		NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map(Self)
	}
}

impl NativeValue for Timestamp {
	fn native(&self) -> Value {
		Value::from(self.0.format(TIMESTAMP_FORMAT).to_string())
	}
}

impl ToValue for Timestamp {
	fn to_value(&self) -> Value {
		Value::wrapped(*self)
	}
}

/// One `{"Name": .., "Place": ..}` source with the text both fields format to.
#[derive(Debug, Clone)]
pub struct ScanCase {
	/// Source kind under test.
	pub label: &'static str,
	/// Two-entry map source.
	pub source: Value,
	/// Text expected for `Name`.
	pub name: &'static str,
	/// Text expected for `Place`.
	pub place: &'static str,
}

fn case(label: &'static str, name: impl ToValue, place: impl ToValue, expected: (&'static str, &'static str)) -> ScanCase {
	ScanCase {
		label,
		source: Value::map([("Name", name.to_value()), ("Place", place.to_value())]),
		name: expected.0,
		place: expected.1,
	}
}

fn timestamp(text: &str) -> Timestamp {
	Timestamp::parse(text).unwrap_or_else(|err| panic!("fixture timestamp {text:?}: {err}"))
}

/// Map sources covering every scalar family, wrapped values included.
pub fn scan_value_maps() -> Vec<ScanCase> {
	vec![
		case("bool", false, true, ("false", "true")),
		case("isize", 0_isize, 1_isize, ("0", "1")),
		case("i8", 0_i8, 1_i8, ("0", "1")),
		case("i16", 0_i16, 1_i16, ("0", "1")),
		case("i32", 0_i32, 1_i32, ("0", "1")),
		case("i64", 0_i64, 1_i64, ("0", "1")),
		case("usize", 0_usize, 1_usize, ("0", "1")),
		case("u8", 0_u8, 1_u8, ("0", "1")),
		case("u16", 0_u16, 1_u16, ("0", "1")),
		case("u32", 0_u32, 1_u32, ("0", "1")),
		case("u64", 0_u64, 1_u64, ("0", "1")),
		case("f32", 0_f32, 1_f32, ("0", "1")),
		case("f64", 0_f64, 1_f64, ("0", "1")),
		case("string", "Mercury", "卡罗利斯盆地", ("Mercury", "卡罗利斯盆地")),
		case("bytes", Value::bytes("Saturn"), Value::bytes("土星环"), ("Saturn", "土星环")),
		case("complex64", Complex32::new(0.0, 0.0), Complex32::new(1.0, 2.0), ("(0+0i)", "(1+2i)")),
		case("complex128", Complex64::new(0.0, 0.0), Complex64::new(1.0, 2.0), ("(0+0i)", "(1+2i)")),
		case("any", Value::I32(0), Value::from("1"), ("0", "1")),
		case("var", Var::new("Jupiter"), Var::new("大红斑"), ("Jupiter", "大红斑")),
		case(
			"timestamp",
			timestamp("2024-01-01 01:01:01"),
			timestamp("2021-01-01 01:01:01"),
			("2024-01-01 01:01:01", "2021-01-01 01:01:01"),
		),
	]
}
