#![allow(missing_docs)]

use std::collections::HashMap;

use dynconv::conv::{self, Kind, ToValue, Value, classify, scan, to_map};
use dynconv_testkit::{Planet, Timestamp, Var, init_tracing};

#[test]
fn wrappers_classify_as_wrapped_values() {
	assert_eq!(classify(&Var::new(1_i32).to_value()), Kind::WrappedValue);
	let stamp = Timestamp::parse("2024-01-01 01:01:01").expect("timestamp");
	assert_eq!(classify(&stamp.to_value()), Kind::WrappedValue);
}

#[test]
fn scalar_destinations_receive_native_values() {
	init_tracing();
	let source = Value::map([
		("count", Var::new("12").to_value()),
		("ratio", Var::new(0.5_f64).to_value()),
		("flag", Var::new("off").to_value()),
	]);

	let mut ints: HashMap<String, i32> = HashMap::new();
	scan(&source, &mut ints).expect("ints");
	assert_eq!(ints["count"], 12);
	assert_eq!(ints["ratio"], 0);

	let mut flags: HashMap<String, bool> = HashMap::new();
	scan(&source, &mut flags).expect("bools");
	assert!(flags["count"]);
	assert!(!flags["flag"]);
}

#[test]
fn timestamps_export_formatted_text() {
	let stamp = Timestamp::parse("2021-01-01 01:01:01").expect("timestamp");
	assert_eq!(conv::to_string(&stamp.to_value()).expect("formats"), "2021-01-01 01:01:01");

	let mut planet = Planet::default();
	scan(&Value::map([("name", Var::new("Jupiter").to_value()), ("place", stamp.to_value())]), &mut planet).expect("scan");
	assert_eq!(planet, Planet::new("Jupiter", "2021-01-01 01:01:01"));
}

#[test]
fn wrapped_containers_are_unwrapped_at_the_root() {
	let source = Var::new(Value::map([("name", "Saturn"), ("place", "Titan")]));

	let mut planet = Planet::default();
	scan(&source, &mut planet).expect("scan");
	assert_eq!(planet, Planet::new("Saturn", "Titan"));

	let mapping = to_map(&source).expect("mapping");
	assert_eq!(mapping["place"], Value::from("Titan"));
}

#[test]
fn wrapped_text_is_decoded() {
	let mut planet = Planet::default();
	scan(&Var::new(r#"{"name": "Neptune"}"#), &mut planet).expect("scan");
	assert_eq!(planet.name, "Neptune");
}

#[test]
fn wrapped_values_compare_by_export() {
	assert_eq!(Var::new("x").to_value(), Var::new("x").to_value());
	assert_ne!(Var::new("x").to_value(), Var::new("y").to_value());
}
