use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::conv::{
	ConvertError, Converter, Kind, PlanCache, Record, ScanContext, ScanOptions, Value, scan, to_map,
};

crate::record! {
	#[derive(Debug, Default, Clone, PartialEq)]
	struct Probe {
		pub name: String,
		pub speed: f64,
	}
}

#[test]
fn top_level_scalars_are_invalid_destinations() {
	let mut number = 0_i32;
	let err = scan(&Value::I32(1), &mut number).expect_err("scalar destination");
	assert!(matches!(&err, ConvertError::InvalidDestination { shape } if shape == "i32"));

	let mut any = Value::Null;
	assert!(matches!(scan(&Value::I32(1), &mut any), Err(ConvertError::InvalidDestination { .. })));
}

#[test]
fn optional_containers_are_valid_destinations() {
	let mut dest: Option<HashMap<String, i32>> = None;
	scan(&Value::map([("a", 1_i32)]), &mut dest).expect("scan");
	assert_eq!(dest.and_then(|map| map.get("a").copied()), Some(1));
}

#[test]
fn shape_mismatch_fails_before_writing() {
	let mut dest = HashMap::from([(String::from("keep"), 1_i32)]);
	let err = scan(&Value::U8(4), &mut dest).expect_err("scalar source");
	assert!(matches!(&err, ConvertError::IncompatibleShape { from: Kind::Uint, to } if to == "map<string, i32>"));

	let err = scan("plain words", &mut dest).expect_err("plain text");
	assert!(matches!(err, ConvertError::IncompatibleShape { from: Kind::String, .. }));
	assert_eq!(dest.len(), 1);
}

#[test]
fn malformed_structured_text_is_a_decode_error() {
	let mut dest: BTreeMap<String, Value> = BTreeMap::new();
	let err = scan("[1, 2", &mut dest).expect_err("truncated array");
	assert!(matches!(err, ConvertError::JsonDecode(_)));
	assert!(dest.is_empty());
}

#[test]
fn absent_sources_are_no_ops() {
	let mut probe = Probe {
		name: "voyager".into(),
		speed: 17.0,
	};
	scan(&Value::Null, &mut probe).expect("null");
	scan(&Option::<Probe>::None, &mut probe).expect("none");
	assert_eq!(probe.name, "voyager");
	assert!(to_map(&Value::Ref(None)).expect("absent").is_empty());
}

#[test]
fn literal_options_keep_text_opaque() {
	let converter = Converter::new(ScanOptions::literal());
	let mut dest: HashMap<String, Value> = HashMap::new();
	let err = converter.scan(r#"{"a": 1}"#, &mut dest).expect_err("text stays text");
	assert!(matches!(err, ConvertError::IncompatibleShape { from: Kind::String, .. }));
}

#[test]
fn injected_cache_collects_plans() {
	let cache = Arc::new(PlanCache::new());
	let converter = Converter::with_cache(ScanOptions::default(), Arc::clone(&cache));
	let mut probe = Probe::default();

	converter.scan(r#"{"name": "pioneer", "speed": "12.5"}"#, &mut probe).expect("scan");
	converter.scan(r#"{"SPEED": 13}"#, &mut probe).expect("scan");
	assert_eq!(cache.len(), 1);
	assert_eq!(probe, Probe { name: "pioneer".into(), speed: 13.0 });

	cache.clear();
	assert!(cache.is_empty());
}

#[test]
fn uncached_contexts_rebuild_plans() {
	let options = ScanOptions::default();
	let uncached = ScanContext::new(&options, None);
	assert!(!Arc::ptr_eq(&uncached.plan(Probe::descriptor()), &uncached.plan(Probe::descriptor())));

	let cache = PlanCache::new();
	let cached = ScanContext::new(&options, Some(&cache));
	assert!(Arc::ptr_eq(&cached.plan(Probe::descriptor()), &cached.plan(Probe::descriptor())));
}

#[test]
fn options_deserialize_with_defaults() {
	let options: ScanOptions = serde_json::from_str(r#"{"nil_ref_fields": "null"}"#).expect("options");
	assert!(options.decode_structured_text);
	assert!(options.cache_plans);
	assert_eq!(Converter::new(options.clone()).options(), &options);
}
