use std::collections::HashMap;

use crate::conv::walk::{check_compatible, prepare, to_mapping};
use crate::conv::{
	ConvertError, Destination, Kind, NilRefPolicy, ScalarKind, ScanContext, ScanOptions, Shape, ToValue, Value,
};

crate::record! {
	#[derive(Debug, Default, Clone, PartialEq)]
	struct Body {
		pub id: i32,
	}
}

crate::record! {
	#[derive(Debug, Default, Clone, PartialEq)]
	struct Moon {
		pub name: String,
	}
}

crate::record! {
	#[derive(Debug, Default, Clone, PartialEq)]
	struct Planet {
		pub base: Body = embedded,
		pub name: String,
		pub moon: Option<Moon>,
		pub rings: Option<Box<Moon>>,
		hidden: i32 = unexported,
	}
}

fn earth() -> Planet {
	Planet {
		base: Body { id: 3 },
		name: "Earth".into(),
		moon: Some(Moon { name: "Luna".into() }),
		rings: None,
		hidden: 7,
	}
}

#[test]
fn flat_slices_pair_keys_with_values() {
	let options = ScanOptions::default();
	let cx = ScanContext::new(&options, None);
	let mapping = to_mapping(&Value::slice([1_i32, 2, 3]), &cx).expect("pairs");
	assert_eq!(mapping.len(), 2);
	assert_eq!(mapping["1"], Value::I32(2));
	assert_eq!(mapping["3"], Value::Null);
}

#[test]
fn structs_flatten_embedded_and_nest_references() {
	let options = ScanOptions::default();
	let cx = ScanContext::new(&options, None);
	let mapping = to_mapping(&earth().to_value(), &cx).expect("struct");

	assert_eq!(mapping.keys().collect::<Vec<_>>(), ["id", "name", "moon"]);
	assert_eq!(mapping["id"], Value::I32(3));
	assert_eq!(mapping["moon"], Value::map([("name", "Luna")]));
}

#[test]
fn absent_references_follow_policy() {
	let options = ScanOptions {
		nil_ref_fields: NilRefPolicy::Null,
		..ScanOptions::default()
	};
	let cx = ScanContext::new(&options, None);
	let mapping = to_mapping(&earth().to_value(), &cx).expect("struct");
	assert_eq!(mapping.keys().collect::<Vec<_>>(), ["id", "name", "moon", "rings"]);
	assert_eq!(mapping["rings"], Value::Null);
}

#[test]
fn scalars_are_not_mappings() {
	let options = ScanOptions::default();
	let cx = ScanContext::new(&options, None);
	let err = to_mapping(&Value::I32(5), &cx).expect_err("scalar");
	assert!(matches!(err, ConvertError::IncompatibleShape { from: Kind::Int, .. }));
	assert!(to_mapping(&Value::Ref(None), &cx).expect("absent").is_empty());
}

#[test]
fn text_is_decoded_only_when_enabled() {
	let src = Value::from(r#"{"a": 1}"#);

	let options = ScanOptions::default();
	let decoded = prepare(&src, &ScanContext::new(&options, None)).expect("decode");
	assert!(matches!(decoded.as_ref(), Value::Map(_)));

	let literal = ScanOptions::literal();
	let kept = prepare(&src, &ScanContext::new(&literal, None)).expect("keep");
	assert_eq!(kept.as_ref(), &src);
}

#[test]
fn compatibility_is_decided_by_kind() {
	let map = Shape::map(Shape::Scalar(ScalarKind::String), Shape::Any);
	let bytes = Shape::Slice(Box::new(Shape::Scalar(ScalarKind::U8)));
	let ints = Shape::Slice(Box::new(Shape::Scalar(ScalarKind::I32)));

	assert!(check_compatible(&Value::map([("a", 1_i32)]), &map).is_ok());
	assert!(check_compatible(&Value::Null, &map).is_ok());
	assert!(check_compatible(&Value::from("raw"), &bytes).is_ok());
	assert!(check_compatible(&Value::from("raw"), &map).is_err());
	assert!(check_compatible(&Value::from("raw"), &ints).is_err());
	assert!(check_compatible(&Value::slice([1_i32]), &Shape::Scalar(ScalarKind::I32)).is_err());
}

#[test]
fn a_single_container_fills_a_one_element_slice() {
	let options = ScanOptions::default();
	let cx = ScanContext::new(&options, None);
	let mut dest: Vec<HashMap<String, i32>> = Vec::new();
	dest.scan_from(&Value::map([("a", 1_i32)]), &cx).expect("scan");
	assert_eq!(dest, [HashMap::from([(String::from("a"), 1)])]);
}

#[test]
fn map_entry_failures_report_key() {
	let options = ScanOptions::default();
	let cx = ScanContext::new(&options, None);
	let mut dest: HashMap<String, Vec<i32>> = HashMap::new();
	let err = dest
		.scan_from(&Value::map([("xs", Value::Slice(vec![Value::I32(1), Value::map([("k", 1_i32)])]))]), &cx)
		.expect_err("map element into int");
	assert_eq!(err.path().map(ToString::to_string).as_deref(), Some(".xs[1]"));
	assert!(matches!(err.root(), ConvertError::Conversion { from: Kind::Map, to: "i32" }));
}
