use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use num_complex::Complex64;

use crate::conv::{ConvertError, Destination, Key, Kind, ScanContext, ScanOptions, Value};

fn scan_into<D: Destination>(dest: &mut D, src: &Value) -> crate::conv::Result<()> {
	let options = ScanOptions::default();
	dest.scan_from(src, &ScanContext::new(&options, None))
}

#[test]
fn shapes_render_like_declarations() {
	assert_eq!(<HashMap<String, Vec<i32>>>::shape_of().to_string(), "map<string, []i32>");
	assert_eq!(<Option<Box<f64>>>::shape_of().to_string(), "**f64");
	assert_eq!(<BTreeMap<Key, Value>>::shape_of().to_string(), "map<any, any>");
}

#[test]
fn scalar_slots_coerce() {
	let mut small = 0_u8;
	scan_into(&mut small, &Value::from("300")).expect("scan");
	assert_eq!(small, 44);

	let mut text = String::from("old");
	scan_into(&mut text, &Value::F64(2.5)).expect("scan");
	assert_eq!(text, "2.5");

	let mut complex = Complex64::default();
	scan_into(&mut complex, &Value::I32(4)).expect("scan");
	assert_eq!(complex, Complex64::new(4.0, 0.0));
}

#[test]
fn option_slot_ignores_absent_and_allocates_on_value() {
	let mut kept = Some(5_i32);
	scan_into(&mut kept, &Value::Null).expect("scan");
	scan_into(&mut kept, &Value::Ref(None)).expect("scan");
	assert_eq!(kept, Some(5));

	let mut fresh: Option<i32> = None;
	scan_into(&mut fresh, &Value::I8(2)).expect("scan");
	assert_eq!(fresh, Some(2));
}

#[test]
fn generic_slot_stores_direct_value() {
	let mut slot = Value::Null;
	let src = Value::slice([1_i32, 2]);
	scan_into(&mut slot, &Value::reference(src.clone())).expect("scan");
	assert_eq!(slot, src);

	scan_into(&mut slot, &Value::Ref(None)).expect("scan");
	assert_eq!(slot, Value::Null);
}

#[test]
fn maps_update_existing_entries() {
	let mut dest = HashMap::from([(String::from("keep"), 1_i32), (String::from("a"), 9)]);
	scan_into(&mut dest, &Value::map([("a", "2"), ("b", "3")])).expect("scan");
	assert_eq!(dest.len(), 3);
	assert_eq!(dest["keep"], 1);
	assert_eq!(dest["a"], 2);
	assert_eq!(dest["b"], 3);
}

#[test]
fn map_keys_are_coerced_to_key_type() {
	let mut dest: BTreeMap<i32, String> = BTreeMap::new();
	scan_into(&mut dest, &Value::map([("2", Value::Bool(true)), ("1", Value::F32(1.5))])).expect("scan");
	assert_eq!(dest.into_iter().collect::<Vec<_>>(), [(1, "1.5".to_owned()), (2, "true".to_owned())]);
}

#[test]
fn generic_keys_keep_their_kind() {
	let mut dest: IndexMap<Key, Value> = IndexMap::new();
	scan_into(&mut dest, &Value::map([(Value::I32(1), "int"), (Value::from("1"), "text")])).expect("scan");
	assert_eq!(dest.len(), 2);
	assert_eq!(dest[&Key::Int(1)], Value::from("int"));
	assert_eq!(dest[&Key::from("1")], Value::from("text"));
}

#[test]
fn container_keys_are_rejected_with_location() {
	let mut dest: IndexMap<Key, Value> = IndexMap::new();
	let err = scan_into(&mut dest, &Value::Map(vec![(Value::slice([1_i32]), Value::I32(1))])).expect_err("slice key");
	assert!(matches!(err.root(), ConvertError::Conversion { from: Kind::Slice, to: "key" }));
}

#[test]
fn slices_resize_to_source_length() {
	let mut longer = vec![9_i32, 9, 9];
	scan_into(&mut longer, &Value::slice(["1", "2"])).expect("scan");
	assert_eq!(longer, [1, 2]);

	let mut shorter = vec![9_i32];
	scan_into(&mut shorter, &Value::slice([1_u8, 2, 3])).expect("scan");
	assert_eq!(shorter, [1, 2, 3]);
}

#[test]
fn byte_slices_take_raw_text() {
	let mut raw: Vec<u8> = Vec::new();
	scan_into(&mut raw, &Value::from("hi")).expect("scan");
	assert_eq!(raw, b"hi");

	scan_into(&mut raw, &Value::bytes([1_u8, 2, 3])).expect("scan");
	assert_eq!(raw, [1, 2, 3]);
}

#[test]
fn element_failures_report_index() {
	let mut dest: Vec<i32> = Vec::new();
	let err = scan_into(&mut dest, &Value::Slice(vec![Value::I32(1), Value::slice([2_i32])])).expect_err("nested slice");
	assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("[1]"));
	assert_eq!(dest, [1]);
}
