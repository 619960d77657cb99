use std::collections::HashMap;

use bytes::Bytes;

use crate::coder::{ObjectEncoder, Value, to_value};

#[test]
fn none_encodes_to_the_configured_sentinel() {
	assert_eq!(to_value(&None::<i32>), Value::from("$null"));
	let encoder = ObjectEncoder::with_nil_symbol("<nil>");
	assert_eq!(encoder.encode(&None::<String>), Value::from("<nil>"));
	assert_eq!(encoder.encode(&Some(4_u16)), Value::U16(4));
}

#[test]
fn scalars_keep_their_width() {
	assert_eq!(to_value(&-3_i8), Value::I8(-3));
	assert_eq!(to_value(&70_000_u32), Value::U32(70_000));
	assert_eq!(to_value(&5_usize), Value::U64(5));
	assert_eq!(to_value(&-5_isize), Value::I64(-5));
	assert_eq!(to_value(&1.5_f32), Value::F32(1.5));
	assert_eq!(to_value("text"), Value::from("text"));
	assert_eq!(to_value(&Bytes::from_static(b"ab")), Value::Data(Bytes::from_static(b"ab")));
}

#[test]
fn dictionary_builder_collects_entries() {
	let encoder = ObjectEncoder::new();
	let tags = vec!["a".to_owned(), "b".to_owned()];
	let value = encoder
		.dictionary()
		.insert("name", "sensor")
		.insert("tags", &tags)
		.insert_if_present("missing", None::<&i32>)
		.insert_if_present("limit", Some(&9_i64))
		.finish();

	let map = value.as_dictionary().expect("dictionary");
	assert_eq!(map.len(), 3);
	assert_eq!(map["name"], Value::from("sensor"));
	assert_eq!(map["tags"], Value::Array(vec![Value::from("a"), Value::from("b")]));
	assert_eq!(map["limit"], Value::I64(9));
	assert!(!map.contains_key("missing"));
}

#[test]
fn maps_encode_as_dictionaries() {
	let mut ports = HashMap::new();
	ports.insert("http".to_owned(), 80_u16);
	ports.insert("https".to_owned(), 443_u16);

	let value = to_value(&ports);
	assert_eq!(value.get("http"), Some(&Value::U16(80)));
	assert_eq!(value.get("https"), Some(&Value::U16(443)));
}
