use bytes::Bytes;
use time::macros::datetime;

use crate::coder::{CodingPath, DecodeError, ErrorKind, Value, ValueKind, coerce};

fn at() -> CodingPath {
	["settings", "volume"].into_iter().collect()
}

#[test]
fn identity_matches_every_primitive() {
	assert!(coerce::<bool>(&Value::Bool(true), &at()).expect("bool"));
	assert_eq!(coerce::<i8>(&Value::I8(-5), &at()).expect("i8"), -5);
	assert_eq!(coerce::<i16>(&Value::I16(300), &at()).expect("i16"), 300);
	assert_eq!(coerce::<i32>(&Value::I32(-70_000), &at()).expect("i32"), -70_000);
	assert_eq!(coerce::<i64>(&Value::I64(i64::MIN), &at()).expect("i64"), i64::MIN);
	assert_eq!(coerce::<u8>(&Value::U8(200), &at()).expect("u8"), 200);
	assert_eq!(coerce::<u16>(&Value::U16(60_000), &at()).expect("u16"), 60_000);
	assert_eq!(coerce::<u32>(&Value::U32(u32::MAX), &at()).expect("u32"), u32::MAX);
	assert_eq!(coerce::<u64>(&Value::U64(u64::MAX), &at()).expect("u64"), u64::MAX);
	assert_eq!(coerce::<f32>(&Value::F32(1.25), &at()).expect("f32"), 1.25);
	assert_eq!(coerce::<f64>(&Value::F64(-2.5), &at()).expect("f64"), -2.5);
	assert_eq!(coerce::<String>(&Value::from("hi"), &at()).expect("string"), "hi");

	let bytes = Bytes::from_static(b"\x00\x01");
	assert_eq!(coerce::<Bytes>(&Value::Data(bytes.clone()), &at()).expect("data"), bytes);
	let date = datetime!(2024-02-29 12:00 UTC);
	assert_eq!(coerce::<time::OffsetDateTime>(&Value::Date(date), &at()).expect("date"), date);
}

#[test]
fn widening_and_exact_narrowing_succeed() {
	assert_eq!(coerce::<i64>(&Value::U8(7), &at()).expect("widen"), 7);
	assert_eq!(coerce::<u8>(&Value::I64(7), &at()).expect("narrow"), 7);
	assert_eq!(coerce::<i32>(&Value::F64(3.0), &at()).expect("integral float"), 3);
	assert_eq!(coerce::<f64>(&Value::I32(12), &at()).expect("int to float"), 12.0);
	assert_eq!(coerce::<usize>(&Value::U32(9), &at()).expect("usize"), 9);
	assert_eq!(coerce::<isize>(&Value::I16(-9), &at()).expect("isize"), -9);
}

#[test]
fn inexact_conversion_is_data_corrupted() {
	let err = coerce::<u8>(&Value::I64(256), &at()).expect_err("out of range");
	assert_eq!(err.kind(), ErrorKind::DataCorrupted);
	assert_eq!(err.path(), &at());
	assert!(err.to_string().contains("<256> does not fit in u8"), "unexpected message: {err}");

	let err = coerce::<i64>(&Value::F64(3.5), &at()).expect_err("fractional");
	assert_eq!(err.kind(), ErrorKind::DataCorrupted);

	let err = coerce::<f32>(&Value::F64(0.1), &at()).expect_err("imprecise");
	assert_eq!(err.kind(), ErrorKind::DataCorrupted);

	let err = coerce::<i32>(&Value::F32(f32::NAN), &at()).expect_err("nan to int");
	assert_eq!(err.kind(), ErrorKind::DataCorrupted);
}

#[test]
fn wrong_kind_is_type_mismatch() {
	let err = coerce::<i32>(&Value::from("12"), &at()).expect_err("string is not a number");
	assert_eq!(
		err,
		DecodeError::TypeMismatch {
			expected: "i32",
			found: ValueKind::String,
			path: at(),
		}
	);

	assert_eq!(coerce::<bool>(&Value::I8(1), &at()).expect_err("int is not bool").kind(), ErrorKind::TypeMismatch);
	assert_eq!(coerce::<String>(&Value::Bool(false), &at()).expect_err("bool is not string").kind(), ErrorKind::TypeMismatch);
	assert_eq!(coerce::<f64>(&Value::Bool(true), &at()).expect_err("bool is not float").kind(), ErrorKind::TypeMismatch);
	assert_eq!(
		coerce::<Bytes>(&Value::Array(Vec::new()), &at()).expect_err("array is not data").kind(),
		ErrorKind::TypeMismatch
	);
}

#[test]
fn nan_decodes_across_widths() {
	assert!(coerce::<f32>(&Value::F64(f64::NAN), &at()).expect("nan narrows").is_nan());
	assert!(coerce::<f64>(&Value::F32(f32::NAN), &at()).expect("nan widens").is_nan());
}
