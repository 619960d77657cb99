use bytes::Bytes;
use plistcoder::coder::Value;
use time::macros::datetime;

use super::{PrintOptions, render_value, truncate};
use crate::cmd::test_support::{fixture_path, run_plistcoder};

#[test]
fn scalars_carry_width_suffixes() {
	let tree: Value = [
		("a", Value::U8(3)),
		("b", Value::I64(-4)),
		("c", Value::F64(1.0)),
		("d", Value::Date(datetime!(2024-01-02 03:04:05 UTC))),
		("e", Value::Data(Bytes::from_static(&[0xca, 0xfe]))),
	]
	.into_iter()
	.collect();

	let rendered = render_value(&tree, 0, PrintOptions::default());
	assert_eq!(
		rendered,
		"{\n  a = 3_u8\n  b = -4\n  c = 1.0\n  d = 2024-01-02T03:04:05Z\n  e = data[2] cafe\n}\n"
	);
}

#[test]
fn limits_truncate_arrays_strings_and_depth() {
	let options = PrintOptions {
		max_entries_per_dictionary: 1,
		max_string_len: 3,
		max_array_items: 2,
		max_print_depth: 1,
	};

	let list = Value::Array(vec![Value::from("abcdef"), Value::Bool(true), Value::Bool(false)]);
	let rendered = render_value(&list, 2, options);
	assert_eq!(rendered, "  [\n    \"abc...\"\n    true\n    ... 1 more\n  ]\n");

	let nested: Value = [("x", Value::Array(vec![Value::I64(1)])), ("y", Value::I64(2))].into_iter().collect();
	let rendered = render_value(&nested, 0, options);
	assert_eq!(rendered, "{\n  x =\n    [... 1 items]\n  ... 1 more entries\n}\n");
}

#[test]
fn truncate_counts_unicode_scalars() {
	assert_eq!(truncate("héllo", 2), "hé...");
	assert_eq!(truncate("hi", 2), "hi");
}

#[test]
fn show_prints_document_tree() {
	let fixture = fixture_path("document.json");
	let fixture = fixture.to_string_lossy().into_owned();
	let output = run_plistcoder(&["show", &fixture, "--max-string", "10"]);

	assert!(output.status.success(), "show command should succeed");
	let stdout = String::from_utf8(output.stdout).expect("stdout is utf8");
	assert!(stdout.contains("title = \"Quarterly ...\""), "expected truncated title: {stdout}");
	assert!(stdout.contains("created = 2024-07-01T12:00:00Z"), "expected rendered date: {stdout}");
	assert!(stdout.contains("checksum = data[2] cafe"), "expected rendered data: {stdout}");
}
