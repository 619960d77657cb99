use crate::coder::{CodingPath, PathSegment};

#[test]
fn parses_keys_and_indices() {
	let path = CodingPath::parse("servers[1].ports[0]").expect("path parses");
	assert_eq!(
		path.segments(),
		&[
			PathSegment::Key("servers".to_owned()),
			PathSegment::Index(1),
			PathSegment::Key("ports".to_owned()),
			PathSegment::Index(0),
		]
	);
}

#[test]
fn parses_leading_index_and_non_identifier_keys() {
	let path = CodingPath::parse("[2].display name").expect("path parses");
	assert_eq!(path.segments(), &[PathSegment::Index(2), PathSegment::Key("display name".to_owned())]);
}

#[test]
fn rejects_malformed_paths() {
	for input in ["", "a.", ".a", "a..b", "a[", "a[x]", "a[1", "a]b", "a[1]b"] {
		let err = CodingPath::parse(input).expect_err("malformed path should fail");
		assert_eq!(err.path, input);
	}
}

#[test]
fn display_round_trips_parse() {
	let text = "a.b[3][4].c";
	let path = CodingPath::parse(text).expect("path parses");
	assert_eq!(path.to_string(), text);
	assert_eq!(CodingPath::root().to_string(), "<root>");
}

#[test]
fn joined_leaves_original_untouched() {
	let base: CodingPath = ["a", "b"].into_iter().collect();
	let longer = base.joined(7_usize);
	assert_eq!(base.len(), 2);
	assert_eq!(longer.last(), Some(&PathSegment::Index(7)));
	assert_eq!(longer.to_string(), "a.b[7]");
}

#[test]
fn keys_with_separators_render_quoted() {
	let path: CodingPath = [PathSegment::from("servers"), PathSegment::from("host.name"), PathSegment::from(0_usize)]
		.into_iter()
		.collect();
	assert_eq!(path.to_string(), r#"servers["host.name"][0]"#);

	let leading: CodingPath = ["a.b", "c"].into_iter().collect();
	assert_eq!(leading.to_string(), r#"["a.b"].c"#);
}

#[test]
fn quoted_keys_round_trip_through_parse() {
	let awkward = ["a.b", "x[1]", "", "]", r#"say "hi" \ bye"#, "<root>", "plain"];
	for key in awkward {
		let path: CodingPath = [PathSegment::from("outer"), PathSegment::from(key), PathSegment::from(3_usize)]
			.into_iter()
			.collect();
		let text = path.to_string();
		let parsed = CodingPath::parse(&text).expect("rendered path parses");
		assert_eq!(parsed, path, "rendered as {text}");
	}

	let alone: CodingPath = ["<root>"].into_iter().collect();
	assert_ne!(alone.to_string(), CodingPath::root().to_string());
}

#[test]
fn rejects_malformed_quoted_keys() {
	for input in [r#"a[""#, r#"a["b"#, r#"a["b""#, r#"a["b"x]"#, r#"a["b\n"]"#, r#"a["b"]c"#] {
		let err = CodingPath::parse(input).expect_err("malformed quoted key should fail");
		assert_eq!(err.path, input);
	}
}
