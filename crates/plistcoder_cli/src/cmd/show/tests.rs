use crate::cmd::test_support::{fixture_path, run_plistcoder, run_plistcoder_json};

#[test]
fn show_json_output_is_valid_and_structured() {
	let fixture = fixture_path("document.json");
	let fixture = fixture.to_string_lossy().into_owned();
	let json = run_plistcoder_json(&["show", &fixture, "--json"]);

	assert_eq!(json["path"], "<root>");
	assert_eq!(json["kind"], "dictionary");
	assert_eq!(json["value"]["pages"], 12);
	assert_eq!(json["value"]["created"]["$date"], "2024-07-01T12:00:00Z");
}

#[test]
fn show_path_selects_nested_value() {
	let fixture = fixture_path("document.json");
	let fixture = fixture.to_string_lossy().into_owned();
	let json = run_plistcoder_json(&["show", &fixture, "--path", "servers[1].ports", "--json"]);

	assert_eq!(json["path"], "servers[1].ports");
	assert_eq!(json["kind"], "array");
	assert_eq!(json["value"], serde_json::json!([8080, "ssh"]));
}

#[test]
fn show_reports_missing_selection() {
	let fixture = fixture_path("document.json");
	let fixture = fixture.to_string_lossy().into_owned();
	let output = run_plistcoder(&["show", &fixture, "--path", "servers[9]"]);

	assert!(!output.status.success(), "missing selection should fail");
	let stderr = String::from_utf8(output.stderr).expect("stderr is utf8");
	assert!(stderr.contains("error: no value at path servers[9]"), "unexpected stderr: {stderr}");
}
