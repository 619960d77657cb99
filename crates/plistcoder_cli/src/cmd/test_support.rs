use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use plistcoder_testkit::{fixture_path as shared_fixture_path, target_dir as workspace_target_dir};

static PLISTCODER_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn fixture_path(name: &str) -> PathBuf {
	shared_fixture_path(name)
}

pub(crate) fn run_plistcoder(args: &[&str]) -> Output {
	Command::new(plistcoder_bin()).args(args).output().expect("plistcoder command executes")
}

pub(crate) fn run_plistcoder_json(args: &[&str]) -> serde_json::Value {
	let output = run_plistcoder(args);
	assert!(
		output.status.success(),
		"plistcoder command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

/// Run a command expected to fail, returning its stdout parsed as JSON and its stderr.
pub(crate) fn run_plistcoder_json_failure(args: &[&str]) -> (serde_json::Value, String) {
	let output = run_plistcoder(args);
	assert!(!output.status.success(), "plistcoder command unexpectedly succeeded");
	let stdout = serde_json::from_slice(&output.stdout).expect("stdout should be valid json");
	(stdout, String::from_utf8_lossy(&output.stderr).into_owned())
}

fn plistcoder_bin() -> &'static PathBuf {
	PLISTCODER_BIN.get_or_init(resolve_plistcoder_bin)
}

fn resolve_plistcoder_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_plistcoder") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let target_dir = workspace_target_dir();

	let mut bin = target_dir.join("debug");
	bin.push(if cfg!(windows) { "plistcoder.exe" } else { "plistcoder" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "plistcoder"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build plistcoder binary at {}", bin.display());

	bin
}
