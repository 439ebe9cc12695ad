//! Fixtures and binaries shared by the workspace test suites.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Checkout root: two levels above this crate's manifest.
pub fn workspace_root() -> PathBuf {
	let here = Path::new(env!("CARGO_MANIFEST_DIR"));
	match here.parent().and_then(Path::parent) {
		Some(root) => root.to_path_buf(),
		None => here.to_path_buf(),
	}
}

/// `fixtures/<name>` under the checkout root.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// [`fixture_path`] as a command-line argument.
pub fn fixture_arg(name: &str) -> String {
	fixture_path(name).to_string_lossy().into_owned()
}

/// Read and parse a JSON fixture, panicking with the path on failure.
pub fn read_json_fixture(name: &str) -> serde_json::Value {
	let path = fixture_path(name);
	let raw = std::fs::read(&path).unwrap_or_else(|err| panic!("read fixture {}: {err}", path.display()));
	serde_json::from_slice(&raw).unwrap_or_else(|err| panic!("parse fixture {}: {err}", path.display()))
}

/// Debug build of the workspace binary `name`, built through cargo first.
///
/// Unit tests of a binary crate do not get `CARGO_BIN_EXE_<name>`, so they
/// locate the executable here instead.
pub fn workspace_binary(name: &str) -> PathBuf {
	let cargo = std::env::var_os("CARGO").unwrap_or_else(|| "cargo".into());
	let status = Command::new(cargo)
		.current_dir(workspace_root())
		.args(["build", "--quiet", "--bin", name])
		.status()
		.unwrap_or_else(|err| panic!("run cargo build for {name}: {err}"));
	assert!(status.success(), "cargo build --bin {name} failed with {status}");

	let target = std::env::var_os("CARGO_TARGET_DIR").map_or_else(|| workspace_root().join("target"), PathBuf::from);
	target.join("debug").join(format!("{name}{}", std::env::consts::EXE_SUFFIX))
}
