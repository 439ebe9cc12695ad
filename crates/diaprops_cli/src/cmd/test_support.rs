use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

pub(crate) use diaprops_testkit::fixture_arg;

/// Run the `diaprops` binary with `args`.
pub(crate) fn run_diaprops(args: &[&str]) -> Output {
	static BIN: OnceLock<PathBuf> = OnceLock::new();
	let bin = BIN.get_or_init(|| option_env!("CARGO_BIN_EXE_diaprops").map_or_else(|| diaprops_testkit::workspace_binary("diaprops"), PathBuf::from));
	Command::new(bin).args(args).output().unwrap_or_else(|err| panic!("spawn {}: {err}", bin.display()))
}

/// Run a command that must succeed and parse its JSON stdout.
pub(crate) fn run_diaprops_json(args: &[&str]) -> serde_json::Value {
	let output = run_diaprops(args);
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(output.status.success(), "diaprops {} exited with {}: {stderr}", args.join(" "), output.status);
	serde_json::from_slice(&output.stdout).unwrap_or_else(|err| panic!("diaprops {} printed invalid json: {err}", args.join(" ")))
}

/// Entry of a JSON array whose `name` field equals `name`.
pub(crate) fn named<'a>(items: &'a serde_json::Value, name: &str) -> &'a serde_json::Value {
	items
		.as_array()
		.and_then(|items| items.iter().find(|item| item["name"] == name))
		.unwrap_or_else(|| panic!("no entry named {name} in {items}"))
}
