use crate::cmd::test_support::{fixture_arg, named, run_diaprops, run_diaprops_json};

#[test]
fn show_json_lists_known_objects() {
	let json = run_diaprops_json(&["show", &fixture_arg("board.json"), "--json"]);

	assert_eq!(json["compression"], "none");
	let objects = json["objects"].as_array().expect("objects array");
	assert_eq!(objects.len(), 2);
	assert_eq!(objects[0]["type"], "Standard - Box");
	assert_eq!(named(&objects[0]["props"], "corner_radius")["value"], "0.5");
}

#[test]
fn show_warns_about_unknown_objects() {
	let output = run_diaprops(&["show", &fixture_arg("board.json"), "--id", "3"]);

	assert!(output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("warning: "), "stderr: {stderr}");
	assert!(stderr.contains("Flowchart - Diamond"), "stderr: {stderr}");
	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("object 3 (UML - Class)"));
}

#[test]
fn show_fails_for_missing_objects() {
	let output = run_diaprops(&["show", &fixture_arg("board.json"), "--id", "99"]);
	assert!(!output.status.success());
}
