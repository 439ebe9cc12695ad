use crate::cmd::test_support::{named, run_diaprops, run_diaprops_json};

#[test]
fn describe_json_lists_box_descriptors() {
	let json = run_diaprops_json(&["describe", "Standard - Box", "--json"]);

	assert_eq!(json["type"], "Standard - Box");
	let names: Vec<&str> = json["props"].as_array().expect("props array").iter().filter_map(|prop| prop["name"].as_str()).collect();
	assert!(names.contains(&"corner_radius"));
	assert_eq!(named(&json["props"], "aspect")["items"][2], "Square=2");
}

#[test]
fn describe_merges_several_types() {
	let json = run_diaprops_json(&["describe", "Standard - Box", "Standard - Beziergon", "--filter", "visible", "--json"]);

	assert_eq!(json["type"], "Standard - Box+Standard - Beziergon");
	assert_eq!(json["merge"], "intersection");
	let names: Vec<&str> = json["props"].as_array().expect("props array").iter().filter_map(|prop| prop["name"].as_str()).collect();
	assert_eq!(names, ["line_width", "line_colour", "fill_colour", "show_background", "line_style"]);
}

#[test]
fn describe_rejects_unknown_types() {
	let output = run_diaprops(&["describe", "Standard - Cloud"]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: "));
}
