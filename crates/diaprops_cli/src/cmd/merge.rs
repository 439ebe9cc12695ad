use std::path::PathBuf;

use diaprops::props::{Diagnostics, MergeOption, ObjectId, PropError, PropFilter, PropertyObject, Result, describe_objects};

use crate::cmd::util::{DescriptorJson, descriptor_rows, emit_json, open_document, parse_filter, parse_merge, print_descriptor_rows, report};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// Object to include; repeat for a selection. Every object when omitted.
	#[arg(long = "id")]
	pub ids: Vec<u32>,
	#[arg(long, value_parser = parse_merge, default_value = "intersection")]
	pub merge: MergeOption,
	#[arg(long, value_parser = parse_filter, default_value = "visible")]
	pub filter: PropFilter,
	#[arg(long)]
	pub json: bool,
}

/// Print the descriptors a selection of document objects has in common.
pub fn run(args: Args) -> Result<()> {
	let mut diag = Diagnostics::new();
	let (document, _) = open_document(&args.file, &mut diag)?;
	report(&mut diag);

	let selection: Vec<&dyn PropertyObject> = if args.ids.is_empty() {
		document.iter().collect()
	} else {
		args.ids
			.iter()
			.map(|&id| document.get(ObjectId(id)).ok_or(PropError::ObjectNotFound { id: ObjectId(id) }))
			.collect::<Result<_>>()?
	};

	let table = describe_objects(&selection, args.merge);
	let rows = descriptor_rows(&table, args.filter);
	let option = if selection.len() == 1 { MergeOption::Intersection } else { args.merge };

	if args.json {
		emit_json(&MergeJson {
			type_name: table.type_name().to_owned(),
			merge: option.as_str().to_owned(),
			objects: selection.iter().map(|object| object.id().0).collect(),
			props: rows,
		});
		return Ok(());
	}

	println!("objects: {}", selection.len());
	print_descriptor_rows(table.type_name(), &rows);
	Ok(())
}

#[derive(serde::Serialize)]
struct MergeJson {
	#[serde(rename = "type")]
	type_name: String,
	merge: String,
	objects: Vec<u32>,
	props: Vec<DescriptorJson>,
}
