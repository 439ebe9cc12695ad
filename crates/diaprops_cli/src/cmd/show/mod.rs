use std::path::PathBuf;

use diaprops::props::{Diagnostics, ObjectId, PropError, PropFilter, PropertyObject, Result, object_props};

use crate::cmd::util::{emit_json, open_document, parse_filter, render_value, report};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// Show only the object with this id.
	#[arg(long)]
	pub id: Option<u32>,
	#[arg(long, value_parser = parse_filter, default_value = "do-save")]
	pub filter: PropFilter,
	#[arg(long)]
	pub json: bool,
}

/// Print the objects of a document with their property values.
pub fn run(args: Args) -> Result<()> {
	let mut diag = Diagnostics::new();
	let (document, compression) = open_document(&args.file, &mut diag)?;

	let selected: Vec<&dyn PropertyObject> = match args.id {
		Some(id) => vec![document.get(ObjectId(id)).ok_or(PropError::ObjectNotFound { id: ObjectId(id) })?],
		None => document.iter().collect(),
	};

	let objects: Vec<ObjectJson> = selected
		.into_iter()
		.map(|object| ObjectJson {
			id: object.id().0,
			type_name: object.type_name().to_owned(),
			props: object_props(object, args.filter, &mut diag)
				.iter()
				.filter(|prop| prop.kind().has_payload())
				.map(|prop| PropJson {
					name: prop.name().to_owned(),
					kind: prop.kind().to_string(),
					value: render_value(prop),
				})
				.collect(),
		})
		.collect();
	report(&mut diag);

	if args.json {
		emit_json(&ShowJson {
			path: args.file.display().to_string(),
			compression: compression.as_str().to_owned(),
			objects,
		});
		return Ok(());
	}

	println!("path: {}", args.file.display());
	println!("compression: {}", compression.as_str());
	println!("objects: {}", objects.len());
	for object in &objects {
		println!();
		println!("object {} ({})", object.id, object.type_name);
		println!("name\tkind\tvalue");
		for prop in &object.props {
			println!("{}\t{}\t{}", prop.name, prop.kind, prop.value);
		}
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct ShowJson {
	path: String,
	compression: String,
	objects: Vec<ObjectJson>,
}

#[derive(serde::Serialize)]
struct ObjectJson {
	id: u32,
	#[serde(rename = "type")]
	type_name: String,
	props: Vec<PropJson>,
}

#[derive(serde::Serialize)]
struct PropJson {
	name: String,
	kind: String,
	value: String,
}

#[cfg(test)]
mod tests;
