use std::path::PathBuf;

use diaprops::props::{Diagnostics, Document, DocumentOptions, Result};

use crate::cmd::util::{catalog, emit_json, report};

#[derive(clap::Args)]
pub struct Args {
	pub output: PathBuf,
	/// Object type to add; repeat for several objects.
	#[arg(long = "type", required = true)]
	pub types: Vec<String>,
	/// Write zstd-compressed JSON.
	#[arg(long)]
	pub compress: bool,
	#[arg(long)]
	pub json: bool,
}

/// Create a document holding one default object per requested type.
pub fn run(args: Args) -> Result<()> {
	let mut diag = Diagnostics::new();
	let mut document = Document::new(catalog()?);
	for type_name in &args.types {
		document.create(type_name)?;
	}

	let options = if args.compress { DocumentOptions::compressed() } else { DocumentOptions::default() };
	document.save(&args.output, &options, &mut diag)?;
	report(&mut diag);

	let objects: Vec<ObjectJson> = document
		.iter()
		.map(|object| ObjectJson {
			id: object.id().0,
			type_name: object.type_name().to_owned(),
		})
		.collect();

	if args.json {
		emit_json(&NewJson {
			path: args.output.display().to_string(),
			compression: options.compression.as_str().to_owned(),
			objects,
		});
		return Ok(());
	}

	println!("path: {}", args.output.display());
	println!("compression: {}", options.compression.as_str());
	println!("objects: {}", objects.len());
	println!("id\ttype");
	for object in &objects {
		println!("{}\t{}", object.id, object.type_name);
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct NewJson {
	path: String,
	compression: String,
	objects: Vec<ObjectJson>,
}

#[derive(serde::Serialize)]
struct ObjectJson {
	id: u32,
	#[serde(rename = "type")]
	type_name: String,
}
