use std::path::PathBuf;

use diaprops::props::{
	Compression, Diagnostics, DocumentOptions, ObjectId, PropError, PropertyKind, PropertyList, Result, apply_props, prop_by_name, set_string_prop,
};

use crate::cmd::util::{emit_json, open_document, parse_value, render_value, report};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long)]
	pub id: u32,
	#[arg(long)]
	pub prop: String,
	/// New value in document literal syntax; enum values may use their label.
	#[arg(long)]
	pub value: String,
	/// Write the result here instead of over the input.
	#[arg(long)]
	pub output: Option<PathBuf>,
	#[arg(long)]
	pub json: bool,
}

/// Change one property of one object and save the document.
pub fn run(args: Args) -> Result<()> {
	let mut diag = Diagnostics::new();
	let (mut document, compression) = open_document(&args.file, &mut diag)?;

	let id = ObjectId(args.id);
	let object = document.get_mut(id).ok_or(PropError::ObjectNotFound { id })?;
	let type_name = object.type_name().to_owned();
	let mut prop = prop_by_name(&*object, &args.prop, None).ok_or_else(|| PropError::PropertyNotFound {
		type_name: type_name.clone(),
		name: args.prop.clone(),
	})?;
	let kind = prop.kind();

	let change = if kind == PropertyKind::Text {
		set_string_prop(object, &args.prop, &args.value, &mut diag)
	} else {
		parse_value(&mut prop, &args.value)?;
		Some(apply_props(object, &PropertyList::single(prop), &mut diag))
	};
	let before = change
		.as_ref()
		.and_then(|change| change.saved())
		.and_then(|saved| saved.find(&args.prop))
		.map(render_value)
		.unwrap_or_default();
	let after = prop_by_name(&*object, &args.prop, None).map(|prop| render_value(&prop)).unwrap_or_default();

	let output = args.output.unwrap_or_else(|| args.file.clone());
	let options = match compression {
		Compression::Zstd => DocumentOptions::compressed(),
		Compression::None => DocumentOptions::default(),
	};
	document.save(&output, &options, &mut diag)?;
	report(&mut diag);

	if args.json {
		emit_json(&SetJson {
			path: output.display().to_string(),
			id: args.id,
			type_name,
			prop: args.prop,
			kind: kind.to_string(),
			before,
			after,
		});
		return Ok(());
	}

	println!("path: {}", output.display());
	println!("object: {} ({type_name})", args.id);
	println!("prop: {} ({kind})", args.prop);
	println!("before: {before}");
	println!("after: {after}");
	Ok(())
}

#[derive(serde::Serialize)]
struct SetJson {
	path: String,
	id: u32,
	#[serde(rename = "type")]
	type_name: String,
	prop: String,
	kind: String,
	before: String,
	after: String,
}
