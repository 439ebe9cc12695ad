use diaprops::props::Result;

use crate::cmd::util::{catalog, emit_json};

#[derive(clap::Args)]
pub struct Args {
	#[arg(long)]
	pub json: bool,
}

/// Print the object types of the standard catalog.
pub fn run(args: Args) -> Result<()> {
	let catalog = catalog()?;
	let mut rows = Vec::new();
	for name in catalog.type_names() {
		let table = catalog.describe(name)?;
		rows.push(TypeJson {
			name: name.to_owned(),
			props: table.len(),
		});
	}

	if args.json {
		emit_json(&rows);
		return Ok(());
	}

	println!("types: {}", rows.len());
	println!("name\tprops");
	for row in &rows {
		println!("{}\t{}", row.name, row.props);
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct TypeJson {
	name: String,
	props: usize,
}
