use diaprops::props::{DescriptorTable, MergeOption, PropFilter, Result, merge};

use crate::cmd::util::{DescriptorJson, catalog, descriptor_rows, emit_json, parse_filter, parse_merge, print_descriptor_rows};

#[derive(clap::Args)]
pub struct Args {
	/// Object type names; several are merged.
	#[arg(required = true)]
	pub types: Vec<String>,
	#[arg(long, value_parser = parse_merge, default_value = "intersection")]
	pub merge: MergeOption,
	#[arg(long, value_parser = parse_filter, default_value = "all")]
	pub filter: PropFilter,
	#[arg(long)]
	pub json: bool,
}

/// Print the descriptor table of one type, or the merge of several.
pub fn run(args: Args) -> Result<()> {
	let catalog = catalog()?;
	let tables = args.types.iter().map(|name| catalog.describe(name)).collect::<Result<Vec<_>>>()?;
	let option = if tables.len() == 1 { MergeOption::Intersection } else { args.merge };
	let table: DescriptorTable = merge(tables.iter().map(|table| table.as_ref()), option);
	let rows = descriptor_rows(&table, args.filter);

	if args.json {
		emit_json(&DescribeJson {
			type_name: table.type_name().to_owned(),
			merge: option.as_str().to_owned(),
			filter: args.filter.as_str().to_owned(),
			props: rows,
		});
		return Ok(());
	}

	print_descriptor_rows(table.type_name(), &rows);
	Ok(())
}

#[derive(serde::Serialize)]
struct DescribeJson {
	#[serde(rename = "type")]
	type_name: String,
	merge: String,
	filter: String,
	props: Vec<DescriptorJson>,
}

#[cfg(test)]
mod tests;
