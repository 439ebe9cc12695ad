use diaprops::props::{Result, registered_kinds, registration_closed};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	#[arg(long)]
	pub json: bool,
}

/// Print every registered property kind with its tag.
pub fn run(args: Args) -> Result<()> {
	let kinds = registered_kinds();
	let registration = if registration_closed() { "closed" } else { "open" };

	if args.json {
		emit_json(&KindsJson {
			registration,
			kinds: kinds
				.iter()
				.map(|(kind, name)| KindJson {
					tag: kind.tag().0,
					name: name.clone(),
					payload: kind.has_payload(),
				})
				.collect(),
		});
		return Ok(());
	}

	println!("registration: {registration}");
	println!("kinds: {}", kinds.len());
	println!("tag\tname\tpayload");
	for (kind, name) in &kinds {
		println!("{}\t{}\t{}", kind.tag().0, name, kind.has_payload());
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct KindsJson {
	registration: &'static str,
	kinds: Vec<KindJson>,
}

#[derive(serde::Serialize)]
struct KindJson {
	tag: u16,
	name: String,
	payload: bool,
}
