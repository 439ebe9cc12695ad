#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "diaprops", about = "Diagram object property inspection tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// List registered property kinds.
	Kinds(cmd::kinds::Args),
	/// List the object types documents can hold.
	Types(cmd::types::Args),
	/// Print the descriptor table of one or more object types.
	Describe(cmd::describe::Args),
	/// Create a document of default-valued objects.
	New(cmd::new::Args),
	/// Print the persisted properties of a document's objects.
	Show(cmd::show::Args),
	/// Print the merged descriptor table of a document selection.
	Merge(cmd::merge::Args),
	/// Change one property of one object and save the document.
	Set(cmd::set::Args),
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> diaprops::props::Result<()> {
	let cli = Cli::parse();
	// Every kind the binary knows is built in; nothing registers after start-up.
	diaprops::props::close_registration();

	match cli.command {
		Commands::Kinds(args) => cmd::kinds::run(args),
		Commands::Types(args) => cmd::types::run(args),
		Commands::Describe(args) => cmd::describe::run(args),
		Commands::New(args) => cmd::new::run(args),
		Commands::Show(args) => cmd::show::run(args),
		Commands::Merge(args) => cmd::merge::run(args),
		Commands::Set(args) => cmd::set::run(args),
	}
}
