#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "plistcoder", about = "Property-list value tree inspection and store tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print a JSON document as a value tree.
	Show(cmd::show::Args),
	/// Decode one value of a document as a typed primitive.
	Decode(cmd::decode::Args),
	/// Print one store entry.
	Get(cmd::store::GetArgs),
	/// Write one store entry from a JSON literal.
	Set(cmd::store::SetArgs),
	/// Remove one store entry.
	Delete(cmd::store::DeleteArgs),
	/// List store keys.
	Keys(cmd::store::KeysArgs),
}

fn main() {
	init_tracing();
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing() {
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	let _ = tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.try_init();
}

fn run() -> cmd::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Show(args) => cmd::show::run(args),
		Commands::Decode(args) => cmd::decode::run(args),
		Commands::Get(args) => cmd::store::get(args),
		Commands::Set(args) => cmd::store::set(args),
		Commands::Delete(args) => cmd::store::delete(args),
		Commands::Keys(args) => cmd::store::keys(args),
	}
}
