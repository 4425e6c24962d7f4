#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

const LOG_ENV: &str = "JSE_LOG";

#[derive(Parser)]
#[command(name = "jse", about = "JSE binary archive inspection tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Show header, checksum, and tree statistics.
	Info(cmd::info::Args),
	/// Print the archive tree.
	Dump(cmd::dump::Args),
	/// Decode fully and report whether the archive is valid.
	Verify(cmd::verify::Args),
	/// Build an archive from the tree JSON form.
	Pack(cmd::pack::Args),
}

fn main() {
	init_tracing();

	if let Err(err) = run() {
		eprintln!("error[{}]: {err}", err.kind().as_str());
		std::process::exit(1);
	}
}

fn run() -> jse::archive::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Dump(args) => cmd::dump::run(args),
		Commands::Verify(args) => cmd::verify::run(args),
		Commands::Pack(args) => cmd::pack::run(args),
	}
}

fn init_tracing() {
	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}
