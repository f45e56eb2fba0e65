use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use kindgen::Report;
use tracing::{error, Level};

use crate::config::KindgenConfig;

mod config;
mod telemetry;

#[derive(Parser)]
#[command(name = "kindgen")]
#[command(about = "Generates support code for resource kinds", long_about = None)]
#[command(version)]
struct Cli {
	/// Log level, overrides RUST_LOG
	#[arg(long, global = true)]
	log_level: Option<Level>,

	#[command(flatten)]
	overrides: Overrides,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Write deep-copy, hash, encode and helper files next to the scanned types
	Objects {
		/// Directory holding the type declarations
		dir: PathBuf,
	},
	/// Write a typed client for the registries of a directory
	Client {
		/// Directory holding the registry declarations
		src: PathBuf,
		/// Directory the client file is written to
		out: PathBuf,
	},
}

#[derive(Args)]
struct Overrides {
	/// Config file to use instead of searching for .kindgen.yaml
	#[arg(long, global = true)]
	config: Option<PathBuf>,

	/// Path under which generated code reaches the runtime crate
	#[arg(long, global = true)]
	runtime_crate: Option<String>,

	/// Path from the generated client to the scanned types
	#[arg(long, global = true)]
	types_path: Option<String>,

	/// Do not run generated files through rustfmt
	#[arg(long, global = true)]
	no_format: bool,
}

impl Overrides {
	fn load(self, src: &std::path::Path) -> Result<kindgen::RenderOptions> {
		let file = match &self.config {
			Some(path) => KindgenConfig::load_from_file(path)?,
			None => KindgenConfig::load_from_directory(src)?.unwrap_or_default(),
		};
		let flags = KindgenConfig {
			runtime_crate: self.runtime_crate,
			types_path: self.types_path,
			format: self.no_format.then_some(false),
		};
		Ok(flags.merged_over(file).into_render_options())
	}
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	telemetry::init(cli.log_level);

	match run(cli) {
		Ok(report) if report.is_success() => ExitCode::SUCCESS,
		Ok(_) => ExitCode::FAILURE,
		Err(e) => {
			error!("{e:#}");
			ExitCode::FAILURE
		}
	}
}

fn run(cli: Cli) -> Result<Report> {
	let report = match cli.command {
		Commands::Objects { dir } => {
			let options = cli.overrides.load(&dir)?;
			kindgen::generate_objects(&dir, &options)?
		}
		Commands::Client { src, out } => {
			let options = cli.overrides.load(&src)?;
			kindgen::generate_client(&src, &out, &options)?
		}
	};
	for artifact in report.written() {
		println!("{}", artifact.path.display());
	}
	Ok(report)
}
