use std::process::ExitCode;

use palc::Parser;
use tracing_subscriber::EnvFilter;
use whenc::{Whenc, cli::*};

fn main() -> ExitCode {
	tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();

	let cli = Cli::parse();
	let whenc = Whenc::new(cli.options());

	match cli.mode {
		Mode::File { path } => match whenc.run_file(&path) {
			Ok(()) => ExitCode::SUCCESS,
			Err(e) => {
				eprintln!("Failed run file: {e}");
				ExitCode::FAILURE
			}
		},
		Mode::Repl => {
			whenc.run_prompt();
			ExitCode::SUCCESS
		}
	}
}
