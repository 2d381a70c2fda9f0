use std::path::PathBuf;

use palc::{Parser, Subcommand};

use crate::Options;

#[derive(Parser)]
#[command(
	name = "whenc",
	after_long_help = "Front end for a small typed language: scans, checks and prints the IR of `fun main() { ... }`.\nSet RUST_LOG=debug to trace the phases on stderr."
)]
pub struct Cli {
	/// Print the token table before the diagnostics
	#[arg(long)]
	pub tokens: bool,
	/// Do not print the rendered IR
	#[arg(long)]
	pub no_ir:  bool,
	#[command(subcommand)]
	pub mode:   Mode,
}

impl Cli {
	pub fn options(&self) -> Options { Options { show_tokens: self.tokens, show_ir: !self.no_ir } }
}

#[derive(Subcommand, Debug)]
pub enum Mode {
	/// Input file
	File { path: PathBuf },
	/// Input prompt, a blank line ends each program
	Repl,
}
