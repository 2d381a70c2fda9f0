use std::{
	fs::read_to_string,
	io::{self, BufRead, Write},
	path::Path,
};

use crate::{
	WhencError,
	diagnostic::{Category, Diagnostic, Diagnostics},
	ir::{Block, render_program},
	parser::Parser,
	scanner::{Scanner, Token},
};

/// Everything one run produces. Present even when the parse stopped early.
#[derive(Debug)]
pub struct Analysis<'a> {
	pub tokens:      Vec<Token<'a>>,
	pub diagnostics: Diagnostics,
	pub blocks:      Vec<Block>,
}

impl Analysis<'_> {
	pub fn render_ir(&self) -> String { render_program(&self.blocks) }

	/// `(lexeme, "(kind, tag)", index)` for each token, in order.
	pub fn token_rows(&self) -> Vec<(&str, String, usize)> {
		self.tokens.iter().enumerate().map(|(index, token)| (token.lexeme, token.to_string(), index)).collect()
	}

	/// No diagnostics in any category.
	pub fn is_success(&self) -> bool { self.diagnostics.is_empty() }
}

/// Scan and analyze `source` with fresh state. `Err` only when the analyzer
/// breaks one of its own invariants; user errors are in the diagnostics.
#[tracing::instrument(skip_all, fields(bytes = source.len()))]
pub fn analyze(source: &str) -> Result<Analysis<'_>, WhencError> {
	let (tokens, lexical) = Scanner::new(source).scan_tokens();
	let (blocks, reported) = Parser::new(&tokens).parse()?;
	let diagnostics = Diagnostics::new(lexical.into_iter().map(Diagnostic::from).chain(reported).collect());
	tracing::info!(tokens = tokens.len(), blocks = blocks.len(), diagnostics = diagnostics.len(), "analysis finished");
	Ok(Analysis { tokens, diagnostics, blocks })
}

/// What the report shows besides the diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
	pub show_tokens: bool,
	pub show_ir:     bool,
}

impl Default for Options {
	fn default() -> Self { Self { show_tokens: false, show_ir: true } }
}

/// Whenc drives analysis from files or an interactive prompt.
#[derive(Debug, Default)]
pub struct Whenc {
	options: Options,
}

impl Whenc {
	pub fn new(options: Options) -> Self { Self { options } }

	/// Analyze a source file and print the report.
	pub fn run_file<P: AsRef<Path>>(&self, path: P) -> Result<(), WhencError> {
		let source = read_to_string(path)?;
		self.run(&source)
	}

	/// Run the REPL prompt. Lines are collected until an empty one, then the
	/// collected text is analyzed as one program.
	pub fn run_prompt(&self) {
		let mut source = String::new();
		let mut input = String::new();
		let stdin = io::stdin();
		let mut handle = stdin.lock();
		loop {
			input.clear();
			print!("{}", if source.is_empty() { "> " } else { ". " });
			if let Err(e) = io::stdout().flush() {
				eprintln!("Failed flush: {e}");
			}
			match handle.read_line(&mut input) {
				Ok(0) => {
					println!("\nExited whenc repl");
					break;
				}
				Ok(_) => {}
				Err(e) => {
					eprintln!("Failed read line: {e}");
					continue;
				}
			}
			if !input.trim().is_empty() {
				source.push_str(&input);
				continue;
			}
			if source.is_empty() {
				continue;
			}
			if let Err(e) = self.run(&source) {
				eprintln!("Failed run prompt: {e}");
			}
			source.clear();
		}
	}

	/// Write the report for `analysis`: tokens if asked, the diagnostics
	/// grouped by category (or a success line), then the IR if asked.
	pub fn write_report(&self, analysis: &Analysis<'_>, out: &mut impl Write) -> io::Result<()> {
		if self.options.show_tokens {
			writeln!(out, "Tokens:")?;
			for (lexeme, form, index) in analysis.token_rows() {
				writeln!(out, "{index:>5}  {lexeme:<10} {form}")?;
			}
		}

		if analysis.is_success() {
			writeln!(out, "No errors found.")?;
		} else {
			for category in [Category::Lexical, Category::Syntactic, Category::Semantic] {
				let messages = analysis.diagnostics.messages(category);
				if messages.is_empty() {
					continue;
				}
				writeln!(out, "{category} errors ({}):", messages.len())?;
				for message in messages {
					writeln!(out, "  {message}")?;
				}
			}
		}

		if self.options.show_ir {
			writeln!(out, "IR:")?;
			write!(out, "{}", analysis.render_ir())?;
		}
		Ok(())
	}
}

impl Whenc {
	fn run(&self, source: &str) -> Result<(), WhencError> {
		let analysis = analyze(source)?;
		self.write_report(&analysis, &mut io::stdout().lock())?;
		if analysis.is_success() { Ok(()) } else { Err(WhencError::Diagnostics(analysis.diagnostics.len())) }
	}
}
