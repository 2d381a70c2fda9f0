pub mod parser;
pub mod scanner;
pub mod semantic;

/// WhencError is the top-level error type for the front end driver.
#[derive(thiserror::Error, Debug)]
pub enum WhencError {
	/// Internal compiler error, should never happen
	#[error("CompilerInternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	/// The source text could not be loaded
	#[error("Failed read source: {0}")]
	Io(#[from] std::io::Error),
	/// The analysis finished but reported problems
	#[error("Analysis reported {0} diagnostics")]
	Diagnostics(usize),
}
