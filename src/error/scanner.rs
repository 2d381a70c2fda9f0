/// A lexical problem found by the scanner. Never fatal.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {type}")]
pub struct LexicalError {
	/// The line number where the error occurred.
	line:   usize,
	/// Index of the token the error concerns, if one was produced.
	token:  Option<usize>,
	/// The type of scanning error.
	r#type: LexicalErrorType,
}

impl LexicalError {
	pub fn new(line: usize, token: Option<usize>, r#type: LexicalErrorType) -> Self { Self { line, token, r#type } }

	pub fn line(&self) -> usize { self.line }

	pub fn token(&self) -> Option<usize> { self.token }

	pub fn r#type(&self) -> &LexicalErrorType { &self.r#type }
}

/// Types of scanning errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexicalErrorType {
	/// A character no token can start with.
	UnknownCharacter(char),
	/// Identifiers longer than eight characters are cut down.
	IdentifierTruncated { original: String, truncated: String },
	/// A character literal that is too long or never closed.
	MalformedCharLiteral(String),
}

impl std::fmt::Display for LexicalErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use LexicalErrorType::*;
		match self {
			UnknownCharacter(c) => {
				write!(f, "Unknown character '{c}'")
			}
			IdentifierTruncated { original, truncated } => {
				write!(f, "Identifier '{original}' was truncated to '{truncated}'")
			}
			MalformedCharLiteral(start) => {
				write!(f, "Character literal is too long or unterminated, starts with {start}")
			}
		}
	}
}
