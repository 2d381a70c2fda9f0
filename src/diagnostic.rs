//! Every problem a run reports, grouped by the phase that found it.

use std::fmt;

use crate::error::{parser::SyntaxError, scanner::LexicalError, semantic::SemanticError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
	Lexical,
	Syntactic,
	Semantic,
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Category::Lexical => write!(f, "Lexical"),
			Category::Syntactic => write!(f, "Syntactic"),
			Category::Semantic => write!(f, "Semantic"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
	Lexical(LexicalError),
	Syntactic(SyntaxError),
	Semantic(SemanticError),
}

impl Diagnostic {
	pub fn category(&self) -> Category {
		match self {
			Diagnostic::Lexical(_) => Category::Lexical,
			Diagnostic::Syntactic(_) => Category::Syntactic,
			Diagnostic::Semantic(_) => Category::Semantic,
		}
	}

	/// Token index the diagnostic points at, when it has one.
	pub fn position(&self) -> Option<usize> {
		match self {
			Diagnostic::Lexical(error) => error.token(),
			Diagnostic::Syntactic(error) => error.position(),
			Diagnostic::Semantic(error) => Some(error.position()),
		}
	}
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Diagnostic::Lexical(error) => write!(f, "{error}"),
			Diagnostic::Syntactic(error) => write!(f, "{error}"),
			Diagnostic::Semantic(error) => write!(f, "{error}"),
		}
	}
}

impl From<LexicalError> for Diagnostic {
	fn from(error: LexicalError) -> Self { Diagnostic::Lexical(error) }
}

impl From<SyntaxError> for Diagnostic {
	fn from(error: SyntaxError) -> Self { Diagnostic::Syntactic(error) }
}

impl From<SemanticError> for Diagnostic {
	fn from(error: SemanticError) -> Self { Diagnostic::Semantic(error) }
}

/// Append-only list in emission order: lexical first, then whatever the
/// analyzer reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
	entries: Vec<Diagnostic>,
}

impl Diagnostics {
	pub fn new(entries: Vec<Diagnostic>) -> Self { Self { entries } }

	pub fn lexical(&self) -> impl Iterator<Item = &LexicalError> {
		self.entries.iter().filter_map(|d| match d {
			Diagnostic::Lexical(error) => Some(error),
			_ => None,
		})
	}

	pub fn syntactic(&self) -> impl Iterator<Item = &SyntaxError> {
		self.entries.iter().filter_map(|d| match d {
			Diagnostic::Syntactic(error) => Some(error),
			_ => None,
		})
	}

	pub fn semantic(&self) -> impl Iterator<Item = &SemanticError> {
		self.entries.iter().filter_map(|d| match d {
			Diagnostic::Semantic(error) => Some(error),
			_ => None,
		})
	}

	/// Display strings of one group, in order.
	pub fn messages(&self, category: Category) -> Vec<String> {
		self.entries.iter().filter(|d| d.category() == category).map(ToString::to_string).collect()
	}

	pub fn len(&self) -> usize { self.entries.len() }

	pub fn is_empty(&self) -> bool { self.entries.is_empty() }

	pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> { self.entries.iter() }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::{scanner::LexicalErrorType, semantic::SemanticErrorType};

	#[test]
	fn groups_keep_order() {
		let diagnostics = Diagnostics::new(vec![
			LexicalError::new(1, None, LexicalErrorType::UnknownCharacter('#')).into(),
			SemanticError::new(4, SemanticErrorType::UndeclaredIdentifier("y".into())).into(),
			SemanticError::new(9, SemanticErrorType::AssignmentToConstant("x".into())).into(),
			SyntaxError::end_of_input("statement").into(),
		]);
		assert_eq!(diagnostics.len(), 4);
		assert_eq!(diagnostics.lexical().count(), 1);
		assert_eq!(diagnostics.syntactic().count(), 1);
		let codes: Vec<_> = diagnostics.semantic().map(SemanticError::code).collect();
		assert_eq!(codes, ["UndeclaredIdentifier", "AssignmentToConstant"]);
		assert_eq!(diagnostics.messages(Category::Lexical), ["line 1: Unknown character '#'"]);
		assert_eq!(diagnostics.messages(Category::Syntactic), ["unexpected end of input in 'statement'"]);
		let positions: Vec<_> = diagnostics.iter().map(Diagnostic::position).collect();
		assert_eq!(positions, [None, Some(4), Some(9), None]);
	}

	#[test]
	fn empty_is_success() {
		let diagnostics = Diagnostics::default();
		assert!(diagnostics.is_empty());
		assert!(diagnostics.messages(Category::Semantic).is_empty());
	}
}
