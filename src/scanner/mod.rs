//! Turns source text into tokens.
//!
//! The scanner is a small finite-state machine walking the characters once,
//! left to right. From `Start` a letter opens an identifier, a digit opens a
//! number, a quote opens a character literal, and one of `+ - * / % = .` opens
//! an operator run that may grow into `+=`, `->`, `..` and friends. The
//! separators `{ } ( ) : ; ,` are complete the moment they are seen.
//!
//! When a run ends, the character that ended it has not been used yet, so the
//! machine goes back to `Start` and looks at the same character again. Every
//! such step either consumes the character or returns to `Start`, and `Start`
//! always consumes, so scanning terminates.
//!
//! Nothing here is fatal. Unknown characters, over-long identifiers and broken
//! character literals are recorded as lexical errors and scanning carries on,
//! so the analyzer always receives a complete token sequence.
mod token;

use std::{collections::HashMap, iter::Peekable, str::CharIndices};

pub use token::*;

use crate::error::scanner::{LexicalError, LexicalErrorType};

/// Identifiers are cut to this many characters.
const MAX_IDENTIFIER_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
	Start,
	Identifier,
	Number,
	OperatorRun,
	CharLiteral,
}

/// What the machine did with the character it was shown.
enum Step {
	Consume,
	Reprocess,
}

/// First-seen numbering, scoped to one scan.
#[derive(Default)]
struct Interner<'a> {
	indices: HashMap<&'a str, usize>,
}

impl<'a> Interner<'a> {
	fn intern(&mut self, text: &'a str) -> usize {
		let next = self.indices.len();
		*self.indices.entry(text).or_insert(next)
	}
}

/// A scanner for source code
pub struct Scanner<'a> {
	/// User input source code
	source:      &'a str,
	/// User input source code iterator
	source_iter: Peekable<CharIndices<'a>>,
	state:       State,
	/// Points at the beginning of the current lexeme
	start:       usize,
	/// Tracks what source line the next character is on
	line:        usize,
	tokens:      Vec<Token<'a>>,
	errors:      Vec<LexicalError>,
	identifiers: Interner<'a>,
	literals:    Interner<'a>,
}

impl<'a> Scanner<'a> {
	pub fn new(source: &'a str) -> Self {
		let source_iter = source.char_indices().peekable();

		Self {
			source,
			source_iter,
			state: State::Start,
			start: 0,
			line: 1,
			tokens: Vec::new(),
			errors: Vec::new(),
			identifiers: Interner::default(),
			literals: Interner::default(),
		}
	}

	/// Scan all tokens from the source code
	pub fn scan_tokens(mut self) -> (Vec<Token<'a>>, Vec<LexicalError>) {
		while let Some(&(index, c)) = self.source_iter.peek() {
			match self.step(index, c) {
				Step::Consume => {
					self.source_iter.next();
					if c == '\n' {
						self.line += 1;
					}
				}
				Step::Reprocess => {}
			}
		}
		self.finish(self.source.len());

		tracing::debug!(tokens = self.tokens.len(), errors = self.errors.len(), "scanned source");
		(self.tokens, self.errors)
	}

	fn step(&mut self, index: usize, c: char) -> Step {
		match self.state {
			State::Start => self.start_token(index, c),
			State::Identifier if c.is_ascii_alphanumeric() => Step::Consume,
			State::Identifier => {
				self.close_identifier(index);
				Step::Reprocess
			}
			State::Number if c.is_ascii_digit() => Step::Consume,
			State::Number => {
				self.close_number(index);
				Step::Reprocess
			}
			State::OperatorRun => self.operator_run(index, c),
			State::CharLiteral => self.char_literal(index, c),
		}
	}

	/// Close whatever run is still open when the text ends.
	fn finish(&mut self, end: usize) {
		match self.state {
			State::Start => {}
			State::Identifier => self.close_identifier(end),
			State::Number => self.close_number(end),
			State::OperatorRun => self.push_operator(self.start, end),
			State::CharLiteral => self.malformed_char_literal(end),
		}
		self.state = State::Start;
	}

	fn start_token(&mut self, index: usize, c: char) -> Step {
		self.start = index;
		match c {
			c if c.is_ascii_alphabetic() => self.state = State::Identifier,
			c if c.is_ascii_digit() => self.state = State::Number,
			'\'' => self.state = State::CharLiteral,
			c if c.is_whitespace() => {}
			c if TokenType::is_single_separator(c) => self.push_operator(index, index + c.len_utf8()),
			c if TokenType::opens_operator_run(c) => self.state = State::OperatorRun,
			c => self.errors.push(LexicalError::new(self.line, None, LexicalErrorType::UnknownCharacter(c))),
		}
		Step::Consume
	}

	fn close_identifier(&mut self, end: usize) {
		let mut text = &self.source[self.start..end];
		if text.len() > MAX_IDENTIFIER_LEN {
			let truncated = &text[..MAX_IDENTIFIER_LEN];
			self.errors.push(LexicalError::new(
				self.line,
				Some(self.tokens.len()),
				LexicalErrorType::IdentifierTruncated { original: text.to_string(), truncated: truncated.to_string() },
			));
			text = truncated;
		}
		let (r#type, tag) = match TokenType::keyword(text) {
			Some(keyword) => keyword,
			None => (TokenType::Identifier, self.identifiers.intern(text)),
		};
		self.tokens.push(Token::new(r#type, text, tag, self.line));
		self.state = State::Start;
	}

	fn close_number(&mut self, end: usize) {
		self.push_literal(TokenType::Number, end);
		self.state = State::Start;
	}

	/// The buffered character plus `c` either form a two-character operator or
	/// the buffered character stands alone.
	fn operator_run(&mut self, index: usize, c: char) -> Step {
		let pair_end = index + c.len_utf8();
		self.state = State::Start;
		if TokenType::is_two_char_operator(&self.source[self.start..pair_end]) {
			self.push_operator(self.start, pair_end);
			Step::Consume
		} else {
			self.push_operator(self.start, index);
			Step::Reprocess
		}
	}

	/// Accepts one raw character or a backslash pair before the closing quote.
	/// Whether the content is acceptable is left to the analyzer.
	fn char_literal(&mut self, index: usize, c: char) -> Step {
		let content = &self.source[self.start + 1..index];
		if content == "\\" {
			return Step::Consume;
		}
		if c == '\'' {
			self.push_literal(TokenType::Character, index + c.len_utf8());
			self.state = State::Start;
			return Step::Consume;
		}
		if content.is_empty() {
			return Step::Consume;
		}
		self.malformed_char_literal(index);
		Step::Reprocess
	}

	/// Report the open literal and close it where it stands.
	fn malformed_char_literal(&mut self, end: usize) {
		let lexeme = &self.source[self.start..end];
		self.errors.push(LexicalError::new(
			self.line,
			Some(self.tokens.len()),
			LexicalErrorType::MalformedCharLiteral(lexeme.to_string()),
		));
		self.push_literal(TokenType::Character, end);
		self.state = State::Start;
	}

	fn push_literal(&mut self, r#type: TokenType, end: usize) {
		let text = &self.source[self.start..end];
		let tag = self.literals.intern(text);
		self.tokens.push(Token::new(r#type, text, tag, self.line));
	}

	fn push_operator(&mut self, start: usize, end: usize) {
		let text = &self.source[start..end];
		if let Some((r#type, tag)) = TokenType::operator(text) {
			self.tokens.push(Token::new(r#type, text, tag, self.line));
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{TokenType::*, *};

	fn scan(input: &str) -> (Vec<Token<'_>>, Vec<LexicalError>) { Scanner::new(input).scan_tokens() }

	fn lexemes(input: &str) -> Vec<&str> { scan(input).0.into_iter().map(|t| t.lexeme).collect() }

	fn types(input: &str) -> Vec<TokenType> { scan(input).0.into_iter().map(|t| t.r#type).collect() }

	#[test]
	fn scan_empty_and_whitespace() {
		assert!(scan("").0.is_empty());
		assert!(scan(" \t\r\n  ").0.is_empty());
		assert!(scan(" \t\r\n  ").1.is_empty());
	}

	#[test]
	fn scan_separators() {
		let (tokens, errors) = scan("{}():;,");
		assert!(errors.is_empty());
		assert_eq!(tokens.iter().map(|t| t.tag).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5, 6]);
		assert!(tokens.iter().all(|t| t.kind() == TokenKind::Operator));
	}

	#[test]
	fn scan_operator_runs() {
		assert_eq!(lexemes("a+=1"), vec!["a", "+=", "1"]);
		assert_eq!(lexemes("a+ =1"), vec!["a", "+", "=", "1"]);
		assert_eq!(lexemes("1 -> x"), vec!["1", "->", "x"]);
		assert_eq!(lexemes("in 1..5"), vec!["in", "1", "..", "5"]);
		assert_eq!(lexemes("=-"), vec!["=", "-"]);
		assert_eq!(lexemes("-5"), vec!["-", "5"]);
		assert_eq!(types("%=/=*=-=..."), vec![PercentEqual, SlashEqual, StarEqual, MinusEqual, DotDot, Dot]);
	}

	#[test]
	fn scan_operator_tags() {
		let (tokens, _) = scan("+ = += -> ..");
		assert_eq!(tokens.iter().map(|t| t.tag).collect::<Vec<_>>(), vec![7, 12, 14, 19, 20]);
	}

	#[test]
	fn scan_keywords() {
		let (tokens, errors) = scan("fun main var val Int Char in else when");
		assert!(errors.is_empty());
		assert!(tokens.iter().all(|t| t.kind() == TokenKind::Keyword));
		assert_eq!(tokens.iter().map(|t| t.tag).collect::<Vec<_>>(), (0..9).collect::<Vec<_>>());
		assert_eq!(types("int char"), vec![Identifier, Identifier]);
	}

	#[test]
	fn scan_identifier_tags_are_first_seen() {
		let (tokens, _) = scan("alpha beta alpha gamma");
		assert_eq!(tokens.iter().map(|t| t.tag).collect::<Vec<_>>(), vec![0, 1, 0, 2]);
		let (tokens, _) = scan("1 x 2 1 'a'");
		assert_eq!(tokens.iter().map(|t| t.tag).collect::<Vec<_>>(), vec![0, 0, 1, 0, 2]);
	}

	#[test]
	fn scan_identifier_truncation() {
		let (tokens, errors) = scan("abcdefghij = 1;");
		assert_eq!(tokens[0].lexeme, "abcdefgh");
		assert_eq!(errors.len(), 1);
		assert_eq!(errors[0].token(), Some(0));
		assert!(matches!(
			errors[0].r#type(),
			LexicalErrorType::IdentifierTruncated { original, truncated }
				if original == "abcdefghij" && truncated == "abcdefgh"
		));

		let (tokens, errors) = scan("abcdefgh");
		assert_eq!(tokens[0].lexeme, "abcdefgh");
		assert!(errors.is_empty());
	}

	#[test]
	fn scan_char_literals() {
		let (tokens, errors) = scan("'a'");
		assert!(errors.is_empty());
		assert_eq!(tokens[0].r#type, Character);
		assert_eq!(tokens[0].lexeme, "'a'");

		assert_eq!(lexemes(r"'\n' '\''"), vec![r"'\n'", r"'\''"]);
		assert_eq!(lexemes("' '"), vec!["' '"]);

		let (tokens, errors) = scan("''");
		assert!(errors.is_empty());
		assert_eq!(tokens[0].lexeme, "''");
	}

	#[test]
	fn scan_malformed_char_literals() {
		let (tokens, errors) = scan("'ab'");
		assert_eq!(tokens.iter().map(|t| t.lexeme).collect::<Vec<_>>(), vec!["'a", "b", "'"]);
		assert_eq!(errors.len(), 2);
		assert!(matches!(errors[0].r#type(), LexicalErrorType::MalformedCharLiteral(s) if s == "'a"));

		let (tokens, errors) = scan("x = 'a");
		assert_eq!(tokens.last().map(|t| t.lexeme), Some("'a"));
		assert_eq!(errors.len(), 1);
	}

	#[test]
	fn scan_unknown_characters() {
		let (tokens, errors) = scan("a @ b");
		assert_eq!(tokens.len(), 2);
		assert_eq!(errors.len(), 1);
		assert_eq!(errors[0].r#type(), &LexicalErrorType::UnknownCharacter('@'));
		assert_eq!(errors[0].token(), None);

		assert_eq!(lexemes("_x"), vec!["x"]);
		assert_eq!(scan("你好").1.len(), 2);
	}

	#[test]
	fn scan_flushes_at_end_of_input() {
		assert_eq!(lexemes("abc"), vec!["abc"]);
		assert_eq!(lexemes("12"), vec!["12"]);
		assert_eq!(lexemes("+"), vec!["+"]);
		assert_eq!(lexemes("x}"), vec!["x", "}"]);
	}

	#[test]
	fn scan_tracks_lines() {
		let (tokens, errors) = scan("a\nb\n\n@");
		assert_eq!(tokens[1].line, 2);
		assert_eq!(errors[0].line(), 4);
	}

	#[test]
	fn scan_program() {
		let source = "fun main() {\n  var x: Int = 10;\n  x += 2 * (x - 1);\n}";
		let (tokens, errors) = scan(source);
		assert!(errors.is_empty());
		assert_eq!(tokens.len(), 23);
		assert_eq!(tokens[0].to_string(), "(Keyword, 0)");
		assert_eq!(tokens[5].r#type, Var);
		assert_eq!(tokens[6].to_string(), "(Identifier, 0)");
	}
}
