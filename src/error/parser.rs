use crate::scanner::Token;

/// How an analyzer rule failed. Either variant stops the parse.
#[derive(thiserror::Error, Debug)]
pub enum ParserError {
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	#[error(transparent)]
	SyntaxError(#[from] SyntaxError),
}

/// The first structural mismatch of a parse.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
	position: Option<usize>,
	r#type:   SyntaxErrorType,
}

impl SyntaxError {
	/// `token` was found at `position` where `code` describes what the rule wanted.
	pub fn unexpected(position: usize, code: SyntaxErrorCode, token: &Token) -> Self {
		let found = format!("'{}' ({})", token.lexeme, token.kind());
		Self { position: Some(position), r#type: SyntaxErrorType::Unexpected { code, found } }
	}

	/// The token sequence ran out while `rule` was being recognized.
	pub fn end_of_input(rule: &'static str) -> Self {
		Self { position: None, r#type: SyntaxErrorType::UnexpectedEndOfInput { rule } }
	}

	pub fn position(&self) -> Option<usize> { self.position }

	pub fn r#type(&self) -> &SyntaxErrorType { &self.r#type }

	pub fn code(&self) -> Option<SyntaxErrorCode> {
		match self.r#type {
			SyntaxErrorType::Unexpected { code, .. } => Some(code),
			SyntaxErrorType::UnexpectedEndOfInput { .. } => None,
		}
	}
}

impl std::fmt::Display for SyntaxError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match (&self.r#type, self.position) {
			(SyntaxErrorType::Unexpected { code, found }, Some(position)) => {
				write!(f, "token #{position}: {code}, found {found}")
			}
			(SyntaxErrorType::Unexpected { code, found }, None) => write!(f, "{code}, found {found}"),
			(SyntaxErrorType::UnexpectedEndOfInput { rule }, _) => write!(f, "unexpected end of input in '{rule}'"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorType {
	Unexpected { code: SyntaxErrorCode, found: String },
	UnexpectedEndOfInput { rule: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorCode {
	ExpectedFun,
	ExpectedMain,
	ExpectedOpenParenthesis,
	ExpectedCloseParenthesis,
	ExpectedOpenBrace,
	ExpectedCloseBrace,
	ExpectedComma,
	ExpectedSemicolon,
	ExpectedArrow,
	ExpectedDoubleDot,
	ExpectedElse,
	ExpectedIdentifier,
	ExpectedIntOrChar,
	ExpectedLiteral,
	/// A when condition must be a literal or an `in` range.
	ExpectedValue,
	InvalidExpression,
	InvalidStatement,
	InvalidOperator,
	/// Something follows the closing brace of `main`.
	UnexpectedTrailingToken,
}

impl std::fmt::Display for SyntaxErrorCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use SyntaxErrorCode::*;
		match self {
			ExpectedFun => write!(f, "expected 'fun'"),
			ExpectedMain => write!(f, "expected 'main'"),
			ExpectedOpenParenthesis => write!(f, "expected '('"),
			ExpectedCloseParenthesis => write!(f, "expected ')'"),
			ExpectedOpenBrace => write!(f, "expected '{{'"),
			ExpectedCloseBrace => write!(f, "expected '}}'"),
			ExpectedComma => write!(f, "expected ','"),
			ExpectedSemicolon => write!(f, "expected ';'"),
			ExpectedArrow => write!(f, "expected '->'"),
			ExpectedDoubleDot => write!(f, "expected '..'"),
			ExpectedElse => write!(f, "expected 'else' arm"),
			ExpectedIdentifier => write!(f, "expected identifier"),
			ExpectedIntOrChar => write!(f, "expected 'Int' or 'Char'"),
			ExpectedLiteral => write!(f, "expected literal"),
			ExpectedValue => write!(f, "expected literal or 'in' range"),
			InvalidExpression => write!(f, "expected operand"),
			InvalidStatement => write!(f, "expected statement"),
			InvalidOperator => write!(f, "expected assignment operator"),
			UnexpectedTrailingToken => write!(f, "expected end of input"),
		}
	}
}
