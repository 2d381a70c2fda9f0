use std::fmt;

use TokenType::*;

/// Reserved words, in table order. A keyword token's tag is its index here.
const KEYWORDS: [(&str, TokenType); 9] = [
	("fun", Fun),
	("main", Main),
	("var", Var),
	("val", Val),
	("Int", Int),
	("Char", Char),
	("in", In),
	("else", Else),
	("when", When),
];

/// Separators and operators share one table: complete single-character
/// separators first, then the characters that may open a two-character
/// operator, then the two-character operators themselves.
const OPERATORS: [(&str, TokenType); 21] = [
	("{", LeftBrace),
	("}", RightBrace),
	("(", LeftParen),
	(")", RightParen),
	(":", Colon),
	(";", Semicolon),
	(",", Comma),
	("+", Plus),
	("-", Minus),
	("*", Star),
	("/", Slash),
	("%", Percent),
	("=", Equal),
	(".", Dot),
	("+=", PlusEqual),
	("-=", MinusEqual),
	("*=", StarEqual),
	("/=", SlashEqual),
	("%=", PercentEqual),
	("->", Arrow),
	("..", DotDot),
];

/// Broad classification shown next to each token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
	Keyword,
	Identifier,
	Literal,
	Operator,
}

impl fmt::Display for TokenKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TokenKind::Keyword => write!(f, "Keyword"),
			TokenKind::Identifier => write!(f, "Identifier"),
			TokenKind::Literal => write!(f, "Literal"),
			TokenKind::Operator => write!(f, "Operator"),
		}
	}
}

/// A token produced by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
	pub r#type: TokenType,
	pub lexeme: &'a str,
	/// Fixed table index for keywords and operators, first-seen index for
	/// identifiers and literals.
	pub tag:    usize,
	pub line:   usize,
}

impl<'a> Token<'a> {
	pub fn new(r#type: TokenType, lexeme: &'a str, tag: usize, line: usize) -> Self {
		Self { r#type, lexeme, tag, line }
	}

	pub fn kind(&self) -> TokenKind { self.r#type.kind() }

	/// `'x'` → `x`, `'\n'` → `\n`; `None` unless the lexeme is a quote, one raw
	/// character or a backslash pair, and a closing quote.
	pub fn char_literal_content(&self) -> Option<&'a str> {
		let inner = self.lexeme.strip_prefix('\'')?.strip_suffix('\'')?;
		let mut chars = inner.chars();
		match (chars.next(), chars.next(), chars.next()) {
			(Some(_), None, None) => Some(inner),
			(Some('\\'), Some(_), None) => Some(inner),
			_ => None,
		}
	}
}

impl fmt::Display for Token<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "({}, {})", self.kind(), self.tag) }
}

/// The different types of tokens, The copying is lightweight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
	/// `fun` keyword.
	Fun,
	/// `main`, the only function name.
	Main,
	/// Mutable declaration keyword.
	Var,
	/// Constant declaration keyword.
	Val,
	/// `Int` type name.
	Int,
	/// `Char` type name.
	Char,
	/// `in`, opens a range condition.
	In,
	/// Else arm of a when expression.
	Else,
	/// When keyword.
	When,
	/// Left brace `{`.
	LeftBrace,
	/// Right brace `}`.
	RightBrace,
	/// Left parenthesis `(`.
	LeftParen,
	/// Right parenthesis `)`.
	RightParen,
	/// Colon `:`.
	Colon,
	/// Semicolon `;`.
	Semicolon,
	/// Comma `,`.
	Comma,
	/// Plus `+`.
	Plus,
	/// Minus `-`.
	Minus,
	/// Asterisk `*`.
	Star,
	/// Slash `/`.
	Slash,
	/// Percent `%`.
	Percent,
	/// Equal `=`.
	Equal,
	/// Dot `.`, only meaningful as half of `..`.
	Dot,
	PlusEqual,
	MinusEqual,
	StarEqual,
	SlashEqual,
	PercentEqual,
	/// Arrow `->`.
	Arrow,
	/// Range `..`.
	DotDot,
	/// Identifier, e.g. variable name.
	Identifier,
	/// Number literal, e.g. `42`.
	Number,
	/// Character literal, e.g. `'a'`.
	Character,
}

impl TokenType {
	pub fn kind(&self) -> TokenKind {
		match self {
			Fun | Main | Var | Val | Int | Char | In | Else | When => TokenKind::Keyword,
			Identifier => TokenKind::Identifier,
			Number | Character => TokenKind::Literal,
			_ => TokenKind::Operator,
		}
	}

	/// Look up a reserved word, returning its type and table index.
	pub fn keyword(text: &str) -> Option<(Self, usize)> {
		KEYWORDS.iter().position(|(word, _)| *word == text).map(|index| (KEYWORDS[index].1, index))
	}

	/// Look up a separator or operator, returning its type and table index.
	pub fn operator(text: &str) -> Option<(Self, usize)> {
		OPERATORS.iter().position(|(symbol, _)| *symbol == text).map(|index| (OPERATORS[index].1, index))
	}

	/// `{ } ( ) : ; ,` are complete as soon as they are seen.
	pub fn is_single_separator(c: char) -> bool { matches!(c, '{' | '}' | '(' | ')' | ':' | ';' | ',') }

	/// Characters that may be the first half of a two-character operator.
	pub fn opens_operator_run(c: char) -> bool { matches!(c, '+' | '-' | '*' | '/' | '%' | '=' | '.') }

	pub fn is_two_char_operator(text: &str) -> bool {
		matches!(text, "+=" | "-=" | "*=" | "/=" | "%=" | "->" | "..")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keyword_tags_follow_table_order() {
		assert_eq!(TokenType::keyword("fun"), Some((Fun, 0)));
		assert_eq!(TokenType::keyword("main"), Some((Main, 1)));
		assert_eq!(TokenType::keyword("when"), Some((When, 8)));
		assert_eq!(TokenType::keyword("While"), None);
	}

	#[test]
	fn operator_tags_follow_table_order() {
		assert_eq!(TokenType::operator("{"), Some((LeftBrace, 0)));
		assert_eq!(TokenType::operator(";"), Some((Semicolon, 5)));
		assert_eq!(TokenType::operator("+"), Some((Plus, 7)));
		assert_eq!(TokenType::operator("="), Some((Equal, 12)));
		assert_eq!(TokenType::operator("+="), Some((PlusEqual, 14)));
		assert_eq!(TokenType::operator("->"), Some((Arrow, 19)));
		assert_eq!(TokenType::operator(".."), Some((DotDot, 20)));
	}

	#[test]
	fn char_literal_content() {
		let token = |lexeme| Token::new(Character, lexeme, 0, 1);
		assert_eq!(token("'a'").char_literal_content(), Some("a"));
		assert_eq!(token(r"'\n'").char_literal_content(), Some(r"\n"));
		assert_eq!(token("''").char_literal_content(), None);
		assert_eq!(token("'a").char_literal_content(), None);
		assert_eq!(token("'ab'").char_literal_content(), None);
	}
}
