//! The `Analyzer` walks the token sequence once with a forward-only cursor,
//! recognizing the grammar, checking types and scopes, and emitting IR blocks
//! as each construct completes.
//!
//! Syntax and semantics fail differently. The first structural mismatch stops
//! the whole parse: the rule returns a [`SyntaxError`] and every enclosing
//! rule unwinds. Semantic problems are only recorded; analysis carries on with
//! `Unknown` standing in for any type that could not be worked out.
//!
//! |Name|Operators|Associates
//! --|--|--
//! Term|+ -|Left
//! Factor|* / %|Left
//!
//! Grammar:
//!
//! ``` BNF
//! program        → "fun" "main" "(" ")" block ;
//! block          → "{" statement* "}" ;
//! statement      → declaration | assignment | whenStatement ;
//! declaration    → ( "var" | "val" ) IDENTIFIER ( ":" type )? ( "=" initializer )? ";" ;
//! type           → "Int" | "Char" ;
//! initializer    → whenExpression | expression ;
//! assignment     → IDENTIFIER ( "=" | "+=" | "-=" | "*=" | "/=" | "%=" ) expression ";" ;
//! whenStatement  → "when" "(" expression ")" "{" ( values "->" ( block ";"? | statement ) )+ "}" ;
//! whenExpression → "when" "(" expression ")" "{" ( values "->" atom ";" )+ "else" "->" atom ";" "}" ;
//! values         → value ( "," value )* ;
//! value          → LITERAL | "in" LITERAL ".." LITERAL ;
//! expression     → term ( ( "+" | "-" ) term )* ;
//! term           → atom ( ( "*" | "/" | "%" ) atom )* ;
//! atom           → IDENTIFIER | LITERAL | "(" expression ")" ;
//! ```

mod expression;
mod when;

use TokenType::*;

use crate::{
	diagnostic::Diagnostic,
	environment::{Environment, SymbolEntry},
	error::{
		parser::{ParserError, SyntaxError, SyntaxErrorCode},
		semantic::{SemanticError, SemanticErrorType},
	},
	ir::{BinaryOperator, Block, DeclarationNature, Node, Type},
	parser::expression::Pending,
	scanner::{Token, TokenType},
};

/// Name of the only function a program has.
const ENTRY_POINT: &str = "main";

/// Analyzer state for one run. Nothing outlives [`Parser::parse`].
pub struct Parser<'a> {
	tokens:       &'a [Token<'a>],
	/// Index of the next token to look at.
	current:      usize,
	environment:  Environment<'a>,
	operands:     Vec<Block>,
	operators:    Vec<Pending>,
	/// Finished blocks, in emission order.
	blocks:       Vec<Block>,
	diagnostics:  Vec<Diagnostic>,
	temp_counter: usize,
	depth:        usize,
}

impl<'a> Parser<'a> {
	pub fn new(tokens: &'a [Token<'a>]) -> Self {
		Self {
			tokens,
			current: 0,
			environment: Environment::new(),
			operands: Vec::new(),
			operators: Vec::new(),
			blocks: Vec::new(),
			diagnostics: Vec::new(),
			temp_counter: 0,
			depth: 0,
		}
	}

	/// Analyze the whole token sequence. A syntax error ends the run and joins
	/// the diagnostics; the blocks built so far are still returned. `Err` only
	/// for a broken analyzer invariant.
	pub fn parse(mut self) -> anyhow::Result<(Vec<Block>, Vec<Diagnostic>)> {
		tracing::debug!(tokens = self.tokens.len(), "analysis started");
		match self.program() {
			Ok(()) => {}
			Err(ParserError::SyntaxError(error)) => {
				tracing::debug!(%error, blocks = self.blocks.len(), "analysis stopped");
				self.diagnostics.push(error.into());
			}
			Err(ParserError::InternalError(error)) => return Err(error),
		}
		if self.environment.depth() != 0 {
			anyhow::bail!("{} scopes still open after analysis", self.environment.depth());
		}
		Ok((self.blocks, self.diagnostics))
	}

	fn program(&mut self) -> Result<(), ParserError> {
		self.expect(Fun, SyntaxErrorCode::ExpectedFun, "program")?;
		self.expect(Main, SyntaxErrorCode::ExpectedMain, "program")?;
		self.expect(LeftParen, SyntaxErrorCode::ExpectedOpenParenthesis, "program")?;
		self.expect(RightParen, SyntaxErrorCode::ExpectedCloseParenthesis, "program")?;
		self.emit(Node::ProgramStart { function: ENTRY_POINT.into() });
		self.block("program")?;
		self.emit(Node::ProgramEnd { function: ENTRY_POINT.into() });

		if let Some(token) = self.tokens.get(self.current) {
			return Err(self.unexpected(SyntaxErrorCode::UnexpectedTrailingToken, token));
		}
		Ok(())
	}

	/// `{ statement* }` in a scope of its own.
	fn block(&mut self, rule: &'static str) -> Result<(), ParserError> {
		self.expect(LeftBrace, SyntaxErrorCode::ExpectedOpenBrace, rule)?;
		self.scoped(|parser| {
			parser.statement_list()?;
			parser.expect(RightBrace, SyntaxErrorCode::ExpectedCloseBrace, "block")?;
			Ok(())
		})
	}

	/// Run `rule` inside a fresh scope. The environment scope is always
	/// popped; `ScopeEnd` is only emitted when the rule succeeded.
	fn scoped<T>(&mut self, rule: impl FnOnce(&mut Self) -> Result<T, ParserError>) -> Result<T, ParserError> {
		self.environment.push_scope();
		self.emit(Node::ScopeStart);
		self.depth += 1;

		let result = rule(self);

		self.depth -= 1;
		self.environment.pop_scope();
		if result.is_ok() {
			self.emit(Node::ScopeEnd);
		}
		result
	}

	fn statement_list(&mut self) -> Result<(), ParserError> {
		while !matches!(self.peek_type(), None | Some(RightBrace)) {
			self.statement()?;
		}
		Ok(())
	}

	fn statement(&mut self) -> Result<(), ParserError> {
		let token = self.peek("statement")?;
		match token.r#type {
			Var | Val => self.declaration(),
			Identifier => self.assignment(),
			When => self.when_statement(),
			_ => Err(self.unexpected(SyntaxErrorCode::InvalidStatement, &token)),
		}
	}

	fn declaration(&mut self) -> Result<(), ParserError> {
		let keyword = self.advance("declaration")?;
		let nature = if keyword.r#type == Val { DeclarationNature::Constant } else { DeclarationNature::Variable };
		let name_position = self.current;
		let name = self.expect(Identifier, SyntaxErrorCode::ExpectedIdentifier, "declaration")?;

		let annotation = match self.peek_type() {
			Some(Colon) => {
				self.current += 1;
				Some(self.type_annotation()?)
			}
			_ => None,
		};

		let mut closed_by_when = false;
		let initializer = match self.peek_type() {
			Some(Equal) => {
				self.current += 1;
				let position = self.current;
				let value = match self.peek("initializer")?.r#type {
					When => {
						closed_by_when = true;
						self.when_expression()?
					}
					_ => self.expression()?,
				};
				Some((value, position))
			}
			_ => None,
		};

		if closed_by_when {
			if self.peek_type() == Some(Semicolon) {
				self.current += 1;
			}
		} else {
			self.expect(Semicolon, SyntaxErrorCode::ExpectedSemicolon, "declaration")?;
		}

		let r#type = match (annotation, &initializer) {
			(Some(expected), Some((value, position))) => {
				let found = value.value_type();
				if found.is_known() && found != expected {
					let name = name.lexeme.to_string();
					self.report(*position, SemanticErrorType::IncompatibleTypesInAssignment { name, expected, found });
				}
				expected
			}
			(Some(expected), None) => expected,
			(None, Some((value, _))) => value.value_type(),
			(None, None) => {
				if nature == DeclarationNature::Variable {
					self.report(name_position, SemanticErrorType::CannotInferType(format!("'{}'", name.lexeme)));
				}
				Type::Unknown
			}
		};
		if nature == DeclarationNature::Constant && initializer.is_none() {
			self.report(name_position, SemanticErrorType::ValMustBeInitialized(name.lexeme.into()));
		}

		tracing::trace!(name = name.lexeme, keyword = nature.keyword(), ty = %r#type, "declared");
		let entry = SymbolEntry::new(r#type, initializer.is_some(), nature, name_position);
		if !self.environment.declare(name.lexeme, entry)? {
			self.report(name_position, SemanticErrorType::RedeclaredIdentifier(name.lexeme.into()));
			// The kept entry takes on the redeclaration's initializer.
			if initializer.is_some() {
				self.environment.mark_initialized(name.lexeme);
			}
		}

		self.emit(Node::Declaration {
			nature,
			name: name.lexeme.into(),
			r#type,
			initializer: initializer.map(|(value, _)| Box::new(value)),
		});
		Ok(())
	}

	fn type_annotation(&mut self) -> Result<Type, ParserError> {
		let token = self.peek("type")?;
		let r#type = match token.r#type {
			Int => Type::Int,
			Char => Type::Char,
			_ => return Err(self.unexpected(SyntaxErrorCode::ExpectedIntOrChar, &token)),
		};
		self.current += 1;
		Ok(r#type)
	}

	fn assignment(&mut self) -> Result<(), ParserError> {
		let target_position = self.current;
		let target = self.advance("assignment")?;
		let operator_position = self.current;
		let token = self.peek("assignment")?;
		let operator = match token.r#type {
			Equal => None,
			PlusEqual => Some(BinaryOperator::Add),
			MinusEqual => Some(BinaryOperator::Subtract),
			StarEqual => Some(BinaryOperator::Multiply),
			SlashEqual => Some(BinaryOperator::Divide),
			PercentEqual => Some(BinaryOperator::Remainder),
			_ => return Err(self.unexpected(SyntaxErrorCode::InvalidOperator, &token)),
		};
		self.current += 1;

		let value_position = self.current;
		let value = self.expression()?;
		self.expect(Semicolon, SyntaxErrorCode::ExpectedSemicolon, "assignment")?;

		let target_type = match self.environment.lookup(target.lexeme) {
			None => {
				self.report(target_position, SemanticErrorType::UndeclaredIdentifier(target.lexeme.into()));
				Type::Unknown
			}
			Some(entry) => {
				if entry.is_constant() {
					self.report(target_position, SemanticErrorType::AssignmentToConstant(target.lexeme.into()));
				}
				if operator.is_some() && !entry.initialized {
					self.report(target_position, SemanticErrorType::VariableNotInitialized(target.lexeme.into()));
				}
				self.environment.mark_initialized(target.lexeme);
				entry.r#type
			}
		};

		let target = target.lexeme.to_string();
		match operator {
			None => {
				let found = value.value_type();
				if target_type.is_known() && found.is_known() && found != target_type {
					self.report(
						value_position,
						SemanticErrorType::IncompatibleTypesInAssignment {
							name: target.clone(),
							expected: target_type,
							found,
						},
					);
				}
				self.emit(Node::Assignment { target, value: Box::new(value) });
			}
			Some(operator) => {
				self.check_arithmetic(operator, target_type, value.value_type(), operator_position);
				self.emit(Node::CompoundAssignment { target, operator, value: Box::new(value) });
			}
		}
		Ok(())
	}
}

impl<'a> Parser<'a> {
	/// Current token, or the end-of-input error naming `rule`.
	fn peek(&self, rule: &'static str) -> Result<Token<'a>, ParserError> {
		self.tokens.get(self.current).copied().ok_or_else(|| SyntaxError::end_of_input(rule).into())
	}

	fn peek_type(&self) -> Option<TokenType> { self.tokens.get(self.current).map(|token| token.r#type) }

	fn advance(&mut self, rule: &'static str) -> Result<Token<'a>, ParserError> {
		let token = self.peek(rule)?;
		self.current += 1;
		Ok(token)
	}

	/// Consume a token of `r#type` or fail with `code`.
	fn expect(&mut self, r#type: TokenType, code: SyntaxErrorCode, rule: &'static str) -> Result<Token<'a>, ParserError> {
		let token = self.peek(rule)?;
		if token.r#type != r#type {
			return Err(self.unexpected(code, &token));
		}
		self.current += 1;
		Ok(token)
	}

	fn unexpected(&self, code: SyntaxErrorCode, token: &Token) -> ParserError {
		SyntaxError::unexpected(self.current, code, token).into()
	}

	fn emit(&mut self, node: Node) { self.blocks.push(Block::new(self.depth, node)); }

	fn report(&mut self, position: usize, r#type: SemanticErrorType) {
		self.diagnostics.push(SemanticError::new(position, r#type).into());
	}

	/// `T1`, `T_WHEN_2`, ... from one counter shared by every prefix.
	fn next_temp(&mut self, prefix: &str) -> String {
		self.temp_counter += 1;
		let name = format!("{prefix}{}", self.temp_counter);
		tracing::trace!(%name, "temporary allocated");
		name
	}
}
