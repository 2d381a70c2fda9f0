//! Operator-precedence evaluation over two stacks.
//!
//! Operands go on one stack, pending operators on the other. Before an
//! operator is pushed, every pending operator of equal or higher priority is
//! reduced: two operands and the operator come off, an `ExpressionOperation`
//! naming a fresh temporary is emitted, and a use of that temporary goes back
//! on the operand stack. A `(` is a priority-zero marker that nothing reduces
//! past; its `)` reduces down to it and drops it.

use TokenType::*;
use anyhow::anyhow;

use super::Parser;
use crate::{
	error::{
		parser::{ParserError, SyntaxErrorCode},
		semantic::SemanticErrorType,
	},
	ir::{BinaryOperator, Block, Literal, Node, Type},
	scanner::{Token, TokenType},
};

/// Largest value an integer literal may have.
const MAX_INT_LITERAL: u32 = 65535;

/// An entry on the operator stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Pending {
	/// An open parenthesis.
	Group,
	Binary { operator: BinaryOperator, position: usize },
}

impl Pending {
	fn priority(&self) -> u8 {
		match self {
			Pending::Group => 0,
			Pending::Binary { operator, .. } => operator.priority(),
		}
	}
}

fn additive(r#type: TokenType) -> Option<BinaryOperator> {
	match r#type {
		Plus => Some(BinaryOperator::Add),
		Minus => Some(BinaryOperator::Subtract),
		_ => None,
	}
}

fn multiplicative(r#type: TokenType) -> Option<BinaryOperator> {
	match r#type {
		Star => Some(BinaryOperator::Multiply),
		Slash => Some(BinaryOperator::Divide),
		Percent => Some(BinaryOperator::Remainder),
		_ => None,
	}
}

impl<'a> Parser<'a> {
	/// A full expression, returned as the block holding its value.
	pub(super) fn expression(&mut self) -> Result<Block, ParserError> {
		self.sum()?;
		self.pop_operand()
	}

	/// A single operand: identifier, literal or parenthesized expression.
	pub(super) fn atom(&mut self) -> Result<Block, ParserError> {
		self.factor()?;
		self.pop_operand()
	}

	/// Leaves the value of the sum on the operand stack.
	fn sum(&mut self) -> Result<(), ParserError> {
		self.term()?;
		while let Some(operator) = self.peek_type().and_then(additive) {
			self.push_operator(operator)?;
			self.term()?;
		}
		while matches!(self.operators.last(), Some(Pending::Binary { .. })) {
			self.reduce()?;
		}
		Ok(())
	}

	fn term(&mut self) -> Result<(), ParserError> {
		self.factor()?;
		while let Some(operator) = self.peek_type().and_then(multiplicative) {
			self.push_operator(operator)?;
			self.factor()?;
		}
		Ok(())
	}

	fn factor(&mut self) -> Result<(), ParserError> {
		let token = self.peek("expression")?;
		match token.r#type {
			Identifier => {
				let operand = self.identifier_use(token);
				self.operands.push(operand);
			}
			Number | Character => {
				let literal = self.literal(token);
				self.operands.push(Block::operand(Node::Literal(literal)));
			}
			LeftParen => {
				self.current += 1;
				self.operators.push(Pending::Group);
				self.sum()?;
				self.expect(RightParen, SyntaxErrorCode::ExpectedCloseParenthesis, "expression")?;
				match self.operators.pop() {
					Some(Pending::Group) => {}
					other => return Err(anyhow!("expected group marker on operator stack, found {other:?}").into()),
				}
			}
			_ => return Err(self.unexpected(SyntaxErrorCode::InvalidExpression, &token)),
		}
		Ok(())
	}

	/// Consume the operator token, reducing everything it does not outrank.
	fn push_operator(&mut self, operator: BinaryOperator) -> Result<(), ParserError> {
		let position = self.current;
		self.current += 1;
		while self.operators.last().is_some_and(|top| top.priority() >= operator.priority()) {
			self.reduce()?;
		}
		self.operators.push(Pending::Binary { operator, position });
		Ok(())
	}

	fn reduce(&mut self) -> Result<(), ParserError> {
		let Some(Pending::Binary { operator, position }) = self.operators.pop() else {
			return Err(anyhow!("reduction without a pending operator").into());
		};
		let right = self.pop_operand()?;
		let left = self.pop_operand()?;
		let result_type = self.check_arithmetic(operator, left.value_type(), right.value_type(), position);
		let result = self.next_temp("T");

		self.emit(Node::ExpressionOperation {
			operator,
			left: Box::new(left),
			right: Box::new(right),
			result: result.clone(),
			result_type,
		});
		self.operands.push(Block::operand(Node::IdentifierUse { name: result, r#type: result_type }));
		Ok(())
	}

	fn pop_operand(&mut self) -> Result<Block, ParserError> {
		self.operands.pop().ok_or_else(|| anyhow!("operand stack underflow").into())
	}

	/// Only `Int op Int` is defined. Both operators and compound assignments
	/// check through here, reporting at the operator token.
	pub(super) fn check_arithmetic(&mut self, operator: BinaryOperator, left: Type, right: Type, position: usize) -> Type {
		if left == Type::Int && right == Type::Int {
			return Type::Int;
		}
		self.report(position, SemanticErrorType::OperationNotDefinedForType { operator: operator.to_string(), left, right });
		if left.is_known() && right.is_known() {
			self.report(position, SemanticErrorType::incompatible_operands(operator, left, right));
		}
		Type::Unknown
	}

	fn identifier_use(&mut self, token: Token<'a>) -> Block {
		let position = self.current;
		self.current += 1;
		let r#type = match self.environment.lookup(token.lexeme) {
			None => {
				self.report(position, SemanticErrorType::UndeclaredIdentifier(token.lexeme.into()));
				Type::Unknown
			}
			Some(entry) => {
				if !entry.initialized {
					self.report(position, SemanticErrorType::VariableNotInitialized(token.lexeme.into()));
				}
				entry.r#type
			}
		};
		Block::operand(Node::IdentifierUse { name: token.lexeme.into(), r#type })
	}

	/// Consume a `Number` or `Character` token and check its format.
	pub(super) fn literal(&mut self, token: Token<'a>) -> Literal {
		let position = self.current;
		self.current += 1;
		let r#type = match token.r#type {
			Number => {
				if !matches!(token.lexeme.parse::<u32>(), Ok(value) if value <= MAX_INT_LITERAL) {
					self.report(position, SemanticErrorType::LiteralOutOfRange(token.lexeme.into()));
				}
				Type::Int
			}
			_ => match token.char_literal_content() {
				Some(_) => Type::Char,
				None => {
					self.report(position, SemanticErrorType::InvalidLiteral(token.lexeme.into()));
					Type::Unknown
				}
			},
		};
		Literal { value: token.lexeme.into(), r#type }
	}
}
