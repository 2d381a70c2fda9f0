use TokenType::*;

use super::Parser;
use crate::{
	error::{
		parser::{ParserError, SyntaxErrorCode},
		semantic::SemanticErrorType,
	},
	ir::{Block, Literal, Node, Type, ValueCondition, WhenBranch},
	scanner::TokenType,
};

impl Parser<'_> {
	/// `when (subject) { branches }` as a statement. The branches share one
	/// scope and the `WhenStatement` is emitted inside it.
	pub(super) fn when_statement(&mut self) -> Result<(), ParserError> {
		let subject = self.when_subject()?;
		let subject_type = subject.value_type();
		self.scoped(|parser| {
			let mut branches = Vec::new();
			loop {
				branches.push(parser.statement_branch(subject_type)?);
				if matches!(parser.peek_type(), None | Some(RightBrace)) {
					break;
				}
			}
			parser.expect(RightBrace, SyntaxErrorCode::ExpectedCloseBrace, "when statement")?;
			parser.emit(Node::WhenStatement { subject: Box::new(subject), branches });
			Ok(())
		})
	}

	/// `when (subject) { branches else -> atom; }` as a value. Emits the
	/// `WhenExpression` and returns a use of its result temporary.
	pub(super) fn when_expression(&mut self) -> Result<Block, ParserError> {
		let position = self.current;
		let subject = self.when_subject()?;
		let subject_type = subject.value_type();

		let mut branches = Vec::new();
		let mut actions = Vec::new();
		loop {
			let conditions = self.value_list(subject_type)?;
			self.expect(Arrow, SyntaxErrorCode::ExpectedArrow, "when expression")?;
			actions.push(self.current);
			let action = self.atom()?;
			self.expect(Semicolon, SyntaxErrorCode::ExpectedSemicolon, "when expression")?;
			branches.push(WhenBranch { conditions, action: Box::new(action) });
			if matches!(self.peek_type(), None | Some(RightBrace | Else)) {
				break;
			}
		}

		let token = self.peek("when expression")?;
		if token.r#type != Else {
			return Err(self.unexpected(SyntaxErrorCode::ExpectedElse, &token));
		}
		self.current += 1;
		self.expect(Arrow, SyntaxErrorCode::ExpectedArrow, "when expression")?;
		actions.push(self.current);
		let else_action = self.atom()?;
		self.expect(Semicolon, SyntaxErrorCode::ExpectedSemicolon, "when expression")?;
		self.expect(RightBrace, SyntaxErrorCode::ExpectedCloseBrace, "when expression")?;

		let types = branches.iter().map(|branch| branch.action.value_type()).chain([else_action.value_type()]);
		let typed: Vec<_> = actions.into_iter().zip(types).collect();
		let result_type = self.unify_branches(position, &typed);
		let result = self.next_temp("T_WHEN_");

		self.emit(Node::WhenExpression {
			subject: Box::new(subject),
			branches,
			else_action: Box::new(else_action),
			result: result.clone(),
			result_type,
		});
		Ok(Block::operand(Node::IdentifierUse { name: result, r#type: result_type }))
	}

	/// The first known action type is the result; `Unknown` actions are
	/// skipped. A disagreement leaves no common type, so it also reports
	/// `CannotInferType`. `typed` pairs each action's token index with its type.
	fn unify_branches(&mut self, position: usize, typed: &[(usize, Type)]) -> Type {
		let mut known = typed.iter().filter(|(_, r#type)| r#type.is_known());
		let Some(&(_, expected)) = known.next() else {
			self.report(position, SemanticErrorType::CannotInferType("when expression".into()));
			return Type::Unknown;
		};
		match known.find(|(_, found)| *found != expected) {
			Some(&(at, found)) => {
				self.report(at, SemanticErrorType::WhenBranchesHaveDifferentTypes { expected, found });
				self.report(position, SemanticErrorType::CannotInferType("when expression".into()));
				Type::Unknown
			}
			None => expected,
		}
	}

	/// `when ( expression ) {`, returning the subject.
	fn when_subject(&mut self) -> Result<Block, ParserError> {
		self.advance("when")?;
		self.expect(LeftParen, SyntaxErrorCode::ExpectedOpenParenthesis, "when")?;
		let subject = self.expression()?;
		self.expect(RightParen, SyntaxErrorCode::ExpectedCloseParenthesis, "when")?;
		self.expect(LeftBrace, SyntaxErrorCode::ExpectedOpenBrace, "when")?;
		Ok(subject)
	}

	/// `values -> body`. Whatever the body emits is lifted out of the flat
	/// block sequence into a `StatementBlock`, with depths made relative to the
	/// branch.
	fn statement_branch(&mut self, subject: Type) -> Result<WhenBranch, ParserError> {
		let conditions = self.value_list(subject)?;
		self.expect(Arrow, SyntaxErrorCode::ExpectedArrow, "when branch")?;

		let mark = self.blocks.len();
		let base = self.depth + 1;
		if self.peek("when branch")?.r#type == LeftBrace {
			self.block("when branch")?;
			if self.peek_type() == Some(Semicolon) {
				self.current += 1;
			}
		} else {
			self.statement()?;
		}

		let statements = self
			.blocks
			.split_off(mark)
			.into_iter()
			.map(|block| Block::new(block.depth.saturating_sub(base), block.node))
			.collect();
		Ok(WhenBranch { conditions, action: Box::new(Block::operand(Node::StatementBlock(statements))) })
	}

	fn value_list(&mut self, subject: Type) -> Result<Vec<ValueCondition>, ParserError> {
		let mut conditions = vec![self.value(subject)?];
		while !matches!(self.peek_type(), None | Some(Arrow)) {
			self.expect(Comma, SyntaxErrorCode::ExpectedComma, "when branch")?;
			conditions.push(self.value(subject)?);
		}
		Ok(conditions)
	}

	fn value(&mut self, subject: Type) -> Result<ValueCondition, ParserError> {
		if self.peek("when condition")?.r#type != In {
			return Ok(ValueCondition::Value(self.condition_literal(subject, SyntaxErrorCode::ExpectedValue)?));
		}
		self.current += 1;
		let low = self.condition_literal(subject, SyntaxErrorCode::ExpectedLiteral)?;
		self.expect(DotDot, SyntaxErrorCode::ExpectedDoubleDot, "when condition")?;
		let high = self.condition_literal(subject, SyntaxErrorCode::ExpectedLiteral)?;
		Ok(ValueCondition::Range(low, high))
	}

	/// A literal that must match the subject type when both are known.
	fn condition_literal(&mut self, subject: Type, code: SyntaxErrorCode) -> Result<Literal, ParserError> {
		let token = self.peek("when condition")?;
		if !matches!(token.r#type, Number | Character) {
			return Err(self.unexpected(code, &token));
		}
		let position = self.current;
		let literal = self.literal(token);
		if literal.r#type.is_known() && subject.is_known() && literal.r#type != subject {
			let detail = format!("when condition {} ({}) on {subject} subject", literal.value, literal.r#type);
			self.report(position, SemanticErrorType::IncompatibleTypesInOperation(detail));
		}
		Ok(literal)
	}
}
