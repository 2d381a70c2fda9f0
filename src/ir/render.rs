//! Text form of the IR: one node per line group, two spaces per depth level.

use super::{Block, DeclarationNature, Node, Type, ValueCondition, WhenBranch};

const INDENT: &str = "  ";

/// Render the flat block sequence, each block at its own depth.
pub fn render_program(blocks: &[Block]) -> String {
	let mut lines = Vec::new();
	for block in blocks {
		block.render_lines(block.depth, &mut lines);
	}
	lines.into_iter().map(|line| line + "\n").collect()
}

fn push(lines: &mut Vec<String>, depth: usize, text: impl AsRef<str>) {
	lines.push(format!("{}{}", INDENT.repeat(depth), text.as_ref()));
}

fn literal_label(r#type: Type) -> &'static str {
	match r#type {
		Type::Int => "INT",
		Type::Char => "CHAR",
		Type::Unknown => "UNKNOWN",
	}
}

impl Block {
	/// Render this block alone, at its own depth.
	pub fn render(&self) -> String {
		let mut lines = Vec::new();
		self.render_lines(self.depth, &mut lines);
		lines.join("\n")
	}

	fn render_lines(&self, depth: usize, lines: &mut Vec<String>) {
		match &self.node {
			Node::ProgramStart { function } => push(lines, depth, format!("PROGRAM_START: {function}()")),
			Node::ProgramEnd { function } => push(lines, depth, format!("PROGRAM_END: {function}()")),
			Node::ScopeStart => push(lines, depth, "SCOPE_START"),
			Node::ScopeEnd => push(lines, depth, "SCOPE_END"),
			Node::Declaration { nature, name, r#type, initializer } => {
				let header = match nature {
					DeclarationNature::Variable => "DECLARE_VARIABLE",
					DeclarationNature::Constant => "DECLARE_CONSTANT",
				};
				push(lines, depth, format!("{header}: {name}"));
				push(lines, depth + 1, format!("TYPE: {type}"));
				if let Some(initializer) = initializer {
					push(lines, depth + 1, "INITIAL_VALUE:");
					initializer.render_lines(depth + 2, lines);
				}
			}
			Node::Assignment { target, value } => {
				push(lines, depth, format!("ASSIGN: {target}"));
				push(lines, depth + 1, "VALUE:");
				value.render_lines(depth + 2, lines);
			}
			Node::CompoundAssignment { target, operator, value } => {
				push(lines, depth, format!("COMPOUND_ASSIGN: {target} {operator}="));
				push(lines, depth + 1, "VALUE:");
				value.render_lines(depth + 2, lines);
			}
			Node::ExpressionOperation { operator, left, right, result, result_type } => {
				push(lines, depth, format!("OPERATION: '{operator}' (result in: {result}, result type: {result_type})"));
				push(lines, depth + 1, "OPERAND1:");
				left.render_lines(depth + 2, lines);
				push(lines, depth + 1, "OPERAND2:");
				right.render_lines(depth + 2, lines);
			}
			Node::IdentifierUse { name, r#type } => push(lines, depth, format!("IDENTIFIER: {name} (Type: {type})")),
			Node::Literal(literal) => {
				push(lines, depth, format!("{}_LITERAL: {}", literal_label(literal.r#type), literal.value))
			}
			Node::WhenExpression { subject, branches, else_action, result, result_type } => {
				push(lines, depth, format!("WHEN_EXPRESSION (result in: {result}, result type: {result_type})"));
				render_subject(subject, depth, lines);
				render_branches(branches, depth + 1, lines);
				push(lines, depth + 1, "ELSE_BRANCH:");
				push(lines, depth + 2, "ACTION:");
				else_action.render_lines(depth + 3, lines);
			}
			Node::WhenStatement { subject, branches } => {
				push(lines, depth, "WHEN_STATEMENT");
				render_subject(subject, depth, lines);
				render_branches(branches, depth + 1, lines);
			}
			Node::StatementBlock(statements) => {
				for statement in statements {
					statement.render_lines(depth + statement.depth, lines);
				}
			}
		}
	}
}

fn render_subject(subject: &Block, depth: usize, lines: &mut Vec<String>) {
	push(lines, depth + 1, "SUBJECT:");
	subject.render_lines(depth + 2, lines);
}

fn render_branches(branches: &[WhenBranch], depth: usize, lines: &mut Vec<String>) {
	for branch in branches {
		push(lines, depth, "BRANCH:");
		push(lines, depth + 1, "CONDITIONS:");
		for condition in &branch.conditions {
			match condition {
				ValueCondition::Value(literal) => push(lines, depth + 2, format!("VALUE: {}", literal.value)),
				ValueCondition::Range(low, high) => {
					push(lines, depth + 2, format!("RANGE: {} .. {}", low.value, high.value))
				}
			}
		}
		push(lines, depth + 1, "ACTION:");
		branch.action.render_lines(depth + 2, lines);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ir::{BinaryOperator, Literal};

	fn int(value: &str) -> Block { Block::operand(Node::Literal(Literal { value: value.into(), r#type: Type::Int })) }

	#[test]
	fn render_declaration() {
		let block = Block::new(
			1,
			Node::Declaration {
				nature:      DeclarationNature::Constant,
				name:        "x".into(),
				r#type:      Type::Int,
				initializer: Some(Box::new(int("5"))),
			},
		);
		assert_eq!(block.render(), "  DECLARE_CONSTANT: x\n    TYPE: Int\n    INITIAL_VALUE:\n      INT_LITERAL: 5");
	}

	#[test]
	fn render_declaration_without_initializer() {
		let block = Block::new(
			0,
			Node::Declaration {
				nature:      DeclarationNature::Variable,
				name:        "c".into(),
				r#type:      Type::Char,
				initializer: None,
			},
		);
		assert_eq!(block.to_string(), "DECLARE_VARIABLE: c\n  TYPE: Char");
	}

	#[test]
	fn render_operation() {
		let block = Block::new(
			1,
			Node::ExpressionOperation {
				operator:    BinaryOperator::Multiply,
				left:        Box::new(Block::operand(Node::IdentifierUse { name: "x".into(), r#type: Type::Int })),
				right:       Box::new(int("2")),
				result:      "T1".into(),
				result_type: Type::Int,
			},
		);
		let expected = [
			"  OPERATION: '*' (result in: T1, result type: Int)",
			"    OPERAND1:",
			"      IDENTIFIER: x (Type: Int)",
			"    OPERAND2:",
			"      INT_LITERAL: 2",
		];
		assert_eq!(block.render(), expected.join("\n"));
	}

	#[test]
	fn render_statement_block_uses_relative_depths() {
		let body = vec![
			Block::new(0, Node::ScopeStart),
			Block::new(1, Node::Assignment { target: "y".into(), value: Box::new(int("3")) }),
			Block::new(0, Node::ScopeEnd),
		];
		let block = Block::new(
			1,
			Node::WhenStatement {
				subject:  Box::new(int("1")),
				branches: vec![WhenBranch {
					conditions: vec![
						ValueCondition::Value(Literal { value: "1".into(), r#type: Type::Int }),
						ValueCondition::Range(
							Literal { value: "2".into(), r#type: Type::Int },
							Literal { value: "4".into(), r#type: Type::Int },
						),
					],
					action:     Box::new(Block::operand(Node::StatementBlock(body))),
				}],
			},
		);
		let expected = [
			"  WHEN_STATEMENT",
			"    SUBJECT:",
			"      INT_LITERAL: 1",
			"    BRANCH:",
			"      CONDITIONS:",
			"        VALUE: 1",
			"        RANGE: 2 .. 4",
			"      ACTION:",
			"        SCOPE_START",
			"          ASSIGN: y",
			"            VALUE:",
			"              INT_LITERAL: 3",
			"        SCOPE_END",
		];
		assert_eq!(block.render(), expected.join("\n"));
	}

	#[test]
	fn render_when_expression_with_else() {
		let character = |value: &str| Block::operand(Node::Literal(Literal { value: value.into(), r#type: Type::Char }));
		let block = Block::new(
			1,
			Node::WhenExpression {
				subject:     Box::new(int("1")),
				branches:    vec![WhenBranch {
					conditions: vec![ValueCondition::Value(Literal { value: "1".into(), r#type: Type::Int })],
					action:     Box::new(character("'a'")),
				}],
				else_action: Box::new(character("'b'")),
				result:      "T_WHEN_1".into(),
				result_type: Type::Char,
			},
		);
		let expected = [
			"  WHEN_EXPRESSION (result in: T_WHEN_1, result type: Char)",
			"    SUBJECT:",
			"      INT_LITERAL: 1",
			"    BRANCH:",
			"      CONDITIONS:",
			"        VALUE: 1",
			"      ACTION:",
			"        CHAR_LITERAL: 'a'",
			"    ELSE_BRANCH:",
			"      ACTION:",
			"        CHAR_LITERAL: 'b'",
		];
		assert_eq!(block.render(), expected.join("\n"));
	}

	#[test]
	fn render_program_ends_every_line() {
		let blocks = vec![
			Block::new(0, Node::ProgramStart { function: "main".into() }),
			Block::new(0, Node::ScopeStart),
			Block::new(0, Node::ScopeEnd),
			Block::new(0, Node::ProgramEnd { function: "main".into() }),
		];
		assert_eq!(render_program(&blocks), "PROGRAM_START: main()\nSCOPE_START\nSCOPE_END\nPROGRAM_END: main()\n");
	}
}
