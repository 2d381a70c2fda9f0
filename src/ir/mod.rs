//! Intermediate representation emitted by the analyzer.
//!
//! Every checked construct becomes a [`Block`]: a [`Node`] plus the depth it
//! is indented to. Blocks own their children outright. The analyzer appends
//! finished blocks to one flat sequence; the only nesting of statements is the
//! [`Node::StatementBlock`] that holds the body of a block-bodied `when`
//! branch, whose children store depths relative to the branch.

mod render;

use std::fmt;

pub use render::render_program;

/// Value types. `Unknown` absorbs errors so one mistake is reported once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
	Int,
	Char,
	Unknown,
}

impl Type {
	pub fn is_known(&self) -> bool { !matches!(self, Type::Unknown) }
}

impl fmt::Display for Type {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Type::Int => write!(f, "Int"),
			Type::Char => write!(f, "Char"),
			Type::Unknown => write!(f, "Unknown"),
		}
	}
}

/// Whether a declaration used `var` or `val`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationNature {
	Variable,
	Constant,
}

impl DeclarationNature {
	pub fn keyword(&self) -> &'static str {
		match self {
			DeclarationNature::Variable => "var",
			DeclarationNature::Constant => "val",
		}
	}
}

/// Arithmetic operators, also used for the compound assignments `+=` etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
	Add,
	Subtract,
	Multiply,
	Divide,
	Remainder,
}

impl BinaryOperator {
	/// `+ -` bind looser than `* / %`. Zero is reserved for an open parenthesis.
	pub fn priority(&self) -> u8 {
		match self {
			BinaryOperator::Add | BinaryOperator::Subtract => 1,
			BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Remainder => 2,
		}
	}

	pub fn symbol(&self) -> &'static str {
		match self {
			BinaryOperator::Add => "+",
			BinaryOperator::Subtract => "-",
			BinaryOperator::Multiply => "*",
			BinaryOperator::Divide => "/",
			BinaryOperator::Remainder => "%",
		}
	}
}

impl fmt::Display for BinaryOperator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.symbol()) }
}

/// A literal as written, with the type it was checked to have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
	pub value:  String,
	pub r#type: Type,
}

/// One `when` condition: a single literal or the inclusive range `in a..b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueCondition {
	Value(Literal),
	Range(Literal, Literal),
}

/// `conditions -> action`. In a when expression the action is an operand; in a
/// when statement it is a [`Node::StatementBlock`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhenBranch {
	pub conditions: Vec<ValueCondition>,
	pub action:     Box<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
	pub depth: usize,
	pub node:  Node,
}

impl Block {
	pub fn new(depth: usize, node: Node) -> Self { Self { depth, node } }

	/// An operand: a child block whose depth is decided by its parent.
	pub fn operand(node: Node) -> Self { Self { depth: 0, node } }

	/// The type a block yields when used as a value. Statements yield `Unknown`.
	pub fn value_type(&self) -> Type {
		match &self.node {
			Node::IdentifierUse { r#type, .. } => *r#type,
			Node::Literal(literal) => literal.r#type,
			Node::ExpressionOperation { result_type, .. } | Node::WhenExpression { result_type, .. } => *result_type,
			_ => Type::Unknown,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
	ProgramStart {
		function: String,
	},
	ProgramEnd {
		function: String,
	},
	Declaration {
		nature:      DeclarationNature,
		name:        String,
		r#type:      Type,
		initializer: Option<Box<Block>>,
	},
	Assignment {
		target: String,
		value:  Box<Block>,
	},
	CompoundAssignment {
		target:   String,
		operator: BinaryOperator,
		value:    Box<Block>,
	},
	/// `result = left operator right`, with `result` a fresh temporary.
	ExpressionOperation {
		operator:    BinaryOperator,
		left:        Box<Block>,
		right:       Box<Block>,
		result:      String,
		result_type: Type,
	},
	IdentifierUse {
		name:   String,
		r#type: Type,
	},
	Literal(Literal),
	WhenExpression {
		subject:     Box<Block>,
		branches:    Vec<WhenBranch>,
		/// The mandatory `else -> atom` action.
		else_action: Box<Block>,
		result:      String,
		result_type: Type,
	},
	WhenStatement {
		subject:  Box<Block>,
		branches: Vec<WhenBranch>,
	},
	/// Statements lifted out of the flat sequence; child depths are relative.
	StatementBlock(Vec<Block>),
	ScopeStart,
	ScopeEnd,
}

impl fmt::Display for Block {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.render()) }
}
