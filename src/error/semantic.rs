use crate::ir::{BinaryOperator, Type};

/// A type or scope problem. Analysis continues after reporting one.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub struct SemanticError {
	position: usize,
	r#type:   SemanticErrorType,
}

impl SemanticError {
	pub fn new(position: usize, r#type: SemanticErrorType) -> Self { Self { position, r#type } }

	pub fn position(&self) -> usize { self.position }

	pub fn r#type(&self) -> &SemanticErrorType { &self.r#type }

	pub fn code(&self) -> &'static str { self.r#type.code() }
}

impl std::fmt::Display for SemanticError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "token #{}: {} - {}", self.position, self.r#type.code(), self.r#type)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticErrorType {
	UndeclaredIdentifier(String),
	RedeclaredIdentifier(String),
	LiteralOutOfRange(String),
	InvalidLiteral(String),
	VariableNotInitialized(String),
	/// Operand types that cannot meet, e.g. `1 + 'a'` or a `Char` condition on an
	/// `Int` subject.
	IncompatibleTypesInOperation(String),
	AssignmentToConstant(String),
	ValMustBeInitialized(String),
	IncompatibleTypesInAssignment { name: String, expected: Type, found: Type },
	WhenBranchesHaveDifferentTypes { expected: Type, found: Type },
	OperationNotDefinedForType { operator: String, left: Type, right: Type },
	CannotInferType(String),
}

impl SemanticErrorType {
	pub fn code(&self) -> &'static str {
		use SemanticErrorType::*;
		match self {
			UndeclaredIdentifier(_) => "UndeclaredIdentifier",
			RedeclaredIdentifier(_) => "RedeclaredIdentifier",
			LiteralOutOfRange(_) => "LiteralOutOfRange",
			InvalidLiteral(_) => "InvalidLiteral",
			VariableNotInitialized(_) => "VariableNotInitialized",
			IncompatibleTypesInOperation(_) => "IncompatibleTypesInOperation",
			AssignmentToConstant(_) => "AssignmentToConstant",
			ValMustBeInitialized(_) => "ValMustBeInitialized",
			IncompatibleTypesInAssignment { .. } => "IncompatibleTypesInAssignment",
			WhenBranchesHaveDifferentTypes { .. } => "WhenBranchesHaveDifferentTypes",
			OperationNotDefinedForType { .. } => "OperationNotDefinedForType",
			CannotInferType(_) => "CannotInferType",
		}
	}

	pub(crate) fn incompatible_operands(operator: BinaryOperator, left: Type, right: Type) -> Self {
		Self::IncompatibleTypesInOperation(format!("{operator} ({left} vs {right})"))
	}
}

impl std::fmt::Display for SemanticErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use SemanticErrorType::*;
		match self {
			UndeclaredIdentifier(name) => write!(f, "identifier '{name}' is used before its declaration"),
			RedeclaredIdentifier(name) => write!(f, "identifier '{name}' is already declared in this block"),
			LiteralOutOfRange(value) => write!(f, "literal '{value}' is outside the range [0, 65535]"),
			InvalidLiteral(value) => write!(f, "literal {value} is malformed"),
			VariableNotInitialized(name) => write!(f, "variable '{name}' is used before a value is assigned"),
			IncompatibleTypesInOperation(detail) => write!(f, "incompatible types in operation {detail}"),
			AssignmentToConstant(name) => write!(f, "cannot assign to constant '{name}' after initialization"),
			ValMustBeInitialized(name) => write!(f, "constant '{name}' (val) must be initialized where declared"),
			IncompatibleTypesInAssignment { name, expected, found } => {
				write!(f, "incompatible types in assignment to {name}: expected {expected}, found {found}")
			}
			WhenBranchesHaveDifferentTypes { expected, found } => {
				write!(f, "when branches produce different types: expected {expected}, branch gives {found}")
			}
			OperationNotDefinedForType { operator, left, right } => {
				write!(f, "operation {operator} is not defined for {left} and {right}")
			}
			CannotInferType(subject) => write!(f, "cannot infer a type for {subject}; annotate it or initialize it"),
		}
	}
}
