use whenc::{Category, Diagnostic, analyze};

fn program(body: &str) -> String { format!("fun main() {{ {body} }}") }

fn semantic_codes(source: &str) -> Vec<&'static str> {
	analyze(source).unwrap().diagnostics.semantic().map(|error| error.code()).collect()
}

#[test]
fn scanning_segments_every_run() {
	let source = "fun main(){var a=b+=c..d->e;}";
	let analysis = analyze(source).unwrap();
	let lexemes: Vec<_> = analysis.tokens.iter().map(|token| token.lexeme).collect();
	assert_eq!(lexemes, [
		"fun", "main", "(", ")", "{", "var", "a", "=", "b", "+=", "c", "..", "d", "->", "e", ";", "}"
	]);
}

#[test]
fn long_identifier_is_truncated_once() {
	let source = program("var abcdefghij = 1;");
	let analysis = analyze(&source).unwrap();
	assert_eq!(analysis.tokens[6].lexeme, "abcdefgh");
	assert_eq!(analysis.diagnostics.lexical().count(), 1);
	assert_eq!(analysis.diagnostics.len(), 1);
}

#[test]
fn statements_render_at_block_depth() {
	let source = program("var a = 1; a = 2; when (a) { 1 -> { var b = 3; b = 4; } }");
	let analysis = analyze(&source).unwrap();
	assert!(analysis.is_success());
	let headers: Vec<_> = analysis
		.render_ir()
		.lines()
		.filter(|line| {
			let text = line.trim_start();
			text.starts_with("DECLARE") || text.starts_with("ASSIGN") || text.starts_with("SCOPE")
		})
		.map(str::to_string)
		.collect();
	assert_eq!(headers, [
		"SCOPE_START",
		"  DECLARE_VARIABLE: a",
		"  ASSIGN: a",
		"  SCOPE_START",
		"          SCOPE_START",
		"          DECLARE_VARIABLE: b",
		"          ASSIGN: b",
		"          SCOPE_END",
		"  SCOPE_END",
		"SCOPE_END",
	]);
}

#[test]
fn val_reassignment_reports_once() {
	let source = program("val x = 5; x = 6;");
	let analysis = analyze(&source).unwrap();
	let codes: Vec<_> = analysis.diagnostics.semantic().map(|error| error.code()).collect();
	assert_eq!(codes, ["AssignmentToConstant"]);
	assert_eq!(analysis.diagnostics.len(), 1);
}

#[test]
fn redeclaration_in_same_block() {
	let source = program("var x: Int; var x: Char;");
	let analysis = analyze(&source).unwrap();
	let errors: Vec<_> = analysis.diagnostics.iter().collect();
	match errors.as_slice() {
		[Diagnostic::Semantic(error)] => {
			assert_eq!(error.code(), "RedeclaredIdentifier");
			assert_eq!(analysis.tokens[error.position()].lexeme, "x");
			assert_eq!(error.position(), 11);
		}
		_ => panic!("unexpected diagnostics {errors:?}"),
	}
}

#[test]
fn mixed_operands_report_both() {
	assert_eq!(semantic_codes(&program("var x = 1 + 'a';")), [
		"OperationNotDefinedForType",
		"IncompatibleTypesInOperation"
	]);
}

#[test]
fn branch_body_is_lifted() {
	let analysis = analyze("fun main() { when (1) { 1 -> { var y = 2; } } }").unwrap();
	assert!(analysis.is_success());
	let flat: Vec<_> = analysis.blocks.iter().map(|block| format!("{:?}", block.node)).collect();
	assert!(!flat.iter().any(|node| node.starts_with("Declaration")));

	let statement = analysis
		.blocks
		.iter()
		.find_map(|block| match &block.node {
			whenc::ir::Node::WhenStatement { branches, .. } => Some(branches),
			_ => None,
		})
		.unwrap();
	let whenc::ir::Node::StatementBlock(body) = &statement[0].action.node else {
		panic!("branch action is not a statement block");
	};
	let declaration = body.iter().find(|block| matches!(block.node, whenc::ir::Node::Declaration { .. })).unwrap();
	assert_eq!(declaration.depth, 0);
}

#[test]
fn analysis_is_idempotent() {
	let source = program("var a = 1; a += q; val c = when (a) { 1 -> 'x'; else -> 2; };");
	let first = analyze(&source).unwrap();
	let second = analyze(&source).unwrap();
	assert_eq!(first.render_ir(), second.render_ir());
	for category in [Category::Lexical, Category::Syntactic, Category::Semantic] {
		assert_eq!(first.diagnostics.messages(category), second.diagnostics.messages(category));
	}
	assert!(first.render_ir().contains("T_WHEN_1"));
}

#[test]
fn when_branches_disagree() {
	assert_eq!(semantic_codes(&program("val c = when (1) { 1 -> 'a'; else -> 2; };")), [
		"WhenBranchesHaveDifferentTypes",
		"CannotInferType"
	]);
}

#[test]
fn halted_parse_keeps_earlier_results() {
	let source = program("var a = q; var b = ;");
	let analysis = analyze(&source).unwrap();
	assert_eq!(analysis.diagnostics.messages(Category::Semantic).len(), 1);
	assert_eq!(analysis.diagnostics.messages(Category::Syntactic), [
		"token #13: expected operand, found ';' (Operator)"
	]);
	assert!(analysis.render_ir().contains("DECLARE_VARIABLE: a"));
	assert!(!analysis.is_success());
}

#[test]
fn empty_source_ends_early() {
	let analysis = analyze("").unwrap();
	assert_eq!(analysis.diagnostics.messages(Category::Syntactic), ["unexpected end of input in 'program'"]);
	assert!(analysis.blocks.is_empty());
}
