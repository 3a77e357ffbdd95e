//! Parser integration tests.
//!
//! Verifies that the parser correctly builds syntax trees from minnow source.

use minnow_ast::node::*;
use minnow_ast::syntax_kind::SyntaxKind;
use minnow_core::text::TextSpan;
use minnow_core::Value;
use minnow_diagnostics::DiagnosticKind;
use minnow_parser::SyntaxTree;

/// Helper: parse source text that must be free of diagnostics.
fn parse_clean(source: &str) -> CompilationUnit {
    let tree = SyntaxTree::parse(source);
    assert!(tree.diagnostics.is_empty(), "source: {} diagnostics: {:?}", source, tree.diagnostics);
    tree.root
}

/// Helper: parse a single expression statement and return its expression.
fn parse_expression(source: &str) -> Expression {
    match parse_clean(source).statement {
        Statement::Expression(stmt) => stmt.expression,
        other => panic!("expected expression statement, got {:?}", other.kind()),
    }
}

/// Helper: render an expression fully parenthesized, to check tree shape.
fn shape(expr: &Expression) -> String {
    match expr {
        Expression::Literal(n) => n.value.to_string(),
        Expression::Name(n) => n.identifier.text.clone(),
        Expression::Unary(n) => format!("({}{})", n.operator_token.text, shape(&n.operand)),
        Expression::Binary(n) => {
            format!("({} {} {})", shape(&n.left), n.operator_token.text, shape(&n.right))
        }
        Expression::Parenthesized(n) => shape(&n.expression),
        Expression::Assignment(n) => format!("({} = {})", n.identifier.text, shape(&n.expression)),
        Expression::Call(n) => {
            let args: Vec<String> = n.arguments.iter().map(shape).collect();
            format!("{}({})", n.identifier.text, args.join(", "))
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_binary_precedence() {
    assert_eq!(shape(&parse_expression("1 + 2 * 3")), "(1 + (2 * 3))");
    assert_eq!(shape(&parse_expression("1 * 2 + 3")), "((1 * 2) + 3)");
    assert_eq!(shape(&parse_expression("a < b == c")), "((a < b) == c)");
    assert_eq!(shape(&parse_expression("a || b && c")), "(a || (b && c))");
    assert_eq!(shape(&parse_expression("1 + 2 < 4 && true")), "(((1 + 2) < 4) && true)");
}

#[test]
fn test_binary_left_associative() {
    assert_eq!(shape(&parse_expression("10 - 3 - 2")), "((10 - 3) - 2)");
    assert_eq!(shape(&parse_expression("8 / 4 / 2")), "((8 / 4) / 2)");
}

#[test]
fn test_unary_binds_tightest() {
    assert_eq!(shape(&parse_expression("-2 * 3")), "((-2) * 3)");
    assert_eq!(shape(&parse_expression("!a && b")), "((!a) && b)");
    assert_eq!(shape(&parse_expression("--x")), "(-(-x))");
    assert_eq!(shape(&parse_expression("1 - -1")), "(1 - (-1))");
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(shape(&parse_expression("a = b = 1 + 2")), "(a = (b = (1 + 2)))");
}

#[test]
fn test_parenthesized_overrides_precedence() {
    assert_eq!(shape(&parse_expression("(1 + 2) * 3")), "((1 + 2) * 3)");
}

#[test]
fn test_call_expressions() {
    assert_eq!(shape(&parse_expression("print()")), "print()");
    assert_eq!(shape(&parse_expression("rnd(10)")), "rnd(10)");
    assert_eq!(shape(&parse_expression("f(1, a + 2, \"x\")")), "f(1, (a + 2), x)");
}

#[test]
fn test_literal_values() {
    let Expression::Literal(lit) = parse_expression("true") else { panic!("expected literal") };
    assert_eq!(lit.value, Value::Bool(true));
    let Expression::Literal(lit) = parse_expression("\"a\"\"b\"") else { panic!("expected literal") };
    assert_eq!(lit.value, Value::from("a\"b"));
    assert_eq!(lit.literal_token.text, "\"a\"\"b\"");
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_parse_declarations() {
    let Statement::VariableDeclaration(decl) = parse_clean("let x = 10").statement else {
        panic!("expected declaration");
    };
    assert_eq!(decl.keyword.kind(), SyntaxKind::LetKeyword);
    assert_eq!(decl.identifier.text, "x");
    assert!(decl.type_clause.is_none());
    assert_eq!(decl.data.span, TextSpan::new(0, 10));

    let Statement::VariableDeclaration(decl) = parse_clean("var y: int = 1").statement else {
        panic!("expected declaration");
    };
    assert_eq!(decl.keyword.kind(), SyntaxKind::VarKeyword);
    assert_eq!(decl.type_clause.map(|c| c.identifier.text), Some("int".to_string()));
}

#[test]
fn test_parse_block() {
    let Statement::Block(block) = parse_clean("{ var a = 1 a = a + 1 a }").statement else {
        panic!("expected block");
    };
    let kinds: Vec<_> = block.statements.iter().map(|s| s.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::VariableDeclaration,
            SyntaxKind::ExpressionStatement,
            SyntaxKind::ExpressionStatement,
        ]
    );
}

#[test]
fn test_parse_if_else() {
    let Statement::If(stmt) = parse_clean("if a 1 else 2").statement else {
        panic!("expected if");
    };
    assert_eq!(shape(&stmt.condition), "a");
    assert!(stmt.else_clause.is_some());
    assert_eq!(stmt.data.span, TextSpan::new(0, 13));
}

#[test]
fn test_parse_while_and_for() {
    let Statement::While(stmt) = parse_clean("while i < 10 i = i + 1").statement else {
        panic!("expected while");
    };
    assert_eq!(stmt.body.kind(), SyntaxKind::ExpressionStatement);

    let Statement::For(stmt) = parse_clean("for i = 1 to 10 { }").statement else {
        panic!("expected for");
    };
    assert_eq!(stmt.identifier.text, "i");
    assert_eq!(shape(&stmt.lower_bound), "1");
    assert_eq!(shape(&stmt.upper_bound), "10");
    assert_eq!(stmt.body.kind(), SyntaxKind::BlockStatement);
}

// ============================================================================
// Diagnostics and recovery
// ============================================================================

#[test]
fn test_unexpected_token_reports_kinds() {
    let tree = SyntaxTree::parse("let x 10");
    assert_eq!(tree.diagnostics.len(), 1);
    let diagnostic = &tree.diagnostics[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::UnexpectedToken);
    assert_eq!(diagnostic.span, TextSpan::new(6, 2));
    assert_eq!(
        diagnostic.message_text,
        "Unexpected token <NumericLiteral>, expected <EqualsToken>."
    );
}

#[test]
fn test_trailing_tokens_after_statement() {
    let tree = SyntaxTree::parse("1 2");
    assert_eq!(tree.diagnostics.len(), 1);
    assert_eq!(tree.diagnostics[0].kind, DiagnosticKind::UnexpectedToken);
}

#[test]
fn test_unclosed_block_terminates() {
    let tree = SyntaxTree::parse("{ ) ) }");
    assert!(tree.has_errors());
    let tree = SyntaxTree::parse("{ let x = 1");
    assert_eq!(tree.diagnostics.len(), 1);
    assert_eq!(tree.diagnostics[0].span, TextSpan::empty(11));
}

#[test]
fn test_scanner_diagnostics_come_first() {
    let tree = SyntaxTree::parse("let = $");
    assert_eq!(tree.diagnostics[0].kind, DiagnosticKind::BadCharacter);
    assert!(tree.diagnostics[1..]
        .iter()
        .all(|d| d.kind == DiagnosticKind::UnexpectedToken));
}

#[test]
fn test_empty_source_is_missing_name() {
    let tree = SyntaxTree::parse("");
    let Statement::Expression(stmt) = &tree.root.statement else {
        panic!("expected expression statement");
    };
    let Expression::Name(name) = &stmt.expression else { panic!("expected name") };
    assert!(name.identifier.is_missing());
    assert_eq!(tree.diagnostics.len(), 1);
}

#[test]
fn test_parse_is_deterministic() {
    let source = "{ var a = 0 for i = 1 to 3 a = a + i }";
    assert_eq!(SyntaxTree::parse(source), SyntaxTree::parse(source));
}

// ============================================================================
// Nesting limit
// ============================================================================

/// Helper: the diagnostic kinds reported for a fragment.
fn diagnostic_kinds(source: &str) -> Vec<DiagnosticKind> {
    SyntaxTree::parse(source).diagnostics.iter().map(|d| d.kind).collect()
}

#[test]
fn test_deep_parentheses_report_one_diagnostic() {
    let source = format!("{}1{}", "(".repeat(50_000), ")".repeat(50_000));
    assert_eq!(diagnostic_kinds(&source), vec![DiagnosticKind::NestingTooDeep]);
}

#[test]
fn test_long_operator_chain_reports_one_diagnostic() {
    let source = vec!["1"; 100_000].join(" + ");
    assert_eq!(diagnostic_kinds(&source), vec![DiagnosticKind::NestingTooDeep]);
}

#[test]
fn test_deep_statements_and_unary_operators() {
    let blocks = format!("{}1{}", "{ ".repeat(10_000), " }".repeat(10_000));
    assert_eq!(diagnostic_kinds(&blocks), vec![DiagnosticKind::NestingTooDeep]);

    let negations = format!("{}1", "- ".repeat(10_000));
    assert_eq!(diagnostic_kinds(&negations), vec![DiagnosticKind::NestingTooDeep]);

    let assignments = format!("{}1", "a = ".repeat(10_000));
    assert_eq!(diagnostic_kinds(&assignments), vec![DiagnosticKind::NestingTooDeep]);
}

#[test]
fn test_nesting_below_limit_is_accepted() {
    let parens = format!("{}1{}", "(".repeat(50), ")".repeat(50));
    assert_eq!(shape(&parse_expression(&parens)), "1");

    let chain = vec!["1"; 150].join(" + ");
    let Expression::Binary(binary) = parse_expression(&chain) else { panic!("expected binary") };
    assert_eq!(binary.operator_token.text, "+");
}

#[test]
fn test_nesting_diagnostic_message() {
    let source = "(".repeat(1_000);
    let tree = SyntaxTree::parse(&source);
    assert_eq!(tree.diagnostics.len(), 1);
    assert_eq!(
        tree.diagnostics[0].message_text,
        format!("Code is nested more than {} levels deep.", minnow_parser::MAX_RECURSION_DEPTH)
    );
}
