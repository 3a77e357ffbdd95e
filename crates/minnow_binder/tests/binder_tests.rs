//! Binder integration tests.
//!
//! Tests the parse -> bind pipeline and verifies the bound tree and the
//! diagnostics it reports.

use minnow_binder::bound::*;
use minnow_binder::{bind_global_scope, BoundBinaryOperatorKind, BoundGlobalScope, TypeSymbol};
use minnow_core::text::TextSpan;
use minnow_diagnostics::{Diagnostic, DiagnosticKind};
use minnow_parser::SyntaxTree;
use std::sync::Arc;

/// Helper: parse (which must succeed) and bind one fragment on top of `previous`.
fn bind_after(previous: Option<Arc<BoundGlobalScope>>, source: &str) -> BoundGlobalScope {
    let tree = SyntaxTree::parse(source);
    assert!(tree.diagnostics.is_empty(), "source: {} parse diagnostics: {:?}", source, tree.diagnostics);
    bind_global_scope(previous, &tree.root)
}

/// Helper: bind a standalone fragment.
fn bind(source: &str) -> BoundGlobalScope {
    bind_after(None, source)
}

/// Helper: the diagnostic kinds reported for a fragment.
fn diagnostic_kinds(source: &str) -> Vec<DiagnosticKind> {
    bind(source).diagnostics.iter().map(|d| d.kind).collect()
}

/// Helper: the single diagnostic reported for a fragment.
fn single_diagnostic(source: &str) -> Diagnostic {
    let mut diagnostics = bind(source).diagnostics;
    assert_eq!(diagnostics.len(), 1, "source: {} diagnostics: {:?}", source, diagnostics);
    diagnostics.remove(0)
}

/// Helper: the expression of an expression-statement fragment.
fn bound_expression(source: &str) -> BoundExpression {
    match bind(source).statement {
        BoundStatement::Expression(stmt) => stmt.expression,
        other => panic!("expected expression statement, got {:?}", other.kind()),
    }
}

// ============================================================================
// Names and declarations
// ============================================================================

#[test]
fn test_undefined_name() {
    let diagnostic = single_diagnostic("x");
    assert_eq!(diagnostic.kind, DiagnosticKind::UndefinedName);
    assert_eq!(diagnostic.span, TextSpan::new(0, 1));
    assert_eq!(bound_expression("x").ty(), TypeSymbol::Error);
}

#[test]
fn test_one_undefined_name_per_use() {
    assert_eq!(
        diagnostic_kinds("{ a + 1 b = a }"),
        vec![DiagnosticKind::UndefinedName, DiagnosticKind::UndefinedName, DiagnosticKind::UndefinedName]
    );
}

#[test]
fn test_redeclaration_in_same_scope() {
    let diagnostic = single_diagnostic("{ var x = 1 var x = 2 }");
    assert_eq!(diagnostic.kind, DiagnosticKind::VariableAlreadyDeclared);
    assert_eq!(diagnostic.span, TextSpan::new(16, 1));
}

#[test]
fn test_shadowing_in_nested_scope() {
    assert!(diagnostic_kinds("{ let x = 1 { let x = 2 } }").is_empty());
}

#[test]
fn test_block_scope_ends_with_block() {
    assert_eq!(diagnostic_kinds("{ { let x = 1 } x }"), vec![DiagnosticKind::UndefinedName]);
}

#[test]
fn test_declaration_type_is_inferred() {
    let BoundStatement::VariableDeclaration(decl) = bind("var s = \"a\" + \"b\"").statement else {
        panic!("expected declaration");
    };
    assert_eq!(decl.variable.ty, TypeSymbol::String);
    assert!(!decl.variable.is_read_only);

    // The type clause is not consulted
    let BoundStatement::VariableDeclaration(decl) = bind("let n: string = 1").statement else {
        panic!("expected declaration");
    };
    assert_eq!(decl.variable.ty, TypeSymbol::Int);
    assert!(decl.variable.is_read_only);
}

// ============================================================================
// Assignment
// ============================================================================

#[test]
fn test_assign_to_read_only() {
    let diagnostic = single_diagnostic("{ let x = 1 x = 2 }");
    assert_eq!(diagnostic.kind, DiagnosticKind::CannotAssign);
    // Reported at the equals token
    assert_eq!(diagnostic.span, TextSpan::new(14, 1));
}

#[test]
fn test_assign_mismatched_type_drops_assignment() {
    let scope = bind("{ var x = 10 x = true }");
    assert_eq!(scope.diagnostics.len(), 1);
    assert_eq!(scope.diagnostics[0].kind, DiagnosticKind::CannotConvert);
    assert_eq!(scope.diagnostics[0].span, TextSpan::new(17, 4));

    let BoundStatement::Block(block) = scope.statement else { panic!("expected block") };
    let BoundStatement::Expression(stmt) = &block.statements[1] else { panic!("expected expression") };
    assert_eq!(stmt.expression.kind(), BoundNodeKind::LiteralExpression);
}

#[test]
fn test_assign_to_undefined_keeps_value() {
    assert_eq!(diagnostic_kinds("y = 1"), vec![DiagnosticKind::UndefinedName]);
    assert_eq!(bound_expression("y = 1").kind(), BoundNodeKind::LiteralExpression);
}

#[test]
fn test_assignment_is_an_expression() {
    let scope = bind("{ var a = 0 var b = 0 a = b = 3 }");
    assert!(scope.diagnostics.is_empty());
    let BoundStatement::Block(block) = scope.statement else { panic!("expected block") };
    let BoundStatement::Expression(stmt) = &block.statements[2] else { panic!("expected expression") };
    let BoundExpression::Assignment(outer) = &stmt.expression else { panic!("expected assignment") };
    assert_eq!(outer.variable.name, "a");
    assert_eq!(outer.expression.kind(), BoundNodeKind::AssignmentExpression);
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_binary_operator_resolution() {
    let BoundExpression::Binary(binary) = bound_expression("1 + 2 * 3") else { panic!("expected binary") };
    assert_eq!(binary.operator.kind, BoundBinaryOperatorKind::Addition);
    assert_eq!(binary.operator.ty, TypeSymbol::Int);

    assert_eq!(bound_expression("\"a\" + \"b\"").ty(), TypeSymbol::String);
    assert_eq!(bound_expression("1 < 2 && true").ty(), TypeSymbol::Bool);
    assert_eq!(bound_expression("true != false").ty(), TypeSymbol::Bool);
}

#[test]
fn test_undefined_binary_operator() {
    let diagnostic = single_diagnostic("1 + true");
    assert_eq!(diagnostic.kind, DiagnosticKind::UndefinedOperator);
    assert_eq!(diagnostic.span, TextSpan::new(2, 1));
    assert_eq!(diagnostic.message_text, "Binary operator '+' is not defined for types 'int' and 'bool'.");
}

#[test]
fn test_undefined_unary_operator() {
    let diagnostic = single_diagnostic("!1");
    assert_eq!(diagnostic.kind, DiagnosticKind::UndefinedOperator);
    assert_eq!(diagnostic.message_text, "Unary operator '!' is not defined for type 'int'.");
}

#[test]
fn test_errors_do_not_cascade() {
    assert_eq!(diagnostic_kinds("(x + 1) * 2 == 3"), vec![DiagnosticKind::UndefinedName]);
    assert_eq!(diagnostic_kinds("{ var v = x v = 1 }"), vec![DiagnosticKind::UndefinedName]);
    assert_eq!(diagnostic_kinds("if x 1"), vec![DiagnosticKind::UndefinedName]);
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_condition_must_be_bool() {
    let diagnostic = single_diagnostic("if 1 2");
    assert_eq!(diagnostic.kind, DiagnosticKind::CannotConvert);
    assert_eq!(diagnostic.message_text, "Cannot convert type 'int' to 'bool'.");
    assert_eq!(diagnostic_kinds("while \"s\" 1"), vec![DiagnosticKind::CannotConvert]);
}

#[test]
fn test_for_bounds_must_be_int() {
    assert_eq!(diagnostic_kinds("for i = true to 3 i"), vec![DiagnosticKind::CannotConvert]);
}

#[test]
fn test_for_variable_is_read_only_and_local() {
    assert_eq!(diagnostic_kinds("for i = 1 to 3 i = 2"), vec![DiagnosticKind::CannotAssign]);
    assert_eq!(diagnostic_kinds("{ for i = 1 to 3 { } i }"), vec![DiagnosticKind::UndefinedName]);
}

#[test]
fn test_for_bounds_cannot_see_loop_variable() {
    assert_eq!(diagnostic_kinds("for i = 1 to i { }"), vec![DiagnosticKind::UndefinedName]);
}

#[test]
fn test_for_statement_shape() {
    let BoundStatement::For(stmt) = bind("for i = 1 to 10 { }").statement else { panic!("expected for") };
    assert_eq!(stmt.variable.name, "i");
    assert!(stmt.variable.is_read_only);
    assert_eq!(stmt.variable.ty, TypeSymbol::Int);
}

// ============================================================================
// Calls and conversions
// ============================================================================

#[test]
fn test_builtin_calls() {
    assert_eq!(bound_expression("read()").ty(), TypeSymbol::String);
    assert_eq!(bound_expression("rnd(10)").ty(), TypeSymbol::Int);
    assert_eq!(bound_expression("write(\"hi\")").ty(), TypeSymbol::Void);
}

#[test]
fn test_void_is_allowed_only_as_statement() {
    assert!(diagnostic_kinds("write(\"hi\")").is_empty());
    assert_eq!(diagnostic_kinds("let v = write(\"hi\")"), vec![DiagnosticKind::ExpressionMustHaveValue]);
    assert_eq!(diagnostic_kinds("if write(\"hi\") 1"), vec![DiagnosticKind::ExpressionMustHaveValue]);
}

#[test]
fn test_undefined_function() {
    let diagnostic = single_diagnostic("print(\"hi\")");
    assert_eq!(diagnostic.kind, DiagnosticKind::UndefinedFunction);
    assert_eq!(diagnostic.span, TextSpan::new(0, 5));
}

#[test]
fn test_wrong_argument_count() {
    let diagnostic = single_diagnostic("rnd(1, 2)");
    assert_eq!(diagnostic.kind, DiagnosticKind::WrongArgumentCount);
    assert_eq!(diagnostic.span, TextSpan::new(0, 9));
    assert_eq!(diagnostic.message_text, "Function 'rnd' requires 1 arguments but was given 2.");
    assert_eq!(diagnostic_kinds("read(1)"), vec![DiagnosticKind::WrongArgumentCount]);
}

#[test]
fn test_wrong_argument_type() {
    let diagnostic = single_diagnostic("write(1)");
    assert_eq!(diagnostic.kind, DiagnosticKind::WrongArgumentType);
    assert_eq!(diagnostic.span, TextSpan::new(6, 1));
    assert_eq!(
        diagnostic.message_text,
        "Parameter 'text' requires a value of type 'string' but was given a value of type 'int'."
    );
}

#[test]
fn test_conversion_by_call_syntax() {
    let BoundExpression::Conversion(conversion) = bound_expression("string(42)") else {
        panic!("expected conversion");
    };
    assert_eq!(conversion.ty, TypeSymbol::String);
    assert_eq!(bound_expression("int(\"7\")").ty(), TypeSymbol::Int);
    assert_eq!(bound_expression("bool(\"true\")").ty(), TypeSymbol::Bool);
}

#[test]
fn test_illegal_conversion() {
    let diagnostic = single_diagnostic("int(true)");
    assert_eq!(diagnostic.kind, DiagnosticKind::CannotConvert);
    assert_eq!(diagnostic.span, TextSpan::new(4, 4));
}

#[test]
fn test_type_name_with_two_arguments_is_a_call() {
    assert_eq!(diagnostic_kinds("int(1, 2)"), vec![DiagnosticKind::UndefinedFunction]);
}

// ============================================================================
// Fragments
// ============================================================================

#[test]
fn test_variables_visible_in_later_fragments() {
    let first = Arc::new(bind("let a = 5"));
    assert_eq!(first.variables.len(), 1);

    let second = bind_after(Some(first.clone()), "write(string(a))");
    assert!(second.diagnostics.is_empty());
    assert!(second.variables.is_empty());

    let BoundStatement::Expression(stmt) = &second.statement else { panic!("expected expression") };
    let BoundExpression::Call(call) = &stmt.expression else { panic!("expected call") };
    let BoundExpression::Conversion(conversion) = &call.arguments[0] else { panic!("expected conversion") };
    let BoundExpression::Variable(variable) = conversion.expression.as_ref() else {
        panic!("expected variable")
    };
    assert_eq!(variable.variable, first.variables[0]);
}

#[test]
fn test_later_fragment_may_shadow() {
    let first = Arc::new(bind("let a = 5"));
    let second = bind_after(Some(first.clone()), "let a = true");
    assert!(second.diagnostics.is_empty());
    assert_ne!(second.variables[0].id, first.variables[0].id);

    let third = bind_after(Some(Arc::new(second)), "a && false");
    assert!(third.diagnostics.is_empty());
}

#[test]
fn test_read_only_across_fragments() {
    let first = Arc::new(bind("let a = 5"));
    let tree = SyntaxTree::parse("a = 6");
    let second = bind_global_scope(Some(first), &tree.root);
    assert_eq!(second.diagnostics.len(), 1);
    assert_eq!(second.diagnostics[0].kind, DiagnosticKind::CannotAssign);
}

#[test]
fn test_binding_is_idempotent() {
    let first = Arc::new(bind("var total = 0"));
    let tree = SyntaxTree::parse("{ for i = 1 to 3 total = total + i undefined }");
    let a = bind_global_scope(Some(first.clone()), &tree.root);
    let b = bind_global_scope(Some(first), &tree.root);
    assert_eq!(a, b);
    assert_eq!(a.diagnostics.len(), 1);
}
