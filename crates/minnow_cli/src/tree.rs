//! Text dumps of syntax trees and bound trees for `#showTree` / `#showProgram`.

use minnow_ast::visitor::{walk_compilation_unit, walk_expression, walk_statement};
use minnow_ast::{CompilationUnit, Expression, Statement, SyntaxKind, SyntaxVisitor, Token};
use minnow_binder::bound::{BoundExpression, BoundStatement};
use minnow_core::Value;
use std::fmt::Write;

const INDENT: &str = "  ";

/// Render the syntax tree, one node or token per line.
pub fn syntax_tree_to_string(unit: &CompilationUnit) -> String {
    let mut printer = SyntaxPrinter::default();
    printer.visit_compilation_unit(unit);
    printer.out
}

/// Render a bound statement, one node per line, with resolved types.
pub fn bound_tree_to_string(statement: &BoundStatement) -> String {
    let mut printer = BoundPrinter::default();
    printer.statement(statement);
    printer.out
}

// ============================================================================
// Syntax tree
// ============================================================================

#[derive(Default)]
struct SyntaxPrinter {
    out: String,
    depth: usize,
}

impl SyntaxPrinter {
    fn node(&mut self, kind: SyntaxKind, walk: impl FnOnce(&mut Self)) {
        let _ = writeln!(self.out, "{}{:?}", INDENT.repeat(self.depth), kind);
        self.depth += 1;
        walk(self);
        self.depth -= 1;
    }
}

impl SyntaxVisitor for SyntaxPrinter {
    fn visit_compilation_unit(&mut self, node: &CompilationUnit) {
        self.node(node.data.kind, |p| walk_compilation_unit(p, node));
    }

    fn visit_statement(&mut self, stmt: &Statement) {
        self.node(stmt.kind(), |p| walk_statement(p, stmt));
    }

    fn visit_expression(&mut self, expr: &Expression) {
        self.node(expr.kind(), |p| walk_expression(p, expr));
    }

    fn visit_token(&mut self, token: &Token) {
        let indent = INDENT.repeat(self.depth);
        let _ = match token.kind() {
            SyntaxKind::EndOfFileToken => writeln!(self.out, "{}{:?}", indent, token.kind()),
            kind if token.is_missing() => writeln!(self.out, "{}{:?} (missing)", indent, kind),
            kind => writeln!(self.out, "{}{:?} {}", indent, kind, token.text),
        };
    }
}

// ============================================================================
// Bound tree
// ============================================================================

#[derive(Default)]
struct BoundPrinter {
    out: String,
    depth: usize,
}

impl BoundPrinter {
    fn node(&mut self, header: String, children: impl FnOnce(&mut Self)) {
        let _ = writeln!(self.out, "{}{}", INDENT.repeat(self.depth), header);
        self.depth += 1;
        children(self);
        self.depth -= 1;
    }

    fn statement(&mut self, stmt: &BoundStatement) {
        match stmt {
            BoundStatement::Block(n) => self.node("Block".to_string(), |p| {
                for s in &n.statements {
                    p.statement(s);
                }
            }),
            BoundStatement::VariableDeclaration(n) => {
                let keyword = if n.variable.is_read_only { "let" } else { "var" };
                self.node(format!("VariableDeclaration {} {}", keyword, n.variable), |p| {
                    p.expression(&n.initializer)
                })
            }
            BoundStatement::If(n) => self.node("If".to_string(), |p| {
                p.expression(&n.condition);
                p.statement(&n.then_statement);
                if let Some(else_statement) = &n.else_statement {
                    p.statement(else_statement);
                }
            }),
            BoundStatement::While(n) => self.node("While".to_string(), |p| {
                p.expression(&n.condition);
                p.statement(&n.body);
            }),
            BoundStatement::For(n) => self.node(format!("For {}", n.variable), |p| {
                p.expression(&n.lower_bound);
                p.expression(&n.upper_bound);
                p.statement(&n.body);
            }),
            BoundStatement::Expression(n) => self.node("ExpressionStatement".to_string(), |p| p.expression(&n.expression)),
        }
    }

    fn expression(&mut self, expr: &BoundExpression) {
        let ty = expr.ty();
        match expr {
            BoundExpression::Literal(n) => {
                let text = match &n.value {
                    Value::String(s) => format!("{:?}", s),
                    other => other.to_string(),
                };
                self.node(format!("Literal {}: {}", text, ty), |_| {})
            }
            BoundExpression::Variable(n) => self.node(format!("Variable {}", n.variable), |_| {}),
            BoundExpression::Assignment(n) => {
                self.node(format!("Assignment {}", n.variable), |p| p.expression(&n.expression))
            }
            BoundExpression::Unary(n) => self.node(format!("Unary {:?}: {}", n.operator.kind, ty), |p| {
                p.expression(&n.operand)
            }),
            BoundExpression::Binary(n) => self.node(format!("Binary {:?}: {}", n.operator.kind, ty), |p| {
                p.expression(&n.left);
                p.expression(&n.right);
            }),
            BoundExpression::Call(n) => self.node(format!("Call {}", n.function), |p| {
                for argument in &n.arguments {
                    p.expression(argument);
                }
            }),
            BoundExpression::Conversion(n) => {
                self.node(format!("Conversion: {}", ty), |p| p.expression(&n.expression))
            }
            BoundExpression::Error => self.node(format!("Error: {}", ty), |_| {}),
        }
    }
}
