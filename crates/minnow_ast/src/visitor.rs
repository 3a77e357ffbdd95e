//! Syntax visitor trait for traversing the tree.
//!
//! Every `visit_*` method defaults to the matching `walk_*` function, which
//! visits the node's children (tokens included) in source order. Override a
//! method and call the walk function yourself to run code before and after
//! the children.

use crate::node::*;

/// A visitor over the syntax tree. Default implementations walk into children.
pub trait SyntaxVisitor {
    fn visit_compilation_unit(&mut self, node: &CompilationUnit) {
        walk_compilation_unit(self, node);
    }

    fn visit_statement(&mut self, stmt: &Statement) {
        walk_statement(self, stmt);
    }

    fn visit_expression(&mut self, expr: &Expression) {
        walk_expression(self, expr);
    }

    fn visit_token(&mut self, _token: &Token) {}
}

pub fn walk_compilation_unit<V: SyntaxVisitor + ?Sized>(v: &mut V, node: &CompilationUnit) {
    v.visit_statement(&node.statement);
    v.visit_token(&node.end_of_file_token);
}

pub fn walk_statement<V: SyntaxVisitor + ?Sized>(v: &mut V, stmt: &Statement) {
    match stmt {
        Statement::Block(n) => {
            v.visit_token(&n.open_brace_token);
            for s in &n.statements {
                v.visit_statement(s);
            }
            v.visit_token(&n.close_brace_token);
        }
        Statement::VariableDeclaration(n) => {
            v.visit_token(&n.keyword);
            v.visit_token(&n.identifier);
            if let Some(clause) = &n.type_clause {
                v.visit_token(&clause.colon_token);
                v.visit_token(&clause.identifier);
            }
            v.visit_token(&n.equals_token);
            v.visit_expression(&n.initializer);
        }
        Statement::If(n) => {
            v.visit_token(&n.if_keyword);
            v.visit_expression(&n.condition);
            v.visit_statement(&n.then_statement);
            if let Some(clause) = &n.else_clause {
                v.visit_token(&clause.else_keyword);
                v.visit_statement(&clause.else_statement);
            }
        }
        Statement::While(n) => {
            v.visit_token(&n.while_keyword);
            v.visit_expression(&n.condition);
            v.visit_statement(&n.body);
        }
        Statement::For(n) => {
            v.visit_token(&n.for_keyword);
            v.visit_token(&n.identifier);
            v.visit_token(&n.equals_token);
            v.visit_expression(&n.lower_bound);
            v.visit_token(&n.to_keyword);
            v.visit_expression(&n.upper_bound);
            v.visit_statement(&n.body);
        }
        Statement::Expression(n) => v.visit_expression(&n.expression),
    }
}

pub fn walk_expression<V: SyntaxVisitor + ?Sized>(v: &mut V, expr: &Expression) {
    match expr {
        Expression::Literal(n) => v.visit_token(&n.literal_token),
        Expression::Name(n) => v.visit_token(&n.identifier),
        Expression::Unary(n) => {
            v.visit_token(&n.operator_token);
            v.visit_expression(&n.operand);
        }
        Expression::Binary(n) => {
            v.visit_expression(&n.left);
            v.visit_token(&n.operator_token);
            v.visit_expression(&n.right);
        }
        Expression::Parenthesized(n) => {
            v.visit_token(&n.open_paren_token);
            v.visit_expression(&n.expression);
            v.visit_token(&n.close_paren_token);
        }
        Expression::Assignment(n) => {
            v.visit_token(&n.identifier);
            v.visit_token(&n.equals_token);
            v.visit_expression(&n.expression);
        }
        Expression::Call(n) => {
            v.visit_token(&n.identifier);
            v.visit_token(&n.open_paren_token);
            for arg in &n.arguments {
                v.visit_expression(arg);
            }
            v.visit_token(&n.close_paren_token);
        }
    }
}
