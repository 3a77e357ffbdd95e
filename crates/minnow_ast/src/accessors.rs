//! Accessor helpers shared by every node enum.

use crate::node::*;
use crate::syntax_kind::SyntaxKind;
use minnow_core::text::TextSpan;

/// Helper to get the NodeData from any statement.
impl Statement {
    pub fn data(&self) -> &NodeData {
        match self {
            Statement::Block(n) => &n.data,
            Statement::VariableDeclaration(n) => &n.data,
            Statement::If(n) => &n.data,
            Statement::While(n) => &n.data,
            Statement::For(n) => &n.data,
            Statement::Expression(n) => &n.data,
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    #[inline]
    pub fn span(&self) -> TextSpan {
        self.data().span
    }
}

/// Helper to get the NodeData from any expression.
impl Expression {
    pub fn data(&self) -> &NodeData {
        match self {
            Expression::Literal(n) => &n.data,
            Expression::Name(n) => &n.data,
            Expression::Unary(n) => &n.data,
            Expression::Binary(n) => &n.data,
            Expression::Parenthesized(n) => &n.data,
            Expression::Assignment(n) => &n.data,
            Expression::Call(n) => &n.data,
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    #[inline]
    pub fn span(&self) -> TextSpan {
        self.data().span
    }
}
