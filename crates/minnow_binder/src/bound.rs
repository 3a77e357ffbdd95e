//! The bound tree: a typed, immutable intermediate representation.
//!
//! Produced by the binder and consumed by the evaluator. Every expression
//! carries its resolved type; names are resolved to symbols and operators to
//! table entries, so the evaluator never looks at source text.

use crate::operators::{BoundBinaryOperator, BoundUnaryOperator};
use crate::symbol::{FunctionSymbol, TypeSymbol, VariableSymbol};
use minnow_core::Value;

/// Discriminant of every bound node, for dumps and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundNodeKind {
    // Statements
    BlockStatement,
    VariableDeclaration,
    IfStatement,
    WhileStatement,
    ForStatement,
    ExpressionStatement,

    // Expressions
    LiteralExpression,
    VariableExpression,
    AssignmentExpression,
    UnaryExpression,
    BinaryExpression,
    CallExpression,
    ConversionExpression,
    ErrorExpression,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum BoundStatement {
    Block(BoundBlockStatement),
    VariableDeclaration(BoundVariableDeclaration),
    If(BoundIfStatement),
    While(BoundWhileStatement),
    For(BoundForStatement),
    Expression(BoundExpressionStatement),
}

impl BoundStatement {
    pub fn kind(&self) -> BoundNodeKind {
        match self {
            BoundStatement::Block(_) => BoundNodeKind::BlockStatement,
            BoundStatement::VariableDeclaration(_) => BoundNodeKind::VariableDeclaration,
            BoundStatement::If(_) => BoundNodeKind::IfStatement,
            BoundStatement::While(_) => BoundNodeKind::WhileStatement,
            BoundStatement::For(_) => BoundNodeKind::ForStatement,
            BoundStatement::Expression(_) => BoundNodeKind::ExpressionStatement,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundBlockStatement {
    pub statements: Vec<BoundStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundVariableDeclaration {
    pub variable: VariableSymbol,
    pub initializer: BoundExpression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundIfStatement {
    pub condition: BoundExpression,
    pub then_statement: Box<BoundStatement>,
    pub else_statement: Option<Box<BoundStatement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundWhileStatement {
    pub condition: BoundExpression,
    pub body: Box<BoundStatement>,
}

/// Inclusive counting loop. `variable` is read-only to the program but is
/// rewritten by the evaluator on every iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundForStatement {
    pub variable: VariableSymbol,
    pub lower_bound: BoundExpression,
    pub upper_bound: BoundExpression,
    pub body: Box<BoundStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundExpressionStatement {
    pub expression: BoundExpression,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum BoundExpression {
    Literal(BoundLiteralExpression),
    Variable(BoundVariableExpression),
    Assignment(BoundAssignmentExpression),
    Unary(BoundUnaryExpression),
    Binary(BoundBinaryExpression),
    Call(BoundCallExpression),
    Conversion(BoundConversionExpression),
    /// Stands in for anything that failed to bind. Typed `Error`.
    Error,
}

impl BoundExpression {
    /// The resolved static type of this expression.
    pub fn ty(&self) -> TypeSymbol {
        match self {
            BoundExpression::Literal(n) => n.ty(),
            BoundExpression::Variable(n) => n.variable.ty,
            BoundExpression::Assignment(n) => n.variable.ty,
            BoundExpression::Unary(n) => n.operator.ty,
            BoundExpression::Binary(n) => n.operator.ty,
            BoundExpression::Call(n) => n.function.return_type,
            BoundExpression::Conversion(n) => n.ty,
            BoundExpression::Error => TypeSymbol::Error,
        }
    }

    pub fn kind(&self) -> BoundNodeKind {
        match self {
            BoundExpression::Literal(_) => BoundNodeKind::LiteralExpression,
            BoundExpression::Variable(_) => BoundNodeKind::VariableExpression,
            BoundExpression::Assignment(_) => BoundNodeKind::AssignmentExpression,
            BoundExpression::Unary(_) => BoundNodeKind::UnaryExpression,
            BoundExpression::Binary(_) => BoundNodeKind::BinaryExpression,
            BoundExpression::Call(_) => BoundNodeKind::CallExpression,
            BoundExpression::Conversion(_) => BoundNodeKind::ConversionExpression,
            BoundExpression::Error => BoundNodeKind::ErrorExpression,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundLiteralExpression {
    pub value: Value,
}

impl BoundLiteralExpression {
    pub fn ty(&self) -> TypeSymbol {
        match self.value {
            Value::Int(_) => TypeSymbol::Int,
            Value::Bool(_) => TypeSymbol::Bool,
            Value::String(_) => TypeSymbol::String,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundVariableExpression {
    pub variable: VariableSymbol,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundAssignmentExpression {
    pub variable: VariableSymbol,
    pub expression: Box<BoundExpression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundUnaryExpression {
    pub operator: BoundUnaryOperator,
    pub operand: Box<BoundExpression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundBinaryExpression {
    pub left: Box<BoundExpression>,
    pub operator: BoundBinaryOperator,
    pub right: Box<BoundExpression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundCallExpression {
    pub function: FunctionSymbol,
    pub arguments: Vec<BoundExpression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundConversionExpression {
    pub ty: TypeSymbol,
    pub expression: Box<BoundExpression>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_types() {
        let lit = |value: Value| BoundExpression::Literal(BoundLiteralExpression { value });
        assert_eq!(lit(Value::Int(1)).ty(), TypeSymbol::Int);
        assert_eq!(lit(Value::Bool(true)).ty(), TypeSymbol::Bool);
        assert_eq!(lit(Value::from("s")).ty(), TypeSymbol::String);
        assert_eq!(BoundExpression::Error.ty(), TypeSymbol::Error);
        assert_eq!(BoundExpression::Error.kind(), BoundNodeKind::ErrorExpression);
    }
}
