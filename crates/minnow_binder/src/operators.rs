//! Operator resolution tables.
//!
//! An operator exists for a (token, operand types) combination only if it is
//! listed here. The evaluator dispatches on the resolved `kind` alone.

use crate::symbol::TypeSymbol;
use minnow_ast::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundUnaryOperatorKind {
    Identity,
    Negation,
    LogicalNegation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundUnaryOperator {
    pub syntax_kind: SyntaxKind,
    pub kind: BoundUnaryOperatorKind,
    pub operand_type: TypeSymbol,
    pub ty: TypeSymbol,
}

impl BoundUnaryOperator {
    const fn new(syntax_kind: SyntaxKind, kind: BoundUnaryOperatorKind, operand_type: TypeSymbol) -> Self {
        Self {
            syntax_kind,
            kind,
            operand_type,
            ty: operand_type,
        }
    }

    /// Resolve a prefix operator for an operand type.
    pub fn bind(syntax_kind: SyntaxKind, operand_type: TypeSymbol) -> Option<Self> {
        use BoundUnaryOperatorKind::*;
        use SyntaxKind::*;
        use TypeSymbol::{Bool, Int};

        let kind = match (syntax_kind, operand_type) {
            (PlusToken, Int) => Identity,
            (MinusToken, Int) => Negation,
            (ExclamationToken, Bool) => LogicalNegation,
            _ => return None,
        };
        Some(Self::new(syntax_kind, kind, operand_type))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundBinaryOperatorKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    LogicalAnd,
    LogicalOr,
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEquals,
    GreaterThan,
    GreaterThanOrEquals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundBinaryOperator {
    pub syntax_kind: SyntaxKind,
    pub kind: BoundBinaryOperatorKind,
    pub left_type: TypeSymbol,
    pub right_type: TypeSymbol,
    pub ty: TypeSymbol,
}

impl BoundBinaryOperator {
    /// Resolve a binary operator for a pair of operand types.
    pub fn bind(syntax_kind: SyntaxKind, left_type: TypeSymbol, right_type: TypeSymbol) -> Option<Self> {
        use BoundBinaryOperatorKind::*;
        use SyntaxKind::*;
        use TypeSymbol::{Bool, Int, String};

        let (kind, ty) = match (syntax_kind, left_type, right_type) {
            // Arithmetic
            (PlusToken, Int, Int) => (Addition, Int),
            (MinusToken, Int, Int) => (Subtraction, Int),
            (AsteriskToken, Int, Int) => (Multiplication, Int),
            (SlashToken, Int, Int) => (Division, Int),

            // Concatenation
            (PlusToken, String, String) => (Addition, String),

            // Comparison
            (EqualsEqualsToken, Int, Int) | (EqualsEqualsToken, Bool, Bool) => (Equals, Bool),
            (ExclamationEqualsToken, Int, Int) | (ExclamationEqualsToken, Bool, Bool) => (NotEquals, Bool),
            (LessThanToken, Int, Int) => (LessThan, Bool),
            (LessThanEqualsToken, Int, Int) => (LessThanOrEquals, Bool),
            (GreaterThanToken, Int, Int) => (GreaterThan, Bool),
            (GreaterThanEqualsToken, Int, Int) => (GreaterThanOrEquals, Bool),

            // Logical
            (AmpersandAmpersandToken, Bool, Bool) => (LogicalAnd, Bool),
            (BarBarToken, Bool, Bool) => (LogicalOr, Bool),

            _ => return None,
        };

        Some(Self {
            syntax_kind,
            kind,
            left_type,
            right_type,
            ty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TYPES: [TypeSymbol; 5] = [
        TypeSymbol::Error,
        TypeSymbol::Bool,
        TypeSymbol::Int,
        TypeSymbol::String,
        TypeSymbol::Void,
    ];

    const BINARY_TOKENS: [SyntaxKind; 12] = [
        SyntaxKind::PlusToken,
        SyntaxKind::MinusToken,
        SyntaxKind::AsteriskToken,
        SyntaxKind::SlashToken,
        SyntaxKind::EqualsEqualsToken,
        SyntaxKind::ExclamationEqualsToken,
        SyntaxKind::LessThanToken,
        SyntaxKind::LessThanEqualsToken,
        SyntaxKind::GreaterThanToken,
        SyntaxKind::GreaterThanEqualsToken,
        SyntaxKind::AmpersandAmpersandToken,
        SyntaxKind::BarBarToken,
    ];

    #[test]
    fn test_binary_table_has_exactly_the_legal_pairs() {
        let mut count = 0;
        for token in BINARY_TOKENS {
            for left in ALL_TYPES {
                for right in ALL_TYPES {
                    if BoundBinaryOperator::bind(token, left, right).is_some() {
                        count += 1;
                    }
                }
            }
        }
        // 4 arithmetic + 1 concat + 4 equality + 4 ordering + 2 logical
        assert_eq!(count, 15);
    }

    #[test]
    fn test_binary_result_types() {
        let add = BoundBinaryOperator::bind(SyntaxKind::PlusToken, TypeSymbol::String, TypeSymbol::String).unwrap();
        assert_eq!(add.kind, BoundBinaryOperatorKind::Addition);
        assert_eq!(add.ty, TypeSymbol::String);

        let lt = BoundBinaryOperator::bind(SyntaxKind::LessThanToken, TypeSymbol::Int, TypeSymbol::Int).unwrap();
        assert_eq!(lt.ty, TypeSymbol::Bool);

        assert!(BoundBinaryOperator::bind(SyntaxKind::LessThanToken, TypeSymbol::Bool, TypeSymbol::Bool).is_none());
        assert!(BoundBinaryOperator::bind(SyntaxKind::EqualsEqualsToken, TypeSymbol::Int, TypeSymbol::Bool).is_none());
        assert!(BoundBinaryOperator::bind(SyntaxKind::EqualsEqualsToken, TypeSymbol::String, TypeSymbol::String).is_none());
    }

    #[test]
    fn test_unary_table() {
        let neg = BoundUnaryOperator::bind(SyntaxKind::MinusToken, TypeSymbol::Int).unwrap();
        assert_eq!(neg.kind, BoundUnaryOperatorKind::Negation);
        assert_eq!(neg.ty, TypeSymbol::Int);

        let not = BoundUnaryOperator::bind(SyntaxKind::ExclamationToken, TypeSymbol::Bool).unwrap();
        assert_eq!(not.ty, TypeSymbol::Bool);

        assert!(BoundUnaryOperator::bind(SyntaxKind::ExclamationToken, TypeSymbol::Int).is_none());
        assert!(BoundUnaryOperator::bind(SyntaxKind::MinusToken, TypeSymbol::String).is_none());
    }
}
