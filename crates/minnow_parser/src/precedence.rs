//! Operator precedence for binary and unary operators.

use minnow_ast::syntax_kind::SyntaxKind;

/// Operator precedence levels, from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Lowest = 0,
    LogicalOr = 1,
    LogicalAnd = 2,
    Comparison = 3,
    Additive = 4,
    Multiplicative = 5,
    Unary = 6,
    Invalid = 255,
}

/// Get the binary operator precedence for a given token kind.
pub fn get_binary_operator_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    match kind {
        SyntaxKind::BarBarToken => OperatorPrecedence::LogicalOr,
        SyntaxKind::AmpersandAmpersandToken => OperatorPrecedence::LogicalAnd,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::LessThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::GreaterThanEqualsToken => OperatorPrecedence::Comparison,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => OperatorPrecedence::Additive,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken => OperatorPrecedence::Multiplicative,
        _ => OperatorPrecedence::Invalid,
    }
}

/// Get the unary (prefix) operator precedence for a given token kind.
pub fn get_unary_operator_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    match kind {
        SyntaxKind::PlusToken | SyntaxKind::MinusToken | SyntaxKind::ExclamationToken => {
            OperatorPrecedence::Unary
        }
        _ => OperatorPrecedence::Invalid,
    }
}
