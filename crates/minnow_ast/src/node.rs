//! Syntax node definitions.
//!
//! The tree mirrors the grammar one-to-one: every node keeps the tokens it was
//! built from, so spans for diagnostics can be taken from any part of it.
//! Child nodes are owned; the tree for one fragment is self-contained and can
//! outlive the parser that produced it.

use crate::syntax_kind::SyntaxKind;
use minnow_core::text::TextSpan;
use minnow_core::Value;

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Common data shared by all syntax nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    /// The kind of this node.
    pub kind: SyntaxKind,
    /// Source span covered by the node, from its first to its last token.
    pub span: TextSpan,
}

impl NodeData {
    pub fn new(kind: SyntaxKind, span: TextSpan) -> Self {
        Self { kind, span }
    }
}

// ============================================================================
// Token
// ============================================================================

/// A token with kind, span, and the source text it covers.
///
/// Tokens fabricated by the parser during error recovery have an empty
/// `text` and an empty span at the position where they were expected.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub data: NodeData,
    pub text: String,
}

impl Token {
    pub fn new(kind: SyntaxKind, span: TextSpan, text: impl Into<String>) -> Self {
        Self {
            data: NodeData::new(kind, span),
            text: text.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data.kind
    }

    #[inline]
    pub fn span(&self) -> TextSpan {
        self.data.span
    }

    /// Whether the parser fabricated this token because it was missing.
    pub fn is_missing(&self) -> bool {
        self.text.is_empty()
    }
}

// ============================================================================
// Compilation Unit
// ============================================================================

/// The root of a fragment: exactly one statement followed by end of file.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub data: NodeData,
    pub statement: Statement,
    pub end_of_file_token: Token,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Block(BlockStatement),
    VariableDeclaration(VariableDeclaration),
    If(IfStatement),
    While(WhileStatement),
    For(ForStatement),
    Expression(ExpressionStatement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub data: NodeData,
    pub open_brace_token: Token,
    pub statements: Vec<Statement>,
    pub close_brace_token: Token,
}

/// `let name = init` (read-only) or `var name = init` (mutable).
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub data: NodeData,
    pub keyword: Token,
    pub identifier: Token,
    pub type_clause: Option<TypeClause>,
    pub equals_token: Token,
    pub initializer: Expression,
}

/// An optional `: type` annotation on a declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeClause {
    pub data: NodeData,
    pub colon_token: Token,
    pub identifier: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub data: NodeData,
    pub if_keyword: Token,
    pub condition: Expression,
    pub then_statement: Box<Statement>,
    pub else_clause: Option<ElseClause>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseClause {
    pub data: NodeData,
    pub else_keyword: Token,
    pub else_statement: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub data: NodeData,
    pub while_keyword: Token,
    pub condition: Expression,
    pub body: Box<Statement>,
}

/// `for i = lower to upper body`, inclusive of both bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub data: NodeData,
    pub for_keyword: Token,
    pub identifier: Token,
    pub equals_token: Token,
    pub lower_bound: Expression,
    pub to_keyword: Token,
    pub upper_bound: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub data: NodeData,
    pub expression: Expression,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(LiteralExpression),
    Name(NameExpression),
    Unary(UnaryExpression),
    Binary(BinaryExpression),
    Parenthesized(ParenthesizedExpression),
    Assignment(AssignmentExpression),
    Call(CallExpression),
}

/// A number, string, `true` or `false` literal with its decoded value.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpression {
    pub data: NodeData,
    pub literal_token: Token,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NameExpression {
    pub data: NodeData,
    pub identifier: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub data: NodeData,
    pub operator_token: Token,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub data: NodeData,
    pub left: Box<Expression>,
    pub operator_token: Token,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenthesizedExpression {
    pub data: NodeData,
    pub open_paren_token: Token,
    pub expression: Box<Expression>,
    pub close_paren_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    pub data: NodeData,
    pub identifier: Token,
    pub equals_token: Token,
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub data: NodeData,
    pub identifier: Token,
    pub open_paren_token: Token,
    pub arguments: Vec<Expression>,
    pub close_paren_token: Token,
}
