//! Token information produced by the scanner.

use minnow_ast::syntax_kind::SyntaxKind;
use minnow_ast::Token;
use minnow_core::text::TextSpan;
use minnow_core::Value;

/// Information about a scanned token.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenInfo {
    /// The kind of token.
    pub kind: SyntaxKind,
    /// Start byte offset in the source text.
    pub pos: u32,
    /// End byte offset in the source text (exclusive).
    pub end: u32,
    /// The source text the token covers.
    pub text: String,
    /// Decoded literal value for number, string, `true` and `false` tokens.
    pub value: Option<Value>,
}

impl TokenInfo {
    pub fn new(kind: SyntaxKind, pos: u32, end: u32) -> Self {
        Self {
            kind,
            pos,
            end,
            text: String::new(),
            value: None,
        }
    }

    pub fn with_text(mut self, text: String) -> Self {
        self.text = text;
        self
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    #[inline]
    pub fn span(&self) -> TextSpan {
        TextSpan::from_bounds(self.pos, self.end)
    }

    /// Convert into a syntax-tree token, dropping the decoded value.
    pub fn to_token(&self) -> Token {
        Token::new(self.kind, self.span(), self.text.clone())
    }
}
