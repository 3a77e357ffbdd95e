//! minnow_scanner: Lexer/tokenizer for minnow source code.
//!
//! Produces tokens from source text:
//! - Punctuation and operators
//! - Decimal integer literals (64-bit signed)
//! - Double-quoted string literals with `""` escapes
//! - Unicode identifiers and keywords
//!
//! Positions are byte offsets into the source text.

mod scanner;
mod token;

pub use scanner::{tokenize, Scanner};
pub use token::TokenInfo;
