//! minnow_parser: Recursive descent parser for minnow.
//!
//! Parses the scanner's token stream into an owned syntax tree. One parse
//! produces one [`SyntaxTree`]: a compilation unit holding a single statement,
//! plus every lexical and syntactic diagnostic found along the way.

mod parser;
mod precedence;
mod syntax_tree;

pub use parser::{Parser, MAX_RECURSION_DEPTH};
pub use precedence::{get_binary_operator_precedence, get_unary_operator_precedence, OperatorPrecedence};
pub use syntax_tree::SyntaxTree;
