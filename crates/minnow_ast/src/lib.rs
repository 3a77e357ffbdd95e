//! minnow_ast: Syntax tree definitions for the minnow language.
//!
//! This module defines all syntax node types, the SyntaxKind enum, and a
//! visitor for walking a parsed fragment.

pub mod accessors;
pub mod node;
pub mod syntax_kind;
pub mod visitor;

// Re-export key types
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use visitor::SyntaxVisitor;
