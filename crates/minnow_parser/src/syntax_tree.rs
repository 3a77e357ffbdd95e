//! A parsed fragment: its source text, root node and diagnostics.

use minnow_ast::node::CompilationUnit;
use minnow_core::text::LineMap;
use minnow_diagnostics::Diagnostic;

use crate::parser::Parser;

/// The immutable result of parsing one fragment of source text.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTree {
    /// The full source text of the fragment.
    pub text: String,
    /// The root compilation unit.
    pub root: CompilationUnit,
    /// Lexical diagnostics followed by syntactic diagnostics.
    pub diagnostics: Vec<Diagnostic>,
}

impl SyntaxTree {
    /// Parse `text` into a syntax tree. Never fails; problems become diagnostics.
    pub fn parse(text: &str) -> Self {
        let mut parser = Parser::new(text);
        let root = parser.parse_compilation_unit();
        let diagnostics = parser.take_diagnostics().into_diagnostics();
        Self {
            text: text.to_string(),
            root,
            diagnostics,
        }
    }

    /// Whether scanning or parsing reported anything.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Line map over the source text, for rendering diagnostic locations.
    pub fn line_map(&self) -> LineMap {
        LineMap::new(&self.text)
    }
}
