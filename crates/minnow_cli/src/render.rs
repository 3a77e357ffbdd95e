//! Output of values, diagnostics and runtime errors.
//!
//! Text output renders diagnostics as miette reports with a source excerpt;
//! JSON output writes one object per submission to stdout.

use miette::{GraphicalReportHandler, GraphicalTheme, LabeledSpan, NamedSource, SourceSpan};
use minnow_compiler::EvaluationResult;
use minnow_diagnostics::Diagnostic;
use minnow_evaluator::EvalError;
use minnow_options::OutputFormat;
use minnow_parser::SyntaxTree;
use serde_json::json;
use std::fmt;

// ANSI color codes
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const MAGENTA: &str = "\x1b[35m";
pub const GRAY: &str = "\x1b[90m";
pub const RESET: &str = "\x1b[0m";

/// Where and how results are written.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub format: OutputFormat,
    pub color: bool,
}

impl Output {
    /// Print the value of a successful submission.
    pub fn value(&self, result: &EvaluationResult) {
        match self.format {
            OutputFormat::Json => println!("{}", json!({ "diagnostics": [], "value": result.value })),
            OutputFormat::Text => {
                if let Some(value) = &result.value {
                    println!("{}", self.paint(MAGENTA, &value.to_string()));
                }
            }
        }
    }

    /// Print every diagnostic of a failed submission against its source.
    pub fn diagnostics(&self, name: &str, tree: &SyntaxTree, diagnostics: &[Diagnostic]) {
        match self.format {
            OutputFormat::Json => println!("{}", diagnostics_to_json(tree, diagnostics)),
            OutputFormat::Text => {
                let handler = if self.color {
                    GraphicalReportHandler::new_themed(GraphicalTheme::unicode())
                } else {
                    GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
                };
                for diagnostic in diagnostics {
                    let report = SourceDiagnostic::new(name, &tree.text, diagnostic);
                    let mut rendered = String::new();
                    match handler.render_report(&mut rendered, &report) {
                        Ok(()) => eprint!("{}", rendered),
                        Err(_) => eprintln!("{}", diagnostic),
                    }
                }
            }
        }
    }

    /// Print an evaluation that failed at run time.
    pub fn runtime_error(&self, error: &EvalError) {
        match self.format {
            OutputFormat::Json => println!("{}", json!({ "diagnostics": [], "value": null, "error": error.to_string() })),
            OutputFormat::Text => eprintln!("{}: {}", self.paint(RED, "runtime error"), error),
        }
    }

    /// Print a front-end problem such as an unreadable file.
    pub fn error(&self, message: &str) {
        eprintln!("{}: {}", self.paint(RED, "error"), message);
    }

    /// Print an informational line.
    pub fn info(&self, message: &str) {
        println!("{}", self.paint(GRAY, message));
    }

    pub fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }
}

/// JSON for a failed submission, with 1-based line and column per diagnostic.
pub fn diagnostics_to_json(tree: &SyntaxTree, diagnostics: &[Diagnostic]) -> serde_json::Value {
    let line_map = tree.line_map();
    let items: Vec<serde_json::Value> = diagnostics
        .iter()
        .map(|d| {
            let position = line_map.line_and_column_of(d.span.start);
            json!({
                "code": d.code_text(),
                "kind": d.kind,
                "message": d.message_text,
                "span": { "start": d.span.start, "length": d.span.length },
                "line": position.line + 1,
                "column": position.column + 1,
            })
        })
        .collect();
    json!({ "diagnostics": items, "value": null })
}

// ============================================================================
// miette bridge
// ============================================================================

/// A diagnostic paired with the fragment it was reported in.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct SourceDiagnostic {
    message: String,
    code: String,
    source_code: NamedSource<String>,
    span: SourceSpan,
}

impl SourceDiagnostic {
    fn new(name: &str, text: &str, diagnostic: &Diagnostic) -> Self {
        Self {
            message: diagnostic.message_text.clone(),
            code: diagnostic.code_text(),
            source_code: NamedSource::new(name, text.to_string()),
            span: SourceSpan::from((diagnostic.span.start as usize, diagnostic.span.length as usize)),
        }
    }
}

impl miette::Diagnostic for SourceDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.source_code)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(None, self.span))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_json_positions() {
        let tree = SyntaxTree::parse("{\n  var a = 1\n  a + b\n}");
        let scope = minnow_binder::bind_global_scope(None, &tree.root);
        let json = diagnostics_to_json(&tree, &scope.diagnostics);
        let diagnostic = &json["diagnostics"][0];
        assert_eq!(diagnostic["code"], "MN2001");
        assert_eq!(diagnostic["kind"], "UndefinedName");
        assert_eq!(diagnostic["line"], 3);
        assert_eq!(diagnostic["column"], 7);
        assert_eq!(json["value"], serde_json::Value::Null);
    }

    #[test]
    fn test_miette_report_renders() {
        let tree = SyntaxTree::parse("x");
        let scope = minnow_binder::bind_global_scope(None, &tree.root);
        let report = SourceDiagnostic::new("repl", &tree.text, &scope.diagnostics[0]);
        let mut rendered = String::new();
        GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
            .render_report(&mut rendered, &report)
            .unwrap();
        assert!(rendered.contains("MN2001"));
        assert!(rendered.contains("Variable 'x' doesn't exist."));
    }

    #[test]
    fn test_paint_without_color() {
        let output = Output { format: OutputFormat::Text, color: false };
        assert_eq!(output.paint(RED, "x"), "x");
        let output = Output { format: OutputFormat::Text, color: true };
        assert_eq!(output.paint(RED, "x"), "\x1b[31mx\x1b[0m");
    }
}
