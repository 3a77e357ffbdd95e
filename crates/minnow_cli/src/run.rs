//! Submitting one fragment to a session and reporting the outcome.

use crate::render::Output;
use crate::tree::{bound_tree_to_string, syntax_tree_to_string};
use minnow_compiler::Session;
use minnow_evaluator::Host;
use minnow_options::OutputFormat;
use minnow_parser::SyntaxTree;
use std::path::Path;

/// How a submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Diagnostics,
    RuntimeError,
}

impl Outcome {
    /// File mode exit status: 0 success, 1 diagnostics, 2 runtime error.
    pub fn exit_status(self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::Diagnostics => 1,
            Outcome::RuntimeError => 2,
        }
    }
}

/// Where a submission was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Repl,
    File,
}

impl Origin {
    /// The REPL always echoes the final value; a file run only in JSON.
    pub fn echoes_value(self, format: OutputFormat) -> bool {
        self == Origin::Repl || format == OutputFormat::Json
    }
}

/// Compile `tree` on top of the session, dump trees if asked, evaluate and
/// report. `name` labels the source in diagnostic excerpts.
pub fn execute<H: Host>(
    session: &mut Session<H>,
    origin: Origin,
    name: &str,
    tree: SyntaxTree,
    output: &Output,
) -> Outcome {
    let compilation = session.compile(tree);

    if session.options().show_tree {
        print!("{}", syntax_tree_to_string(&compilation.syntax_tree().root));
    }
    if session.options().show_program {
        print!("{}", bound_tree_to_string(&compilation.global_scope().statement));
    }

    match session.run(&compilation) {
        Ok(result) if result.is_success() => {
            if origin.echoes_value(output.format) {
                output.value(&result);
            }
            Outcome::Success
        }
        Ok(result) => {
            output.diagnostics(name, compilation.syntax_tree(), &result.diagnostics);
            Outcome::Diagnostics
        }
        Err(error) => {
            output.runtime_error(&error);
            Outcome::RuntimeError
        }
    }
}

/// Evaluate a whole file as a single fragment.
pub fn run_file<H: Host>(session: &mut Session<H>, path: &Path, output: &Output) -> u8 {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            output.error(&format!("cannot read {}: {}", path.display(), e));
            return Outcome::Diagnostics.exit_status();
        }
    };

    let tree = SyntaxTree::parse(&text);
    let name = path.display().to_string();
    execute(session, Origin::File, &name, tree, output).exit_status()
}
