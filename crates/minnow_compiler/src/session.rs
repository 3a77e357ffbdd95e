//! An interactive session: a chain of compilations over one variable store.

use crate::compilation::{Compilation, EvaluationResult};
use minnow_evaluator::{EvalError, Host, Variables};
use minnow_options::SessionOptions;
use minnow_parser::SyntaxTree;
use std::sync::Arc;
use tracing::debug;

/// Owns the variable store, the host and the last successful compilation.
///
/// Fragments that report diagnostics or fail to evaluate are not chained, so
/// the next submission sees only the state of earlier successful ones.
#[derive(Debug)]
pub struct Session<H: Host> {
    options: SessionOptions,
    variables: Variables,
    host: H,
    previous: Option<Arc<Compilation>>,
}

impl<H: Host> Session<H> {
    pub fn new(host: H, options: SessionOptions) -> Self {
        Self {
            options,
            variables: Variables::default(),
            host,
            previous: None,
        }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut SessionOptions {
        &mut self.options
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// The last compilation that evaluated without diagnostics or errors.
    pub fn previous(&self) -> Option<&Arc<Compilation>> {
        self.previous.as_ref()
    }

    /// Chain `syntax_tree` onto the last successful compilation.
    pub fn compile(&self, syntax_tree: SyntaxTree) -> Arc<Compilation> {
        let compilation = match &self.previous {
            Some(previous) => previous.continue_with(syntax_tree),
            None => Compilation::new(syntax_tree),
        };
        Arc::new(compilation)
    }

    /// Evaluate `compilation` and make it the chain head if it succeeded.
    pub fn run(&mut self, compilation: &Arc<Compilation>) -> Result<EvaluationResult, EvalError> {
        let seed = self
            .options
            .seed
            .map(|seed| seed.wrapping_add(u64::from(compilation.ordinal())));
        let result = compilation.evaluate(&mut self.variables, &mut self.host, seed)?;
        if result.is_success() {
            self.previous = Some(Arc::clone(compilation));
        }
        Ok(result)
    }

    /// Parse, bind and evaluate one fragment of source text.
    pub fn submit(&mut self, text: &str) -> Result<EvaluationResult, EvalError> {
        let compilation = self.compile(SyntaxTree::parse(text));
        self.run(&compilation)
    }

    /// Forget every earlier fragment and every variable value.
    pub fn reset(&mut self) {
        debug!(variables = self.variables.len(), "session reset");
        self.previous = None;
        self.variables.clear();
    }
}
