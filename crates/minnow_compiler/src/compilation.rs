//! One fragment of a session, chained onto the fragment before it.

use minnow_binder::{bind_global_scope, BoundGlobalScope};
use minnow_core::Value;
use minnow_diagnostics::Diagnostic;
use minnow_evaluator::{EvalError, Evaluator, Host, Variables};
use minnow_parser::SyntaxTree;
use serde::Serialize;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// What evaluating a fragment produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    /// Parse diagnostics, then binding diagnostics of the whole chain.
    pub diagnostics: Vec<Diagnostic>,
    /// The last value computed, absent when diagnostics stopped evaluation.
    pub value: Option<Value>,
}

impl EvaluationResult {
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// A parsed fragment plus the lazily bound global scope for it.
#[derive(Debug)]
pub struct Compilation {
    previous: Option<Arc<Compilation>>,
    syntax_tree: Arc<SyntaxTree>,
    global_scope: OnceLock<Arc<BoundGlobalScope>>,
}

impl Compilation {
    /// Start a new chain with `syntax_tree` as its first fragment.
    pub fn new(syntax_tree: SyntaxTree) -> Self {
        Self::with_previous(None, syntax_tree)
    }

    fn with_previous(previous: Option<Arc<Compilation>>, syntax_tree: SyntaxTree) -> Self {
        Self {
            previous,
            syntax_tree: Arc::new(syntax_tree),
            global_scope: OnceLock::new(),
        }
    }

    /// Chain `syntax_tree` onto this compilation. Its variables stay visible.
    pub fn continue_with(self: &Arc<Self>, syntax_tree: SyntaxTree) -> Compilation {
        Self::with_previous(Some(Arc::clone(self)), syntax_tree)
    }

    pub fn previous(&self) -> Option<&Arc<Compilation>> {
        self.previous.as_ref()
    }

    pub fn syntax_tree(&self) -> &SyntaxTree {
        &self.syntax_tree
    }

    /// The bound global scope, computed on first access.
    ///
    /// Binding is a pure function of the previous scope and the syntax tree,
    /// so every caller observes the same published snapshot.
    pub fn global_scope(&self) -> &Arc<BoundGlobalScope> {
        self.global_scope.get_or_init(|| {
            let previous = self.previous.as_ref().map(|p| Arc::clone(p.global_scope()));
            Arc::new(bind_global_scope(previous, &self.syntax_tree.root))
        })
    }

    /// Position of this fragment in its chain, starting at zero.
    pub fn ordinal(&self) -> u32 {
        self.previous.as_ref().map_or(0, |p| p.ordinal() + 1)
    }

    /// Parse diagnostics of this fragment followed by every binding
    /// diagnostic in the chain.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = self.syntax_tree.diagnostics.clone();
        diagnostics.extend(self.global_scope().diagnostics.iter().cloned());
        diagnostics
    }

    /// Evaluate this fragment against `variables`.
    ///
    /// Nothing runs, and `variables` is untouched, when there is any
    /// diagnostic. An `EvalError` aborts the fragment; assignments made
    /// before the failure remain.
    pub fn evaluate(
        &self,
        variables: &mut Variables,
        host: &mut dyn Host,
        seed: Option<u64>,
    ) -> Result<EvaluationResult, EvalError> {
        let diagnostics = self.diagnostics();
        if !diagnostics.is_empty() {
            debug!(
                fragment = self.ordinal(),
                diagnostics = diagnostics.len(),
                "evaluation gated by diagnostics"
            );
            return Ok(EvaluationResult {
                diagnostics,
                value: None,
            });
        }

        let global_scope = self.global_scope();
        let value = Evaluator::new(&global_scope.statement, variables, host)
            .with_seed(seed)
            .evaluate()?;
        debug!(fragment = self.ordinal(), has_value = value.is_some(), "evaluation complete");

        Ok(EvaluationResult { diagnostics, value })
    }
}
