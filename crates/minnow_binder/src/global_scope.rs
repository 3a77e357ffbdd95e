//! Global scope snapshots for incremental sessions.
//!
//! Each fragment bound in a session produces one immutable
//! [`BoundGlobalScope`] pointing at the snapshot before it. Binding the next
//! fragment replays that chain into a fresh [`ScopeChain`]: the root holds the
//! built-ins, then one layer per earlier fragment (oldest first), then a new
//! scope for the fragment itself.

use crate::binder::Binder;
use crate::bound::BoundStatement;
use crate::scope::ScopeChain;
use crate::symbol::VariableSymbol;
use minnow_ast::node::CompilationUnit;
use minnow_diagnostics::Diagnostic;
use std::sync::Arc;
use tracing::debug;

/// The immutable result of binding one fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundGlobalScope {
    /// The snapshot of the fragment before this one.
    pub previous: Option<Arc<BoundGlobalScope>>,
    /// Position of this fragment in its chain, starting at zero.
    pub ordinal: u32,
    /// Binding diagnostics of every earlier fragment, then of this one.
    pub diagnostics: Vec<Diagnostic>,
    /// Variables declared at the top level of this fragment, in order.
    pub variables: Vec<VariableSymbol>,
    /// The bound top-level statement.
    pub statement: BoundStatement,
}

impl BoundGlobalScope {
    /// Iterate over this snapshot and every earlier one, newest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &BoundGlobalScope> {
        std::iter::successors(Some(self), |scope| scope.previous.as_deref())
    }
}

/// Bind `unit` on top of `previous`. Pure: equal inputs give equal snapshots.
pub fn bind_global_scope(previous: Option<Arc<BoundGlobalScope>>, unit: &CompilationUnit) -> BoundGlobalScope {
    let ordinal = previous.as_ref().map_or(0, |p| p.ordinal + 1);
    let mut scopes = create_parent_scopes(previous.as_deref(), ordinal);
    scopes.push();

    let mut binder = Binder::new(scopes);
    let statement = binder.bind_statement(&unit.statement);
    let variables = binder.scopes().current().declared_variables();

    let mut diagnostics: Vec<Diagnostic> = previous
        .as_ref()
        .map(|p| p.diagnostics.clone())
        .unwrap_or_default();
    diagnostics.extend(binder.take_diagnostics());

    debug!(
        fragment = ordinal,
        variables = variables.len(),
        diagnostics = diagnostics.len(),
        "bound global scope"
    );

    BoundGlobalScope {
        previous,
        ordinal,
        diagnostics,
        variables,
        statement,
    }
}

/// Rebuild the scope chain visible to fragment `ordinal`.
fn create_parent_scopes(previous: Option<&BoundGlobalScope>, ordinal: u32) -> ScopeChain {
    let mut chain = ScopeChain::new(ordinal);
    let mut snapshots: Vec<&BoundGlobalScope> = previous.map(|p| p.ancestors().collect()).unwrap_or_default();
    snapshots.reverse();

    for snapshot in snapshots {
        chain.push();
        for variable in &snapshot.variables {
            chain.import(variable.clone());
        }
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use minnow_parser::SyntaxTree;

    fn chain(sources: &[&str]) -> Arc<BoundGlobalScope> {
        let mut previous = None;
        for source in sources {
            let tree = SyntaxTree::parse(source);
            previous = Some(Arc::new(bind_global_scope(previous, &tree.root)));
        }
        previous.expect("at least one fragment")
    }

    #[test]
    fn test_ordinals_count_fragments() {
        let scope = chain(&["let a = 1", "let b = 2", "a + b"]);
        let ordinals: Vec<u32> = scope.ancestors().map(|s| s.ordinal).collect();
        assert_eq!(ordinals, vec![2, 1, 0]);
    }

    #[test]
    fn test_block_locals_are_not_exported() {
        let scope = chain(&["{ let hidden = 1 }"]);
        assert!(scope.variables.is_empty());
        let scope = chain(&["var shown = 1"]);
        assert_eq!(scope.variables.len(), 1);
        assert_eq!(scope.variables[0].name, "shown");
    }

    #[test]
    fn test_previous_diagnostics_are_prepended() {
        let scope = chain(&["x", "y"]);
        let names: Vec<&str> = scope.diagnostics.iter().map(|d| d.message_text.as_str()).collect();
        assert_eq!(names, vec!["Variable 'x' doesn't exist.", "Variable 'y' doesn't exist."]);
    }
}
