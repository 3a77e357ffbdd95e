//! Scope management for the binder.
//!
//! Scopes form a chain from the root (seeded with the built-in functions)
//! out to the innermost block. The chain is a stack: entering a block pushes
//! a scope, leaving it pops the scope and discards everything declared there.

use crate::symbol::{builtins, FunctionSymbol, SymbolId, TypeSymbol, VariableSymbol};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::trace;

/// One lexical scope: names declared directly in it.
#[derive(Debug, Clone, Default)]
pub struct BoundScope {
    /// Variables in declaration order.
    variables: IndexMap<String, VariableSymbol>,
    functions: FxHashMap<String, FunctionSymbol>,
}

impl BoundScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// The root scope, holding every built-in function.
    pub fn with_builtins() -> Self {
        let mut scope = Self::new();
        for function in builtins::all() {
            scope.try_declare_function(function.clone());
        }
        scope
    }

    /// Declare a variable; fails if the name is already declared here.
    pub fn try_declare_variable(&mut self, variable: VariableSymbol) -> bool {
        if self.variables.contains_key(&variable.name) {
            return false;
        }
        self.variables.insert(variable.name.clone(), variable);
        true
    }

    pub fn try_declare_function(&mut self, function: FunctionSymbol) -> bool {
        if self.functions.contains_key(&function.name) {
            return false;
        }
        self.functions.insert(function.name.clone(), function);
        true
    }

    pub fn variable(&self, name: &str) -> Option<&VariableSymbol> {
        self.variables.get(name)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionSymbol> {
        self.functions.get(name)
    }

    /// Variables declared directly in this scope, in declaration order.
    pub fn declared_variables(&self) -> Vec<VariableSymbol> {
        self.variables.values().cloned().collect()
    }
}

/// Returned by [`ScopeChain::declare`] when the name is taken in the
/// innermost scope. Carries the fresh symbol that was not entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlreadyDeclared {
    pub variable: VariableSymbol,
}

/// The chain of scopes visible at the binder's current position.
#[derive(Debug, Clone)]
pub struct ScopeChain {
    /// Outermost first; never empty.
    scopes: Vec<BoundScope>,
    /// Ordinal of the fragment being bound, stamped into new symbol ids.
    fragment: u32,
    next_index: u32,
}

impl ScopeChain {
    /// A chain holding only the root scope.
    pub fn new(fragment: u32) -> Self {
        Self {
            scopes: vec![BoundScope::with_builtins()],
            fragment,
            next_index: 0,
        }
    }

    /// Number of scopes in the chain, root included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn push(&mut self) {
        self.scopes.push(BoundScope::new());
        trace!(depth = self.scopes.len(), "push scope");
    }

    /// Leave the innermost scope. The root scope is never popped.
    pub fn pop(&mut self) -> Option<BoundScope> {
        if self.scopes.len() == 1 {
            return None;
        }
        let scope = self.scopes.pop();
        trace!(depth = self.scopes.len(), "pop scope");
        scope
    }

    /// The innermost scope.
    pub fn current(&self) -> &BoundScope {
        // `scopes` always holds the root
        &self.scopes[self.scopes.len() - 1]
    }

    fn current_mut(&mut self) -> &mut BoundScope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// Declare a new variable in the innermost scope.
    pub fn declare(&mut self, name: &str, is_read_only: bool, ty: TypeSymbol) -> Result<VariableSymbol, AlreadyDeclared> {
        let id = SymbolId {
            fragment: self.fragment,
            index: self.next_index,
        };
        self.next_index += 1;

        let variable = VariableSymbol::new(id, name, is_read_only, ty);
        if self.current_mut().try_declare_variable(variable.clone()) {
            trace!(name, ty = %ty, read_only = is_read_only, "declare variable");
            Ok(variable)
        } else {
            Err(AlreadyDeclared { variable })
        }
    }

    /// Enter an existing symbol (from an earlier fragment) into the innermost scope.
    pub fn import(&mut self, variable: VariableSymbol) -> bool {
        self.current_mut().try_declare_variable(variable)
    }

    /// Resolve a variable, innermost scope first.
    pub fn lookup_variable(&self, name: &str) -> Option<&VariableSymbol> {
        self.scopes.iter().rev().find_map(|scope| scope.variable(name))
    }

    /// Resolve a function, innermost scope first.
    pub fn lookup_function(&self, name: &str) -> Option<&FunctionSymbol> {
        self.scopes.iter().rev().find_map(|scope| scope.function(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_has_builtins() {
        let chain = ScopeChain::new(0);
        assert!(chain.lookup_function("read").is_some());
        assert!(chain.lookup_function("write").is_some());
        assert!(chain.lookup_function("rnd").is_some());
        assert!(chain.lookup_function("print").is_none());
    }

    #[test]
    fn test_redeclare_in_same_scope_fails() {
        let mut chain = ScopeChain::new(0);
        chain.push();
        let first = chain.declare("x", true, TypeSymbol::Int).unwrap();
        let second = chain.declare("x", false, TypeSymbol::Bool).unwrap_err();
        assert_ne!(first.id, second.variable.id);
        assert_eq!(chain.lookup_variable("x"), Some(&first));
    }

    #[test]
    fn test_shadowing_in_nested_scope() {
        let mut chain = ScopeChain::new(0);
        chain.push();
        let outer = chain.declare("x", true, TypeSymbol::Int).unwrap();
        chain.push();
        let inner = chain.declare("x", true, TypeSymbol::String).unwrap();
        assert_eq!(chain.lookup_variable("x"), Some(&inner));
        chain.pop();
        assert_eq!(chain.lookup_variable("x"), Some(&outer));
    }

    #[test]
    fn test_root_is_never_popped() {
        let mut chain = ScopeChain::new(0);
        assert!(chain.pop().is_none());
        assert_eq!(chain.depth(), 1);
    }

    #[test]
    fn test_declared_variables_keep_order() {
        let mut scope = BoundScope::new();
        for (i, name) in ["b", "a", "c"].iter().enumerate() {
            let id = SymbolId { fragment: 0, index: i as u32 };
            assert!(scope.try_declare_variable(VariableSymbol::new(id, *name, false, TypeSymbol::Int)));
        }
        let names: Vec<_> = scope.declared_variables().into_iter().map(|v| v.name).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }
}
