//! minnow_binder: Name resolution, type checking and the bound tree.
//!
//! The binder turns a syntax tree into a typed bound tree against a chain of
//! scopes, reporting every semantic problem as a diagnostic. Fragments of an
//! incremental session chain through immutable [`BoundGlobalScope`] snapshots.

mod binder;
pub mod bound;
mod conversion;
mod global_scope;
mod operators;
mod scope;
mod symbol;

pub use binder::Binder;
pub use conversion::Conversion;
pub use global_scope::{bind_global_scope, BoundGlobalScope};
pub use operators::{BoundBinaryOperator, BoundBinaryOperatorKind, BoundUnaryOperator, BoundUnaryOperatorKind};
pub use scope::{AlreadyDeclared, BoundScope, ScopeChain};
pub use symbol::{builtins, FunctionSymbol, ParameterSymbol, SymbolId, TypeSymbol, VariableSymbol};
