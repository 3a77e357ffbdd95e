//! minnow_compiler: Compilation and session orchestration.
//!
//! A [`Compilation`] is one parsed fragment chained onto the previous one.
//! Its global scope is bound lazily, and evaluation only happens when the
//! fragment and its chain are free of diagnostics. A [`Session`] strings
//! compilations together over a single variable store, the way the REPL does.

mod compilation;
mod session;

pub use compilation::{Compilation, EvaluationResult};
pub use session::Session;
