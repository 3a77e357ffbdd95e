//! minnow_evaluator: Tree-walking execution of bound programs.
//!
//! The evaluator runs a bound statement against a mutable variable store and
//! reports the last value computed. Input and output go through a [`Host`],
//! so programs can run against the terminal or an in-memory buffer.

mod error;
mod evaluator;
mod host;

pub use error::EvalError;
pub use evaluator::{convert, Evaluator, Variables};
pub use host::{Host, MemoryHost, StdHost};
