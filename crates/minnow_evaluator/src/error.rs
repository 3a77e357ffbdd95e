//! Evaluation errors.
//!
//! A program that bound without diagnostics can still fail at run time,
//! for example by dividing by zero or converting `"abc"` to `int`. Each
//! failure aborts the current evaluation.

/// Fatal failure of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("variable `{name}` was read before it was assigned")]
    UnassignedVariable { name: String },

    #[error("expected a value of type `{expected}` but found `{actual}`")]
    TypeMismatch { expected: &'static str, actual: &'static str },

    #[error("cannot convert {value:?} to `{target}`")]
    InvalidConversion { value: String, target: &'static str },

    #[error("division by zero")]
    DivisionByZero,

    #[error("`rnd` bound must not be negative, got {max}")]
    NegativeRandomBound { max: i64 },

    #[error("evaluation reached a node that failed to bind")]
    ErrorNodeReached,

    #[error("unknown function `{name}`")]
    UnknownFunction { name: String },
}
