//! Conversion classification between static types.

use crate::symbol::TypeSymbol;

/// How a value of one type can become a value of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// No conversion exists.
    None,
    /// Source and target are the same type.
    Identity,
    /// Allowed only when written out as `type(expression)`.
    Explicit,
}

impl Conversion {
    pub fn classify(from: TypeSymbol, to: TypeSymbol) -> Conversion {
        use TypeSymbol::*;

        if from == to {
            return Conversion::Identity;
        }
        match (from, to) {
            (Int, String) | (Bool, String) | (String, Int) | (String, Bool) => Conversion::Explicit,
            _ => Conversion::None,
        }
    }

    #[inline]
    pub fn exists(self) -> bool {
        self != Conversion::None
    }

    #[inline]
    pub fn is_identity(self) -> bool {
        self == Conversion::Identity
    }
}
