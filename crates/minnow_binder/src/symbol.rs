//! Symbol definitions: types, variables, parameters and functions.

use lazy_static::lazy_static;
use std::fmt;

// ============================================================================
// Types
// ============================================================================

/// The closed set of static types.
///
/// `Error` is the type of anything that failed to bind; it never takes part
/// in further type errors, so one mistake produces one diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeSymbol {
    Error,
    Bool,
    Int,
    String,
    Void,
}

impl TypeSymbol {
    pub fn name(self) -> &'static str {
        match self {
            TypeSymbol::Error => "?",
            TypeSymbol::Bool => "bool",
            TypeSymbol::Int => "int",
            TypeSymbol::String => "string",
            TypeSymbol::Void => "void",
        }
    }

    /// Resolve a type name usable in conversion-by-call syntax.
    pub fn lookup(name: &str) -> Option<TypeSymbol> {
        match name {
            "bool" => Some(TypeSymbol::Bool),
            "int" => Some(TypeSymbol::Int),
            "string" => Some(TypeSymbol::String),
            _ => None,
        }
    }

    #[inline]
    pub fn is_error(self) -> bool {
        self == TypeSymbol::Error
    }
}

impl fmt::Display for TypeSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Variables
// ============================================================================

/// Identity of a declared variable: the fragment that declared it and the
/// declaration's ordinal within that fragment.
///
/// Ids are derived from position, not from a global counter, so binding the
/// same fragment twice yields equal symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId {
    pub fragment: u32,
    pub index: u32,
}

/// A declared variable. Immutable once created.
///
/// Two variables with the same name declared in different scopes have
/// different ids and are distinct keys in the variable store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableSymbol {
    pub id: SymbolId,
    pub name: String,
    pub is_read_only: bool,
    pub ty: TypeSymbol,
}

impl VariableSymbol {
    pub fn new(id: SymbolId, name: impl Into<String>, is_read_only: bool, ty: TypeSymbol) -> Self {
        Self {
            id,
            name: name.into(),
            is_read_only,
            ty,
        }
    }
}

impl fmt::Display for VariableSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

// ============================================================================
// Functions
// ============================================================================

/// A function parameter, identified by its position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterSymbol {
    pub name: String,
    pub ty: TypeSymbol,
    pub ordinal: usize,
}

impl ParameterSymbol {
    pub fn new(name: impl Into<String>, ty: TypeSymbol, ordinal: usize) -> Self {
        Self {
            name: name.into(),
            ty,
            ordinal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionSymbol {
    pub name: String,
    pub parameters: Vec<ParameterSymbol>,
    pub return_type: TypeSymbol,
}

impl FunctionSymbol {
    pub fn new(name: impl Into<String>, parameters: Vec<ParameterSymbol>, return_type: TypeSymbol) -> Self {
        Self {
            name: name.into(),
            parameters,
            return_type,
        }
    }
}

impl fmt::Display for FunctionSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty))
            .collect();
        write!(f, "{}({}): {}", self.name, params.join(", "), self.return_type)
    }
}

// ============================================================================
// Built-in functions
// ============================================================================

pub mod builtins {
    use super::*;

    lazy_static! {
        /// `read(): string` reads one line of input.
        pub static ref READ: FunctionSymbol = FunctionSymbol::new("read", Vec::new(), TypeSymbol::String);
        /// `write(text: string): void` writes one line of output.
        pub static ref WRITE: FunctionSymbol = FunctionSymbol::new(
            "write",
            vec![ParameterSymbol::new("text", TypeSymbol::String, 0)],
            TypeSymbol::Void,
        );
        /// `rnd(max: int): int` returns a pseudo-random integer in `[0, max)`.
        pub static ref RND: FunctionSymbol = FunctionSymbol::new(
            "rnd",
            vec![ParameterSymbol::new("max", TypeSymbol::Int, 0)],
            TypeSymbol::Int,
        );
    }

    /// Every built-in, in declaration order.
    pub fn all() -> [&'static FunctionSymbol; 3] {
        [&*READ, &*WRITE, &*RND]
    }
}
