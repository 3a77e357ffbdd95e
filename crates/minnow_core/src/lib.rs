//! minnow_core: Core utilities shared by every stage of the minnow pipeline.
//!
//! Provides text spans, line mapping, and the host-native runtime value type.

pub mod text;
pub mod value;

// Re-export commonly used types
pub use text::{LineAndColumn, LineMap, TextSpan};
pub use value::Value;
