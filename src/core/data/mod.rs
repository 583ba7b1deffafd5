//! Core data types shared by every mode.
//!
//! - `source`: Source code location types (SourceContext, SourceLocation)

pub mod source;

pub use source::{SourceContext, SourceLocation};
