//! Message grammar and code generation collaborators.
//!
//! The compiler bridge only depends on the two traits below. The default
//! implementations cover the ICU MessageFormat subset used by `format()`
//! calls: arguments, number/date/time, plural, selectordinal and select.

pub mod ast;
pub mod codegen;
pub mod parser;

pub use ast::{Element, Pattern};
pub use codegen::JsCodeGenerator;
pub use parser::{MessageParser, parse_pattern};

use crate::core::PatternSyntaxError;

/// Parses pattern text into a pattern AST.
pub trait PatternParser: Send + Sync {
    fn parse(&self, pattern: &str) -> Result<Pattern, PatternSyntaxError>;
}

/// Metadata threaded through to the code generator.
#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions<'a> {
    pub locale: &'a str,
    /// Name of the call being replaced, e.g. `format`.
    pub host_function_name: &'a str,
    /// Name the generated function must be declared with.
    pub function_name: &'a str,
}

/// Turns a pattern AST into the source text of a function declaration.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self, pattern: &Pattern, options: &GenerateOptions<'_>) -> String;
}
