//! Expansion engine shared by the inline, extract and lint modes.
//!
//! Per file the pipeline is: parse the host source with swc, walk it
//! children-first with a call matcher, resolve and compile each eligible
//! pattern, then splice the replacements into the original text and hoist
//! any generated functions to the end of the file.
//!
//! ## Modules
//!
//! - `matcher`: decides which calls are expanded
//! - `resolve`, `catalog`, `keys`: translation lookup and catalog keys
//! - `compile`, `pattern`: the compiler bridge and default grammar/codegen
//! - `rewrite`, `print`, `position_map`: inline mode output
//! - `extract`: extract mode
//! - `parsers`: host source and catalog file parsing

pub mod catalog;
pub mod compile;
pub mod context;
pub mod data;
pub mod error;
pub mod extract;
pub mod keys;
pub mod matcher;
pub mod parsers;
pub mod pattern;
pub mod position_map;
pub mod print;
pub mod resolve;
pub mod rewrite;

pub use catalog::{Catalog, CatalogLookup, TranslationLookup};
pub use compile::{CompiledPattern, PatternCompiler};
pub use context::{DEFAULT_FUNCTION_NAME, DEFAULT_LOCALE, Session, TranslationErrorPolicy};
pub use data::{SourceContext, SourceLocation};
pub use error::{CatalogError, InlineError, PatternSyntaxError, PositionMapError};
pub use extract::extract_source;
pub use keys::{KeyNormalizer, KeyStrategy};
pub use matcher::{ArgumentKind, CallMatcher, EligibleCall, FoldedConstants, classify_argument};
pub use position_map::PositionMap;
pub use print::Edit;
pub use resolve::{PatternResolver, Resolution};
pub use rewrite::{InlineOutput, inline_source, inline_source_from};
