//! File parsers for host sources and translation catalogs.
//!
//! - `catalog`: translation catalog JSON files
//! - `js`: JavaScript/TypeScript source files (uses swc for AST generation)

pub mod catalog;
pub mod js;
