//! msginline - compile-time expansion of `format()` message calls
//!
//! msginline rewrites JavaScript and TypeScript sources so that calls such as
//! `format('Hello {name}', { name })` are replaced by a string constant or by
//! a call to a small generated function, with translations from a catalog
//! applied at build time. It can also extract every pattern into a catalog
//! and lint call sites that cannot be expanded.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (inline, extract, lint, init)
//! - `config`: Configuration file loading and parsing
//! - `core`: Expansion engine (matcher, resolver, compiler bridge, rewriter)
//! - `issues`: Lint diagnostic types and reporting
//! - `rules`: Lint checks
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
pub mod utils;
