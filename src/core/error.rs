//! Typed errors raised by the expansion engine.
//!
//! Mode drivers wrap these in `anyhow::Error`; the lint rules turn them into
//! positioned issues instead of propagating them.

use thiserror::Error;

use crate::core::SourceLocation;

/// A pattern failed to parse in the message grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (at offset {offset})")]
pub struct PatternSyntaxError {
    /// Human-readable description from the grammar engine.
    pub message: String,
    /// Byte offset into the pattern where parsing stopped.
    pub offset: usize,
}

impl PatternSyntaxError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

/// Errors that abort a single file's pass in inline or extract mode.
#[derive(Debug, Error)]
pub enum InlineError {
    /// The host source file could not be parsed.
    #[error("{file_path}: failed to parse source: {message}")]
    SourceParse { file_path: String, message: String },

    /// A call's raw pattern is not valid message syntax.
    #[error("{location}: invalid message pattern {pattern:?}: {source}")]
    PatternSyntax {
        location: SourceLocation,
        pattern: String,
        #[source]
        source: PatternSyntaxError,
    },

    /// A translated pattern is not valid message syntax and the session is
    /// configured to fail on broken translations.
    #[error("{location}: invalid {locale} translation {translation:?}: {source}")]
    TranslationSyntax {
        location: SourceLocation,
        locale: String,
        translation: String,
        #[source]
        source: PatternSyntaxError,
    },

    /// The translation lookup or key derivation failed.
    #[error("{location}: {source}")]
    Catalog {
        location: SourceLocation,
        #[source]
        source: CatalogError,
    },

    /// Hoisted functions did not parse back as top-level statements.
    #[error("{file_path}: generated code failed to parse: {message}")]
    GeneratedCode { file_path: String, message: String },
}

/// Errors from loading or querying a translation catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog {path}: locale {locale:?} must map keys to strings")]
    Shape { path: String, locale: String },

    #[error("cannot derive a catalog key for {pattern:?}")]
    Key { pattern: String },
}

/// Errors from reading a source map document.
#[derive(Debug, Error)]
pub enum PositionMapError {
    #[error("invalid source map JSON")]
    Json(#[from] serde_json::Error),

    #[error("unsupported source map version {0}")]
    Version(u32),

    #[error("invalid source map mappings: {0}")]
    Mappings(String),
}
