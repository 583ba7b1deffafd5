//! Catalog key normalization.
//!
//! Extraction writes catalog entries under `normalize(pattern)` and the
//! translation lookup reads them back with the same function, so both sides
//! must share one strategy per run.

use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::CatalogError;

/// Maximum length of the slug part of `underscored` keys.
const MAX_SLUG_LEN: usize = 50;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Injectable key derivation.
///
/// [`KeyStrategy`] covers the built-in strategies; anything else implementing
/// this trait can be handed to `Session::with_keys`.
pub trait KeyNormalizer: Send + Sync + std::fmt::Debug {
    fn normalize(&self, pattern: &str) -> Result<String, CatalogError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStrategy {
    /// The pattern text itself.
    Literal,
    /// Pattern with whitespace runs collapsed and trimmed.
    Normalized,
    /// Lowercase words joined with `_`.
    Underscored,
    /// Underscored words plus a short content hash.
    #[default]
    #[value(name = "underscored_hash")]
    UnderscoredHash,
}

impl KeyNormalizer for KeyStrategy {
    fn normalize(&self, pattern: &str) -> Result<String, CatalogError> {
        let key = match self {
            KeyStrategy::Literal => pattern.to_string(),
            KeyStrategy::Normalized => normalized(pattern),
            KeyStrategy::Underscored => underscored(pattern),
            KeyStrategy::UnderscoredHash => {
                let slug = underscored(pattern);
                let hash = short_hash(pattern);
                if slug.is_empty() {
                    hash
                } else {
                    format!("{}_{}", slug, hash)
                }
            }
        };

        if key.is_empty() {
            return Err(CatalogError::Key {
                pattern: pattern.to_string(),
            });
        }
        Ok(key)
    }
}

impl std::fmt::Display for KeyStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyStrategy::Literal => write!(f, "literal"),
            KeyStrategy::Normalized => write!(f, "normalized"),
            KeyStrategy::Underscored => write!(f, "underscored"),
            KeyStrategy::UnderscoredHash => write!(f, "underscored_hash"),
        }
    }
}

fn normalized(pattern: &str) -> String {
    WHITESPACE.replace_all(pattern.trim(), " ").into_owned()
}

fn underscored(pattern: &str) -> String {
    let slug = NON_WORD
        .replace_all(&pattern.to_lowercase(), "_")
        .trim_matches('_')
        .to_string();
    match slug.char_indices().nth(MAX_SLUG_LEN) {
        Some((cut, _)) => slug[..cut].trim_end_matches('_').to_string(),
        None => slug,
    }
}

/// First 8 hex digits of the SHA-256 of the pattern.
fn short_hash(pattern: &str) -> String {
    let digest = Sha256::digest(pattern.as_bytes());
    digest[..4].iter().map(|b| format!("{:02x}", b)).collect()
}
