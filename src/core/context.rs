use std::sync::Arc;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::{KeyNormalizer, KeyStrategy, PatternCompiler, PatternResolver, TranslationLookup};

/// Host function name matched when nothing else is configured.
pub const DEFAULT_FUNCTION_NAME: &str = "format";

/// Locale used when a call does not name one.
pub const DEFAULT_LOCALE: &str = "en";

/// What inline mode does when a translation fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TranslationErrorPolicy {
    /// Log a warning and compile the raw pattern instead.
    #[default]
    Fallback,
    /// Abort the file with an error.
    Error,
}

impl std::fmt::Display for TranslationErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslationErrorPolicy::Fallback => write!(f, "fallback"),
            TranslationErrorPolicy::Error => write!(f, "error"),
        }
    }
}

/// Settings shared by every file processed in one run.
///
/// A session is read-only once built, so files can be processed in parallel
/// against the same instance. Per-file state (the hoisted functions and
/// their counter) lives in the rewrite pass, never here.
#[derive(Debug)]
pub struct Session {
    /// Name of the host function whose calls are expanded.
    pub function_name: String,
    /// Locale for calls without a literal locale argument.
    pub locale: String,
    /// Key derivation shared by extraction and lookup.
    pub keys: Arc<dyn KeyNormalizer>,
    pub resolver: PatternResolver,
    pub compiler: PatternCompiler,
    pub on_invalid_translation: TranslationErrorPolicy,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_FUNCTION_NAME, DEFAULT_LOCALE)
    }
}

impl Session {
    pub fn new(function_name: impl Into<String>, locale: impl Into<String>) -> Self {
        let function_name = function_name.into();
        Self {
            compiler: PatternCompiler::new(function_name.clone()),
            function_name,
            locale: locale.into(),
            keys: Arc::new(KeyStrategy::default()),
            resolver: PatternResolver::default(),
            on_invalid_translation: TranslationErrorPolicy::default(),
        }
    }

    pub fn with_keys(mut self, keys: impl KeyNormalizer + 'static) -> Self {
        self.keys = Arc::new(keys);
        self
    }

    pub fn with_lookup(mut self, lookup: Arc<dyn TranslationLookup>) -> Self {
        self.resolver = PatternResolver::new(Some(lookup));
        self
    }

    pub fn with_translation_policy(mut self, policy: TranslationErrorPolicy) -> Self {
        self.on_invalid_translation = policy;
        self
    }

    /// The locale a call compiles for: its literal argument when present
    /// and non-empty, otherwise the session locale.
    pub fn effective_locale<'a>(&'a self, call_locale: Option<&'a str>) -> &'a str {
        match call_locale {
            Some(locale) if !locale.is_empty() => locale,
            _ => &self.locale,
        }
    }
}
