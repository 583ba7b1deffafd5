//! Pattern resolution: which pattern text a call actually compiles.
//!
//! Resolution never fails because a translation is missing. Missing entries
//! fall back to the raw pattern and are only surfaced by lint.

use std::sync::Arc;

use crate::core::{CatalogError, TranslationLookup};

/// Result of resolving a raw pattern for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No translation lookup is configured.
    Untranslated,
    /// A lookup is configured but has no entry for this locale.
    Missing,
    /// The lookup supplied this pattern.
    Translated(String),
}

#[derive(Clone, Default)]
pub struct PatternResolver {
    lookup: Option<Arc<dyn TranslationLookup>>,
}

impl std::fmt::Debug for PatternResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternResolver")
            .field("has_lookup", &self.lookup.is_some())
            .finish()
    }
}

impl PatternResolver {
    pub fn new(lookup: Option<Arc<dyn TranslationLookup>>) -> Self {
        Self { lookup }
    }

    pub fn has_lookup(&self) -> bool {
        self.lookup.is_some()
    }

    pub fn resolve(&self, raw: &str, locale: &str) -> Result<Resolution, CatalogError> {
        let Some(lookup) = &self.lookup else {
            return Ok(Resolution::Untranslated);
        };
        Ok(match lookup.lookup(raw, locale)? {
            Some(translation) => Resolution::Translated(translation),
            None => Resolution::Missing,
        })
    }
}
