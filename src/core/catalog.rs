//! Translation catalog and lookup.
//!
//! A catalog maps `locale -> key -> pattern`. Extraction produces one per
//! file and merges them; inline and lint consume one through
//! [`TranslationLookup`].

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{CatalogError, KeyNormalizer};

/// Entries for a single locale, sorted by key.
pub type LocaleEntries = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    locales: BTreeMap<String, LocaleEntries>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, locale: &str, key: String, pattern: String) {
        self.locales
            .entry(locale.to_string())
            .or_default()
            .insert(key, pattern);
    }

    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        self.locales
            .get(locale)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// Total number of entries across all locales.
    pub fn len(&self) -> usize {
        self.locales.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merge another catalog into this one.
    ///
    /// Keys derive from pattern content, so the same key from two files
    /// carries the same text and the merge order does not matter.
    pub fn merge(&mut self, other: Catalog) {
        for (locale, entries) in other.locales {
            self.locales.entry(locale).or_default().extend(entries);
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Source of translated patterns, keyed by raw pattern and locale.
pub trait TranslationLookup: Send + Sync {
    fn lookup(&self, pattern: &str, locale: &str) -> Result<Option<String>, CatalogError>;
}

impl<F> TranslationLookup for F
where
    F: Fn(&str, &str) -> Option<String> + Send + Sync,
{
    fn lookup(&self, pattern: &str, locale: &str) -> Result<Option<String>, CatalogError> {
        Ok(self(pattern, locale))
    }
}

/// Looks patterns up in a loaded catalog under their normalized key.
#[derive(Debug, Clone)]
pub struct CatalogLookup {
    catalog: Catalog,
    keys: Arc<dyn KeyNormalizer>,
}

impl CatalogLookup {
    pub fn new(catalog: Catalog, keys: Arc<dyn KeyNormalizer>) -> Self {
        Self { catalog, keys }
    }
}

impl TranslationLookup for CatalogLookup {
    fn lookup(&self, pattern: &str, locale: &str) -> Result<Option<String>, CatalogError> {
        let key = self.keys.normalize(pattern)?;
        Ok(self.catalog.get(locale, &key).map(str::to_owned))
    }
}
