use std::{fs, path::Path};

use serde_json::Value;

use crate::core::{Catalog, CatalogError};

/// Load a translation catalog of the form `{ "<locale>": { "<key>": "<pattern>" } }`.
pub fn parse_catalog_file(path: &Path) -> Result<Catalog, CatalogError> {
    let display = path.to_string_lossy().to_string();
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: display.clone(),
        source,
    })?;
    parse_catalog_str(&content, &display)
}

pub fn parse_catalog_str(content: &str, path: &str) -> Result<Catalog, CatalogError> {
    let json: Value = serde_json::from_str(content).map_err(|source| CatalogError::Parse {
        path: path.to_string(),
        source,
    })?;

    let Value::Object(locales) = json else {
        return Err(CatalogError::Shape {
            path: path.to_string(),
            locale: String::new(),
        });
    };

    let mut catalog = Catalog::new();
    for (locale, entries) in locales {
        let shape_error = || CatalogError::Shape {
            path: path.to_string(),
            locale: locale.clone(),
        };
        let Value::Object(entries) = entries else {
            return Err(shape_error());
        };
        for (key, pattern) in entries {
            let Value::String(pattern) = pattern else {
                return Err(shape_error());
            };
            catalog.insert(&locale, key, pattern);
        }
    }
    Ok(catalog)
}
