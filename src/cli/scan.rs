//! Input discovery: files, directories and glob patterns from the command
//! line, filtered by the configured ignore patterns.

use std::{
    collections::HashSet,
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::{Pattern, glob};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::PositionMap;

/// Check if an input contains glob wildcards.
/// Inputs without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}

/// One source file to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInput {
    pub path: PathBuf,
    /// Path used when mirroring into an output directory: relative to the
    /// walked directory for directory inputs, the path itself otherwise.
    pub relative: PathBuf,
}

impl SourceInput {
    pub fn display(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// Where a run reads its sources from.
#[derive(Debug, PartialEq, Eq)]
pub enum Inputs {
    Stdin,
    Files(Vec<SourceInput>),
}

/// Expand command-line inputs into source files.
///
/// No inputs means stdin. Directories are walked recursively and keep only
/// script files; explicit files are taken as they are. Ignore patterns apply
/// to everything found by walking or globbing.
pub fn scan_inputs(inputs: &[String], ignore_patterns: &[String]) -> Result<Inputs> {
    if inputs.is_empty() {
        return Ok(Inputs::Stdin);
    }

    let ignores = ignore_patterns
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("Invalid ignore pattern: \"{}\"", p)))
        .collect::<Result<Vec<_>>>()?;
    let is_ignored = |path: &Path| {
        let path = strip_current_dir(path);
        ignores.iter().any(|p| p.matches_path(path))
    };

    let mut seen = HashSet::new();
    let mut files = Vec::new();
    let mut push = |input: SourceInput| {
        if seen.insert(input.path.clone()) {
            files.push(input);
        }
    };

    for input in inputs {
        let path = Path::new(input);
        if path.is_file() {
            push(SourceInput {
                path: path.to_path_buf(),
                relative: relative_for_file(path),
            });
        } else if path.is_dir() {
            let mut found = Vec::new();
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = match entry {
                    Ok(e) => e,
                    Err(e) => {
                        warn!("Cannot access path: {}", e);
                        continue;
                    }
                };
                let file = entry.path();
                if entry.file_type().is_file() && is_script_file(file) && !is_ignored(file) {
                    found.push(SourceInput {
                        path: file.to_path_buf(),
                        relative: file.strip_prefix(path).unwrap_or(file).to_path_buf(),
                    });
                }
            }
            debug!("{}: {} file(s) found", input, found.len());
            found.into_iter().for_each(&mut push);
        } else if is_glob_pattern(input) {
            let entries =
                glob(input).with_context(|| format!("Invalid glob pattern: \"{}\"", input))?;
            for entry in entries {
                let file = match entry {
                    Ok(file) => file,
                    Err(e) => {
                        warn!("Cannot access path: {}", e);
                        continue;
                    }
                };
                if file.is_file() && !is_ignored(&file) {
                    push(SourceInput {
                        relative: relative_for_file(&file),
                        path: file,
                    });
                }
            }
        } else {
            anyhow::bail!("Input path does not exist: {}", input);
        }
    }

    Ok(Inputs::Files(files))
}

fn is_script_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("js" | "jsx" | "mjs" | "cjs" | "ts" | "tsx" | "mts" | "cts")
    )
}

fn strip_current_dir(path: &Path) -> &Path {
    path.strip_prefix(".").unwrap_or(path)
}

/// Mirror path for an explicitly named file: its normal components only, so
/// `../a.js` or `/abs/a.js` cannot escape the output directory.
fn relative_for_file(path: &Path) -> PathBuf {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

/// Load the position map written next to a source file (`<file>.map`), if any.
///
/// A map that cannot be read or parsed is skipped with a warning.
pub fn read_input_map(path: &Path) -> Option<PositionMap> {
    let mut map_path = path.as_os_str().to_owned();
    map_path.push(".map");
    let map_path = PathBuf::from(map_path);
    if !map_path.is_file() {
        return None;
    }

    let parsed = fs::read_to_string(&map_path)
        .map_err(anyhow::Error::from)
        .and_then(|json| PositionMap::from_json(&json).map_err(anyhow::Error::from));
    match parsed {
        Ok(map) => {
            debug!("{}: using input map", map_path.display());
            Some(map)
        }
        Err(e) => {
            warn!("Ignoring input map {}: {}", map_path.display(), e);
            None
        }
    }
}
