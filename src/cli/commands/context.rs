//! Shared setup for the file-processing commands: configuration, session
//! and input discovery.

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::debug;

use super::FileFailure;
use crate::{
    cli::{
        args::CommonArgs,
        scan::{Inputs, SourceInput, scan_inputs},
    },
    config::{CONFIG_FILE_NAME, ConfigLoadResult, load_config},
    core::{CatalogLookup, Session, TranslationErrorPolicy, parsers::catalog::parse_catalog_file},
};

/// Display name for source read from standard input.
pub const STDIN_NAME: &str = "<stdin>";

/// One source text ready for processing.
#[derive(Debug)]
pub struct SourceText {
    /// Name used in messages and position maps.
    pub name: String,
    /// `None` for stdin.
    pub input: Option<SourceInput>,
    pub code: String,
}

/// Configuration, session and inputs for one run.
pub struct RunContext {
    pub session: Session,
    pub inputs: Inputs,
    pub verbose: bool,
}

impl RunContext {
    /// Build a context from command-line args and the discovered config file.
    ///
    /// Priority for every option: command line, then config file, then
    /// built-in defaults.
    pub fn new(args: &CommonArgs, policy: Option<TranslationErrorPolicy>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let loaded = load_config(&cwd)?;
        match &loaded.path {
            Some(path) => debug!("Using config {}", path.display()),
            None => debug!("No {} found, using default configuration", CONFIG_FILE_NAME),
        }

        let session = build_session(args, &loaded, policy)?;
        let inputs = scan_inputs(&args.inputs, &loaded.config.ignores)?;

        Ok(Self {
            session,
            inputs,
            verbose: args.verbose,
        })
    }

    /// Run `process` over every input, in parallel for files.
    ///
    /// Results come back in input order. Files that cannot be read become
    /// failures without reaching `process`.
    pub fn process_sources<T, F>(&self, process: F) -> Result<Vec<Result<T, FileFailure>>>
    where
        T: Send,
        F: Fn(&Session, &SourceText) -> Result<T, FileFailure> + Sync,
    {
        match &self.inputs {
            Inputs::Stdin => Ok(vec![process(&self.session, &read_stdin()?)]),
            Inputs::Files(files) => Ok(files
                .par_iter()
                .map(|input| {
                    let source = read_source(input)?;
                    process(&self.session, &source)
                })
                .collect()),
        }
    }

    /// Run `process` over every input one at a time, in input order, so it
    /// can carry state from one file to the next.
    pub fn process_sources_in_order<T, F>(
        &self,
        mut process: F,
    ) -> Result<Vec<Result<T, FileFailure>>>
    where
        F: FnMut(&Session, &SourceText) -> Result<T, FileFailure>,
    {
        match &self.inputs {
            Inputs::Stdin => Ok(vec![process(&self.session, &read_stdin()?)]),
            Inputs::Files(files) => Ok(files
                .iter()
                .map(|input| {
                    let source = read_source(input)?;
                    process(&self.session, &source)
                })
                .collect()),
        }
    }
}

fn read_stdin() -> Result<SourceText> {
    let mut code = String::new();
    io::stdin()
        .read_to_string(&mut code)
        .context("Failed to read stdin")?;
    Ok(SourceText {
        name: STDIN_NAME.to_string(),
        input: None,
        code,
    })
}

fn read_source(input: &SourceInput) -> Result<SourceText, FileFailure> {
    let name = input.display();
    match fs::read_to_string(&input.path) {
        Ok(code) => Ok(SourceText {
            name,
            input: Some(input.clone()),
            code,
        }),
        Err(e) => Err(FileFailure {
            message: format!("{}: failed to read file: {}", name, e),
            file_path: name,
        }),
    }
}

fn build_session(
    args: &CommonArgs,
    loaded: &ConfigLoadResult,
    policy: Option<TranslationErrorPolicy>,
) -> Result<Session> {
    let config = &loaded.config;
    let function_name = args
        .function_name
        .clone()
        .unwrap_or_else(|| config.function_name.clone());
    if function_name.is_empty() {
        anyhow::bail!("Function name must not be empty");
    }
    let locale = args.locale.clone().unwrap_or_else(|| config.locale.clone());
    let keys = args.key_type.unwrap_or(config.key_type);
    let policy = policy.unwrap_or(config.on_invalid_translation);

    let mut session = Session::new(function_name, locale)
        .with_keys(keys)
        .with_translation_policy(policy);

    let translations: Option<PathBuf> = args
        .translations
        .clone()
        .or_else(|| loaded.translations_path());
    if let Some(path) = translations {
        let catalog = load_catalog(&path)?;
        let lookup = CatalogLookup::new(catalog, Arc::clone(&session.keys));
        session = session.with_lookup(Arc::new(lookup));
    }

    debug!(
        "function={} locale={} keys={:?} on_invalid_translation={}",
        session.function_name, session.locale, session.keys, session.on_invalid_translation
    );
    Ok(session)
}

fn load_catalog(path: &Path) -> Result<crate::core::Catalog> {
    let catalog = parse_catalog_file(path)?;
    debug!(
        "Loaded {} translation(s) from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}
