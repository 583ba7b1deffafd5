use std::{
    fs,
    io::{self, Write},
};

use anyhow::{Context, Result};

use super::{
    CommandResult, CommandSummary, ExtractSummary, FileFailure,
    context::{RunContext, SourceText},
    helper::finish,
};
use crate::{
    cli::args::ExtractCommand,
    core::{Catalog, Session, extract_source},
};

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let ctx = RunContext::new(&cmd.common, None)?;
    let results = ctx.process_sources(extract_file)?;
    let files_processed = results.len();

    let mut catalog = Catalog::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(file_catalog) => catalog.merge(file_catalog),
            Err(failure) => failures.push(failure),
        }
    }

    let mut json = catalog
        .to_json_pretty()
        .context("Failed to serialize catalog")?;
    json.push('\n');

    let written = match &cmd.out_file {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
            fs::write(path, &json)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            Some(path.clone())
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(json.as_bytes())
                .and_then(|_| stdout.flush())
                .context("Failed to write to stdout")?;
            None
        }
    };

    let summary = ExtractSummary {
        entry_count: catalog.len(),
        written,
    };
    Ok(finish(
        CommandSummary::Extract(summary),
        Vec::new(),
        failures,
        files_processed,
    ))
}

fn extract_file(session: &Session, source: &SourceText) -> Result<Catalog, FileFailure> {
    extract_source(session, &source.code, &source.name).map_err(|e| FileFailure {
        file_path: source.name.clone(),
        message: e.to_string(),
    })
}
