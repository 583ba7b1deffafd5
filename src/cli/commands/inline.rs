use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::warn;

use super::{
    CommandResult, CommandSummary, FileFailure, InlineSummary,
    context::{RunContext, SourceText},
    helper::finish,
};
use crate::{
    cli::{
        args::{InlineCommand, SourceMapMode},
        scan::{Inputs, read_input_map},
    },
    core::{
        InlineOutput, PositionMap, Session, inline_source_from,
        position_map::source_mapping_url_comment, print::line_starts,
    },
};

/// Where inline output goes.
enum OutputTarget<'a> {
    Stdout,
    File(&'a Path),
    Dir(&'a Path),
}

/// Inlined output of one file.
struct Inlined {
    name: String,
    relative: Option<PathBuf>,
    output: InlineOutput,
}

pub fn inline(cmd: InlineCommand) -> Result<CommandResult> {
    let ctx = RunContext::new(&cmd.common, cmd.on_invalid_translation)?;
    let target = match (&cmd.out_file, &cmd.out_dir) {
        (Some(file), _) => OutputTarget::File(file),
        (None, Some(dir)) => OutputTarget::Dir(dir),
        (None, None) => OutputTarget::Stdout,
    };
    if matches!(target, OutputTarget::Dir(_)) && ctx.inputs == Inputs::Stdin {
        anyhow::bail!("--out-dir requires input files");
    }
    if matches!(target, OutputTarget::Stdout) && cmd.source_maps == SourceMapMode::File {
        warn!("Source map files need --out-file or --out-dir; no map will be written");
    }

    let results = match target {
        // Outputs are concatenated into one module, so generated names must
        // not repeat across inputs.
        OutputTarget::File(_) | OutputTarget::Stdout => {
            let mut next_index = 1;
            ctx.process_sources_in_order(|session, source| {
                let file = inline_file(session, source, next_index)?;
                next_index = file.output.next_index;
                Ok(file)
            })?
        }
        OutputTarget::Dir(_) => {
            ctx.process_sources(|session, source| inline_file(session, source, 1))?
        }
    };
    let files_processed = results.len();

    let mut inlined = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(file) => inlined.push(file),
            Err(failure) => failures.push(failure),
        }
    }

    let mut summary = InlineSummary::default();
    for file in &inlined {
        summary.replaced_count += file.output.replaced_count;
        summary.generated_count += file.output.generated_count;
    }

    match target {
        OutputTarget::Stdout => write_stdout(&inlined, cmd.source_maps)?,
        OutputTarget::File(path) => {
            if !inlined.is_empty() {
                write_merged(&inlined, path, cmd.source_maps)?;
                summary.written.push(path.to_path_buf());
            }
        }
        OutputTarget::Dir(dir) => {
            for file in &inlined {
                let relative = file
                    .relative
                    .as_deref()
                    .unwrap_or_else(|| Path::new(&file.name));
                let path = dir.join(relative);
                write_single(&file.output, &path, cmd.source_maps)?;
                summary.written.push(path);
            }
        }
    }

    Ok(finish(
        CommandSummary::Inline(summary),
        Vec::new(),
        failures,
        files_processed,
    ))
}

fn inline_file(
    session: &Session,
    source: &SourceText,
    first_index: usize,
) -> Result<Inlined, FileFailure> {
    let input_map = source
        .input
        .as_ref()
        .and_then(|input| read_input_map(&input.path));
    match inline_source_from(
        session,
        &source.code,
        &source.name,
        input_map.as_ref(),
        first_index,
    ) {
        Ok(output) => Ok(Inlined {
            name: source.name.clone(),
            relative: source.input.as_ref().map(|input| input.relative.clone()),
            output,
        }),
        Err(e) => Err(FileFailure {
            file_path: source.name.clone(),
            message: e.to_string(),
        }),
    }
}

fn ensure_trailing_newline(code: &mut String) {
    if !code.is_empty() && !code.ends_with('\n') {
        code.push('\n');
    }
}

/// Append the `sourceMappingURL` comment `mode` asks for and return the map
/// document to write next to the output, if any.
fn attach_map(
    code: &mut String,
    map: &PositionMap,
    mode: SourceMapMode,
    map_file_name: Option<&str>,
) -> Option<String> {
    match (mode, map_file_name) {
        (SourceMapMode::None, _) | (SourceMapMode::File, None) => None,
        (SourceMapMode::Inline, _) => {
            ensure_trailing_newline(code);
            code.push_str(&source_mapping_url_comment(&map.to_data_url()));
            None
        }
        (SourceMapMode::File, Some(name)) => {
            ensure_trailing_newline(code);
            code.push_str(&source_mapping_url_comment(name));
            Some(map.to_json())
        }
    }
}

fn map_path_for(path: &Path) -> PathBuf {
    let mut map_path = path.as_os_str().to_owned();
    map_path.push(".map");
    PathBuf::from(map_path)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}

fn write_stdout(files: &[Inlined], mode: SourceMapMode) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for file in files {
        let mut code = file.output.code.clone();
        attach_map(&mut code, &file.output.position_map, mode, None);
        stdout
            .write_all(code.as_bytes())
            .context("Failed to write to stdout")?;
    }
    stdout.flush().context("Failed to write to stdout")
}

fn write_single(output: &InlineOutput, path: &Path, mode: SourceMapMode) -> Result<()> {
    let mut code = output.code.clone();
    let mut map = output.position_map.clone();
    map.file = Some(file_name(path));
    let map_path = map_path_for(path);
    let map_json = attach_map(&mut code, &map, mode, Some(&file_name(&map_path)));

    write_file(path, &code)?;
    if let Some(json) = map_json {
        write_file(&map_path, &json)?;
    }
    Ok(())
}

/// Concatenate every file's output into `path` with one combined map.
fn write_merged(files: &[Inlined], path: &Path, mode: SourceMapMode) -> Result<()> {
    let (mut code, mut map) = merge_outputs(files);
    map.file = Some(file_name(path));
    let map_path = map_path_for(path);
    let map_json = attach_map(&mut code, &map, mode, Some(&file_name(&map_path)));

    write_file(path, &code)?;
    if let Some(json) = map_json {
        write_file(&map_path, &json)?;
    }
    Ok(())
}

fn merge_outputs(files: &[Inlined]) -> (String, PositionMap) {
    let mut code = String::new();
    let mut map = PositionMap::default();
    for file in files {
        ensure_trailing_newline(&mut code);
        let line_offset = line_starts(&code).count() as u32;
        map.append(&file.output.position_map, line_offset);
        code.push_str(&file.output.code);
    }
    (code, map)
}
