//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `inline`: Replace `format()` calls with their compiled output
//! - `extract`: Collect call patterns into a translation catalog
//! - `lint`: Report calls that cannot be expanded
//! - `init`: Initialize a configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::core::{KeyStrategy, TranslationErrorPolicy};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Inline(cmd)) => cmd.common.verbose,
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Lint(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Files, directories or glob patterns (reads stdin when omitted)
    pub inputs: Vec<String>,

    /// Host function whose calls are expanded (overrides config file)
    #[arg(short = 'n', long)]
    pub function_name: Option<String>,

    /// Default locale for calls without a locale argument (overrides config file)
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Catalog key strategy (overrides config file)
    #[arg(short, long, value_enum)]
    pub key_type: Option<KeyStrategy>,

    /// Translation catalog JSON file (overrides config file)
    #[arg(short, long)]
    pub translations: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Where inline mode writes position maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SourceMapMode {
    #[default]
    None,
    /// Write `<output>.map` next to each output file
    File,
    /// Append the map as a data URL comment
    Inline,
}

#[derive(Debug, Args)]
pub struct InlineCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Write all output into a single file
    #[arg(short, long, conflicts_with = "out_dir")]
    pub out_file: Option<PathBuf>,

    /// Write each output under this directory, mirroring input paths
    #[arg(short = 'd', long)]
    pub out_dir: Option<PathBuf>,

    /// Emit position maps
    #[arg(short, long, value_enum, default_value_t = SourceMapMode::None)]
    pub source_maps: SourceMapMode,

    /// What to do when a translation does not parse (overrides config file)
    #[arg(long, value_enum)]
    pub on_invalid_translation: Option<TranslationErrorPolicy>,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Write the catalog to this file instead of stdout
    #[arg(short, long)]
    pub out_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct LintCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replace format() calls with constants or generated functions
    Inline(InlineCommand),
    /// Collect format() patterns into a translation catalog
    Extract(ExtractCommand),
    /// Report format() calls that cannot be expanded
    Lint(LintCommand),
    /// Initialize a new .msginlinerc.json configuration file
    Init,
}
