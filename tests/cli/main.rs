use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod extract;
mod init;
mod inline;
mod lint;

const BIN_NAME: &str = "msginline";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

/// Exit code and decoded output of one run.
pub struct RunOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for RunOutput {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stops config discovery at the project root.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd.stdin(Stdio::null());
        cmd
    }

    pub fn inline_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("inline");
        cmd
    }

    pub fn extract_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("extract");
        cmd
    }

    pub fn lint_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("lint");
        cmd
    }

    pub fn run(&self, cmd: &mut Command) -> Result<RunOutput> {
        let output = cmd.output().context("Failed to run command")?;
        Ok(output.into())
    }

    /// Run with `input` piped to stdin.
    pub fn run_with_stdin(&self, cmd: &mut Command, input: &str) -> Result<RunOutput> {
        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to spawn command")?;
        // The child may exit before reading stdin (e.g. on argument errors).
        if let Err(err) = child
            .stdin
            .take()
            .context("stdin not captured")?
            .write_all(input.as_bytes())
            && err.kind() != std::io::ErrorKind::BrokenPipe
        {
            return Err(err.into());
        }
        let output = child.wait_with_output()?;
        Ok(output.into())
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.run(test.command().arg("--help"))?;

    assert_eq!(output.code, Some(0));
    for command in ["inline", "extract", "lint", "init"] {
        assert!(output.stdout.contains(command), "missing {command}");
    }
    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.run(&mut test.command())?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Usage:"));
    Ok(())
}

#[test]
fn test_missing_input_is_error() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.run(test.lint_command().arg("missing.js"))?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Error: Input path does not exist: missing.js"));
    Ok(())
}

#[test]
fn test_invalid_config_is_error() -> Result<()> {
    let test = CliTest::with_file(".msginlinerc.json", r#"{ "ignores": ["[oops"] }"#)?;
    test.write_file("a.js", "format('hi');")?;
    let output = test.run(test.lint_command().arg("a.js"))?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("ignores"));
    Ok(())
}
