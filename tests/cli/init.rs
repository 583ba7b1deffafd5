use anyhow::{Context, Result};
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["functionName"], "format");
    assert_eq!(parsed["locale"], "en");
    assert_eq!(parsed["keyType"], "underscored_hash");
    assert_eq!(parsed["onInvalidTranslation"], "fallback");
    assert!(parsed["ignores"].is_array());

    // 2-space indentation
    assert!(content.contains("\n  \"functionName\""));

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.run(test.command().arg("init"))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "\u{2713} Created .msginlinerc.json\n");
    assert!(test.root().join(".msginlinerc.json").exists());

    let content = test.read_file(".msginlinerc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".msginlinerc.json", "{}")?;

    let output = test.run(test.command().arg("init"))?;

    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains(".msginlinerc.json already exists"));
    assert_eq!(test.read_file(".msginlinerc.json")?, "{}");

    Ok(())
}

#[test]
fn test_created_config_is_used() -> Result<()> {
    let test = CliTest::new()?;
    test.run(test.command().arg("init"))?;
    test.write_file("a.js", "format('hi');\n")?;

    let output = test.run(test.lint_command().arg("a.js"))?;
    assert_eq!(output.code, Some(0));

    Ok(())
}
