use anyhow::Result;
use insta::assert_snapshot;
use serde_json::{Value, json};

use crate::CliTest;

#[test]
fn test_extract_to_stdout() -> Result<()> {
    let test = CliTest::with_file(
        "src/a.js",
        "format('Hello {name}', { name }); format(''); format(label);\n",
    )?;
    test.write_file("src/b.js", "format(`Bye`); format('Hello {name}', user);\n")?;

    let output = test.run(test.extract_command().args(["src", "-k", "literal"]))?;

    assert_eq!(output.code, Some(0));
    let catalog: Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(
        catalog,
        json!({ "en": { "Bye": "Bye", "Hello {name}": "Hello {name}" } })
    );
    assert!(output.stderr.contains("Extracted 2 patterns from 2 files"));
    Ok(())
}

#[test]
fn test_extract_keys_are_sorted_and_pretty() -> Result<()> {
    let test = CliTest::with_file("a.js", "format('zebra'); format('apple');\n")?;
    let output = test.run(test.extract_command().args(["a.js", "-k", "underscored", "-l", "fr"]))?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.ends_with("}\n"));
    assert_snapshot!(output.stdout.trim_end(), @r#"
{
  "fr": {
    "apple": "apple",
    "zebra": "zebra"
  }
}
"#);
    Ok(())
}

#[test]
fn test_extract_to_file() -> Result<()> {
    let test = CliTest::with_file("a.js", "format('one');\n")?;
    let output = test.run(test.extract_command().args(["a.js", "-o", "i18n/catalog.json"]))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "");
    assert!(
        output
            .stderr
            .contains("Extracted 1 pattern from 1 file to i18n/catalog.json")
    );
    let catalog: Value = serde_json::from_str(&test.read_file("i18n/catalog.json")?)?;
    assert_eq!(catalog["en"].as_object().map(|o| o.len()), Some(1));
    Ok(())
}

#[test]
fn test_extract_invalid_pattern_fails_file() -> Result<()> {
    let test = CliTest::with_file("bad.js", "format('{');\n")?;
    test.write_file("good.js", "format('ok');\n")?;

    let output = test.run(
        test.extract_command()
            .args(["bad.js", "good.js", "-k", "literal"]),
    )?;

    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("error: bad.js:1:1: invalid message pattern"));
    let catalog: Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(catalog, json!({ "en": { "ok": "ok" } }));
    Ok(())
}

#[test]
fn test_extract_then_inline_round_trip() -> Result<()> {
    let test = CliTest::with_file(
        "app.js",
        "const a = format('Good morning');\nconst b = format('{count} new messages', { count });\n",
    )?;

    let output = test.run(test.extract_command().args(["app.js", "-l", "de", "-o", "de.json"]))?;
    assert_eq!(output.code, Some(0));

    // Translate every extracted entry using the default key strategy.
    let mut catalog: Value = serde_json::from_str(&test.read_file("de.json")?)?;
    let entries = catalog["de"]
        .as_object_mut()
        .expect("catalog should have a de section");
    assert_eq!(entries.len(), 2);
    for value in entries.values_mut() {
        let translated = match value.as_str() {
            Some("Good morning") => "Guten Morgen",
            Some("{count} new messages") => "{count} neue Nachrichten",
            other => panic!("unexpected entry: {other:?}"),
        };
        *value = Value::String(translated.to_string());
    }
    test.write_file("de.json", &serde_json::to_string(&catalog)?)?;

    let output = test.run(test.inline_command().args(["app.js", "-l", "de", "-t", "de.json"]))?;
    assert_eq!(output.code, Some(0));
    assert!(
        output
            .stdout
            .starts_with("const a = \"Guten Morgen\";\nconst b = __format_1({ count });\n")
    );
    assert!(output.stdout.contains("neue Nachrichten"));
    Ok(())
}
