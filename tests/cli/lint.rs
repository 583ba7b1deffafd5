use anyhow::Result;

use crate::CliTest;

#[test]
fn test_clean_file() -> Result<()> {
    let test = CliTest::with_file("a.js", "format('hello'); format('{n, number}', { n });\n")?;
    let output = test.run(test.lint_command().arg("a.js"))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "");
    assert!(output.stderr.contains("Checked 1 file - no issues found"));
    Ok(())
}

#[test]
fn test_non_literal_pattern_is_warning() -> Result<()> {
    let test = CliTest::with_file("a.js", "const greeting = 'hi';\nformat(greeting);\n")?;
    let output = test.run(test.lint_command().arg("a.js"))?;

    assert_eq!(output.code, Some(1));
    assert_eq!(output.stdout, "");
    assert!(
        output
            .stderr
            .contains("warning: pattern argument of format() is not a string literal")
    );
    assert!(output.stderr.contains("--> a.js:2:1"));
    assert!(output.stderr.contains("2 | format(greeting);"));
    assert!(output.stderr.contains("1 problem (0 errors, 1 warning)"));
    Ok(())
}

#[test]
fn test_unbalanced_brace_is_error() -> Result<()> {
    let test = CliTest::with_file("a.js", "format('hello {name');\n")?;
    let output = test.run(test.lint_command().arg("a.js"))?;

    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("error: invalid message pattern"));
    assert!(output.stderr.contains("pattern-syntax"));
    assert!(output.stderr.contains("1 problem (1 error, 0 warnings)"));
    Ok(())
}

#[test]
fn test_checks_are_independent_per_call() -> Result<()> {
    let test = CliTest::with_file("a.js", "format('{oops', null, lang);\n")?;
    let output = test.run(test.lint_command().arg("a.js"))?;

    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("locale argument of format() is not a string literal"));
    assert!(output.stderr.contains("invalid message pattern"));
    assert!(output.stderr.contains("2 problems (1 error, 1 warning)"));
    Ok(())
}

#[test]
fn test_missing_translation_with_catalog() -> Result<()> {
    let test = CliTest::with_file("a.js", "format('hello');\nformat('goodbye');\n")?;
    test.write_file("catalog.json", r#"{ "fr": { "hello": "bonjour" } }"#)?;

    let output = test.run(
        test.lint_command()
            .args(["a.js", "-l", "fr", "-k", "literal", "-t", "catalog.json"]),
    )?;

    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("no fr translation for \"goodbye\""));
    assert!(output.stderr.contains("--> a.js:2:1"));
    assert!(output.stderr.contains("missing-translation"));
    assert!(!output.stderr.contains("\"hello\""));
    Ok(())
}

#[test]
fn test_parse_error_is_reported() -> Result<()> {
    let test = CliTest::with_file("broken.js", "const = ;\n")?;
    let output = test.run(test.lint_command().arg("broken.js"))?;

    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("parse-error"));
    assert!(output.stderr.contains("--> broken.js"));
    Ok(())
}

#[test]
fn test_lint_stdin() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.run_with_stdin(&mut test.lint_command(), "format(x);")?;

    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("--> <stdin>:1:1"));
    Ok(())
}

#[test]
fn test_custom_function_name() -> Result<()> {
    let test = CliTest::with_file("a.js", "t(msg); format(msg);\n")?;
    let output = test.run(test.lint_command().args(["a.js", "-n", "t"]))?;

    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("pattern argument of t() is not a string literal"));
    assert!(output.stderr.contains("1 problem"));
    Ok(())
}
