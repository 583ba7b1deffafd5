use anyhow::Result;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_constant_pattern_to_stdout() -> Result<()> {
    let test = CliTest::with_file("a.js", "const a = format('hello');\n")?;
    let output = test.run(test.inline_command().arg("a.js"))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "const a = \"hello\";\n");
    assert!(output.stderr.contains("Inlined 1 call in 1 file"));
    Ok(())
}

#[test]
fn test_dynamic_pattern_hoists_one_function() -> Result<()> {
    let test = CliTest::with_file(
        "a.js",
        "const g = format('Hi {name}', { name });\nconst h = format('{n, number}');\n",
    )?;
    let output = test.run(test.inline_command().arg("a.js"))?;

    assert_eq!(output.code, Some(0));
    assert!(
        output
            .stdout
            .starts_with("const g = __format_1({ name });\nconst h = __format_2(null);\n")
    );
    assert_eq!(output.stdout.matches("function __format_1(").count(), 1);
    assert_eq!(output.stdout.matches("function __format_2(").count(), 1);
    assert!(!output.stdout.contains("format('"));
    assert!(output.stderr.contains("(2 generated functions)"));
    Ok(())
}

#[test]
fn test_untouched_code_is_preserved() -> Result<()> {
    let source = "// header\nimport x from 'y';\n\nfunction f(a,b){return a+b}  // keep\n";
    let test = CliTest::with_file("a.js", source)?;
    let output = test.run(test.inline_command().arg("a.js"))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, source);
    Ok(())
}

#[test]
fn test_stdin_input() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.run_with_stdin(&mut test.inline_command(), "x = format('from stdin');")?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "x = \"from stdin\";");
    Ok(())
}

#[test]
fn test_out_dir_mirrors_inputs() -> Result<()> {
    let test = CliTest::with_file("src/a.js", "format('a');\n")?;
    test.write_file("src/lib/b.ts", "const b: string = format('b');\n")?;
    test.write_file("src/node_modules/dep/c.js", "format('c');\n")?;
    test.write_file("src/readme.md", "format('d')\n")?;

    let output = test.run(test.inline_command().args(["src", "-d", "dist"]))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "");
    assert_eq!(test.read_file("dist/a.js")?, "\"a\";\n");
    assert_eq!(test.read_file("dist/lib/b.ts")?, "const b: string = \"b\";\n");
    assert!(!test.root().join("dist/node_modules").exists());
    assert!(!test.root().join("dist/readme.md").exists());
    Ok(())
}

#[test]
fn test_out_file_merges_with_source_map() -> Result<()> {
    let test = CliTest::with_file("a.js", "let a = format('{x}', p);")?;
    test.write_file("b.js", "let b = format('b');\n")?;

    let output = test.run(
        test.inline_command()
            .args(["a.js", "b.js", "-o", "out/bundle.js", "-s", "file"]),
    )?;

    assert_eq!(output.code, Some(0));
    let bundle = test.read_file("out/bundle.js")?;
    assert!(bundle.starts_with("let a = __format_1(p);\n"));
    assert!(bundle.contains("let b = \"b\";\n"));
    assert!(bundle.ends_with("//# sourceMappingURL=bundle.js.map\n"));

    let map: Value = serde_json::from_str(&test.read_file("out/bundle.js.map")?)?;
    assert_eq!(map["version"], 3);
    assert_eq!(map["file"], "bundle.js");
    assert_eq!(map["sources"], serde_json::json!(["a.js", "b.js"]));
    assert!(!map["mappings"].as_str().unwrap_or_default().is_empty());
    Ok(())
}

#[test]
fn test_out_file_generated_names_unique_across_inputs() -> Result<()> {
    let test = CliTest::with_file("a.js", "let a = format('A {x}', p);\n")?;
    test.write_file("b.js", "let b = format('B {y}', q);\n")?;

    let output = test.run(test.inline_command().args(["a.js", "b.js", "-o", "bundle.js"]))?;

    assert_eq!(output.code, Some(0));
    let bundle = test.read_file("bundle.js")?;
    assert!(bundle.starts_with("let a = __format_1(p);\n"), "{bundle}");
    assert!(bundle.contains("let b = __format_2(q);\n"), "{bundle}");
    assert_eq!(bundle.matches("function __format_1(").count(), 1);
    assert_eq!(bundle.matches("function __format_2(").count(), 1);

    let first = bundle.find("function __format_1(").unwrap_or_default();
    let second = bundle.find("function __format_2(").unwrap_or_default();
    assert!(bundle[first..second].contains("\"A \""));
    assert!(bundle[second..].contains("\"B \""));
    Ok(())
}

#[test]
fn test_stdout_generated_names_unique_across_inputs() -> Result<()> {
    let test = CliTest::with_file("a.js", "format('{x}', p);\n")?;
    test.write_file("b.js", "format('{y}', q);\n")?;

    let output = test.run(test.inline_command().args(["a.js", "b.js"]))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout.matches("function __format_1(").count(), 1);
    assert_eq!(output.stdout.matches("function __format_2(").count(), 1);
    assert!(output.stdout.contains("__format_2(q);\n"));
    Ok(())
}

#[test]
fn test_inline_source_map() -> Result<()> {
    let test = CliTest::with_file("a.js", "format('a');\n")?;
    let output = test.run(test.inline_command().args(["a.js", "-s", "inline"]))?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.starts_with("\"a\";\n"));
    assert!(
        output
            .stdout
            .contains("//# sourceMappingURL=data:application/json;charset=utf-8;base64,")
    );
    Ok(())
}

#[test]
fn test_invalid_pattern_fails_only_that_file() -> Result<()> {
    let test = CliTest::with_file("bad.js", "ok();\nconst s = format('{oops');\n")?;
    test.write_file("good.js", "format('fine');\n")?;

    let output = test.run(test.inline_command().args(["bad.js", "good.js", "-d", "dist"]))?;

    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("error: bad.js:2:11: invalid message pattern"));
    assert!(output.stderr.contains("1 file of 2 failed"));
    assert!(!test.root().join("dist/bad.js").exists());
    assert_eq!(test.read_file("dist/good.js")?, "\"fine\";\n");
    Ok(())
}

#[test]
fn test_non_literal_arguments_are_left_alone() -> Result<()> {
    let source = "format(msg);\nformat('hi', null, lang);\n";
    let test = CliTest::with_file("a.js", source)?;
    let output = test.run(test.inline_command().arg("a.js"))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, source);
    Ok(())
}

#[test]
fn test_translations_from_flags() -> Result<()> {
    let test = CliTest::with_file(
        "a.js",
        "a = format('hello');\nb = format('hello', null, 'de');\n",
    )?;
    test.write_file(
        "catalog.json",
        r#"{ "fr": { "hello": "bonjour" }, "de": { "hello": "hallo" } }"#,
    )?;

    let output = test.run(
        test.inline_command()
            .args(["a.js", "-l", "fr", "-k", "literal", "-t", "catalog.json"]),
    )?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "a = \"bonjour\";\nb = \"hallo\";\n");
    Ok(())
}

#[test]
fn test_translations_from_config() -> Result<()> {
    let test = CliTest::with_file(
        ".msginlinerc.json",
        r#"{
            "functionName": "t",
            "locale": "fr",
            "keyType": "literal",
            "translations": "i18n/catalog.json"
        }"#,
    )?;
    test.write_file("i18n/catalog.json", r#"{ "fr": { "hello": "bonjour" } }"#)?;
    test.write_file("src/a.js", "t('hello'); format('hello');\n")?;

    let output = test.run(test.inline_command().arg("src/a.js"))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "\"bonjour\"; format('hello');\n");
    Ok(())
}

#[test]
fn test_broken_translation_policy() -> Result<()> {
    let test = CliTest::with_file("a.js", "format('hi {name}', p);\n")?;
    test.write_file("catalog.json", r#"{ "fr": { "hi {name}": "salut {name" } }"#)?;
    let args = ["a.js", "-l", "fr", "-k", "literal", "-t", "catalog.json"];

    let output = test.run(test.inline_command().args(args))?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.starts_with("__format_1(p);\n"));
    assert!(output.stderr.contains("using the original pattern"));

    let output = test.run(
        test.inline_command()
            .args(args)
            .args(["--on-invalid-translation", "error"]),
    )?;
    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("error: a.js:1:1: invalid fr translation"));
    Ok(())
}

#[test]
fn test_missing_catalog_is_error() -> Result<()> {
    let test = CliTest::with_file("a.js", "format('x');\n")?;
    let output = test.run(test.inline_command().args(["a.js", "-t", "nope.json"]))?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("failed to read catalog nope.json"));
    Ok(())
}

#[test]
fn test_out_dir_requires_files() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.run_with_stdin(test.inline_command().args(["-d", "dist"]), "format('x')")?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("--out-dir requires input files"));
    Ok(())
}
