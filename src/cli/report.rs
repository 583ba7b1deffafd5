//! Report formatting and printing utilities.
//!
//! This module provides functions to display issues in cargo-style format.
//! Reports go to stderr: stdout is reserved for inlined code and catalogs.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, ExtractSummary, FileFailure, InitSummary, InlineSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stderr.
///
/// Issues are sorted and displayed with severity, location, source
/// context and details, followed by a summary line.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stderr().lock());
}

/// Print issues to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    // Calculate max line number width for alignment
    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Checked {} - no issues found", plural(files, "file", "files")).green()
    );
}

/// Print files whose pass was aborted.
pub fn print_failures_to<W: Write>(failures: &[FileFailure], writer: &mut W) {
    for failure in failures {
        let _ = writeln!(writer, "{} {}", "error:".bold().red(), failure.message);
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col, source_line) = extract_location_info(&loc);

    // Print severity and message (cargo-style)
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Print clickable location: --> path:line:col
    if line > 0 {
        let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);
    } else {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), file_path);
    }

    // Print source context if available
    if let Some(source_line) = source_line {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // Caret pointing to the column (col is 1-based)
        let prefix = if col > 1 {
            source_line.chars().take(col - 1).collect::<String>()
        } else {
            String::new()
        };
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    // Print details if present (cargo-style note)
    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    // Print hint if present
    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            if total_problems == 1 {
                "1 problem".to_string()
            } else {
                format!("{} problems", total_problems)
            },
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, usize, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Source(ctx) => (
            ctx.file_path(),
            ctx.line(),
            ctx.col(),
            Some(&ctx.source_line),
        ),
        ReportLocation::File { path } => (path, 0, 0, None),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

pub fn print(result: &CommandResult, verbose: bool) {
    if let CommandSummary::Init(summary) = &result.summary {
        print_init(summary);
        return;
    }
    print_to(result, verbose, &mut io::stderr().lock());
}

/// Print a command's report to a custom writer.
pub fn print_to<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    print_failures_to(&result.failures, writer);

    match &result.summary {
        CommandSummary::Inline(summary) => print_inline(summary, result, verbose, writer),
        CommandSummary::Extract(summary) => print_extract(summary, result, writer),
        CommandSummary::Lint => {
            report_to(&result.issues, writer);
            if result.issues.is_empty() && result.failures.is_empty() {
                print_success_to(result.files_processed, writer);
            }
        }
        CommandSummary::Init(_) => {}
    }

    print_failure_summary(result, writer);
}

fn print_failure_summary<W: Write>(result: &CommandResult, writer: &mut W) {
    let failed = result.failures.len();
    if failed > 0 {
        let _ = writeln!(
            writer,
            "{} {} of {} failed",
            FAILURE_MARK.red(),
            plural(failed, "file", "files"),
            result.files_processed
        );
    }
}

fn print_inline<W: Write>(
    summary: &InlineSummary,
    result: &CommandResult,
    verbose: bool,
    writer: &mut W,
) {
    if verbose {
        for path in &summary.written {
            let _ = writeln!(writer, "  {} {}", "wrote".dimmed(), path.display());
        }
    }

    let succeeded = result.files_processed - result.failures.len();
    if succeeded == 0 {
        return;
    }
    let mut message = format!(
        "Inlined {} in {}",
        plural(summary.replaced_count, "call", "calls"),
        plural(succeeded, "file", "files")
    );
    if summary.generated_count > 0 {
        message.push_str(&format!(
            " ({})",
            plural(summary.generated_count, "generated function", "generated functions")
        ));
    }
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.green());
}

fn print_extract<W: Write>(summary: &ExtractSummary, result: &CommandResult, writer: &mut W) {
    let succeeded = result.files_processed - result.failures.len();
    let mut message = format!(
        "Extracted {} from {}",
        plural(summary.entry_count, "pattern", "patterns"),
        plural(succeeded, "file", "files")
    );
    if let Some(path) = &summary.written {
        message.push_str(&format!(" to {}", path.display()));
    }
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.green());
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else if let Some(error) = &summary.error {
        eprintln!("{} {}", "error:".bold().red(), error);
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::cli::commands::helper::finish;
    use crate::core::{SourceContext, SourceLocation};
    use crate::issues::{
        ArgumentRole, MalformedArgumentsIssue, MissingTranslationIssue, ParseErrorIssue,
        PatternSyntaxIssue,
    };

    fn strip_ansi(s: &str) -> String {
        // Simple ANSI escape code stripper for testing
        let mut result = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                // Skip until 'm'
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next == 'm' {
                        break;
                    }
                }
            } else {
                result.push(c);
            }
        }
        result
    }

    fn render<F: FnOnce(&mut Vec<u8>)>(f: F) -> String {
        let mut output = Vec::new();
        f(&mut output);
        strip_ansi(&String::from_utf8(output).unwrap())
    }

    fn malformed(file: &str, line: usize, col: usize, source_line: &str) -> Issue {
        let ctx = SourceContext::new(SourceLocation::new(file, line, col), source_line);
        Issue::MalformedArguments(MalformedArgumentsIssue {
            context: ctx,
            function_name: "format".to_string(),
            argument: ArgumentRole::Pattern,
        })
    }

    #[test]
    fn test_report_empty() {
        let mut output = Vec::new();
        report_to(&[], &mut output);
        assert!(output.is_empty());
    }

    #[test]
    fn test_report_malformed_arguments() {
        let issue = malformed("./src/app.js", 10, 11, "const x = format(greeting);");
        let stripped = render(|out| report_to(&[issue], out));

        assert!(stripped.contains("warning:"));
        assert!(stripped.contains("malformed-arguments"));
        assert!(stripped.contains("./src/app.js:10:11"));
        assert!(stripped.contains("const x = format(greeting);"));
        assert!(stripped.contains("1 problem (0 errors, 1 warning)"));
    }

    #[test]
    fn test_report_caret_position() {
        let issue = malformed("a.js", 1, 5, "let format(x)");
        let stripped = render(|out| report_to(&[issue], out));
        let caret_line = stripped.lines().find(|l| l.contains('^')).unwrap();
        assert_eq!(caret_line, "  |     ^");
    }

    #[test]
    fn test_report_caret_with_wide_chars() {
        let issue = malformed("a.js", 1, 4, "中文 format(x)");
        let stripped = render(|out| report_to(&[issue], out));
        let caret_line = stripped.lines().find(|l| l.contains('^')).unwrap();
        // Two wide chars plus a space occupy five columns.
        assert_eq!(caret_line, "  |      ^");
    }

    #[test]
    fn test_report_pattern_syntax_note() {
        let ctx = SourceContext::new(SourceLocation::new("a.js", 2, 1), "format('{');");
        let issue = Issue::PatternSyntax(PatternSyntaxIssue {
            context: ctx,
            pattern: "{".to_string(),
            error: "expected argument name at offset 1".to_string(),
        });
        let stripped = render(|out| report_to(&[issue], out));

        assert!(stripped.contains("error:"));
        assert!(stripped.contains("pattern-syntax"));
        assert!(stripped.contains("invalid message pattern: expected argument name at offset 1"));
        assert!(stripped.contains("= note: pattern: \"{\""));
    }

    #[test]
    fn test_report_parse_error_has_no_position() {
        let issue = Issue::ParseError(ParseErrorIssue {
            file_path: "broken.js".to_string(),
            error: "1:7: Expected ident".to_string(),
        });
        let stripped = render(|out| report_to(&[issue], out));
        assert!(stripped.contains("--> broken.js\n"));
        assert!(!stripped.contains('|'));
    }

    #[test]
    fn test_report_sorted_and_aligned() {
        let late = malformed("a.js", 120, 1, "format(b)");
        let early = malformed("a.js", 3, 1, "format(a)");
        let stripped = render(|out| report_to(&[late, early], out));

        let first = stripped.find("a.js:3:1").unwrap();
        let second = stripped.find("a.js:120:1").unwrap();
        assert!(first < second);
        assert!(stripped.contains("  3 | format(a)"));
        assert!(stripped.contains("120 | format(b)"));
    }

    #[test]
    fn test_report_summary_counts() {
        let ctx = SourceContext::new(SourceLocation::new("a.js", 1, 1), "format('hi')");
        let missing = Issue::MissingTranslation(MissingTranslationIssue {
            context: ctx,
            pattern: "hi".to_string(),
            locale: "fr".to_string(),
        });
        let issues = vec![malformed("a.js", 2, 1, "format(x)"), missing];
        let stripped = render(|out| report_to(&issues, out));
        assert!(stripped.contains("2 problems (0 errors, 2 warnings)"));
    }

    #[test]
    fn test_print_lint_success() {
        let result = finish(CommandSummary::Lint, Vec::new(), Vec::new(), 3);
        let stripped = render(|out| print_to(&result, false, out));
        assert_eq!(stripped, "\u{2713} Checked 3 files - no issues found\n");
    }

    #[test]
    fn test_print_inline_summary() {
        let summary = CommandSummary::Inline(InlineSummary {
            replaced_count: 4,
            generated_count: 1,
            written: vec![PathBuf::from("dist/a.js")],
        });
        let result = finish(summary, Vec::new(), Vec::new(), 2);
        let stripped = render(|out| print_to(&result, false, out));
        assert_eq!(
            stripped,
            "\u{2713} Inlined 4 calls in 2 files (1 generated function)\n"
        );

        let stripped = render(|out| print_to(&result, true, out));
        assert!(stripped.starts_with("  wrote dist/a.js\n"));
    }

    #[test]
    fn test_print_failures() {
        let failure = FileFailure {
            file_path: "b.js".to_string(),
            message: "b.js:3:9: invalid message pattern \"{\"".to_string(),
        };
        let summary = CommandSummary::Inline(InlineSummary {
            replaced_count: 1,
            ..Default::default()
        });
        let result = finish(summary, Vec::new(), vec![failure], 2);
        let stripped = render(|out| print_to(&result, false, out));
        assert_eq!(
            stripped,
            "error: b.js:3:9: invalid message pattern \"{\"\n\
             \u{2713} Inlined 1 call in 1 file\n\
             \u{2718} 1 file of 2 failed\n"
        );
    }

    #[test]
    fn test_print_extract_summary() {
        let summary = CommandSummary::Extract(ExtractSummary {
            entry_count: 1,
            written: Some(PathBuf::from("catalog.json")),
        });
        let result = finish(summary, Vec::new(), Vec::new(), 1);
        let stripped = render(|out| print_to(&result, false, out));
        assert_eq!(
            stripped,
            "\u{2713} Extracted 1 pattern from 1 file to catalog.json\n"
        );
    }
}
