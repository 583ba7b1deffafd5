//! Lint rules.
//!
//! The check functions are pure: each takes only the inputs it needs and
//! returns issues. `lint_source` walks one file and runs every check on every
//! call named like the host function, so a single call can produce several
//! issues.
//!
//! ## Module Structure
//!
//! - `arguments`: pattern/locale arguments that are not string literals
//! - `pattern`: pattern syntax, missing and broken translations

pub mod arguments;
pub mod pattern;

use std::sync::Arc;

use swc_common::SourceMap;
use swc_ecma_ast::CallExpr;
use swc_ecma_visit::{Visit, VisitWith};

use crate::{
    core::{
        CallMatcher, FoldedConstants, Session, classify_argument, matcher,
        parsers::js::{ParsedSource, parse_js_source},
    },
    issues::{Issue, ParseErrorIssue},
};

pub use arguments::{check_locale_argument, check_pattern_argument};
pub use pattern::{PatternCheck, check_pattern};

struct LintVisitor<'a> {
    session: &'a Session,
    matcher: CallMatcher,
    parsed: &'a ParsedSource,
    file_path: &'a str,
    folded: FoldedConstants,
    issues: Vec<Issue>,
}

impl Visit for LintVisitor<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        node.visit_children_with(self);
        if self.matcher.is_named_call(node) {
            self.check_call(node);
        }
    }
}

impl LintVisitor<'_> {
    fn check_call(&mut self, node: &CallExpr) {
        let context = self.parsed.context(self.file_path, node.span);
        let function_name = &self.session.function_name;

        let pattern_issue = check_pattern_argument(node, &self.folded, &context, function_name);
        let locale_issue = check_locale_argument(node, &self.folded, &context, function_name);
        let locale_is_literal = locale_issue.is_none();
        self.issues.extend(pattern_issue.map(Issue::from));
        self.issues.extend(locale_issue.map(Issue::from));

        let pattern = node
            .args
            .get(matcher::PATTERN_ARG)
            .and_then(|arg| classify_argument(arg, &self.folded).literal())
            .map(str::to_owned);
        let Some(pattern) = pattern else {
            return;
        };
        let call_locale = node
            .args
            .get(matcher::LOCALE_ARG)
            .and_then(|arg| classify_argument(arg, &self.folded).literal())
            .map(str::to_owned);
        let locale = self
            .session
            .effective_locale(call_locale.as_deref())
            .to_string();

        let check = check_pattern(self.session, &pattern, &locale, &context);
        self.issues.extend(check.issues);
        // Mirror inline mode: only fully eligible calls fold for their parent.
        if locale_is_literal && let Some(constant) = check.constant {
            self.folded.insert(node.span, constant);
        }
    }
}

/// Run every lint check on one file.
///
/// A file that does not parse yields a single parse-error issue.
pub fn lint_source(session: &Session, code: &str, file_path: &str) -> Vec<Issue> {
    let parsed = match parse_js_source(code.to_string(), file_path, Arc::new(SourceMap::default()))
    {
        Ok(parsed) => parsed,
        Err(err) => {
            return vec![
                ParseErrorIssue {
                    file_path: file_path.to_string(),
                    error: err.to_string(),
                }
                .into(),
            ];
        }
    };

    let mut visitor = LintVisitor {
        session,
        matcher: CallMatcher::new(session.function_name.clone()),
        parsed: &parsed,
        file_path,
        folded: FoldedConstants::new(),
        issues: Vec::new(),
    };
    parsed.module.visit_with(&mut visitor);
    visitor.issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::{ArgumentRole, Report, ReportLocation, Rule, Severity};
    use pretty_assertions::assert_eq;

    fn lint(code: &str) -> Vec<Issue> {
        lint_source(&Session::default(), code, "test.js")
    }

    fn rules(issues: &[Issue]) -> Vec<Rule> {
        issues.iter().map(|issue| issue.rule()).collect()
    }

    fn count(issues: &[Issue], severity: Severity) -> usize {
        issues.iter().filter(|i| i.severity() == severity).count()
    }

    #[test]
    fn test_clean_file() {
        assert!(lint("format('hello'); format('{n, number}', { n });").is_empty());
    }

    #[test]
    fn test_identifier_pattern_is_one_warning() {
        let issues = lint("format(greeting);");
        assert_eq!(rules(&issues), vec![Rule::MalformedArguments]);
        assert_eq!(count(&issues, Severity::Warning), 1);
        assert_eq!(count(&issues, Severity::Error), 0);
    }

    #[test]
    fn test_unbalanced_brace_is_one_error() {
        let issues = lint("format('hello {name');");
        assert_eq!(rules(&issues), vec![Rule::PatternSyntax]);
        assert_eq!(count(&issues, Severity::Error), 1);
    }

    #[test]
    fn test_checks_are_independent() {
        let issues = lint("format(greeting, null, lang);");
        assert_eq!(issues.len(), 2);
        let roles: Vec<_> = issues
            .iter()
            .map(|issue| match issue {
                Issue::MalformedArguments(i) => i.argument,
                other => panic!("unexpected issue: {:?}", other),
            })
            .collect();
        assert_eq!(roles, vec![ArgumentRole::Pattern, ArgumentRole::Locale]);

        let issues = lint("format('{oops', null, lang);");
        assert_eq!(rules(&issues), vec![Rule::MalformedArguments, Rule::PatternSyntax]);
    }

    #[test]
    fn test_missing_pattern_argument() {
        assert_eq!(rules(&lint("format();")), vec![Rule::MalformedArguments]);
    }

    #[test]
    fn test_other_calls_are_ignored() {
        assert!(lint("fmt(x); obj.format(y);").is_empty());
    }

    #[test]
    fn test_issue_has_position_and_source_line() {
        let issues = lint("let a;\n  const b = format(x);\n");
        let ReportLocation::Source(ctx) = issues[0].location() else {
            panic!("expected source location");
        };
        assert_eq!((ctx.line(), ctx.col()), (2, 13));
        assert_eq!(ctx.source_line, "  const b = format(x);");
    }

    #[test]
    fn test_nested_calls_report_inner_first() {
        let issues = lint("format('{a}', { a: format(x) }); format('{');");
        assert_eq!(rules(&issues), vec![Rule::MalformedArguments, Rule::PatternSyntax]);
    }

    #[test]
    fn test_folded_inner_call_is_literal() {
        assert!(lint("format(format('hello'));").is_empty());
    }

    #[test]
    fn test_catalog_checks() {
        let lookup = |pattern: &str, locale: &str| match (pattern, locale) {
            ("hello", "fr") => Some("bonjour".to_string()),
            ("bye", "fr") => Some("au revoir {".to_string()),
            _ => None,
        };
        let session = Session::new("format", "fr").with_lookup(Arc::new(lookup));
        let issues = lint_source(
            &session,
            "format('hello'); format('thanks'); format('bye'); format('hello', null, 'de');",
            "t.js",
        );
        assert_eq!(
            rules(&issues),
            vec![
                Rule::MissingTranslation,
                Rule::TranslationSyntax,
                Rule::MissingTranslation
            ]
        );
        assert!(issues[2].message().contains("de"));
    }

    #[test]
    fn test_parse_error() {
        let issues = lint("const = ;");
        assert_eq!(rules(&issues), vec![Rule::ParseError]);
    }
}
