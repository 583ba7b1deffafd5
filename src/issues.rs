//! Diagnostics reported by lint mode.
//!
//! Each issue is self-contained with everything the reporter needs to print
//! it: position, source line, message and an optional note.

use enum_dispatch::enum_dispatch;

use crate::core::SourceContext;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    MalformedArguments,
    PatternSyntax,
    MissingTranslation,
    TranslationSyntax,
    CatalogLookup,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::MalformedArguments => write!(f, "malformed-arguments"),
            Rule::PatternSyntax => write!(f, "pattern-syntax"),
            Rule::MissingTranslation => write!(f, "missing-translation"),
            Rule::TranslationSyntax => write!(f, "translation-syntax"),
            Rule::CatalogLookup => write!(f, "catalog-lookup"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

/// Which argument of a call failed the literal check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentRole {
    Pattern,
    Locale,
}

impl std::fmt::Display for ArgumentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgumentRole::Pattern => write!(f, "pattern"),
            ArgumentRole::Locale => write!(f, "locale"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Named call whose pattern or locale argument is not a string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedArgumentsIssue {
    pub context: SourceContext,
    pub function_name: String,
    pub argument: ArgumentRole,
}

impl MalformedArgumentsIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MalformedArguments
    }
}

/// Raw pattern is not valid message syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSyntaxIssue {
    pub context: SourceContext,
    pub pattern: String,
    /// Message from the grammar engine.
    pub error: String,
}

impl PatternSyntaxIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::PatternSyntax
    }
}

/// A catalog is configured but has no entry for the call's locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTranslationIssue {
    pub context: SourceContext,
    pub pattern: String,
    pub locale: String,
}

impl MissingTranslationIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingTranslation
    }
}

/// Translated pattern is not valid message syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationSyntaxIssue {
    pub context: SourceContext,
    pub locale: String,
    pub translation: String,
    pub error: String,
}

impl TranslationSyntaxIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::TranslationSyntax
    }
}

/// Translation lookup failed, e.g. no key can be derived from the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLookupIssue {
    pub context: SourceContext,
    pub error: String,
}

impl CatalogLookupIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::CatalogLookup
    }
}

/// File could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MalformedArguments(MalformedArgumentsIssue),
    PatternSyntax(PatternSyntaxIssue),
    MissingTranslation(MissingTranslationIssue),
    TranslationSyntax(TranslationSyntaxIssue),
    CatalogLookup(CatalogLookupIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location (has source_line for context display).
    Source(&'a SourceContext),
    /// File-level only (for ParseError - no line context).
    File { path: &'a str },
}

/// Uniform view of an issue for the report functions.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for MalformedArgumentsIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!(
            "{} argument of {}() is not a string literal",
            self.argument, self.function_name
        )
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("this call is left as-is and evaluated at runtime")
    }
}

impl Report for PatternSyntaxIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!("invalid message pattern: {}", self.error)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("pattern: {:?}", self.pattern))
    }
}

impl Report for MissingTranslationIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!("no {} translation for {:?}", self.locale, self.pattern)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("the original pattern is used instead")
    }
}

impl Report for TranslationSyntaxIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!("invalid {} translation: {}", self.locale, self.error)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("translation: {:?}", self.translation))
    }
}

impl Report for CatalogLookupIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_key(&self) -> (&str, usize, usize) {
        match self.location() {
            ReportLocation::Source(ctx) => (ctx.file_path(), ctx.line(), ctx.col()),
            ReportLocation::File { path } => (path, 0, 0),
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file_path, line, col, rule, message
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
