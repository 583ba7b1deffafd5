//! Pattern and translation checks for calls with a literal pattern.

use crate::{
    core::{Resolution, Session, SourceContext, pattern::Element},
    issues::{
        CatalogLookupIssue, Issue, MissingTranslationIssue, PatternSyntaxIssue,
        TranslationSyntaxIssue,
    },
};

/// Issues for one call plus the constant it would inline to, if any.
#[derive(Debug, Default)]
pub struct PatternCheck {
    pub issues: Vec<Issue>,
    /// Text the call folds to when its effective pattern has no dynamic parts.
    pub constant: Option<String>,
}

/// Check a literal pattern and, when a catalog is configured, its
/// translation for `locale`.
///
/// An invalid raw pattern stops the checks for this call.
pub fn check_pattern(
    session: &Session,
    pattern: &str,
    locale: &str,
    context: &SourceContext,
) -> PatternCheck {
    let mut check = PatternCheck::default();

    let raw = match session.compiler.parse(pattern) {
        Ok(raw) => raw,
        Err(err) => {
            check.issues.push(
                PatternSyntaxIssue {
                    context: context.clone(),
                    pattern: pattern.to_string(),
                    error: err.to_string(),
                }
                .into(),
            );
            return check;
        }
    };

    let mut effective = raw;
    match session.resolver.resolve(pattern, locale) {
        Ok(Resolution::Untranslated) => {}
        Ok(Resolution::Missing) => check.issues.push(
            MissingTranslationIssue {
                context: context.clone(),
                pattern: pattern.to_string(),
                locale: locale.to_string(),
            }
            .into(),
        ),
        Ok(Resolution::Translated(translation)) => match session.compiler.parse(&translation) {
            Ok(parsed) => effective = parsed,
            Err(err) => check.issues.push(
                TranslationSyntaxIssue {
                    context: context.clone(),
                    locale: locale.to_string(),
                    translation,
                    error: err.to_string(),
                }
                .into(),
            ),
        },
        Err(err) => check.issues.push(
            CatalogLookupIssue {
                context: context.clone(),
                error: err.to_string(),
            }
            .into(),
        ),
    }

    check.constant = match effective.as_slice() {
        [] => Some(String::new()),
        [Element::Text(text)] => Some(text.clone()),
        _ => None,
    };
    check
}
