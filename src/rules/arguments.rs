//! Literal-argument checks for named calls.
//!
//! A call that fails these checks is still valid code; inline mode leaves it
//! alone, so lint only warns.

use swc_ecma_ast::CallExpr;

use crate::{
    core::{FoldedConstants, SourceContext, classify_argument, matcher},
    issues::{ArgumentRole, MalformedArgumentsIssue},
};

/// Warn when the pattern argument is missing or not a string literal.
pub fn check_pattern_argument(
    call: &CallExpr,
    folded: &FoldedConstants,
    context: &SourceContext,
    function_name: &str,
) -> Option<MalformedArgumentsIssue> {
    let is_literal = call
        .args
        .get(matcher::PATTERN_ARG)
        .is_some_and(|arg| classify_argument(arg, folded).literal().is_some());
    (!is_literal).then(|| MalformedArgumentsIssue {
        context: context.clone(),
        function_name: function_name.to_string(),
        argument: ArgumentRole::Pattern,
    })
}

/// Warn when a locale argument is present but not a string literal.
pub fn check_locale_argument(
    call: &CallExpr,
    folded: &FoldedConstants,
    context: &SourceContext,
    function_name: &str,
) -> Option<MalformedArgumentsIssue> {
    let arg = call.args.get(matcher::LOCALE_ARG)?;
    if classify_argument(arg, folded).literal().is_some() {
        return None;
    }
    Some(MalformedArgumentsIssue {
        context: context.clone(),
        function_name: function_name.to_string(),
        argument: ArgumentRole::Locale,
    })
}
