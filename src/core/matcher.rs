//! Call-site matching.
//!
//! A call is *named* when its callee is the configured identifier, and
//! *eligible* when in addition its pattern argument (and locale argument, if
//! any) are compile-time string literals.

use std::collections::HashMap;

use swc_common::{Span, Spanned};
use swc_ecma_ast::{CallExpr, Callee, Expr, ExprOrSpread, Lit};

/// Calls already replaced by a constant, keyed by the call's span.
///
/// Lets an enclosing call treat an inner `format("x")` as the literal `"x"`.
pub type FoldedConstants = HashMap<Span, String>;

/// Position of the pattern argument.
pub const PATTERN_ARG: usize = 0;
/// Position of the parameters argument.
pub const PARAMS_ARG: usize = 1;
/// Position of the locale argument.
pub const LOCALE_ARG: usize = 2;

/// What an argument looks like to the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind<'a> {
    /// A string literal, or a call already folded to one.
    StringLiteral(&'a str),
    /// A template literal with one text segment and no interpolation.
    Template(&'a str),
    Other,
}

impl<'a> ArgumentKind<'a> {
    /// The literal value, if this argument is known at compile time.
    pub fn literal(self) -> Option<&'a str> {
        match self {
            ArgumentKind::StringLiteral(value) | ArgumentKind::Template(value) => Some(value),
            ArgumentKind::Other => None,
        }
    }
}

/// Remove redundant parentheses: `(("x"))` -> `"x"`.
pub fn unwrap_paren(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_paren(&paren.expr),
        _ => expr,
    }
}

pub fn classify_argument<'a>(arg: &'a ExprOrSpread, folded: &'a FoldedConstants) -> ArgumentKind<'a> {
    if arg.spread.is_some() {
        return ArgumentKind::Other;
    }
    let expr = unwrap_paren(&arg.expr);
    if let Some(value) = folded.get(&expr.span()) {
        return ArgumentKind::StringLiteral(value);
    }
    match expr {
        Expr::Lit(Lit::Str(s)) => s
            .value
            .as_str()
            .map_or(ArgumentKind::Other, ArgumentKind::StringLiteral),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() && tpl.quasis.len() == 1 => tpl.quasis[0]
            .cooked
            .as_ref()
            .and_then(|cooked| cooked.as_str())
            .map_or(ArgumentKind::Other, ArgumentKind::Template),
        _ => ArgumentKind::Other,
    }
}

/// A named call whose literal arguments have been read.
#[derive(Debug, Clone, Copy)]
pub struct EligibleCall<'a> {
    pub pattern: &'a str,
    pub params: Option<&'a ExprOrSpread>,
    /// Literal locale argument, if one was passed.
    pub locale: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct CallMatcher {
    function_name: String,
}

impl CallMatcher {
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
        }
    }

    /// Callee name match only, regardless of the arguments.
    pub fn is_named_call(&self, call: &CallExpr) -> bool {
        if let Callee::Expr(callee) = &call.callee
            && let Expr::Ident(ident) = unwrap_paren(callee)
        {
            return ident.sym.as_str() == self.function_name;
        }
        false
    }

    /// Read the arguments of an eligible call, or `None` if the call is not
    /// named or its pattern/locale arguments are not literals.
    pub fn match_call<'a>(
        &self,
        call: &'a CallExpr,
        folded: &'a FoldedConstants,
    ) -> Option<EligibleCall<'a>> {
        if !self.is_named_call(call) {
            return None;
        }
        let pattern = classify_argument(call.args.get(PATTERN_ARG)?, folded).literal()?;
        let locale = match call.args.get(LOCALE_ARG) {
            Some(arg) => Some(classify_argument(arg, folded).literal()?),
            None => None,
        };
        Some(EligibleCall {
            pattern,
            params: call.args.get(PARAMS_ARG),
            locale,
        })
    }

    pub fn is_eligible(&self, call: &CallExpr, folded: &FoldedConstants) -> bool {
        self.match_call(call, folded).is_some()
    }
}
