//! Extract mode: collect every eligible pattern into a catalog.

use std::sync::Arc;

use swc_common::SourceMap;
use swc_ecma_ast::CallExpr;
use swc_ecma_visit::{Visit, VisitWith};
use tracing::debug;

use crate::core::{
    CallMatcher, Catalog, FoldedConstants, InlineError, KeyNormalizer, Session,
    pattern::Element,
    parsers::js::{ParsedSource, parse_js_source},
};

struct Extractor<'a> {
    session: &'a Session,
    matcher: CallMatcher,
    parsed: &'a ParsedSource,
    file_path: &'a str,
    folded: FoldedConstants,
    catalog: Catalog,
    error: Option<InlineError>,
}

impl Visit for Extractor<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if self.error.is_some() {
            return;
        }
        node.visit_children_with(self);
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.extract_call(node) {
            self.error = Some(err);
        }
    }
}

impl Extractor<'_> {
    fn extract_call(&mut self, node: &CallExpr) -> Result<(), InlineError> {
        let Some(call) = self.matcher.match_call(node, &self.folded) else {
            return Ok(());
        };
        let pattern = call.pattern.to_string();
        let location = || self.parsed.location(self.file_path, node.span);

        let parsed = self
            .session
            .compiler
            .parse(&pattern)
            .map_err(|source| InlineError::PatternSyntax {
                location: location(),
                pattern: pattern.clone(),
                source,
            })?;

        match parsed.as_slice() {
            [] => {
                self.folded.insert(node.span, String::new());
                return Ok(());
            }
            [Element::Text(text)] => {
                self.folded.insert(node.span, text.clone());
            }
            _ => {}
        }

        let key = self
            .session
            .keys
            .normalize(&pattern)
            .map_err(|source| InlineError::Catalog {
                location: location(),
                source,
            })?;
        debug!("{}: extracted {:?} as {}", location(), pattern, key);
        self.catalog.insert(&self.session.locale, key, pattern);
        Ok(())
    }
}

/// Collect the patterns of one file under the session locale.
///
/// Empty patterns have nothing to translate and are skipped. Patterns that
/// do not parse abort the file.
pub fn extract_source(
    session: &Session,
    code: &str,
    file_path: &str,
) -> Result<Catalog, InlineError> {
    let parsed = parse_js_source(code.to_string(), file_path, Arc::new(SourceMap::default()))
        .map_err(|e| InlineError::SourceParse {
            file_path: file_path.to_string(),
            message: e.to_string(),
        })?;

    let mut extractor = Extractor {
        session,
        matcher: CallMatcher::new(session.function_name.clone()),
        parsed: &parsed,
        file_path,
        folded: FoldedConstants::new(),
        catalog: Catalog::new(),
        error: None,
    };
    parsed.module.visit_with(&mut extractor);
    match extractor.error {
        Some(err) => Err(err),
        None => Ok(extractor.catalog),
    }
}
