//! Rewrite engine for inline mode.
//!
//! Walks a module children-first, replaces every eligible call with its
//! compiled form and hoists generated functions to the end of the file.
//!
//! Replacement is expressed as text edits over the original source rather
//! than AST mutation: an outer call that wraps an already-replaced call
//! receives the inner replacement text inside its parameters argument, and
//! a call folded to a constant counts as a string literal for its parent.

use std::sync::Arc;

use swc_common::{SourceMap, Spanned};
use swc_ecma_ast::CallExpr;
use swc_ecma_visit::{Visit, VisitWith};
use tracing::{debug, warn};

use crate::core::{
    CallMatcher, CompiledPattern, Edit, FoldedConstants, InlineError, PositionMap, Resolution,
    Session, TranslationErrorPolicy,
    parsers::js::{ParsedSource, parse_js_source, validate_module},
    print::{print_source, splice},
};
use crate::utils::js_string_literal;

/// Generated functions collected during one file's pass.
///
/// Names are numbered in push order from the first index, so a fresh
/// accumulator per file gives file-unique names without any shared counter.
/// A discarded function leaves an empty slot so later names stay valid;
/// trailing empty slots are reclaimed.
#[derive(Debug)]
pub struct HoistedFunctions {
    first_index: usize,
    bodies: Vec<Option<String>>,
}

impl Default for HoistedFunctions {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl HoistedFunctions {
    pub fn starting_at(first_index: usize) -> Self {
        Self {
            first_index,
            bodies: Vec::new(),
        }
    }

    /// Index the next pushed function will be named with.
    pub fn next_index(&self) -> usize {
        self.first_index + self.bodies.len()
    }

    pub fn push(&mut self, body: String) {
        self.bodies.push(Some(body));
    }

    /// Drop the function named with `index`.
    pub fn discard(&mut self, index: usize) {
        if let Some(slot) = index
            .checked_sub(self.first_index)
            .and_then(|i| self.bodies.get_mut(i))
        {
            *slot = None;
        }
        while matches!(self.bodies.last(), Some(None)) {
            self.bodies.pop();
        }
    }

    /// Number of functions that will be hoisted.
    pub fn len(&self) -> usize {
        self.bodies.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenate and clear the accumulated bodies.
    pub fn flush(&mut self) -> Option<String> {
        let bodies: Vec<String> = std::mem::take(&mut self.bodies).into_iter().flatten().collect();
        if bodies.is_empty() {
            return None;
        }
        Some(bodies.concat())
    }
}

/// Result of inlining one file.
#[derive(Debug, Clone)]
pub struct InlineOutput {
    pub code: String,
    pub position_map: PositionMap,
    /// Number of call sites that were replaced.
    pub replaced_count: usize,
    /// Number of functions hoisted to the end of the file.
    pub generated_count: usize,
    /// First function index not used by this file's generated names.
    pub next_index: usize,
}

/// A text edit plus the generated functions its text calls.
struct Replacement {
    edit: Edit,
    functions: Vec<usize>,
}

/// An eligible call with everything copied out of the AST.
struct CallSite {
    pattern: String,
    locale: String,
    start: usize,
    end: usize,
    /// Byte range of the parameters argument.
    params: Option<(usize, usize)>,
}

struct Rewriter<'a> {
    session: &'a Session,
    matcher: CallMatcher,
    parsed: &'a ParsedSource,
    source: &'a str,
    file_path: &'a str,
    replacements: Vec<Replacement>,
    folded: FoldedConstants,
    hoisted: HoistedFunctions,
    replaced: usize,
    error: Option<InlineError>,
}

impl Visit for Rewriter<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if self.error.is_some() {
            return;
        }
        node.visit_children_with(self);
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.rewrite_call(node) {
            self.error = Some(err);
        }
    }
}

impl Rewriter<'_> {
    fn call_site(&self, node: &CallExpr) -> Option<CallSite> {
        let call = self.matcher.match_call(node, &self.folded)?;
        let (start, end) = self.parsed.byte_range(node.span);
        Some(CallSite {
            pattern: call.pattern.to_string(),
            locale: self.session.effective_locale(call.locale).to_string(),
            start,
            end,
            params: call.params.map(|arg| self.parsed.byte_range(arg.span())),
        })
    }

    /// Pick the pattern to compile, applying the broken-translation policy.
    fn effective_pattern(&self, site: &CallSite, node: &CallExpr) -> Result<String, InlineError> {
        let session = self.session;
        let location = || self.parsed.location(self.file_path, node.span);

        session
            .compiler
            .parse(&site.pattern)
            .map_err(|source| InlineError::PatternSyntax {
                location: location(),
                pattern: site.pattern.clone(),
                source,
            })?;

        let resolution = session
            .resolver
            .resolve(&site.pattern, &site.locale)
            .map_err(|source| InlineError::Catalog {
                location: location(),
                source,
            })?;

        let Resolution::Translated(translation) = resolution else {
            if resolution == Resolution::Missing {
                debug!(
                    "{}: no {} translation for {:?}",
                    location(),
                    site.locale,
                    site.pattern
                );
            }
            return Ok(site.pattern.clone());
        };

        match session.compiler.parse(&translation) {
            Ok(_) => Ok(translation),
            Err(source) => match session.on_invalid_translation {
                TranslationErrorPolicy::Fallback => {
                    warn!(
                        "{}: invalid {} translation {:?} ({}), using the original pattern",
                        location(),
                        site.locale,
                        translation,
                        source
                    );
                    Ok(site.pattern.clone())
                }
                TranslationErrorPolicy::Error => Err(InlineError::TranslationSyntax {
                    location: location(),
                    locale: site.locale.clone(),
                    translation,
                    source,
                }),
            },
        }
    }

    fn discard(&mut self, replacements: Vec<Replacement>) {
        for index in replacements.into_iter().flat_map(|r| r.functions) {
            self.hoisted.discard(index);
        }
    }

    fn rewrite_call(&mut self, node: &CallExpr) -> Result<(), InlineError> {
        let Some(site) = self.call_site(node) else {
            return Ok(());
        };
        let pattern = self.effective_pattern(&site, node)?;

        // Replacements are pushed in completion order, so everything inside
        // this call is at the tail. Only those inside the parameters argument
        // can survive this call's replacement.
        let first_inner = self
            .replacements
            .iter()
            .position(|r| r.edit.start >= site.start)
            .unwrap_or(self.replacements.len());
        let (in_params, dropped): (Vec<Replacement>, Vec<Replacement>) = self
            .replacements
            .split_off(first_inner)
            .into_iter()
            .partition(|r| {
                site.params
                    .is_some_and(|(start, end)| r.edit.start >= start && r.edit.end <= end)
            });
        self.discard(dropped);

        let session = self.session;
        let compiler = &session.compiler;
        let index = self.hoisted.next_index();
        let function_name = compiler.function_name(index);
        let compiled = compiler
            .compile(&pattern, &site.locale, &function_name)
            .map_err(|source| InlineError::PatternSyntax {
                location: self.parsed.location(self.file_path, node.span),
                pattern: pattern.clone(),
                source,
            })?;

        let (text, functions) = match compiled {
            CompiledPattern::ConstantText(text) => {
                self.discard(in_params);
                let literal = js_string_literal(&text);
                self.folded.insert(node.span, text);
                (literal, Vec::new())
            }
            CompiledPattern::Empty => {
                self.discard(in_params);
                self.folded.insert(node.span, String::new());
                (js_string_literal(""), Vec::new())
            }
            CompiledPattern::GeneratedFunction { name, body } => {
                let params = match site.params {
                    Some((start, end)) => {
                        let nested: Vec<Edit> =
                            in_params.iter().map(|r| r.edit.clone()).collect();
                        splice(self.source, start, end - start, &nested)
                    }
                    None => "null".to_string(),
                };
                let mut functions: Vec<usize> =
                    in_params.into_iter().flat_map(|r| r.functions).collect();
                functions.push(index);
                self.hoisted.push(body);
                (format!("{}({})", name, params), functions)
            }
        };

        debug!(
            "{}: inlined {}() call for locale {}",
            self.parsed.location(self.file_path, node.span),
            self.session.function_name,
            site.locale
        );
        self.replacements.push(Replacement {
            edit: Edit {
                start: site.start,
                end: site.end,
                text,
            },
            functions,
        });
        self.replaced += 1;
        Ok(())
    }
}

/// Inline every eligible call in one file.
///
/// `input_map` maps `code` back to an earlier stage; when given, the output
/// map is composed through it.
pub fn inline_source(
    session: &Session,
    code: &str,
    file_path: &str,
    input_map: Option<&PositionMap>,
) -> Result<InlineOutput, InlineError> {
    inline_source_from(session, code, file_path, input_map, 1)
}

/// Same as [`inline_source`], numbering generated functions from
/// `first_index`. Outputs that end up in one file need disjoint ranges.
pub fn inline_source_from(
    session: &Session,
    code: &str,
    file_path: &str,
    input_map: Option<&PositionMap>,
    first_index: usize,
) -> Result<InlineOutput, InlineError> {
    let parsed = parse_js_source(code.to_string(), file_path, Arc::new(SourceMap::default()))
        .map_err(|e| InlineError::SourceParse {
            file_path: file_path.to_string(),
            message: e.to_string(),
        })?;

    let mut rewriter = Rewriter {
        session,
        matcher: CallMatcher::new(session.function_name.clone()),
        parsed: &parsed,
        source: code,
        file_path,
        replacements: Vec::new(),
        folded: FoldedConstants::new(),
        hoisted: HoistedFunctions::starting_at(first_index),
        replaced: 0,
        error: None,
    };
    parsed.module.visit_with(&mut rewriter);
    if let Some(err) = rewriter.error {
        return Err(err);
    }

    let generated_count = rewriter.hoisted.len();
    let next_index = rewriter.hoisted.next_index();
    let trailer = rewriter.hoisted.flush();
    if let Some(trailer) = &trailer {
        validate_module(trailer, file_path).map_err(|e| InlineError::GeneratedCode {
            file_path: file_path.to_string(),
            message: e.to_string(),
        })?;
    }

    let edits: Vec<Edit> = rewriter.replacements.into_iter().map(|r| r.edit).collect();
    let printed = print_source(code, file_path, &edits, trailer.as_deref());
    let position_map = match input_map {
        Some(upstream) => printed.position_map.compose(upstream),
        None => printed.position_map,
    };
    debug!(
        "{}: {} call(s) inlined, {} function(s) hoisted",
        file_path, rewriter.replaced, generated_count
    );

    Ok(InlineOutput {
        code: printed.code,
        position_map,
        replaced_count: rewriter.replaced,
        generated_count,
        next_index,
    })
}
