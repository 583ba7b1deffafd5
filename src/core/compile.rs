//! Pattern compiler bridge.
//!
//! Owns no grammar logic. It calls the configured [`PatternParser`] and
//! [`CodeGenerator`], classifies the result, names generated functions and
//! caches parsed patterns for the duration of a run.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::core::PatternSyntaxError;
use crate::core::pattern::{
    CodeGenerator, Element, GenerateOptions, JsCodeGenerator, MessageParser, Pattern,
    PatternParser,
};
use crate::utils::is_identifier_char;

/// Outcome of compiling one effective pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledPattern {
    /// No dynamic content: the call becomes this string literal.
    ConstantText(String),
    /// The pattern parses to nothing: the call becomes `""`.
    Empty,
    /// Dynamic content: the call becomes `name(params)` and `body` is hoisted.
    GeneratedFunction { name: String, body: String },
}

pub struct PatternCompiler {
    parser: Arc<dyn PatternParser>,
    generator: Arc<dyn CodeGenerator>,
    host_function_name: String,
    cache: RwLock<HashMap<String, Arc<Pattern>>>,
}

impl std::fmt::Debug for PatternCompiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternCompiler")
            .field("host_function_name", &self.host_function_name)
            .finish_non_exhaustive()
    }
}

impl PatternCompiler {
    /// Compiler using the built-in grammar and JavaScript generator.
    pub fn new(host_function_name: impl Into<String>) -> Self {
        Self::with_collaborators(
            host_function_name,
            Arc::new(MessageParser),
            Arc::new(JsCodeGenerator),
        )
    }

    pub fn with_collaborators(
        host_function_name: impl Into<String>,
        parser: Arc<dyn PatternParser>,
        generator: Arc<dyn CodeGenerator>,
    ) -> Self {
        Self {
            parser,
            generator,
            host_function_name: host_function_name.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn host_function_name(&self) -> &str {
        &self.host_function_name
    }

    /// Name of the `index`-th generated function in a file (1-based).
    ///
    /// Characters that cannot appear in an identifier are replaced with `_`.
    pub fn function_name(&self, index: usize) -> String {
        let host: String = self
            .host_function_name
            .chars()
            .map(|c| if is_identifier_char(c) { c } else { '_' })
            .collect();
        format!("__{}_{}", host, index)
    }

    /// Parse a pattern, reusing an earlier parse of the same text.
    ///
    /// Only successful parses are cached.
    pub fn parse(&self, pattern: &str) -> Result<Arc<Pattern>, PatternSyntaxError> {
        if let Ok(cache) = self.cache.read()
            && let Some(parsed) = cache.get(pattern)
        {
            return Ok(Arc::clone(parsed));
        }

        let parsed = Arc::new(self.parser.parse(pattern)?);
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(pattern.to_string(), Arc::clone(&parsed));
        }
        Ok(parsed)
    }

    /// Compile an effective pattern for `locale`.
    ///
    /// `function_name` is only used when the pattern needs a generated function.
    pub fn compile(
        &self,
        pattern: &str,
        locale: &str,
        function_name: &str,
    ) -> Result<CompiledPattern, PatternSyntaxError> {
        let parsed = self.parse(pattern)?;

        match parsed.as_slice() {
            [] => Ok(CompiledPattern::Empty),
            [Element::Text(text)] => Ok(CompiledPattern::ConstantText(text.clone())),
            _ => {
                let body = self.generator.generate(
                    &parsed,
                    &GenerateOptions {
                        locale,
                        host_function_name: &self.host_function_name,
                        function_name,
                    },
                );
                Ok(CompiledPattern::GeneratedFunction {
                    name: function_name.to_string(),
                    body,
                })
            }
        }
    }
}
