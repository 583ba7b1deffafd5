use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{FileName, Globals, SourceFile, SourceMap, Span, Spanned};
use swc_ecma_ast::Module;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

use crate::core::{SourceContext, SourceLocation};

pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    pub source_file: Arc<SourceFile>,
    /// Bytes swc dropped from the front of the input (a UTF-8 BOM).
    skipped_prefix: usize,
}

impl ParsedSource {
    /// Byte range of `span` in the text that was passed to the parser.
    pub fn byte_range(&self, span: Span) -> (usize, usize) {
        let base = self.source_file.start_pos.0;
        (
            (span.lo.0 - base) as usize + self.skipped_prefix,
            (span.hi.0 - base) as usize + self.skipped_prefix,
        )
    }

    /// 1-based line and column of the start of `span`.
    pub fn location(&self, file_path: &str, span: Span) -> SourceLocation {
        let loc = self.source_map.lookup_char_pos(span.lo);
        SourceLocation::new(file_path, loc.line, loc.col_display + 1)
    }

    /// Location plus the full text of the source line, for reporting.
    pub fn context(&self, file_path: &str, span: Span) -> SourceContext {
        let loc = self.source_map.lookup_char_pos(span.lo);
        let source_line = loc
            .file
            .get_line(loc.line - 1)
            .map(|line| line.to_string())
            .unwrap_or_default();
        SourceContext::new(
            SourceLocation::new(file_path, loc.line, loc.col_display + 1),
            source_line,
        )
    }
}

/// Pick the parser syntax from the file extension.
///
/// TypeScript files get the TypeScript parser (with TSX for `.tsx`);
/// everything else, including stdin, is parsed as JavaScript with JSX.
pub fn syntax_for_path(file_path: &str) -> Syntax {
    let ext = Path::new(file_path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    match ext {
        "ts" | "mts" | "cts" => Syntax::Typescript(TsSyntax::default()),
        "tsx" => Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        }),
        _ => Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        }),
    }
}

/// Parse host source code into a module AST.
///
/// Accepts a shared SourceMap so files can be parsed in parallel.
pub fn parse_js_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let input_len = code.len();
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), code);
        let skipped_prefix = input_len.saturating_sub(source_file.src.len());

        let mut parser = Parser::new(
            syntax_for_path(file_path),
            StringInput::from(&*source_file),
            None,
        );
        let module = parser.parse_module().map_err(|e| {
            let loc = source_map.lookup_char_pos(e.span().lo);
            anyhow!(
                "{}:{}: {}",
                loc.line,
                loc.col_display + 1,
                e.into_kind().msg()
            )
        })?;

        Ok(ParsedSource {
            module,
            source_map,
            source_file,
            skipped_prefix,
        })
    })
}

/// Check that `code` parses as a standalone module.
pub fn validate_module(code: &str, file_path: &str) -> Result<()> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let source_map = SourceMap::default();
        let source_file =
            source_map.new_source_file(FileName::Anon.into(), code.to_string());
        let mut parser = Parser::new(
            syntax_for_path(file_path),
            StringInput::from(&*source_file),
            None,
        );
        parser
            .parse_module()
            .map(|_| ())
            .map_err(|e| anyhow!("{}", e.into_kind().msg()))
    })
}
