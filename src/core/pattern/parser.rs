//! Recursive-descent parser for the ICU message grammar subset.
//!
//! Quoting follows ICU: `''` is a literal apostrophe, and an apostrophe
//! directly before `{`, `}` (or `#` inside a plural) starts a quoted run
//! that ends at the next lone apostrophe.

use super::ast::{
    DateTimeStyle, Element, NumberStyle, Pattern, PluralOption, PluralSelector, SelectOption,
};
use super::PatternParser;
use crate::core::PatternSyntaxError;

/// Default grammar engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageParser;

impl PatternParser for MessageParser {
    fn parse(&self, pattern: &str) -> Result<Pattern, PatternSyntaxError> {
        parse_pattern(pattern)
    }
}

/// Parse a complete pattern string.
pub fn parse_pattern(pattern: &str) -> Result<Pattern, PatternSyntaxError> {
    let mut parser = Parser::new(pattern);
    let elements = parser.parse_elements(false)?;
    match parser.peek() {
        None => Ok(elements),
        Some(c) => Err(parser.error(format!("unexpected \"{}\"", c))),
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, message: impl Into<String>) -> PatternSyntaxError {
        PatternSyntaxError::new(message, self.pos)
    }

    fn found(&self) -> String {
        match self.peek() {
            Some(c) => format!("\"{}\"", c),
            None => "end of input".to_string(),
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), PatternSyntaxError> {
        if self.peek() == Some(expected) {
            self.bump();
            Ok(())
        } else {
            Err(self.error(format!(
                "expected \"{}\" but found {}",
                expected,
                self.found()
            )))
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Read a run of characters that are not whitespace or syntax.
    fn read_word(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, '{' | '}' | ',' | '#' | '\'') {
                break;
            }
            self.bump();
        }
        &self.src[start..self.pos]
    }

    /// Parse elements until end of input or an unmatched `}`.
    fn parse_elements(&mut self, in_plural: bool) -> Result<Pattern, PatternSyntaxError> {
        let mut elements = Vec::new();
        let mut text = String::new();

        while let Some(c) = self.peek() {
            match c {
                '}' => break,
                '{' => {
                    flush_text(&mut text, &mut elements);
                    elements.push(self.parse_placeholder(in_plural)?);
                }
                '#' if in_plural => {
                    self.bump();
                    flush_text(&mut text, &mut elements);
                    elements.push(Element::PluralValue);
                }
                '\'' => self.parse_quoted(in_plural, &mut text),
                _ => {
                    self.bump();
                    text.push(c);
                }
            }
        }

        flush_text(&mut text, &mut elements);
        Ok(elements)
    }

    fn parse_quoted(&mut self, in_plural: bool, text: &mut String) {
        self.bump();
        match self.peek() {
            Some('\'') => {
                self.bump();
                text.push('\'');
            }
            Some(c) if c == '{' || c == '}' || (c == '#' && in_plural) => {
                while let Some(c) = self.bump() {
                    if c == '\'' {
                        if self.peek() == Some('\'') {
                            self.bump();
                            text.push('\'');
                        } else {
                            return;
                        }
                    } else {
                        text.push(c);
                    }
                }
            }
            _ => text.push('\''),
        }
    }

    fn parse_placeholder(&mut self, in_plural: bool) -> Result<Element, PatternSyntaxError> {
        self.expect('{')?;
        self.skip_whitespace();
        let name = self.read_word();
        if name.is_empty() {
            return Err(self.error(format!("expected argument name but found {}", self.found())));
        }
        let name = name.to_string();
        self.skip_whitespace();

        match self.peek() {
            Some('}') => {
                self.bump();
                Ok(Element::Argument(name))
            }
            Some(',') => {
                self.bump();
                self.skip_whitespace();
                let type_start = self.pos;
                let kind = self.read_word();
                self.skip_whitespace();
                match kind {
                    "number" => {
                        let style = match self.parse_style()? {
                            None => NumberStyle::Decimal,
                            Some(word) => NumberStyle::from_keyword(word).ok_or_else(|| {
                                self.error(format!("unknown number style \"{}\"", word))
                            })?,
                        };
                        self.expect('}')?;
                        Ok(Element::Number { name, style })
                    }
                    "date" | "time" => {
                        let style = match self.parse_style()? {
                            None => DateTimeStyle::Medium,
                            Some(word) => DateTimeStyle::from_keyword(word).ok_or_else(|| {
                                self.error(format!("unknown {} style \"{}\"", kind, word))
                            })?,
                        };
                        self.expect('}')?;
                        if kind == "date" {
                            Ok(Element::Date { name, style })
                        } else {
                            Ok(Element::Time { name, style })
                        }
                    }
                    "plural" | "selectordinal" => {
                        self.expect(',')?;
                        self.parse_plural(name, kind == "selectordinal")
                    }
                    "select" => {
                        self.expect(',')?;
                        self.parse_select(name, in_plural)
                    }
                    "" => Err(self.error(format!("expected argument type but found {}", self.found()))),
                    other => Err(PatternSyntaxError::new(
                        format!("unknown argument type \"{}\"", other),
                        type_start,
                    )),
                }
            }
            _ => Err(self.error(format!("expected \"}}\" but found {}", self.found()))),
        }
    }

    /// Parse an optional `, style` suffix.
    fn parse_style(&mut self) -> Result<Option<&'a str>, PatternSyntaxError> {
        if self.peek() != Some(',') {
            return Ok(None);
        }
        self.bump();
        self.skip_whitespace();
        let word = self.read_word();
        if word.is_empty() {
            return Err(self.error(format!("expected style but found {}", self.found())));
        }
        self.skip_whitespace();
        Ok(Some(word))
    }

    fn parse_plural(&mut self, name: String, ordinal: bool) -> Result<Element, PatternSyntaxError> {
        self.skip_whitespace();
        let mut offset = 0;
        if self.src[self.pos..].starts_with("offset:") {
            self.pos += "offset:".len();
            self.skip_whitespace();
            let digits = self.read_word();
            offset = digits
                .parse()
                .map_err(|_| self.error(format!("invalid plural offset \"{}\"", digits)))?;
        }

        let mut options = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('}') => {
                    self.bump();
                    break;
                }
                None => return Err(self.error("expected \"}\" but found end of input")),
                _ => {}
            }

            let selector_start = self.pos;
            let selector = if self.peek() == Some('=') {
                self.bump();
                let digits = self.read_word();
                let value = digits.parse().map_err(|_| {
                    PatternSyntaxError::new(
                        format!("invalid plural selector \"={}\"", digits),
                        selector_start,
                    )
                })?;
                PluralSelector::Exact(value)
            } else {
                let word = self.read_word();
                if !PluralSelector::CATEGORIES.contains(&word) {
                    return Err(PatternSyntaxError::new(
                        format!("invalid plural category \"{}\"", word),
                        selector_start,
                    ));
                }
                PluralSelector::Category(word.to_string())
            };

            self.skip_whitespace();
            self.expect('{')?;
            let value = self.parse_elements(true)?;
            self.expect('}')?;
            options.push(PluralOption { selector, value });
        }

        if !options.iter().any(|o| o.selector.is_other()) {
            return Err(self.error(format!("missing \"other\" option in plural \"{}\"", name)));
        }

        Ok(Element::Plural {
            name,
            ordinal,
            offset,
            options,
        })
    }

    fn parse_select(&mut self, name: String, in_plural: bool) -> Result<Element, PatternSyntaxError> {
        let mut options = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('}') => {
                    self.bump();
                    break;
                }
                None => return Err(self.error("expected \"}\" but found end of input")),
                _ => {}
            }

            let key = self.read_word();
            if key.is_empty() {
                return Err(self.error(format!("expected select key but found {}", self.found())));
            }
            let key = key.to_string();
            self.skip_whitespace();
            self.expect('{')?;
            let value = self.parse_elements(in_plural)?;
            self.expect('}')?;
            options.push(SelectOption { key, value });
        }

        if !options.iter().any(|o| o.key == "other") {
            return Err(self.error(format!("missing \"other\" option in select \"{}\"", name)));
        }

        Ok(Element::Select { name, options })
    }
}

fn flush_text(text: &mut String, elements: &mut Pattern) {
    if !text.is_empty() {
        elements.push(Element::Text(std::mem::take(text)));
    }
}
