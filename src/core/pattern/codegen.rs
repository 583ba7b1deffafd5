//! JavaScript code generator for parsed patterns.
//!
//! Emits one self-contained function declaration per pattern. The locale is
//! baked into every `Intl` constructor so the function only takes the
//! parameters object.

use super::ast::{DateTimeStyle, Element, NumberStyle, PluralSelector};
use super::{CodeGenerator, GenerateOptions, Pattern};
use crate::utils::js_string_literal;

/// Default code generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsCodeGenerator;

impl CodeGenerator for JsCodeGenerator {
    fn generate(&self, pattern: &Pattern, options: &GenerateOptions<'_>) -> String {
        let mut state = State {
            locale: js_string_literal(options.locale),
            plurals: Vec::new(),
            next_var: 0,
        };
        let body = state.pattern_expr(pattern);
        format!(
            "// {}() message compiled for {}\nfunction {}(args) {{\n  args = args || {{}};\n  return {};\n}}\n",
            options.host_function_name, state.locale, options.function_name, body
        )
    }
}

struct State {
    /// Locale as a JS string literal.
    locale: String,
    /// Enclosing plurals as (variable, offset), innermost last.
    plurals: Vec<(String, u32)>,
    next_var: usize,
}

impl State {
    fn fresh_var(&mut self, prefix: &str) -> String {
        let name = format!("{}{}", prefix, self.next_var);
        self.next_var += 1;
        name
    }

    fn pattern_expr(&mut self, pattern: &Pattern) -> String {
        if pattern.is_empty() {
            return "\"\"".to_string();
        }
        // Every element renders to a string, so `+` always concatenates.
        let parts: Vec<String> = pattern.iter().map(|e| self.element_expr(e)).collect();
        parts.join(" + ")
    }

    fn element_expr(&mut self, element: &Element) -> String {
        match element {
            Element::Text(text) => js_string_literal(text),
            Element::Argument(name) => format!("String({})", arg_access(name)),
            Element::Number { name, style } => format!(
                "new Intl.NumberFormat({}, {}).format({})",
                self.locale,
                number_options(*style),
                arg_access(name)
            ),
            Element::Date { name, style } => format!(
                "new Intl.DateTimeFormat({}, {}).format({})",
                self.locale,
                date_options(*style),
                arg_access(name)
            ),
            Element::Time { name, style } => format!(
                "new Intl.DateTimeFormat({}, {}).format({})",
                self.locale,
                time_options(*style),
                arg_access(name)
            ),
            Element::PluralValue => match self.plurals.last() {
                Some((var, offset)) => format!(
                    "new Intl.NumberFormat({}).format({})",
                    self.locale,
                    offset_expr(var, *offset)
                ),
                None => js_string_literal("#"),
            },
            Element::Plural {
                name,
                ordinal,
                offset,
                options,
            } => {
                let var = self.fresh_var("n");
                self.plurals.push((var.clone(), *offset));

                let mut exact = Vec::new();
                let mut categories = Vec::new();
                let mut other = "\"\"".to_string();
                for option in options {
                    let value = self.pattern_expr(&option.value);
                    match &option.selector {
                        PluralSelector::Exact(n) => {
                            exact.push(format!("if ({} === {}) return {};", var, n, value));
                        }
                        selector if selector.is_other() => other = value,
                        PluralSelector::Category(category) => {
                            categories.push(format!("case \"{}\": return {};", category, value));
                        }
                    }
                }
                self.plurals.pop();

                let mut body = exact.join(" ");
                if !body.is_empty() {
                    body.push(' ');
                }
                if categories.is_empty() {
                    body.push_str(&format!("return {};", other));
                } else {
                    body.push_str(&format!(
                        "switch (new Intl.PluralRules({}, {{ type: \"{}\" }}).select({})) {{ {} default: return {}; }}",
                        self.locale,
                        if *ordinal { "ordinal" } else { "cardinal" },
                        offset_expr(&var, *offset),
                        categories.join(" "),
                        other
                    ));
                }
                format!("(function ({}) {{ {} }})(+{})", var, body, arg_access(name))
            }
            Element::Select { name, options } => {
                let var = self.fresh_var("s");
                let mut cases = Vec::new();
                let mut other = "\"\"".to_string();
                for option in options {
                    let value = self.pattern_expr(&option.value);
                    if option.key == "other" {
                        other = value;
                    } else {
                        cases.push(format!(
                            "case {}: return {};",
                            js_string_literal(&option.key),
                            value
                        ));
                    }
                }
                format!(
                    "(function ({var}) {{ switch (String({var})) {{ {} default: return {}; }} }})({})",
                    cases.join(" "),
                    other,
                    arg_access(name),
                    var = var
                )
            }
        }
    }
}

fn arg_access(name: &str) -> String {
    format!("args[{}]", js_string_literal(name))
}

fn offset_expr(var: &str, offset: u32) -> String {
    if offset == 0 {
        var.to_string()
    } else {
        format!("{} - {}", var, offset)
    }
}

fn number_options(style: NumberStyle) -> &'static str {
    match style {
        NumberStyle::Decimal => "{}",
        NumberStyle::Integer => "{ maximumFractionDigits: 0 }",
        NumberStyle::Percent => "{ style: \"percent\" }",
        NumberStyle::Currency => "{ style: \"currency\", currency: \"USD\" }",
    }
}

fn date_options(style: DateTimeStyle) -> &'static str {
    match style {
        DateTimeStyle::Short => "{ month: \"numeric\", day: \"numeric\", year: \"2-digit\" }",
        DateTimeStyle::Medium => "{ month: \"short\", day: \"numeric\", year: \"numeric\" }",
        DateTimeStyle::Long => "{ month: \"long\", day: \"numeric\", year: \"numeric\" }",
        DateTimeStyle::Full => {
            "{ weekday: \"long\", month: \"long\", day: \"numeric\", year: \"numeric\" }"
        }
    }
}

fn time_options(style: DateTimeStyle) -> &'static str {
    match style {
        DateTimeStyle::Short => "{ hour: \"numeric\", minute: \"numeric\" }",
        DateTimeStyle::Medium => "{ hour: \"numeric\", minute: \"numeric\", second: \"numeric\" }",
        DateTimeStyle::Long | DateTimeStyle::Full => {
            "{ hour: \"numeric\", minute: \"numeric\", second: \"numeric\", timeZoneName: \"short\" }"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pattern::parse_pattern;
    use pretty_assertions::assert_eq;

    fn generate(pattern: &str, locale: &str) -> String {
        let parsed = parse_pattern(pattern).unwrap();
        JsCodeGenerator.generate(
            &parsed,
            &GenerateOptions {
                locale,
                host_function_name: "format",
                function_name: "__format_1",
            },
        )
    }

    #[test]
    fn test_simple_argument() {
        assert_eq!(
            generate("x{ name }z", "en"),
            "// format() message compiled for \"en\"\n\
             function __format_1(args) {\n  \
             args = args || {};\n  \
             return \"x\" + String(args[\"name\"]) + \"z\";\n\
             }\n"
        );
    }

    #[test]
    fn test_adjacent_arguments_concatenate() {
        let code = generate("{a}{b}", "en");
        assert!(code.contains("return String(args[\"a\"]) + String(args[\"b\"]);"));
    }

    #[test]
    fn test_locale_is_baked_in() {
        let code = generate("{n, number, percent}", "pt-BR");
        assert!(code.contains("new Intl.NumberFormat(\"pt-BR\", { style: \"percent\" })"));
    }

    #[test]
    fn test_plural_uses_offset_for_hash_and_rules() {
        let code = generate("{n, plural, offset:1 =0 {none} one {# more} other {# more}}", "en");
        assert!(code.contains("if (n0 === 0) return \"none\";"));
        assert!(code.contains(".select(n0 - 1)"));
        assert!(code.contains("new Intl.NumberFormat(\"en\").format(n0 - 1)"));
        assert!(code.contains("(+args[\"n\"])"));
    }

    #[test]
    fn test_plural_with_only_other_skips_rules() {
        let code = generate("{n, plural, other {# items}}", "en");
        assert!(!code.contains("PluralRules"));
        assert!(code.contains("return new Intl.NumberFormat(\"en\").format(n0) + \" items\";"));
    }

    #[test]
    fn test_selectordinal_type() {
        let code = generate("{n, selectordinal, one {#st} other {#th}}", "en");
        assert!(code.contains("type: \"ordinal\""));
    }

    #[test]
    fn test_select_cases() {
        let code = generate("{g, select, male {he} female {she} other {they}}", "en");
        assert!(code.contains("switch (String(s0)) { case \"male\": return \"he\"; case \"female\": return \"she\"; default: return \"they\"; }"));
    }
}
