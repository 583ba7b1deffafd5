//! Common utility functions shared across the codebase.

use serde_json::Value;

/// Render text as a double-quoted JavaScript string literal.
///
/// JSON string escaping is a subset of JavaScript's, so the output is valid
/// in any expression position.
///
/// # Examples
///
/// ```
/// use msginline::utils::js_string_literal;
///
/// assert_eq!(js_string_literal("hello"), "\"hello\"");
/// assert_eq!(js_string_literal("say \"hi\""), "\"say \\\"hi\\\"\"");
/// ```
pub fn js_string_literal(text: &str) -> String {
    Value::String(text.to_owned()).to_string()
}

/// Checks if a name can be used verbatim as a JavaScript identifier part.
pub fn is_identifier_char(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphanumeric()
}
