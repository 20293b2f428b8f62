//! JavaScript literal and identifier helpers for generated source text
//!
//! Every string that lands in generated code goes through one of these
//! functions, so names and descriptions taken from the API description can
//! never break out of their literal.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as JsonValue;

static IDENTIFIER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid identifier regex"));

static NON_IDENTIFIER_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_$]").expect("valid identifier char regex"));

const RESERVED_WORDS: &[&str] = &[
    "arguments",
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "eval",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

/// Double-quoted JavaScript string literal
///
/// # Examples
/// ```
/// use bakery::generation::sanitizers::js_string;
///
/// assert_eq!(js_string("ping"), "\"ping\"");
/// assert_eq!(js_string("say \"hi\""), "\"say \\\"hi\\\"\"");
/// ```
pub fn js_string(s: &str) -> String {
    JsonValue::String(s.to_owned()).to_string()
}

/// True when `name` can be written bare as a property key or after `.`
pub fn is_identifier_name(name: &str) -> bool {
    IDENTIFIER_NAME.is_match(name)
}

/// True when `name` can also be bound as a local variable
pub fn is_binding_identifier(name: &str) -> bool {
    is_identifier_name(name) && !RESERVED_WORDS.contains(&name)
}

/// Object-literal key for `name`, quoted only when it has to be
pub fn property_key(name: &str) -> String {
    if is_identifier_name(name) {
        name.to_string()
    } else {
        js_string(name)
    }
}

/// Member access expression `object.name` or `object["name"]`
pub fn member_access(object: &str, name: &str) -> String {
    if is_identifier_name(name) {
        format!("{object}.{name}")
    } else {
        format!("{object}[{}]", js_string(name))
    }
}

/// Local variable name used when destructuring `name` out of an object
pub fn binding_name(name: &str) -> String {
    if is_binding_identifier(name) {
        return name.to_string();
    }
    let mut local = NON_IDENTIFIER_CHARS.replace_all(name, "_").into_owned();
    if local.is_empty() || local.starts_with(|c: char| c.is_ascii_digit()) {
        local.insert(0, '_');
    }
    if RESERVED_WORDS.contains(&local.as_str()) {
        local.push('_');
    }
    local
}

/// Escapes literal text for the inside of a template literal
pub fn template_literal_text(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string() {
        assert_eq!(js_string("GET /ping"), "\"GET /ping\"");
        assert_eq!(js_string("a\nb"), "\"a\\nb\"");
        assert_eq!(js_string("back\\slash"), "\"back\\\\slash\"");
        assert_eq!(js_string(""), "\"\"");
    }

    #[test]
    fn test_property_key() {
        assert_eq!(property_key("petId"), "petId");
        assert_eq!(property_key("$top"), "$top");
        assert_eq!(property_key("class"), "class");
        assert_eq!(property_key("X-Request-Id"), "\"X-Request-Id\"");
        assert_eq!(property_key("2fa"), "\"2fa\"");
    }

    #[test]
    fn test_member_access() {
        assert_eq!(member_access("args", "id"), "args.id");
        assert_eq!(member_access("args", "page-size"), "args[\"page-size\"]");
    }

    #[test]
    fn test_binding_name() {
        assert_eq!(binding_name("id"), "id");
        assert_eq!(binding_name("page-size"), "page_size");
        assert_eq!(binding_name("class"), "class_");
        assert_eq!(binding_name("1st"), "_1st");
        assert_eq!(binding_name("filter[name]"), "filter_name_");
    }

    #[test]
    fn test_template_literal_text() {
        assert_eq!(template_literal_text("/users/"), "/users/");
        assert_eq!(template_literal_text("/a`b"), "/a\\`b");
        assert_eq!(template_literal_text("/${x}"), "/\\${x}");
    }
}
