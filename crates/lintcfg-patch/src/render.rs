/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Rendering of [`Value`]s as YAML text fragments.
//!
//! Block output follows the conventional layout: mapping entries are indented
//! two columns below their key, a sequence under a key is indented two columns
//! as well, and a mapping that is a sequence item starts on the dash line with
//! its remaining keys aligned under the first. Empty collections are written
//! as `{}` and `[]`.

use crate::{Scalar, Value};
use indexmap::IndexMap;
use std::fmt::Write;

impl Value {
    /// Render this value as a standalone block YAML document.
    pub fn to_yaml(&self) -> String {
        let mut out = root_body(self, 0);
        out.push('\n');
        out
    }
}

/// Text that follows `key:` for a key at column `key_indent`.
pub(crate) fn after_key(value: &Value, key_indent: usize) -> String {
    let child_indent = key_indent + 2;
    match value {
        Value::Mapping(map) if !map.is_empty() => {
            format!("\n{}{}", spaces(child_indent), mapping_body(map, child_indent))
        }
        Value::Sequence(items) if !items.is_empty() => {
            format!("\n{}{}", spaces(child_indent), sequence_body(items, child_indent))
        }
        _ => format!(" {}", inline(value)),
    }
}

/// Text that follows `-` for a dash at column `dash_indent`.
pub(crate) fn after_dash(value: &Value, dash_indent: usize) -> String {
    let child_indent = dash_indent + 2;
    match value {
        Value::Mapping(map) if !map.is_empty() => format!(" {}", mapping_body(map, child_indent)),
        Value::Sequence(items) if !items.is_empty() => {
            format!(" {}", sequence_body(items, child_indent))
        }
        _ => format!(" {}", inline(value)),
    }
}

/// A full `key: value` line at column `indent`.
pub(crate) fn entry_line(key: &str, value: &Value, indent: usize) -> String {
    format!("{}{}:{}", spaces(indent), key_text(key, false), after_key(value, indent))
}

/// A full `- value` line at column `indent`.
pub(crate) fn item_line(value: &Value, indent: usize) -> String {
    format!("{}-{}", spaces(indent), after_dash(value, indent))
}

/// Content of a node whose first line starts at column `indent`, without the
/// leading indentation of that first line.
pub(crate) fn root_body(value: &Value, indent: usize) -> String {
    match value {
        Value::Mapping(map) if !map.is_empty() => mapping_body(map, indent),
        Value::Sequence(items) if !items.is_empty() => sequence_body(items, indent),
        _ => inline(value),
    }
}

fn mapping_body(map: &IndexMap<String, Value>, indent: usize) -> String {
    let mut out = String::new();
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(&spaces(indent));
        }
        out.push_str(&key_text(key, false));
        out.push(':');
        out.push_str(&after_key(value, indent));
    }
    out
}

fn sequence_body(items: &[Value], indent: usize) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(&spaces(indent));
        }
        out.push('-');
        out.push_str(&after_dash(item, indent));
    }
    out
}

/// Single-line rendering for scalars and empty collections.
fn inline(value: &Value) -> String {
    match value {
        Value::Scalar(scalar) => scalar_text(scalar, false),
        _ => flow(value),
    }
}

/// Flow-style rendering, used inside `[...]` and `{...}` collections.
pub(crate) fn flow(value: &Value) -> String {
    match value {
        Value::Scalar(scalar) => scalar_text(scalar, true),
        Value::Sequence(items) => {
            let items: Vec<String> = items.iter().map(flow).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Mapping(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}: {}", key_text(key, true), flow(value)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

pub(crate) fn key_text(key: &str, flow: bool) -> String {
    string_text(key, flow)
}

fn scalar_text(scalar: &Scalar, flow: bool) -> String {
    match scalar {
        Scalar::Null => "null".to_string(),
        Scalar::Bool(b) => b.to_string(),
        Scalar::Int(i) => i.to_string(),
        Scalar::UInt(u) => u.to_string(),
        Scalar::Float(f) => float_text(*f),
        Scalar::String(s) => string_text(s, flow),
    }
}

fn float_text(f: f64) -> String {
    if f.is_nan() {
        return ".nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { ".inf" } else { "-.inf" }.to_string();
    }
    let text = f.to_string();
    if text.contains(['.', 'e', 'E']) {
        text
    } else {
        format!("{text}.0")
    }
}

fn string_text(s: &str, flow: bool) -> String {
    if needs_quotes(s, flow) {
        double_quoted(s)
    } else {
        s.to_string()
    }
}

fn needs_quotes(s: &str, flow: bool) -> bool {
    let Some(first) = s.chars().next() else {
        return true;
    };
    if s.trim() != s || is_reserved_word(s) || looks_numeric(s) {
        return true;
    }
    if matches!(
        first,
        ',' | '[' | ']' | '{' | '}' | '#' | '&' | '*' | '!' | '|' | '>' | '\'' | '"' | '%' | '@' | '`'
    ) {
        return true;
    }
    // `-`, `?` and `:` only start an indicator when followed by a space.
    if matches!(first, '-' | '?' | ':') && s[1..].chars().next().is_none_or(|c| c == ' ') {
        return true;
    }
    if s.starts_with("---") || s.starts_with("...") {
        return true;
    }
    if s.contains(": ") || s.ends_with(':') || s.contains(" #") {
        return true;
    }
    if s.chars().any(|c| c.is_control() || c == '\\') {
        return true;
    }
    flow && s.contains([',', '[', ']', '{', '}'])
}

fn is_reserved_word(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "~" | "null" | "true" | "false" | "yes" | "no" | "on" | "off" | "y" | "n"
    )
}

fn looks_numeric(s: &str) -> bool {
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    let lower = body.to_ascii_lowercase();
    if lower.starts_with("0x") || lower.starts_with("0o") || lower.starts_with("0b") {
        return true;
    }
    if lower == ".inf" || lower == ".nan" {
        return true;
    }
    if !body.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return false;
    }
    body.replace('_', "").parse::<f64>().is_ok()
}

fn double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn spaces(n: usize) -> String {
    " ".repeat(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_quoted_strings() {
        assert_eq!(string_text("internal/generated/.*", false), "internal/generated/.*");
        assert_eq!(string_text("^internal/generated$", false), "^internal/generated$");
        assert_eq!(string_text("io.Copy(*bytes.Buffer)", false), "io.Copy(*bytes.Buffer)");
        assert_eq!(string_text(r"_test\.go", false), r#""_test\\.go""#);
        assert_eq!(string_text("2", false), r#""2""#);
        assert_eq!(string_text("true", false), r#""true""#);
        assert_eq!(string_text("", false), r#""""#);
        assert_eq!(string_text("*.go", false), r#""*.go""#);
        assert_eq!(string_text("a: b", false), r#""a: b""#);
        assert_eq!(string_text(" padded", false), r#"" padded""#);
        assert_eq!(string_text("line\nbreak", false), r#""line\nbreak""#);
        assert_eq!(string_text("-foo", false), "-foo");
        assert_eq!(string_text("-", false), r#""-""#);
    }

    #[test]
    fn test_flow_quotes_flow_indicators() {
        assert_eq!(string_text("a,b", false), "a,b");
        assert_eq!(string_text("a,b", true), r#""a,b""#);
    }

    #[test]
    fn test_scalars() {
        assert_eq!(inline(&Value::null()), "null");
        assert_eq!(inline(&Value::from(false)), "false");
        assert_eq!(inline(&Value::from(-3i64)), "-3");
        assert_eq!(inline(&Value::from(u64::MAX)), "18446744073709551615");
        assert_eq!(inline(&Value::from(1.0)), "1.0");
        assert_eq!(inline(&Value::from(0.25)), "0.25");
        assert_eq!(inline(&Value::from(f64::INFINITY)), ".inf");
        assert_eq!(inline(&Value::Mapping(IndexMap::new())), "{}");
        assert_eq!(inline(&Value::Sequence(Vec::new())), "[]");
    }

    #[test]
    fn test_block_document() {
        let value = Value::mapping([
            ("version", Value::string("2")),
            (
                "linters",
                Value::mapping([
                    ("enable", Value::sequence(["errcheck", "govet"])),
                    (
                        "exclusions",
                        Value::mapping([(
                            "rules",
                            Value::sequence([Value::mapping([
                                ("linters", Value::sequence(["gocritic"])),
                                ("path", Value::string(r"_test\.go")),
                            ])]),
                        )]),
                    ),
                ]),
            ),
        ]);
        insta::assert_snapshot!(value.to_yaml(), @r#"
        version: "2"
        linters:
          enable:
            - errcheck
            - govet
          exclusions:
            rules:
              - linters:
                  - gocritic
                path: "_test\\.go"
        "#);
    }

    #[test]
    fn test_nested_sequences() {
        let value = Value::sequence([Value::sequence(["a", "b"]), Value::sequence(Vec::<Value>::new())]);
        assert_eq!(value.to_yaml(), "- - a\n  - b\n- []\n");
    }

    #[test]
    fn test_entry_and_item_lines() {
        let value = Value::mapping([("default", "none")]);
        assert_eq!(entry_line("linters", &value, 2), "  linters:\n    default: none");
        assert_eq!(item_line(&value, 4), "    - default: none");
    }

    #[test]
    fn test_flow() {
        let value = Value::mapping([
            ("enable", Value::sequence(["a", "b,c"])),
            ("empty", Value::Mapping(IndexMap::new())),
        ]);
        assert_eq!(flow(&value), r#"{enable: [a, "b,c"], empty: {}}"#);
    }
}
