use core::fmt::Write as _;

use jct_value::{JsonValue, format_number};

/// Output whitespace mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializeMode {
    /// Two-space indentation per nesting level, one member per line.
    Pretty,
    /// No whitespace anywhere.
    Compact,
}

/// Serialize a tree to canonical text: object keys sorted lexicographically
/// ascending. The result never ends with a trailing newline — callers
/// writing to a file append one themselves, so `serialize` stays reusable
/// for embedding a value inline, e.g. in `jct path --pretty` output.
#[must_use]
pub fn serialize(value: &JsonValue, mode: SerializeMode) -> String {
    let mut out = String::new();
    write_value(&mut out, value, mode, 0);
    out
}

fn write_value(out: &mut String, value: &JsonValue, mode: SerializeMode, indent: usize) {
    match value {
        JsonValue::Null => out.push_str("null"),
        JsonValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        JsonValue::Number(n) => out.push_str(&format_number(*n)),
        JsonValue::String(s) => write_escaped_string(out, s),
        JsonValue::Array(items) => write_array(out, items, mode, indent),
        JsonValue::Object(obj) => write_object(out, obj, mode, indent),
    }
}

fn write_array(out: &mut String, items: &[JsonValue], mode: SerializeMode, indent: usize) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_newline_indent(out, mode, indent + 1);
        write_value(out, item, mode, indent + 1);
    }
    write_newline_indent(out, mode, indent);
    out.push(']');
}

fn write_object(
    out: &mut String,
    obj: &jct_value::JsonObject,
    mode: SerializeMode,
    indent: usize,
) {
    if obj.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push('{');
    for (i, (key, val)) in obj.sorted_iter().into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_newline_indent(out, mode, indent + 1);
        write_escaped_string(out, key);
        out.push(':');
        if mode == SerializeMode::Pretty {
            out.push(' ');
        }
        write_value(out, val, mode, indent + 1);
    }
    write_newline_indent(out, mode, indent);
    out.push('}');
}

/// In pretty mode, a newline followed by `indent * 2` spaces; a no-op in
/// compact mode. This is the only inter-member separator pretty mode uses —
/// the comma written just before this call carries no trailing space, so
/// output never carries trailing whitespace before the newline.
fn write_newline_indent(out: &mut String, mode: SerializeMode, indent: usize) {
    if mode == SerializeMode::Pretty {
        out.push('\n');
        for _ in 0..indent {
            out.push_str("  ");
        }
    }
}

fn write_escaped_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
