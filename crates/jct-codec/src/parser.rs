use jct_error::{JctError, JctResult};
use jct_value::{JsonObject, JsonValue};

use crate::{MAX_DEPTH, MAX_INPUT_BYTES};

/// Parse JSON text into a tree.
///
/// Empty input (or input that is only whitespace) returns an empty object —
/// permissive legacy behavior carried over deliberately, not a bug. Trailing
/// characters after a valid top-level value are logged as a warning and
/// otherwise ignored; only genuinely malformed syntax (unterminated
/// strings, mismatched delimiters, stray commas, misplaced colons) is a
/// hard [`JctError::ParseError`].
///
/// # Errors
///
/// Returns [`JctError::BadInput`] if `input` exceeds [`MAX_INPUT_BYTES`] or
/// nests deeper than the recursion guard, and [`JctError::ParseError`] for
/// malformed JSON syntax.
pub fn parse(input: &str) -> JctResult<JsonValue> {
    if input.len() > MAX_INPUT_BYTES {
        return Err(JctError::BadInput(format!(
            "input of {} bytes exceeds the {MAX_INPUT_BYTES}-byte limit",
            input.len()
        )));
    }

    let mut cursor = Cursor::new(input);
    cursor.skip_ws();
    if cursor.at_end() {
        return Ok(JsonValue::object());
    }

    let value = cursor.parse_value(0)?;

    cursor.skip_ws();
    if !cursor.at_end() {
        tracing::warn!(
            remaining = cursor.remaining(),
            "trailing characters after top-level JSON value; ignoring"
        );
    }

    Ok(value)
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn advance(&mut self) {
        // Safe to step by one byte at a time even inside a multi-byte UTF-8
        // sequence: structural tokens ({, }, [, ], :, ,, ", digits, letters)
        // are all single ASCII bytes, so this is only ever called while
        // sitting on one of those, or while skipping non-structural bytes
        // whose UTF-8 continuation bytes are never mistaken for a token.
        self.pos += 1;
    }

    fn skip_ws(&mut self) {
        while let Some(b) = self.peek() {
            if matches!(b, b' ' | b'\t' | b'\n' | b'\r') {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn expect_byte(&mut self, expected: u8, what: &str) -> JctResult<()> {
        match self.peek() {
            Some(b) if b == expected => {
                self.advance();
                Ok(())
            }
            Some(b) => Err(JctError::ParseError(format!(
                "expected {what} at byte {}, found '{}'",
                self.pos, b as char
            ))),
            None => Err(JctError::ParseError(format!(
                "expected {what} but input ended"
            ))),
        }
    }

    fn parse_value(&mut self, depth: usize) -> JctResult<JsonValue> {
        if depth > MAX_DEPTH {
            return Err(JctError::BadInput(format!(
                "maximum nesting depth of {MAX_DEPTH} exceeded"
            )));
        }
        self.skip_ws();
        match self.peek() {
            Some(b'{') => self.parse_object(depth),
            Some(b'[') => self.parse_array(depth),
            Some(b'"') => Ok(JsonValue::String(self.parse_string()?)),
            Some(b't') => self.parse_literal("true", JsonValue::Bool(true)),
            Some(b'f') => self.parse_literal("false", JsonValue::Bool(false)),
            Some(b'n') => self.parse_literal("null", JsonValue::Null),
            Some(b'-' | b'+' | b'0'..=b'9') => self.parse_number(),
            Some(b) => Err(JctError::ParseError(format!(
                "unexpected character '{}' at byte {}",
                b as char, self.pos
            ))),
            None => Err(JctError::ParseError("unexpected end of input".to_string())),
        }
    }

    fn parse_literal(&mut self, text: &str, value: JsonValue) -> JctResult<JsonValue> {
        if self.remaining().starts_with(text) {
            self.pos += text.len();
            Ok(value)
        } else {
            Err(JctError::ParseError(format!(
                "expected '{text}' at byte {}",
                self.pos
            )))
        }
    }

    fn parse_object(&mut self, depth: usize) -> JctResult<JsonValue> {
        self.advance(); // consume '{'
        let mut obj = JsonObject::new();
        self.skip_ws();
        if self.peek() == Some(b'}') {
            self.advance();
            return Ok(JsonValue::Object(obj));
        }
        loop {
            self.skip_ws();
            if self.peek() != Some(b'"') {
                return Err(JctError::ParseError(format!(
                    "expected object key (string) at byte {}",
                    self.pos
                )));
            }
            let key = self.parse_string()?;
            self.skip_ws();
            self.expect_byte(b':', "':'")?;
            let value = self.parse_value(depth + 1)?;
            obj.insert(key, value);
            self.skip_ws();
            match self.peek() {
                Some(b',') => {
                    self.advance();
                }
                Some(b'}') => {
                    self.advance();
                    break;
                }
                _ => {
                    return Err(JctError::ParseError(format!(
                        "expected ',' or '}}' at byte {}",
                        self.pos
                    )));
                }
            }
        }
        Ok(JsonValue::Object(obj))
    }

    fn parse_array(&mut self, depth: usize) -> JctResult<JsonValue> {
        self.advance(); // consume '['
        let mut items = Vec::new();
        self.skip_ws();
        if self.peek() == Some(b']') {
            self.advance();
            return Ok(JsonValue::Array(items));
        }
        loop {
            let value = self.parse_value(depth + 1)?;
            items.push(value);
            self.skip_ws();
            match self.peek() {
                Some(b',') => {
                    self.advance();
                }
                Some(b']') => {
                    self.advance();
                    break;
                }
                _ => {
                    return Err(JctError::ParseError(format!(
                        "expected ',' or ']' at byte {}",
                        self.pos
                    )));
                }
            }
        }
        Ok(JsonValue::Array(items))
    }

    /// Single-pass decode into a growable buffer; a size-scanning prepass
    /// isn't needed to preserve the decoded-in-memory invariant.
    fn parse_string(&mut self) -> JctResult<String> {
        self.advance(); // consume opening '"'
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(JctError::ParseError("unterminated string".to_string())),
                Some(b'"') => {
                    self.advance();
                    return Ok(out);
                }
                Some(b'\\') => {
                    self.advance();
                    self.decode_escape(&mut out)?;
                }
                Some(_) => {
                    let ch = self.next_char()?;
                    out.push(ch);
                }
            }
        }
    }

    fn next_char(&mut self) -> JctResult<char> {
        let ch = self.remaining().chars().next().ok_or_else(|| {
            JctError::ParseError("unterminated string".to_string())
        })?;
        self.pos += ch.len_utf8();
        Ok(ch)
    }

    fn decode_escape(&mut self, out: &mut String) -> JctResult<()> {
        match self.peek() {
            Some(b'"') => {
                out.push('"');
                self.advance();
            }
            Some(b'\\') => {
                out.push('\\');
                self.advance();
            }
            Some(b'/') => {
                out.push('/');
                self.advance();
            }
            Some(b'b') => {
                out.push('\u{0008}');
                self.advance();
            }
            Some(b'f') => {
                out.push('\u{000C}');
                self.advance();
            }
            Some(b'n') => {
                out.push('\n');
                self.advance();
            }
            Some(b'r') => {
                out.push('\r');
                self.advance();
            }
            Some(b't') => {
                out.push('\t');
                self.advance();
            }
            Some(b'u') => {
                self.advance();
                let cp = self.parse_hex4()?;
                if (0xD800..=0xDBFF).contains(&cp) {
                    // High surrogate: look for a trailing low surrogate to
                    // combine into a full code point.
                    if self.remaining().starts_with("\\u") {
                        let save = self.pos;
                        self.pos += 2;
                        let low = self.parse_hex4()?;
                        if (0xDC00..=0xDFFF).contains(&low) {
                            let combined =
                                0x10000 + ((cp - 0xD800) << 10) + (low - 0xDC00);
                            out.push(char::from_u32(combined).unwrap_or('\u{FFFD}'));
                        } else {
                            self.pos = save;
                            out.push('\u{FFFD}');
                        }
                    } else {
                        out.push('\u{FFFD}');
                    }
                } else {
                    out.push(char::from_u32(cp).unwrap_or('\u{FFFD}'));
                }
            }
            Some(other) => {
                // Unknown escape: pass the escaped character through
                // verbatim: `\x` decodes to `x`.
                let ch = other as char;
                out.push(ch);
                self.advance();
            }
            None => return Err(JctError::ParseError("unterminated escape sequence".to_string())),
        }
        Ok(())
    }

    fn parse_hex4(&mut self) -> JctResult<u32> {
        let bytes = self.input.as_bytes();
        if self.pos + 4 > bytes.len() {
            return Err(JctError::ParseError("truncated \\u escape".to_string()));
        }
        let hex = &self.input[self.pos..self.pos + 4];
        let value = u32::from_str_radix(hex, 16)
            .map_err(|_| JctError::ParseError(format!("invalid \\u escape '{hex}'")))?;
        self.pos += 4;
        Ok(value)
    }

    /// Greedy longest match of `[+-]?digits([.]digits)?([eE][+-]?digits)?`.
    fn parse_number(&mut self) -> JctResult<JsonValue> {
        let start = self.pos;

        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.advance();
        }
        let digits_start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.advance();
        }
        if self.pos == digits_start {
            return Err(JctError::ParseError(format!(
                "expected digits at byte {}",
                self.pos
            )));
        }
        if self.peek() == Some(b'.') {
            self.advance();
            let frac_start = self.pos;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.advance();
            }
            if self.pos == frac_start {
                return Err(JctError::ParseError(format!(
                    "expected digits after '.' at byte {}",
                    self.pos
                )));
            }
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.advance();
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.advance();
            }
            let exp_start = self.pos;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.advance();
            }
            if self.pos == exp_start {
                return Err(JctError::ParseError(format!(
                    "expected digits in exponent at byte {}",
                    self.pos
                )));
            }
        }

        let slice = &self.input[start..self.pos];
        // Rust's f64::from_str rejects a leading '+'; the grammar above
        // permits one, so strip it before parsing.
        let trimmed = slice.strip_prefix('+').unwrap_or(slice);
        trimmed
            .parse::<f64>()
            .map(JsonValue::Number)
            .map_err(|_| JctError::ParseError(format!("invalid number literal '{slice}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(pairs: &[(&str, JsonValue)]) -> JsonValue {
        let mut o = JsonObject::new();
        for (k, v) in pairs {
            o.insert(*k, v.clone());
        }
        JsonValue::Object(o)
    }

    #[test]
    fn parses_scalars() {
        assert_eq!(parse("null").unwrap(), JsonValue::Null);
        assert_eq!(parse("true").unwrap(), JsonValue::Bool(true));
        assert_eq!(parse("false").unwrap(), JsonValue::Bool(false));
        assert_eq!(parse("42").unwrap(), JsonValue::Number(42.0));
        assert_eq!(parse("+42").unwrap(), JsonValue::Number(42.0));
        assert_eq!(parse("-3.5e2").unwrap(), JsonValue::Number(-350.0));
    }

    #[test]
    fn empty_input_is_empty_object() {
        assert_eq!(parse("").unwrap(), JsonValue::object());
        assert_eq!(parse("   \n\t").unwrap(), JsonValue::object());
    }

    #[test]
    fn parses_nested_structure() {
        let value = parse(r#"{"a": [1, 2, {"b": true}], "c": null}"#).unwrap();
        let expected = obj(&[
            (
                "a",
                JsonValue::Array(vec![
                    JsonValue::Number(1.0),
                    JsonValue::Number(2.0),
                    obj(&[("b", JsonValue::Bool(true))]),
                ]),
            ),
            ("c", JsonValue::Null),
        ]);
        assert_eq!(value, expected);
    }

    #[test]
    fn decodes_escapes_to_raw_bytes() {
        let value = parse(r#""a\nb\tc\"d""#).unwrap();
        assert_eq!(value.as_str(), Some("a\nb\tc\"d"));
    }

    #[test]
    fn unknown_escape_passes_through_verbatim() {
        let value = parse(r#""\x""#).unwrap();
        assert_eq!(value.as_str(), Some("x"));
    }

    #[test]
    fn decodes_unicode_escape() {
        let value = parse(r#""A""#).unwrap();
        assert_eq!(value.as_str(), Some("A"));
    }

    #[test]
    fn decodes_surrogate_pair_escape() {
        // U+1F600 GRINNING FACE, encoded as a UTF-16 surrogate pair.
        let value = parse("\"\\uD83D\\uDE00\"").unwrap();
        assert_eq!(value.as_str(), Some("\u{1F600}"));
    }

    #[test]
    fn passes_through_literal_multi_byte_utf8() {
        let value = parse("\"caf\u{e9}\"").unwrap();
        assert_eq!(value.as_str(), Some("caf\u{e9}"));
    }

    #[test]
    fn rejects_unterminated_string() {
        assert!(parse(r#""abc"#).is_err());
    }

    #[test]
    fn rejects_missing_closing_delimiter() {
        assert!(parse("{\"a\": 1").is_err());
        assert!(parse("[1, 2").is_err());
    }

    #[test]
    fn rejects_stray_comma() {
        assert!(parse("[1,,2]").is_err());
        assert!(parse("{\"a\":1,}").is_err());
    }

    #[test]
    fn rejects_misplaced_colon() {
        assert!(parse("[1:2]").is_err());
    }

    #[test]
    fn tolerates_trailing_garbage() {
        let value = parse("42 garbage").unwrap();
        assert_eq!(value, JsonValue::Number(42.0));
    }

    #[test]
    fn rejects_excessive_nesting() {
        let deeply_nested = "[".repeat(MAX_DEPTH + 2) + &"]".repeat(MAX_DEPTH + 2);
        assert!(parse(&deeply_nested).is_err());
    }

    #[test]
    fn rejects_oversized_input() {
        let huge = "1".repeat(MAX_INPUT_BYTES + 1);
        assert!(matches!(parse(&huge), Err(JctError::BadInput(_))));
    }
}
