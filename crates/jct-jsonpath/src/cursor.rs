use jct_error::{JctError, JctResult};

/// A byte-position cursor shared by the top-level selector parser and the
/// filter sub-expression parser. Positions are always at char boundaries
/// since every token this grammar recognizes is ASCII.
pub(crate) struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub(crate) fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    pub(crate) fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    pub(crate) fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\n' | '\r')) {
            self.advance();
        }
    }

    pub(crate) fn consume_char(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn consume_str(&mut self, s: &str) -> bool {
        if self.remaining().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_char(&mut self, c: char) -> JctResult<()> {
        if self.consume_char(c) {
            Ok(())
        } else {
            Err(JctError::ParseError(format!(
                "expected '{c}' at byte {} of '{}'",
                self.pos, self.input
            )))
        }
    }

    /// `[A-Za-z_][A-Za-z0-9_]*`
    pub(crate) fn parse_identifier(&mut self) -> JctResult<String> {
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => self.advance(),
            _ => {
                return Err(JctError::ParseError(format!(
                    "expected identifier at byte {} of '{}'",
                    self.pos, self.input
                )));
            }
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }
        Ok(self.input[start..self.pos].to_string())
    }

    /// A signed decimal integer: `[+-]?[0-9]+`.
    pub(crate) fn parse_signed_int(&mut self) -> JctResult<i64> {
        let start = self.pos;
        if matches!(self.peek(), Some('+' | '-')) {
            self.advance();
        }
        let digits_start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
        if self.pos == digits_start {
            return Err(JctError::ParseError(format!(
                "expected an integer at byte {} of '{}'",
                self.pos, self.input
            )));
        }
        self.input[start..self.pos]
            .parse::<i64>()
            .map_err(|_| JctError::ParseError(format!("invalid integer '{}'", &self.input[start..self.pos])))
    }

    /// A single- or double-quoted string, returning the unescaped content.
    /// Only `\\` and the matching quote character are recognized as
    /// escapes — this sub-grammar doesn't need the full JSON escape table.
    pub(crate) fn parse_quoted_string(&mut self) -> JctResult<String> {
        let quote = match self.peek() {
            Some(q @ ('\'' | '"')) => q,
            _ => {
                return Err(JctError::ParseError(format!(
                    "expected a quoted string at byte {} of '{}'",
                    self.pos, self.input
                )));
            }
        };
        self.advance();
        let mut out = String::new();
        loop {
            match self.peek() {
                None => {
                    return Err(JctError::ParseError("unterminated quoted string".to_string()));
                }
                Some(c) if c == quote => {
                    self.advance();
                    return Ok(out);
                }
                Some('\\') => {
                    self.advance();
                    if let Some(escaped) = self.peek() {
                        out.push(escaped);
                        self.advance();
                    } else {
                        return Err(JctError::ParseError(
                            "unterminated escape in quoted string".to_string(),
                        ));
                    }
                }
                Some(c) => {
                    out.push(c);
                    self.advance();
                }
            }
        }
    }
}
