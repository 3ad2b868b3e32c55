use jct_error::{JctError, JctResult};

use crate::ast::Selector;
use crate::cursor::Cursor;
use crate::filter;

/// Parse a full path expression (e.g. `$.store.book[?(@.price < 10)].title`)
/// into an ordered list of selectors. The expression must start with `$`.
pub(crate) fn parse(expr: &str) -> JctResult<Vec<Selector>> {
    let mut cursor = Cursor::new(expr);
    cursor.expect_char('$').map_err(|_| {
        JctError::ParseError(format!("path expression must start with '$': '{expr}'"))
    })?;

    let mut selectors = Vec::new();
    while !cursor.at_end() {
        if cursor.consume_str("..") {
            selectors.push(Selector::RecursiveDescent);
            // The step right after `..` has no leading dot of its own
            // (`$..author`, `$..*`, `$..[0]`), unlike every other step in
            // the grammar — so it's parsed here rather than falling
            // through to the top of the loop.
            if cursor.consume_char('*') {
                selectors.push(Selector::Wildcard);
            } else if cursor.remaining().starts_with('[') {
                selectors.push(parse_bracket(&mut cursor)?);
            } else if !cursor.at_end() && !cursor.remaining().starts_with('.') {
                let name = cursor.parse_identifier()?;
                selectors.push(Selector::Child(name));
            }
            continue;
        }
        if cursor.consume_char('.') {
            if cursor.consume_char('*') {
                selectors.push(Selector::Wildcard);
            } else {
                let name = cursor.parse_identifier()?;
                selectors.push(Selector::Child(name));
            }
            continue;
        }
        if cursor.remaining().starts_with('[') {
            selectors.push(parse_bracket(&mut cursor)?);
            continue;
        }
        return Err(JctError::ParseError(format!(
            "unexpected character in path expression at '{}'",
            cursor.remaining()
        )));
    }
    Ok(selectors)
}

fn parse_bracket(cursor: &mut Cursor) -> JctResult<Selector> {
    cursor.expect_char('[')?;
    cursor.skip_ws();

    if cursor.consume_char('?') {
        cursor.skip_ws();
        cursor.expect_char('(')?;
        let filter_text = scan_balanced_parens(cursor)?;
        cursor.skip_ws();
        cursor.expect_char(']')?;
        return Ok(Selector::Filter(filter::parse_filter(&filter_text)?));
    }

    if cursor.consume_char('*') {
        cursor.skip_ws();
        cursor.expect_char(']')?;
        return Ok(Selector::Wildcard);
    }

    if matches!(cursor.peek(), Some('\'' | '"')) {
        let mut names = vec![cursor.parse_quoted_string()?];
        loop {
            cursor.skip_ws();
            if cursor.consume_char(',') {
                cursor.skip_ws();
                names.push(cursor.parse_quoted_string()?);
            } else {
                break;
            }
        }
        cursor.skip_ws();
        cursor.expect_char(']')?;
        return Ok(Selector::ChildUnion(names));
    }

    parse_index_or_slice(cursor)
}

/// Consumes everything up to (and including) the `)` matching the `(`
/// already consumed by the caller, respecting quoted strings so a literal
/// containing `(`/`)` doesn't confuse the depth count. Returns the text in
/// between, exclusive of both parens.
fn scan_balanced_parens(cursor: &mut Cursor) -> JctResult<String> {
    let mut depth = 1u32;
    let mut out = String::new();
    let mut in_quote: Option<char> = None;

    loop {
        let Some(c) = cursor.peek() else {
            return Err(JctError::ParseError(
                "unterminated filter expression".to_string(),
            ));
        };
        cursor.advance();

        if let Some(q) = in_quote {
            out.push(c);
            if c == q {
                in_quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' => {
                in_quote = Some(c);
                out.push(c);
            }
            '(' => {
                depth += 1;
                out.push(c);
            }
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(out);
                }
                out.push(c);
            }
            _ => out.push(c),
        }
    }
}

fn parse_index_or_slice(cursor: &mut Cursor) -> JctResult<Selector> {
    let first = parse_optional_signed_int(cursor)?;
    cursor.skip_ws();

    if cursor.consume_char(':') {
        cursor.skip_ws();
        let end = parse_optional_signed_int(cursor)?;
        cursor.skip_ws();
        let step = if cursor.consume_char(':') {
            cursor.skip_ws();
            parse_optional_signed_int(cursor)?.unwrap_or(1)
        } else {
            1
        };
        cursor.skip_ws();
        cursor.expect_char(']')?;
        return Ok(Selector::Slice {
            start: first,
            end,
            step,
        });
    }

    let mut indices = vec![first.ok_or_else(|| {
        JctError::ParseError("expected an array index inside '[...]'".to_string())
    })?];
    loop {
        cursor.skip_ws();
        if cursor.consume_char(',') {
            cursor.skip_ws();
            indices.push(cursor.parse_signed_int()?);
        } else {
            break;
        }
    }
    cursor.skip_ws();
    cursor.expect_char(']')?;
    Ok(Selector::IndexUnion(indices))
}

fn parse_optional_signed_int(cursor: &mut Cursor) -> JctResult<Option<i64>> {
    cursor.skip_ws();
    match cursor.peek() {
        Some(c) if c.is_ascii_digit() || c == '+' || c == '-' => {
            Ok(Some(cursor.parse_signed_int()?))
        }
        _ => Ok(None),
    }
}
