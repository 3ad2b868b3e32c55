use jct_error::{JctError, JctResult};
use jct_value::JsonValue;

use crate::ast::{CompareOp, FilterExpr, FilterTerm, PathStep};
use crate::cursor::Cursor;

/// Parse the contents of a `[?( ... )]` filter (the text between the
/// parens, exclusive) into a [`FilterExpr`].
pub(crate) fn parse_filter(text: &str) -> JctResult<FilterExpr> {
    let mut cursor = Cursor::new(text);
    let expr = parse_or(&mut cursor)?;
    cursor.skip_ws();
    if !cursor.at_end() {
        return Err(JctError::ParseError(format!(
            "unexpected trailing text in filter expression: '{}'",
            cursor.remaining()
        )));
    }
    Ok(expr)
}

fn parse_or(cursor: &mut Cursor) -> JctResult<FilterExpr> {
    let mut left = parse_and(cursor)?;
    loop {
        cursor.skip_ws();
        if cursor.consume_str("||") {
            let right = parse_and(cursor)?;
            left = FilterExpr::Or(Box::new(left), Box::new(right));
        } else {
            return Ok(left);
        }
    }
}

fn parse_and(cursor: &mut Cursor) -> JctResult<FilterExpr> {
    let mut left = parse_cmp(cursor)?;
    loop {
        cursor.skip_ws();
        if cursor.consume_str("&&") {
            let right = parse_cmp(cursor)?;
            left = FilterExpr::And(Box::new(left), Box::new(right));
        } else {
            return Ok(left);
        }
    }
}

fn parse_cmp(cursor: &mut Cursor) -> JctResult<FilterExpr> {
    let left = parse_unary(cursor)?;
    cursor.skip_ws();
    let Some(op) = try_parse_cmp_op(cursor) else {
        return Ok(left);
    };
    let FilterExpr::Bare(left_term) = left else {
        return Err(JctError::ParseError(
            "comparison operators require a plain term on the left-hand side".to_string(),
        ));
    };
    cursor.skip_ws();
    let right_term = parse_term(cursor)?;
    Ok(FilterExpr::Compare(op, left_term, right_term))
}

fn try_parse_cmp_op(cursor: &mut Cursor) -> Option<CompareOp> {
    for (text, op) in [
        ("==", CompareOp::Eq),
        ("!=", CompareOp::Ne),
        ("<=", CompareOp::Le),
        (">=", CompareOp::Ge),
        ("<", CompareOp::Lt),
        (">", CompareOp::Gt),
    ] {
        if cursor.consume_str(text) {
            return Some(op);
        }
    }
    None
}

fn parse_unary(cursor: &mut Cursor) -> JctResult<FilterExpr> {
    cursor.skip_ws();
    if cursor.consume_char('!') {
        let inner = parse_unary(cursor)?;
        return Ok(FilterExpr::Not(Box::new(inner)));
    }
    parse_primary(cursor)
}

fn parse_primary(cursor: &mut Cursor) -> JctResult<FilterExpr> {
    cursor.skip_ws();
    if cursor.consume_char('(') {
        let inner = parse_or(cursor)?;
        cursor.skip_ws();
        cursor.expect_char(')')?;
        return Ok(inner);
    }
    let term = parse_term(cursor)?;
    Ok(FilterExpr::Bare(term))
}

fn parse_term(cursor: &mut Cursor) -> JctResult<FilterTerm> {
    cursor.skip_ws();
    if cursor.consume_char('@') {
        let steps = parse_path_steps(cursor)?;
        return Ok(FilterTerm::CurrentPath(steps));
    }
    parse_literal_term(cursor)
}

fn parse_path_steps(cursor: &mut Cursor) -> JctResult<Vec<PathStep>> {
    let mut steps = Vec::new();
    loop {
        if cursor.remaining().starts_with("..") {
            return Err(JctError::ParseError(
                "recursive descent ('..') is not supported inside a filter sub-path".to_string(),
            ));
        }
        if cursor.consume_char('.') {
            let name = cursor.parse_identifier()?;
            steps.push(PathStep::Name(name));
        } else if cursor.peek() == Some('[') {
            cursor.advance();
            cursor.skip_ws();
            if matches!(cursor.peek(), Some('\'' | '"')) {
                let name = cursor.parse_quoted_string()?;
                steps.push(PathStep::Name(name));
            } else {
                let idx = cursor.parse_signed_int()?;
                steps.push(PathStep::Index(idx));
            }
            cursor.skip_ws();
            cursor.expect_char(']')?;
        } else {
            break;
        }
    }
    Ok(steps)
}

fn parse_literal_term(cursor: &mut Cursor) -> JctResult<FilterTerm> {
    cursor.skip_ws();
    if matches!(cursor.peek(), Some('\'' | '"')) {
        let s = cursor.parse_quoted_string()?;
        return Ok(FilterTerm::Literal(JsonValue::string(s)));
    }
    if cursor.consume_str("true") {
        return Ok(FilterTerm::Literal(JsonValue::Bool(true)));
    }
    if cursor.consume_str("false") {
        return Ok(FilterTerm::Literal(JsonValue::Bool(false)));
    }
    if cursor.consume_str("null") {
        return Ok(FilterTerm::Literal(JsonValue::Null));
    }
    parse_number_literal(cursor)
}

/// `[+-]?digits([.]digits)?` — no exponent form in filter literals.
fn parse_number_literal(cursor: &mut Cursor) -> JctResult<FilterTerm> {
    let start_marker = cursor.remaining();
    let mut len = 0usize;
    if matches!(cursor.peek(), Some('+' | '-')) {
        cursor.advance();
        len += 1;
    }
    let digits_start = len;
    while matches!(cursor.peek(), Some(c) if c.is_ascii_digit()) {
        cursor.advance();
        len += 1;
    }
    if len == digits_start {
        return Err(JctError::ParseError(format!(
            "expected a filter literal at '{start_marker}'"
        )));
    }
    if cursor.peek() == Some('.') {
        cursor.advance();
        len += 1;
        let frac_start = len;
        while matches!(cursor.peek(), Some(c) if c.is_ascii_digit()) {
            cursor.advance();
            len += 1;
        }
        if len == frac_start {
            return Err(JctError::ParseError(format!(
                "expected digits after '.' in '{start_marker}'"
            )));
        }
    }
    let slice = &start_marker[..len];
    let trimmed = slice.strip_prefix('+').unwrap_or(slice);
    trimmed
        .parse::<f64>()
        .map(|n| FilterTerm::Literal(JsonValue::Number(n)))
        .map_err(|_| JctError::ParseError(format!("invalid number literal '{slice}'")))
}

fn resolve_path_steps<'a>(value: &'a JsonValue, steps: &[PathStep]) -> Option<&'a JsonValue> {
    let mut current = value;
    for step in steps {
        current = match (current, step) {
            (JsonValue::Object(obj), PathStep::Name(name)) => obj.get(name)?,
            (JsonValue::Array(items), PathStep::Index(idx)) => {
                let idx = usize::try_from(*idx).ok()?;
                items.get(idx)?
            }
            _ => return None,
        };
    }
    Some(current)
}

fn resolve_term(term: &FilterTerm, item: &JsonValue) -> Option<JsonValue> {
    match term {
        FilterTerm::Literal(v) => Some(v.clone()),
        FilterTerm::CurrentPath(steps) => resolve_path_steps(item, steps).cloned(),
    }
}

/// Evaluate a parsed filter expression against one candidate element.
pub(crate) fn eval_filter(expr: &FilterExpr, item: &JsonValue) -> bool {
    match expr {
        FilterExpr::Not(inner) => !eval_filter(inner, item),
        FilterExpr::And(l, r) => eval_filter(l, item) && eval_filter(r, item),
        FilterExpr::Or(l, r) => eval_filter(l, item) || eval_filter(r, item),
        FilterExpr::Bare(term) => resolve_term(term, item).is_some_and(|v| v.is_truthy()),
        FilterExpr::Compare(op, left, right) => {
            let lv = resolve_term(left, item);
            let rv = resolve_term(right, item);
            compare(*op, lv.as_ref(), rv.as_ref())
        }
    }
}

/// Type-aware comparison. Any mismatch of shapes — including one side
/// missing entirely, or comparing against `null` with anything other than
/// `==`/`!=` — falls through to the cross-type rule: `false` for every
/// operator except `==` (false) and `!=` (true).
fn compare(op: CompareOp, left: Option<&JsonValue>, right: Option<&JsonValue>) -> bool {
    match (left, right) {
        (Some(JsonValue::Number(a)), Some(JsonValue::Number(b))) => compare_ord(op, a, b),
        (Some(JsonValue::String(a)), Some(JsonValue::String(b))) => compare_ord(op, a, b),
        (Some(JsonValue::Bool(a)), Some(JsonValue::Bool(b))) => {
            compare_ord(op, &u8::from(*a), &u8::from(*b))
        }
        (Some(JsonValue::Null), Some(JsonValue::Null)) => matches!(op, CompareOp::Eq),
        _ => matches!(op, CompareOp::Ne),
    }
}

fn compare_ord<T: PartialOrd>(op: CompareOp, a: &T, b: &T) -> bool {
    match op {
        CompareOp::Eq => a == b,
        CompareOp::Ne => a != b,
        CompareOp::Lt => a < b,
        CompareOp::Le => a <= b,
        CompareOp::Gt => a > b,
        CompareOp::Ge => a >= b,
    }
}
