use jct_error::{JctError, JctResult};
use jct_value::JsonValue;

use crate::ast::Selector;
use crate::filter;

/// One member of the working set: a reference into the document tree plus
/// the canonical path string that reaches it.
#[derive(Clone)]
pub(crate) struct NodeRef<'a> {
    pub(crate) value: &'a JsonValue,
    pub(crate) path: String,
}

pub(crate) fn initial_working_set(root: &JsonValue) -> Vec<NodeRef<'_>> {
    vec![NodeRef {
        value: root,
        path: "$".to_string(),
    }]
}

pub(crate) fn apply_selector<'a>(
    working_set: Vec<NodeRef<'a>>,
    selector: &Selector,
    strict: bool,
) -> JctResult<Vec<NodeRef<'a>>> {
    match selector {
        Selector::RecursiveDescent => Ok(working_set
            .iter()
            .flat_map(expand_descendants)
            .collect()),
        Selector::Child(name) => Ok(working_set
            .iter()
            .filter_map(|node| apply_child(node, name))
            .collect()),
        Selector::ChildUnion(names) => Ok(working_set
            .iter()
            .flat_map(|node| names.iter().filter_map(move |name| apply_child(node, name)))
            .collect()),
        Selector::Wildcard => Ok(working_set.iter().flat_map(apply_wildcard).collect()),
        Selector::IndexUnion(indices) => {
            let mut out = Vec::new();
            for node in &working_set {
                for idx in indices {
                    if let Some(child) = apply_index(node, *idx, strict)? {
                        out.push(child);
                    }
                }
            }
            Ok(out)
        }
        Selector::Slice { start, end, step } => {
            let mut out = Vec::new();
            for node in &working_set {
                out.extend(apply_slice(node, *start, *end, *step, strict)?);
            }
            Ok(out)
        }
        Selector::Filter(expr) => Ok(working_set
            .iter()
            .flat_map(|node| apply_filter(node, expr))
            .collect()),
    }
}

fn apply_child<'a>(node: &NodeRef<'a>, name: &str) -> Option<NodeRef<'a>> {
    let JsonValue::Object(obj) = node.value else {
        return None;
    };
    let value = obj.get(name)?;
    Some(NodeRef {
        value,
        path: child_path(&node.path, name),
    })
}

fn apply_wildcard<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    match node.value {
        JsonValue::Object(obj) => obj
            .iter()
            .map(|(key, value)| NodeRef {
                value,
                path: child_path(&node.path, key),
            })
            .collect(),
        JsonValue::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, value)| NodeRef {
                value,
                path: index_path(&node.path, i),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Resolves a possibly-negative index against an array of length `len`,
/// honoring the strict/lenient rule for negatives: strict mode errors,
/// lenient mode silently drops the candidate (returns `Ok(None)`).
/// Out-of-range (but non-negative) indices are likewise dropped without
/// error in either mode, matching a plain "no match" selector result.
fn resolve_index(idx: i64, len: usize, strict: bool) -> JctResult<Option<usize>> {
    if idx < 0 {
        return if strict {
            Err(JctError::EvalError(format!(
                "negative array index {idx} is not allowed in strict mode"
            )))
        } else {
            Ok(None)
        };
    }
    let idx = usize::try_from(idx).unwrap_or(usize::MAX);
    Ok((idx < len).then_some(idx))
}

fn apply_index<'a>(node: &NodeRef<'a>, idx: i64, strict: bool) -> JctResult<Option<NodeRef<'a>>> {
    let JsonValue::Array(items) = node.value else {
        return Ok(None);
    };
    let Some(actual) = resolve_index(idx, items.len(), strict)? else {
        return Ok(None);
    };
    Ok(Some(NodeRef {
        value: &items[actual],
        path: index_path(&node.path, actual),
    }))
}

fn apply_slice<'a>(
    node: &NodeRef<'a>,
    start: Option<i64>,
    end: Option<i64>,
    step: i64,
    strict: bool,
) -> JctResult<Vec<NodeRef<'a>>> {
    let JsonValue::Array(items) = node.value else {
        return Ok(Vec::new());
    };
    let len = items.len();

    let resolved_start = match start {
        Some(s) if s < 0 => {
            if strict {
                return Err(JctError::EvalError(format!(
                    "negative slice start {s} is not allowed in strict mode"
                )));
            }
            0
        }
        Some(s) => usize::try_from(s).unwrap_or(len).min(len),
        None => 0,
    };
    let resolved_end = match end {
        Some(e) if e < 0 => {
            if strict {
                return Err(JctError::EvalError(format!(
                    "negative slice end {e} is not allowed in strict mode"
                )));
            }
            len
        }
        Some(e) => usize::try_from(e).unwrap_or(len).min(len),
        None => len,
    };
    let step = usize::try_from(step).map_err(|_| {
        JctError::EvalError(format!("slice step {step} must be a positive integer"))
    })?;
    if step == 0 {
        return Err(JctError::EvalError("slice step must not be zero".to_string()));
    }

    let mut out = Vec::new();
    let mut i = resolved_start;
    while i < resolved_end {
        out.push(NodeRef {
            value: &items[i],
            path: index_path(&node.path, i),
        });
        i += step;
    }
    Ok(out)
}

fn apply_filter<'a>(
    node: &NodeRef<'a>,
    expr: &crate::ast::FilterExpr,
) -> Vec<NodeRef<'a>> {
    match node.value {
        JsonValue::Array(items) => items
            .iter()
            .enumerate()
            .filter(|(_, item)| filter::eval_filter(expr, item))
            .map(|(i, value)| NodeRef {
                value,
                path: index_path(&node.path, i),
            })
            .collect(),
        other => {
            if filter::eval_filter(expr, other) {
                vec![node.clone()]
            } else {
                Vec::new()
            }
        }
    }
}

/// All descendants of `node`, including `node` itself, in document order
/// (parent before children, array indices ascending).
fn expand_descendants<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut out = vec![node.clone()];
    match node.value {
        JsonValue::Object(obj) => {
            for (key, value) in obj.iter() {
                let child = NodeRef {
                    value,
                    path: child_path(&node.path, key),
                };
                out.extend(expand_descendants(&child));
            }
        }
        JsonValue::Array(items) => {
            for (i, value) in items.iter().enumerate() {
                let child = NodeRef {
                    value,
                    path: index_path(&node.path, i),
                };
                out.extend(expand_descendants(&child));
            }
        }
        _ => {}
    }
    out
}

fn is_identifier_safe(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn child_path(parent: &str, key: &str) -> String {
    if is_identifier_safe(key) {
        format!("{parent}.{key}")
    } else {
        format!("{parent}['{}']", key.replace('\'', "\\'"))
    }
}

fn index_path(parent: &str, idx: usize) -> String {
    format!("{parent}[{idx}]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use jct_value::JsonObject;

    fn obj(pairs: &[(&str, JsonValue)]) -> JsonValue {
        let mut o = JsonObject::new();
        for (k, v) in pairs {
            o.insert(*k, v.clone());
        }
        JsonValue::Object(o)
    }

    #[test]
    fn child_path_uses_bracket_form_for_unsafe_names() {
        assert_eq!(child_path("$", "with space"), "$['with space']");
        assert_eq!(child_path("$", "safe"), "$.safe");
    }

    #[test]
    fn expand_descendants_visits_parent_before_children() {
        let root = obj(&[("a", obj(&[("b", JsonValue::number(1.0))]))]);
        let ws = initial_working_set(&root);
        let expanded = expand_descendants(&ws[0]);
        let paths: Vec<&str> = expanded.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["$", "$.a", "$.a.b"]);
    }

    #[test]
    fn slice_applies_with_default_end() {
        let root = obj(&[(
            "items",
            JsonValue::Array(vec![
                JsonValue::number(1.0),
                JsonValue::number(2.0),
                JsonValue::number(3.0),
            ]),
        )]);
        let ws = initial_working_set(&root);
        let ws = apply_selector(ws, &Selector::Child("items".to_string()), true).unwrap();
        let sliced = apply_selector(
            ws,
            &Selector::Slice {
                start: Some(1),
                end: None,
                step: 1,
            },
            true,
        )
        .unwrap();
        assert_eq!(sliced.len(), 2);
        assert_eq!(sliced[0].value, &JsonValue::number(2.0));
    }

    #[test]
    fn negative_index_errors_in_strict_mode_and_is_dropped_in_lenient_mode() {
        let node = NodeRef {
            value: &JsonValue::Array(vec![JsonValue::number(1.0)]),
            path: "$".to_string(),
        };
        assert!(apply_index(&node, -1, true).is_err());
        assert!(apply_index(&node, -1, false).unwrap().is_none());
    }
}
