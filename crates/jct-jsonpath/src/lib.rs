#![doc = include_str!("../README.md")]

mod ast;
mod cursor;
mod eval;
mod filter;
mod parser;

use jct_error::JctResult;
use jct_value::{JsonObject, JsonValue};

/// Which shape the matched nodes are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultMode {
    /// Deep-cloned matching values.
    Values,
    /// Canonical path strings.
    Paths,
    /// `{path, value}` objects.
    Pairs,
}

#[derive(Debug, Clone)]
pub struct EvalOptions {
    pub mode: ResultMode,
    /// Truncate the working set to the first `N` matches after all
    /// selectors have applied.
    pub limit: Option<usize>,
    /// Meaningful only with `mode: ResultMode::Values` — emit the lone
    /// match directly instead of a one-element list.
    pub unwrap_single: bool,
    /// Strict mode surfaces parse and evaluation errors as
    /// [`jct_error::JctError::ParseError`] / [`jct_error::JctError::EvalError`].
    /// Lenient mode swallows both into an empty result.
    pub strict: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            mode: ResultMode::Values,
            limit: None,
            unwrap_single: false,
            strict: false,
        }
    }
}

/// The shape of a [`ResultMode::Values`] result: a single unwrapped value
/// when `unwrap_single` applied to exactly one match, a list otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValuesResult {
    List(Vec<JsonValue>),
    Single(JsonValue),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutput {
    Values(ValuesResult),
    Paths(Vec<String>),
    Pairs(Vec<JsonValue>),
}

impl PathOutput {
    fn empty(mode: ResultMode) -> Self {
        match mode {
            ResultMode::Values => PathOutput::Values(ValuesResult::List(Vec::new())),
            ResultMode::Paths => PathOutput::Paths(Vec::new()),
            ResultMode::Pairs => PathOutput::Pairs(Vec::new()),
        }
    }
}

/// Evaluate a JSONPath expression against `root`.
///
/// In lenient mode (`opts.strict == false`, the default), any parse or
/// evaluation error is swallowed and an empty result is returned instead
/// of propagating — this matches the dialect's documented failure
/// semantics, where only strict mode surfaces distinct exit codes.
///
/// # Errors
///
/// In strict mode, returns [`jct_error::JctError::ParseError`] for a
/// malformed expression and [`jct_error::JctError::EvalError`] for an
/// evaluation-time problem (e.g. a negative index or zero slice step).
pub fn evaluate(root: &JsonValue, expr: &str, opts: &EvalOptions) -> JctResult<PathOutput> {
    match evaluate_inner(root, expr, opts) {
        Ok(out) => Ok(out),
        Err(err) if !opts.strict => {
            tracing::debug!(%err, "jsonpath evaluation failed in lenient mode; returning empty result");
            Ok(PathOutput::empty(opts.mode))
        }
        Err(err) => Err(err),
    }
}

fn evaluate_inner(root: &JsonValue, expr: &str, opts: &EvalOptions) -> JctResult<PathOutput> {
    let selectors = parser::parse(expr)?;

    let mut working_set = eval::initial_working_set(root);
    for selector in &selectors {
        working_set = eval::apply_selector(working_set, selector, opts.strict)?;
    }

    if let Some(limit) = opts.limit {
        working_set.truncate(limit);
    }

    Ok(match opts.mode {
        ResultMode::Values => {
            let mut values: Vec<JsonValue> = working_set.iter().map(|n| n.value.clone()).collect();
            if opts.unwrap_single && values.len() == 1 {
                PathOutput::Values(ValuesResult::Single(values.pop().expect("len == 1")))
            } else {
                PathOutput::Values(ValuesResult::List(values))
            }
        }
        ResultMode::Paths => {
            PathOutput::Paths(working_set.iter().map(|n| n.path.clone()).collect())
        }
        ResultMode::Pairs => PathOutput::Pairs(
            working_set
                .iter()
                .map(|n| {
                    let mut pair = JsonObject::new();
                    pair.insert("path", JsonValue::string(n.path.clone()));
                    pair.insert("value", n.value.clone());
                    JsonValue::Object(pair)
                })
                .collect(),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jct_value::JsonObject;

    fn book(title: &str, author: &str, price: f64) -> JsonValue {
        let mut o = JsonObject::new();
        o.insert("title", JsonValue::string(title));
        o.insert("author", JsonValue::string(author));
        o.insert("price", JsonValue::number(price));
        JsonValue::Object(o)
    }

    fn books_fixture() -> JsonValue {
        let books = JsonValue::Array(vec![
            book("Sayings of the Century", "Nigel Rees", 8.95),
            book("Sword of Honour", "Evelyn Waugh", 12.99),
            book("Moby Dick", "Herman Melville", 8.99),
            book("The Lord of the Rings", "J. R. R. Tolkien", 22.99),
        ]);
        let mut store = JsonObject::new();
        store.insert("book", books);
        let mut root = JsonObject::new();
        root.insert("store", JsonValue::Object(store));
        JsonValue::Object(root)
    }

    fn values_list(output: PathOutput) -> Vec<JsonValue> {
        match output {
            PathOutput::Values(ValuesResult::List(v)) => v,
            PathOutput::Values(ValuesResult::Single(v)) => vec![v],
            _ => panic!("expected a values result"),
        }
    }

    #[test]
    fn recursive_descent_collects_all_authors() {
        let root = books_fixture();
        let out = evaluate(&root, "$..author", &EvalOptions::default()).unwrap();
        let authors: Vec<String> = values_list(out)
            .into_iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            authors,
            vec!["Nigel Rees", "Evelyn Waugh", "Herman Melville", "J. R. R. Tolkien"]
        );
    }

    #[test]
    fn filter_selects_titles_under_price() {
        let root = books_fixture();
        let out = evaluate(
            &root,
            "$.store.book[?(@.price < 10)].title",
            &EvalOptions::default(),
        )
        .unwrap();
        let titles: Vec<String> = values_list(out)
            .into_iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();
        assert_eq!(titles, vec!["Sayings of the Century", "Moby Dick"]);
    }

    #[test]
    fn slice_selects_range() {
        let mut root = JsonObject::new();
        let mut arrays = JsonObject::new();
        arrays.insert(
            "numbers",
            JsonValue::Array(
                [1, 2, 3, 4, 5]
                    .into_iter()
                    .map(|n| JsonValue::number(f64::from(n)))
                    .collect(),
            ),
        );
        root.insert("arrays", JsonValue::Object(arrays));
        let root = JsonValue::Object(root);

        let out = evaluate(&root, "$.arrays.numbers[0:2]", &EvalOptions::default()).unwrap();
        assert_eq!(
            values_list(out),
            vec![JsonValue::number(1.0), JsonValue::number(2.0)]
        );
    }

    #[test]
    fn paths_mode_yields_canonical_path_strings() {
        let mut root = JsonObject::new();
        let mut arrays = JsonObject::new();
        arrays.insert(
            "strings",
            JsonValue::Array(vec![
                JsonValue::string("a"),
                JsonValue::string("b"),
                JsonValue::string("c"),
            ]),
        );
        root.insert("arrays", JsonValue::Object(arrays));
        let root = JsonValue::Object(root);

        let opts = EvalOptions {
            mode: ResultMode::Paths,
            ..EvalOptions::default()
        };
        let out = evaluate(&root, "$.arrays.strings[*]", &opts).unwrap();
        let PathOutput::Paths(paths) = out else {
            panic!("expected paths result");
        };
        assert_eq!(
            paths,
            vec![
                "$.arrays.strings[0]".to_string(),
                "$.arrays.strings[1]".to_string(),
                "$.arrays.strings[2]".to_string(),
            ]
        );
    }

    #[test]
    fn unwrap_single_emits_lone_scalar_directly() {
        let mut root = JsonObject::new();
        let mut booleans = JsonObject::new();
        booleans.insert("true_value", JsonValue::Bool(true));
        root.insert("booleans", JsonValue::Object(booleans));
        let root = JsonValue::Object(root);

        let opts = EvalOptions {
            unwrap_single: true,
            ..EvalOptions::default()
        };
        let out = evaluate(&root, "$.booleans.true_value", &opts).unwrap();
        assert_eq!(
            out,
            PathOutput::Values(ValuesResult::Single(JsonValue::Bool(true)))
        );
    }

    #[test]
    fn lenient_mode_swallows_parse_errors_into_empty_result() {
        let root = JsonValue::object();
        let out = evaluate(&root, "not a path", &EvalOptions::default()).unwrap();
        assert_eq!(out, PathOutput::Values(ValuesResult::List(Vec::new())));
    }

    #[test]
    fn strict_mode_surfaces_parse_errors() {
        let root = JsonValue::object();
        let opts = EvalOptions {
            strict: true,
            ..EvalOptions::default()
        };
        assert!(evaluate(&root, "not a path", &opts).is_err());
    }

    #[test]
    fn strict_mode_surfaces_negative_index_eval_errors() {
        let root = JsonValue::Array(vec![JsonValue::number(1.0)]);
        let opts = EvalOptions {
            strict: true,
            ..EvalOptions::default()
        };
        assert!(matches!(
            evaluate(&root, "$[-1]", &opts),
            Err(jct_error::JctError::EvalError(_))
        ));
    }

    #[test]
    fn limit_truncates_matches() {
        let root = JsonValue::Array(vec![
            JsonValue::number(1.0),
            JsonValue::number(2.0),
            JsonValue::number(3.0),
        ]);
        let opts = EvalOptions {
            limit: Some(2),
            ..EvalOptions::default()
        };
        let out = evaluate(&root, "$[*]", &opts).unwrap();
        assert_eq!(values_list(out).len(), 2);
    }
}
