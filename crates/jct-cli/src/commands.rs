//! One function per verb, dispatched from `main`. Each function resolves
//! its target (or targets, for `import`) through `jct-resolve`, loads and
//! mutates the document through the core crates, and — for mutating verbs
//! — writes the result back atomically.

use std::path::Path;

use jct_error::JctError;
use jct_jsonpath::{EvalOptions, ResultMode};
use jct_value::JsonValue;

use crate::{DispatchError, ResultModeArg, Verb, load, output, restore, save};

pub fn dispatch(target: &str, verb: Verb, trace: bool) -> Result<(), DispatchError> {
    match verb {
        Verb::Get { key } => get(target, &key, trace),
        Verb::Set { key, value } => set(target, &key, &value, trace),
        Verb::Create => create(target, trace),
        Verb::Print => print(target, trace),
        Verb::Import { source } => import(target, &source, trace),
        Verb::Restore => match restore::run(target) {
            0 => Ok(()),
            code => Err(DispatchError::Restore(code)),
        },
        Verb::Path {
            expr,
            mode,
            limit,
            strict,
            pretty,
            unwrap_single,
        } => path(target, &expr, mode, limit, strict, pretty, unwrap_single, trace),
    }
}

fn get(target: &str, key: &str, trace: bool) -> Result<(), DispatchError> {
    let path = jct_resolve::resolve(target, jct_resolve::Verb::Get, trace)?;
    let doc = load(&path)?;
    let value = jct_path::get(&doc, key)?;
    output::print_scalar_or_pretty(value);
    Ok(())
}

fn set(target: &str, key: &str, value_str: &str, trace: bool) -> Result<(), DispatchError> {
    let path = jct_resolve::resolve(target, jct_resolve::Verb::Set, trace)?;
    let mut doc = load_or_empty(&path)?;
    let value = jct_path::coerce_value_string(value_str);
    jct_path::set(&mut doc, key, value)?;
    save(&path, &doc)?;
    Ok(())
}

fn create(target: &str, trace: bool) -> Result<(), DispatchError> {
    let path = jct_resolve::resolve(target, jct_resolve::Verb::Create, trace)?;
    if path.is_file() {
        return Err(DispatchError::Jct(JctError::BadInput(format!(
            "'{}' already exists; 'create' never overwrites",
            path.display()
        ))));
    }
    save(&path, &JsonValue::object())?;
    Ok(())
}

fn print(target: &str, trace: bool) -> Result<(), DispatchError> {
    let path = jct_resolve::resolve(target, jct_resolve::Verb::Print, trace)?;
    let doc = load(&path)?;
    output::print_document(&doc);
    Ok(())
}

fn import(target: &str, source: &str, trace: bool) -> Result<(), DispatchError> {
    let dest_path = jct_resolve::resolve(target, jct_resolve::Verb::Set, trace)?;
    let source_path = jct_resolve::resolve(source, jct_resolve::Verb::Get, trace)?;

    let mut dest = load_or_empty(&dest_path)?;
    let src = load(&source_path)?;
    jct_merge::merge(&mut dest, &src);
    save(&dest_path, &dest)?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn path(
    target: &str,
    expr: &str,
    mode: ResultModeArg,
    limit: Option<usize>,
    strict: bool,
    pretty: bool,
    unwrap_single: bool,
    trace: bool,
) -> Result<(), DispatchError> {
    let file = jct_resolve::resolve(target, jct_resolve::Verb::Path, trace)?;
    let doc = load(&file)?;

    let opts = EvalOptions {
        mode: ResultMode::from(mode),
        limit,
        unwrap_single,
        strict,
    };

    let result = jct_jsonpath::evaluate(&doc, expr, &opts)?;
    output::print_path_output(&result, pretty);
    Ok(())
}

/// Loads a document if `path` already exists, or starts from an empty
/// object otherwise — used by verbs whose target may be an
/// explicit path that doesn't exist yet (`set`, `import`'s destination).
fn load_or_empty(path: &Path) -> Result<JsonValue, DispatchError> {
    if path.is_file() {
        Ok(load(path)?)
    } else {
        Ok(JsonValue::object())
    }
}
