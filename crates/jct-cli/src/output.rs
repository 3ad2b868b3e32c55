//! Rendering of command results to stdout, per spec.md §6's output
//! shaping: scalars print raw and unquoted, objects and arrays print as
//! pretty JSON, and every printed document ends with a trailing newline.

use jct_codec::SerializeMode;
use jct_jsonpath::{PathOutput, ValuesResult};
use jct_value::JsonValue;

/// `get`'s output shaping, also reused for a `path --unwrap-single` lone
/// match: a scalar prints raw on one line (a string without quotes, a
/// bool as `true`/`false`, `null` as `null`, a number in its canonical
/// form); an object or array prints as pretty JSON followed by a newline.
pub fn print_scalar_or_pretty(value: &JsonValue) {
    match value.scalar_text() {
        Some(text) => println!("{text}"),
        None => print_document(value),
    }
}

/// Pretty-prints an entire document (or any container value) with a
/// trailing newline, matching the on-disk canonical file format.
pub fn print_document(value: &JsonValue) {
    println!("{}", jct_codec::serialize(value, SerializeMode::Pretty));
}

/// Renders a `path` verb result according to its mode: `values` prints a
/// JSON array (or, with `--unwrap-single`, the lone scalar raw / lone
/// container as itself); `paths` prints a JSON array of path strings;
/// `pairs` prints a JSON array of `{path, value}` objects.
pub fn print_path_output(output: &PathOutput, pretty: bool) {
    let mode = if pretty {
        SerializeMode::Pretty
    } else {
        SerializeMode::Compact
    };

    match output {
        PathOutput::Values(ValuesResult::Single(value)) => print_scalar_or_pretty(value),
        PathOutput::Values(ValuesResult::List(values)) => {
            println!("{}", jct_codec::serialize(&JsonValue::Array(values.clone()), mode));
        }
        PathOutput::Paths(paths) => {
            let as_values: Vec<JsonValue> = paths.iter().map(|p| JsonValue::string(p.clone())).collect();
            println!("{}", jct_codec::serialize(&JsonValue::Array(as_values), mode));
        }
        PathOutput::Pairs(pairs) => {
            println!("{}", jct_codec::serialize(&JsonValue::Array(pairs.clone()), mode));
        }
    }
}
