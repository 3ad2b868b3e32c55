#![doc = include_str!("../README.md")]

use std::path::Path;
use std::process::ExitCode;

use bpaf::Bpaf;
use jct_cli_common::GlobalOptions;
use jct_error::{JctError, JctResult};
use jct_value::JsonValue;

mod commands;
mod output;
mod restore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResultModeArg {
    Values,
    Paths,
    Pairs,
}

impl core::str::FromStr for ResultModeArg {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "values" => Ok(Self::Values),
            "paths" => Ok(Self::Paths),
            "pairs" => Ok(Self::Pairs),
            _ => Err(format!("expected 'values', 'paths', or 'pairs', got '{s}'")),
        }
    }
}

impl From<ResultModeArg> for jct_jsonpath::ResultMode {
    fn from(m: ResultModeArg) -> Self {
        match m {
            ResultModeArg::Values => jct_jsonpath::ResultMode::Values,
            ResultModeArg::Paths => jct_jsonpath::ResultMode::Paths,
            ResultModeArg::Pairs => jct_jsonpath::ResultMode::Pairs,
        }
    }
}

#[derive(Debug, Clone, Bpaf)]
enum Verb {
    /// Print the value at a dot-notation key
    #[bpaf(command("get"))]
    Get {
        #[bpaf(positional("KEY"))]
        key: String,
    },

    /// Assign a value at a dot-notation key, auto-vivifying intermediates
    #[bpaf(command("set"))]
    Set {
        #[bpaf(positional("KEY"))]
        key: String,
        #[bpaf(positional("VALUE"))]
        value: String,
    },

    /// Create a new, empty document at an explicit path
    #[bpaf(command("create"))]
    Create,

    /// Pretty-print the entire document
    #[bpaf(command("print"))]
    Print,

    /// Deep-merge another document's contents into the target
    #[bpaf(command("import"))]
    Import {
        #[bpaf(positional("SOURCE"))]
        source: String,
    },

    /// Delete an overlay file and remount the root filesystem read-only
    #[bpaf(command("restore"))]
    Restore,

    /// Query the document with a JSONPath expression
    #[bpaf(command("path"))]
    Path {
        #[bpaf(positional("EXPR"))]
        expr: String,

        /// Shape of the reported matches
        #[bpaf(long("mode"), argument("values|paths|pairs"), fallback(ResultModeArg::Values))]
        mode: ResultModeArg,

        /// Keep only the first N matches
        #[bpaf(long("limit"), argument("N"))]
        limit: Option<usize>,

        /// Surface parse/eval errors as diagnostics with distinct exit codes
        #[bpaf(long("strict"), switch)]
        strict: bool,

        /// Pretty-print values instead of compact JSON
        #[bpaf(long("pretty"), switch)]
        pretty: bool,

        /// Emit a lone scalar match directly instead of a one-element list
        #[bpaf(long("unwrap-single"), switch)]
        unwrap_single: bool,
    },
}

#[derive(Debug, Clone, Bpaf)]
#[bpaf(options, version, generate(cli))]
/// Read, query, and modify JSON configuration documents
struct Cli {
    #[bpaf(external(jct_cli_common::global_options))]
    global: GlobalOptions,

    /// Short name or path of the document to operate on
    #[bpaf(positional("TARGET"))]
    target: String,

    #[bpaf(external(verb))]
    verb: Verb,
}

/// Configures the `tracing` subscriber from `--log-level`, falling back to
/// the `JCT_LOG` env var when the flag is left at its default. This is
/// development-only verbosity control and never changes program behavior.
fn setup_tracing(global: &GlobalOptions) {
    use tracing_subscriber::prelude::*;

    let filter = match global.log_level {
        jct_cli_common::LogLevel::None => {
            match tracing_subscriber::EnvFilter::try_from_env("JCT_LOG") {
                Ok(f) => f,
                Err(_) => return,
            }
        }
        jct_cli_common::LogLevel::Debug => tracing_subscriber::EnvFilter::new("debug"),
        jct_cli_common::LogLevel::Info => tracing_subscriber::EnvFilter::new("info"),
        jct_cli_common::LogLevel::Warn => tracing_subscriber::EnvFilter::new("warn"),
        jct_cli_common::LogLevel::Error => tracing_subscriber::EnvFilter::new("error"),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// `--trace-resolve` is a dedicated switch, not a `tracing` level: it turns
/// on `jct_resolve` at `info` regardless of `--log-level`, and
/// `jct_resolve::resolve` itself writes the `[trace] `-prefixed lines
/// directly to stderr rather than through a formatting layer, so the text
/// matches spec.md's scenario 6 byte-for-byte.
fn main() -> ExitCode {
    let cli = cli().run();
    setup_tracing(&cli.global);

    match commands::dispatch(&cli.target, cli.verb, cli.global.trace_resolve) {
        Ok(()) => ExitCode::SUCCESS,
        Err(DispatchError::Restore(code)) => ExitCode::from(code),
        Err(DispatchError::Jct(err)) => {
            eprintln!("jct: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

/// Either a `JctError` (mapped through [`JctError::exit_code`]) or one of
/// `restore`'s own 1..=5 codes, which don't fit the shared error-kind
/// table because `restore` has host-specific failure modes (no ROM
/// source, no overlay, unlink/remount failure) that the other verbs don't.
enum DispatchError {
    Jct(JctError),
    Restore(u8),
}

impl From<JctError> for DispatchError {
    fn from(err: JctError) -> Self {
        DispatchError::Jct(err)
    }
}

/// Reads and parses the document at `path` via [`jct_io::read_document`],
/// which returns an empty object rather than an error on a malformed file
/// (spec.md's permissive legacy behavior).
fn load(path: &Path) -> JctResult<JsonValue> {
    jct_io::read_document(path)
}

fn save(path: &Path, value: &JsonValue) -> JctResult<()> {
    jct_io::write_document(path, value)
}
