#![doc = include_str!("../README.md")]

/// The seven error kinds a `jct` operation can fail with.
///
/// Every fallible operation in the workspace returns `Result<T, JctError>` —
/// there is no `anyhow::Error` inside the core crates, because a caller
/// embedding `jct` as a library needs to match on *kind*, not just print a
/// message.
#[derive(Debug, thiserror::Error)]
pub enum JctError {
    /// Malformed syntax, a non-absolute path where one is required, or a
    /// bad CLI argument.
    #[error("{0}")]
    BadInput(String),

    /// A file, key, or resolver candidate could not be found.
    #[error("{0}")]
    NotFound(String),

    /// A resolver candidate exists but is not readable.
    #[error("{0}")]
    PermissionDenied(String),

    /// A read, write, rename, or unlink failed.
    #[error("{0}")]
    IoFailure(String),

    /// The JSON or JSONPath text could not be parsed.
    #[error("{0}")]
    ParseError(String),

    /// A JSONPath expression failed during evaluation (e.g. a bad slice).
    #[error("{0}")]
    EvalError(String),

    /// An invariant was violated or an allocation failed.
    #[error("{0}")]
    Internal(String),
}

impl JctError {
    /// The process exit code this error maps to, per the CLI's exit-code
    /// table. `restore`'s own 1..=5 codes are not modeled here — they are
    /// specific to that one verb and are handled in the `jct` binary.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            JctError::BadInput(_) | JctError::IoFailure(_) | JctError::Internal(_) => 1,
            JctError::NotFound(_) | JctError::ParseError(_) => 2,
            JctError::EvalError(_) => 3,
            JctError::PermissionDenied(_) => 13,
        }
    }

    /// Short machine-readable name of the kind, used in trace output.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            JctError::BadInput(_) => "bad_input",
            JctError::NotFound(_) => "not_found",
            JctError::PermissionDenied(_) => "permission_denied",
            JctError::IoFailure(_) => "io_failure",
            JctError::ParseError(_) => "parse_error",
            JctError::EvalError(_) => "eval_error",
            JctError::Internal(_) => "internal",
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type JctResult<T> = Result<T, JctError>;
