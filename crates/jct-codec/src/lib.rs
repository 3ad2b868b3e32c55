#![doc = include_str!("../README.md")]

mod parser;
mod serializer;

pub use parser::parse;
pub use serializer::{SerializeMode, serialize};

/// Recursive-descent stack depth cap shared by the parser and serializer,
/// guarding against stack exhaustion on adversarial input.
pub(crate) const MAX_DEPTH: usize = 1000;

/// Inputs larger than this are rejected outright before parsing starts.
pub const MAX_INPUT_BYTES: usize = 100 * 1024 * 1024;
