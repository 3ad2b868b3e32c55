#![doc = include_str!("../README.md")]

mod number;
mod object;

pub use number::format_number;
pub use object::JsonObject;

/// The tagged JSON tree.
///
/// Every node has exactly one owner: its parent container, or the root
/// handle held by the caller. `Clone` is the only way to duplicate a
/// subtree, and it always produces a disjoint copy — there is no shared
/// substructure between a parsed tree and any of its clones.
#[derive(Debug, Clone)]
pub enum JsonValue {
    Null,
    Bool(bool),
    /// An IEEE-754 double. See [`format_number`] for the canonical textual
    /// form (integer form when the value round-trips through a 64-bit
    /// signed integer, general form otherwise).
    Number(f64),
    /// Decoded bytes: a `\n` in source text lives here as a single newline
    /// byte, never as the two-byte sequence `\`, `n`. Escaping is entirely
    /// the codec's responsibility.
    String(String),
    Array(Vec<JsonValue>),
    Object(JsonObject),
}

impl JsonValue {
    #[must_use]
    pub fn object() -> Self {
        JsonValue::Object(JsonObject::new())
    }

    #[must_use]
    pub fn array() -> Self {
        JsonValue::Array(Vec::new())
    }

    #[must_use]
    pub fn string(s: impl Into<String>) -> Self {
        JsonValue::String(s.into())
    }

    #[must_use]
    pub fn number(n: f64) -> Self {
        JsonValue::Number(n)
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    /// Truthiness as used by JSONPath bare-path filters: exists and is
    /// neither `null` nor `false`.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, JsonValue::Null | JsonValue::Bool(false))
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(a) => Some(a.as_slice()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<JsonValue>> {
        match self {
            JsonValue::Array(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonValue::Object(o) => Some(o),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object_mut(&mut self) -> Option<&mut JsonObject> {
        match self {
            JsonValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// The canonical textual form of a scalar, used by `jct get` to print
    /// raw scalars without surrounding quotes or JSON escaping.
    #[must_use]
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            JsonValue::Null => Some("null".to_string()),
            JsonValue::Bool(b) => Some(b.to_string()),
            JsonValue::Number(n) => Some(format_number(*n)),
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Array(_) | JsonValue::Object(_) => None,
        }
    }
}

/// Structural equality: types must match, numbers compare by bit pattern,
/// strings compare byte-for-byte, arrays compare elementwise in order,
/// objects compare by key set with structurally equal values regardless of
/// insertion order (duplicate keys are impossible by construction, so "set
/// of keys" and "multiset of keys" coincide).
impl PartialEq for JsonValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JsonValue::Null, JsonValue::Null) => true,
            (JsonValue::Bool(a), JsonValue::Bool(b)) => a == b,
            (JsonValue::Number(a), JsonValue::Number(b)) => a.to_bits() == b.to_bits(),
            (JsonValue::String(a), JsonValue::String(b)) => a == b,
            (JsonValue::Array(a), JsonValue::Array(b)) => a == b,
            (JsonValue::Object(a), JsonValue::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for JsonValue {}
