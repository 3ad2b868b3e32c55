use crate::JsonValue;

/// An insertion-order-preserving map from `String` keys to `JsonValue`,
/// backed by a contiguous `Vec` of pairs.
///
/// Lookup is linear, which is the right trade at configuration-file scale:
/// a hash index would add a dependency and a second source of truth for
/// ordering, for no measurable benefit on documents with tens to low
/// hundreds of keys. Duplicate keys can never exist: [`insert`] always
/// replaces in place.
///
/// [`insert`]: JsonObject::insert
#[derive(Debug, Clone, Default)]
pub struct JsonObject(Vec<(String, JsonValue)>);

impl JsonObject {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut JsonValue> {
        self.0.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert `key` → `value`. If `key` already exists, its value is
    /// replaced in place (position preserved) and the prior value is
    /// returned, dropped by the caller. Otherwise the pair is appended,
    /// preserving insertion order in memory — sorting happens only at
    /// serialization time.
    pub fn insert(&mut self, key: impl Into<String>, value: JsonValue) -> Option<JsonValue> {
        let key = key.into();
        if let Some(existing) = self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(core::mem::replace(&mut existing.1, value))
        } else {
            self.0.push((key, value));
            None
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<JsonValue> {
        let idx = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(idx).1)
    }

    /// Iterate in insertion order (not sorted — the codec sorts on output).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys and values sorted lexicographically ascending by key, the
    /// canonical serialization order.
    #[must_use]
    pub fn sorted_iter(&self) -> Vec<(&str, &JsonValue)> {
        let mut pairs: Vec<(&str, &JsonValue)> = self.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
    }
}

impl PartialEq for JsonObject {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .all(|(k, v)| other.get(k).is_some_and(|ov| ov == v))
    }
}

impl Eq for JsonObject {}

impl<'a> IntoIterator for &'a JsonObject {
    type Item = (&'a str, &'a JsonValue);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a JsonValue)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
