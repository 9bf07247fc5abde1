use std::collections::HashMap;

use super::Value;

/// An input record: field names mapped to [`Value`]s.
///
/// Field names are expected to be normalized already (the same spelling the
/// table's header uses). A field that is absent behaves like [`Value::Nil`].
#[derive(Debug, Clone, Default)]
pub struct Input {
    data: HashMap<String, Value>,
}

/// Read access to named fields, implemented by the input record and by the
/// per-row scope that overlays computed outputs on it.
pub(crate) trait Record {
    fn field(&self, name: &str) -> Option<&Value>;
}

impl Input {
    /// Create an empty input record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, replacing any previous one.
    #[must_use]
    pub fn set(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value.into());
        self
    }

    /// Insert a field value (mutable reference version).
    pub fn insert(&mut self, name: &str, value: Value) {
        self.data.insert(name.to_owned(), value);
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over all (name, value) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Record for Input {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Input {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
