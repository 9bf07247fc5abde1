use std::collections::HashMap;
use std::fmt;

use super::value::Value;

/// The outcome of a decision: output column names mapped to values, in
/// output column order.
///
/// Empty when no row matched. When several rows contribute in accumulate
/// mode, every value is a [`Value::List`] and position `n` of each list comes
/// from the same row.
#[derive(Debug, Clone, PartialEq, Default)]
#[must_use]
pub struct Decision {
    attributes: Vec<(String, Value)>,
    multi_result: bool,
}

impl Decision {
    pub(crate) fn new(attributes: Vec<(String, Value)>, multi_result: bool) -> Self {
        Self {
            attributes,
            multi_result,
        }
    }

    pub(crate) fn empty() -> Self {
        Self::default()
    }

    /// Look up an output by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether more than one row contributed (outputs are lists).
    #[must_use]
    pub fn is_multi_result(&self) -> bool {
        self.multi_result
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes.iter().map(|(n, v)| (n.as_str(), v))
    }

    #[must_use]
    pub fn into_map(self) -> HashMap<String, Value> {
        self.attributes.into_iter().collect()
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.attributes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}
