//! Instances: ordered rows of feature name to value.

use crate::value::Value;

/// An ordered mapping from column name to value.
///
/// Used both for the original instance of a query and for every
/// counterfactual candidate. Column order is preserved and drives the order
/// in which changes are reported.
///
/// # Example
///
/// ```
/// use cfsift_core::{Instance, Value};
///
/// let row = Instance::new()
///     .with("age", 30)
///     .with("color", "red");
///
/// assert_eq!(row.get("age"), Some(&Value::from(30)));
/// assert_eq!(row.names().collect::<Vec<_>>(), vec!["age", "color"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Instance {
    entries: Vec<(String, Value)>,
}

impl Instance {
    /// Creates an empty instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an instance from `(name, value)` pairs.
    ///
    /// A repeated name overwrites the earlier value in place.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |row, (k, v)| row.with(k, v))
    }

    /// Sets a column, keeping its position if it already exists.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a column in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Returns the value of a column.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Returns true if the column exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over column names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Iterates over `(name, value)` entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the instance has no columns.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if both instances carry exactly the same column names.
    ///
    /// Order is not significant.
    pub fn same_features(&self, other: &Instance) -> bool {
        self.len() == other.len() && self.names().all(|n| other.contains(n))
    }
}
