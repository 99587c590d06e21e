//! Feature values.
//!
//! A [`Value`] is a single cell of an instance. Categorical features may hold
//! any variant; continuous features must hold something with a numeric view.

use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single feature value.
///
/// Implements `Eq` and `Hash` so that categorical transitions can be stored in
/// hash sets. Numbers compare by their canonical bit pattern: `-0.0` equals
/// `0.0` and every NaN equals every other NaN.
///
/// # Example
///
/// ```
/// use cfsift_core::Value;
///
/// assert_eq!(Value::from(3), Value::from(3.0));
/// assert_eq!(Value::from(-0.0), Value::from(0.0));
/// assert_ne!(Value::from("red"), Value::from("blue"));
/// assert_eq!(Value::from(true).as_f64(), Some(1.0));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum Value {
    /// Boolean flag.
    Bool(bool),
    /// Numeric value (integer codes are stored as floats).
    Number(f64),
    /// Free-form label.
    Text(String),
}

impl Value {
    /// Returns the numeric view of this value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Text(_) => None,
        }
    }

    /// Returns the label if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this value has a numeric view.
    pub fn is_numeric(&self) -> bool {
        self.as_f64().is_some()
    }
}

fn canonical_bits(n: f64) -> u64 {
    if n == 0.0 {
        0.0f64.to_bits()
    } else if n.is_nan() {
        f64::NAN.to_bits()
    } else {
        n.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => canonical_bits(*a) == canonical_bits(*b),
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Bool(b) => b.hash(state),
            Value::Number(n) => canonical_bits(*n).hash(state),
            Value::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_numeric_equality_is_canonical() {
        assert_eq!(Value::from(0.0), Value::from(-0.0));
        assert_eq!(Value::from(f64::NAN), Value::from(f64::NAN));
        assert_ne!(Value::from(1.0), Value::from(1.5));
    }

    #[test]
    fn test_variants_never_cross_compare() {
        assert_ne!(Value::from(1), Value::from(true));
        assert_ne!(Value::from("1"), Value::from(1));
    }

    #[test]
    fn test_hash_agrees_with_eq() {
        let mut set = HashSet::new();
        set.insert(Value::from(-0.0));
        set.insert(Value::from(0.0));
        set.insert(Value::from("a"));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Value::from(0)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(30).to_string(), "30");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from("married").to_string(), "married");
    }

    #[test]
    fn test_numeric_view() {
        assert_eq!(Value::from(false).as_f64(), Some(0.0));
        assert_eq!(Value::from("x").as_f64(), None);
        assert!(!Value::from("x").is_numeric());
        assert_eq!(Value::from("x").as_str(), Some("x"));
    }
}
