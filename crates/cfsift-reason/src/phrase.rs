//! Phrase building blocks shared by feature and outcome clauses.

use std::fmt;

use cfsift_core::{FeatureKind, Value};

/// How a column moved between the original and the counterfactual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    /// A categorical value moved to another label.
    Changes,
    Increases,
    Decreases,
    /// Old and new values are equal.
    Stays,
}

impl Behaviour {
    /// Classifies a transition of a column of the given kind.
    ///
    /// Categorical columns either change or stay. Continuous columns compare
    /// their numeric views; a non-numeric pair falls back to equality.
    pub fn of(kind: FeatureKind, old: &Value, new: &Value) -> Self {
        match kind {
            FeatureKind::Categorical => {
                if old == new {
                    Behaviour::Stays
                } else {
                    Behaviour::Changes
                }
            }
            FeatureKind::Continuous => match (old.as_f64(), new.as_f64()) {
                (Some(o), Some(n)) if n > o => Behaviour::Increases,
                (Some(o), Some(n)) if n < o => Behaviour::Decreases,
                (Some(_), Some(_)) => Behaviour::Stays,
                _ if old == new => Behaviour::Stays,
                _ => Behaviour::Changes,
            },
        }
    }

    /// Returns the verb used in sentences.
    pub fn as_str(self) -> &'static str {
        match self {
            Behaviour::Changes => "changes",
            Behaviour::Increases => "increases",
            Behaviour::Decreases => "decreases",
            Behaviour::Stays => "stays",
        }
    }
}

impl fmt::Display for Behaviour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formats a value for display.
///
/// Categorical numbers are printed as truncated integers and continuous
/// numbers with three decimals. Text and booleans are printed verbatim.
///
/// # Examples
///
/// ```
/// use cfsift_core::{FeatureKind, Value};
/// use cfsift_reason::format_value;
///
/// assert_eq!(format_value(FeatureKind::Categorical, &Value::from(2.9)), "2");
/// assert_eq!(format_value(FeatureKind::Continuous, &Value::from(2.5)), "2.500");
/// assert_eq!(format_value(FeatureKind::Continuous, &Value::from("n/a")), "n/a");
/// ```
pub fn format_value(kind: FeatureKind, value: &Value) -> String {
    match (kind, value) {
        (FeatureKind::Categorical, Value::Number(n)) => format!("{:.0}", n.trunc()),
        (FeatureKind::Continuous, Value::Number(n)) => format!("{n:.3}"),
        _ => value.to_string(),
    }
}

pub(crate) fn clause(name: &str, kind: FeatureKind, old: &Value, new: &Value) -> String {
    format!(
        "{} {} from {} to {}",
        name,
        Behaviour::of(kind, old, new),
        format_value(kind, old),
        format_value(kind, new)
    )
}
