//! Change diffs between an original instance and a counterfactual.
//!
//! A [`DiffMap`] lists only the features whose value differs, in the column
//! order of the original instance. The outcome column is never part of the
//! feature changes; it is reported in its own slot so that rules and
//! renderers can treat it separately.

mod comparator;


pub use comparator::ChangeComparator;

use smallvec::SmallVec;

use crate::schema::FeatureKind;
use crate::value::Value;

/// A single feature change between an original and a candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    /// Feature name.
    pub feature: String,
    /// Value in the original instance.
    pub old: Value,
    /// Value in the candidate.
    pub new: Value,
    /// How the change is measured.
    pub kind: FeatureKind,
}

impl Change {
    /// Creates a new change.
    pub fn new(
        feature: impl Into<String>,
        old: impl Into<Value>,
        new: impl Into<Value>,
        kind: FeatureKind,
    ) -> Self {
        Self {
            feature: feature.into(),
            old: old.into(),
            new: new.into(),
            kind,
        }
    }

    /// Creates a categorical change.
    pub fn categorical(
        feature: impl Into<String>,
        old: impl Into<Value>,
        new: impl Into<Value>,
    ) -> Self {
        Self::new(feature, old, new, FeatureKind::Categorical)
    }

    /// Creates a continuous change.
    pub fn continuous(feature: impl Into<String>, old: f64, new: f64) -> Self {
        Self::new(feature, old, new, FeatureKind::Continuous)
    }

    /// Returns `new - old` for continuous changes.
    ///
    /// `None` for categorical changes or when either side is not numeric.
    pub fn delta(&self) -> Option<f64> {
        match self.kind {
            FeatureKind::Continuous => Some(self.new.as_f64()? - self.old.as_f64()?),
            FeatureKind::Categorical => None,
        }
    }

    /// Returns the `(old, new)` transition.
    pub fn pair(&self) -> (&Value, &Value) {
        (&self.old, &self.new)
    }
}

/// Pre and post values of the outcome column.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeChange {
    /// Outcome column name.
    pub name: String,
    /// Outcome of the original instance.
    pub old: Value,
    /// Outcome of the candidate.
    pub new: Value,
    /// Kind derived from the model type.
    pub kind: FeatureKind,
    changed: bool,
}

impl OutcomeChange {
    /// Creates an outcome slot.
    pub fn new(
        name: impl Into<String>,
        old: impl Into<Value>,
        new: impl Into<Value>,
        kind: FeatureKind,
        changed: bool,
    ) -> Self {
        Self {
            name: name.into(),
            old: old.into(),
            new: new.into(),
            kind,
            changed,
        }
    }

    /// Returns true if the candidate's outcome differs from the original's.
    pub fn changed(&self) -> bool {
        self.changed
    }
}

/// Changed features between an original instance and one candidate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffMap {
    changes: SmallVec<[Change; 8]>,
    outcome: Option<OutcomeChange>,
}

impl DiffMap {
    /// Creates an empty diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a diff from feature changes, keeping their order.
    pub fn from_changes(changes: impl IntoIterator<Item = Change>) -> Self {
        Self {
            changes: changes.into_iter().collect(),
            outcome: None,
        }
    }

    /// Sets the outcome slot.
    pub fn with_outcome(mut self, outcome: OutcomeChange) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub(crate) fn push(&mut self, change: Change) {
        self.changes.push(change);
    }

    pub(crate) fn set_outcome(&mut self, outcome: OutcomeChange) {
        self.outcome = Some(outcome);
    }

    /// Returns the change of a feature, if it changed.
    pub fn get(&self, feature: &str) -> Option<&Change> {
        self.changes.iter().find(|c| c.feature == feature)
    }

    /// Returns true if the feature changed.
    pub fn contains(&self, feature: &str) -> bool {
        self.get(feature).is_some()
    }

    /// Iterates over feature changes in original column order.
    pub fn iter(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter()
    }

    /// Iterates over the names of changed features.
    pub fn features(&self) -> impl Iterator<Item = &str> {
        self.changes.iter().map(|c| c.feature.as_str())
    }

    /// Returns the outcome slot.
    pub fn outcome(&self) -> Option<&OutcomeChange> {
        self.outcome.as_ref()
    }

    /// Number of changed features (the outcome is not counted).
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns true if no feature changed.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl<'a> IntoIterator for &'a DiffMap {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}
