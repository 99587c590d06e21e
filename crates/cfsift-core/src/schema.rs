//! Feature schema.
//!
//! The schema is fixed for the lifetime of a filtering session. It names every
//! feature, its kind, and optionally the outcome column produced by the model.

use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CfSiftError, Result};

/// How a feature's changes are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum FeatureKind {
    /// Changes are (old, new) transitions between labels.
    Categorical,
    /// Changes are numeric deltas `new - old`.
    Continuous,
}

/// Kind of model whose predictions are being explained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ModelType {
    /// Discrete labels; the outcome behaves like a categorical feature.
    #[default]
    Classifier,
    /// Real-valued scores; the outcome behaves like a continuous feature.
    Regressor,
}

impl ModelType {
    /// Returns the feature kind of this model's outcome column.
    pub fn outcome_kind(self) -> FeatureKind {
        match self {
            ModelType::Classifier => FeatureKind::Categorical,
            ModelType::Regressor => FeatureKind::Continuous,
        }
    }
}

/// Describes one input feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureDescriptor {
    /// Column name.
    pub name: String,
    /// Change semantics.
    pub kind: FeatureKind,
}

impl FeatureDescriptor {
    /// Creates a new feature descriptor.
    pub fn new(name: impl Into<String>, kind: FeatureKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Describes the outcome (target) column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeDescriptor {
    /// Column name of the prediction.
    pub name: String,
    /// Model producing the prediction.
    pub model_type: ModelType,
}

impl OutcomeDescriptor {
    /// Returns the feature kind of the outcome.
    pub fn kind(&self) -> FeatureKind {
        self.model_type.outcome_kind()
    }
}

/// Ordered set of feature descriptors plus an optional outcome.
///
/// # Example
///
/// ```
/// use cfsift_core::{FeatureKind, FeatureSchema, ModelType};
///
/// let schema = FeatureSchema::new()
///     .with_continuous("age")
///     .with_categorical("education")
///     .with_outcome("income", ModelType::Classifier);
///
/// assert_eq!(schema.kind_of("age"), Some(FeatureKind::Continuous));
/// assert_eq!(schema.column_kind("income"), Some(FeatureKind::Categorical));
/// assert!(schema.is_outcome("income"));
/// assert_eq!(schema.column_count(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSchema {
    features: Vec<FeatureDescriptor>,
    outcome: Option<OutcomeDescriptor>,
}

impl FeatureSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a feature of the given kind.
    pub fn with_feature(mut self, name: impl Into<String>, kind: FeatureKind) -> Self {
        self.features.push(FeatureDescriptor::new(name, kind));
        self
    }

    /// Adds a continuous feature.
    pub fn with_continuous(self, name: impl Into<String>) -> Self {
        self.with_feature(name, FeatureKind::Continuous)
    }

    /// Adds a categorical feature.
    pub fn with_categorical(self, name: impl Into<String>) -> Self {
        self.with_feature(name, FeatureKind::Categorical)
    }

    /// Declares the outcome column.
    pub fn with_outcome(mut self, name: impl Into<String>, model_type: ModelType) -> Self {
        self.outcome = Some(OutcomeDescriptor {
            name: name.into(),
            model_type,
        });
        self
    }

    /// Checks that names are unique and the outcome does not shadow a feature.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for feature in &self.features {
            if feature.name.is_empty() {
                return Err(CfSiftError::config("feature name must not be empty"));
            }
            if !seen.insert(feature.name.as_str()) {
                return Err(CfSiftError::config(format!(
                    "feature '{}' is declared more than once",
                    feature.name
                )));
            }
        }
        if let Some(outcome) = &self.outcome {
            if seen.contains(outcome.name.as_str()) {
                return Err(CfSiftError::config(format!(
                    "outcome '{}' is also declared as a feature",
                    outcome.name
                )));
            }
        }
        Ok(())
    }

    /// Returns the feature descriptors in declaration order.
    pub fn features(&self) -> &[FeatureDescriptor] {
        &self.features
    }

    /// Returns the outcome descriptor, if declared.
    pub fn outcome(&self) -> Option<&OutcomeDescriptor> {
        self.outcome.as_ref()
    }

    /// Returns the kind of an input feature. The outcome is not a feature.
    pub fn kind_of(&self, name: &str) -> Option<FeatureKind> {
        self.features
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.kind)
    }

    /// Returns the kind of any column, the outcome included.
    pub fn column_kind(&self, name: &str) -> Option<FeatureKind> {
        match &self.outcome {
            Some(outcome) if outcome.name == name => Some(outcome.kind()),
            _ => self.kind_of(name),
        }
    }

    /// Returns true if `name` is an input feature.
    pub fn contains(&self, name: &str) -> bool {
        self.kind_of(name).is_some()
    }

    /// Returns true if `name` is the outcome column.
    pub fn is_outcome(&self, name: &str) -> bool {
        self.outcome.as_ref().is_some_and(|o| o.name == name)
    }

    /// Iterates over input feature names in declaration order.
    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|f| f.name.as_str())
    }

    /// Number of columns an instance must carry (features plus outcome).
    pub fn column_count(&self) -> usize {
        self.features.len() + usize::from(self.outcome.is_some())
    }
}
