//! Change comparator.

use crate::diff::{Change, DiffMap, OutcomeChange};
use crate::error::{CfSiftError, Result};
use crate::instance::Instance;
use crate::schema::{FeatureKind, FeatureSchema};
use crate::value::Value;

/// Computes the changed features between an original and a candidate.
///
/// Continuous features are considered unchanged when `|new - old|` does not
/// exceed the tolerance; the default tolerance of zero is exact equality.
/// Categorical features always use exact equality.
///
/// # Example
///
/// ```
/// use cfsift_core::{ChangeComparator, FeatureSchema, Instance};
///
/// let schema = FeatureSchema::new()
///     .with_continuous("age")
///     .with_categorical("color");
/// let original = Instance::new().with("age", 30).with("color", "red");
/// let candidate = Instance::new().with("age", 30.05).with("color", "blue");
///
/// let exact = ChangeComparator::exact().diff(&schema, &original, &candidate).unwrap();
/// assert_eq!(exact.len(), 2);
///
/// let loose = ChangeComparator::with_tolerance(0.1).unwrap();
/// let diff = loose.diff(&schema, &original, &candidate).unwrap();
/// assert_eq!(diff.features().collect::<Vec<_>>(), vec!["color"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChangeComparator {
    tolerance: f64,
}

impl ChangeComparator {
    /// Creates a comparator using exact equality.
    pub fn exact() -> Self {
        Self { tolerance: 0.0 }
    }

    /// Creates a comparator with an absolute tolerance for continuous features.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the tolerance is negative or not finite.
    pub fn with_tolerance(tolerance: f64) -> Result<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(CfSiftError::config(format!(
                "equality tolerance must be a finite non-negative number, got {tolerance}"
            )));
        }
        Ok(Self { tolerance })
    }

    /// Returns the configured tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Diffs a candidate against the original instance.
    ///
    /// # Errors
    ///
    /// Returns a schema mismatch if either instance does not carry exactly the
    /// schema's columns, or a continuous column holds a non-numeric value.
    pub fn diff(
        &self,
        schema: &FeatureSchema,
        original: &Instance,
        candidate: &Instance,
    ) -> Result<DiffMap> {
        check_columns(schema, original, "original instance")?;
        if !original.same_features(candidate) {
            return Err(CfSiftError::schema(
                "original and candidate instances carry different feature sets",
            ));
        }

        let mut diff = DiffMap::new();
        for (name, old) in original.iter() {
            let Some(new) = candidate.get(name) else {
                return Err(CfSiftError::schema(format!(
                    "candidate is missing column '{name}'"
                )));
            };

            if let Some(outcome) = schema.outcome().filter(|o| o.name == name) {
                let kind = outcome.kind();
                let changed = self.differs(name, kind, old, new)?;
                diff.set_outcome(OutcomeChange::new(
                    name,
                    old.clone(),
                    new.clone(),
                    kind,
                    changed,
                ));
                continue;
            }

            // check_columns guarantees every remaining column is a feature
            let kind = schema
                .kind_of(name)
                .ok_or_else(|| CfSiftError::schema(format!("unknown column '{name}'")))?;
            if self.differs(name, kind, old, new)? {
                diff.push(Change::new(name, old.clone(), new.clone(), kind));
            }
        }
        Ok(diff)
    }

    fn differs(&self, name: &str, kind: FeatureKind, old: &Value, new: &Value) -> Result<bool> {
        match kind {
            FeatureKind::Categorical => Ok(old != new),
            FeatureKind::Continuous => {
                let (Some(o), Some(n)) = (old.as_f64(), new.as_f64()) else {
                    return Err(CfSiftError::schema(format!(
                        "continuous column '{name}' holds a non-numeric value ({old} -> {new})"
                    )));
                };
                if o.is_nan() || n.is_nan() {
                    return Ok(o.is_nan() != n.is_nan());
                }
                Ok((n - o).abs() > self.tolerance)
            }
        }
    }
}

fn check_columns(schema: &FeatureSchema, instance: &Instance, what: &str) -> Result<()> {
    if let Some(missing) = schema.feature_names().find(|n| !instance.contains(n)) {
        return Err(CfSiftError::schema(format!(
            "{what} is missing feature '{missing}'"
        )));
    }
    if let Some(outcome) = schema.outcome() {
        if !instance.contains(&outcome.name) {
            return Err(CfSiftError::schema(format!(
                "{what} is missing outcome '{}'",
                outcome.name
            )));
        }
    }
    if let Some(extra) = instance
        .names()
        .find(|n| schema.column_kind(n).is_none())
    {
        return Err(CfSiftError::schema(format!(
            "{what} has column '{extra}' which is not in the schema"
        )));
    }
    Ok(())
}
