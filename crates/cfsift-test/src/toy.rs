//! Minimal four-column fixture.
//!
//! # Example
//!
//! ```
//! use cfsift_test::toy::{toy_row, toy_schema};
//!
//! let schema = toy_schema();
//! let row = toy_row(30.0, 1000.0, "A", 0);
//! assert_eq!(row.len(), schema.column_count());
//! ```

use cfsift_core::{FeatureSchema, Instance, ModelType, Value};

/// `age` and `income` are continuous, `color` is categorical and `label` is
/// the outcome of a classifier.
pub fn toy_schema() -> FeatureSchema {
    FeatureSchema::new()
        .with_continuous("age")
        .with_continuous("income")
        .with_categorical("color")
        .with_outcome("label", ModelType::Classifier)
}

/// Builds a row matching [`toy_schema`].
pub fn toy_row(age: f64, income: f64, color: impl Into<Value>, label: i32) -> Instance {
    Instance::new()
        .with("age", age)
        .with("income", income)
        .with("color", color)
        .with("label", label)
}

/// The original instance most toy tests start from: age 30, income 1000, color A.
pub fn toy_original() -> Instance {
    toy_row(30.0, 1000.0, "A", 0)
}

/// A flipped-label candidate moving `age` and `income` by the given deltas.
pub fn toy_candidate(age_delta: f64, income_delta: f64, color: impl Into<Value>) -> Instance {
    toy_row(30.0 + age_delta, 1000.0 + income_delta, color, 1)
}
