//! Adult-census style fixtures.
//!
//! Mirrors the shape of the classic income dataset: two continuous features,
//! four categorical ones and a binary income outcome.

use cfsift_core::{FeatureSchema, Instance, ModelType};

/// Census schema with `income` as the classifier outcome.
pub fn census_schema() -> FeatureSchema {
    FeatureSchema::new()
        .with_continuous("age")
        .with_continuous("hours_per_week")
        .with_categorical("workclass")
        .with_categorical("education")
        .with_categorical("marital_status")
        .with_categorical("race")
        .with_outcome("income", ModelType::Classifier)
}

/// A census row.
#[allow(clippy::too_many_arguments)]
pub fn census_row(
    age: f64,
    hours_per_week: f64,
    workclass: &str,
    education: &str,
    marital_status: &str,
    race: &str,
    income: i32,
) -> Instance {
    Instance::new()
        .with("age", age)
        .with("hours_per_week", hours_per_week)
        .with("workclass", workclass)
        .with("education", education)
        .with("marital_status", marital_status)
        .with("race", race)
        .with("income", income)
}

/// A 29 year old private-sector high-school graduate predicted below 50K.
pub fn census_original() -> Instance {
    census_row(29.0, 38.0, "Private", "HS-grad", "Single", "White", 0)
}

/// Counterfactuals for [`census_original`], all predicted above 50K.
///
/// In order: a plausible education upgrade, a race change, a younger age,
/// a marriage combined with more hours, and a job change with more hours.
pub fn census_candidates() -> Vec<Instance> {
    vec![
        census_row(29.0, 45.0, "Private", "Masters", "Single", "White", 1),
        census_row(29.0, 38.0, "Private", "HS-grad", "Single", "Other", 1),
        census_row(22.0, 38.0, "Private", "Bachelors", "Single", "White", 1),
        census_row(29.0, 60.0, "Private", "HS-grad", "Married", "White", 1),
        census_row(29.0, 50.0, "Self-Employed", "HS-grad", "Single", "White", 1),
    ]
}
