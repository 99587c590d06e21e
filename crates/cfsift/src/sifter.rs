//! Pipeline entry point: configuration to filter to reasons.

use std::path::Path;

use cfsift_config::{ConfigError, SiftConfig};
use cfsift_core::{ModelType, Result};
use cfsift_filter::{FeasibilityFilter, FilterBuilder, FilteredBatch, QueryBatch};
use cfsift_reason::{Explanation, ReasonRenderer};
use tracing::info;

/// A configured filtering session.
#[derive(Debug, Clone)]
pub struct Sifter {
    filter: FeasibilityFilter,
}

impl Sifter {
    /// Wraps an already built filter.
    pub fn new(filter: FeasibilityFilter) -> Self {
        Self { filter }
    }

    /// Builds a session from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Rules`] when the schema or the rules are invalid.
    pub fn from_config(config: &SiftConfig) -> std::result::Result<Self, ConfigError> {
        Ok(Self::new(FilterBuilder::build(config)?))
    }

    /// Loads a TOML configuration file and builds a session from it.
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        Self::from_config(&SiftConfig::load(path)?)
    }

    /// Returns the underlying filter.
    pub fn filter(&self) -> &FeasibilityFilter {
        &self.filter
    }

    /// Filters a batch.
    pub fn sift(&self, batch: QueryBatch) -> Result<FilteredBatch> {
        self.filter.filter_batch(batch)
    }

    /// Filters a batch and renders a reason for every surviving counterfactual.
    ///
    /// The outcome is shown as `[outcome_label]`; its behaviour follows the
    /// model type declared in the schema (classifier when none is declared).
    pub fn explain(
        &self,
        batch: QueryBatch,
        outcome_label: &str,
    ) -> Result<(FilteredBatch, Vec<Explanation>)> {
        let filtered = self.sift(batch)?;

        let model_type = self
            .filter
            .schema()
            .outcome()
            .map(|outcome| outcome.model_type)
            .unwrap_or(ModelType::Classifier);
        let renderer = ReasonRenderer::new(outcome_label, model_type);
        let explanations = renderer.explain_batch(&filtered);

        info!(
            event = "reasons_rendered",
            queries = filtered.len(),
            reasons = explanations.len(),
        );

        Ok((filtered, explanations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfsift_core::CfSiftError;
    use cfsift_filter::{Parallelism, TruncationPolicy};
    use cfsift_test::census::{census_candidates, census_original};

    const CENSUS: &str = r#"
        thread_count = "auto"

        [schema]
        continuous = ["age", "hours_per_week"]
        categorical = ["workclass", "education", "marital_status", "race"]
        outcome = "income"

        [[rules]]
        type = "categorical"
        feature = "race"
        forbidden = [["White", "Other"]]
        both_ways = true

        [[rules]]
        type = "continuous"
        feature = "age"
        condition = { op = "lt", value = 0 }

        [[rules]]
        type = "coupled"
        features = ["workclass", "hours_per_week"]
        first = { type = "categorical", forbidden = [["Private", "Self-Employed"]] }
        second = { type = "continuous", condition = { op = "gt", value = 20 } }
    "#;

    fn census_sifter() -> Sifter {
        Sifter::from_config(&SiftConfig::from_toml_str(CENSUS).unwrap()).unwrap()
    }

    fn census_batch() -> QueryBatch {
        QueryBatch::from(vec![
            (census_original(), census_candidates()),
            (census_original(), census_candidates().into_iter().rev().collect()),
        ])
    }

    #[test]
    fn test_from_config_wires_settings() {
        let sifter = census_sifter();
        assert_eq!(sifter.filter().parallelism(), Parallelism::Auto);
        assert_eq!(sifter.filter().policy(), TruncationPolicy::Align);
        assert_eq!(sifter.filter().constraints().len(), 3);
    }

    #[test]
    fn test_sift_census_batch() {
        let filtered = census_sifter().sift(census_batch()).unwrap();

        // race change, younger age and the job switch are rejected
        assert_eq!(filtered.report.min_retained, 2);
        assert_eq!(filtered.report.excluded, 3);
        assert!(filtered.is_rectangular());
        for query in &filtered.queries {
            assert!(query
                .counterfactuals
                .iter()
                .all(|cf| !cf.diff.contains("race") && !cf.diff.contains("workclass")));
        }
    }

    #[test]
    fn test_explain_uses_label() {
        let (filtered, reasons) = census_sifter()
            .explain(census_batch(), "income > 50K")
            .unwrap();

        assert_eq!(reasons.len(), filtered.report.total_retained());
        assert!(reasons
            .iter()
            .all(|r| r.sentence.ends_with("the output of the model [income > 50K] changes from 0 to 1.")));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SiftConfig::from_toml_str(
            r#"
            [schema]
            categorical = ["race"]

            [[rules]]
            type = "continuous"
            feature = "race"
            condition = { op = "any_change" }
            "#,
        )
        .unwrap();

        assert!(matches!(
            Sifter::from_config(&config),
            Err(ConfigError::Rules(CfSiftError::Configuration(_)))
        ));
    }

    #[test]
    fn test_missing_config_file() {
        assert!(matches!(
            Sifter::load("/nonexistent/cfsift.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
