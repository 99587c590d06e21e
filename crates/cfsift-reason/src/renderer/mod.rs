//! Sentence rendering for diff maps.

use cfsift_core::{DiffMap, FeatureSchema, ModelType};
use cfsift_filter::FilteredBatch;
use tracing::debug;

use crate::phrase::clause;

/// A rendered reason for one surviving counterfactual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    /// Index of the query in the batch.
    pub query: usize,
    /// Index of the counterfactual within its filtered query.
    pub counterfactual: usize,
    /// The rendered reason.
    pub sentence: String,
}

/// Renders diff maps as natural-language sentences.
///
/// # Examples
///
/// ```
/// use cfsift_core::{Change, DiffMap, ModelType, OutcomeChange};
/// use cfsift_reason::ReasonRenderer;
///
/// let renderer = ReasonRenderer::new("income", ModelType::Classifier);
/// let diff = DiffMap::from_changes([
///     Change::continuous("age", 30.0, 35.0),
///     Change::categorical("education", "HS-grad", "Masters"),
/// ])
/// .with_outcome(OutcomeChange::new("income", 0, 1, ModelType::Classifier.outcome_kind(), true));
///
/// assert_eq!(
///     renderer.render(&diff),
///     "when age increases from 30.000 to 35.000 and education changes from HS-grad to Masters, \
///      the output of the model [income] changes from 0 to 1."
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ReasonRenderer {
    outcome_display: String,
    model_type: ModelType,
}

impl ReasonRenderer {
    /// Creates a renderer naming the outcome `[outcome_display]`.
    pub fn new(outcome_display: impl Into<String>, model_type: ModelType) -> Self {
        Self {
            outcome_display: outcome_display.into(),
            model_type,
        }
    }

    /// Creates a renderer from the schema's outcome, if one is declared.
    pub fn for_schema(schema: &FeatureSchema) -> Option<Self> {
        schema
            .outcome()
            .map(|outcome| Self::new(outcome.name.clone(), outcome.model_type))
    }

    /// Returns the outcome name shown between brackets.
    pub fn outcome_display(&self) -> &str {
        &self.outcome_display
    }

    /// Returns the model type deciding how the outcome clause reads.
    pub fn model_type(&self) -> ModelType {
        self.model_type
    }

    /// Renders one diff map.
    ///
    /// Feature clauses follow the diff order and are joined with `and`. The
    /// outcome clause is appended when the diff carries an outcome. A diff
    /// without feature changes starts with `no feature changes`.
    pub fn render(&self, diff: &DiffMap) -> String {
        let features: Vec<String> = diff
            .iter()
            .map(|change| clause(&change.feature, change.kind, &change.old, &change.new))
            .collect();

        let lead = if features.is_empty() {
            "no feature changes".to_string()
        } else {
            format!("when {}", features.join(" and "))
        };

        match diff.outcome() {
            Some(outcome) => format!(
                "{}, the output of the model {}.",
                lead,
                clause(
                    &format!("[{}]", self.outcome_display),
                    self.model_type.outcome_kind(),
                    &outcome.old,
                    &outcome.new,
                )
            ),
            None => format!("{lead}."),
        }
    }

    /// Renders every surviving counterfactual of a filtered batch, query by query.
    pub fn explain_batch(&self, batch: &FilteredBatch) -> Vec<Explanation> {
        let mut explanations = Vec::with_capacity(batch.report.total_retained());

        for (query, filtered) in batch.queries.iter().enumerate() {
            for (counterfactual, cf) in filtered.counterfactuals.iter().enumerate() {
                let sentence = self.render(&cf.diff);
                debug!(
                    event = "reason_rendered",
                    query = query,
                    counterfactual = counterfactual,
                    changes = cf.diff.len(),
                );
                explanations.push(Explanation {
                    query,
                    counterfactual,
                    sentence,
                });
            }
        }

        explanations
    }
}

#[cfg(test)]
mod tests;
