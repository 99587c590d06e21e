use super::*;
use cfsift_core::{Change, ChangeComparator, OutcomeChange};
use cfsift_filter::{FeasibilityFilter, QueryBatch};
use cfsift_rules::{DeltaPredicate, TabuConstraintSet};
use cfsift_test::census::{census_candidates, census_original, census_schema};
use cfsift_test::toy::{toy_candidate, toy_original, toy_schema};

fn classifier() -> ReasonRenderer {
    ReasonRenderer::new("label", ModelType::Classifier)
}

#[test]
fn test_render_from_comparator_diff() {
    let schema = census_schema();
    let diff = ChangeComparator::exact()
        .diff(&schema, &census_original(), &census_candidates()[0])
        .unwrap();

    let renderer = ReasonRenderer::for_schema(&schema).unwrap();
    assert_eq!(
        renderer.render(&diff),
        "when hours_per_week increases from 38.000 to 45.000 and education changes from \
         HS-grad to Masters, the output of the model [income] changes from 0 to 1."
    );
}

#[test]
fn test_decrease_phrase() {
    let diff = ChangeComparator::exact()
        .diff(&toy_schema(), &toy_original(), &toy_candidate(-2.5, 0.0, "A"))
        .unwrap();

    assert_eq!(
        classifier().render(&diff),
        "when age decreases from 30.000 to 27.500, the output of the model [label] changes from 0 to 1."
    );
}

#[test]
fn test_regressor_outcome_is_continuous() {
    let renderer = ReasonRenderer::new("price", ModelType::Regressor);
    let diff = DiffMap::from_changes([Change::categorical("district", "north", "south")])
        .with_outcome(OutcomeChange::new(
            "price",
            120.0,
            99.5,
            ModelType::Regressor.outcome_kind(),
            true,
        ));

    assert_eq!(
        renderer.render(&diff),
        "when district changes from north to south, the output of the model [price] decreases \
         from 120.000 to 99.500."
    );
}

#[test]
fn test_unchanged_outcome_stays() {
    let diff = DiffMap::from_changes([Change::continuous("age", 30.0, 31.0)]).with_outcome(
        OutcomeChange::new("label", 0, 0, ModelType::Classifier.outcome_kind(), false),
    );

    assert!(classifier()
        .render(&diff)
        .ends_with("the output of the model [label] stays from 0 to 0."));
}

#[test]
fn test_outcome_less_diff() {
    let diff = DiffMap::from_changes([Change::categorical("color", "A", "B")]);
    assert_eq!(classifier().render(&diff), "when color changes from A to B.");
}

#[test]
fn test_empty_diff() {
    let with_outcome = DiffMap::new().with_outcome(OutcomeChange::new(
        "label",
        0,
        1,
        ModelType::Classifier.outcome_kind(),
        true,
    ));
    assert_eq!(
        classifier().render(&with_outcome),
        "no feature changes, the output of the model [label] changes from 0 to 1."
    );
    assert_eq!(classifier().render(&DiffMap::new()), "no feature changes.");
}

#[test]
fn test_explain_filtered_batch() {
    let schema = census_schema();
    let rules = TabuConstraintSet::builder(&schema)
        .forbid_transition("race", "White", "Other")
        .forbid_delta("age", DeltaPredicate::less_than(0.0))
        .build()
        .unwrap();
    let filter = FeasibilityFilter::new(rules);

    let batch = QueryBatch::from(vec![(census_original(), census_candidates())]);
    let filtered = filter.filter_batch(batch).unwrap();

    let renderer = ReasonRenderer::for_schema(&schema).unwrap();
    let explanations = renderer.explain_batch(&filtered);

    assert_eq!(explanations.len(), 3);
    assert!(explanations.iter().all(|e| e.query == 0));
    assert_eq!(
        explanations.iter().map(|e| e.counterfactual).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert!(explanations[1].sentence.contains("marital_status changes from Single to Married"));
    assert!(explanations[2].sentence.contains("workclass changes from Private to Self-Employed"));
    assert!(explanations.iter().all(|e| !e.sentence.contains("race")));
}

#[test]
fn test_schema_without_outcome_has_no_renderer() {
    let schema = cfsift_core::FeatureSchema::new().with_continuous("age");
    assert!(ReasonRenderer::for_schema(&schema).is_none());
}
