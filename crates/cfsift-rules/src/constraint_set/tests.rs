//! Tests for the tabu constraint set.

use super::*;
use crate::predicate::DeltaPredicate;
use crate::rule::ForbiddenPairs;
use cfsift_core::{Change, ChangeComparator};
use cfsift_test::toy::{toy_candidate, toy_original, toy_schema};

fn diff_of(age_delta: f64, income_delta: f64, color: &str) -> DiffMap {
    ChangeComparator::exact()
        .diff(
            &toy_schema(),
            &toy_original(),
            &toy_candidate(age_delta, income_delta, color),
        )
        .unwrap()
}

fn coupled_age_income() -> TabuConstraintSet {
    TabuConstraintSet::builder(&toy_schema())
        .coupled(
            "age",
            "income",
            DeltaPredicate::greater_than(5.0),
            DeltaPredicate::less_than(0.0),
        )
        .build()
        .unwrap()
}

#[test]
fn test_no_rules_means_feasible() {
    let rules = TabuConstraintSet::empty(&toy_schema());
    assert!(rules.is_empty());
    assert_eq!(rules.schema(), &toy_schema());
    assert!(rules.is_feasible(&diff_of(100.0, -500.0, "Z")));
}

#[test]
fn test_features_without_rules_default_allow() {
    let rules = TabuConstraintSet::builder(&toy_schema())
        .forbid_transition("color", "A", "B")
        .build()
        .unwrap();

    assert!(rules.is_feasible(&diff_of(100.0, -500.0, "A")));
}

#[test]
fn test_categorical_rule() {
    let rules = TabuConstraintSet::builder(&toy_schema())
        .forbid_transition("color", "A", "B")
        .build()
        .unwrap();

    assert!(!rules.is_feasible(&diff_of(0.0, 0.0, "B")));
    assert!(rules.is_feasible(&diff_of(0.0, 0.0, "C")));
}

#[test]
fn test_categorical_transitions_are_directed() {
    let reverse = DiffMap::from_changes([Change::categorical("color", "B", "A")]);

    let one_way = TabuConstraintSet::builder(&toy_schema())
        .forbid_transition("color", "A", "B")
        .build()
        .unwrap();
    assert!(one_way.is_feasible(&reverse));

    let both_ways = TabuConstraintSet::builder(&toy_schema())
        .rule(
            RuleKey::single("color"),
            FeasibilityRule::Categorical(ForbiddenPairs::new().forbid_both_ways("A", "B")),
        )
        .build()
        .unwrap();
    assert!(!both_ways.is_feasible(&reverse));
    assert!(!both_ways.is_feasible(&diff_of(0.0, 0.0, "B")));
}

#[test]
fn test_forbid_transition_accumulates() {
    let rules = TabuConstraintSet::builder(&toy_schema())
        .forbid_transition("color", "A", "B")
        .forbid_transition("color", "A", "C")
        .build()
        .unwrap();

    assert_eq!(rules.len(), 1);
    assert!(!rules.is_feasible(&diff_of(0.0, 0.0, "B")));
    assert!(!rules.is_feasible(&diff_of(0.0, 0.0, "C")));
    assert!(rules.is_feasible(&diff_of(0.0, 0.0, "D")));
}

#[test]
fn test_continuous_rule_boundary() {
    let rules = TabuConstraintSet::builder(&toy_schema())
        .forbid_delta("age", DeltaPredicate::greater_than(5.0))
        .build()
        .unwrap();

    assert!(rules.is_feasible(&diff_of(4.0, 0.0, "A")));
    assert!(!rules.is_feasible(&diff_of(6.0, 0.0, "A")));
    assert!(rules.is_feasible(&diff_of(5.0, 0.0, "A")));
}

#[test]
fn test_coupled_rule_or_semantics() {
    let rules = coupled_age_income();

    // age half violates
    assert!(!rules.is_feasible(&diff_of(10.0, 50.0, "A")));
    // income half violates
    assert!(!rules.is_feasible(&diff_of(2.0, -10.0, "A")));
    // neither half violates
    assert!(rules.is_feasible(&diff_of(2.0, 10.0, "A")));
}

#[test]
fn test_coupled_rule_skipped_when_one_feature_unchanged() {
    let rules = coupled_age_income();

    // age alone would violate its half, but income did not move
    assert!(rules.is_feasible(&diff_of(10.0, 0.0, "A")));
    // income alone would violate its half, but age did not move
    assert!(rules.is_feasible(&diff_of(0.0, -10.0, "A")));
}

#[test]
fn test_single_rules_short_circuit_before_coupled() {
    let rules = TabuConstraintSet::builder(&toy_schema())
        .forbid_transition("color", "A", "B")
        .coupled(
            "age",
            "income",
            DeltaPredicate::greater_than(5.0),
            DeltaPredicate::less_than(0.0),
        )
        .build()
        .unwrap();

    let verdict = rules.check(&diff_of(10.0, 50.0, "B"));
    assert_eq!(verdict, Verdict::Violated(RuleKey::single("color")));

    let verdict = rules.check(&diff_of(10.0, 50.0, "C"));
    assert_eq!(verdict, Verdict::Violated(RuleKey::coupled("age", "income")));
    assert_eq!(verdict.violated_rule(), Some(&RuleKey::coupled("age", "income")));

    assert_eq!(rules.check(&diff_of(1.0, 50.0, "C")), Verdict::Feasible);
}

#[test]
fn test_first_violated_single_rule_is_reported() {
    let rules = TabuConstraintSet::builder(&toy_schema())
        .forbid_delta("age", DeltaPredicate::any_change())
        .forbid_delta("income", DeltaPredicate::any_change())
        .build()
        .unwrap();

    assert_eq!(
        rules.check(&diff_of(1.0, 1.0, "A")),
        Verdict::Violated(RuleKey::single("age"))
    );
}

#[test]
fn test_hand_built_diff_map() {
    let rules = coupled_age_income();
    let diff = DiffMap::from_changes([
        Change::continuous("income", 1000.0, 900.0),
        Change::continuous("age", 30.0, 31.0),
    ]);
    assert!(!rules.is_feasible(&diff));
}

#[test]
fn test_unknown_feature_rejected() {
    let err = TabuConstraintSet::builder(&toy_schema())
        .forbid_delta("height", DeltaPredicate::greater_than(1.0))
        .build()
        .unwrap_err();
    assert!(matches!(err, CfSiftError::Configuration(_)));
    assert!(err.to_string().contains("height"));
}

#[test]
fn test_unknown_coupled_feature_rejected() {
    let err = TabuConstraintSet::builder(&toy_schema())
        .coupled(
            "age",
            "height",
            DeltaPredicate::greater_than(5.0),
            DeltaPredicate::less_than(0.0),
        )
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("height"));
}

#[test]
fn test_outcome_cannot_carry_rule() {
    let err = TabuConstraintSet::builder(&toy_schema())
        .forbid_transition("label", 0, 1)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("outcome"));
}

#[test]
fn test_kind_mismatch_rejected() {
    let err = TabuConstraintSet::builder(&toy_schema())
        .rule(
            RuleKey::single("age"),
            FeasibilityRule::Categorical(ForbiddenPairs::new().forbid(30, 31)),
        )
        .build()
        .unwrap_err();
    assert!(matches!(err, CfSiftError::Configuration(_)));

    let err = TabuConstraintSet::builder(&toy_schema())
        .forbid_delta("color", DeltaPredicate::any_change())
        .build()
        .unwrap_err();
    assert!(matches!(err, CfSiftError::Configuration(_)));
}

#[test]
fn test_payload_shape_mismatch_rejected() {
    let single_key_pair_payload = TabuConstraintSet::new(
        &toy_schema(),
        [(
            RuleKey::single("age"),
            RulePayload::Coupled(
                DeltaPredicate::any_change().into(),
                DeltaPredicate::any_change().into(),
            ),
        )],
    );
    assert!(single_key_pair_payload.is_err());

    let coupled_key_single_payload = TabuConstraintSet::new(
        &toy_schema(),
        [(
            RuleKey::coupled("age", "income"),
            RulePayload::Single(DeltaPredicate::any_change().into()),
        )],
    );
    let err = coupled_key_single_payload.unwrap_err();
    assert!(err.to_string().contains("coupled pair of rules"));
}

#[test]
fn test_coupled_same_feature_rejected() {
    let err = TabuConstraintSet::builder(&toy_schema())
        .coupled(
            "age",
            "age",
            DeltaPredicate::greater_than(5.0),
            DeltaPredicate::less_than(0.0),
        )
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("twice"));
}

#[test]
fn test_duplicate_rules_rejected() {
    let err = TabuConstraintSet::builder(&toy_schema())
        .forbid_delta("age", DeltaPredicate::greater_than(5.0))
        .forbid_delta("age", DeltaPredicate::less_than(0.0))
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("more than once"));

    let err = TabuConstraintSet::builder(&toy_schema())
        .coupled("age", "income", DeltaPredicate::any_change(), DeltaPredicate::any_change())
        .coupled("income", "age", DeltaPredicate::any_change(), DeltaPredicate::any_change())
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("more than once"));
}

#[test]
fn test_accessors() {
    let rules = TabuConstraintSet::builder(&toy_schema())
        .forbid_transition("color", "A", "B")
        .coupled(
            "age",
            "income",
            DeltaPredicate::greater_than(5.0),
            DeltaPredicate::less_than(0.0),
        )
        .build()
        .unwrap();

    assert_eq!(rules.len(), 2);
    assert!(rules.single_rule("color").is_some());
    assert!(rules.single_rule("age").is_none());
    assert_eq!(
        rules.coupled_features().collect::<Vec<_>>(),
        vec![("age", "income")]
    );
    let (first, second) = rules.coupled_rules()[0].rules();
    assert_eq!(first.kind(), cfsift_core::FeatureKind::Continuous);
    assert_eq!(second.kind(), cfsift_core::FeatureKind::Continuous);
}

#[test]
fn test_constraint_set_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TabuConstraintSet>();
}
