//! Tests for session configuration.

use super::*;
use cfsift_core::{FeatureKind, Value};

#[test]
fn test_toml_parsing() {
    let toml = r#"
        tolerance = 0.5
        truncation = "keep_feasible"
        thread_count = { count = 4 }

        [schema]
        continuous = ["age", "hours_per_week"]
        categorical = ["race", "education"]
        outcome = "income"
        model_type = "classifier"

        [[rules]]
        type = "categorical"
        feature = "race"
        forbidden = [["White", "Other"], [1, 2]]
        both_ways = true

        [[rules]]
        type = "continuous"
        feature = "age"
        condition = { op = "lt", value = 0 }

        [[rules]]
        type = "coupled"
        features = ["age", "education"]
        first = { type = "continuous", condition = { op = "outside", min = -1, max = 5 } }
        second = { type = "categorical", forbidden = [["HS-grad", "Doctorate"]] }
    "#;

    let config = SiftConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.tolerance, 0.5);
    assert_eq!(config.truncation, TruncationConfig::KeepFeasible);
    assert_eq!(config.thread_count, ThreadCount::Count(4));
    assert_eq!(config.rules.len(), 3);

    match &config.rules[0] {
        RuleConfig::Categorical(rule) => {
            assert_eq!(rule.feature, "race");
            assert!(rule.both_ways);
            assert_eq!(
                rule.forbidden[0],
                (Value::from("White"), Value::from("Other"))
            );
            assert_eq!(rule.forbidden[1], (Value::from(1), Value::from(2)));
        }
        other => panic!("unexpected rule: {other:?}"),
    }
    match &config.rules[1] {
        RuleConfig::Continuous(rule) => {
            assert_eq!(rule.condition, DeltaCondition::Lt { value: 0.0 });
        }
        other => panic!("unexpected rule: {other:?}"),
    }
    match &config.rules[2] {
        RuleConfig::Coupled(rule) => {
            assert_eq!(rule.features, ("age".to_string(), "education".to_string()));
            assert!(matches!(
                rule.first,
                RuleBodyConfig::Continuous(ContinuousBody {
                    condition: DeltaCondition::Outside { min, max }
                }) if min == -1.0 && max == 5.0
            ));
            assert!(matches!(rule.second, RuleBodyConfig::Categorical(_)));
        }
        other => panic!("unexpected rule: {other:?}"),
    }

    let schema = config.feature_schema().unwrap();
    assert_eq!(schema.kind_of("race"), Some(FeatureKind::Categorical));
    assert!(schema.is_outcome("income"));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        tolerance: 0.1
        thread_count: auto
        schema:
          continuous: [age]
          categorical: [color]
        rules:
          - type: continuous
            feature: age
            condition:
              op: any_change
          - type: categorical
            feature: color
            forbidden:
              - [red, blue]
    "#;

    let config = SiftConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.thread_count, ThreadCount::Auto);
    assert_eq!(config.truncation, TruncationConfig::Align);
    assert_eq!(config.rules.len(), 2);
    assert!(matches!(
        &config.rules[0],
        RuleConfig::Continuous(ContinuousRuleConfig {
            condition: DeltaCondition::AnyChange,
            ..
        })
    ));
}

#[test]
fn test_defaults() {
    let config = SiftConfig::from_toml_str("").unwrap();
    assert_eq!(config.tolerance, 0.0);
    assert_eq!(config.thread_count, ThreadCount::None);
    assert_eq!(config.truncation, TruncationConfig::Align);
    assert!(config.rules.is_empty());
    assert_eq!(config.schema.model_type, ModelType::Classifier);
}

#[test]
fn test_builder() {
    let config = SiftConfig::new()
        .with_schema(SchemaConfig {
            continuous: vec!["age".into()],
            categorical: vec!["color".into()],
            outcome: None,
            model_type: ModelType::Regressor,
        })
        .with_tolerance(0.25)
        .with_thread_count(ThreadCount::Count(2))
        .with_truncation(TruncationConfig::KeepFeasible)
        .with_rule(RuleConfig::continuous("age", DeltaCondition::Gt { value: 5.0 }))
        .with_rule(RuleConfig::categorical(
            "color",
            vec![(Value::from("red"), Value::from("blue"))],
        ))
        .with_rule(RuleConfig::coupled(
            "age",
            "color",
            RuleBodyConfig::Continuous(ContinuousBody {
                condition: DeltaCondition::AnyChange,
            }),
            RuleBodyConfig::Categorical(CategoricalBody::default()),
        ));

    assert_eq!(config.tolerance, 0.25);
    assert_eq!(config.rules.len(), 3);
    assert_eq!(config.feature_schema().unwrap().column_count(), 2);
}

#[test]
fn test_invalid_schema_reported() {
    let config = SiftConfig::from_toml_str(
        r#"
        [schema]
        continuous = ["age"]
        categorical = ["age"]
        "#,
    )
    .unwrap();

    let err = config.feature_schema().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Rules(CfSiftError::Configuration(_))
    ));
}

#[test]
fn test_unknown_rule_type_rejected() {
    let result = SiftConfig::from_toml_str(
        r#"
        [[rules]]
        type = "triple"
        feature = "age"
        "#,
    );
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn test_missing_file() {
    let result = SiftConfig::load("/nonexistent/cfsift.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}
