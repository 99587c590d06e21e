//! Builder module for constructing filters from configuration
//!
//! This module provides the wiring between configuration types and
//! the actual filter implementation.

use cfsift_config::{
    ConfigError, DeltaCondition, RuleBodyConfig, RuleConfig, SiftConfig, ThreadCount,
    TruncationConfig,
};
use cfsift_core::{CfSiftError, ChangeComparator, FeatureSchema, Result, Value};
use cfsift_rules::{
    DeltaPredicate, FeasibilityRule, ForbiddenPairs, RuleKey, RulePayload, TabuConstraintSet,
};

use crate::filter::FeasibilityFilter;
use crate::policy::{Parallelism, TruncationPolicy};

/// Builder for constructing filters and rules from configuration.
pub struct FilterBuilder;

impl FilterBuilder {
    /// Builds a complete filter from configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfsift_config::SiftConfig;
    /// use cfsift_filter::FilterBuilder;
    ///
    /// let config = SiftConfig::from_toml_str(r#"
    ///     [schema]
    ///     continuous = ["age"]
    ///
    ///     [[rules]]
    ///     type = "continuous"
    ///     feature = "age"
    ///     condition = { op = "lt", value = 0 }
    /// "#).unwrap();
    ///
    /// let filter = FilterBuilder::build(&config).unwrap();
    /// assert_eq!(filter.constraints().len(), 1);
    /// ```
    pub fn build(config: &SiftConfig) -> std::result::Result<FeasibilityFilter, ConfigError> {
        let schema = config.feature_schema()?;
        let constraints = Self::constraint_set(&schema, &config.rules)?;
        let comparator = ChangeComparator::with_tolerance(config.tolerance)?;

        Ok(FeasibilityFilter::new(constraints)
            .with_comparator(comparator)
            .with_policy(Self::truncation(config.truncation))
            .with_parallelism(Self::parallelism(&config.thread_count))?)
    }

    /// Compiles rule configurations into a constraint set.
    pub fn constraint_set(schema: &FeatureSchema, rules: &[RuleConfig]) -> Result<TabuConstraintSet> {
        let compiled = rules
            .iter()
            .map(Self::rule)
            .collect::<Result<Vec<_>>>()?;
        TabuConstraintSet::new(schema, compiled)
    }

    /// Compiles one rule configuration.
    pub fn rule(config: &RuleConfig) -> Result<(RuleKey, RulePayload)> {
        match config {
            RuleConfig::Categorical(rule) => Ok((
                RuleKey::single(rule.feature.clone()),
                RulePayload::Single(Self::categorical(&rule.forbidden, rule.both_ways)),
            )),

            RuleConfig::Continuous(rule) => Ok((
                RuleKey::single(rule.feature.clone()),
                RulePayload::Single(FeasibilityRule::Continuous(Self::predicate(
                    &rule.condition,
                )?)),
            )),

            RuleConfig::Coupled(rule) => {
                let (first, second) = &rule.features;
                Ok((
                    RuleKey::coupled(first.clone(), second.clone()),
                    RulePayload::Coupled(Self::body(&rule.first)?, Self::body(&rule.second)?),
                ))
            }
        }
    }

    /// Compiles one half of a coupled rule.
    pub fn body(config: &RuleBodyConfig) -> Result<FeasibilityRule> {
        match config {
            RuleBodyConfig::Categorical(body) => {
                Ok(Self::categorical(&body.forbidden, body.both_ways))
            }
            RuleBodyConfig::Continuous(body) => {
                Ok(FeasibilityRule::Continuous(Self::predicate(&body.condition)?))
            }
        }
    }

    /// Compiles a delta condition into a predicate.
    pub fn predicate(condition: &DeltaCondition) -> Result<DeltaPredicate> {
        let finite = |v: f64| {
            if v.is_finite() {
                Ok(v)
            } else {
                Err(CfSiftError::config(format!(
                    "delta condition bound must be finite, got {v}"
                )))
            }
        };

        Ok(match *condition {
            DeltaCondition::Gt { value } => DeltaPredicate::greater_than(finite(value)?),
            DeltaCondition::Ge { value } => DeltaPredicate::at_least(finite(value)?),
            DeltaCondition::Lt { value } => DeltaPredicate::less_than(finite(value)?),
            DeltaCondition::Le { value } => DeltaPredicate::at_most(finite(value)?),
            DeltaCondition::Outside { min, max } => {
                let (min, max) = (finite(min)?, finite(max)?);
                if min > max {
                    return Err(CfSiftError::config(format!(
                        "'outside' condition has min {min} greater than max {max}"
                    )));
                }
                DeltaPredicate::outside(min, max)
            }
            DeltaCondition::AnyChange => DeltaPredicate::any_change(),
        })
    }

    /// Maps the truncation setting.
    pub fn truncation(config: TruncationConfig) -> TruncationPolicy {
        match config {
            TruncationConfig::Align => TruncationPolicy::Align,
            TruncationConfig::KeepFeasible => TruncationPolicy::KeepFeasible,
        }
    }

    /// Maps the thread count setting.
    pub fn parallelism(config: &ThreadCount) -> Parallelism {
        match config {
            ThreadCount::None => Parallelism::Sequential,
            ThreadCount::Auto => Parallelism::Auto,
            ThreadCount::Count(1) => Parallelism::Sequential,
            ThreadCount::Count(n) => Parallelism::Threads(*n),
        }
    }

    fn categorical(forbidden: &[(Value, Value)], both_ways: bool) -> FeasibilityRule {
        let mut pairs = ForbiddenPairs::new();
        for (old, new) in forbidden {
            pairs.insert(old.clone(), new.clone());
            if both_ways {
                pairs.insert(new.clone(), old.clone());
            }
        }
        FeasibilityRule::Categorical(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfsift_config::{CategoricalBody, ContinuousBody};
    use cfsift_core::{Change, DiffMap};
    use cfsift_test::toy::toy_schema;

    #[test]
    fn test_predicate_from_condition() {
        let p = FilterBuilder::predicate(&DeltaCondition::Gt { value: 5.0 }).unwrap();
        assert!(p.matches(6.0));
        assert!(!p.matches(5.0));

        let p = FilterBuilder::predicate(&DeltaCondition::Outside { min: -1.0, max: 1.0 }).unwrap();
        assert!(p.matches(2.0));
        assert!(!p.matches(0.0));
    }

    #[test]
    fn test_invalid_conditions_rejected() {
        assert!(FilterBuilder::predicate(&DeltaCondition::Outside { min: 2.0, max: 1.0 }).is_err());
        assert!(FilterBuilder::predicate(&DeltaCondition::Lt { value: f64::NAN }).is_err());
    }

    #[test]
    fn test_both_ways_categorical() {
        let rule = FilterBuilder::rule(&RuleConfig::Categorical(cfsift_config::CategoricalRuleConfig {
            feature: "color".to_string(),
            forbidden: vec![(Value::from("A"), Value::from("B"))],
            both_ways: true,
        }))
        .unwrap();

        let (key, RulePayload::Single(rule)) = rule else {
            panic!("expected a single payload");
        };
        assert_eq!(key, RuleKey::single("color"));
        assert!(rule.violated_by(&Change::categorical("color", "B", "A")));
    }

    #[test]
    fn test_coupled_rule_compiles() {
        let config = RuleConfig::coupled(
            "age",
            "color",
            RuleBodyConfig::Continuous(ContinuousBody {
                condition: DeltaCondition::Gt { value: 5.0 },
            }),
            RuleBodyConfig::Categorical(CategoricalBody {
                forbidden: vec![(Value::from("A"), Value::from("B"))],
                both_ways: false,
            }),
        );

        let schema = toy_schema();
        let rules = FilterBuilder::constraint_set(&schema, &[config]).unwrap();
        assert_eq!(rules.coupled_features().collect::<Vec<_>>(), vec![("age", "color")]);

        let diff = DiffMap::from_changes([
            Change::continuous("age", 30.0, 31.0),
            Change::categorical("color", "A", "B"),
        ]);
        assert!(!rules.is_feasible(&diff));
    }

    #[test]
    fn test_rule_against_unknown_feature_fails_build() {
        let config = SiftConfig::from_toml_str(
            r#"
            [schema]
            continuous = ["age"]

            [[rules]]
            type = "continuous"
            feature = "height"
            condition = { op = "gt", value = 1 }
            "#,
        )
        .unwrap();

        let err = FilterBuilder::build(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Rules(CfSiftError::Configuration(_))));
    }

    #[test]
    fn test_negative_tolerance_fails_build() {
        let config = SiftConfig::new().with_tolerance(-1.0);
        assert!(FilterBuilder::build(&config).is_err());
    }

    #[test]
    fn test_settings_mapping() {
        assert_eq!(FilterBuilder::truncation(TruncationConfig::KeepFeasible), TruncationPolicy::KeepFeasible);
        assert_eq!(FilterBuilder::parallelism(&ThreadCount::None), Parallelism::Sequential);
        assert_eq!(FilterBuilder::parallelism(&ThreadCount::Count(1)), Parallelism::Sequential);
        assert_eq!(FilterBuilder::parallelism(&ThreadCount::Count(4)), Parallelism::Threads(4));
        assert_eq!(FilterBuilder::parallelism(&ThreadCount::Auto), Parallelism::Auto);
    }
}
