//! Declarative tabu rule configuration.

use cfsift_core::Value;
use serde::{Deserialize, Serialize};

/// A tabu rule.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleConfig {
    /// Forbidden transitions of one categorical feature.
    Categorical(CategoricalRuleConfig),

    /// Forbidden deltas of one continuous feature.
    Continuous(ContinuousRuleConfig),

    /// Two features judged together.
    Coupled(CoupledRuleConfig),
}

impl RuleConfig {
    /// Creates a categorical rule.
    pub fn categorical(feature: impl Into<String>, forbidden: Vec<(Value, Value)>) -> Self {
        RuleConfig::Categorical(CategoricalRuleConfig {
            feature: feature.into(),
            forbidden,
            both_ways: false,
        })
    }

    /// Creates a continuous rule.
    pub fn continuous(feature: impl Into<String>, condition: DeltaCondition) -> Self {
        RuleConfig::Continuous(ContinuousRuleConfig {
            feature: feature.into(),
            condition,
        })
    }

    /// Creates a coupled rule.
    pub fn coupled(
        first_feature: impl Into<String>,
        second_feature: impl Into<String>,
        first: RuleBodyConfig,
        second: RuleBodyConfig,
    ) -> Self {
        RuleConfig::Coupled(CoupledRuleConfig {
            features: (first_feature.into(), second_feature.into()),
            first,
            second,
        })
    }
}

/// Categorical rule configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CategoricalRuleConfig {
    /// Feature name.
    pub feature: String,

    /// Forbidden `[old, new]` transitions.
    #[serde(default)]
    pub forbidden: Vec<(Value, Value)>,

    /// Also forbid every transition in the reverse direction.
    #[serde(default)]
    pub both_ways: bool,
}

/// Continuous rule configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ContinuousRuleConfig {
    /// Feature name.
    pub feature: String,

    /// Condition on `new - old` that makes the change tabu.
    pub condition: DeltaCondition,
}

/// Coupled rule configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CoupledRuleConfig {
    /// The two coupled features.
    pub features: (String, String),

    /// Rule judging the first feature.
    pub first: RuleBodyConfig,

    /// Rule judging the second feature.
    pub second: RuleBodyConfig,
}

/// One half of a coupled rule.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleBodyConfig {
    /// Forbidden transitions.
    Categorical(CategoricalBody),

    /// Forbidden deltas.
    Continuous(ContinuousBody),
}

/// Forbidden transitions of a coupled half.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CategoricalBody {
    /// Forbidden `[old, new]` transitions.
    #[serde(default)]
    pub forbidden: Vec<(Value, Value)>,

    /// Also forbid every transition in the reverse direction.
    #[serde(default)]
    pub both_ways: bool,
}

/// Forbidden deltas of a coupled half.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ContinuousBody {
    /// Condition on `new - old` that makes the change tabu.
    pub condition: DeltaCondition,
}

/// Condition on a continuous delta.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DeltaCondition {
    /// `delta > value`
    Gt { value: f64 },

    /// `delta >= value`
    Ge { value: f64 },

    /// `delta < value`
    Lt { value: f64 },

    /// `delta <= value`
    Le { value: f64 },

    /// `delta < min || delta > max`
    Outside { min: f64, max: f64 },

    /// `delta != 0`
    AnyChange,
}
