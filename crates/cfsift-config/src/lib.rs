//! Configuration system for cfsift.
//!
//! Load a filtering session from TOML or YAML: the feature schema, the
//! equality tolerance, the tabu rules and how the batch is truncated.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use cfsift_config::{RuleConfig, SiftConfig};
//!
//! let config = SiftConfig::from_toml_str(r#"
//!     tolerance = 0.1
//!
//!     [schema]
//!     continuous = ["age", "income"]
//!     categorical = ["color"]
//!     outcome = "label"
//!
//!     [[rules]]
//!     type = "categorical"
//!     feature = "color"
//!     forbidden = [["A", "B"]]
//!
//!     [[rules]]
//!     type = "coupled"
//!     features = ["age", "income"]
//!     first = { type = "continuous", condition = { op = "gt", value = 5 } }
//!     second = { type = "continuous", condition = { op = "lt", value = 0 } }
//! "#).unwrap();
//!
//! assert_eq!(config.tolerance, 0.1);
//! assert_eq!(config.rules.len(), 2);
//! assert!(matches!(config.rules[1], RuleConfig::Coupled(_)));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use cfsift_config::SiftConfig;
//!
//! let config = SiftConfig::load("cfsift.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

mod rules;

#[cfg(test)]
mod tests;

pub use rules::{
    CategoricalBody, CategoricalRuleConfig, ContinuousBody, ContinuousRuleConfig,
    CoupledRuleConfig, DeltaCondition, RuleBodyConfig, RuleConfig,
};

use std::path::Path;

use cfsift_core::{CfSiftError, FeatureSchema, ModelType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Rules(#[from] CfSiftError),
}

/// Main filtering session configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SiftConfig {
    /// Feature schema.
    #[serde(default)]
    pub schema: SchemaConfig,

    /// Absolute tolerance for continuous change detection.
    #[serde(default)]
    pub tolerance: f64,

    /// Truncation policy after feasibility checks.
    #[serde(default)]
    pub truncation: TruncationConfig,

    /// Number of threads for per-query evaluation.
    #[serde(default)]
    pub thread_count: ThreadCount,

    /// Tabu rules.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl SiftConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the schema.
    pub fn with_schema(mut self, schema: SchemaConfig) -> Self {
        self.schema = schema;
        self
    }

    /// Sets the equality tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the truncation policy.
    pub fn with_truncation(mut self, truncation: TruncationConfig) -> Self {
        self.truncation = truncation;
        self
    }

    /// Sets the thread count.
    pub fn with_thread_count(mut self, thread_count: ThreadCount) -> Self {
        self.thread_count = thread_count;
        self
    }

    /// Adds a rule.
    pub fn with_rule(mut self, rule: RuleConfig) -> Self {
        self.rules.push(rule);
        self
    }

    /// Builds and validates the feature schema.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfsift_config::SiftConfig;
    /// use cfsift_core::FeatureKind;
    ///
    /// let config = SiftConfig::from_yaml_str(r#"
    ///     schema:
    ///       continuous: [price]
    ///       categorical: [district]
    ///       outcome: value
    ///       model_type: regressor
    /// "#).unwrap();
    ///
    /// let schema = config.feature_schema().unwrap();
    /// assert_eq!(schema.column_kind("value"), Some(FeatureKind::Continuous));
    /// ```
    pub fn feature_schema(&self) -> Result<FeatureSchema, ConfigError> {
        let schema = self.schema.to_schema();
        schema.validate()?;
        Ok(schema)
    }
}

/// Feature schema configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SchemaConfig {
    /// Continuous feature names.
    #[serde(default)]
    pub continuous: Vec<String>,

    /// Categorical feature names.
    #[serde(default)]
    pub categorical: Vec<String>,

    /// Outcome column name.
    pub outcome: Option<String>,

    /// Model producing the outcome.
    #[serde(default)]
    pub model_type: ModelType,
}

impl SchemaConfig {
    /// Converts to a feature schema: continuous features first, then categorical.
    pub fn to_schema(&self) -> FeatureSchema {
        let schema = self
            .continuous
            .iter()
            .fold(FeatureSchema::new(), |s, name| s.with_continuous(name.clone()));
        let schema = self
            .categorical
            .iter()
            .fold(schema, |s, name| s.with_categorical(name.clone()));
        match &self.outcome {
            Some(outcome) => schema.with_outcome(outcome.clone(), self.model_type),
            None => schema,
        }
    }
}

/// Truncation policy configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncationConfig {
    /// Every query keeps the batch-wide minimum of feasible candidates.
    #[default]
    Align,

    /// Every query keeps all its feasible candidates.
    KeepFeasible,
}

/// Thread count configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// Automatically determine thread count.
    Auto,

    /// No parallel evaluation.
    #[default]
    None,

    /// Specific number of threads.
    Count(usize),
}
