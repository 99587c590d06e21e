//! cfsift - Feasibility filtering for counterfactual explanations
//!
//! Declare which changes are impossible (tabu), feed in the candidate
//! counterfactuals produced for a batch of queries, and get back only the
//! feasible ones, aligned to the same count per query, with readable reasons.
//!
//! # Example
//!
//! ```rust
//! use cfsift::prelude::*;
//!
//! let config = SiftConfig::from_toml_str(r#"
//!     [schema]
//!     continuous = ["age"]
//!     categorical = ["color"]
//!     outcome = "label"
//!
//!     [[rules]]
//!     type = "continuous"
//!     feature = "age"
//!     condition = { op = "lt", value = 0 }
//! "#).unwrap();
//!
//! let sifter = Sifter::from_config(&config).unwrap();
//!
//! let original = Instance::new().with("age", 30.0).with("color", "A").with("label", 0);
//! let older = Instance::new().with("age", 35.0).with("color", "A").with("label", 1);
//! let younger = Instance::new().with("age", 25.0).with("color", "A").with("label", 1);
//!
//! let batch = QueryBatch::from(vec![(original, vec![older, younger])]);
//! let (filtered, reasons) = sifter.explain(batch, "label").unwrap();
//!
//! assert_eq!(filtered.queries[0].len(), 1);
//! assert_eq!(
//!     reasons[0].sentence,
//!     "when age increases from 30.000 to 35.000, the output of the model [label] changes from 0 to 1."
//! );
//! ```

// Core types
pub use cfsift_core::{
    CfSiftError, Change, ChangeComparator, DiffMap, FeatureDescriptor, FeatureKind,
    FeatureSchema, Instance, ModelType, OutcomeChange, OutcomeDescriptor, Result, Value,
};

// Rules
pub use cfsift_rules::{
    CoupledRule, DeltaPredicate, FeasibilityRule, ForbiddenPairs, RuleKey, RulePayload,
    TabuConstraintSet, TabuConstraintSetBuilder, Verdict,
};

// Batch filtering
pub use cfsift_filter::{
    Counterfactual, FeasibilityFilter, FilterBuilder, FilterReport, FilteredBatch, FilteredQuery,
    Parallelism, Query, QueryBatch, QueryReport, TruncationPolicy,
};

// Configuration
pub use cfsift_config::{ConfigError, RuleConfig, SiftConfig};

// Reasons
pub use cfsift_reason::{top_features, Explanation, ReasonRenderer};

/// Console output, enabled with the `console` feature.
#[cfg(feature = "console")]
pub use cfsift_console::init as init_console;

mod sifter;
pub use sifter::Sifter;

pub mod prelude {
    pub use super::{
        ChangeComparator, DeltaPredicate, DiffMap, Explanation, FeasibilityFilter, FeatureSchema,
        FilteredBatch, Instance, ModelType, QueryBatch, ReasonRenderer, SiftConfig, Sifter,
        TabuConstraintSet, Value,
    };
}
