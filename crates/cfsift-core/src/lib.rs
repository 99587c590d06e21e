//! cfsift Core - Core types for counterfactual feasibility filtering
//!
//! This crate provides the fundamental abstractions shared by every cfsift crate:
//! - Feature values and instances (rows of feature name to value)
//! - Feature schemas describing categorical / continuous features and the outcome
//! - Change diffs between an original instance and a counterfactual
//! - The error taxonomy used across the workspace

pub mod diff;
pub mod error;
pub mod instance;
pub mod schema;
pub mod value;

pub use diff::{Change, ChangeComparator, DiffMap, OutcomeChange};
pub use error::{CfSiftError, Result};
pub use instance::Instance;
pub use schema::{FeatureDescriptor, FeatureKind, FeatureSchema, ModelType, OutcomeDescriptor};
pub use value::Value;
