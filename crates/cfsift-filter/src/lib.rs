//! Batch feasibility filtering for cfsift.
//!
//! Takes a batch of queries, each an original instance plus the ordered
//! counterfactual candidates an explanation generator produced for it, and:
//! - diffs every candidate against its original
//! - drops candidates whose changes are tabu
//! - truncates every query to the same number of survivors
//!
//! [`FilterBuilder`] builds a filter from a `cfsift_config::SiftConfig`.
//!
//! # Log levels
//!
//! - **INFO**: batch start / end with counts
//! - **DEBUG**: per-query survivor counts
//! - **TRACE**: every rejected candidate and the rule it violated

pub mod batch;
pub mod builder;
pub mod filter;
pub mod policy;
pub mod report;

pub use batch::{Counterfactual, FilteredBatch, FilteredQuery, Query, QueryBatch};
pub use builder::FilterBuilder;
pub use filter::FeasibilityFilter;
pub use policy::{Parallelism, TruncationPolicy};
pub use report::{FilterReport, QueryReport};
