//! Shared test fixtures for cfsift crates.
//!
//! This crate provides schemas, instances and raw query batches for testing.
//! It only depends on `cfsift-core` so that every other crate can use it as a
//! dev-dependency without cycles.
//!
//! - [`toy`] - four-column schema (`age`, `income`, `color`, `label`) used by
//!   the rule and filter tests
//! - [`census`] - adult-census style schema with realistic rows
//! - [`batch`] - raw `(original, candidates)` query builders
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! cfsift-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use cfsift_test::toy::{toy_schema, toy_row};
//! use cfsift_test::batch::RawQuery;
//! ```

pub mod batch;
pub mod census;
pub mod toy;

// Re-export commonly used fixtures at crate root for convenience
pub use batch::{raw_query, RawQuery};
pub use toy::{toy_row, toy_schema};
