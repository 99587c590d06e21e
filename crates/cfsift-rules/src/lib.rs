//! Tabu feasibility rules for cfsift.
//!
//! This crate decides whether the changes proposed by a counterfactual are
//! acceptable:
//! - [`FeasibilityRule`] - one forbidden change (categorical transitions or a
//!   predicate over a continuous delta)
//! - [`TabuConstraintSet`] - all single-feature and coupled-feature rules of a
//!   session, evaluated against a [`DiffMap`](cfsift_core::DiffMap)
//!
//! # Architecture
//!
//! Rules are resolved to a tagged variant once, when the constraint set is
//! built. Evaluation never re-inspects feature kinds and never fails: a
//! well-formed diff map always yields a definite verdict.

pub mod constraint_set;
pub mod predicate;
pub mod rule;

pub use constraint_set::{CoupledRule, TabuConstraintSet, TabuConstraintSetBuilder, Verdict};
pub use predicate::{DeltaFn, DeltaPredicate};
pub use rule::{FeasibilityRule, ForbiddenPairs, RuleKey, RulePayload};
