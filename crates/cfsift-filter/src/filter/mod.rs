//! Feasibility filter.
//!
//! Reduces every query of a batch to a common number of feasible
//! candidates, keeping the earliest survivors of each query.


use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::{debug, info, trace};

use cfsift_core::{CfSiftError, ChangeComparator, DiffMap, FeatureSchema, Instance, Result};
use cfsift_rules::{TabuConstraintSet, Verdict};

use crate::batch::{Counterfactual, FilteredBatch, FilteredQuery, Query, QueryBatch};
use crate::policy::{Parallelism, TruncationPolicy};
use crate::report::{FilterReport, QueryReport};

// Per-query result of the parallel phase.
struct JudgedQuery {
    original: Instance,
    kept: Vec<Counterfactual>,
    report: QueryReport,
}

/// Filters batches of counterfactuals against a tabu constraint set.
///
/// # Example
///
/// ```
/// use cfsift_core::{FeatureSchema, Instance};
/// use cfsift_filter::{FeasibilityFilter, Query, QueryBatch};
/// use cfsift_rules::{DeltaPredicate, TabuConstraintSet};
///
/// let schema = FeatureSchema::new().with_continuous("age");
/// let rules = TabuConstraintSet::builder(&schema)
///     .forbid_delta("age", DeltaPredicate::less_than(0.0))
///     .build()
///     .unwrap();
/// let filter = FeasibilityFilter::new(rules);
///
/// let original = Instance::new().with("age", 30);
/// let batch = QueryBatch::new(vec![Query::new(
///     original,
///     vec![
///         Instance::new().with("age", 25),
///         Instance::new().with("age", 35),
///         Instance::new().with("age", 40),
///     ],
/// )]);
///
/// let filtered = filter.filter_batch(batch).unwrap();
/// assert_eq!(filtered.queries[0].len(), 2);
/// assert_eq!(filtered.report.excluded, 1);
/// ```
#[derive(Debug, Clone)]
pub struct FeasibilityFilter {
    constraints: TabuConstraintSet,
    comparator: ChangeComparator,
    policy: TruncationPolicy,
    parallelism: Parallelism,
    pool: Option<Arc<ThreadPool>>,
}

impl FeasibilityFilter {
    /// Creates a filter with exact comparison, aligned truncation and
    /// sequential scheduling.
    ///
    /// Instances are checked against the schema the constraint set was
    /// validated with, so rules and rows always agree on feature kinds.
    pub fn new(constraints: TabuConstraintSet) -> Self {
        Self {
            constraints,
            comparator: ChangeComparator::exact(),
            policy: TruncationPolicy::default(),
            parallelism: Parallelism::default(),
            pool: None,
        }
    }

    /// Sets the change comparator.
    pub fn with_comparator(mut self, comparator: ChangeComparator) -> Self {
        self.comparator = comparator;
        self
    }

    /// Sets the truncation policy.
    pub fn with_policy(mut self, policy: TruncationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets how per-query work is scheduled.
    ///
    /// [`Parallelism::Threads`] builds its dedicated pool here, once; every
    /// later batch reuses it.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the pool cannot be built.
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Result<Self> {
        self.pool = match parallelism {
            Parallelism::Threads(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| CfSiftError::config(format!("cannot build thread pool: {e}")))?;
                Some(Arc::new(pool))
            }
            Parallelism::Sequential | Parallelism::Auto => None,
        };
        self.parallelism = parallelism;
        Ok(self)
    }

    /// Returns the feature schema shared with the constraint set.
    pub fn schema(&self) -> &FeatureSchema {
        self.constraints.schema()
    }

    /// Returns the constraint set.
    pub fn constraints(&self) -> &TabuConstraintSet {
        &self.constraints
    }

    /// Returns the change comparator.
    pub fn comparator(&self) -> &ChangeComparator {
        &self.comparator
    }

    /// Returns the truncation policy.
    pub fn policy(&self) -> TruncationPolicy {
        self.policy
    }

    /// Returns how per-query work is scheduled.
    pub fn parallelism(&self) -> Parallelism {
        self.parallelism
    }

    /// Diffs and judges a single candidate.
    ///
    /// Useful for callers that want to handle schema mismatches per pair
    /// instead of aborting a whole batch.
    pub fn evaluate(&self, original: &Instance, candidate: &Instance) -> Result<(DiffMap, Verdict)> {
        let diff = self.comparator.diff(self.schema(), original, candidate)?;
        let verdict = self.constraints.check(&diff);
        Ok((diff, verdict))
    }

    /// Filters a batch.
    ///
    /// Every query is diffed and judged independently. Once all queries are
    /// done, the smallest feasible count over the batch becomes
    /// `min_retained`, and under [`TruncationPolicy::Align`] every query keeps
    /// exactly its first `min_retained` feasible candidates.
    ///
    /// # Errors
    ///
    /// - [`CfSiftError::EmptyBatch`] if the batch or any query is empty
    /// - [`CfSiftError::Configuration`] if queries start with different
    ///   candidate counts
    /// - [`CfSiftError::SchemaMismatch`] if any pair fails to diff; nothing
    ///   of the batch is returned in that case
    pub fn filter_batch(&self, batch: QueryBatch) -> Result<FilteredBatch> {
        let start = Instant::now();
        let queries = batch.into_queries();
        let candidates_per_query = validate_batch(&queries)?;

        info!(
            event = "filter_start",
            queries = queries.len(),
            candidates_per_query = candidates_per_query,
            rules = self.constraints.len(),
            tolerance = self.comparator.tolerance(),
        );

        let judged = self.judge_all(queries)?;

        // Only reached once every query has been judged.
        let min_retained = judged
            .iter()
            .map(|q| q.kept.len())
            .min()
            .unwrap_or(0);
        let excluded = candidates_per_query - min_retained;

        let mut reports = Vec::with_capacity(judged.len());
        let mut filtered = Vec::with_capacity(judged.len());
        for JudgedQuery {
            original,
            mut kept,
            mut report,
        } in judged
        {
            if self.policy == TruncationPolicy::Align {
                kept.truncate(min_retained);
            }
            report.retained_count = kept.len();
            reports.push(report);
            filtered.push(FilteredQuery {
                original,
                counterfactuals: kept,
            });
        }

        let report = FilterReport {
            candidates_per_query,
            min_retained,
            excluded,
            queries: reports,
        };

        info!(
            event = "filter_end",
            queries = filtered.len(),
            min_retained = min_retained,
            excluded = excluded,
            infeasible = report.total_infeasible(),
            truncated = report.total_truncated(),
            duration_ms = start.elapsed().as_millis() as u64,
        );

        Ok(FilteredBatch {
            queries: filtered,
            report,
        })
    }

    fn judge_all(&self, queries: Vec<Query>) -> Result<Vec<JudgedQuery>> {
        match (self.parallelism, &self.pool) {
            (Parallelism::Sequential, _) => queries
                .into_iter()
                .enumerate()
                .map(|(i, q)| self.judge_query(i, q))
                .collect(),
            (Parallelism::Threads(_), Some(pool)) => {
                pool.install(|| self.judge_parallel(queries))
            }
            _ => self.judge_parallel(queries),
        }
    }

    fn judge_parallel(&self, queries: Vec<Query>) -> Result<Vec<JudgedQuery>> {
        queries
            .into_par_iter()
            .enumerate()
            .map(|(i, q)| self.judge_query(i, q))
            .collect()
    }

    fn judge_query(&self, index: usize, query: Query) -> Result<JudgedQuery> {
        let Query {
            original,
            candidates,
        } = query;

        let mut report = QueryReport {
            index,
            original_count: candidates.len(),
            feasible_count: 0,
            retained_count: 0,
            violations: Vec::new(),
        };
        let mut kept = Vec::with_capacity(candidates.len());

        for (j, candidate) in candidates.into_iter().enumerate() {
            let (diff, verdict) = self.evaluate(&original, &candidate).map_err(|e| match e {
                CfSiftError::SchemaMismatch(msg) => {
                    CfSiftError::SchemaMismatch(format!("query {index}, candidate {j}: {msg}"))
                }
                other => other,
            })?;

            match verdict {
                Verdict::Feasible => kept.push(Counterfactual {
                    instance: candidate,
                    diff,
                }),
                Verdict::Violated(rule) => {
                    trace!(
                        event = "candidate_rejected",
                        query = index,
                        candidate = j,
                        rule = %rule,
                    );
                    report.record_violation(&rule);
                }
            }
        }

        report.feasible_count = kept.len();
        debug!(
            event = "query_judged",
            query = index,
            candidates = report.original_count,
            feasible = report.feasible_count,
        );

        Ok(JudgedQuery {
            original,
            kept,
            report,
        })
    }
}

// Returns the common starting candidate count.
fn validate_batch(queries: &[Query]) -> Result<usize> {
    let first = queries
        .first()
        .ok_or(CfSiftError::EmptyBatch { query: None })?;

    if let Some(index) = queries.iter().position(Query::is_empty) {
        return Err(CfSiftError::EmptyBatch { query: Some(index) });
    }

    let expected = first.len();
    if let Some((index, query)) = queries
        .iter()
        .enumerate()
        .find(|(_, q)| q.len() != expected)
    {
        return Err(CfSiftError::config(format!(
            "query {index} has {} candidates but query 0 has {expected}; \
             every query must start with the same number of candidates",
            query.len()
        )));
    }

    Ok(expected)
}
