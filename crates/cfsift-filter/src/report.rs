//! Filtering statistics.

use cfsift_rules::RuleKey;

/// Counts for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryReport {
    /// Position of the query in the batch.
    pub index: usize,
    /// Candidates before filtering.
    pub original_count: usize,
    /// Candidates that violated no rule.
    pub feasible_count: usize,
    /// Candidates kept after truncation.
    pub retained_count: usize,
    /// Rejections per violated rule, in first-seen order.
    pub violations: Vec<(RuleKey, usize)>,
}

impl QueryReport {
    /// Candidates rejected by a rule.
    pub fn infeasible_count(&self) -> usize {
        self.original_count - self.feasible_count
    }

    /// Feasible candidates discarded to keep the batch aligned.
    pub fn truncated_count(&self) -> usize {
        self.feasible_count - self.retained_count
    }

    pub(crate) fn record_violation(&mut self, key: &RuleKey) {
        match self.violations.iter_mut().find(|(k, _)| k == key) {
            Some((_, count)) => *count += 1,
            None => self.violations.push((key.clone(), 1)),
        }
    }
}

/// Counts for a whole batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterReport {
    /// Candidates per query before filtering (equal across queries).
    pub candidates_per_query: usize,
    /// Smallest feasible count over all queries.
    pub min_retained: usize,
    /// `candidates_per_query - min_retained`.
    pub excluded: usize,
    /// Per-query detail, in batch order.
    pub queries: Vec<QueryReport>,
}

impl FilterReport {
    /// Total candidates before filtering.
    pub fn total_candidates(&self) -> usize {
        self.queries.iter().map(|q| q.original_count).sum()
    }

    /// Total candidates kept.
    pub fn total_retained(&self) -> usize {
        self.queries.iter().map(|q| q.retained_count).sum()
    }

    /// Total candidates rejected by a rule.
    pub fn total_infeasible(&self) -> usize {
        self.queries.iter().map(QueryReport::infeasible_count).sum()
    }

    /// Total feasible candidates discarded to keep the batch aligned.
    pub fn total_truncated(&self) -> usize {
        self.queries.iter().map(QueryReport::truncated_count).sum()
    }

    /// Rejections per rule summed over every query, in first-seen order.
    pub fn violations(&self) -> Vec<(RuleKey, usize)> {
        let mut totals: Vec<(RuleKey, usize)> = Vec::new();
        for (key, count) in self.queries.iter().flat_map(|q| q.violations.iter()) {
            match totals.iter_mut().find(|(k, _)| k == key) {
                Some((_, total)) => *total += count,
                None => totals.push((key.clone(), *count)),
            }
        }
        totals
    }
}
