//! Raw query fixtures.
//!
//! Queries are returned as plain `(original, candidates)` tuples so this crate
//! does not depend on the filter crate's batch types.

use cfsift_core::Instance;

/// An original instance and its ordered candidates.
pub type RawQuery = (Instance, Vec<Instance>);

/// Builds a raw query.
pub fn raw_query(original: Instance, candidates: Vec<Instance>) -> RawQuery {
    (original, candidates)
}

/// Builds a query of `flags.len()` toy candidates where `true` marks a
/// candidate whose `age` grows by 10 and `false` one whose `age` grows by 1.
///
/// Paired with a rule forbidding `age` deltas above 5, the flags become
/// "infeasible" / "feasible" markers. Candidate `i` also carries
/// `income = 1000 + i` so tests can tell survivors apart.
pub fn flagged_query(flags: &[bool]) -> RawQuery {
    let original = crate::toy::toy_original();
    let candidates = flags
        .iter()
        .enumerate()
        .map(|(i, &infeasible)| {
            let age_delta = if infeasible { 10.0 } else { 1.0 };
            crate::toy::toy_candidate(age_delta, i as f64, "A")
        })
        .collect();
    (original, candidates)
}

/// Builds a query with `total` candidates of which the first `feasible` are
/// feasible under an "age delta > 5" rule and the rest are not.
pub fn query_with_feasible(total: usize, feasible: usize) -> RawQuery {
    let flags: Vec<bool> = (0..total).map(|i| i >= feasible).collect();
    flagged_query(&flags)
}

/// Returns the `income` value of each candidate, identifying survivors.
pub fn candidate_ids(candidates: &[Instance]) -> Vec<f64> {
    candidates
        .iter()
        .filter_map(|c| c.get("income").and_then(|v| v.as_f64()))
        .map(|income| income - 1000.0)
        .collect()
}
