//! Filter policies.

/// What to do with feasible candidates beyond the batch minimum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TruncationPolicy {
    /// Keep exactly the first `min_retained` feasible candidates of every
    /// query so the batch stays rectangular.
    #[default]
    Align,
    /// Keep every feasible candidate; queries may end up with different counts.
    KeepFeasible,
}

/// How per-query work is scheduled.
///
/// Queries are independent, so diffing and judging can run on a rayon pool.
/// The batch minimum is only computed once every query is done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Parallelism {
    /// Run on the calling thread.
    #[default]
    Sequential,
    /// Use rayon's global pool.
    Auto,
    /// Use a dedicated pool with this many threads.
    Threads(usize),
}
