//! Query batches before and after filtering.

use cfsift_core::{DiffMap, Instance};

use crate::report::FilterReport;

/// One original instance and the candidates generated for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// The row whose prediction is being explained.
    pub original: Instance,
    /// Candidate counterfactuals, in generation order.
    pub candidates: Vec<Instance>,
}

impl Query {
    /// Creates a new query.
    pub fn new(original: Instance, candidates: Vec<Instance>) -> Self {
        Self {
            original,
            candidates,
        }
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns true if the query has no candidates.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl From<(Instance, Vec<Instance>)> for Query {
    fn from((original, candidates): (Instance, Vec<Instance>)) -> Self {
        Self::new(original, candidates)
    }
}

/// Ordered queries filtered together.
///
/// The batch is owned by the filter for the duration of a call; the result is
/// a new [`FilteredBatch`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBatch {
    queries: Vec<Query>,
}

impl QueryBatch {
    /// Creates a batch from queries.
    pub fn new(queries: Vec<Query>) -> Self {
        Self { queries }
    }

    /// Appends a query.
    pub fn push(&mut self, query: impl Into<Query>) {
        self.queries.push(query.into());
    }

    /// Returns the queries.
    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    /// Consumes the batch, returning its queries.
    pub fn into_queries(self) -> Vec<Query> {
        self.queries
    }

    /// Number of queries.
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Returns true if the batch has no queries.
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

impl From<Vec<Query>> for QueryBatch {
    fn from(queries: Vec<Query>) -> Self {
        Self::new(queries)
    }
}

impl From<Vec<(Instance, Vec<Instance>)>> for QueryBatch {
    fn from(raw: Vec<(Instance, Vec<Instance>)>) -> Self {
        raw.into_iter().map(Query::from).collect()
    }
}

impl FromIterator<Query> for QueryBatch {
    fn from_iter<I: IntoIterator<Item = Query>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A surviving candidate and its changes against the original.
#[derive(Debug, Clone, PartialEq)]
pub struct Counterfactual {
    /// The candidate row.
    pub instance: Instance,
    /// Changed features, with the outcome in its reserved slot.
    pub diff: DiffMap,
}

/// A query after filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredQuery {
    /// The row whose prediction is being explained.
    pub original: Instance,
    /// Surviving candidates, in their original relative order.
    pub counterfactuals: Vec<Counterfactual>,
}

impl FilteredQuery {
    /// Iterates over surviving candidate rows.
    pub fn candidates(&self) -> impl Iterator<Item = &Instance> {
        self.counterfactuals.iter().map(|cf| &cf.instance)
    }

    /// Number of survivors.
    pub fn len(&self) -> usize {
        self.counterfactuals.len()
    }

    /// Returns true if nothing survived.
    pub fn is_empty(&self) -> bool {
        self.counterfactuals.is_empty()
    }

    /// Drops the diffs, returning a plain query.
    pub fn into_query(self) -> Query {
        Query::new(
            self.original,
            self.counterfactuals
                .into_iter()
                .map(|cf| cf.instance)
                .collect(),
        )
    }
}

/// Result of filtering a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredBatch {
    /// Filtered queries, in batch order.
    pub queries: Vec<FilteredQuery>,
    /// Counts gathered while filtering.
    pub report: FilterReport,
}

impl FilteredBatch {
    /// Number of queries.
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Returns true if the batch has no queries.
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Returns true if every query kept the same number of candidates.
    pub fn is_rectangular(&self) -> bool {
        self.queries
            .windows(2)
            .all(|pair| pair[0].len() == pair[1].len())
    }

    /// Drops diffs and the report, returning a batch that can be filtered again.
    pub fn into_batch(self) -> QueryBatch {
        self.queries
            .into_iter()
            .map(FilteredQuery::into_query)
            .collect()
    }
}
