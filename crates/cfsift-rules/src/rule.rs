//! Single tabu rules and their keys.

use std::collections::{HashMap, HashSet};
use std::fmt;

use cfsift_core::{Change, FeatureKind, Value};

use crate::predicate::DeltaPredicate;

/// Forbidden `(old -> new)` transitions of one categorical feature.
///
/// Transitions are directed, not unordered pairs: forbidding `A -> B` leaves
/// `B -> A` allowed unless it is added too. Use
/// [`ForbiddenPairs::forbid_both_ways`] (or `both_ways = true` in a config
/// file) to treat `{A, B}` as an unordered pair.
///
/// # Example
///
/// ```
/// use cfsift_core::Value;
/// use cfsift_rules::ForbiddenPairs;
///
/// let pairs = ForbiddenPairs::new().forbid("single", "married");
/// assert!(pairs.contains(&Value::from("single"), &Value::from("married")));
/// assert!(!pairs.contains(&Value::from("married"), &Value::from("single")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForbiddenPairs {
    by_old: HashMap<Value, HashSet<Value>>,
}

impl ForbiddenPairs {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a forbidden transition.
    pub fn forbid(mut self, old: impl Into<Value>, new: impl Into<Value>) -> Self {
        self.insert(old, new);
        self
    }

    /// Forbids the transition in both directions.
    pub fn forbid_both_ways(self, a: impl Into<Value>, b: impl Into<Value>) -> Self {
        let a = a.into();
        let b = b.into();
        self.forbid(a.clone(), b.clone()).forbid(b, a)
    }

    /// Adds a forbidden transition in place.
    pub fn insert(&mut self, old: impl Into<Value>, new: impl Into<Value>) {
        self.by_old.entry(old.into()).or_default().insert(new.into());
    }

    /// Returns true if `old -> new` is forbidden.
    pub fn contains(&self, old: &Value, new: &Value) -> bool {
        self.by_old.get(old).is_some_and(|targets| targets.contains(new))
    }

    /// Number of forbidden transitions.
    pub fn len(&self) -> usize {
        self.by_old.values().map(HashSet::len).sum()
    }

    /// Returns true if nothing is forbidden.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<O, N> FromIterator<(O, N)> for ForbiddenPairs
where
    O: Into<Value>,
    N: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (O, N)>>(iter: I) -> Self {
        let mut pairs = Self::new();
        for (old, new) in iter {
            pairs.insert(old, new);
        }
        pairs
    }
}

/// One tabu constraint on a single feature.
#[derive(Debug, Clone)]
pub enum FeasibilityRule {
    /// Forbidden `(old, new)` transitions.
    Categorical(ForbiddenPairs),
    /// Forbidden numeric deltas.
    Continuous(DeltaPredicate),
}

impl FeasibilityRule {
    /// Returns the feature kind this rule applies to.
    pub fn kind(&self) -> FeatureKind {
        match self {
            FeasibilityRule::Categorical(_) => FeatureKind::Categorical,
            FeasibilityRule::Continuous(_) => FeatureKind::Continuous,
        }
    }

    /// Returns true if `change` is forbidden by this rule.
    ///
    /// A change whose kind differs from the rule's never matches.
    pub fn violated_by(&self, change: &Change) -> bool {
        match (self, change.kind) {
            (FeasibilityRule::Categorical(pairs), FeatureKind::Categorical) => {
                pairs.contains(&change.old, &change.new)
            }
            (FeasibilityRule::Continuous(predicate), FeatureKind::Continuous) => {
                change.delta().is_some_and(|d| predicate.matches(d))
            }
            _ => false,
        }
    }
}

impl From<ForbiddenPairs> for FeasibilityRule {
    fn from(pairs: ForbiddenPairs) -> Self {
        FeasibilityRule::Categorical(pairs)
    }
}

impl From<DeltaPredicate> for FeasibilityRule {
    fn from(predicate: DeltaPredicate) -> Self {
        FeasibilityRule::Continuous(predicate)
    }
}

/// Identifies a rule: one feature, or a coupled pair of features.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleKey {
    /// Rule on a single feature.
    Single(String),
    /// Rule on two features changing together.
    Coupled(String, String),
}

impl RuleKey {
    /// Creates a single-feature key.
    pub fn single(feature: impl Into<String>) -> Self {
        RuleKey::Single(feature.into())
    }

    /// Creates a coupled key.
    pub fn coupled(first: impl Into<String>, second: impl Into<String>) -> Self {
        RuleKey::Coupled(first.into(), second.into())
    }

    /// Returns true for coupled keys.
    pub fn is_coupled(&self) -> bool {
        matches!(self, RuleKey::Coupled(..))
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKey::Single(name) => write!(f, "{name}"),
            RuleKey::Coupled(a, b) => write!(f, "({a}, {b})"),
        }
    }
}

/// Rule body attached to a [`RuleKey`].
///
/// A single key takes a single rule; a coupled key takes one sub-rule per
/// feature, in key order.
#[derive(Debug, Clone)]
pub enum RulePayload {
    /// Body of a single-feature rule.
    Single(FeasibilityRule),
    /// Bodies of the two halves of a coupled rule.
    Coupled(FeasibilityRule, FeasibilityRule),
}

impl RulePayload {
    /// Returns a short description of the payload's shape.
    pub fn shape(&self) -> &'static str {
        match self {
            RulePayload::Single(_) => "single rule",
            RulePayload::Coupled(..) => "coupled pair of rules",
        }
    }
}

impl From<FeasibilityRule> for RulePayload {
    fn from(rule: FeasibilityRule) -> Self {
        RulePayload::Single(rule)
    }
}
