//! Tabu constraint set.
//!
//! Owns every single-feature and coupled-feature rule of a filtering session
//! and judges diff maps against them.

mod builder;

#[cfg(test)]
mod tests;

pub use builder::TabuConstraintSetBuilder;

use std::collections::{HashMap, HashSet};

use cfsift_core::{CfSiftError, DiffMap, FeatureSchema, Result};

use crate::rule::{FeasibilityRule, RuleKey, RulePayload};

/// A rule on two features that are judged together.
#[derive(Debug, Clone)]
pub struct CoupledRule {
    features: (String, String),
    rules: (FeasibilityRule, FeasibilityRule),
}

impl CoupledRule {
    /// Returns the two coupled feature names, in key order.
    pub fn features(&self) -> (&str, &str) {
        (&self.features.0, &self.features.1)
    }

    /// Returns the sub-rules, one per feature, in key order.
    pub fn rules(&self) -> (&FeasibilityRule, &FeasibilityRule) {
        (&self.rules.0, &self.rules.1)
    }

    /// Returns the key this rule was declared under.
    pub fn key(&self) -> RuleKey {
        RuleKey::coupled(self.features.0.clone(), self.features.1.clone())
    }

    // None when either feature did not change.
    fn violated_by(&self, diff: &DiffMap) -> Option<bool> {
        let first = diff.get(&self.features.0)?;
        let second = diff.get(&self.features.1)?;
        Some(self.rules.0.violated_by(first) || self.rules.1.violated_by(second))
    }
}

/// Outcome of judging one diff map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// No rule matched.
    Feasible,
    /// The first rule that matched.
    Violated(RuleKey),
}

impl Verdict {
    /// Returns true if no rule matched.
    pub fn is_feasible(&self) -> bool {
        matches!(self, Verdict::Feasible)
    }

    /// Returns the violated rule, if any.
    pub fn violated_rule(&self) -> Option<&RuleKey> {
        match self {
            Verdict::Feasible => None,
            Verdict::Violated(key) => Some(key),
        }
    }
}

/// All tabu rules of a session.
///
/// Built once, read-only afterwards, and safe to share across threads.
///
/// # Example
///
/// ```
/// use cfsift_core::{Change, DiffMap, FeatureSchema};
/// use cfsift_rules::{DeltaPredicate, TabuConstraintSet};
///
/// let schema = FeatureSchema::new()
///     .with_continuous("age")
///     .with_categorical("color");
/// let rules = TabuConstraintSet::builder(&schema)
///     .forbid_delta("age", DeltaPredicate::less_than(0.0))
///     .forbid_transition("color", "A", "B")
///     .build()
///     .unwrap();
///
/// let younger = DiffMap::from_changes([Change::continuous("age", 30.0, 25.0)]);
/// assert!(!rules.is_feasible(&younger));
///
/// let recolored = DiffMap::from_changes([Change::categorical("color", "A", "C")]);
/// assert!(rules.is_feasible(&recolored));
/// ```
#[derive(Debug, Clone)]
pub struct TabuConstraintSet {
    schema: FeatureSchema,
    single: HashMap<String, FeasibilityRule>,
    coupled: Vec<CoupledRule>,
}

impl TabuConstraintSet {
    /// Creates a set without rules over `schema`; every diff map is feasible.
    pub fn empty(schema: &FeatureSchema) -> Self {
        Self {
            schema: schema.clone(),
            single: HashMap::new(),
            coupled: Vec::new(),
        }
    }

    /// Starts a builder validating against `schema`.
    pub fn builder(schema: &FeatureSchema) -> TabuConstraintSetBuilder<'_> {
        TabuConstraintSetBuilder::new(schema)
    }

    /// Builds the set from a rule-key to payload mapping.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a rule names a feature absent from
    /// the schema (or the outcome), a rule's kind differs from its feature's
    /// kind, a payload's shape does not match its key, a coupled key names
    /// the same feature twice, or a key is declared twice.
    pub fn new<I>(schema: &FeatureSchema, rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (RuleKey, RulePayload)>,
    {
        schema.validate()?;

        let mut single = HashMap::new();
        let mut coupled = Vec::new();
        let mut coupled_seen: HashSet<(String, String)> = HashSet::new();

        for (key, payload) in rules {
            match (key, payload) {
                (RuleKey::Single(feature), RulePayload::Single(rule)) => {
                    check_rule(schema, &feature, &rule)?;
                    if single.contains_key(&feature) {
                        return Err(CfSiftError::config(format!(
                            "rule for '{feature}' is declared more than once"
                        )));
                    }
                    single.insert(feature, rule);
                }
                (RuleKey::Coupled(first, second), RulePayload::Coupled(r1, r2)) => {
                    if first == second {
                        return Err(CfSiftError::config(format!(
                            "coupled rule names '{first}' twice"
                        )));
                    }
                    check_rule(schema, &first, &r1)?;
                    check_rule(schema, &second, &r2)?;
                    let unordered = if first <= second {
                        (first.clone(), second.clone())
                    } else {
                        (second.clone(), first.clone())
                    };
                    if !coupled_seen.insert(unordered) {
                        return Err(CfSiftError::config(format!(
                            "coupled rule ({first}, {second}) is declared more than once"
                        )));
                    }
                    coupled.push(CoupledRule {
                        features: (first, second),
                        rules: (r1, r2),
                    });
                }
                (key, payload) => {
                    return Err(CfSiftError::config(format!(
                        "rule '{key}' expects a {} but was given a {}",
                        if key.is_coupled() {
                            "coupled pair of rules"
                        } else {
                            "single rule"
                        },
                        payload.shape()
                    )));
                }
            }
        }

        Ok(Self {
            schema: schema.clone(),
            single,
            coupled,
        })
    }

    /// Returns the schema the rules were validated against.
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Returns true if the diff map violates no rule.
    pub fn is_feasible(&self, diff: &DiffMap) -> bool {
        self.check(diff).is_feasible()
    }

    /// Judges a diff map, reporting the first violated rule.
    ///
    /// Single-feature rules are checked first, in the diff's change order;
    /// coupled rules are only reached when every single check passed, and are
    /// checked in declaration order. A coupled rule is skipped when either of
    /// its features did not change; otherwise it is violated when either half
    /// matches its own sub-rule.
    pub fn check(&self, diff: &DiffMap) -> Verdict {
        let single_violation = diff.iter().find(|change| {
            self.single
                .get(&change.feature)
                .is_some_and(|rule| rule.violated_by(change))
        });
        if let Some(change) = single_violation {
            return Verdict::Violated(RuleKey::single(change.feature.clone()));
        }

        self.coupled
            .iter()
            .find(|rule| rule.violated_by(diff) == Some(true))
            .map_or(Verdict::Feasible, |rule| Verdict::Violated(rule.key()))
    }

    /// Returns the single-feature rule of `feature`.
    pub fn single_rule(&self, feature: &str) -> Option<&FeasibilityRule> {
        self.single.get(feature)
    }

    /// Returns the coupled rules in declaration order.
    pub fn coupled_rules(&self) -> &[CoupledRule] {
        &self.coupled
    }

    /// Iterates over the coupled feature pairs.
    pub fn coupled_features(&self) -> impl Iterator<Item = (&str, &str)> {
        self.coupled.iter().map(CoupledRule::features)
    }

    /// Total number of rules.
    pub fn len(&self) -> usize {
        self.single.len() + self.coupled.len()
    }

    /// Returns true if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn check_rule(schema: &FeatureSchema, feature: &str, rule: &FeasibilityRule) -> Result<()> {
    if schema.is_outcome(feature) {
        return Err(CfSiftError::config(format!(
            "'{feature}' is the outcome column and cannot carry a tabu rule"
        )));
    }
    let Some(kind) = schema.kind_of(feature) else {
        return Err(CfSiftError::config(format!(
            "rule references unknown feature '{feature}'"
        )));
    };
    if kind != rule.kind() {
        return Err(CfSiftError::config(format!(
            "feature '{feature}' is {kind:?} but its rule is {:?}",
            rule.kind()
        )));
    }
    Ok(())
}
