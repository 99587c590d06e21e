//! Fluent builder for [`TabuConstraintSet`].

use cfsift_core::{FeatureSchema, Result, Value};

use crate::constraint_set::TabuConstraintSet;
use crate::predicate::DeltaPredicate;
use crate::rule::{FeasibilityRule, ForbiddenPairs, RuleKey, RulePayload};

/// Collects rules and validates them against a schema on [`build`](Self::build).
pub struct TabuConstraintSetBuilder<'s> {
    schema: &'s FeatureSchema,
    rules: Vec<(RuleKey, RulePayload)>,
}

impl<'s> TabuConstraintSetBuilder<'s> {
    /// Creates an empty builder.
    pub fn new(schema: &'s FeatureSchema) -> Self {
        Self {
            schema,
            rules: Vec::new(),
        }
    }

    /// Forbids the categorical transition `old -> new` on `feature`.
    ///
    /// Repeated calls for the same feature accumulate into one rule.
    pub fn forbid_transition(
        mut self,
        feature: impl Into<String>,
        old: impl Into<Value>,
        new: impl Into<Value>,
    ) -> Self {
        let key = RuleKey::Single(feature.into());
        let existing = self.rules.iter_mut().find(|(k, payload)| {
            *k == key && matches!(payload, RulePayload::Single(FeasibilityRule::Categorical(_)))
        });
        if let Some((_, RulePayload::Single(FeasibilityRule::Categorical(pairs)))) = existing {
            pairs.insert(old, new);
            return self;
        }
        let pairs = ForbiddenPairs::new().forbid(old, new);
        self.rules
            .push((key, RulePayload::Single(FeasibilityRule::Categorical(pairs))));
        self
    }

    /// Forbids continuous deltas of `feature` matching `predicate`.
    pub fn forbid_delta(self, feature: impl Into<String>, predicate: DeltaPredicate) -> Self {
        self.rule(
            RuleKey::Single(feature.into()),
            FeasibilityRule::Continuous(predicate),
        )
    }

    /// Adds a rule under an explicit key.
    pub fn rule(mut self, key: RuleKey, payload: impl Into<RulePayload>) -> Self {
        self.rules.push((key, payload.into()));
        self
    }

    /// Adds a coupled rule: `first_rule` judges `first`, `second_rule` judges `second`.
    pub fn coupled(
        self,
        first: impl Into<String>,
        second: impl Into<String>,
        first_rule: impl Into<FeasibilityRule>,
        second_rule: impl Into<FeasibilityRule>,
    ) -> Self {
        self.rule(
            RuleKey::coupled(first, second),
            RulePayload::Coupled(first_rule.into(), second_rule.into()),
        )
    }

    /// Validates every collected rule and builds the set.
    pub fn build(self) -> Result<TabuConstraintSet> {
        TabuConstraintSet::new(self.schema, self.rules)
    }
}
