//! Ordered, user-controlled collection of rules.

use std::collections::HashSet;

use super::types::{Rule, RuleId, RulePatch, RuleType};
use crate::error::{Error, Result};

/// An ordered rule set with unique ids.
///
/// Mutations go through named operations (add, update, remove, toggle,
/// move). Scoring and ranking borrow [`RuleSet::as_slice`], an immutable
/// snapshot for the duration of one pass.
///
/// # Examples
///
/// ```
/// use feedlab::rules::{Condition, Rule, RuleSet};
///
/// let mut rules = RuleSet::new();
/// rules.add(Rule::filter("no-spam", "Hide spam")
///     .with_condition(Condition::contains("content", "spam")))?;
/// rules.add(Rule::boost("popular", "Popular posts", 15)
///     .with_condition(Condition::gt("engagement", 100.0)))?;
///
/// rules.move_rule(1, 0)?;
/// assert_eq!(rules.as_slice()[0].id.as_str(), "popular");
/// # Ok::<(), feedlab::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "Vec<Rule>", try_from = "Vec<Rule>"))]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a rule set, rejecting duplicate ids.
    pub fn from_rules(rules: Vec<Rule>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(rules.len());
        for rule in &rules {
            if !seen.insert(&rule.id) {
                return Err(Error::DuplicateRuleId(rule.id.clone()));
            }
        }
        Ok(Self { rules })
    }

    /// Appends a rule at the end.
    pub fn add(&mut self, rule: Rule) -> Result<()> {
        if self.contains(&rule.id) {
            return Err(Error::DuplicateRuleId(rule.id));
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Applies a partial update to the rule with `id`.
    pub fn update(&mut self, id: &RuleId, patch: RulePatch) -> Result<()> {
        self.get_mut(id)?.apply(patch);
        Ok(())
    }

    /// Removes and returns the rule with `id`. Remaining rules keep
    /// their ids and relative order.
    pub fn remove(&mut self, id: &RuleId) -> Result<Rule> {
        let index = self.position(id)?;
        Ok(self.rules.remove(index))
    }

    /// Flips `enabled` on the rule with `id`, returning the new state.
    pub fn toggle(&mut self, id: &RuleId) -> Result<bool> {
        let rule = self.get_mut(id)?;
        rule.enabled = !rule.enabled;
        Ok(rule.enabled)
    }

    /// Moves the rule at `from` so it ends up at index `to`.
    pub fn move_rule(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.rules.len();
        for index in [from, to] {
            if index >= len {
                return Err(Error::IndexOutOfRange { index, len });
            }
        }
        let rule = self.rules.remove(from);
        self.rules.insert(to, rule);
        Ok(())
    }

    pub fn get(&self, id: &RuleId) -> Option<&Rule> {
        self.rules.iter().find(|rule| &rule.id == id)
    }

    pub fn contains(&self, id: &RuleId) -> bool {
        self.get(id).is_some()
    }

    /// Index of the rule with `id`.
    pub fn position(&self, id: &RuleId) -> Result<usize> {
        self.rules
            .iter()
            .position(|rule| &rule.id == id)
            .ok_or_else(|| Error::UnknownRule(id.clone()))
    }

    fn get_mut(&mut self, id: &RuleId) -> Result<&mut Rule> {
        self.rules
            .iter_mut()
            .find(|rule| &rule.id == id)
            .ok_or_else(|| Error::UnknownRule(id.clone()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Immutable snapshot for scoring and ranking.
    pub fn as_slice(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of enabled rules.
    pub fn enabled_count(&self) -> usize {
        self.rules.iter().filter(|rule| rule.enabled).count()
    }

    /// Number of enabled rules of the given type.
    pub fn count_enabled(&self, rule_type: &RuleType) -> usize {
        self.rules
            .iter()
            .filter(|rule| rule.enabled && &rule.rule_type == rule_type)
            .count()
    }

    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl TryFrom<Vec<Rule>> for RuleSet {
    type Error = Error;

    fn try_from(rules: Vec<Rule>) -> Result<Self> {
        Self::from_rules(rules)
    }
}

impl From<RuleSet> for Vec<Rule> {
    fn from(set: RuleSet) -> Self {
        set.rules
    }
}

impl AsRef<[Rule]> for RuleSet {
    fn as_ref(&self) -> &[Rule] {
        &self.rules
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_deserialize_rejects_duplicate_ids() {
        let raw = r#"[
            {"id": "r1", "name": "A", "type": "boost", "weight": 5, "conditions": [], "enabled": true},
            {"id": "r1", "name": "B", "type": "demote", "weight": -5, "conditions": [], "enabled": true}
        ]"#;

        let err = serde_json::from_str::<RuleSet>(raw).unwrap_err();
        assert!(err.to_string().contains("r1"));
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let set = RuleSet::from_rules(vec![Rule::filter("f1", "Hide spam")]).unwrap();
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json[0]["id"], "f1");

        let back: RuleSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, set);
    }
}
