//! Per-item scoring: filters first, then boost/demote aggregation.

use tracing::{trace, warn};

use super::config::{FilterMode, ScoringConfig};
use super::types::Explanation;
use crate::content::Attributes;
use crate::rules::{matches_with, PatternCache, Rule, RuleId, RuleType};

/// Scores one item against an ordered rule snapshot.
///
/// 1. Enabled filter rules are checked first; any match excludes the item.
/// 2. Otherwise every matching enabled boost/demote rule adds its stored
///    weight to the net score. Summation is order-independent.
///
/// Rules of an unknown type neither exclude nor contribute.
///
/// # Examples
///
/// ```
/// use feedlab::content::ContentItem;
/// use feedlab::rules::{Condition, Rule};
/// use feedlab::scoring::ScoringEngine;
///
/// let rules = vec![
///     Rule::boost("popular", "Popular", 15).with_condition(Condition::gt("engagement", 100.0)),
/// ];
/// let post = ContentItem::new("p").with_number("engagement", 150.0);
///
/// let explanation = ScoringEngine::new().score(&post, &rules);
/// assert!(explanation.included);
/// assert_eq!(explanation.net_score, 15);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Scores `item`, compiling any regex operands on demand.
    pub fn score<A: Attributes + ?Sized>(&self, item: &A, rules: &[Rule]) -> Explanation {
        self.score_with(item, rules, None)
    }

    /// Scores `item`, reusing patterns compiled for the current pass.
    pub fn score_with<A: Attributes + ?Sized>(
        &self,
        item: &A,
        rules: &[Rule],
        patterns: Option<&PatternCache>,
    ) -> Explanation {
        let matched_filters = self.matched_filters(item, rules, patterns);
        if !matched_filters.is_empty() {
            trace!(filters = matched_filters.len(), "item excluded");
            return Explanation::excluded(matched_filters);
        }

        let mut explanation = Explanation::included();
        for rule in rules.iter().filter(|rule| rule.enabled) {
            match &rule.rule_type {
                RuleType::Filter => {}
                RuleType::Boost => {
                    if matches_with(item, rule, patterns) {
                        explanation.record_boost(&rule.id, rule.weight);
                    }
                }
                RuleType::Demote => {
                    if matches_with(item, rule, patterns) {
                        explanation.record_demote(&rule.id, rule.weight);
                    }
                }
                RuleType::Unknown(name) => {
                    // a cache has already reported it for this pass
                    if patterns.is_some() {
                        trace!(rule = %rule.id, rule_type = %name, "unknown rule type skipped");
                    } else {
                        warn!(rule = %rule.id, rule_type = %name, "unknown rule type, ignoring rule");
                    }
                }
            }
        }

        trace!(net_score = explanation.net_score, "item scored");
        explanation
    }

    fn matched_filters<A: Attributes + ?Sized>(
        &self,
        item: &A,
        rules: &[Rule],
        patterns: Option<&PatternCache>,
    ) -> Vec<RuleId> {
        let mut matched = Vec::new();
        let filters = rules
            .iter()
            .filter(|rule| rule.enabled && rule.rule_type == RuleType::Filter);

        for rule in filters {
            if matches_with(item, rule, patterns) {
                matched.push(rule.id.clone());
                if self.config.filter_mode == FilterMode::FirstMatch {
                    break;
                }
            }
        }
        matched
    }
}

/// Scores `item` with the default engine configuration.
pub fn score<A: Attributes + ?Sized>(item: &A, rules: &[Rule]) -> Explanation {
    ScoringEngine::new().score(item, rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentItem;
    use crate::rules::Condition;
    use crate::scoring::Contribution;

    fn spam_filter(id: &str) -> Rule {
        Rule::filter(id, "No spam").with_condition(Condition::contains("content", "spam"))
    }

    #[test]
    fn test_filter_excludes() {
        let rules = vec![spam_filter("f1")];
        let item = ContentItem::new("a").with_text("content", "buy spam now");

        let exp = score(&item, &rules);
        assert!(!exp.included);
        assert_eq!(exp.net_score, 0);
        assert_eq!(exp.matched_filters, vec![RuleId::from("f1")]);
        assert!(exp.matched_boosts.is_empty());
    }

    #[test]
    fn test_boost_adds_weight() {
        let rules = vec![
            Rule::boost("b1", "Popular", 15).with_condition(Condition::gt("engagement", 100.0)),
        ];
        let item = ContentItem::new("a").with_number("engagement", 150.0);

        let exp = score(&item, &rules);
        assert!(exp.included);
        assert_eq!(exp.net_score, 15);
        assert_eq!(
            exp.matched_boosts,
            vec![Contribution {
                rule_id: RuleId::from("b1"),
                weight: 15
            }]
        );
    }

    #[test]
    fn test_boost_and_demote_cancel() {
        let rules = vec![Rule::boost("b", "Boost", 10), Rule::demote("d", "Demote", -10)];
        let exp = score(&ContentItem::new("a"), &rules);
        assert!(exp.included);
        assert_eq!(exp.net_score, 0);
        assert_eq!(exp.matched_boosts.len(), 1);
        assert_eq!(exp.matched_demotes.len(), 1);
    }

    #[test]
    fn test_demote_sign_is_not_enforced() {
        let rules = vec![Rule::demote("d", "Odd demote", 7)];
        assert_eq!(score(&ContentItem::new("a"), &rules).net_score, 7);
    }

    #[test]
    fn test_filter_wins_over_boost() {
        let rules = vec![Rule::boost("b", "Everything", 100), spam_filter("f")];
        let item = ContentItem::new("a").with_text("content", "spam");

        let exp = score(&item, &rules);
        assert!(!exp.included);
        assert!(exp.matched_boosts.is_empty());
    }

    #[test]
    fn test_non_numeric_field_not_boosted() {
        let rules = vec![Rule::boost("b", "Gt5", 10).with_condition(Condition::gt("engagement", 5.0))];
        let item = ContentItem::new("a").with_text("engagement", "lots");

        let exp = score(&item, &rules);
        assert!(exp.included);
        assert_eq!(exp.net_score, 0);
    }

    #[test]
    fn test_filter_weight_ignored() {
        let rules = vec![Rule::filter("f", "Never").with_weight(50).with_condition(
            Condition::equals("author", "nobody"),
        )];
        let exp = score(&ContentItem::new("a").with_text("author", "someone"), &rules);
        assert!(exp.included);
        assert_eq!(exp.net_score, 0);
    }

    #[test]
    fn test_filter_modes() {
        let rules = vec![spam_filter("f1"), spam_filter("f2")];
        let item = ContentItem::new("a").with_text("content", "spam");

        let first = ScoringEngine::new().score(&item, &rules);
        assert_eq!(first.matched_filters, vec![RuleId::from("f1")]);

        let all = ScoringEngine::with_config(
            ScoringConfig::default().with_filter_mode(FilterMode::CollectAll),
        )
        .score(&item, &rules);
        assert_eq!(all.matched_filters, vec![RuleId::from("f1"), RuleId::from("f2")]);
    }

    #[test]
    fn test_disabled_rules_ignored() {
        let rules = vec![
            spam_filter("f").with_enabled(false),
            Rule::boost("b", "Everything", 5).with_enabled(false),
        ];
        let exp = score(&ContentItem::new("a").with_text("content", "spam"), &rules);
        assert!(exp.included);
        assert!(exp.is_untouched());
    }

    #[test]
    fn test_unknown_rule_type_fails_closed() {
        let rules = vec![
            Rule::new("x", "Future", RuleType::parse("pin")).with_weight(99),
            Rule::boost("b", "Everything", 3),
        ];
        let exp = score(&ContentItem::new("a"), &rules);
        assert!(exp.included);
        assert_eq!(exp.net_score, 3);
        assert!(!exp.fired_rules().any(|id| id.as_str() == "x"));
    }

    #[test]
    fn test_empty_rule_set() {
        let exp = score(&ContentItem::new("a"), &[]);
        assert!(exp.included);
        assert_eq!(exp.net_score, 0);
    }
}
