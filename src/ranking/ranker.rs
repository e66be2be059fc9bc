//! Feed ranker.

use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::RankConfig;
use crate::content::Attributes;
use crate::error::Result;
use crate::rules::{PatternCache, Rule};
use crate::scoring::{Explanation, ScoringEngine};

/// Content the ranker can score.
///
/// With the `parallel` feature items must also be `Sync`.
#[cfg(feature = "parallel")]
pub trait Rankable: Attributes + Sync {}

#[cfg(feature = "parallel")]
impl<T: Attributes + Sync + ?Sized> Rankable for T {}

/// Content the ranker can score.
///
/// With the `parallel` feature items must also be `Sync`.
#[cfg(not(feature = "parallel"))]
pub trait Rankable: Attributes {}

#[cfg(not(feature = "parallel"))]
impl<T: Attributes + ?Sized> Rankable for T {}

/// An included item in ranked position.
#[derive(Debug, Clone)]
pub struct RankedItem<'a, I> {
    /// Position of the item in the input batch.
    pub index: usize,
    pub item: &'a I,
    pub net_score: i64,
    pub explanation: Explanation,
}

/// Ranks content batches against rule snapshots.
///
/// Holds configuration only; each call is independent.
///
/// # Examples
///
/// ```
/// use feedlab::content::ContentItem;
/// use feedlab::ranking::FeedRanker;
/// use feedlab::rules::{Condition, Rule};
///
/// let rules = vec![
///     Rule::filter("no-spam", "Hide spam").with_condition(Condition::contains("content", "spam")),
///     Rule::boost("popular", "Popular", 15).with_condition(Condition::gt("engagement", 100.0)),
/// ];
/// let posts = vec![
///     ContentItem::new("a").with_text("content", "hello").with_number("engagement", 10.0),
///     ContentItem::new("b").with_text("content", "SPAM!").with_number("engagement", 999.0),
///     ContentItem::new("c").with_text("content", "news").with_number("engagement", 500.0),
/// ];
///
/// let feed = FeedRanker::new().rank(&posts, &rules);
/// let ids: Vec<&str> = feed.iter().map(|r| r.item.id.as_str()).collect();
/// assert_eq!(ids, vec!["c", "a"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FeedRanker {
    config: RankConfig,
    engine: ScoringEngine,
}

impl FeedRanker {
    /// Creates a ranker with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ranker after validating `config`.
    pub fn with_config(config: RankConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            engine: ScoringEngine::with_config(config.scoring.clone()),
            config,
        })
    }

    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Scores every item, filtered ones included, in input order.
    pub fn explain_all<I: Rankable>(&self, items: &[I], rules: &[Rule]) -> Vec<Explanation> {
        let patterns = PatternCache::for_rules(rules);
        self.score_all(items, rules, &patterns)
    }

    /// Ranks `items`: filtered items are dropped, the rest sorted by net
    /// score descending with ties in input order.
    pub fn rank<'a, I: Rankable>(&self, items: &'a [I], rules: &[Rule]) -> Vec<RankedItem<'a, I>> {
        let explanations = self.explain_all(items, rules);

        let mut ranked: Vec<RankedItem<'a, I>> = explanations
            .into_iter()
            .enumerate()
            .filter(|(_, explanation)| explanation.included)
            .map(|(index, explanation)| RankedItem {
                index,
                item: &items[index],
                net_score: explanation.net_score,
                explanation,
            })
            .collect();

        let included = ranked.len();

        // sort_by is stable: equal scores keep input order
        ranked.sort_by(|a, b| b.net_score.cmp(&a.net_score));

        if let Some(limit) = self.config.limit {
            ranked.truncate(limit);
        }

        debug!(
            items = items.len(),
            rules = rules.len(),
            filtered = items.len() - included,
            ranked = ranked.len(),
            "feed ranked"
        );

        ranked
    }

    /// Ranks `items`, returning indices into the input batch.
    pub fn rank_indices<I: Rankable>(&self, items: &[I], rules: &[Rule]) -> Vec<usize> {
        self.rank(items, rules)
            .into_iter()
            .map(|ranked| ranked.index)
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn score_all<I: Rankable>(
        &self,
        items: &[I],
        rules: &[Rule],
        patterns: &PatternCache,
    ) -> Vec<Explanation> {
        if self.config.parallel {
            items
                .par_iter()
                .map(|item| self.engine.score_with(item, rules, Some(patterns)))
                .collect()
        } else {
            self.score_sequential(items, rules, patterns)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn score_all<I: Rankable>(
        &self,
        items: &[I],
        rules: &[Rule],
        patterns: &PatternCache,
    ) -> Vec<Explanation> {
        self.score_sequential(items, rules, patterns)
    }

    fn score_sequential<I: Rankable>(
        &self,
        items: &[I],
        rules: &[Rule],
        patterns: &PatternCache,
    ) -> Vec<Explanation> {
        items
            .iter()
            .map(|item| self.engine.score_with(item, rules, Some(patterns)))
            .collect()
    }
}

/// Ranks `items` with the default configuration.
pub fn rank<'a, I: Rankable>(items: &'a [I], rules: &[Rule]) -> Vec<RankedItem<'a, I>> {
    FeedRanker::new().rank(items, rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentItem;
    use crate::rules::{matches, Condition, RuleType};
    use proptest::prelude::*;

    fn ids<'a>(ranked: &[RankedItem<'a, ContentItem>]) -> Vec<&'a str> {
        ranked.iter().map(|r| r.item.id.as_str()).collect()
    }

    #[test]
    fn test_stable_tie_break() {
        let rules = vec![
            Rule::boost("x", "Author x", 10).with_condition(Condition::equals("author", "x")),
            Rule::boost("y", "Author y", 5).with_condition(Condition::equals("author", "y")),
        ];
        let items = vec![
            ContentItem::new("A").with_text("author", "x"),
            ContentItem::new("B").with_text("author", "x"),
            ContentItem::new("C").with_text("author", "y"),
        ];

        let ranked = rank(&items, &rules);
        assert_eq!(ids(&ranked), vec!["A", "B", "C"]);
        let scores: Vec<i64> = ranked.iter().map(|r| r.net_score).collect();
        assert_eq!(scores, vec![10, 10, 5]);
    }

    #[test]
    fn test_sorts_descending() {
        let rules = vec![
            Rule::boost("hot", "Hot", 20).with_condition(Condition::gt("engagement", 100.0)),
            Rule::demote("old", "Old", -8).with_condition(Condition::gt("age", 48.0)),
        ];
        let items = vec![
            ContentItem::new("old").with_number("engagement", 5.0).with_number("age", 100.0),
            ContentItem::new("plain").with_number("engagement", 5.0).with_number("age", 1.0),
            ContentItem::new("hot").with_number("engagement", 500.0).with_number("age", 1.0),
        ];

        let ranked = rank(&items, &rules);
        assert_eq!(ids(&ranked), vec!["hot", "plain", "old"]);
        assert_eq!(ranked[2].net_score, -8);
        assert_eq!(ranked[0].index, 2);
    }

    #[test]
    fn test_no_rules_keeps_order() {
        let items: Vec<ContentItem> = (0..4).map(|i| ContentItem::new(format!("p{i}"))).collect();
        let ranked = rank(&items, &[]);
        assert_eq!(ids(&ranked), vec!["p0", "p1", "p2", "p3"]);
        assert!(ranked.iter().all(|r| r.net_score == 0 && r.explanation.included));
    }

    #[test]
    fn test_malformed_item_does_not_abort_batch() {
        let rules = vec![
            Rule::filter("f", "No spam").with_condition(Condition::contains("content", "spam")),
            Rule::boost("b", "Popular", 10).with_condition(Condition::gt("engagement", 100.0)),
            Rule::boost("r", "Links", 1).with_condition(Condition::regex("content", "(broken")),
        ];
        let items = vec![
            ContentItem::new("empty"),
            ContentItem::new("weird").with_flag("engagement", true),
            ContentItem::new("good").with_number("engagement", 200.0),
        ];

        let ranked = rank(&items, &rules);
        assert_eq!(ids(&ranked), vec!["good", "empty", "weird"]);
    }

    #[test]
    fn test_limit_and_indices() {
        let rules = vec![Rule::boost("b", "Popular", 1).with_condition(Condition::gt("engagement", 10.0))];
        let items: Vec<ContentItem> = [1.0, 50.0, 5.0, 80.0]
            .iter()
            .enumerate()
            .map(|(i, e)| ContentItem::new(format!("p{i}")).with_number("engagement", *e))
            .collect();

        let ranker = FeedRanker::with_config(RankConfig::default().with_limit(2)).unwrap();
        assert_eq!(ranker.rank_indices(&items, &rules), vec![1, 3]);
    }

    #[test]
    fn test_explain_all_reports_filtered_items() {
        let rules = vec![Rule::filter("f", "No spam").with_condition(Condition::contains("content", "spam"))];
        let items = vec![
            ContentItem::new("a").with_text("content", "spam"),
            ContentItem::new("b").with_text("content", "ham"),
        ];

        let explanations = FeedRanker::new().explain_all(&items, &rules);
        assert_eq!(explanations.len(), 2);
        assert!(!explanations[0].included);
        assert!(explanations[1].included);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(FeedRanker::with_config(RankConfig::default().with_limit(0)).is_err());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let rules = vec![
            Rule::boost("b", "Popular", 3).with_condition(Condition::gt("engagement", 50.0)),
            Rule::demote("d", "Cats", -2).with_condition(Condition::contains("content", "cat")),
        ];
        let items: Vec<ContentItem> = (0..200)
            .map(|i| {
                ContentItem::new(format!("p{i}"))
                    .with_number("engagement", f64::from(i % 100))
                    .with_text("content", if i % 3 == 0 { "cat pics" } else { "dogs" })
            })
            .collect();

        let sequential = FeedRanker::with_config(RankConfig::default().with_parallel(false))
            .unwrap()
            .rank_indices(&items, &rules);
        let parallel = FeedRanker::with_config(RankConfig::default().with_parallel(true))
            .unwrap()
            .rank_indices(&items, &rules);
        assert_eq!(sequential, parallel);
    }

    // ---- Properties ----

    const WORDS: [&str; 4] = ["spam", "rust", "news", "cats"];

    fn arb_item() -> impl Strategy<Value = ContentItem> {
        (0u32..200, prop::sample::select(WORDS.to_vec()), any::<bool>()).prop_map(
            |(engagement, word, media)| {
                ContentItem::new(word)
                    .with_number("engagement", f64::from(engagement))
                    .with_text("content", format!("about {word}"))
                    .with_flag("has_media", media)
            },
        )
    }

    fn arb_condition() -> impl Strategy<Value = Condition> {
        prop_oneof![
            (0u32..200).prop_map(|t| Condition::gt("engagement", f64::from(t))),
            (0u32..200).prop_map(|t| Condition::lt("engagement", f64::from(t))),
            prop::sample::select(WORDS.to_vec()).prop_map(|w| Condition::contains("content", w)),
            any::<bool>().prop_map(|b| Condition::equals("has_media", if b { "true" } else { "false" })),
        ]
    }

    fn arb_rules() -> impl Strategy<Value = Vec<Rule>> {
        prop::collection::vec(
            (
                0u8..3,
                prop::collection::vec(arb_condition(), 0..3),
                -20i32..=20,
                any::<bool>(),
            ),
            0..8,
        )
        .prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (kind, conditions, weight, enabled))| {
                    let rule_type = match kind {
                        0 => RuleType::Boost,
                        1 => RuleType::Demote,
                        _ => RuleType::Filter,
                    };
                    Rule::new(format!("r{i}"), format!("rule {i}"), rule_type)
                        .with_weight(weight)
                        .with_conditions(conditions)
                        .with_enabled(enabled)
                })
                .collect()
        })
    }

    fn arb_items() -> impl Strategy<Value = Vec<ContentItem>> {
        prop::collection::vec(arb_item(), 0..24)
    }

    fn summary(ranked: &[RankedItem<'_, ContentItem>]) -> Vec<(usize, i64, Explanation)> {
        ranked
            .iter()
            .map(|r| (r.index, r.net_score, r.explanation.clone()))
            .collect()
    }

    proptest! {
        #[test]
        fn prop_ranking_is_deterministic(items in arb_items(), rules in arb_rules()) {
            let first = rank(&items, &rules);
            let second = rank(&items, &rules);
            prop_assert_eq!(summary(&first), summary(&second));
        }

        #[test]
        fn prop_filters_take_precedence(items in arb_items(), rules in arb_rules()) {
            let explanations = FeedRanker::new().explain_all(&items, &rules);
            for (item, explanation) in items.iter().zip(&explanations) {
                let filtered = rules
                    .iter()
                    .any(|rule| rule.rule_type == RuleType::Filter && matches(item, rule));
                prop_assert_eq!(explanation.included, !filtered);
                if filtered {
                    prop_assert!(!explanation.matched_filters.is_empty());
                    prop_assert!(explanation.matched_boosts.is_empty());
                    prop_assert!(explanation.matched_demotes.is_empty());
                }
            }
        }

        #[test]
        fn prop_weights_commute(items in arb_items(), rules in arb_rules()) {
            let mut reversed = rules.clone();
            reversed.reverse();
            let ranker = FeedRanker::new();
            let forward = ranker.explain_all(&items, &rules);
            let backward = ranker.explain_all(&items, &reversed);
            for (a, b) in forward.iter().zip(&backward) {
                prop_assert_eq!(a.included, b.included);
                prop_assert_eq!(a.net_score, b.net_score);
            }
        }

        #[test]
        fn prop_disabled_rule_is_invisible(
            items in arb_items(),
            rules in arb_rules(),
            pick in any::<prop::sample::Index>(),
        ) {
            prop_assume!(!rules.is_empty());
            let k = pick.index(rules.len());

            let mut disabled = rules.clone();
            disabled[k].enabled = false;
            let mut removed = rules.clone();
            removed.remove(k);

            let ranker = FeedRanker::new();
            prop_assert_eq!(
                ranker.explain_all(&items, &disabled),
                ranker.explain_all(&items, &removed)
            );
        }

        #[test]
        fn prop_ties_keep_input_order(items in arb_items(), rules in arb_rules()) {
            let ranked = rank(&items, &rules);
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].net_score >= pair[1].net_score);
                if pair[0].net_score == pair[1].net_score {
                    prop_assert!(pair[0].index < pair[1].index);
                }
            }
        }
    }
}
