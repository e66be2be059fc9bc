//! Recycle scoring and suggestion ranking.

use tracing::{debug, warn};

use super::config::RecycleConfig;
use super::formula::{RecycleFormula, WeightedAverage};
use crate::content::Attributes;
use crate::error::Result;

/// A post suggested for recycling.
#[derive(Debug, Clone)]
pub struct RecycleCandidate<'a, I> {
    /// Position of the item in the input batch.
    pub index: usize,
    pub item: &'a I,
    pub score: f64,
}

/// Derives recycle suitability from pre-computed engagement and
/// evergreen scores.
///
/// # Examples
///
/// ```
/// use feedlab::content::ContentItem;
/// use feedlab::recycle::RecycleScorer;
///
/// let post = ContentItem::new("p")
///     .with_number("engagement_score", 80.0)
///     .with_number("evergreen_score", 40.0);
///
/// let scorer = RecycleScorer::new();
/// assert!((scorer.recycle_score(&post) - 60.0).abs() < 1e-10);
///
/// let engagement_only = RecycleScorer::with_formula(|engagement: f64, _: f64| engagement);
/// assert_eq!(engagement_only.recycle_score(&post), 80.0);
/// ```
#[derive(Debug, Clone)]
pub struct RecycleScorer<F = WeightedAverage> {
    formula: F,
    config: RecycleConfig,
}

impl RecycleScorer<WeightedAverage> {
    /// Creates a scorer using an equal-weight average.
    pub fn new() -> Self {
        Self::with_formula(WeightedAverage::default())
    }
}

impl Default for RecycleScorer<WeightedAverage> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: RecycleFormula> RecycleScorer<F> {
    pub fn with_formula(formula: F) -> Self {
        Self {
            formula,
            config: RecycleConfig::default(),
        }
    }

    /// Replaces the configuration after validating it.
    pub fn with_config(mut self, config: RecycleConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn formula(&self) -> &F {
        &self.formula
    }

    pub fn config(&self) -> &RecycleConfig {
        &self.config
    }

    /// Recycle score of one item.
    ///
    /// Absent or non-numeric inputs count as `0.0`. A formula producing a
    /// non-finite value yields `0.0`.
    pub fn recycle_score<A: Attributes + ?Sized>(&self, item: &A) -> f64 {
        let engagement = read_score(item, &self.config.engagement_field);
        let evergreen = read_score(item, &self.config.evergreen_field);
        let score = self.formula.combine(engagement, evergreen);

        if score.is_finite() {
            score
        } else {
            warn!(
                formula = self.formula.name(),
                engagement, evergreen, "recycle formula produced a non-finite score"
            );
            0.0
        }
    }

    /// Items worth recycling, best first.
    ///
    /// Keeps items scoring at least `min_score`; equal scores keep input
    /// order; truncated to `max_suggestions` when non-zero.
    pub fn suggest<'a, I: Attributes>(&self, items: &'a [I]) -> Vec<RecycleCandidate<'a, I>> {
        let mut candidates: Vec<RecycleCandidate<'a, I>> = items
            .iter()
            .enumerate()
            .map(|(index, item)| RecycleCandidate {
                index,
                item,
                score: self.recycle_score(item),
            })
            .filter(|candidate| candidate.score >= self.config.min_score)
            .collect();

        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

        if self.config.max_suggestions > 0 {
            candidates.truncate(self.config.max_suggestions);
        }

        debug!(
            items = items.len(),
            suggested = candidates.len(),
            formula = self.formula.name(),
            "recycle suggestions computed"
        );

        candidates
    }
}

fn read_score<A: Attributes + ?Sized>(item: &A, field: &str) -> f64 {
    item.attribute(field)
        .and_then(|value| value.as_number())
        .unwrap_or(0.0)
}

/// Recycle score of one item with the default equal-weight policy.
pub fn recycle_score<A: Attributes + ?Sized>(item: &A) -> f64 {
    RecycleScorer::new().recycle_score(item)
}
