//! Ranking configuration.

use crate::error::{Error, Result};
use crate::scoring::ScoringConfig;

/// Configuration for the [`FeedRanker`](super::FeedRanker).
///
/// # Examples
///
/// ```
/// use feedlab::ranking::RankConfig;
///
/// let config = RankConfig::default().with_limit(50).with_parallel(false);
/// assert!(config.validate().is_ok());
/// assert!(RankConfig::default().with_limit(0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RankConfig {
    /// Per-item scoring behaviour.
    pub scoring: ScoringConfig,

    /// Maximum number of items in the ranked feed. `None` keeps all.
    pub limit: Option<usize>,

    /// Whether to score items in parallel using rayon.
    ///
    /// Only takes effect with the `parallel` feature. Output is identical
    /// to sequential scoring.
    pub parallel: bool,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            limit: None,
            parallel: true,
        }
    }
}

impl RankConfig {
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn without_limit(mut self) -> Self {
        self.limit = None;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.limit == Some(0) {
            return Err(Error::InvalidConfig("limit must be at least 1".into()));
        }
        Ok(())
    }
}
