//! Scoring configuration.

/// How many matching filters the engine records before excluding an item.
///
/// The verdict is the same either way: any matching filter excludes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FilterMode {
    /// Stop at the first matching filter, in rule-set order.
    #[default]
    FirstMatch,

    /// Evaluate every filter and record all matches.
    CollectAll,
}

/// Configuration for the [`ScoringEngine`](super::ScoringEngine).
///
/// # Examples
///
/// ```
/// use feedlab::scoring::{FilterMode, ScoringConfig};
///
/// let config = ScoringConfig::default().with_filter_mode(FilterMode::CollectAll);
/// assert_eq!(config.filter_mode, FilterMode::CollectAll);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoringConfig {
    pub filter_mode: FilterMode,
}

impl ScoringConfig {
    pub fn with_filter_mode(mut self, mode: FilterMode) -> Self {
        self.filter_mode = mode;
        self
    }
}
