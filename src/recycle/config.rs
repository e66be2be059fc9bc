//! Recycle suggestion configuration.

use crate::error::{Error, Result};

/// Configuration for the [`RecycleScorer`](super::RecycleScorer).
///
/// # Examples
///
/// ```
/// use feedlab::recycle::RecycleConfig;
///
/// let config = RecycleConfig::default()
///     .with_min_score(60.0)
///     .with_max_suggestions(5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RecycleConfig {
    /// Attribute holding the pre-computed engagement score.
    pub engagement_field: String,

    /// Attribute holding the pre-computed evergreen score.
    pub evergreen_field: String,

    /// Items scoring below this are never suggested.
    pub min_score: f64,

    /// Maximum number of suggestions. 0 = no limit.
    pub max_suggestions: usize,
}

impl Default for RecycleConfig {
    fn default() -> Self {
        Self {
            engagement_field: "engagement_score".into(),
            evergreen_field: "evergreen_score".into(),
            min_score: 0.0,
            max_suggestions: 0,
        }
    }
}

impl RecycleConfig {
    pub fn with_fields(mut self, engagement: impl Into<String>, evergreen: impl Into<String>) -> Self {
        self.engagement_field = engagement.into();
        self.evergreen_field = evergreen.into();
        self
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_max_suggestions(mut self, n: usize) -> Self {
        self.max_suggestions = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.min_score.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "min_score must be finite, got {}",
                self.min_score
            )));
        }
        if self.engagement_field.is_empty() || self.evergreen_field.is_empty() {
            return Err(Error::InvalidConfig("score field names must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RecycleConfig::default();
        assert_eq!(config.engagement_field, "engagement_score");
        assert_eq!(config.evergreen_field, "evergreen_score");
        assert_eq!(config.max_suggestions, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_min_score() {
        assert!(RecycleConfig::default()
            .with_min_score(f64::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_empty_field() {
        assert!(RecycleConfig::default()
            .with_fields("", "evergreen_score")
            .validate()
            .is_err());
    }
}
