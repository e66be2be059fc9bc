//! Recycle score combination policies.

use crate::error::{Error, Result};

/// Combines engagement and evergreen scores into one recycle score.
///
/// The policy is deliberately pluggable: swap it without touching the
/// rest of the scorer. Any `Fn(f64, f64) -> f64` closure works too.
///
/// # Examples
///
/// ```
/// use feedlab::recycle::{RecycleFormula, WeightedAverage};
///
/// let formula = WeightedAverage::new(0.6, 0.4);
/// assert!((formula.combine(80.0, 50.0) - 68.0).abs() < 1e-10);
///
/// let max = |engagement: f64, evergreen: f64| engagement.max(evergreen);
/// assert_eq!(max.combine(80.0, 50.0), 80.0);
/// ```
pub trait RecycleFormula: Send + Sync {
    /// Returns the name of this policy.
    fn name(&self) -> &str;

    /// Combines the two pre-computed scores.
    fn combine(&self, engagement: f64, evergreen: f64) -> f64;
}

impl<F> RecycleFormula for F
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    fn name(&self) -> &str {
        "custom"
    }

    fn combine(&self, engagement: f64, evergreen: f64) -> f64 {
        self(engagement, evergreen)
    }
}

/// Weighted average of the two inputs.
///
/// Weights are normalized by their sum, so `(2, 1)` and `(0.66, 0.33)`
/// describe the same policy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedAverage {
    pub engagement_weight: f64,
    pub evergreen_weight: f64,
}

impl WeightedAverage {
    pub fn new(engagement_weight: f64, evergreen_weight: f64) -> Self {
        Self {
            engagement_weight,
            evergreen_weight,
        }
    }

    /// Validates the weights: finite, non-negative, not both zero.
    pub fn validate(&self) -> Result<()> {
        for (label, w) in [
            ("engagement_weight", self.engagement_weight),
            ("evergreen_weight", self.evergreen_weight),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{label} must be finite and non-negative, got {w}"
                )));
            }
        }
        if self.engagement_weight + self.evergreen_weight <= 0.0 {
            return Err(Error::InvalidConfig("weights must not both be zero".into()));
        }
        Ok(())
    }
}

/// Equal weighting.
impl Default for WeightedAverage {
    fn default() -> Self {
        Self::new(0.5, 0.5)
    }
}

impl RecycleFormula for WeightedAverage {
    fn name(&self) -> &str {
        "weighted-average"
    }

    fn combine(&self, engagement: f64, evergreen: f64) -> f64 {
        let total = self.engagement_weight + self.evergreen_weight;
        if total <= 0.0 {
            return 0.0;
        }
        (engagement * self.engagement_weight + evergreen * self.evergreen_weight) / total
    }
}
