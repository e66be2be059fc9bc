//! Recycle suggestions.
//!
//! Scores previously published posts for "recycle this post"
//! suggestions by combining two pre-computed inputs, an engagement score
//! and an evergreen score. The combination is a [`RecycleFormula`]
//! supplied by the caller; [`WeightedAverage`] is the bundled default.

mod config;
mod formula;
mod scorer;

pub use config::RecycleConfig;
pub use formula::{RecycleFormula, WeightedAverage};
pub use scorer::{recycle_score, RecycleCandidate, RecycleScorer};
