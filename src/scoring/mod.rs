//! Scoring engine.
//!
//! Turns an ordered rule snapshot plus one content item into a verdict
//! (included or not), a net priority score, and an [`Explanation`] of
//! which rules fired.
//!
//! Filters take precedence: an item matching any enabled filter is
//! excluded no matter which boosts or demotes also match. Boost and
//! demote weights are summed as stored; the engine does not enforce a
//! sign for demotes.

mod config;
mod engine;
mod types;

pub use config::{FilterMode, ScoringConfig};
pub use engine::{score, ScoringEngine};
pub use types::{Contribution, Explanation};
