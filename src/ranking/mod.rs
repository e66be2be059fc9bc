//! Feed ranking.
//!
//! Scores a content batch against a rule snapshot, drops filtered items
//! and sorts the rest by net score, highest first. Ties keep their
//! input order, so repeated calls with the same inputs always produce
//! the same feed.

mod config;
mod ranker;

pub use config::RankConfig;
pub use ranker::{rank, FeedRanker, Rankable, RankedItem};
