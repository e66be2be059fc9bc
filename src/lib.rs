//! Feed customization rule engine.
//!
//! Users define named rules that boost, demote or filter content matching
//! field conditions. This crate turns a rule set plus content into:
//!
//! - **Verdicts**: whether an item stays in the feed.
//! - **Net scores**: the signed sum of matching boost/demote weights.
//! - **Explanations**: which rules fired and what each contributed.
//!
//! Components, leaves first:
//!
//! - [`rules`]: the condition DSL (`equals | contains | gt | lt | regex`),
//!   condition and rule evaluation, and the editable [`rules::RuleSet`].
//! - [`scoring`]: per-item scoring, filters before boosts/demotes.
//! - [`ranking`]: scores a batch, drops filtered items, sorts the rest
//!   with a stable tie-break on input order.
//! - [`recipe`]: rule templates and their instantiation into rules.
//! - [`recycle`]: recycle suitability from engagement and evergreen
//!   scores, with a pluggable combination formula.
//!
//! # Architecture
//!
//! The engine is synchronous and holds no state between calls. Content is
//! read through the [`content::Attributes`] trait (lookup by field name),
//! and rules are borrowed as an immutable `&[Rule]` snapshot for each
//! pass. Evaluation never fails: malformed conditions, invalid patterns
//! and unknown operators or rule types simply do not match, with a
//! `tracing` warning where the rule author should hear about it.
//!
//! # Example
//!
//! ```
//! use feedlab::content::ContentItem;
//! use feedlab::ranking::rank;
//! use feedlab::rules::{Condition, Rule, RuleSet};
//!
//! let mut rules = RuleSet::new();
//! rules.add(Rule::filter("no-spam", "Hide spam")
//!     .with_condition(Condition::contains("content", "spam")))?;
//! rules.add(Rule::boost("hot", "Hot posts", 15)
//!     .with_condition(Condition::gt("engagement", 100.0)))?;
//!
//! let posts = vec![
//!     ContentItem::new("a").with_text("content", "buy spam now"),
//!     ContentItem::new("b").with_number("engagement", 150.0),
//!     ContentItem::new("c").with_number("engagement", 3.0),
//! ];
//!
//! let feed = rank(&posts, rules.as_slice());
//! assert_eq!(feed.len(), 2);
//! assert_eq!(feed[0].item.id, "b");
//! assert_eq!(feed[0].explanation.to_string(), "score +15: boost hot +15");
//! # Ok::<(), feedlab::Error>(())
//! ```

pub mod content;
pub mod error;
pub mod ranking;
pub mod recipe;
pub mod recycle;
pub mod rules;
pub mod scoring;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Error, Result};
