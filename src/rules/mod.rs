//! Rule DSL and evaluation.
//!
//! - [`evaluate`]: one [`Condition`] against one item.
//! - [`matches`]: one [`Rule`] against one item (conditions AND-combined,
//!   disabled rules never match).
//! - [`RuleSet`]: the ordered, id-unique collection users edit.
//! - [`PatternCache`]: regex operands compiled once per pass.

mod condition;
mod pattern;
mod rule_set;
mod types;

pub use condition::{evaluate, evaluate_with, matches, matches_with};
pub use pattern::PatternCache;
pub use rule_set::RuleSet;
pub use types::{Condition, Operand, Operator, Rule, RuleId, RulePatch, RuleType};
