//! Condition and rule evaluation.
//!
//! Evaluation is total: every combination of field value, operator and
//! operand yields a boolean. Absent fields, type-incompatible pairs,
//! invalid patterns and unknown operators all evaluate to `false`.

use std::cmp::Ordering;

use tracing::{trace, warn};

use super::pattern::{compile, PatternCache};
use super::types::{Condition, Operand, Operator, Rule};
use crate::content::{parse_number, Attributes, Value};

/// Evaluates one condition against one item.
///
/// # Examples
///
/// ```
/// use feedlab::content::ContentItem;
/// use feedlab::rules::{evaluate, Condition};
///
/// let post = ContentItem::new("p").with_text("content", "Buy SPAM now");
/// assert!(evaluate(&post, &Condition::contains("content", "spam")));
/// assert!(!evaluate(&post, &Condition::gt("content", 5.0)));
/// ```
pub fn evaluate<A: Attributes + ?Sized>(item: &A, condition: &Condition) -> bool {
    evaluate_with(item, condition, None)
}

/// Evaluates one condition, taking compiled patterns from `patterns`
/// when available.
pub fn evaluate_with<A: Attributes + ?Sized>(
    item: &A,
    condition: &Condition,
    patterns: Option<&PatternCache>,
) -> bool {
    let Some(value) = item.attribute(&condition.field) else {
        return false;
    };

    match &condition.operator {
        Operator::Equals => equals(value, &condition.value),
        Operator::Contains => contains(value, &condition.value),
        Operator::Gt => compare(value, &condition.value) == Some(Ordering::Greater),
        Operator::Lt => compare(value, &condition.value) == Some(Ordering::Less),
        Operator::Regex => regex_match(value, &condition.value, patterns),
        Operator::Unknown(name) => {
            // a cache has already reported it for this pass
            if patterns.is_some() {
                trace!(operator = %name, field = %condition.field, "unknown operator skipped");
            } else {
                warn!(
                    operator = %name,
                    field = %condition.field,
                    "unknown condition operator, treating as non-matching"
                );
            }
            false
        }
    }
}

/// Whether `rule` matches `item`.
///
/// Disabled rules never match. Enabled rules match when every condition
/// holds; a rule without conditions matches everything.
pub fn matches<A: Attributes + ?Sized>(item: &A, rule: &Rule) -> bool {
    matches_with(item, rule, None)
}

pub fn matches_with<A: Attributes + ?Sized>(
    item: &A,
    rule: &Rule,
    patterns: Option<&PatternCache>,
) -> bool {
    rule.enabled
        && rule
            .conditions
            .iter()
            .all(|cond| evaluate_with(item, cond, patterns))
}

fn equals(value: &Value, operand: &Operand) -> bool {
    match operand {
        Operand::Number(n) => value.as_number() == Some(*n),
        Operand::Text(s) => value.as_text() == s.as_str(),
    }
}

fn contains(value: &Value, operand: &Operand) -> bool {
    match operand {
        Operand::Text(needle) => value
            .as_text()
            .to_lowercase()
            .contains(&needle.to_lowercase()),
        Operand::Number(_) => false,
    }
}

fn compare(value: &Value, operand: &Operand) -> Option<Ordering> {
    let rhs = match operand {
        Operand::Number(n) => *n,
        Operand::Text(s) => parse_number(s)?,
    };
    value.as_number()?.partial_cmp(&rhs)
}

fn regex_match(value: &Value, operand: &Operand, patterns: Option<&PatternCache>) -> bool {
    let Operand::Text(pattern) = operand else {
        return false;
    };
    let text = value.as_text();

    match patterns.and_then(|cache| cache.get(pattern)) {
        Some(cached) => cached.is_some_and(|re| re.is_match(&text)),
        None => compile(pattern).is_some_and(|re| re.is_match(&text)),
    }
}
