//! Compiled regex patterns for `regex` conditions.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use tracing::warn;

use super::types::{Operand, Operator, Rule, RuleType};

/// Upper bound on the compiled size of a user-authored pattern.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Compiles a user-authored pattern.
///
/// Invalid or oversized patterns return `None` and log a warning; the
/// condition using them simply never matches.
pub(crate) fn compile(pattern: &str) -> Option<Regex> {
    match RegexBuilder::new(pattern)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
    {
        Ok(re) => Some(re),
        Err(err) => {
            warn!(pattern, error = %err, "invalid regex in rule condition, treating as non-matching");
            None
        }
    }
}

/// Patterns compiled once for a ranking pass.
///
/// Built from a rule snapshot and immutable afterwards, so it can be
/// shared by every item (and every thread) in the pass. Invalid patterns
/// are stored as `None` so they are reported once, not once per item.
/// Unknown operators and rule types in the snapshot are reported here
/// too; evaluation under a cache only traces them.
#[derive(Debug, Clone, Default)]
pub struct PatternCache {
    patterns: HashMap<String, Option<Regex>>,
    unknown_operators: Vec<String>,
    unknown_rule_types: Vec<String>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles every regex operand used by the enabled rules and
    /// reports each distinct unknown operator or rule type once.
    pub fn for_rules(rules: &[Rule]) -> Self {
        let mut cache = Self::default();

        for rule in rules.iter().filter(|rule| rule.enabled) {
            if let RuleType::Unknown(name) = &rule.rule_type {
                if !cache.unknown_rule_types.contains(name) {
                    warn!(rule = %rule.id, rule_type = %name, "unknown rule type, ignoring rule");
                    cache.unknown_rule_types.push(name.clone());
                }
            }

            for cond in &rule.conditions {
                match (&cond.operator, &cond.value) {
                    (Operator::Regex, Operand::Text(pattern)) => {
                        if !cache.patterns.contains_key(pattern) {
                            cache.patterns.insert(pattern.clone(), compile(pattern));
                        }
                    }
                    (Operator::Unknown(name), _) => {
                        if !cache.unknown_operators.contains(name) {
                            warn!(
                                operator = %name,
                                field = %cond.field,
                                "unknown condition operator, treating as non-matching"
                            );
                            cache.unknown_operators.push(name.clone());
                        }
                    }
                    _ => {}
                }
            }
        }

        cache
    }

    /// Looks up a pattern.
    ///
    /// The outer `Option` is `None` when the pattern was never compiled
    /// into this cache; the inner one is `None` when it failed to compile.
    pub fn get(&self, pattern: &str) -> Option<Option<&Regex>> {
        self.patterns.get(pattern).map(Option::as_ref)
    }

    /// Number of distinct patterns held, valid or not.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of patterns that failed to compile.
    pub fn invalid_count(&self) -> usize {
        self.patterns.values().filter(|re| re.is_none()).count()
    }

    /// Distinct unknown operator names seen in enabled rules.
    pub fn unknown_operators(&self) -> &[String] {
        &self.unknown_operators
    }

    /// Distinct unknown rule type names among enabled rules.
    pub fn unknown_rule_types(&self) -> &[String] {
        &self.unknown_rule_types
    }
}
