//! Evaluation trace returned for every scored item.

use std::fmt;

use crate::rules::RuleId;

/// A boost or demote rule's contribution to an item's net score.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Contribution {
    pub rule_id: RuleId,
    pub weight: i32,
}

/// Which rules fired for an item and how they shaped its verdict.
///
/// Produced fresh on every evaluation. For an excluded item only the
/// matched filters are recorded and `net_score` is zero.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Explanation {
    pub included: bool,
    pub net_score: i64,
    pub matched_filters: Vec<RuleId>,
    pub matched_boosts: Vec<Contribution>,
    pub matched_demotes: Vec<Contribution>,
}

impl Explanation {
    /// An included item with no contributions yet.
    pub fn included() -> Self {
        Self {
            included: true,
            net_score: 0,
            matched_filters: Vec::new(),
            matched_boosts: Vec::new(),
            matched_demotes: Vec::new(),
        }
    }

    /// An item excluded by the given filter rules.
    pub fn excluded(matched_filters: Vec<RuleId>) -> Self {
        Self {
            included: false,
            matched_filters,
            ..Self::included()
        }
    }

    pub(crate) fn record_boost(&mut self, rule_id: &RuleId, weight: i32) {
        self.net_score += i64::from(weight);
        self.matched_boosts.push(Contribution {
            rule_id: rule_id.clone(),
            weight,
        });
    }

    pub(crate) fn record_demote(&mut self, rule_id: &RuleId, weight: i32) {
        self.net_score += i64::from(weight);
        self.matched_demotes.push(Contribution {
            rule_id: rule_id.clone(),
            weight,
        });
    }

    /// Ids of every rule that fired, filters first.
    pub fn fired_rules(&self) -> impl Iterator<Item = &RuleId> {
        self.matched_filters.iter().chain(
            self.matched_boosts
                .iter()
                .chain(self.matched_demotes.iter())
                .map(|c| &c.rule_id),
        )
    }

    /// Whether any rule fired at all.
    pub fn is_untouched(&self) -> bool {
        self.fired_rules().next().is_none()
    }
}

impl Default for Explanation {
    fn default() -> Self {
        Self::included()
    }
}

/// One-line summary for display next to a feed item.
impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.included {
            write!(f, "hidden by filter ")?;
            return write_list(f, self.matched_filters.iter().map(|id| id.to_string()));
        }

        write!(f, "score {:+}", self.net_score)?;
        if self.matched_boosts.is_empty() && self.matched_demotes.is_empty() {
            return write!(f, " (no rules matched)");
        }

        let parts = self
            .matched_boosts
            .iter()
            .map(|c| format!("boost {} {:+}", c.rule_id, c.weight))
            .chain(
                self.matched_demotes
                    .iter()
                    .map(|c| format!("demote {} {:+}", c.rule_id, c.weight)),
            );
        write!(f, ": ")?;
        write_list(f, parts)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, parts: impl Iterator<Item = String>) -> fmt::Result {
    let mut first = true;
    for part in parts {
        if !first {
            write!(f, ", ")?;
        }
        write!(f, "{part}")?;
        first = false;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_contributions() {
        let mut exp = Explanation::included();
        exp.record_boost(&RuleId::from("b1"), 10);
        exp.record_demote(&RuleId::from("d1"), -4);

        assert_eq!(exp.net_score, 6);
        let fired: Vec<&str> = exp.fired_rules().map(RuleId::as_str).collect();
        assert_eq!(fired, vec!["b1", "d1"]);
        assert_eq!(exp.to_string(), "score +6: boost b1 +10, demote d1 -4");
    }

    #[test]
    fn test_excluded_display() {
        let exp = Explanation::excluded(vec![RuleId::from("no-spam")]);
        assert!(!exp.included);
        assert_eq!(exp.net_score, 0);
        assert_eq!(exp.to_string(), "hidden by filter no-spam");
    }

    #[test]
    fn test_untouched() {
        let exp = Explanation::default();
        assert!(exp.is_untouched());
        assert_eq!(exp.to_string(), "score +0 (no rules matched)");
    }
}
