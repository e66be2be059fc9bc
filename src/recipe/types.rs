//! Recipe template.

use crate::rules::{Condition, Rule, RuleId, RuleType};

/// A read-only rule template.
///
/// Instantiating a recipe never mutates it; each instantiation yields an
/// independent [`Rule`] with its own id.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recipe {
    /// Catalog key. Not the id of rules built from it.
    pub id: String,
    /// Copied into the rule's name.
    pub name: String,
    pub description: String,
    /// Browsing group, e.g. "quality" or "freshness".
    pub category: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub rule_type: RuleType,
    /// Copied into the rule unchanged.
    pub conditions: Vec<Condition>,
    /// Copied into the rule; ignored for filter recipes.
    pub weight: i32,
    /// How many users applied this recipe; drives catalog ordering.
    pub popularity: u32,
    /// Free-form labels used by catalog search.
    pub tags: Vec<String>,
}

impl Recipe {
    /// Template with no conditions, zero weight and no metadata.
    pub fn new(id: impl Into<String>, name: impl Into<String>, rule_type: RuleType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: String::new(),
            rule_type,
            conditions: Vec::new(),
            weight: 0,
            popularity: 0,
            tags: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Appends a condition to the template.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_popularity(mut self, popularity: u32) -> Self {
        self.popularity = popularity;
        self
    }

    /// Replaces the tag list.
    pub fn with_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Builds an enabled rule from this template under `id`.
    pub fn to_rule(&self, id: RuleId) -> Rule {
        Rule {
            id,
            name: self.name.clone(),
            rule_type: self.rule_type.clone(),
            weight: self.weight,
            conditions: self.conditions.clone(),
            enabled: true,
        }
    }
}
