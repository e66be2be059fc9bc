//! Read-only recipe catalog.

use super::types::Recipe;
use crate::rules::{Condition, RuleType};

/// A browsable set of recipes.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// Stock recipes shipped with the feed lab.
    pub fn builtin() -> Self {
        Self::new(vec![
            Recipe::new("hide-spam", "Hide spam", RuleType::Filter)
                .with_description("Removes posts that mention spam or common scam phrases.")
                .with_category("quality")
                .with_condition(Condition::regex("content", r"(?i)\b(spam|free money|click here)\b"))
                .with_popularity(1240)
                .with_tags(["spam", "cleanup"]),
            Recipe::new("boost-verified", "Boost verified authors", RuleType::Boost)
                .with_description("Ranks posts from verified authors higher.")
                .with_category("authors")
                .with_condition(Condition::equals("author", "verified"))
                .with_weight(20)
                .with_popularity(980)
                .with_tags(["authors", "trust"]),
            Recipe::new("trending", "Trending posts", RuleType::Boost)
                .with_description("Lifts posts with more than 100 engagements.")
                .with_category("engagement")
                .with_condition(Condition::gt("engagement", 100.0))
                .with_weight(15)
                .with_popularity(870)
                .with_tags(["engagement", "popular"]),
            Recipe::new("favor-media", "Favor media posts", RuleType::Boost)
                .with_description("Gives posts with images or video a small lift.")
                .with_category("format")
                .with_condition(Condition::equals("has_media", "true"))
                .with_weight(5)
                .with_popularity(410)
                .with_tags(["media"]),
            Recipe::new("bury-stale", "Bury stale posts", RuleType::Demote)
                .with_description("Pushes posts older than three days down the feed.")
                .with_category("freshness")
                .with_condition(Condition::gt("age", 72.0))
                .with_weight(-10)
                .with_popularity(655)
                .with_tags(["freshness", "cleanup"]),
        ])
    }

    /// Recipe by catalog id.
    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Distinct categories in catalog order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for recipe in &self.recipes {
            if !seen.contains(&recipe.category.as_str()) {
                seen.push(&recipe.category);
            }
        }
        seen
    }

    /// Recipes in `category` (case-insensitive).
    pub fn by_category(&self, category: &str) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|recipe| recipe.category.eq_ignore_ascii_case(category))
            .collect()
    }

    /// Recipes carrying `tag` (case-insensitive).
    pub fn with_tag(&self, tag: &str) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|recipe| recipe.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
            .collect()
    }

    /// Case-insensitive match on name, description or tags.
    pub fn search(&self, query: &str) -> Vec<&Recipe> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.recipes.iter().collect();
        }
        self.recipes
            .iter()
            .filter(|recipe| {
                recipe.name.to_lowercase().contains(&needle)
                    || recipe.description.to_lowercase().contains(&needle)
                    || recipe.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// The `n` most popular recipes; equal popularity keeps catalog order.
    pub fn most_popular(&self, n: usize) -> Vec<&Recipe> {
        let mut sorted: Vec<&Recipe> = self.recipes.iter().collect();
        sorted.sort_by(|a, b| b.popularity.cmp(&a.popularity));
        sorted.truncate(n);
        sorted
    }
}

impl<'a> IntoIterator for &'a RecipeCatalog {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentItem;
    use crate::recipe::RecipeInstantiator;
    use crate::scoring::score;

    fn names(recipes: &[&Recipe]) -> Vec<String> {
        recipes.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_lookup_and_categories() {
        let catalog = RecipeCatalog::builtin();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.get("trending").is_some());
        assert!(catalog.get("missing").is_none());
        assert_eq!(
            catalog.categories(),
            vec!["quality", "authors", "engagement", "format", "freshness"]
        );
        assert_eq!(names(&catalog.by_category("Authors")), vec!["boost-verified"]);
    }

    #[test]
    fn test_tags_and_search() {
        let catalog = RecipeCatalog::builtin();
        assert_eq!(
            names(&catalog.with_tag("cleanup")),
            vec!["hide-spam", "bury-stale"]
        );
        assert_eq!(names(&catalog.search("VIDEO")), vec!["favor-media"]);
        assert_eq!(catalog.search("  ").len(), 5);
    }

    #[test]
    fn test_most_popular() {
        let catalog = RecipeCatalog::new(vec![
            Recipe::new("a", "A", RuleType::Boost).with_popularity(5),
            Recipe::new("b", "B", RuleType::Boost).with_popularity(9),
            Recipe::new("c", "C", RuleType::Boost).with_popularity(5),
        ]);
        assert_eq!(names(&catalog.most_popular(2)), vec!["b", "a"]);
        assert_eq!(names(&catalog.most_popular(10)), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_builtin_recipes_score() {
        let catalog = RecipeCatalog::builtin();
        let mut instantiator = RecipeInstantiator::new();
        let rules: Vec<_> = catalog
            .iter()
            .map(|recipe| instantiator.instantiate(recipe).unwrap())
            .collect();

        let spam = ContentItem::new("s").with_text("content", "Click here for FREE MONEY");
        assert!(!score(&spam, &rules).included);

        let good = ContentItem::new("g")
            .with_text("content", "Release notes")
            .with_text("author", "verified")
            .with_number("engagement", 300.0)
            .with_flag("has_media", true)
            .with_number("age", 2.0);
        assert_eq!(score(&good, &rules).net_score, 40);

        let stale = ContentItem::new("o")
            .with_text("content", "Old news")
            .with_number("age", 100.0);
        assert_eq!(score(&stale, &rules).net_score, -10);
    }
}
