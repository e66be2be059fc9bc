//! Recipes: reusable rule templates.
//!
//! A [`Recipe`] is read-only. [`RecipeInstantiator`] turns it into a new
//! [`Rule`](crate::rules::Rule) with a fresh id, copying its type, weight
//! and conditions; the same recipe can be applied any number of times.

mod catalog;
mod ids;
mod instantiator;
mod types;

pub use catalog::RecipeCatalog;
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use instantiator::RecipeInstantiator;
pub use types::Recipe;
