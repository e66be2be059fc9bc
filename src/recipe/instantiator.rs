//! Recipe instantiation.

use tracing::debug;

use super::ids::{IdGenerator, RandomIds};
use super::types::Recipe;
use crate::error::{Error, Result};
use crate::rules::{Rule, RuleId, RuleSet};

/// Fresh ids drawn before [`RecipeInstantiator::apply`] gives up.
const MAX_ID_ATTEMPTS: usize = 16;

/// Expands recipes into concrete rules with fresh ids.
///
/// # Examples
///
/// ```
/// use feedlab::recipe::{Recipe, RecipeInstantiator, SequentialIds};
/// use feedlab::rules::{Condition, RuleSet, RuleType};
///
/// let recipe = Recipe::new("verified", "Boost verified authors", RuleType::Boost)
///     .with_condition(Condition::equals("author", "verified"))
///     .with_weight(20);
///
/// let mut rules = RuleSet::new();
/// let mut instantiator = RecipeInstantiator::with_generator(SequentialIds::new("rule-"));
/// let first = instantiator.apply(&recipe, &mut rules)?;
/// let second = instantiator.apply(&recipe, &mut rules)?;
///
/// assert_ne!(first, second);
/// assert_eq!(rules.len(), 2);
/// # Ok::<(), feedlab::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RecipeInstantiator<G = RandomIds> {
    ids: G,
}

impl RecipeInstantiator<RandomIds> {
    /// Creates an instantiator drawing random ids.
    pub fn new() -> Self {
        Self::with_generator(RandomIds::new())
    }
}

impl Default for RecipeInstantiator<RandomIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> RecipeInstantiator<G> {
    pub fn with_generator(ids: G) -> Self {
        Self { ids }
    }

    /// Creates a new enabled rule from `recipe` with a fresh id.
    ///
    /// Fails with [`Error::IdsDepleted`] once the generator runs out.
    pub fn instantiate(&mut self, recipe: &Recipe) -> Result<Rule> {
        let id = self.next_id()?;
        Ok(recipe.to_rule(id))
    }

    fn next_id(&mut self) -> Result<RuleId> {
        self.ids.next_id().ok_or(Error::IdsDepleted)
    }

    /// Instantiates `recipe` and appends the rule to `rules`.
    ///
    /// Draws another id if the generated one is already taken.
    pub fn apply(&mut self, recipe: &Recipe, rules: &mut RuleSet) -> Result<RuleId> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.next_id()?;
            if rules.contains(&id) {
                debug!(rule = %id, "generated rule id already in use, drawing another");
                continue;
            }
            rules.add(recipe.to_rule(id.clone()))?;
            debug!(recipe = %recipe.id, rule = %id, "recipe applied");
            return Ok(id);
        }
        Err(Error::IdExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }
}
