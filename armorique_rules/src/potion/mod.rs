//! The magic potion kettle.
//!
//! A batch moves through two states:
//!
//! - **Collecting** (`portions == 0`): ingredients are accepted until every
//!   recipe ingredient has been supplied once. The moment the last one is
//!   accepted the kettle fills.
//! - **Ready** (`portions > 0`): each [`MagicPotion::take_a_potion`] drinks one
//!   portion. Drinking the last one clears the batch effects and reopens
//!   collection.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{SimulationError, SimulationResult};
use crate::food::Food;

/// Portions produced by one full recipe.
pub const KETTLE_VALUE: u32 = 10;

/// The nine ingredients of one full recipe.
pub const RECIPE_INGREDIENTS: [Food; 9] = [
    Food::Mistletoe,
    Food::Carrot,
    Food::Salt,
    Food::FreshFourLeafClover,
    Food::FairlyFreshFish,
    Food::RockOil,
    Food::Honey,
    Food::Mead,
    Food::SecretIngredient,
];

/// Stands in for [`SUBSTITUTED_INGREDIENT`].
pub const ALTERNATIVE_INGREDIENT: Food = Food::BeetJuice;
pub const SUBSTITUTED_INGREDIENT: Food = Food::RockOil;

pub const DUPLICATION_INGREDIENT: Food = Food::TwoHeadedUnicornMilk;
pub const METAMORPHOSIS_INGREDIENT: Food = Food::IdefixHair;
pub const NUTRITION_INGREDIENTS: [Food; 2] = [Food::Strawberry, Food::Lobster];

/// Bonus effects a batch can carry. Each is added at most once per batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PotionEffect {
    Metamorphosis,
    Duplication,
    Nutritious,
}

impl PotionEffect {
    /// The effect triggered by an ingredient, if any.
    pub fn triggered_by(food: Food) -> Option<Self> {
        if food == METAMORPHOSIS_INGREDIENT {
            Some(PotionEffect::Metamorphosis)
        } else if food == DUPLICATION_INGREDIENT {
            Some(PotionEffect::Duplication)
        } else if NUTRITION_INGREDIENTS.contains(&food) {
            Some(PotionEffect::Nutritious)
        } else {
            None
        }
    }
}

impl std::fmt::Display for PotionEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PotionEffect::Metamorphosis => "metamorphosis",
            PotionEffect::Duplication => "duplication",
            PotionEffect::Nutritious => "nutritious",
        };
        f.write_str(label)
    }
}

/// How the kettle took an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngredientOutcome {
    /// A missing recipe ingredient was supplied.
    Accepted,
    /// The alternative ingredient covered for another one.
    Substituted { replaced: Food },
    /// A trigger ingredient added a bonus effect.
    EffectAdded(PotionEffect),
    /// The kettle has no use for this item right now.
    NotNeeded,
}

impl IngredientOutcome {
    pub fn is_accepted(self) -> bool {
        self != IngredientOutcome::NotNeeded
    }
}

/// Potion kettle owned by a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MagicPotion {
    /// Recipe ingredients not yet supplied in the current batch, in recipe order.
    missing: Vec<Food>,
    portions: u32,
    metamorphosis: bool,
    duplication: bool,
    nutritious: bool,
}

impl Default for MagicPotion {
    fn default() -> Self {
        Self::new()
    }
}

impl MagicPotion {
    pub fn new() -> Self {
        Self {
            missing: RECIPE_INGREDIENTS.to_vec(),
            portions: 0,
            metamorphosis: false,
            duplication: false,
            nutritious: false,
        }
    }

    pub fn recipe_ingredients(&self) -> &'static [Food] {
        &RECIPE_INGREDIENTS
    }

    pub fn missing_ingredients(&self) -> &[Food] {
        &self.missing
    }

    pub fn kettle_value(&self) -> u32 {
        KETTLE_VALUE
    }

    pub fn portions(&self) -> u32 {
        self.portions
    }

    pub fn is_kettle_empty(&self) -> bool {
        self.portions == 0
    }

    pub fn has_effect(&self, effect: PotionEffect) -> bool {
        match effect {
            PotionEffect::Metamorphosis => self.metamorphosis,
            PotionEffect::Duplication => self.duplication,
            PotionEffect::Nutritious => self.nutritious,
        }
    }

    fn effect_flag(&mut self, effect: PotionEffect) -> &mut bool {
        match effect {
            PotionEffect::Metamorphosis => &mut self.metamorphosis,
            PotionEffect::Duplication => &mut self.duplication,
            PotionEffect::Nutritious => &mut self.nutritious,
        }
    }

    /// Offer an ingredient to the kettle, reporting why it was refused.
    ///
    /// Fails with [`SimulationError::KettleNotEmpty`] while portions remain and
    /// with [`SimulationError::EffectAlreadyApplied`] when a trigger ingredient
    /// is supplied twice in one batch. Neither failure changes any state.
    pub fn try_add_ingredient(&mut self, food: Food) -> SimulationResult<IngredientOutcome> {
        if !self.is_kettle_empty() {
            return Err(SimulationError::KettleNotEmpty);
        }

        let outcome = if let Some(effect) = PotionEffect::triggered_by(food) {
            let flag = self.effect_flag(effect);
            if *flag {
                return Err(SimulationError::EffectAlreadyApplied { effect });
            }
            *flag = true;
            IngredientOutcome::EffectAdded(effect)
        } else if food == ALTERNATIVE_INGREDIENT {
            if self.take_missing(SUBSTITUTED_INGREDIENT) {
                IngredientOutcome::Substituted {
                    replaced: SUBSTITUTED_INGREDIENT,
                }
            } else {
                IngredientOutcome::NotNeeded
            }
        } else if self.take_missing(food) {
            IngredientOutcome::Accepted
        } else {
            IngredientOutcome::NotNeeded
        };

        if outcome.is_accepted() {
            debug!(%food, missing = self.missing.len(), "ingredient added to kettle");
            self.check_if_full_recipe();
        }
        Ok(outcome)
    }

    /// Offer an ingredient to the kettle. Returns whether it was taken.
    pub fn add_to_current_recipes(&mut self, food: Food) -> bool {
        matches!(self.try_add_ingredient(food), Ok(outcome) if outcome.is_accepted())
    }

    fn take_missing(&mut self, food: Food) -> bool {
        match self.missing.iter().position(|missing| *missing == food) {
            Some(index) => {
                self.missing.remove(index);
                true
            }
            None => false,
        }
    }

    /// Fill the kettle once nothing is missing. Returns whether it filled.
    fn check_if_full_recipe(&mut self) -> bool {
        if !self.missing.is_empty() {
            return false;
        }
        self.missing = RECIPE_INGREDIENTS.to_vec();
        self.portions = KETTLE_VALUE;
        info!(portions = self.portions, "magic potion batch ready");
        true
    }

    /// Drink one portion. The last portion of a batch clears its effects.
    pub fn take_a_potion(&mut self) -> bool {
        if self.is_kettle_empty() {
            return false;
        }
        if self.portions == 1 {
            self.metamorphosis = false;
            self.duplication = false;
            self.nutritious = false;
        }
        self.portions -= 1;
        true
    }

    /// Keep only the recipe ingredients from `foods`, preserving order.
    pub fn sort_foods(&self, foods: &[Food]) -> Vec<Food> {
        foods
            .iter()
            .copied()
            .filter(|food| RECIPE_INGREDIENTS.contains(food))
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn filled() -> Self {
        let mut potion = Self::new();
        for food in RECIPE_INGREDIENTS {
            potion.add_to_current_recipes(food);
        }
        potion
    }
}
