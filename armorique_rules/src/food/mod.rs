//! Food catalog: every consumable item and its static classification.

use serde::{Deserialize, Serialize};

/// A consumable item. Items are value tokens without identity; a location
/// holds an ordered sequence of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Food {
    BeetJuice,
    Carrot,
    FairlyFreshFish,
    FreshFourLeafClover,
    Honey,
    IdefixHair,
    Lobster,
    Mead,
    Mistletoe,
    NotFreshFish,
    NotFreshFourLeafClover,
    RockOil,
    Salt,
    SecretIngredient,
    Strawberry,
    TwoHeadedUnicornMilk,
    WildBoar,
    Wine,
}

impl Food {
    /// Every food kind, in declaration order.
    pub const ALL: [Food; 18] = [
        Food::BeetJuice,
        Food::Carrot,
        Food::FairlyFreshFish,
        Food::FreshFourLeafClover,
        Food::Honey,
        Food::IdefixHair,
        Food::Lobster,
        Food::Mead,
        Food::Mistletoe,
        Food::NotFreshFish,
        Food::NotFreshFourLeafClover,
        Food::RockOil,
        Food::Salt,
        Food::SecretIngredient,
        Food::Strawberry,
        Food::TwoHeadedUnicornMilk,
        Food::WildBoar,
        Food::Wine,
    ];

    pub fn is_vegetable(self) -> bool {
        matches!(self, Food::Carrot | Food::Strawberry | Food::BeetJuice)
    }

    pub fn is_drink(self) -> bool {
        matches!(
            self,
            Food::Honey | Food::RockOil | Food::Wine | Food::Mead | Food::TwoHeadedUnicornMilk
        )
    }

    /// Spoiled food.
    pub fn is_bad(self) -> bool {
        matches!(self, Food::NotFreshFourLeafClover | Food::NotFreshFish)
    }

    /// Whether this item is one of the nine magic potion recipe ingredients.
    pub fn is_recipe_ingredient(self) -> bool {
        crate::potion::RECIPE_INGREDIENTS.contains(&self)
    }

    /// Display name used in location scans.
    pub fn label(self) -> &'static str {
        match self {
            Food::BeetJuice => "beet juice",
            Food::Carrot => "carrot",
            Food::FairlyFreshFish => "fairly fresh fish",
            Food::FreshFourLeafClover => "fresh four-leaf clover",
            Food::Honey => "honey",
            Food::IdefixHair => "Idefix hair",
            Food::Lobster => "lobster",
            Food::Mead => "mead",
            Food::Mistletoe => "mistletoe",
            Food::NotFreshFish => "not fresh fish",
            Food::NotFreshFourLeafClover => "not fresh four-leaf clover",
            Food::RockOil => "rock oil",
            Food::Salt => "salt",
            Food::SecretIngredient => "secret ingredient",
            Food::Strawberry => "strawberry",
            Food::TwoHeadedUnicornMilk => "two-headed unicorn milk",
            Food::WildBoar => "wild boar",
            Food::Wine => "wine",
        }
    }
}

impl std::fmt::Display for Food {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
