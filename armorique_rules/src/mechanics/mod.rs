//! Game mechanics: factions, combat damage, admission rules and potion thresholds.

use serde::{Deserialize, Serialize};

use crate::entities::Character;
use crate::world_state::LocationType;

/// Converts the decimal strength stat into combat damage.
pub const STRENGTH_MULTIPLIER: f64 = 100.0;

/// Every blow deals at least this much damage.
pub const MIN_DAMAGE: f64 = 1.0;

/// Default maximum health of a freshly created character.
pub const DEFAULT_MAX_HEALTH: f64 = 100.0;

/// Default endurance before rank modifiers.
pub const BASE_ENDURANCE: f64 = 100.0;

/// Hunger indicator of a fully fed character.
pub const MAX_HUNGER_INDICATOR: f64 = 100.0;

/// Satiety gained per eaten item.
pub const EAT_STEP: f64 = 20.0;

/// Satiety lost when a character goes without food.
pub const HUNGER_STEP: f64 = 30.0;

/// Below this indicator a character counts as hungry.
pub const HUNGRY_THRESHOLD: f64 = 50.0;

/// Drinks needed before the potion effect becomes permanent.
pub const AMOUNT_FOR_PERMANENT_EFFECT: u32 = 10;

/// Drinks after which the character turns into a granite statue.
pub const AMOUNT_FOR_STATUE_EFFECT: u32 = 20;

/// Admission and combat category of a character.
///
/// Assigned once per character kind; never derived from names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Gaul,
    Roman,
    /// Lycanthropes and other fantastic creatures.
    Fantastic,
    /// Belongs to no side. Admitted only on battlefields.
    Neutral,
}

impl Faction {
    /// Gauls and Romans oppose each other; everyone else opposes nobody.
    pub fn opposes(self, other: Faction) -> bool {
        matches!(
            (self, other),
            (Faction::Gaul, Faction::Roman) | (Faction::Roman, Faction::Gaul)
        )
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Faction::Gaul => "Gaul",
            Faction::Roman => "Roman",
            Faction::Fantastic => "Fantastic",
            Faction::Neutral => "Neutral",
        };
        f.write_str(label)
    }
}

/// Whether a location of the given type admits a member of the faction.
pub fn is_allowed(location_type: LocationType, faction: Faction) -> bool {
    use Faction::*;

    match location_type {
        LocationType::GaulTown => matches!(faction, Gaul | Fantastic),
        LocationType::RomanCamp | LocationType::RomanTown => matches!(faction, Roman | Fantastic),
        LocationType::GaulRomanVillage => matches!(faction, Gaul | Roman),
        LocationType::Enclosure => faction == Fantastic,
        LocationType::Battlefield => true,
    }
}

/// Damage the attacker deals to the defender in one blow.
///
/// `max(1, floor(strength * 100 - endurance / 2 + combat_bonus))`
pub fn combat_damage(attacker: &Character, defender: &Character) -> f64 {
    let raw = attacker.strength() * STRENGTH_MULTIPLIER - defender.endurance() / 2.0
        + f64::from(attacker.combat_bonus());
    raw.floor().max(MIN_DAMAGE)
}

/// What the accumulated potion drinks have done to a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PotionState {
    Normal,
    PermanentEffect,
    GraniteStatue,
}

impl PotionState {
    pub fn from_level(level: u32) -> Self {
        if level >= AMOUNT_FOR_STATUE_EFFECT {
            PotionState::GraniteStatue
        } else if level >= AMOUNT_FOR_PERMANENT_EFFECT {
            PotionState::PermanentEffect
        } else {
            PotionState::Normal
        }
    }
}
