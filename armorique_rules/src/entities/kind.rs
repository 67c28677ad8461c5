//! Character kinds, werewolf ranks and their fixed attributes.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::Capabilities;
use crate::error::SimulationError;
use crate::mechanics::Faction;

/// Pack hierarchy of a werewolf. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Rank {
    Alpha,
    Beta,
    #[default]
    Gamma,
    Omega,
}

impl Rank {
    pub fn combat_bonus(self) -> i32 {
        match self {
            Rank::Alpha => 50,
            Rank::Beta => 30,
            Rank::Gamma => 15,
            Rank::Omega => -20,
        }
    }

    /// Permanent endurance multiplier applied on creation.
    pub fn endurance_multiplier(self) -> f64 {
        match self {
            Rank::Alpha => 1.30,
            Rank::Beta => 1.15,
            Rank::Gamma | Rank::Omega => 1.0,
        }
    }
}

/// The concrete role of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterKind {
    Blacksmith,
    Druid,
    General,
    InnKeeper,
    Legionary,
    Merchant,
    Prefect,
    Werewolf(Rank),
    /// A traveller belonging to no faction.
    Wanderer,
}

impl CharacterKind {
    /// Kinds a leader may recruit.
    pub const RECRUITABLE: [CharacterKind; 8] = [
        CharacterKind::Blacksmith,
        CharacterKind::Druid,
        CharacterKind::General,
        CharacterKind::InnKeeper,
        CharacterKind::Legionary,
        CharacterKind::Merchant,
        CharacterKind::Prefect,
        CharacterKind::Werewolf(Rank::Gamma),
    ];

    pub fn faction(self) -> Faction {
        match self {
            CharacterKind::Blacksmith
            | CharacterKind::Druid
            | CharacterKind::InnKeeper
            | CharacterKind::Merchant => Faction::Gaul,
            CharacterKind::General | CharacterKind::Legionary | CharacterKind::Prefect => {
                Faction::Roman
            }
            CharacterKind::Werewolf(_) => Faction::Fantastic,
            CharacterKind::Wanderer => Faction::Neutral,
        }
    }

    /// Flat bonus added to every blow this kind deals.
    pub fn combat_bonus(self) -> i32 {
        match self {
            CharacterKind::Blacksmith => 30,
            CharacterKind::Druid => 15,
            CharacterKind::Legionary => 20,
            CharacterKind::General => 40,
            CharacterKind::Werewolf(rank) => rank.combat_bonus(),
            CharacterKind::InnKeeper
            | CharacterKind::Merchant
            | CharacterKind::Prefect
            | CharacterKind::Wanderer => 0,
        }
    }

    pub fn capabilities(self) -> Capabilities {
        let none = Capabilities::NONE;
        match self {
            CharacterKind::Blacksmith | CharacterKind::InnKeeper | CharacterKind::Merchant => {
                none.worker()
            }
            CharacterKind::Druid => none.worker().combatant().manager().brewer(),
            CharacterKind::General => none.combatant().manager(),
            CharacterKind::Legionary | CharacterKind::Werewolf(_) => none.combatant(),
            CharacterKind::Prefect => none.manager(),
            CharacterKind::Wanderer => none,
        }
    }

    pub fn rank(self) -> Option<Rank> {
        match self {
            CharacterKind::Werewolf(rank) => Some(rank),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CharacterKind::Blacksmith => "Blacksmith",
            CharacterKind::Druid => "Druid",
            CharacterKind::General => "General",
            CharacterKind::InnKeeper => "InnKeeper",
            CharacterKind::Legionary => "Legionary",
            CharacterKind::Merchant => "Merchant",
            CharacterKind::Prefect => "Prefect",
            CharacterKind::Werewolf(_) => "Werewolf",
            CharacterKind::Wanderer => "Wanderer",
        }
    }
}

impl FromStr for CharacterKind {
    type Err = SimulationError;

    /// Case-insensitive lookup. A bare `werewolf` gets the default rank.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_ascii_lowercase().as_str() {
            "blacksmith" => CharacterKind::Blacksmith,
            "druid" => CharacterKind::Druid,
            "general" => CharacterKind::General,
            "innkeeper" => CharacterKind::InnKeeper,
            "legionary" => CharacterKind::Legionary,
            "merchant" => CharacterKind::Merchant,
            "prefect" => CharacterKind::Prefect,
            "werewolf" => CharacterKind::Werewolf(Rank::default()),
            "wanderer" => CharacterKind::Wanderer,
            _ => return Err(SimulationError::UnknownCharacterKind(s.to_string())),
        };
        Ok(kind)
    }
}

impl std::fmt::Display for CharacterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CharacterKind::Werewolf(rank) => write!(f, "Werewolf ({rank:?})"),
            other => f.write_str(other.name()),
        }
    }
}
