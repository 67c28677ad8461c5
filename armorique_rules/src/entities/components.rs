//! Component definitions for characters.

use serde::{Deserialize, Serialize};

use crate::mechanics::{BASE_ENDURANCE, DEFAULT_MAX_HEALTH, MAX_HUNGER_INDICATOR};

/// Vital statistics of a character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vitals {
    /// Fixed at creation; drives combat damage.
    pub strength: f64,
    /// Reduces incoming damage.
    pub endurance: f64,
    pub health: f64,
    pub max_health: f64,
    /// 0..=100, 100 means fully fed.
    pub hunger_indicator: f64,
}

impl Vitals {
    pub fn new(strength: f64) -> Self {
        Self {
            strength,
            ..Default::default()
        }
    }
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            strength: 0.5,
            endurance: BASE_ENDURANCE,
            health: DEFAULT_MAX_HEALTH,
            max_health: DEFAULT_MAX_HEALTH,
            hunger_indicator: MAX_HUNGER_INDICATOR,
        }
    }
}

/// What a character kind is able to do.
///
/// A single kind may hold several capabilities at once (a druid works,
/// fights, manages and brews).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    pub worker: bool,
    pub combatant: bool,
    pub manager: bool,
    /// Can brew the magic potion.
    pub brewer: bool,
}

impl Capabilities {
    pub const NONE: Capabilities = Capabilities {
        worker: false,
        combatant: false,
        manager: false,
        brewer: false,
    };

    pub const fn worker(mut self) -> Self {
        self.worker = true;
        self
    }

    pub const fn combatant(mut self) -> Self {
        self.combatant = true;
        self
    }

    pub const fn manager(mut self) -> Self {
        self.manager = true;
        self
    }

    pub const fn brewer(mut self) -> Self {
        self.brewer = true;
        self
    }
}
