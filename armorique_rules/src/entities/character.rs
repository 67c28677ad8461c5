//! Character definitions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Capabilities, CharacterId, CharacterKind, Rank, Sex, Vitals};
use crate::error::{SimulationError, SimulationResult};
use crate::food::Food;
use crate::mechanics::{
    combat_damage, Faction, PotionState, EAT_STEP, HUNGER_STEP, HUNGRY_THRESHOLD,
    MAX_HUNGER_INDICATOR,
};
use crate::potion::MagicPotion;

/// A character living in the simulated world.
///
/// Identity (name, sex, height, age, kind) is fixed at creation. A character
/// is never destroyed, only marked dead; dead characters stay in their
/// location until explicitly removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    id: CharacterId,
    name: String,
    sex: Sex,
    height: f64,
    age: u32,
    kind: CharacterKind,
    vitals: Vitals,
    magic_potion_level: u32,
    dead: bool,
}

impl Character {
    /// Create a character of the given kind.
    ///
    /// Werewolf ranks permanently scale endurance here.
    pub fn new(
        kind: CharacterKind,
        name: impl Into<String>,
        sex: Sex,
        height: f64,
        age: u32,
        strength: f64,
    ) -> Self {
        let mut vitals = Vitals::new(strength);
        if let Some(rank) = kind.rank() {
            vitals.endurance *= rank.endurance_multiplier();
        }

        Self {
            id: CharacterId::new(),
            name: name.into(),
            sex,
            height,
            age,
            kind,
            vitals,
            magic_potion_level: 0,
            dead: false,
        }
    }

    /// Create a werewolf of the given rank.
    pub fn werewolf(
        name: impl Into<String>,
        sex: Sex,
        height: f64,
        age: u32,
        strength: f64,
        rank: Rank,
    ) -> Self {
        Self::new(CharacterKind::Werewolf(rank), name, sex, height, age, strength)
    }

    /// Factory lookup by type name, e.g. `"Druid"` or `"innkeeper"`.
    pub fn from_kind_name(
        kind: &str,
        name: impl Into<String>,
        sex: Sex,
        height: f64,
        age: u32,
        strength: f64,
    ) -> SimulationResult<Self> {
        let kind = kind.parse::<CharacterKind>()?;
        Ok(Self::new(kind, name, sex, height, age, strength))
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn kind(&self) -> CharacterKind {
        self.kind
    }

    pub fn faction(&self) -> Faction {
        self.kind.faction()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.kind.capabilities()
    }

    pub fn combat_bonus(&self) -> i32 {
        self.kind.combat_bonus()
    }

    pub fn strength(&self) -> f64 {
        self.vitals.strength
    }

    pub fn endurance(&self) -> f64 {
        self.vitals.endurance
    }

    pub fn set_endurance(&mut self, endurance: f64) {
        self.vitals.endurance = endurance;
    }

    pub fn health(&self) -> f64 {
        self.vitals.health
    }

    pub fn max_health(&self) -> f64 {
        self.vitals.max_health
    }

    pub fn hunger_indicator(&self) -> f64 {
        self.vitals.hunger_indicator
    }

    pub fn is_hungry(&self) -> bool {
        self.vitals.hunger_indicator < HUNGRY_THRESHOLD
    }

    pub fn magic_potion_level(&self) -> u32 {
        self.magic_potion_level
    }

    pub fn potion_state(&self) -> PotionState {
        PotionState::from_level(self.magic_potion_level)
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    /// Strike the defender once. Nothing happens if either side is dead.
    pub fn fight(&self, defender: &mut Character) {
        if self.dead || defender.dead {
            return;
        }
        let damage = combat_damage(self, defender);
        debug!(attacker = %self.name, defender = %defender.name, damage, "blow dealt");
        defender.take_damage(damage);
    }

    /// Lose health, clamped at zero. Reaching zero kills the character.
    /// Negative or NaN amounts count as zero.
    pub fn take_damage(&mut self, amount: f64) {
        if self.dead {
            return;
        }
        let amount = amount.max(0.0);
        self.vitals.health = (self.vitals.health - amount).max(0.0);
        if self.vitals.health <= 0.0 {
            self.die();
        }
    }

    /// Regain health, capped at the maximum. Negative or NaN amounts count
    /// as zero.
    pub fn heal(&mut self, amount: f64) -> SimulationResult<()> {
        if self.dead {
            return Err(SimulationError::CharacterDead {
                name: self.name.clone(),
            });
        }
        let amount = amount.max(0.0);
        self.vitals.health = (self.vitals.health + amount).min(self.vitals.max_health);
        Ok(())
    }

    /// Eat one food item. The dead do not eat.
    pub fn eat(&mut self, food: Food) {
        if self.dead {
            return;
        }
        self.vitals.hunger_indicator =
            (self.vitals.hunger_indicator + EAT_STEP).min(MAX_HUNGER_INDICATOR);
        debug!(character = %self.name, %food, hunger = self.vitals.hunger_indicator, "ate");
    }

    pub fn make_hungry(&mut self) {
        self.vitals.hunger_indicator = (self.vitals.hunger_indicator - HUNGER_STEP).max(0.0);
    }

    /// Drink one portion from the kettle. Returns whether a portion was drunk.
    pub fn drink_potion(&mut self, potion: &mut MagicPotion) -> bool {
        if self.dead {
            return false;
        }
        if potion.take_a_potion() {
            self.magic_potion_level += 1;
            debug!(character = %self.name, level = self.magic_potion_level, "drank magic potion");
            true
        } else {
            false
        }
    }

    /// Mark the character dead. Idempotent.
    pub fn die(&mut self) {
        if !self.dead {
            debug!(character = %self.name, "died");
        }
        self.vitals.health = 0.0;
        self.dead = true;
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] | health={} | hungry={}",
            self.name,
            self.kind,
            self.vitals.health,
            self.is_hungry()
        )?;
        if self.dead {
            f.write_str(" | dead")?;
        }
        Ok(())
    }
}
