//! World state management - locations, battlefields and the theater holding them.

mod battlefield;
mod theater;

pub use battlefield::*;
pub use theater::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::config::HealingConfig;
use crate::entities::{Character, CharacterId};
use crate::error::{SimulationError, SimulationResult};
use crate::food::Food;
use crate::mechanics::{is_allowed, Faction};
use crate::potion::MagicPotion;

/// Unique identifier for locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationId(pub Uuid);

impl LocationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for LocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Location types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationType {
    GaulTown,
    RomanCamp,
    RomanTown,
    GaulRomanVillage,
    Enclosure,
    Battlefield,
}

impl LocationType {
    /// Town-like places where healing herbs grow.
    pub fn grows_herbs(self) -> bool {
        matches!(
            self,
            LocationType::GaulTown | LocationType::RomanTown | LocationType::GaulRomanVillage
        )
    }
}

impl std::fmt::Display for LocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LocationType::GaulTown => "Gaul town",
            LocationType::RomanCamp => "Roman camp",
            LocationType::RomanTown => "Roman town",
            LocationType::GaulRomanVillage => "Gallo-Roman village",
            LocationType::Enclosure => "enclosure",
            LocationType::Battlefield => "battlefield",
        };
        f.write_str(label)
    }
}

/// Why a location turned a character away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("{faction} characters are not allowed in a {location_type}")]
    NotAllowed {
        location_type: LocationType,
        faction: Faction,
    },

    #[error("the character is already there")]
    AlreadyPresent,
}

/// A refused admission. Hands the character back to the caller.
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct Rejected {
    pub character: Character,
    pub reason: RejectReason,
}

impl Rejected {
    pub fn into_character(self) -> Character {
        self.character
    }
}

/// What a targeted heal consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealingSource {
    Herb,
    Food(Food),
}

/// A resident taken out of a location, with what is needed to put it back.
#[derive(Debug)]
pub(crate) struct Departure {
    pub slot: usize,
    pub character: Character,
    pub origin: Option<LocationId>,
}

/// A place in the world holding characters, food and a potion kettle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    id: LocationId,
    name: String,
    area: f64,
    location_type: LocationType,
    characters: Vec<Character>,
    foods: Vec<Food>,
    magic_potion: MagicPotion,
    healing_herbs: u32,
    /// Herb spawn attempts so far.
    turns: u32,
    healing: HealingConfig,
    /// Where tracked residents came from. Only battlefields record entries;
    /// an entry lives exactly as long as its character stays here.
    #[serde(default)]
    origins: HashMap<CharacterId, LocationId>,
}

impl Location {
    pub fn new(name: impl Into<String>, area: f64, location_type: LocationType) -> Self {
        Self {
            id: LocationId::new(),
            name: name.into(),
            area,
            location_type,
            characters: Vec::new(),
            foods: Vec::new(),
            magic_potion: MagicPotion::new(),
            healing_herbs: 0,
            turns: 0,
            healing: HealingConfig::default(),
            origins: HashMap::new(),
        }
    }

    /// Use custom herb cadence and healing amounts.
    pub fn with_healing(mut self, healing: HealingConfig) -> Self {
        self.healing = healing;
        self
    }

    pub fn id(&self) -> LocationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn location_type(&self) -> LocationType {
        self.location_type
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id() == id)
    }

    pub fn contains(&self, id: CharacterId) -> bool {
        self.character(id).is_some()
    }

    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn magic_potion(&self) -> &MagicPotion {
        &self.magic_potion
    }

    pub fn magic_potion_mut(&mut self) -> &mut MagicPotion {
        &mut self.magic_potion
    }

    pub fn healing_herbs(&self) -> u32 {
        self.healing_herbs
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Whether this location's admission rule lets the character in.
    pub fn admits(&self, character: &Character) -> bool {
        is_allowed(self.location_type, character.faction())
    }

    /// Admit a character, or hand it back with the reason it was refused.
    pub fn add_character(&mut self, character: Character) -> Result<(), Rejected> {
        if !self.admits(&character) {
            let reason = RejectReason::NotAllowed {
                location_type: self.location_type,
                faction: character.faction(),
            };
            return Err(Rejected { character, reason });
        }
        if self.contains(character.id()) {
            return Err(Rejected {
                character,
                reason: RejectReason::AlreadyPresent,
            });
        }
        debug!(location = %self.name, character = %character.name(), "character admitted");
        self.characters.push(character);
        Ok(())
    }

    /// Remove a resident. `None` if the character is not here.
    ///
    /// Any origin tracked for the character is forgotten.
    pub fn remove_character(&mut self, id: CharacterId) -> Option<Character> {
        self.take_character(id).map(|departure| departure.character)
    }

    /// Remove a resident, remembering its roster slot and tracked origin.
    pub(crate) fn take_character(&mut self, id: CharacterId) -> Option<Departure> {
        let slot = self.characters.iter().position(|c| c.id() == id)?;
        let character = self.characters.remove(slot);
        let origin = self.origins.remove(&id);
        debug!(location = %self.name, character = %character.name(), "character left");
        Some(Departure {
            slot,
            character,
            origin,
        })
    }

    /// Undo a [`Location::take_character`] without the admission check.
    pub(crate) fn restore_character(&mut self, departure: Departure) {
        let Departure {
            slot,
            character,
            origin,
        } = departure;
        if let Some(origin) = origin {
            self.origins.insert(character.id(), origin);
        }
        let slot = slot.min(self.characters.len());
        self.characters.insert(slot, character);
    }

    /// Admit a character and remember where it came from.
    pub(crate) fn add_tracked_character(
        &mut self,
        character: Character,
        origin: LocationId,
    ) -> Result<(), Rejected> {
        let id = character.id();
        self.add_character(character)?;
        self.origins.insert(id, origin);
        Ok(())
    }

    pub(crate) fn origin_of(&self, id: CharacterId) -> Option<LocationId> {
        self.origins.get(&id).copied()
    }

    /// Remove every living tracked resident along with its origin and
    /// forget all tracking.
    pub(crate) fn release_tracked(&mut self) -> Vec<(Character, LocationId)> {
        let origins = std::mem::take(&mut self.origins);
        let (leaving, staying): (Vec<_>, Vec<_>) = std::mem::take(&mut self.characters)
            .into_iter()
            .partition(|c| c.is_alive() && origins.contains_key(&c.id()));
        self.characters = staying;
        leaving
            .into_iter()
            .filter_map(|c| origins.get(&c.id()).copied().map(|origin| (c, origin)))
            .collect()
    }

    /// Remove every dead resident, forgetting their tracking.
    pub(crate) fn remove_dead(&mut self) -> Vec<Character> {
        let (dead, living): (Vec<_>, Vec<_>) = std::mem::take(&mut self.characters)
            .into_iter()
            .partition(|c| c.is_dead());
        self.characters = living;
        for character in &dead {
            self.origins.remove(&character.id());
        }
        dead
    }

    pub fn add_food(&mut self, food: Food) {
        self.foods.push(food);
    }

    /// Remove the first item of the given kind.
    pub fn remove_food(&mut self, food: Food) -> bool {
        match self.foods.iter().position(|f| *f == food) {
            Some(index) => {
                self.foods.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn add_healing_herbs(&mut self, amount: u32) {
        self.healing_herbs += amount;
    }

    /// Heal every living resident. Returns how many were healed.
    pub fn heal_characters(&mut self, amount: f64) -> usize {
        self.characters
            .iter_mut()
            .filter_map(|character| character.heal(amount).ok())
            .count()
    }

    /// Heal one resident with a herb, or failing that with the first food item.
    pub fn heal_character(&mut self, id: CharacterId) -> SimulationResult<HealingSource> {
        let index = self
            .characters
            .iter()
            .position(|c| c.id() == id)
            .ok_or(SimulationError::UnknownCharacter(id))?;
        if self.characters[index].is_dead() {
            return Err(SimulationError::CharacterDead {
                name: self.characters[index].name().to_string(),
            });
        }

        let (source, amount) = if self.healing_herbs > 0 {
            self.healing_herbs -= 1;
            (HealingSource::Herb, self.healing.herb_heal)
        } else if !self.foods.is_empty() {
            let food = self.foods.remove(0);
            (HealingSource::Food(food), self.healing.food_heal)
        } else {
            return Err(SimulationError::NoHealingResources {
                location: self.name.clone(),
            });
        };

        self.characters[index].heal(amount)?;
        Ok(source)
    }

    /// Hand out food to the living in roster order; whoever gets nothing
    /// goes hungry. The dead are skipped.
    ///
    /// Does nothing when there are no residents or no food at all.
    pub fn feed_characters(&mut self) {
        if self.characters.is_empty() || self.foods.is_empty() {
            return;
        }
        for character in self.characters.iter_mut().filter(|c| c.is_alive()) {
            if self.foods.is_empty() {
                character.make_hungry();
            } else {
                let food = self.foods.remove(0);
                character.eat(food);
            }
        }
    }

    /// Advance the herb clock; town-like locations grow herbs on every
    /// `herb_spawn_interval`-th turn. Returns whether herbs appeared.
    pub fn spawn_herbs_if_needed(&mut self) -> bool {
        self.turns += 1;
        let interval = self.healing.herb_spawn_interval.max(1);
        if !self.location_type.grows_herbs() || self.turns % interval != 0 {
            return false;
        }
        self.healing_herbs += self.healing.herb_spawn_amount;
        debug!(location = %self.name, herbs = self.healing_herbs, "healing herbs spawned");
        true
    }

    /// Have a resident drink from this location's kettle.
    pub fn make_character_drink(&mut self, id: CharacterId) -> SimulationResult<bool> {
        let character = self
            .characters
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or(SimulationError::UnknownCharacter(id))?;
        Ok(character.drink_potion(&mut self.magic_potion))
    }

    /// Hurt every hungry resident. Returns how many were hurt.
    pub(crate) fn apply_hunger_damage(&mut self, amount: f64) -> usize {
        let mut hurt = 0;
        for character in self.characters.iter_mut().filter(|c| c.is_alive() && c.is_hungry()) {
            character.take_damage(amount);
            hurt += 1;
        }
        hurt
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Location: {} ({})", self.name, self.location_type)?;
        writeln!(f, "Area: {}", self.area)?;
        writeln!(f, "Healing herbs: {}", self.healing_herbs)?;
        writeln!(f, "Potion portions: {}", self.magic_potion.portions())?;
        writeln!(f, "Characters ({}):", self.characters.len())?;
        for character in &self.characters {
            writeln!(f, " - {character}")?;
        }
        writeln!(f, "Foods ({}):", self.foods.len())?;
        for food in &self.foods {
            writeln!(f, " - {food}")?;
        }
        Ok(())
    }
}
