//! The clan leader and the orders it gives at its current location.
//!
//! A [`ClanLeader`] only remembers which location it stands in. To act it is
//! bound to a theater with [`ClanLeader::bind`], which yields a
//! [`LeaderSession`] borrowing both for the duration of the orders.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use armorique_rules::{
    is_allowed, Character, CharacterId, CharacterKind, Food, LeaderConfig, Location, LocationId,
    Sex, Theater,
};

use crate::error::{LeaderError, LeaderResult};

/// Names handed out to new recruits.
pub const RECRUIT_NAMES: [&str; 11] = [
    "Aelia", "Cassius", "Livia", "Marcus", "Tara", "Gwen", "Ulric", "Serena", "Hadrian", "Lucius",
    "Freya",
];

/// A privileged actor that is not itself a character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClanLeader {
    name: String,
    sex: Sex,
    age: u32,
    location: Option<LocationId>,
    heal_amount: f64,
}

impl ClanLeader {
    pub fn new(name: impl Into<String>, sex: Sex, age: u32) -> Self {
        Self {
            name: name.into(),
            sex,
            age,
            location: None,
            heal_amount: LeaderConfig::default().heal_amount,
        }
    }

    pub fn with_config(mut self, config: &LeaderConfig) -> Self {
        self.heal_amount = config.heal_amount;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn location(&self) -> Option<LocationId> {
        self.location
    }

    pub fn set_location(&mut self, location: Option<LocationId>) {
        self.location = location;
    }

    /// Bind the leader to a theater for a series of orders.
    pub fn bind<'a>(&'a mut self, theater: &'a mut Theater) -> LeaderSession<'a> {
        LeaderSession {
            leader: self,
            theater,
        }
    }
}

/// Everything needed to create one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterData {
    pub kind: CharacterKind,
    pub name: String,
    pub sex: Sex,
    pub height: f64,
    pub age: u32,
    pub strength: f64,
}

impl CharacterData {
    pub fn into_character(self) -> Character {
        Character::new(
            self.kind,
            self.name,
            self.sex,
            self.height,
            self.age,
            self.strength,
        )
    }
}

/// Result of a brewing attempt that had a druid to work with.
///
/// Matched ingredients are taken from the location's food either way; an
/// incomplete attempt does not give them back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Brew {
    /// The recipe completed and the kettle is full.
    Brewed { consumed: Vec<Food> },
    /// The food ran out before the recipe completed.
    Incomplete { consumed: Vec<Food> },
}

impl Brew {
    pub fn is_brewed(&self) -> bool {
        matches!(self, Brew::Brewed { .. })
    }

    pub fn consumed(&self) -> &[Food] {
        match self {
            Brew::Brewed { consumed } | Brew::Incomplete { consumed } => consumed,
        }
    }
}

/// A leader bound to the theater it gives orders in.
pub struct LeaderSession<'a> {
    leader: &'a mut ClanLeader,
    theater: &'a mut Theater,
}

impl<'a> LeaderSession<'a> {
    pub fn leader(&self) -> &ClanLeader {
        self.leader
    }

    pub fn theater(&self) -> &Theater {
        self.theater
    }

    /// The location the leader stands in.
    pub fn here(&self) -> LeaderResult<&Location> {
        let id = self.leader.location.ok_or(LeaderError::NoLocation)?;
        self.theater.location(id).ok_or(LeaderError::NoLocation)
    }

    fn here_mut(&mut self) -> LeaderResult<&mut Location> {
        let id = self.leader.location.ok_or(LeaderError::NoLocation)?;
        self.theater.location_mut(id).ok_or(LeaderError::NoLocation)
    }

    /// Heal every living resident by the configured amount.
    pub fn heal_characters(&mut self) -> LeaderResult<usize> {
        let amount = self.leader.heal_amount;
        let location = self.here_mut()?;
        let healed = location.heal_characters(amount);
        debug!(location = %location.name(), healed, "leader ordered healing");
        Ok(healed)
    }

    pub fn feed_characters(&mut self) -> LeaderResult<()> {
        let location = self.here_mut()?;
        location.feed_characters();
        debug!(location = %location.name(), "leader ordered a meal");
        Ok(())
    }

    /// Random recruit data whose kind the current location admits.
    ///
    /// Without a location, or when it admits no recruitable kind, any
    /// recruitable kind may come up.
    pub fn random_character_data<R: Rng + ?Sized>(&self, rng: &mut R) -> CharacterData {
        let allowed: Vec<CharacterKind> = match self.here() {
            Ok(location) => CharacterKind::RECRUITABLE
                .into_iter()
                .filter(|kind| is_allowed(location.location_type(), kind.faction()))
                .collect(),
            Err(_) => Vec::new(),
        };
        let pool: &[CharacterKind] = if allowed.is_empty() {
            &CharacterKind::RECRUITABLE
        } else {
            &allowed
        };

        CharacterData {
            kind: pool[rng.gen_range(0..pool.len())],
            name: RECRUIT_NAMES[rng.gen_range(0..RECRUIT_NAMES.len())].to_string(),
            sex: if rng.gen_bool(0.5) { Sex::Female } else { Sex::Male },
            height: rng.gen::<f64>(),
            age: rng.gen_range(1..=100),
            strength: rng.gen::<f64>(),
        }
    }

    /// Create a character at the current location.
    pub fn create_character(&mut self, data: CharacterData) -> LeaderResult<CharacterId> {
        let location = self.here_mut()?;
        let character = data.into_character();
        let id = character.id();

        location.add_character(character).map_err(|rejected| {
            let reason = rejected.reason;
            let name = rejected.into_character().name().to_string();
            LeaderError::Rejected { name, reason }
        })?;
        info!(location = %location.name(), %id, "leader recruited a character");
        Ok(id)
    }

    /// Have a druid brew from the location's food.
    ///
    /// Recipe ingredients are offered to the kettle in stock order and each
    /// accepted one is removed from the stock, stopping as soon as the kettle
    /// fills.
    pub fn prepare_potion(&mut self) -> LeaderResult<Brew> {
        let location = self.here_mut()?;
        let has_brewer = location
            .characters()
            .iter()
            .any(|c| c.is_alive() && c.capabilities().brewer);
        if !has_brewer {
            return Err(LeaderError::NoDruid {
                location: location.name().to_string(),
            });
        }

        let candidates = location.magic_potion().sort_foods(location.foods());
        let mut consumed = Vec::new();
        for food in candidates {
            if !location.magic_potion_mut().add_to_current_recipes(food) {
                continue;
            }
            location.remove_food(food);
            consumed.push(food);
            if !location.magic_potion().is_kettle_empty() {
                info!(location = %location.name(), "potion brewed");
                return Ok(Brew::Brewed { consumed });
            }
        }

        debug!(
            location = %location.name(),
            consumed = consumed.len(),
            "not enough ingredients to finish the potion"
        );
        Ok(Brew::Incomplete { consumed })
    }

    /// Have a resident drink a portion. `Ok(false)` if the kettle is empty or
    /// the character is dead.
    pub fn make_character_drink(&mut self, character: CharacterId) -> LeaderResult<bool> {
        Ok(self.here_mut()?.make_character_drink(character)?)
    }

    /// Move a resident to any other location that admits them.
    pub fn move_character(
        &mut self,
        character: CharacterId,
        destination: LocationId,
    ) -> LeaderResult<bool> {
        let here = self.here()?.id();
        Ok(self.theater.move_character(character, here, destination))
    }

    /// Send a resident to a battlefield, remembering where they came from.
    pub fn transfer_character_to_battlefield(
        &mut self,
        character: CharacterId,
        battlefield: LocationId,
    ) -> LeaderResult<bool> {
        let here = self.here()?.id();
        Ok(self
            .theater
            .transfer_character_to_battlefield(character, here, battlefield))
    }

    /// Full dump of the current location.
    pub fn scan_location(&self) -> String {
        match self.here() {
            Ok(location) => location.to_string(),
            Err(_) => "No location assigned".to_string(),
        }
    }

    pub fn info(&self) -> String {
        let location = self
            .here()
            .map(|location| location.name().to_string())
            .unwrap_or_else(|_| "none".to_string());
        format!(
            "Clan leader: {}\nSex: {}\nAge: {}\nLocation: {}\n",
            self.leader.name, self.leader.sex, self.leader.age, location
        )
    }
}
