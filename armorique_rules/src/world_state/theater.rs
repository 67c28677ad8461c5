//! The theater: every location in the world and the moves between them.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{Battlefield, Departure, Location, LocationId, Rejected, Survivor};
use crate::config::HungerConfig;
use crate::entities::{Character, CharacterId};
use crate::error::{SimulationError, SimulationResult};

/// A location registered in the theater.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Site {
    Settlement(Location),
    Battlefield(Battlefield),
}

impl Site {
    pub fn id(&self) -> LocationId {
        self.location().id()
    }

    pub fn location(&self) -> &Location {
        match self {
            Site::Settlement(location) => location,
            Site::Battlefield(field) => field.location(),
        }
    }

    pub fn location_mut(&mut self) -> &mut Location {
        match self {
            Site::Settlement(location) => location,
            Site::Battlefield(field) => field.location_mut(),
        }
    }

    pub fn as_battlefield(&self) -> Option<&Battlefield> {
        match self {
            Site::Battlefield(field) => Some(field),
            Site::Settlement(_) => None,
        }
    }

    pub fn as_battlefield_mut(&mut self) -> Option<&mut Battlefield> {
        match self {
            Site::Battlefield(field) => Some(field),
            Site::Settlement(_) => None,
        }
    }
}

impl From<Location> for Site {
    fn from(location: Location) -> Self {
        Site::Settlement(location)
    }
}

impl From<Battlefield> for Site {
    fn from(field: Battlefield) -> Self {
        Site::Battlefield(field)
    }
}

/// Outcome of sending a battlefield's survivors home.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReturnReport {
    /// Characters now back in their origin.
    pub returned: Vec<CharacterId>,
    /// Characters whose origin refused them or no longer exists. They stay
    /// on the battlefield, untracked.
    pub stranded: Vec<CharacterId>,
}

/// Registry of all locations. Orchestrates moves between them and the
/// global per-turn effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theater {
    name: String,
    sites: Vec<Site>,
    hunger: HungerConfig,
    turn: u64,
}

impl Default for Theater {
    fn default() -> Self {
        Self::new("Armorique")
    }
}

impl Theater {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sites: Vec::new(),
            hunger: HungerConfig::default(),
            turn: 0,
        }
    }

    pub fn with_hunger(mut self, hunger: HungerConfig) -> Self {
        self.hunger = hunger;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Simulation steps taken so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Register a location. Returns `None` if one with the same id is
    /// already registered.
    pub fn add_location(&mut self, site: impl Into<Site>) -> Option<LocationId> {
        let site = site.into();
        let id = site.id();
        if self.position(id).is_some() {
            return None;
        }
        self.sites.push(site);
        Some(id)
    }

    pub fn remove_location(&mut self, id: LocationId) -> Option<Site> {
        let index = self.position(id)?;
        Some(self.sites.remove(index))
    }

    fn position(&self, id: LocationId) -> Option<usize> {
        self.sites.iter().position(|site| site.id() == id)
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.sites.iter().map(Site::location)
    }

    pub fn location_count(&self) -> usize {
        self.sites.len()
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.sites.iter().map(Site::location).find(|l| l.id() == id)
    }

    pub fn location_mut(&mut self, id: LocationId) -> Option<&mut Location> {
        self.sites
            .iter_mut()
            .map(Site::location_mut)
            .find(|l| l.id() == id)
    }

    /// Location by registration order.
    pub fn location_at(&self, index: usize) -> Option<&Location> {
        self.sites.get(index).map(Site::location)
    }

    pub fn location_by_name(&self, name: &str) -> Option<&Location> {
        self.locations().find(|l| l.name() == name)
    }

    pub fn battlefield(&self, id: LocationId) -> Option<&Battlefield> {
        self.battlefields().into_iter().find(|field| field.id() == id)
    }

    pub fn battlefield_mut(&mut self, id: LocationId) -> Option<&mut Battlefield> {
        self.sites
            .iter_mut()
            .filter_map(Site::as_battlefield_mut)
            .find(|field| field.id() == id)
    }

    pub fn battlefields(&self) -> Vec<&Battlefield> {
        self.sites.iter().filter_map(Site::as_battlefield).collect()
    }

    /// Where a character currently lives.
    pub fn find_character(&self, id: CharacterId) -> Option<(&Location, &Character)> {
        self.locations()
            .find_map(|location| location.character(id).map(|c| (location, c)))
    }

    pub fn total_population(&self) -> usize {
        self.locations().map(Location::character_count).sum()
    }

    /// Move a character from `origin` onto a battlefield, tracking the origin.
    ///
    /// If the battlefield is missing or refuses the character, it is put back
    /// into its old roster slot. The character is never left in zero or two
    /// locations.
    pub fn transfer_character_to_battlefield(
        &mut self,
        character: CharacterId,
        origin: LocationId,
        battlefield: LocationId,
    ) -> bool {
        let Some(origin_index) = self.position(origin) else {
            return false;
        };
        let Some(mut departure) = self.sites[origin_index]
            .location_mut()
            .take_character(character)
        else {
            return false;
        };

        let admitted = match self.battlefield_mut(battlefield) {
            Some(field) => field
                .add_character_from_origin(departure.character, origin)
                .map_err(Rejected::into_character),
            None => Err(departure.character),
        };

        match admitted {
            Ok(()) => {
                info!(%character, %origin, %battlefield, "character sent to battlefield");
                true
            }
            Err(moving) => {
                warn!(%character, %battlefield, "transfer refused, character stays home");
                departure.character = moving;
                self.sites[origin_index]
                    .location_mut()
                    .restore_character(departure);
                false
            }
        }
    }

    /// Move a character between any two locations, subject to the
    /// destination's admission rule. Rolls back on refusal.
    pub fn move_character(
        &mut self,
        character: CharacterId,
        from: LocationId,
        to: LocationId,
    ) -> bool {
        let Some(from_index) = self.position(from) else {
            return false;
        };
        let Some(mut departure) = self.sites[from_index]
            .location_mut()
            .take_character(character)
        else {
            return false;
        };

        let admitted = match self.location_mut(to) {
            Some(destination) => destination
                .add_character(departure.character)
                .map_err(Rejected::into_character),
            None => Err(departure.character),
        };

        match admitted {
            Ok(()) => {
                debug!(%character, %from, %to, "character moved");
                true
            }
            Err(moving) => {
                departure.character = moving;
                self.sites[from_index]
                    .location_mut()
                    .restore_character(departure);
                false
            }
        }
    }

    /// Fight a round on the given battlefield.
    pub fn start_battle(&mut self, battlefield: LocationId) -> SimulationResult<bool> {
        let field = self.require_battlefield(battlefield)?;
        Ok(field.start_battle())
    }

    fn require_battlefield(&mut self, id: LocationId) -> SimulationResult<&mut Battlefield> {
        let index = self
            .position(id)
            .ok_or(SimulationError::UnknownLocation(id))?;
        self.sites[index]
            .as_battlefield_mut()
            .ok_or(SimulationError::NotABattlefield(id))
    }

    /// Send every tracked survivor of a battlefield back to its origin.
    ///
    /// A survivor its origin refuses (or whose origin is gone) stays on the
    /// battlefield untracked and is listed in [`ReturnReport::stranded`].
    pub fn return_survivors_to_origins(
        &mut self,
        battlefield: LocationId,
    ) -> SimulationResult<ReturnReport> {
        let survivors = self
            .require_battlefield(battlefield)?
            .release_survivors();

        let mut report = ReturnReport::default();
        for Survivor { character, origin } in survivors {
            let id = character.id();
            let delivered = match self.location_mut(origin) {
                Some(home) => home.add_character(character).map_err(Rejected::into_character),
                None => Err(character),
            };

            match delivered {
                Ok(()) => report.returned.push(id),
                Err(character) => {
                    warn!(
                        character = %character.name(),
                        %origin,
                        "origin refused survivor, stranded on battlefield"
                    );
                    let field = self.require_battlefield(battlefield)?.location_mut();
                    let slot = field.character_count();
                    field.restore_character(Departure {
                        slot,
                        character,
                        origin: None,
                    });
                    report.stranded.push(id);
                }
            }
        }

        info!(
            %battlefield,
            returned = report.returned.len(),
            stranded = report.stranded.len(),
            "survivors went home"
        );
        Ok(report)
    }

    /// One discrete global tick: herbs grow, then the hungry suffer.
    pub fn simulation_step(&mut self) {
        let hunger_damage = self.hunger.hunger_damage;
        for site in &mut self.sites {
            site.location_mut().spawn_herbs_if_needed();
        }

        let mut starving = 0;
        for site in &mut self.sites {
            starving += site.location_mut().apply_hunger_damage(hunger_damage);
        }

        self.turn += 1;
        debug!(turn = self.turn, starving, "simulation step");
    }
}

impl std::fmt::Display for Theater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Theater {} with {} locations:", self.name, self.sites.len())?;
        for location in self.locations() {
            writeln!(
                f,
                " - {} ({}) - {} characters",
                location.name(),
                location.location_type(),
                location.character_count()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CharacterKind, Sex};
    use crate::world_state::{BattleStatus, LocationType};

    fn make(kind: CharacterKind) -> Character {
        Character::new(kind, kind.name(), Sex::Male, 1.8, 30, 0.8)
    }

    struct World {
        theater: Theater,
        village: LocationId,
        camp: LocationId,
        field: LocationId,
    }

    fn world() -> World {
        let mut theater = Theater::new("Test");
        let village = theater
            .add_location(Location::new("Village", 150.0, LocationType::GaulTown))
            .unwrap();
        let camp = theater
            .add_location(Location::new("Camp", 200.0, LocationType::RomanCamp))
            .unwrap();
        let field = theater
            .add_location(Battlefield::new("Field", 300.0))
            .unwrap();
        World {
            theater,
            village,
            camp,
            field,
        }
    }

    fn place(theater: &mut Theater, at: LocationId, kind: CharacterKind) -> CharacterId {
        let character = make(kind);
        let id = character.id();
        theater
            .location_mut(at)
            .unwrap()
            .add_character(character)
            .unwrap();
        id
    }

    fn occurrences(theater: &Theater, id: CharacterId) -> usize {
        theater.locations().filter(|l| l.contains(id)).count()
    }

    #[test]
    fn test_locations_are_unique() {
        let mut theater = Theater::new("Test");
        let location = Location::new("Village", 1.0, LocationType::GaulTown);
        let copy = location.clone();
        assert!(theater.add_location(location).is_some());
        assert!(theater.add_location(copy).is_none());
        assert_eq!(theater.location_count(), 1);
    }

    #[test]
    fn test_lookup_by_name() {
        let world = world();
        assert_eq!(
            world.theater.location_by_name("Camp").map(Location::id),
            Some(world.camp)
        );
        assert!(world.theater.location_by_name("Rome").is_none());
        assert_eq!(world.theater.battlefields().len(), 1);
    }

    #[test]
    fn test_transfer_to_battlefield() {
        let mut world = world();
        let druid = place(&mut world.theater, world.village, CharacterKind::Druid);

        assert!(world
            .theater
            .transfer_character_to_battlefield(druid, world.village, world.field));

        let field = world.theater.battlefield(world.field).unwrap();
        assert!(field.location().contains(druid));
        assert_eq!(field.origin_of(druid), Some(world.village));
        assert_eq!(occurrences(&world.theater, druid), 1);
    }

    #[test]
    fn test_transfer_rolls_back_on_missing_battlefield() {
        let mut world = world();
        let first = place(&mut world.theater, world.village, CharacterKind::Merchant);
        let druid = place(&mut world.theater, world.village, CharacterKind::Druid);
        let last = place(&mut world.theater, world.village, CharacterKind::Blacksmith);

        assert!(!world
            .theater
            .transfer_character_to_battlefield(druid, world.village, LocationId::new()));
        assert!(!world
            .theater
            .transfer_character_to_battlefield(druid, world.village, world.camp));

        let village = world.theater.location(world.village).unwrap();
        let order: Vec<_> = village.characters().iter().map(Character::id).collect();
        assert_eq!(order, vec![first, druid, last]);
        assert_eq!(occurrences(&world.theater, druid), 1);
    }

    #[test]
    fn test_transfer_from_wrong_origin_fails() {
        let mut world = world();
        let druid = place(&mut world.theater, world.village, CharacterKind::Druid);

        assert!(!world
            .theater
            .transfer_character_to_battlefield(druid, world.camp, world.field));
        assert!(world.theater.location(world.village).unwrap().contains(druid));
    }

    #[test]
    fn test_transfer_rolls_back_when_already_on_field() {
        let mut world = world();
        let druid = make(CharacterKind::Druid);
        let id = druid.id();
        world
            .theater
            .location_mut(world.village)
            .unwrap()
            .add_character(druid.clone())
            .unwrap();
        world
            .theater
            .location_mut(world.field)
            .unwrap()
            .add_character(druid)
            .unwrap();

        assert!(!world
            .theater
            .transfer_character_to_battlefield(id, world.village, world.field));
        assert!(world.theater.location(world.village).unwrap().contains(id));
    }

    #[test]
    fn test_move_character_respects_admission() {
        let mut world = world();
        let druid = place(&mut world.theater, world.village, CharacterKind::Druid);

        assert!(!world.theater.move_character(druid, world.village, world.camp));
        assert!(world.theater.location(world.village).unwrap().contains(druid));

        assert!(world.theater.move_character(druid, world.village, world.field));
        assert!(world.theater.location(world.field).unwrap().contains(druid));
        assert_eq!(
            world.theater.battlefield(world.field).unwrap().origin_of(druid),
            None
        );
    }

    #[test]
    fn test_full_battle_cycle() {
        let mut world = world();
        let druid = place(&mut world.theater, world.village, CharacterKind::Druid);
        let legionary = place(&mut world.theater, world.camp, CharacterKind::Legionary);

        assert!(world
            .theater
            .transfer_character_to_battlefield(druid, world.village, world.field));
        assert!(world
            .theater
            .transfer_character_to_battlefield(legionary, world.camp, world.field));

        assert_eq!(world.theater.start_battle(world.field), Ok(true));
        assert_eq!(
            world.theater.battlefield(world.field).unwrap().status(),
            BattleStatus::Aftermath
        );

        let report = world
            .theater
            .return_survivors_to_origins(world.field)
            .unwrap();
        assert_eq!(report.returned, vec![druid, legionary]);
        assert!(report.stranded.is_empty());
        assert!(world.theater.location(world.village).unwrap().contains(druid));
        assert!(world.theater.location(world.camp).unwrap().contains(legionary));
        assert_eq!(
            world.theater.battlefield(world.field).unwrap().status(),
            BattleStatus::Waiting
        );
    }

    #[test]
    fn test_survivor_strands_when_origin_gone() {
        let mut world = world();
        let druid = place(&mut world.theater, world.village, CharacterKind::Druid);
        world
            .theater
            .transfer_character_to_battlefield(druid, world.village, world.field);
        world.theater.remove_location(world.village);

        let report = world
            .theater
            .return_survivors_to_origins(world.field)
            .unwrap();
        assert_eq!(report.stranded, vec![druid]);
        let field = world.theater.battlefield(world.field).unwrap();
        assert!(field.location().contains(druid));
        assert_eq!(field.origin_of(druid), None);
    }

    #[test]
    fn test_generic_round_trip_drops_tracking() {
        let mut world = world();
        let lutetia = world
            .theater
            .add_location(Location::new("Lutetia", 250.0, LocationType::GaulRomanVillage))
            .unwrap();
        let druid = place(&mut world.theater, world.village, CharacterKind::Druid);

        assert!(world
            .theater
            .transfer_character_to_battlefield(druid, world.village, world.field));
        assert!(world.theater.move_character(druid, world.field, lutetia));
        assert!(world.theater.move_character(druid, lutetia, world.field));
        assert_eq!(
            world.theater.battlefield(world.field).unwrap().origin_of(druid),
            None
        );

        let report = world
            .theater
            .return_survivors_to_origins(world.field)
            .unwrap();
        assert!(report.returned.is_empty());
        assert!(world.theater.location(world.field).unwrap().contains(druid));
        assert!(!world.theater.location(world.village).unwrap().contains(druid));
    }

    #[test]
    fn test_untracked_removal_drops_tracking() {
        let mut world = world();
        let druid = place(&mut world.theater, world.village, CharacterKind::Druid);
        world
            .theater
            .transfer_character_to_battlefield(druid, world.village, world.field);

        let field = world.theater.battlefield_mut(world.field).unwrap();
        let character = field.location_mut().remove_character(druid).unwrap();
        field.location_mut().add_character(character).unwrap();
        assert_eq!(field.origin_of(druid), None);
    }

    #[test]
    fn test_refused_move_keeps_tracking() {
        let mut world = world();
        let druid = place(&mut world.theater, world.village, CharacterKind::Druid);
        world
            .theater
            .transfer_character_to_battlefield(druid, world.village, world.field);

        assert!(!world.theater.move_character(druid, world.field, world.camp));
        assert_eq!(
            world.theater.battlefield(world.field).unwrap().origin_of(druid),
            Some(world.village)
        );
    }

    #[test]
    fn test_return_keeps_population() {
        let mut world = world();
        let druid = place(&mut world.theater, world.village, CharacterKind::Druid);
        world
            .theater
            .transfer_character_to_battlefield(druid, world.village, world.field);
        world.theater.remove_location(world.village);
        let population = world.theater.total_population();

        world
            .theater
            .return_survivors_to_origins(world.field)
            .unwrap();
        assert_eq!(world.theater.total_population(), population);
        assert_eq!(occurrences(&world.theater, druid), 1);
    }

    #[test]
    fn test_battle_on_settlement_is_an_error() {
        let mut world = world();
        assert_eq!(
            world.theater.start_battle(world.village),
            Err(SimulationError::NotABattlefield(world.village))
        );
        let unknown = LocationId::nil();
        assert_eq!(
            world.theater.return_survivors_to_origins(unknown),
            Err(SimulationError::UnknownLocation(unknown))
        );
    }

    #[test]
    fn test_simulation_step() {
        let mut world = world();
        let mut hungry = make(CharacterKind::Merchant);
        hungry.make_hungry();
        hungry.make_hungry();
        let hungry_id = hungry.id();
        world
            .theater
            .location_mut(world.village)
            .unwrap()
            .add_character(hungry)
            .unwrap();
        let fed = place(&mut world.theater, world.village, CharacterKind::Druid);

        for _ in 0..3 {
            world.theater.simulation_step();
        }

        let village = world.theater.location(world.village).unwrap();
        assert_eq!(village.character(hungry_id).unwrap().health(), 94.0);
        assert_eq!(village.character(fed).unwrap().health(), 100.0);
        assert_eq!(village.healing_herbs(), 2);
        assert_eq!(world.theater.location(world.camp).unwrap().healing_herbs(), 0);
        assert_eq!(world.theater.location(world.field).unwrap().healing_herbs(), 0);
        assert_eq!(world.theater.turn(), 3);
    }

    #[test]
    fn test_population_and_find() {
        let mut world = world();
        let druid = place(&mut world.theater, world.village, CharacterKind::Druid);
        place(&mut world.theater, world.camp, CharacterKind::General);

        assert_eq!(world.theater.total_population(), 2);
        let (home, character) = world.theater.find_character(druid).unwrap();
        assert_eq!(home.id(), world.village);
        assert_eq!(character.kind(), CharacterKind::Druid);
    }
}
