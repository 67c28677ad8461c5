//! Battlefields: staging, combat, aftermath and the return home.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Location, LocationId, LocationType, Rejected};
use crate::entities::{Character, CharacterId};
use crate::mechanics::Faction;

/// Where a battlefield stands in its combat lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BattleStatus {
    /// No combat; characters are being staged.
    #[default]
    Waiting,
    InCombat,
    /// Combat resolved; survivors have not gone home yet.
    Aftermath,
}

/// A living character leaving the battlefield for its origin.
#[derive(Debug, Clone)]
pub struct Survivor {
    pub character: Character,
    pub origin: LocationId,
}

/// Headcount summary of a battlefield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReport {
    pub status: BattleStatus,
    pub characters: usize,
    pub gauls: usize,
    pub romans: usize,
    pub can_start: bool,
}

/// A location where Gauls and Romans meet in combat.
///
/// Characters moved in through [`Battlefield::add_character_from_origin`]
/// remember where they came from. Characters added through the plain
/// [`Location`] API are not tracked and never sent home.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Battlefield {
    location: Location,
    status: BattleStatus,
}

impl Battlefield {
    pub fn new(name: impl Into<String>, area: f64) -> Self {
        Self {
            location: Location::new(name, area, LocationType::Battlefield),
            status: BattleStatus::Waiting,
        }
    }

    pub fn id(&self) -> LocationId {
        self.location.id()
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// The plain location API. Characters added through it are not tracked;
    /// removing one through it drops its tracking.
    pub fn location_mut(&mut self) -> &mut Location {
        &mut self.location
    }

    pub fn status(&self) -> BattleStatus {
        self.status
    }

    /// Where a tracked character came from.
    pub fn origin_of(&self, id: CharacterId) -> Option<LocationId> {
        self.location.origin_of(id)
    }

    /// Stage a character and remember its origin.
    pub fn add_character_from_origin(
        &mut self,
        character: Character,
        origin: LocationId,
    ) -> Result<(), Rejected> {
        self.location.add_tracked_character(character, origin)
    }

    fn count(&self, faction: Faction) -> usize {
        self.location
            .characters()
            .iter()
            .filter(|c| c.faction() == faction)
            .count()
    }

    /// Both a Gaul and a Roman are present.
    pub fn has_opposing_factions(&self) -> bool {
        self.count(Faction::Gaul) > 0 && self.count(Faction::Roman) > 0
    }

    pub fn can_start_battle(&self) -> bool {
        self.location.character_count() >= 2 && self.has_opposing_factions()
    }

    /// Fight one round of combat. Returns `false`, changing nothing, when
    /// there are no opposing factions to fight.
    ///
    /// Every Gaul/Roman pair exchanges one blow each way, pairs taken in
    /// roster order. Other pairs do not fight. The dead stay on the field.
    pub fn start_battle(&mut self) -> bool {
        if !self.can_start_battle() {
            return false;
        }

        self.status = BattleStatus::InCombat;
        info!(
            battlefield = %self.location.name(),
            fighters = self.location.character_count(),
            "battle started"
        );
        self.execute_combat();
        self.status = BattleStatus::Aftermath;

        let fallen = self
            .location
            .characters()
            .iter()
            .filter(|c| c.is_dead())
            .count();
        info!(battlefield = %self.location.name(), fallen, "battle resolved");
        true
    }

    fn execute_combat(&mut self) {
        let roster = &mut self.location.characters;
        for second in 1..roster.len() {
            for first in 0..second {
                if !roster[first].faction().opposes(roster[second].faction()) {
                    continue;
                }
                let (head, tail) = roster.split_at_mut(second);
                let (a, b) = (&mut head[first], &mut tail[0]);
                a.fight(b);
                b.fight(a);
            }
        }
    }

    /// Release every living tracked resident, clear all tracking and go back
    /// to [`BattleStatus::Waiting`].
    ///
    /// The survivors are no longer in any location; the caller must deliver
    /// them, as [`Theater::return_survivors_to_origins`](super::Theater::return_survivors_to_origins) does.
    #[must_use = "released survivors are in no location until delivered"]
    pub(crate) fn release_survivors(&mut self) -> Vec<Survivor> {
        self.status = BattleStatus::Waiting;
        self.location
            .release_tracked()
            .into_iter()
            .map(|(character, origin)| Survivor { character, origin })
            .collect()
    }

    /// Take the dead off the field, dropping their tracking.
    pub fn remove_dead_characters(&mut self) -> Vec<Character> {
        self.location.remove_dead()
    }

    pub fn report(&self) -> BattleReport {
        BattleReport {
            status: self.status,
            characters: self.location.character_count(),
            gauls: self.count(Faction::Gaul),
            romans: self.count(Faction::Roman),
            can_start: self.can_start_battle(),
        }
    }
}

impl std::fmt::Display for Battlefield {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let report = self.report();
        writeln!(f, "Battlefield: {}", self.location.name())?;
        writeln!(f, "Status: {:?}", report.status)?;
        writeln!(f, "Characters: {}", report.characters)?;
        writeln!(f, "Gauls: {}", report.gauls)?;
        writeln!(f, "Romans: {}", report.romans)?;
        writeln!(f, "Can start battle: {}", report.can_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CharacterKind, Rank, Sex};

    fn make(kind: CharacterKind, strength: f64) -> Character {
        Character::new(kind, kind.name(), Sex::Male, 1.8, 30, strength)
    }

    fn field_with(kinds: &[CharacterKind]) -> Battlefield {
        let mut field = Battlefield::new("Forest Battlefield", 300.0);
        for kind in kinds {
            field
                .add_character_from_origin(make(*kind, 0.8), LocationId::nil())
                .unwrap();
        }
        field
    }

    #[test]
    fn test_new_battlefield() {
        let field = Battlefield::new("Field", 10.0);
        assert_eq!(field.status(), BattleStatus::Waiting);
        assert_eq!(field.location().location_type(), LocationType::Battlefield);
        assert_eq!(field.location().character_count(), 0);
    }

    #[test]
    fn test_origin_tracking() {
        let mut field = Battlefield::new("Field", 10.0);
        let origin = LocationId::new();
        let werewolf = Character::werewolf("Fenrir", Sex::Male, 2.1, 35, 0.95, Rank::Alpha);
        let id = werewolf.id();

        field.add_character_from_origin(werewolf, origin).unwrap();
        assert_eq!(field.origin_of(id), Some(origin));
    }

    #[test]
    fn test_failed_add_records_nothing() {
        let mut field = Battlefield::new("Field", 10.0);
        let druid = make(CharacterKind::Druid, 0.7);
        let copy = druid.clone();
        let id = druid.id();
        let first_origin = LocationId::new();

        field.add_character_from_origin(druid, first_origin).unwrap();
        assert!(field.add_character_from_origin(copy, LocationId::new()).is_err());
        assert_eq!(field.origin_of(id), Some(first_origin));
        assert_eq!(field.location().character_count(), 1);
    }

    #[test]
    fn test_battle_gate() {
        use CharacterKind::*;

        assert!(!field_with(&[Druid, Merchant]).can_start_battle());
        assert!(!field_with(&[Wanderer, Wanderer]).can_start_battle());
        assert!(!field_with(&[Druid, Wanderer]).can_start_battle());
        assert!(!field_with(&[Legionary]).can_start_battle());
        assert!(field_with(&[Druid, Legionary]).can_start_battle());
        assert!(field_with(&[Druid, Werewolf(Rank::Alpha), General]).can_start_battle());
    }

    #[test]
    fn test_start_battle_without_opponents_is_noop() {
        let mut field = field_with(&[CharacterKind::Druid, CharacterKind::Blacksmith]);
        assert!(!field.start_battle());
        assert_eq!(field.status(), BattleStatus::Waiting);
        assert!(field
            .location()
            .characters()
            .iter()
            .all(|c| c.health() == 100.0));
    }

    #[test]
    fn test_battle_exchanges_blows() {
        let mut field = field_with(&[CharacterKind::Blacksmith, CharacterKind::Legionary]);
        assert!(field.start_battle());
        assert_eq!(field.status(), BattleStatus::Aftermath);

        let roster = field.location().characters();
        // Blacksmith: 80 - 50 + 30 = 60, Legionary: 80 - 50 + 20 = 50
        assert_eq!(roster[1].health(), 40.0);
        assert_eq!(roster[0].health(), 50.0);
    }

    #[test]
    fn test_only_opposing_pairs_fight() {
        use CharacterKind::*;
        let mut field =
            field_with(&[Druid, Werewolf(Rank::Alpha), Blacksmith, Wanderer, Legionary]);
        assert!(field.start_battle());

        let roster = field.location().characters();
        assert_eq!(roster[1].health(), 100.0);
        assert_eq!(roster[3].health(), 100.0);
        assert!(roster[0].health() < 100.0);
        assert!(roster[2].health() < 100.0);
        assert!(roster[4].health() < 100.0);
    }

    #[test]
    fn test_battle_is_reproducible() {
        use CharacterKind::*;
        let kinds = [General, Druid, Legionary, Blacksmith, Merchant];
        let mut first = field_with(&kinds);
        let mut second = field_with(&kinds);
        first.start_battle();
        second.start_battle();

        let health = |field: &Battlefield| -> Vec<f64> {
            field.location().characters().iter().map(|c| c.health()).collect()
        };
        assert_eq!(health(&first), health(&second));
    }

    #[test]
    fn test_dead_stay_after_battle() {
        let mut field = Battlefield::new("Field", 10.0);
        let mut weak = make(CharacterKind::Merchant, 0.5);
        weak.take_damage(95.0);
        field.add_character_from_origin(weak, LocationId::nil()).unwrap();
        field
            .add_character_from_origin(make(CharacterKind::General, 0.9), LocationId::nil())
            .unwrap();

        field.start_battle();
        assert_eq!(field.location().character_count(), 2);
        assert!(field.location().characters()[0].is_dead());

        let dead = field.remove_dead_characters();
        assert_eq!(dead.len(), 1);
        assert_eq!(field.location().character_count(), 1);
        assert_eq!(field.origin_of(dead[0].id()), None);
    }

    #[test]
    fn test_return_survivors() {
        let mut field = Battlefield::new("Field", 10.0);
        let home = LocationId::new();
        let mut fallen = make(CharacterKind::Merchant, 0.5);
        fallen.die();
        let fallen_id = fallen.id();
        let survivor = make(CharacterKind::Legionary, 0.8);
        let survivor_id = survivor.id();
        let untracked = make(CharacterKind::Druid, 0.8);
        let untracked_id = untracked.id();

        field.add_character_from_origin(fallen, home).unwrap();
        field.add_character_from_origin(survivor, home).unwrap();
        field.location_mut().add_character(untracked).unwrap();
        field.start_battle();

        let survivors = field.release_survivors();
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].character.id(), survivor_id);
        assert_eq!(survivors[0].origin, home);

        assert_eq!(field.status(), BattleStatus::Waiting);
        assert!(field.location().contains(fallen_id));
        assert!(field.location().contains(untracked_id));
        assert_eq!(field.origin_of(fallen_id), None);
    }

    #[test]
    fn test_report_and_status_json() {
        let field = field_with(&[CharacterKind::Druid, CharacterKind::General]);
        let report = field.report();
        assert_eq!(report.gauls, 1);
        assert_eq!(report.romans, 1);
        assert!(report.can_start);

        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["status"], "Waiting");
    }
}
