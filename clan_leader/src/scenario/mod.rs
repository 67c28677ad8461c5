//! Ready-made worlds to start a simulation from.

use rand::Rng;
use tracing::{info, warn};

use armorique_rules::{
    is_allowed, Battlefield, Character, CharacterKind, Food, Location, LocationType, Rank, Sex,
    SimulationConfig, Theater,
};

use crate::leader::ClanLeader;

/// Location types a custom world cycles through.
pub const CUSTOM_LOCATION_TYPES: [LocationType; 5] = [
    LocationType::GaulTown,
    LocationType::RomanCamp,
    LocationType::Battlefield,
    LocationType::GaulRomanVillage,
    LocationType::Enclosure,
];

const CUSTOM_LOCATION_NAMES: [&str; 10] = [
    "Village",
    "Camp",
    "Battlefield",
    "Town",
    "Enclosure",
    "Settlement",
    "Fortress",
    "Clearing",
    "Outpost",
    "Grove",
];

const SETTLER_NAMES: [&str; 10] = [
    "Marcus",
    "Julius",
    "Asterix",
    "Obelix",
    "Getafix",
    "Vitalstatistix",
    "Fulliautomatix",
    "Cacofonix",
    "Impedimenta",
    "Panacea",
];

const STAPLE_FOODS: [Food; 5] = [
    Food::WildBoar,
    Food::Wine,
    Food::Mistletoe,
    Food::Carrot,
    Food::Salt,
];

fn settle(location: &mut Location, characters: impl IntoIterator<Item = Character>) {
    for character in characters {
        if let Err(rejected) = location.add_character(character) {
            warn!(location = %location.name(), %rejected, "settler turned away");
        }
    }
}

/// The Armorique world: a Gaul village, two Roman strongholds, an empty
/// battlefield, Lutetia and a werewolf pack in the Dark Forest. The chief
/// stands in the village.
pub fn default_theater() -> (Theater, ClanLeader) {
    let mut village = Location::new("Asterix's Village", 150.0, LocationType::GaulTown);
    settle(
        &mut village,
        [
            Character::new(CharacterKind::Merchant, "Economix", Sex::Male, 1.65, 40, 0.6),
            Character::new(CharacterKind::InnKeeper, "Impedimenta", Sex::Female, 1.70, 38, 0.65),
            Character::new(CharacterKind::Blacksmith, "Fulliautomatix", Sex::Male, 2.00, 35, 0.95),
            Character::new(CharacterKind::Druid, "Getafix", Sex::Male, 1.70, 60, 0.7),
        ],
    );

    let mut camp = Location::new("Aquarium Camp", 200.0, LocationType::RomanCamp);
    settle(
        &mut camp,
        [
            Character::new(CharacterKind::Legionary, "Marcus", Sex::Male, 1.80, 30, 0.8),
            Character::new(CharacterKind::General, "Julius", Sex::Male, 1.85, 45, 0.85),
        ],
    );

    let mut rome = Location::new("Rome", 300.0, LocationType::RomanTown);
    settle(
        &mut rome,
        [
            Character::new(CharacterKind::Legionary, "Cassius", Sex::Male, 1.78, 28, 0.82),
            Character::new(CharacterKind::Prefect, "Pontius", Sex::Male, 1.75, 50, 0.7),
            Character::new(CharacterKind::General, "Caesar", Sex::Male, 1.88, 52, 0.9),
        ],
    );

    let lutetia = Location::new("Lutetia", 250.0, LocationType::GaulRomanVillage);

    let mut forest = Location::new("Dark Forest", 180.0, LocationType::Enclosure);
    settle(
        &mut forest,
        [
            Character::werewolf("Fenrir", Sex::Male, 2.10, 35, 0.95, Rank::Alpha),
            Character::werewolf("Grayback", Sex::Male, 1.95, 30, 0.85, Rank::Beta),
            Character::werewolf("Shadowfang", Sex::Male, 1.88, 25, 0.75, Rank::Gamma),
            Character::werewolf("Nightclaw", Sex::Female, 1.82, 23, 0.72, Rank::Gamma),
            Character::werewolf("Runt", Sex::Male, 1.65, 20, 0.5, Rank::Omega),
        ],
    );

    for food in STAPLE_FOODS {
        village.add_food(food);
        camp.add_food(food);
        rome.add_food(food);
    }

    let mut theater = Theater::new("Armorique");
    let village_id = theater.add_location(village);
    theater.add_location(camp);
    theater.add_location(rome);
    theater.add_location(Battlefield::new("Forest Battlefield", 300.0));
    theater.add_location(lutetia);
    theater.add_location(forest);

    let mut chief = ClanLeader::new("Vitalstatistix", Sex::Male, 50);
    chief.set_location(village_id);
    info!(population = theater.total_population(), "default world ready");
    (theater, chief)
}

fn random_settler<R: Rng + ?Sized>(
    location_type: LocationType,
    strength: f64,
    rng: &mut R,
) -> Option<Character> {
    let kinds: Vec<CharacterKind> = CharacterKind::RECRUITABLE
        .into_iter()
        .filter(|kind| is_allowed(location_type, kind.faction()))
        .collect();
    if kinds.is_empty() {
        return None;
    }

    let name = format!(
        "{}{}",
        SETTLER_NAMES[rng.gen_range(0..SETTLER_NAMES.len())],
        rng.gen_range(0..100)
    );
    let sex = if rng.gen_bool(0.5) { Sex::Male } else { Sex::Female };
    let height = 1.5 + rng.gen::<f64>() * 0.5;
    let age = rng.gen_range(20..60);
    let kind = kinds[rng.gen_range(0..kinds.len())];
    Some(Character::new(kind, name, sex, height, age, strength))
}

/// Build a world from setup parameters.
///
/// Location types cycle through [`CUSTOM_LOCATION_TYPES`]. Every location
/// gets random food; all but battlefields get random residents their type
/// admits. The chief stands in the first location.
pub fn custom_theater<R: Rng + ?Sized>(
    config: &SimulationConfig,
    rng: &mut R,
) -> (Theater, ClanLeader) {
    let setup = &config.setup;
    let mut theater = Theater::new(setup.theater_name.clone()).with_hunger(config.hunger);
    let food_count = setup.food_per_location.min(Food::ALL.len());
    let mut first = None;

    for index in 0..setup.location_count {
        let location_type = CUSTOM_LOCATION_TYPES[index % CUSTOM_LOCATION_TYPES.len()];
        let name = format!(
            "{} {}",
            CUSTOM_LOCATION_NAMES[index % CUSTOM_LOCATION_NAMES.len()],
            index + 1
        );

        let foods: Vec<Food> = (0..food_count)
            .map(|_| Food::ALL[rng.gen_range(0..Food::ALL.len())])
            .collect();

        let id = if location_type == LocationType::Battlefield {
            let mut field = Battlefield::new(name, setup.default_area);
            foods.into_iter().for_each(|food| field.location_mut().add_food(food));
            theater.add_location(field)
        } else {
            let mut location =
                Location::new(name, setup.default_area, location_type).with_healing(config.healing);
            foods.into_iter().for_each(|food| location.add_food(food));
            let settlers: Vec<Character> = (0..setup.characters_per_location)
                .filter_map(|_| random_settler(location_type, setup.initial_strength, &mut *rng))
                .collect();
            settle(&mut location, settlers);
            theater.add_location(location)
        };
        first = first.or(id);
    }

    let mut chief = ClanLeader::new("Player Chief", Sex::Male, 40).with_config(&config.leader);
    chief.set_location(first);
    info!(
        theater = %theater.name(),
        locations = theater.location_count(),
        population = theater.total_population(),
        "custom world ready"
    );
    (theater, chief)
}
