//! Text commands for the clan leader.
//!
//! One line in, one short status line out. Character and location numbers
//! are zero-based indices into the current roster and the theater's
//! location list.

use std::str::FromStr;

use armorique_rules::CharacterId;
use rand::Rng;

use crate::error::{LeaderError, LeaderResult};
use crate::leader::LeaderSession;

/// Answer to anything that is not a command.
pub const UNKNOWN_COMMAND: &str = "Type \"help\" for a list of commands.";

pub const HELP: &str = "\
help                 show this list
heal                 heal everyone here
feed                 feed everyone here
drink <char#>        give a portion of potion to a character
magic                have the druid brew the potion
move <char#> <loc#>  send a character to another location
create               recruit a random character
scan                 describe the current location
info                 describe the clan leader";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Heal,
    Feed,
    Drink { character: usize },
    Magic,
    Move { character: usize, location: usize },
    Create,
    Scan,
    Info,
}

fn index_arg(arg: Option<&str>, what: &str) -> LeaderResult<usize> {
    let arg = arg.ok_or_else(|| LeaderError::BadArgument(format!("missing {what} number")))?;
    arg.parse()
        .map_err(|_| LeaderError::BadArgument(format!("'{arg}' is not a {what} number")))
}

impl FromStr for Command {
    type Err = LeaderError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(LeaderError::UnknownCommand(String::new()));
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "help" => Command::Help,
            "heal" => Command::Heal,
            "feed" => Command::Feed,
            "drink" => Command::Drink {
                character: index_arg(words.next(), "character")?,
            },
            "magic" => Command::Magic,
            "move" => Command::Move {
                character: index_arg(words.next(), "character")?,
                location: index_arg(words.next(), "location")?,
            },
            "create" => Command::Create,
            "scan" => Command::Scan,
            "info" => Command::Info,
            other => return Err(LeaderError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

impl LeaderSession<'_> {
    /// Parse and run one line, always producing a status line.
    pub fn run<R: Rng + ?Sized>(&mut self, line: &str, rng: &mut R) -> String {
        let outcome = line
            .parse::<Command>()
            .and_then(|command| self.execute(command, rng));
        match outcome {
            Ok(status) => status,
            Err(LeaderError::UnknownCommand(_)) => UNKNOWN_COMMAND.to_string(),
            Err(error) => error.to_string(),
        }
    }

    pub fn execute<R: Rng + ?Sized>(
        &mut self,
        command: Command,
        rng: &mut R,
    ) -> LeaderResult<String> {
        let status = match command {
            Command::Help => HELP.to_string(),
            Command::Heal => {
                self.heal_characters()?;
                "All characters got healed".to_string()
            }
            Command::Feed => {
                self.feed_characters()?;
                "All characters got fed".to_string()
            }
            Command::Drink { character } => {
                let (id, name) = self.resident(character)?;
                if self.make_character_drink(id)? {
                    format!("{name} drank the magic potion")
                } else {
                    format!("{name} could not drink the magic potion")
                }
            }
            Command::Magic => {
                if self.prepare_potion()?.is_brewed() {
                    "Potion prepared".to_string()
                } else {
                    "No potion prepared".to_string()
                }
            }
            Command::Move {
                character,
                location,
            } => {
                let (id, name) = self.resident(character)?;
                let destination = self.theater().location_at(location).ok_or_else(|| {
                    LeaderError::BadArgument(format!("no location number {location}"))
                })?;
                let (destination_id, destination_name) =
                    (destination.id(), destination.name().to_string());
                if self.move_character(id, destination_id)? {
                    format!("{name} moved to {destination_name}")
                } else {
                    format!("{name} could not move to {destination_name}")
                }
            }
            Command::Create => {
                let data = self.random_character_data(rng);
                let announcement = format!("{} the {} joined", data.name, data.kind);
                self.create_character(data)?;
                announcement
            }
            Command::Scan => self.scan_location(),
            Command::Info => self.info(),
        };
        Ok(status)
    }

    fn resident(&self, index: usize) -> LeaderResult<(CharacterId, String)> {
        let character = self
            .here()?
            .characters()
            .get(index)
            .ok_or_else(|| LeaderError::BadArgument(format!("no character number {index}")))?;
        Ok((character.id(), character.name().to_string()))
    }
}
