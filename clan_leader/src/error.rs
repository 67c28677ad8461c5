//! Failures reported by the clan leader.

use armorique_rules::{RejectReason, SimulationError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LeaderError {
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// The leader is not bound to a location, or it left the theater.
    #[error("no location assigned")]
    NoLocation,

    /// Brewing needs a living druid on site.
    #[error("no druid at {location} to brew the potion")]
    NoDruid { location: String },

    /// The new recruit was turned away.
    #[error("{name} could not join: {reason}")]
    Rejected { name: String, reason: RejectReason },

    /// A command argument was missing, malformed or out of range.
    #[error("bad argument: {0}")]
    BadArgument(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

pub type LeaderResult<T> = Result<T, LeaderError>;
