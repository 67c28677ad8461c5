//! Error types shared by the simulation rules.

use thiserror::Error;

use crate::entities::CharacterId;
use crate::potion::PotionEffect;
use crate::world_state::LocationId;

/// Invalid-state and lookup failures raised by simulation operations.
///
/// Expected domain rejections (a disallowed placement, an ingredient the
/// kettle does not need, a battle without opposing factions) are reported
/// through `bool`/`Option` returns or [`Rejected`](crate::Rejected) instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// The character is dead and cannot be healed.
    #[error("character '{name}' is dead and cannot perform this action")]
    CharacterDead { name: String },

    /// Neither herbs nor food are available to heal with.
    #[error("no healing herbs or food available in '{location}'")]
    NoHealingResources { location: String },

    /// Ingredients may only be added once every portion has been drunk.
    #[error("the kettle still holds portions, a new batch cannot be started")]
    KettleNotEmpty,

    /// A one-shot trigger ingredient was supplied twice in the same batch.
    #[error("the {effect} effect was already added to this batch")]
    EffectAlreadyApplied { effect: PotionEffect },

    /// Factory lookup by an unrecognised type name.
    #[error("unknown character kind: {0}")]
    UnknownCharacterKind(String),

    #[error("unknown location: {0}")]
    UnknownLocation(LocationId),

    #[error("unknown character: {0}")]
    UnknownCharacter(CharacterId),

    #[error("location {0} is not a battlefield")]
    NotABattlefield(LocationId),
}

pub type SimulationResult<T> = Result<T, SimulationError>;
