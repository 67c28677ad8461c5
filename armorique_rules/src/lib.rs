//! # Armorique Rules
//!
//! The simulation rules crate - characters, combat, food, the magic potion,
//! locations with their admission rules, battlefields and the theater that
//! ties them together. This crate is the single source of truth for the
//! simulated world and contains no controller or presentation logic.
//!
//! Every operation runs synchronously to completion. Callers that tick the
//! world in real time are expected to funnel all mutations through one thread.

pub mod config;
pub mod entities;
pub mod error;
pub mod food;
pub mod mechanics;
pub mod potion;
pub mod sorting;
pub mod world_state;

pub use config::*;
pub use entities::*;
pub use error::*;
pub use food::*;
pub use mechanics::*;
pub use potion::*;
pub use world_state::*;
