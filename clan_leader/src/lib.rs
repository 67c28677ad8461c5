//! # Clan Leader
//!
//! The controller side of the Armorique simulation. This crate drives
//! `armorique_rules`: a clan leader gives orders at its current location,
//! a small text command interface maps one line onto one order, and the
//! scenario builders produce the worlds a simulation starts from.
//!
//! ## Core Components
//!
//! - **leader**: The clan leader and the session binding it to a theater
//! - **command**: Text commands answered with a short status line
//! - **scenario**: The default Armorique world and configurable random worlds
//!
//! ## Design Philosophy
//!
//! - **Rules Stay Below**: Every order delegates to a rules operation; the leader keeps no world state
//! - **Injected Randomness**: Anything random takes the caller's `rand::Rng`
//! - **Recoverable Failures**: Refused orders come back as values for the caller to display

pub mod command;
pub mod error;
pub mod leader;
pub mod scenario;

pub use command::*;
pub use error::*;
pub use leader::*;
pub use scenario::*;
