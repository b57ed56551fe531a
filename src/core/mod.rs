//! Core types: seats, roles and powers, configuration, errors, RNG.
//!
//! Everything else in the crate builds on these.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod role;

pub use config::{RoundConfig, AVENGER_MIN_PLAYERS, MAX_PLAYERS, MIN_PLAYERS};
pub use error::{ConfigError, EngineError, Result, TransitionError};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use role::{Faction, Player, Power, Role};
