//! Error types.
//!
//! Two families reach the caller: a rejected configuration, and an action
//! that is not legal in the current phase. Both are caller bugs rather than
//! game events; the presentation layer is expected to only offer legal
//! actions. A missing or corrupt word dataset is not an error at all.

use thiserror::Error;

use super::role::Power;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least {min} players are required, got {got}")]
    TooFewPlayers { min: usize, got: usize },

    #[error("at most {max} players are supported, got {got}")]
    TooManyPlayers { max: usize, got: usize },

    #[error("{names} names given for a {players}-player configuration")]
    NameCountMismatch { names: usize, players: usize },

    #[error("undercover + mr. white must be between 1 and {max}, got {bad}")]
    BadRoleCount { bad: usize, max: usize },

    #[error("{power} requires at least {min} players, got {got}")]
    PowerRequiresPlayers { power: Power, min: usize, got: usize },

    #[error("player name at seat {seat} is blank")]
    BlankName { seat: usize },

    #[error("player name {0:?} is used twice")]
    DuplicateName(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("{action} is not allowed during {phase}")]
    WrongPhase {
        action: &'static str,
        phase: &'static str,
    },

    #[error("no player named {0:?} in this round")]
    UnknownPlayer(String),

    #[error("{0:?} is already eliminated")]
    PlayerEliminated(String),

    #[error("{0:?} cannot target themselves")]
    SelfTarget(String),

    #[error("the current card has not been revealed yet")]
    NotRevealed,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid transition: {0}")]
    Transition(#[from] TransitionError),
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
