//! # undercover-engine
//!
//! Rules engine for the pass-the-device party game Undercover.
//!
//! Civilians share a secret word, Undercovers hold a related one, and
//! Mr. White gets nothing and must bluff. Players give clues, vote someone
//! out, and the round ends when one faction wins. Optional powers (Jester,
//! Boomerang, Goddess of Justice, Ghost, Avenger) bend the rules.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: a round is a value. `RoundState::apply` maps a
//!    state and an action to the next state, so every path is testable
//!    without a UI.
//!
//! 2. **Injected randomness**: all draws go through a seeded [`GameRng`].
//!    The same seed replays the same session.
//!
//! 3. **No hidden globals**: the word bank, the history and the ledger are
//!    plain values owned by a [`Session`].
//!
//! ## Modules
//!
//! - `core`: seats, roles, powers, configuration, errors, RNG
//! - `words`: word pair dataset and recent-words history
//! - `rules`: dealing, win rule, scoring
//! - `round`: the round state machine
//! - `session`: the driving API and screen views

pub mod core;
pub mod round;
pub mod rules;
pub mod session;
pub mod words;

pub use crate::core::{
    ConfigError, EngineError, Faction, GameRng, GameRngState, Player, PlayerId, PlayerMap, Power,
    Result, Role, RoundConfig, TransitionError,
};

pub use crate::words::{HistoryStore, WordBank, WordHistory, WordPair, WordSource};

pub use crate::rules::{Assignor, Award, RoundResult, ScoreLedger, Winner};

pub use crate::round::{Phase, RoundAction, RoundState};

pub use crate::session::{PhaseView, RoundView, Session, SessionSummary};
