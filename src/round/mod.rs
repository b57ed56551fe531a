//! The round state machine.
//!
//! - `state`: `RoundState` and its `Phase`
//! - `machine`: `RoundAction` and the transition function
//! - `guess`: accent-insensitive word comparison for Mr. White

pub mod guess;
pub mod machine;
pub mod state;

pub use guess::{fold_word, guess_matches};
pub use machine::{speaking_order, RoundAction};
pub use state::{Phase, RoundState, SpeakingOrder};
