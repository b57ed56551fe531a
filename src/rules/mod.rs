//! Game rules independent of round flow.
//!
//! - `assign`: dealing words, roles and powers
//! - `win`: the faction win check
//! - `scoring`: per-round awards and the session ledger

pub mod assign;
pub mod scoring;
pub mod win;

pub use assign::{distribute_powers, Assignor, Deal, RoleCounts};
pub use scoring::{round_awards, Award, AwardReason, RoundResult, ScoreLedger};
pub use win::{active_counts, check_winner, Winner};
