//! Cross-round score ledger.
//!
//! Points are keyed by player name and accumulate for the whole session.
//! Awards for one round:
//!
//! | Event | Points | To |
//! |-------|--------|----|
//! | Jester eliminated first | 4 | the Jester, whoever wins |
//! | Civilians win | 2 | every civilian of the round |
//! | Bad side wins | 10 | every undercover and Mr. White |
//! | Mr. White guesses the word | 6 | that Mr. White |

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::win::Winner;
use crate::core::{Faction, Player, PlayerId, PlayerMap, Power, Role};

pub const JESTER_BONUS: i64 = 4;
pub const CIVILIAN_WIN_POINTS: i64 = 2;
pub const BAD_WIN_POINTS: i64 = 10;
pub const MR_WHITE_GUESS_POINTS: i64 = 6;

/// How a finished round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub winner: Winner,
    /// First player removed by a vote this round, if any. Set at that vote
    /// and kept whichever later elimination ends the round.
    pub first_eliminated: Option<PlayerId>,
    /// Mr. White whose guess ended the round.
    pub guesser: Option<PlayerId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AwardReason {
    JesterFirstOut,
    CivilianWin,
    BadWin,
    MrWhiteGuess,
}

/// Points granted to one player for one reason.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub name: String,
    pub points: i64,
    pub reason: AwardReason,
}

/// Awards earned in a finished round, in the order they are applied.
#[must_use]
pub fn round_awards(result: &RoundResult, players: &PlayerMap<Player>) -> Vec<Award> {
    let mut awards = Vec::new();
    let mut grant = |p: &Player, points, reason| {
        awards.push(Award {
            name: p.name.clone(),
            points,
            reason,
        })
    };

    if let Some(first) = result.first_eliminated.and_then(|id| players.get(id)) {
        if first.power == Some(Power::Jester) {
            grant(first, JESTER_BONUS, AwardReason::JesterFirstOut);
        }
    }

    match result.winner {
        Winner::Civilians => players
            .values()
            .filter(|p| p.faction() == Faction::Civilian)
            .for_each(|p| grant(p, CIVILIAN_WIN_POINTS, AwardReason::CivilianWin)),
        Winner::Bad => players
            .values()
            .filter(|p| p.faction() == Faction::Bad)
            .for_each(|p| grant(p, BAD_WIN_POINTS, AwardReason::BadWin)),
        Winner::MrWhite => {
            let guesser = result
                .guesser
                .and_then(|id| players.get(id))
                .filter(|p| p.role == Role::MrWhite)
                .or_else(|| players.values().find(|p| p.role == Role::MrWhite));
            if let Some(p) = guesser {
                grant(p, MR_WHITE_GUESS_POINTS, AwardReason::MrWhiteGuess);
            }
        }
    }

    awards
}

/// Running totals for a session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLedger {
    totals: FxHashMap<String, i64>,
}

impl ScoreLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every name present at zero points.
    pub fn with_players<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            totals: names
                .into_iter()
                .map(|n| (n.as_ref().to_string(), 0))
                .collect(),
        }
    }

    /// Total for `name`, zero if never scored.
    #[must_use]
    pub fn score(&self, name: &str) -> i64 {
        self.totals.get(name).copied().unwrap_or(0)
    }

    pub fn add(&mut self, name: &str, points: i64) {
        *self.totals.entry(name.to_string()).or_insert(0) += points;
    }

    /// Score a finished round and return what was granted.
    pub fn apply_round_result(&mut self, result: &RoundResult, players: &PlayerMap<Player>) -> Vec<Award> {
        let awards = round_awards(result, players);
        for award in &awards {
            self.add(&award.name, award.points);
        }
        info!(winner = ?result.winner, awards = awards.len(), "round scored");
        awards
    }

    /// Highest score first, ties by name.
    #[must_use]
    pub fn standings(&self) -> Vec<(String, i64)> {
        let mut rows: Vec<_> = self.totals.iter().map(|(n, s)| (n.clone(), *s)).collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}
