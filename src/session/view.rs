//! Read-only snapshots handed to the presentation layer.
//!
//! Views only carry what the current screen may show. Secret roles and
//! words appear in exactly two places: the revealed card of the player
//! holding the device, and the identity of a player once eliminated.

use serde::{Deserialize, Serialize};

use crate::core::{Player, PlayerId, Power, Role};
use crate::round::{Phase, RoundState};
use crate::rules::{Award, ScoreLedger, Winner};

/// Publicly visible facts about one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub name: String,
    pub eliminated: bool,
    /// Their Boomerang already bounced a vote.
    pub boomerang_spent: bool,
    /// Holds the Goddess of Justice: she settles ties, in or out.
    pub tie_breaker: bool,
}

impl PlayerView {
    fn of(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            eliminated: player.eliminated,
            boomerang_spent: player.boomerang_spent(),
            tie_breaker: player.power == Some(Power::GoddessOfJustice),
        }
    }
}

/// Secret card of the player currently holding the device.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub role: Role,
    /// `None` for Mr. White.
    pub word: Option<String>,
    pub power: Option<Power>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseView {
    Reveal {
        seat: usize,
        name: String,
        /// `None` until the card is turned over.
        card: Option<CardView>,
        last: bool,
    },
    Speaking {
        order: Vec<String>,
    },
    Voting {
        candidates: Vec<String>,
    },
    PlayerEliminated {
        name: String,
        role: Role,
        power: Option<Power>,
        first: bool,
    },
    BoomerangEffect {
        name: String,
    },
    AvengerRevenge {
        avenger: String,
        victims: Vec<String>,
    },
    MrWhiteGuess {
        name: String,
    },
    MrWhiteFailed {
        name: String,
    },
    RoundOver {
        winner: Winner,
        first_eliminated: Option<String>,
    },
    Scoreboard {
        winner: Winner,
        awards: Vec<Award>,
        standings: Vec<(String, i64)>,
    },
}

/// Everything the current screen needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundView {
    /// 1-based.
    pub round_number: u32,
    pub phase: PhaseView,
    pub players: Vec<PlayerView>,
}

impl RoundView {
    #[must_use]
    pub fn build(round: &RoundState, ledger: &ScoreLedger, round_number: u32) -> Self {
        let name = |id: PlayerId| round.players()[id].name.clone();
        let active_names = || -> Vec<String> { round.active_players().map(|(_, p)| p.name.clone()).collect() };

        let phase = match round.phase() {
            Phase::Reveal { index, revealed } => {
                let player = round.players().values().nth(*index);
                PhaseView::Reveal {
                    seat: *index,
                    name: player.map(|p| p.name.clone()).unwrap_or_default(),
                    card: player.filter(|_| *revealed).map(|p| CardView {
                        role: p.role,
                        word: p.word.clone(),
                        power: p.power,
                    }),
                    last: index + 1 == round.players().player_count(),
                }
            }
            Phase::Speaking { order } => PhaseView::Speaking {
                order: order.iter().map(|id| name(*id)).collect(),
            },
            Phase::Voting => PhaseView::Voting {
                candidates: active_names(),
            },
            Phase::PlayerEliminated { player, first } => {
                let p = &round.players()[*player];
                PhaseView::PlayerEliminated {
                    name: p.name.clone(),
                    role: p.role,
                    power: p.power,
                    first: *first,
                }
            }
            Phase::BoomerangEffect { player } => PhaseView::BoomerangEffect { name: name(*player) },
            Phase::AvengerRevenge { avenger } => PhaseView::AvengerRevenge {
                avenger: name(*avenger),
                victims: active_names(),
            },
            Phase::MrWhiteGuess { mr_white } => PhaseView::MrWhiteGuess { name: name(*mr_white) },
            Phase::MrWhiteFailed { mr_white } => PhaseView::MrWhiteFailed { name: name(*mr_white) },
            Phase::RoundOver { result } => PhaseView::RoundOver {
                winner: result.winner,
                first_eliminated: result.first_eliminated.map(name),
            },
            Phase::Scoreboard { result, awards } => PhaseView::Scoreboard {
                winner: result.winner,
                awards: awards.clone(),
                standings: ledger.standings(),
            },
        };

        Self {
            round_number,
            phase,
            players: round.players().values().map(PlayerView::of).collect(),
        }
    }

    /// Names of players out of the round.
    pub fn eliminated(&self) -> impl Iterator<Item = &str> {
        self.players
            .iter()
            .filter(|p| p.eliminated)
            .map(|p| p.name.as_str())
    }
}
