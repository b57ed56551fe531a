//! Round state: the roster plus the phase the table is in.
//!
//! ## Phases
//!
//! ```text
//! Reveal(0..n) -> Speaking -> Voting -> PlayerEliminated ---------> RoundOver -> Scoreboard
//!                    ^           |            |   ^      \                ^
//!                    |           v            v   |       v               |
//!                    +---- BoomerangEffect  AvengerRevenge  MrWhiteGuess -+
//!                    |                                         |
//!                    +-------------------------------- MrWhiteFailed
//! ```
//!
//! `Scoreboard` is terminal. The session deals a fresh `RoundState` for the
//! next round.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Player, PlayerId, PlayerMap, Role};
use crate::rules::{Award, RoundResult};

/// Seats in speaking order. Inline for typical table sizes.
pub type SpeakingOrder = SmallVec<[PlayerId; 8]>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Passing the device: seat `index` is looking at their card.
    Reveal { index: usize, revealed: bool },
    /// Discussion, one clue each in `order`.
    Speaking { order: SpeakingOrder },
    /// The table picks who to vote out.
    Voting,
    /// `player` was just removed. `first` marks the round's first vote-out.
    PlayerEliminated { player: PlayerId, first: bool },
    /// The vote against `player` bounced off their Boomerang.
    BoomerangEffect { player: PlayerId },
    /// `avenger` picks someone to take down with them.
    AvengerRevenge { avenger: PlayerId },
    /// `mr_white` gets one guess at the civilian word.
    MrWhiteGuess { mr_white: PlayerId },
    /// `mr_white` guessed wrong and the round goes on.
    MrWhiteFailed { mr_white: PlayerId },
    RoundOver { result: RoundResult },
    /// Terminal. `awards` is what the round paid out.
    Scoreboard { result: RoundResult, awards: Vec<Award> },
}

impl Phase {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Reveal { .. } => "Reveal",
            Phase::Speaking { .. } => "Speaking",
            Phase::Voting => "Voting",
            Phase::PlayerEliminated { .. } => "PlayerEliminated",
            Phase::BoomerangEffect { .. } => "BoomerangEffect",
            Phase::AvengerRevenge { .. } => "AvengerRevenge",
            Phase::MrWhiteGuess { .. } => "MrWhiteGuess",
            Phase::MrWhiteFailed { .. } => "MrWhiteFailed",
            Phase::RoundOver { .. } => "RoundOver",
            Phase::Scoreboard { .. } => "Scoreboard",
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Scoreboard { .. })
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One round in progress.
///
/// Transitions go through [`RoundState::apply`], which returns a new value
/// and leaves `self` untouched on error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub(crate) players: PlayerMap<Player>,
    pub(crate) phase: Phase,
    /// Kept for the whole round so the Jester bonus survives later
    /// eliminations.
    pub(crate) first_eliminated: Option<PlayerId>,
}

impl RoundState {
    /// Start a round at the first card reveal.
    #[must_use]
    pub fn new(players: PlayerMap<Player>) -> Self {
        Self {
            players,
            phase: Phase::Reveal {
                index: 0,
                revealed: false,
            },
            first_eliminated: None,
        }
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Seat of the player called `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<PlayerId> {
        self.players.position(|p| p.name == name)
    }

    /// First player voted out this round.
    #[must_use]
    pub fn first_eliminated(&self) -> Option<PlayerId> {
        self.first_eliminated
    }

    pub fn active_players(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players.iter().filter(|(_, p)| p.is_active())
    }

    pub fn eliminated_players(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players.iter().filter(|(_, p)| p.eliminated)
    }

    /// The word Mr. White has to find.
    #[must_use]
    pub fn civilian_word(&self) -> Option<&str> {
        self.players
            .values()
            .find(|p| p.role == Role::Civilian)
            .and_then(|p| p.word.as_deref())
    }

    /// Result of the round once it is over.
    #[must_use]
    pub fn result(&self) -> Option<&RoundResult> {
        match &self.phase {
            Phase::RoundOver { result } | Phase::Scoreboard { result, .. } => Some(result),
            _ => None,
        }
    }
}
