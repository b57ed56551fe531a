//! Roles, factions, special powers and the per-round player record.

use serde::{Deserialize, Serialize};

/// Secret role dealt to a player for one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Holds the majority word.
    Civilian,
    /// Holds the neighbouring word and hides among the civilians.
    Undercover,
    /// Holds no word at all.
    MrWhite,
}

impl Role {
    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Role::Civilian => "Civilian",
            Role::Undercover => "Undercover",
            Role::MrWhite => "Mr. White",
        }
    }

    #[must_use]
    pub const fn faction(self) -> Faction {
        match self {
            Role::Civilian => Faction::Civilian,
            Role::Undercover | Role::MrWhite => Faction::Bad,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Win-check and scoring grouping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Civilian,
    /// Undercovers and Mr. Whites together.
    Bad,
}

/// Optional special power, at most one per player per round.
///
/// Goddess of Justice and Ghost only matter for the out-of-band vote count,
/// so the engine carries them for display but never acts on them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Power {
    /// +4 points when eliminated first.
    Jester,
    /// The first majority vote against this player is deflected.
    Boomerang,
    /// Breaks tied votes, even once eliminated.
    GoddessOfJustice,
    /// Keeps voting after elimination.
    Ghost,
    /// Takes one more active player down when eliminated.
    Avenger,
}

impl Power {
    /// Every power, in catalogue order.
    pub const ALL: [Power; 5] = [
        Power::Jester,
        Power::Boomerang,
        Power::GoddessOfJustice,
        Power::Ghost,
        Power::Avenger,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Power::Jester => "The Jester",
            Power::Boomerang => "The Boomerang",
            Power::GoddessOfJustice => "Goddess of Justice",
            Power::Ghost => "The Ghost",
            Power::Avenger => "The Avenger",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Power::Jester => "Earns 4 extra points if eliminated first.",
            Power::Boomerang => {
                "The first time the Boomerang gets the majority of votes, the votes bounce back \
                 and nobody is eliminated."
            }
            Power::GoddessOfJustice => {
                "On a tied vote she decides who is eliminated, even after being eliminated herself."
            }
            Power::Ghost => "Can still vote after being eliminated.",
            Power::Avenger => {
                "When eliminated, takes someone else down too (requires 5 players or more)."
            }
        }
    }

    /// Smallest table size at which this power may be enabled.
    #[must_use]
    pub const fn min_players(self) -> usize {
        match self {
            Power::Avenger => super::config::AVENGER_MIN_PLAYERS,
            _ => super::config::MIN_PLAYERS,
        }
    }
}

impl std::fmt::Display for Power {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A player's state for the current round.
///
/// Only the name outlives the round; everything else is dealt again by the
/// assignor. The round machine is the only writer of `eliminated` and
/// `power_used`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub role: Role,
    /// `None` for Mr. White.
    pub word: Option<String>,
    pub power: Option<Power>,
    pub eliminated: bool,
    pub power_used: bool,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<String>, role: Role, word: Option<String>, power: Option<Power>) -> Self {
        Self {
            name: name.into(),
            role,
            word,
            power,
            eliminated: false,
            power_used: false,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.eliminated
    }

    #[must_use]
    pub fn faction(&self) -> Faction {
        self.role.faction()
    }

    /// Holds `power` and has not spent it yet.
    #[must_use]
    pub fn has_unused(&self, power: Power) -> bool {
        self.power == Some(power) && !self.power_used
    }

    /// Boomerang already deflected a vote this round.
    #[must_use]
    pub fn boomerang_spent(&self) -> bool {
        self.power == Some(Power::Boomerang) && self.power_used
    }
}
