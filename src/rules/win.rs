//! Win detection over the players still in the round.

use serde::{Deserialize, Serialize};

use crate::core::{Faction, Player};

/// Outcome of a finished round. "No winner yet" is `Option::None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Civilians,
    /// Undercovers and Mr. Whites together.
    Bad,
    /// A Mr. White guessed the civilian word.
    MrWhite,
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Winner::Civilians => "Civilians win the round",
            Winner::Bad => "Undercovers & Mr. White win the round",
            Winner::MrWhite => "Mr. White guessed the word and wins the round",
        })
    }
}

/// Active civilians and active bad players.
#[must_use]
pub fn active_counts<'a>(players: impl IntoIterator<Item = &'a Player>) -> (usize, usize) {
    players
        .into_iter()
        .filter(|p| p.is_active())
        .fold((0, 0), |(civ, bad), p| match p.faction() {
            Faction::Civilian => (civ + 1, bad),
            Faction::Bad => (civ, bad + 1),
        })
}

/// Civilians win once no bad player is left; the bad side wins once at most
/// one civilian is left. Otherwise the round goes on.
#[must_use]
pub fn check_winner<'a>(players: impl IntoIterator<Item = &'a Player>) -> Option<Winner> {
    let (civilians, bad) = active_counts(players);
    if bad == 0 {
        Some(Winner::Civilians)
    } else if civilians <= 1 {
        Some(Winner::Bad)
    } else {
        None
    }
}
