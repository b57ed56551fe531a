//! Round configuration.
//!
//! The setup screen builds a `RoundConfig` and hands it to the session:
//!
//! ```
//! use undercover_engine::core::{Power, RoundConfig};
//!
//! let config = RoundConfig::new(6)
//!     .with_undercovers(1)
//!     .with_mr_whites(1)
//!     .with_power(Power::Jester);
//!
//! assert_eq!(config.civilian_count(), 4);
//! assert!(config.validate().is_ok());
//! ```
//!
//! The engine never clamps counts. Anything out of range is rejected by
//! `validate` and has to be fixed by the caller.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::role::Power;

/// Smallest playable table.
pub const MIN_PLAYERS: usize = 3;

/// Largest table the setup screen offers.
pub const MAX_PLAYERS: usize = 20;

/// The Avenger needs enough players left to take someone down.
pub const AVENGER_MIN_PLAYERS: usize = 5;

/// Parameters for dealing a round.
///
/// Powers live in a `BTreeSet` so that iteration order, and therefore the
/// seeded power shuffle, is reproducible.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub player_count: usize,
    pub undercover_count: usize,
    pub mr_white_count: usize,
    pub powers: BTreeSet<Power>,
    /// Redraw the faction sizes every round, ignoring the two counts above.
    pub random_roles: bool,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self::new(5)
    }
}

impl RoundConfig {
    /// One undercover, no Mr. White, no powers.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            undercover_count: 1,
            mr_white_count: 0,
            powers: BTreeSet::new(),
            random_roles: false,
        }
    }

    #[must_use]
    pub fn with_undercovers(mut self, count: usize) -> Self {
        self.undercover_count = count;
        self
    }

    #[must_use]
    pub fn with_mr_whites(mut self, count: usize) -> Self {
        self.mr_white_count = count;
        self
    }

    #[must_use]
    pub fn with_power(mut self, power: Power) -> Self {
        self.powers.insert(power);
        self
    }

    #[must_use]
    pub fn with_powers(mut self, powers: impl IntoIterator<Item = Power>) -> Self {
        self.powers.extend(powers);
        self
    }

    #[must_use]
    pub fn with_random_roles(mut self, enabled: bool) -> Self {
        self.random_roles = enabled;
        self
    }

    /// Undercovers plus Mr. Whites.
    #[must_use]
    pub fn bad_count(&self) -> usize {
        self.undercover_count + self.mr_white_count
    }

    /// Saturates at zero; `validate` reports the overflow.
    #[must_use]
    pub fn civilian_count(&self) -> usize {
        self.player_count.saturating_sub(self.bad_count())
    }

    /// Upper bound on bad roles for this table size.
    #[must_use]
    pub fn max_bad(&self) -> usize {
        self.player_count / 2
    }

    /// Check every configuration rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.player_count;
        if n < MIN_PLAYERS {
            return Err(ConfigError::TooFewPlayers { min: MIN_PLAYERS, got: n });
        }
        if n > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers { max: MAX_PLAYERS, got: n });
        }
        let bad = self.bad_count();
        if bad < 1 || bad > self.max_bad() {
            return Err(ConfigError::BadRoleCount {
                bad,
                max: self.max_bad(),
            });
        }
        if let Some(power) = self.powers.iter().find(|p| n < p.min_players()) {
            return Err(ConfigError::PowerRequiresPlayers {
                power: *power,
                min: power.min_players(),
                got: n,
            });
        }
        Ok(())
    }
}
