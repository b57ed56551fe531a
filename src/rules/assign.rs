//! Dealing a round: word pair, roles, powers.
//!
//! ## Steps
//!
//! 1. Pick a pair that shares no word with the history (any pair once every
//!    pair is spent) and record it in the history straight away.
//! 2. With random roles, redraw the faction sizes for this round.
//! 3. Shuffle the role deck over the seats.
//! 4. Flip a coin for which word of the pair the civilians get.
//! 5. Hand out the enabled powers to distinct random seats.
//!
//! The pair is recorded even if the round is later abandoned.

use smallvec::SmallVec;
use tracing::{debug, info};

use crate::core::{GameRng, Player, PlayerMap, Power, Role, RoundConfig};
use crate::words::{WordBank, WordHistory, WordPair};

/// Random faction sizes only include Mr. Whites from this table size up.
pub const RANDOM_MR_WHITE_MIN_PLAYERS: usize = 5;

/// Faction sizes used for one deal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleCounts {
    pub civilians: usize,
    pub undercovers: usize,
    pub mr_whites: usize,
}

impl RoleCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.civilians + self.undercovers + self.mr_whites
    }

    /// Counts as configured, without any redraw.
    #[must_use]
    pub fn from_config(config: &RoundConfig) -> Self {
        debug_assert!(config.bad_count() <= config.player_count, "more bad roles than players");
        Self {
            civilians: config.civilian_count(),
            undercovers: config.undercover_count,
            mr_whites: config.mr_white_count,
        }
    }

    /// Redraw bad-role counts: 1..=n/2 bad players, Mr. Whites only from
    /// five players up.
    pub fn random(player_count: usize, rng: &mut GameRng) -> Self {
        let max_bad = player_count / 2;
        if max_bad == 0 {
            return Self {
                civilians: player_count,
                undercovers: 0,
                mr_whites: 0,
            };
        }
        let total_bad = rng.gen_range_inclusive(1..=max_bad);
        let mr_whites = if player_count >= RANDOM_MR_WHITE_MIN_PLAYERS {
            rng.gen_range_inclusive(0..=total_bad)
        } else {
            0
        };
        Self {
            civilians: player_count - total_bad,
            undercovers: total_bad - mr_whites,
            mr_whites,
        }
    }

    fn deck(&self) -> Vec<Role> {
        std::iter::repeat(Role::Civilian)
            .take(self.civilians)
            .chain(std::iter::repeat(Role::Undercover).take(self.undercovers))
            .chain(std::iter::repeat(Role::MrWhite).take(self.mr_whites))
            .collect()
    }
}

/// Everything dealt for one round.
#[derive(Clone, Debug)]
pub struct Deal {
    pub players: PlayerMap<Player>,
    pub pair: WordPair,
    pub civilian_word: String,
    pub undercover_word: String,
    pub counts: RoleCounts,
}

/// Deals rounds from a word bank, steering away from recent words.
#[derive(Debug)]
pub struct Assignor<'a> {
    bank: &'a WordBank,
    history: &'a mut WordHistory,
}

impl<'a> Assignor<'a> {
    pub fn new(bank: &'a WordBank, history: &'a mut WordHistory) -> Self {
        Self { bank, history }
    }

    /// Pick a pair and record it in the history.
    pub fn select_pair(&mut self, rng: &mut GameRng) -> WordPair {
        let fresh: Vec<&WordPair> = self
            .bank
            .pairs()
            .iter()
            .filter(|pair| !self.history.touches(pair))
            .collect();
        let pair = if fresh.is_empty() {
            debug!("every word pair used recently, picking from the full bank");
            let all: Vec<&WordPair> = self.bank.pairs().iter().collect();
            rng.choose(&all).copied()
        } else {
            rng.choose(&fresh).copied()
        };
        let pair = pair.cloned().unwrap_or_else(|| {
            let (a, b) = WordBank::FALLBACK;
            WordPair::new(a, b)
        });
        self.history.record_pair(&pair);
        pair
    }

    /// Deal a round for `names`, seat `i` getting `names[i]`.
    ///
    /// The configuration must already be validated and match `names.len()`.
    pub fn assign<S: AsRef<str>>(&mut self, names: &[S], config: &RoundConfig, rng: &mut GameRng) -> Deal {
        let player_count = names.len();
        debug_assert_eq!(player_count, config.player_count, "name count differs from config");

        let pair = self.select_pair(rng);

        let counts = if config.random_roles {
            RoleCounts::random(player_count, rng)
        } else {
            RoleCounts::from_config(config)
        };
        let mut roles = counts.deck();
        rng.shuffle(&mut roles);

        let (civilian_word, undercover_word) = if rng.gen_bool(0.5) {
            (pair.first.clone(), pair.second.clone())
        } else {
            (pair.second.clone(), pair.first.clone())
        };

        let powers = distribute_powers(config.powers.iter().copied(), player_count, rng);

        let players = PlayerMap::new(player_count, |seat| {
            let role = roles[seat.index()];
            let word = match role {
                Role::Civilian => Some(civilian_word.clone()),
                Role::Undercover => Some(undercover_word.clone()),
                Role::MrWhite => None,
            };
            Player::new(names[seat.index()].as_ref(), role, word, powers[seat.index()])
        });

        info!(
            players = player_count,
            civilians = counts.civilians,
            undercovers = counts.undercovers,
            mr_whites = counts.mr_whites,
            "round dealt"
        );

        Deal {
            players,
            pair,
            civilian_word,
            undercover_word,
            counts,
        }
    }
}

/// Give each power to a distinct random seat; surplus powers are dropped.
pub fn distribute_powers(
    powers: impl IntoIterator<Item = Power>,
    player_count: usize,
    rng: &mut GameRng,
) -> Vec<Option<Power>> {
    let mut powers: SmallVec<[Power; 5]> = powers.into_iter().collect();
    rng.shuffle(&mut powers);
    let mut seats: Vec<usize> = (0..player_count).collect();
    rng.shuffle(&mut seats);

    let mut assigned = vec![None; player_count];
    for (seat, power) in seats.into_iter().zip(powers) {
        assigned[seat] = Some(power);
    }
    assigned
}
