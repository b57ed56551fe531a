//! Session controller: the API the presentation layer drives.
//!
//! A session keeps the roster, configuration, word bank, history, RNG and
//! score ledger across rounds. Each call performs one transition and
//! returns the view of the resulting screen.
//!
//! ```
//! use undercover_engine::core::{GameRng, RoundConfig};
//! use undercover_engine::session::{PhaseView, Session};
//! use undercover_engine::words::{WordBank, WordHistory};
//!
//! let names = ["Ann", "Bob", "Cy", "Dee", "Eve"];
//! let mut session = Session::start(
//!     &names,
//!     RoundConfig::new(5),
//!     WordBank::default(),
//!     WordHistory::new(),
//!     GameRng::new(42),
//! )
//! .unwrap();
//!
//! for _ in 0..5 {
//!     session.reveal_card().unwrap();
//!     session.advance_reveal().unwrap();
//! }
//! assert!(matches!(session.view().phase, PhaseView::Speaking { .. }));
//! ```

use rustc_hash::FxHashSet;
use tracing::info;

use super::view::RoundView;
use crate::core::{ConfigError, GameRng, PlayerId, Result, RoundConfig, TransitionError};
use crate::round::{Phase, RoundAction, RoundState};
use crate::rules::{Assignor, ScoreLedger, Winner};
use crate::words::{HistoryStore, WordBank, WordHistory};

/// What is left when a session ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub standings: Vec<(String, i64)>,
    pub rounds_played: u32,
    /// Updated word history, for the host to persist.
    pub history: WordHistory,
}

/// A sequence of rounds sharing one score ledger.
#[derive(Clone, Debug)]
pub struct Session {
    names: Vec<String>,
    config: RoundConfig,
    bank: WordBank,
    history: WordHistory,
    /// Only forks a fresh stream per round.
    rng: GameRng,
    round_rng: GameRng,
    ledger: ScoreLedger,
    round: RoundState,
    rounds_played: u32,
}

/// Non-blank, unique names matching the configured table size.
fn check_names(names: &[String], config: &RoundConfig) -> std::result::Result<(), ConfigError> {
    if names.len() != config.player_count {
        return Err(ConfigError::NameCountMismatch {
            names: names.len(),
            players: config.player_count,
        });
    }
    let mut seen = FxHashSet::default();
    for (seat, name) in names.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(ConfigError::BlankName { seat });
        }
        if !seen.insert(name.as_str()) {
            return Err(ConfigError::DuplicateName(name.clone()));
        }
    }
    Ok(())
}

fn deal_round(
    names: &[String],
    config: &RoundConfig,
    bank: &WordBank,
    history: &mut WordHistory,
    rng: &mut GameRng,
) -> RoundState {
    let deal = Assignor::new(bank, history).assign(names, config, rng);
    RoundState::new(deal.players)
}

impl Session {
    /// Validate the setup, deal the first round and open the reveal.
    ///
    /// Every name starts the ledger at zero.
    pub fn start<S: AsRef<str>>(
        names: &[S],
        config: RoundConfig,
        bank: WordBank,
        history: WordHistory,
        rng: GameRng,
    ) -> Result<Self> {
        let names: Vec<String> = names.iter().map(|n| n.as_ref().to_string()).collect();
        config.validate()?;
        check_names(&names, &config)?;

        let (mut history, mut rng) = (history, rng);
        let mut round_rng = rng.fork();
        let round = deal_round(&names, &config, &bank, &mut history, &mut round_rng);
        info!(players = names.len(), seed = rng.seed(), "session started");
        Ok(Self {
            ledger: ScoreLedger::with_players(&names),
            names,
            config,
            bank,
            history,
            rng,
            round_rng,
            round,
            rounds_played: 0,
        })
    }

    /// Each round draws from its own fork, so round `k` of a seed is the
    /// same deal however the earlier rounds were played.
    fn deal(&mut self) {
        self.round_rng = self.rng.fork();
        self.round = deal_round(&self.names, &self.config, &self.bank, &mut self.history, &mut self.round_rng);
    }

    fn step(&mut self, action: RoundAction) -> Result<RoundView> {
        let next = self.round.apply(action, &mut self.round_rng, &mut self.ledger)?;
        if next.phase().is_terminal() && !self.round.phase().is_terminal() {
            self.rounds_played += 1;
        }
        self.round = next;
        Ok(self.view())
    }

    fn seat(&self, name: &str) -> Result<PlayerId> {
        self.round
            .find(name)
            .ok_or_else(|| TransitionError::UnknownPlayer(name.to_string()).into())
    }

    /// View of the current screen.
    #[must_use]
    pub fn view(&self) -> RoundView {
        RoundView::build(&self.round, &self.ledger, self.rounds_played + u32::from(!self.round.phase().is_terminal()))
    }

    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    #[must_use]
    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    #[must_use]
    pub fn history(&self) -> &WordHistory {
        &self.history
    }

    #[must_use]
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Completed rounds, i.e. rounds that reached the scoreboard.
    #[must_use]
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn save_history(&self, store: &mut impl HistoryStore) {
        self.history.save_to(store);
    }

    /// Turn over the current player's card.
    pub fn reveal_card(&mut self) -> Result<RoundView> {
        self.step(RoundAction::RevealCard)
    }

    /// Pass the device on; after the last player, discussion starts.
    pub fn advance_reveal(&mut self) -> Result<RoundView> {
        self.step(RoundAction::NextPlayer)
    }

    pub fn proceed_to_vote(&mut self) -> Result<RoundView> {
        self.step(RoundAction::ProceedToVote)
    }

    /// The table's majority vote landed on `name`.
    pub fn confirm_vote(&mut self, name: &str) -> Result<RoundView> {
        let seat = self.seat(name)?;
        self.step(RoundAction::Vote(seat))
    }

    pub fn choose_avenger_victim(&mut self, name: &str) -> Result<RoundView> {
        let seat = self.seat(name)?;
        self.step(RoundAction::AvengerVictim(seat))
    }

    /// Submit Mr. White's guess; `true` if it was the civilian word.
    pub fn submit_guess(&mut self, text: &str) -> Result<bool> {
        self.step(RoundAction::Guess(text.to_string()))?;
        Ok(matches!(
            self.round.result(),
            Some(result) if result.winner == Winner::MrWhite
        ))
    }

    /// Dismiss an informational screen (elimination, Boomerang, failed
    /// guess, round result).
    pub fn acknowledge_and_continue(&mut self) -> Result<RoundView> {
        self.step(RoundAction::Continue)
    }

    /// Deal the next round from the scoreboard.
    pub fn next_round(&mut self) -> Result<RoundView> {
        let phase = self.round.phase();
        if !phase.is_terminal() {
            return Err(TransitionError::WrongPhase {
                action: "next_round",
                phase: phase.name(),
            }
            .into());
        }
        self.deal();
        Ok(self.view())
    }

    /// End the session, dropping the ledger.
    #[must_use]
    pub fn quit_session(self) -> SessionSummary {
        let standings = self.ledger.standings();
        info!(rounds = self.rounds_played, "session ended");
        SessionSummary {
            standings,
            rounds_played: self.rounds_played,
            history: self.history,
        }
    }

    /// Phase of the current round.
    #[must_use]
    pub fn phase(&self) -> &Phase {
        self.round.phase()
    }
}
