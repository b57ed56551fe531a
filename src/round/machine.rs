//! Round transitions.
//!
//! Each caller action maps a `RoundState` to the next one. Illegal actions
//! are rejected with a [`TransitionError`] and the current state is kept.
//!
//! Elimination consequences resolve in a fixed order for the player just
//! removed: an unspent Avenger first takes someone down, then Mr. White
//! gets a guess, and only then is the win rule checked. An Avenger's victim
//! goes through the same resolution, so chains nest. An Avenger who is
//! also Mr. White spends the elimination on revenge and gets no guess.

use tracing::{debug, info};

use super::guess::guess_matches;
use super::state::{Phase, RoundState, SpeakingOrder};
use crate::core::{GameRng, Player, PlayerId, PlayerMap, Power, Role, TransitionError};
use crate::rules::{check_winner, Award, RoundResult, ScoreLedger, Winner};

/// Caller input driving a round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundAction {
    /// Show the current card to the player holding the device.
    RevealCard,
    /// Hide the card and pass to the next seat.
    NextPlayer,
    /// End discussion and open the vote.
    ProceedToVote,
    /// The majority voted against this seat.
    Vote(PlayerId),
    /// The Avenger's pick.
    AvengerVictim(PlayerId),
    /// Mr. White's free-text guess.
    Guess(String),
    /// Dismiss an informational screen.
    Continue,
}

impl RoundAction {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            RoundAction::RevealCard => "reveal_card",
            RoundAction::NextPlayer => "advance_reveal",
            RoundAction::ProceedToVote => "proceed_to_vote",
            RoundAction::Vote(_) => "confirm_vote",
            RoundAction::AvengerVictim(_) => "choose_avenger_victim",
            RoundAction::Guess(_) => "submit_guess",
            RoundAction::Continue => "acknowledge_and_continue",
        }
    }
}

/// Speaking order: a random non-Mr. White starter (any active player if
/// only Mr. Whites are left), then the seating order from there, skipping
/// eliminated players.
pub fn speaking_order(players: &PlayerMap<Player>, rng: &mut GameRng) -> SpeakingOrder {
    let active: Vec<PlayerId> = players
        .iter()
        .filter(|(_, p)| p.is_active())
        .map(|(id, _)| id)
        .collect();
    let starters: Vec<PlayerId> = active
        .iter()
        .copied()
        .filter(|id| players[*id].role != Role::MrWhite)
        .collect();
    let pool = if starters.is_empty() { &active } else { &starters };
    let Some(&start) = rng.choose(pool) else {
        return SpeakingOrder::new();
    };

    let n = players.player_count();
    (0..n)
        .map(|offset| PlayerId::new(((start.index() + offset) % n) as u8))
        .filter(|id| players[*id].is_active())
        .collect()
}

impl RoundState {
    /// Apply `action`, returning the next state.
    ///
    /// `ledger` is only written when leaving `RoundOver`.
    pub fn apply(
        &self,
        action: RoundAction,
        rng: &mut GameRng,
        ledger: &mut ScoreLedger,
    ) -> Result<RoundState, TransitionError> {
        let mut next = self.clone();
        next.phase = match (&self.phase, action) {
            (Phase::Reveal { index, revealed: false }, RoundAction::RevealCard) => Phase::Reveal {
                index: *index,
                revealed: true,
            },
            (Phase::Reveal { revealed: false, .. }, RoundAction::NextPlayer) => {
                return Err(TransitionError::NotRevealed);
            }
            (Phase::Reveal { index, revealed: true }, RoundAction::NextPlayer) => {
                if index + 1 < self.players.player_count() {
                    Phase::Reveal {
                        index: index + 1,
                        revealed: false,
                    }
                } else {
                    next.speaking(rng)
                }
            }
            (Phase::Speaking { .. }, RoundAction::ProceedToVote) => Phase::Voting,
            (Phase::Voting, RoundAction::Vote(target)) => {
                self.check_target(target)?;
                next.vote_out(target)
            }
            (Phase::BoomerangEffect { .. }, RoundAction::Continue) => next.speaking(rng),
            (Phase::PlayerEliminated { player, .. }, RoundAction::Continue) => next.resolve_elimination(*player, rng),
            (Phase::AvengerRevenge { avenger }, RoundAction::AvengerVictim(victim)) => {
                if victim == *avenger {
                    return Err(TransitionError::SelfTarget(self.players[victim].name.clone()));
                }
                self.check_target(victim)?;
                next.players[victim].eliminated = true;
                info!(avenger = %self.players[*avenger].name, victim = %self.players[victim].name, "avenger takes a player down");
                Phase::PlayerEliminated {
                    player: victim,
                    first: false,
                }
            }
            (Phase::MrWhiteGuess { mr_white }, RoundAction::Guess(text)) => next.judge_guess(*mr_white, &text),
            (Phase::MrWhiteFailed { .. }, RoundAction::Continue) => next.after_consequences(rng),
            (Phase::RoundOver { result }, RoundAction::Continue) => {
                let awards: Vec<Award> = ledger.apply_round_result(result, &self.players);
                Phase::Scoreboard {
                    result: *result,
                    awards,
                }
            }
            (phase, action) => {
                return Err(TransitionError::WrongPhase {
                    action: action.name(),
                    phase: phase.name(),
                });
            }
        };
        debug!(from = self.phase.name(), to = next.phase.name(), "round transition");
        Ok(next)
    }

    /// Target must be a seat of this round and still active.
    fn check_target(&self, target: PlayerId) -> Result<(), TransitionError> {
        match self.players.get(target) {
            None => Err(TransitionError::UnknownPlayer(target.to_string())),
            Some(p) if p.eliminated => Err(TransitionError::PlayerEliminated(p.name.clone())),
            Some(_) => Ok(()),
        }
    }

    fn speaking(&self, rng: &mut GameRng) -> Phase {
        Phase::Speaking {
            order: speaking_order(&self.players, rng),
        }
    }

    fn vote_out(&mut self, target: PlayerId) -> Phase {
        let player = &mut self.players[target];
        if player.has_unused(Power::Boomerang) {
            player.power_used = true;
            info!(player = %player.name, "boomerang deflects the vote");
            return Phase::BoomerangEffect { player: target };
        }

        let first = self.players.values().all(Player::is_active);
        self.players[target].eliminated = true;
        if first {
            self.first_eliminated = Some(target);
        }
        info!(player = %self.players[target].name, first, "player voted out");
        Phase::PlayerEliminated { player: target, first }
    }

    fn resolve_elimination(&mut self, eliminated: PlayerId, rng: &mut GameRng) -> Phase {
        let any_active = self.players.values().any(Player::is_active);
        let player = &mut self.players[eliminated];

        if player.has_unused(Power::Avenger) && any_active {
            player.power_used = true;
            return Phase::AvengerRevenge { avenger: eliminated };
        }
        if player.role == Role::MrWhite {
            return Phase::MrWhiteGuess { mr_white: eliminated };
        }
        self.after_consequences(rng)
    }

    fn after_consequences(&self, rng: &mut GameRng) -> Phase {
        match check_winner(self.players.values()) {
            Some(winner) => self.finish(winner, None),
            None => self.speaking(rng),
        }
    }

    fn judge_guess(&self, mr_white: PlayerId, guess: &str) -> Phase {
        let correct = self
            .civilian_word()
            .is_some_and(|word| guess_matches(guess, word));
        if correct {
            return self.finish(Winner::MrWhite, Some(mr_white));
        }
        info!(player = %self.players[mr_white].name, "mr. white guessed wrong");
        match check_winner(self.players.values()) {
            Some(winner) => self.finish(winner, None),
            None => Phase::MrWhiteFailed { mr_white },
        }
    }

    fn finish(&self, winner: Winner, guesser: Option<PlayerId>) -> Phase {
        info!(%winner, "round over");
        Phase::RoundOver {
            result: RoundResult {
                winner,
                first_eliminated: self.first_eliminated,
                guesser,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str, role: Role, power: Option<Power>) -> Player {
        let word = match role {
            Role::Civilian => Some("Café".to_string()),
            Role::Undercover => Some("Tea".to_string()),
            Role::MrWhite => None,
        };
        Player::new(name, role, word, power)
    }

    fn at(players: Vec<Player>, phase: Phase) -> RoundState {
        let mut round = RoundState::new(PlayerMap::from_vec(players));
        round.phase = phase;
        round
    }

    fn id(i: u8) -> PlayerId {
        PlayerId::new(i)
    }

    #[test]
    fn test_reveal_requires_confirmation() {
        let round = RoundState::new(PlayerMap::from_vec(vec![
            p("a", Role::Civilian, None),
            p("b", Role::Civilian, None),
            p("c", Role::Undercover, None),
        ]));
        let mut rng = GameRng::new(1);
        let mut ledger = ScoreLedger::new();

        let err = round.apply(RoundAction::NextPlayer, &mut rng, &mut ledger).unwrap_err();
        assert_eq!(err, TransitionError::NotRevealed);

        let shown = round.apply(RoundAction::RevealCard, &mut rng, &mut ledger).unwrap();
        assert_eq!(shown.phase, Phase::Reveal { index: 0, revealed: true });

        let err = shown.apply(RoundAction::RevealCard, &mut rng, &mut ledger).unwrap_err();
        assert!(matches!(err, TransitionError::WrongPhase { action: "reveal_card", .. }));

        let next = shown.apply(RoundAction::NextPlayer, &mut rng, &mut ledger).unwrap();
        assert_eq!(next.phase, Phase::Reveal { index: 1, revealed: false });
    }

    #[test]
    fn test_speaking_order_skips_mr_white_starter() {
        let players = PlayerMap::from_vec(vec![
            p("a", Role::MrWhite, None),
            p("b", Role::Civilian, None),
            p("c", Role::MrWhite, None),
            p("d", Role::Civilian, None),
        ]);
        for seed in 0..30 {
            let order = speaking_order(&players, &mut GameRng::new(seed));
            assert_eq!(order.len(), 4);
            assert_ne!(players[order[0]].role, Role::MrWhite);
            // Rotation of the seating order.
            for w in order.windows(2) {
                assert_eq!(w[1].index(), (w[0].index() + 1) % 4);
            }
        }
    }

    #[test]
    fn test_speaking_order_omits_eliminated() {
        let mut players = PlayerMap::from_vec(vec![
            p("a", Role::Civilian, None),
            p("b", Role::Civilian, None),
            p("c", Role::Undercover, None),
        ]);
        players[id(1)].eliminated = true;
        let order = speaking_order(&players, &mut GameRng::new(9));
        assert_eq!(order.len(), 2);
        assert!(!order.contains(&id(1)));
    }

    #[test]
    fn test_speaking_order_all_mr_white_fallback() {
        let mut players = PlayerMap::from_vec(vec![
            p("a", Role::Civilian, None),
            p("b", Role::MrWhite, None),
        ]);
        players[id(0)].eliminated = true;
        let order = speaking_order(&players, &mut GameRng::new(2));
        assert_eq!(order.as_slice(), &[id(1)]);
    }

    #[test]
    fn test_boomerang_deflects_once() {
        let round = at(
            vec![
                p("a", Role::Civilian, Some(Power::Boomerang)),
                p("b", Role::Civilian, None),
                p("c", Role::Civilian, None),
                p("d", Role::Undercover, None),
            ],
            Phase::Voting,
        );
        let mut rng = GameRng::new(4);
        let mut ledger = ScoreLedger::new();

        let bounced = round.apply(RoundAction::Vote(id(0)), &mut rng, &mut ledger).unwrap();
        assert_eq!(bounced.phase, Phase::BoomerangEffect { player: id(0) });
        assert!(bounced.players[id(0)].is_active());
        assert!(bounced.players[id(0)].power_used);
        assert_eq!(bounced.first_eliminated, None);

        let speaking = bounced.apply(RoundAction::Continue, &mut rng, &mut ledger).unwrap();
        assert!(matches!(speaking.phase, Phase::Speaking { ref order } if order.len() == 4));

        let voting = speaking.apply(RoundAction::ProceedToVote, &mut rng, &mut ledger).unwrap();
        let out = voting.apply(RoundAction::Vote(id(0)), &mut rng, &mut ledger).unwrap();
        assert_eq!(out.phase, Phase::PlayerEliminated { player: id(0), first: true });
        assert_eq!(out.first_eliminated, Some(id(0)));
    }

    #[test]
    fn test_vote_for_eliminated_player_rejected() {
        let mut round = at(
            vec![
                p("a", Role::Civilian, None),
                p("b", Role::Civilian, None),
                p("c", Role::Undercover, None),
            ],
            Phase::Voting,
        );
        round.players[id(1)].eliminated = true;
        let err = round
            .apply(RoundAction::Vote(id(1)), &mut GameRng::new(0), &mut ScoreLedger::new())
            .unwrap_err();
        assert_eq!(err, TransitionError::PlayerEliminated("b".into()));

        let err = round
            .apply(RoundAction::Vote(id(7)), &mut GameRng::new(0), &mut ScoreLedger::new())
            .unwrap_err();
        assert_eq!(err, TransitionError::UnknownPlayer("Seat 7".into()));
    }

    #[test]
    fn test_second_vote_is_not_first() {
        let round = at(
            vec![
                p("a", Role::Civilian, None),
                p("b", Role::Civilian, None),
                p("c", Role::Civilian, None),
                p("d", Role::Civilian, None),
                p("e", Role::Undercover, None),
                p("f", Role::Undercover, None),
            ],
            Phase::Voting,
        );
        let mut rng = GameRng::new(5);
        let mut ledger = ScoreLedger::new();

        let out = round.apply(RoundAction::Vote(id(0)), &mut rng, &mut ledger).unwrap();
        let speaking = out.apply(RoundAction::Continue, &mut rng, &mut ledger).unwrap();
        assert_eq!(speaking.phase.name(), "Speaking");
        let voting = speaking.apply(RoundAction::ProceedToVote, &mut rng, &mut ledger).unwrap();
        let out = voting.apply(RoundAction::Vote(id(4)), &mut rng, &mut ledger).unwrap();

        assert_eq!(out.phase, Phase::PlayerEliminated { player: id(4), first: false });
        assert_eq!(out.first_eliminated, Some(id(0)));
    }

    #[test]
    fn test_avenger_victim_resolves_nested_mr_white() {
        let round = at(
            vec![
                p("a", Role::Civilian, Some(Power::Avenger)),
                p("b", Role::Civilian, None),
                p("c", Role::Civilian, None),
                p("d", Role::MrWhite, None),
                p("e", Role::Undercover, None),
            ],
            Phase::Voting,
        );
        let mut rng = GameRng::new(6);
        let mut ledger = ScoreLedger::new();

        let out = round.apply(RoundAction::Vote(id(0)), &mut rng, &mut ledger).unwrap();
        let revenge = out.apply(RoundAction::Continue, &mut rng, &mut ledger).unwrap();
        assert_eq!(revenge.phase, Phase::AvengerRevenge { avenger: id(0) });

        let err = revenge
            .apply(RoundAction::AvengerVictim(id(0)), &mut rng, &mut ledger)
            .unwrap_err();
        assert_eq!(err, TransitionError::SelfTarget("a".into()));

        let victim = revenge.apply(RoundAction::AvengerVictim(id(3)), &mut rng, &mut ledger).unwrap();
        assert_eq!(victim.phase, Phase::PlayerEliminated { player: id(3), first: false });
        assert_eq!(victim.first_eliminated, Some(id(0)));

        let guess = victim.apply(RoundAction::Continue, &mut rng, &mut ledger).unwrap();
        assert_eq!(guess.phase, Phase::MrWhiteGuess { mr_white: id(3) });

        let over = guess.apply(RoundAction::Guess("cafe".into()), &mut rng, &mut ledger).unwrap();
        assert_eq!(
            over.phase,
            Phase::RoundOver {
                result: RoundResult {
                    winner: Winner::MrWhite,
                    first_eliminated: Some(id(0)),
                    guesser: Some(id(3)),
                }
            }
        );
    }

    #[test]
    fn test_avenger_ignores_boomerang_of_victim() {
        let mut round = at(
            vec![
                p("a", Role::Undercover, Some(Power::Avenger)),
                p("b", Role::Civilian, Some(Power::Boomerang)),
                p("c", Role::Civilian, None),
                p("d", Role::Civilian, None),
                p("e", Role::Undercover, None),
            ],
            Phase::AvengerRevenge { avenger: id(0) },
        );
        round.players[id(0)].eliminated = true;
        round.players[id(0)].power_used = true;

        let victim = round
            .apply(RoundAction::AvengerVictim(id(1)), &mut GameRng::new(0), &mut ScoreLedger::new())
            .unwrap();
        assert!(victim.players[id(1)].eliminated);
        assert!(!victim.players[id(1)].power_used);
    }

    fn mr_white_avenger_table(extra_civilian: bool) -> RoundState {
        let mut players = vec![
            p("a", Role::MrWhite, Some(Power::Avenger)),
            p("b", Role::Civilian, None),
            p("c", Role::Civilian, None),
            p("d", Role::Civilian, None),
        ];
        if extra_civilian {
            players.push(p("x", Role::Civilian, None));
        }
        players.push(p("e", Role::Undercover, None));
        at(players, Phase::Voting)
    }

    #[test]
    fn test_mr_white_avenger_gets_no_guess() {
        let round = mr_white_avenger_table(false);
        let mut rng = GameRng::new(8);
        let mut ledger = ScoreLedger::new();

        let out = round.apply(RoundAction::Vote(id(0)), &mut rng, &mut ledger).unwrap();
        let revenge = out.apply(RoundAction::Continue, &mut rng, &mut ledger).unwrap();
        assert_eq!(revenge.phase, Phase::AvengerRevenge { avenger: id(0) });

        // Taking the last undercover leaves no bad player: civilians win.
        let victim = revenge.apply(RoundAction::AvengerVictim(id(4)), &mut rng, &mut ledger).unwrap();
        let over = victim.apply(RoundAction::Continue, &mut rng, &mut ledger).unwrap();
        assert_eq!(
            over.phase,
            Phase::RoundOver {
                result: RoundResult {
                    winner: Winner::Civilians,
                    first_eliminated: Some(id(0)),
                    guesser: None,
                }
            }
        );
        let err = over
            .apply(RoundAction::Guess("cafe".into()), &mut rng, &mut ledger)
            .unwrap_err();
        assert!(matches!(err, TransitionError::WrongPhase { phase: "RoundOver", .. }));
    }

    #[test]
    fn test_mr_white_avenger_revenge_then_play_continues() {
        let round = mr_white_avenger_table(true);
        let mut rng = GameRng::new(8);
        let mut ledger = ScoreLedger::new();

        let out = round.apply(RoundAction::Vote(id(0)), &mut rng, &mut ledger).unwrap();
        let revenge = out.apply(RoundAction::Continue, &mut rng, &mut ledger).unwrap();
        let victim = revenge.apply(RoundAction::AvengerVictim(id(1)), &mut rng, &mut ledger).unwrap();
        let speaking = victim.apply(RoundAction::Continue, &mut rng, &mut ledger).unwrap();
        assert!(matches!(speaking.phase, Phase::Speaking { ref order } if order.len() == 4));
    }

    #[test]
    fn test_wrong_guess_without_winner_continues() {
        let mut round = at(
            vec![
                p("a", Role::MrWhite, None),
                p("b", Role::Civilian, None),
                p("c", Role::Civilian, None),
                p("d", Role::Civilian, None),
                p("e", Role::Undercover, None),
            ],
            Phase::MrWhiteGuess { mr_white: id(0) },
        );
        round.players[id(0)].eliminated = true;
        let mut rng = GameRng::new(2);
        let mut ledger = ScoreLedger::new();

        let failed = round.apply(RoundAction::Guess("Tea".into()), &mut rng, &mut ledger).unwrap();
        assert_eq!(failed.phase, Phase::MrWhiteFailed { mr_white: id(0) });
        let speaking = failed.apply(RoundAction::Continue, &mut rng, &mut ledger).unwrap();
        assert!(matches!(speaking.phase, Phase::Speaking { ref order } if !order.contains(&id(0))));
    }

    #[test]
    fn test_failed_guess_with_winner_ends_round() {
        // Mr. White was the only bad player left.
        let mut round = at(
            vec![
                p("a", Role::Civilian, None),
                p("b", Role::Civilian, None),
                p("c", Role::MrWhite, None),
            ],
            Phase::MrWhiteGuess { mr_white: id(2) },
        );
        round.players[id(2)].eliminated = true;

        let over = round
            .apply(RoundAction::Guess("Dog".into()), &mut GameRng::new(0), &mut ScoreLedger::new())
            .unwrap();
        assert_eq!(over.result().map(|r| r.winner), Some(Winner::Civilians));
    }

    #[test]
    fn test_round_over_scores_once() {
        let round = at(
            vec![
                p("a", Role::Civilian, Some(Power::Jester)),
                p("b", Role::Civilian, None),
                p("c", Role::Undercover, None),
            ],
            Phase::RoundOver {
                result: RoundResult {
                    winner: Winner::Civilians,
                    first_eliminated: Some(id(0)),
                    guesser: None,
                },
            },
        );
        let mut ledger = ScoreLedger::new();
        let board = round.apply(RoundAction::Continue, &mut GameRng::new(0), &mut ledger).unwrap();

        assert!(board.phase.is_terminal());
        assert_eq!(ledger.score("a"), 6);

        let err = board
            .apply(RoundAction::Continue, &mut GameRng::new(0), &mut ledger)
            .unwrap_err();
        assert!(matches!(err, TransitionError::WrongPhase { phase: "Scoreboard", .. }));
        assert_eq!(ledger.score("a"), 6);
    }

    #[test]
    fn test_wrong_phase_leaves_state_alone() {
        let round = at(vec![p("a", Role::Civilian, None)], Phase::Voting);
        let before = round.clone();
        let err = round
            .apply(RoundAction::Guess("x".into()), &mut GameRng::new(0), &mut ScoreLedger::new())
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::WrongPhase {
                action: "submit_guess",
                phase: "Voting"
            }
        );
        assert_eq!(round, before);
    }
}
