//! Round resolution and termination rules.
use crate::bag::Bag;
use crate::constants::BUST_DIVISOR;
use crate::error::{BetRejection, GameError};
use crate::marble::Marble;
use crate::multipliers::MultiplierTable;
use crate::numbers::f64_to_u32_exact;
use crate::rng::{BagDraw, MarbleSource, SessionRng};
use crate::session::{RoundOutcome, Session, SessionStatus};

/// Game engine binding the fixed bag and payout table to a marble source.
///
/// The engine holds no session state; sessions are plain values owned by the
/// caller and handed in by mutable reference for each round.
#[derive(Debug, Clone)]
pub struct Engine<S> {
    source: S,
    bag: Bag,
    table: MultiplierTable,
}

impl Engine<BagDraw<SessionRng>> {
    /// Engine whose draws are reproducible from `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(BagDraw::seeded(seed))
    }
}

impl<S: MarbleSource> Engine<S> {
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self {
            source,
            bag: Bag::STANDARD,
            table: MultiplierTable::STANDARD,
        }
    }

    #[must_use]
    pub const fn bag(&self) -> &Bag {
        &self.bag
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Begin a new session.
    ///
    /// `draws_total` is taken as a float because it usually comes straight
    /// from numeric user input; it must still be a whole number.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfiguration`] when either value is not a
    /// finite number above zero, or when `draws_total` is fractional or too
    /// large for a round counter.
    pub fn start(&self, gold_start: f64, draws_total: f64) -> Result<Session, GameError> {
        if !gold_start.is_finite() || gold_start <= 0.0 {
            return Err(GameError::InvalidConfiguration {
                field: "gold_start",
                value: gold_start,
            });
        }
        let draws = f64_to_u32_exact(draws_total)
            .filter(|draws| *draws > 0)
            .ok_or(GameError::InvalidConfiguration {
                field: "draws_total",
                value: draws_total,
            })?;

        log::debug!("session started: gold {gold_start}, draws {draws}");
        Ok(Session::new(gold_start, draws))
    }

    /// Draw one marble from the bag.
    ///
    /// # Errors
    ///
    /// Only finite sources fail; see [`MarbleSource::next_marble`].
    pub fn draw_marble(&mut self) -> Result<Marble, GameError> {
        self.source.next_marble(&self.bag)
    }

    /// Resolve one round of betting.
    ///
    /// On any error the session is left exactly as it was.
    ///
    /// # Errors
    ///
    /// - [`GameError::SessionOver`] when the session already busted or finished.
    /// - [`GameError::InvalidBet`] when `bet` is not a finite positive amount,
    ///   exceeds the remaining gold, or could push the balance out of the
    ///   finite range.
    /// - [`GameError::ScriptExhausted`] when a scripted source has run dry.
    pub fn play_round(
        &mut self,
        session: &mut Session,
        bet: f64,
    ) -> Result<RoundOutcome, GameError> {
        if session.is_over() {
            return Err(GameError::SessionOver {
                status: session.status(),
            });
        }
        validate_bet(&self.table, bet, session.gold_remaining())?;

        let drawn = self.draw_marble()?;
        let delta = self.table.delta(drawn, bet);
        session.credit(delta);

        let status = termination_status(
            session.gold_start(),
            session.gold_remaining(),
            session.draw_index(),
            session.draws_total(),
        );
        let outcome = RoundOutcome {
            draw_index: session.draw_index(),
            draws_total: session.draws_total(),
            drawn,
            bet,
            delta,
            gold_remaining_after: session.gold_remaining(),
            status,
        };
        log::debug!(
            "round {}/{}: {} on bet {} -> delta {}, gold {}, {}",
            outcome.draw_index,
            outcome.draws_total,
            drawn,
            bet,
            delta,
            outcome.gold_remaining_after,
            status
        );
        session.record(outcome.clone());
        if status.is_terminal() {
            log::info!(
                "session ended {status} after {} rounds, net {}",
                session.rounds_played(),
                session.net()
            );
        }
        Ok(outcome)
    }
}

/// Checked before drawing so a rejected bet never consumes a marble.
fn validate_bet(table: &MultiplierTable, bet: f64, gold_remaining: f64) -> Result<(), GameError> {
    let reason = if !bet.is_finite() {
        BetRejection::NotFinite
    } else if bet <= 0.0 {
        BetRejection::NotPositive
    } else if bet > gold_remaining {
        BetRejection::ExceedsBalance
    } else if Marble::ALL
        .iter()
        .any(|&marble| !(gold_remaining + table.delta(marble, bet)).is_finite())
    {
        BetRejection::BalanceOverflow
    } else {
        return Ok(());
    };
    Err(GameError::InvalidBet { bet, reason })
}

/// Status after a round, evaluated on the post-update balance.
///
/// `draw_index` is the index of the round just played. Busting outranks
/// finishing, so a bust on the final draw is reported as a bust.
#[must_use]
pub fn termination_status(
    gold_start: f64,
    gold_remaining: f64,
    draw_index: u32,
    draws_total: u32,
) -> SessionStatus {
    if gold_remaining <= gold_start / BUST_DIVISOR {
        SessionStatus::Bust
    } else if u64::from(draw_index) + 1 > u64::from(draws_total) {
        SessionStatus::Finished
    } else {
        SessionStatus::Ongoing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedDraws;

    fn scripted(draws: &[Marble]) -> Engine<ScriptedDraws> {
        Engine::new(ScriptedDraws::new(draws.iter().copied()))
    }

    #[test]
    fn start_sets_balance_and_first_round() {
        let engine = scripted(&[]);
        let session = engine.start(100.0, 3.0).unwrap();
        assert!((session.gold_remaining() - 100.0).abs() < f64::EPSILON);
        assert!((session.gold_start() - 100.0).abs() < f64::EPSILON);
        assert_eq!(session.draws_total(), 3);
        assert_eq!(session.draw_index(), 1);
    }

    #[test]
    fn start_rejects_bad_configuration() {
        let engine = scripted(&[]);
        for (gold, draws, field) in [
            (0.0, 3.0, "gold_start"),
            (-5.0, 3.0, "gold_start"),
            (f64::NAN, 3.0, "gold_start"),
            (f64::INFINITY, 3.0, "gold_start"),
            (100.0, 0.0, "draws_total"),
            (100.0, -1.0, "draws_total"),
            (100.0, 2.5, "draws_total"),
            (100.0, f64::NAN, "draws_total"),
            (100.0, f64::INFINITY, "draws_total"),
        ] {
            match engine.start(gold, draws) {
                Err(GameError::InvalidConfiguration { field: got, .. }) => {
                    assert_eq!(got, field, "gold {gold} draws {draws}");
                }
                other => panic!("expected configuration error, got {other:?}"),
            }
        }
    }

    #[test]
    fn green_draw_doubles_the_bet() {
        let mut engine = scripted(&[Marble::Green]);
        let mut session = engine.start(100.0, 3.0).unwrap();
        let outcome = engine.play_round(&mut session, 10.0).unwrap();
        assert_eq!(outcome.draw_index, 1);
        assert_eq!(outcome.drawn, Marble::Green);
        assert!((outcome.delta - 20.0).abs() < f64::EPSILON);
        assert!((outcome.gold_remaining_after - 120.0).abs() < f64::EPSILON);
        assert_eq!(outcome.status, SessionStatus::Ongoing);
        assert_eq!(session.draw_index(), 2);
    }

    #[test]
    fn white_draw_busts_at_exactly_half() {
        let mut engine = scripted(&[Marble::White]);
        let mut session = engine.start(100.0, 5.0).unwrap();
        let outcome = engine.play_round(&mut session, 10.0).unwrap();
        assert!((outcome.delta + 50.0).abs() < f64::EPSILON);
        assert!((outcome.gold_remaining_after - 50.0).abs() < f64::EPSILON);
        assert_eq!(outcome.status, SessionStatus::Bust);
        assert_eq!(session.draw_index(), 1);
    }

    #[test]
    fn bust_outranks_finish_on_last_draw() {
        let mut engine = scripted(&[Marble::White]);
        let mut session = engine.start(100.0, 1.0).unwrap();
        let outcome = engine.play_round(&mut session, 10.0).unwrap();
        assert_eq!(outcome.status, SessionStatus::Bust);
    }

    #[test]
    fn invalid_bets_leave_session_untouched() {
        let mut engine = scripted(&[Marble::Green]);
        let mut session = engine.start(100.0, 3.0).unwrap();
        let before = session.clone();
        for (bet, reason) in [
            (0.0, BetRejection::NotPositive),
            (-4.0, BetRejection::NotPositive),
            (f64::NAN, BetRejection::NotFinite),
            (f64::INFINITY, BetRejection::NotFinite),
            (100.5, BetRejection::ExceedsBalance),
        ] {
            match engine.play_round(&mut session, bet) {
                Err(GameError::InvalidBet { reason: got, .. }) => assert_eq!(got, reason),
                other => panic!("expected invalid bet, got {other:?}"),
            }
            assert_eq!(session, before);
        }
        assert_eq!(engine.source().remaining(), 1, "no marble consumed");
        engine.play_round(&mut session, 100.0).unwrap();
    }

    #[test]
    fn bets_that_could_overflow_the_balance_are_rejected() {
        let mut engine = scripted(&[Marble::Black, Marble::White]);
        let mut session = engine.start(1e308, 5.0).unwrap();
        let before = session.clone();
        assert_eq!(
            engine.play_round(&mut session, 1e308),
            Err(GameError::InvalidBet {
                bet: 1e308,
                reason: BetRejection::BalanceOverflow
            })
        );
        assert_eq!(session, before);
        assert_eq!(engine.source().remaining(), 2, "no marble consumed");

        let outcome = engine.play_round(&mut session, 1e306).unwrap();
        assert!(outcome.gold_remaining_after.is_finite());
        assert_eq!(outcome.status, SessionStatus::Ongoing);

        let outcome = engine.play_round(&mut session, 1e306).unwrap();
        assert!(outcome.gold_remaining_after.is_finite());
        assert!(outcome.gold_remaining_after > 1e308);
    }

    #[test]
    fn ended_session_rejects_further_rounds() {
        let mut engine = scripted(&[Marble::Red, Marble::Green]);
        let mut session = engine.start(100.0, 1.0).unwrap();
        let outcome = engine.play_round(&mut session, 10.0).unwrap();
        assert_eq!(outcome.status, SessionStatus::Finished);
        let before = session.clone();
        assert_eq!(
            engine.play_round(&mut session, 10.0),
            Err(GameError::SessionOver {
                status: SessionStatus::Finished
            })
        );
        assert_eq!(session, before);
    }

    #[test]
    fn exhausted_script_leaves_session_untouched() {
        let mut engine = scripted(&[]);
        let mut session = engine.start(100.0, 3.0).unwrap();
        let before = session.clone();
        assert_eq!(
            engine.play_round(&mut session, 10.0),
            Err(GameError::ScriptExhausted)
        );
        assert_eq!(session, before);
    }

    #[test]
    fn termination_checks_use_round_just_played() {
        assert_eq!(termination_status(100.0, 120.0, 1, 3), SessionStatus::Ongoing);
        assert_eq!(termination_status(100.0, 120.0, 3, 3), SessionStatus::Finished);
        assert_eq!(termination_status(100.0, 50.0, 3, 3), SessionStatus::Bust);
        assert_eq!(termination_status(100.0, 50.01, 1, 3), SessionStatus::Ongoing);
        assert_eq!(
            termination_status(100.0, 200.0, u32::MAX, u32::MAX),
            SessionStatus::Finished
        );
    }

    #[test]
    fn seeded_engines_agree() {
        let mut a = Engine::seeded(99);
        let mut b = Engine::seeded(99);
        for _ in 0..32 {
            assert_eq!(a.draw_marble().unwrap(), b.draw_marble().unwrap());
        }
    }
}
