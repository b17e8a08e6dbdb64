use marblebag_game::{
    Engine, Ending, GameError, Marble, MultiplierTable, ScriptedDraws, SessionStatus, Standing,
    summarize,
};

fn engine_with(draws: &[Marble]) -> Engine<ScriptedDraws> {
    Engine::new(ScriptedDraws::new(draws.iter().copied()))
}

#[test]
fn finish_accounting_matches_round_deltas() {
    let mut engine = engine_with(&[Marble::Green, Marble::Red, Marble::Green]);
    let mut session = engine.start(100.0, 3.0).unwrap();

    let first = engine.play_round(&mut session, 10.0).unwrap();
    assert!((first.delta - 20.0).abs() < f64::EPSILON);
    assert_eq!(first.status, SessionStatus::Ongoing);

    let second = engine.play_round(&mut session, 10.0).unwrap();
    assert!((second.delta + 10.0).abs() < f64::EPSILON);
    assert_eq!(second.draw_index, 2);
    assert_eq!(second.status, SessionStatus::Ongoing);

    let third = engine.play_round(&mut session, 2.5).unwrap();
    assert!((third.delta - 5.0).abs() < f64::EPSILON);
    assert_eq!(third.draw_index, 3);
    assert_eq!(third.status, SessionStatus::Finished);

    assert!((session.gold_remaining() - 115.0).abs() < f64::EPSILON);
    assert!((session.net() - 15.0).abs() < f64::EPSILON);
    assert_eq!(session.draw_index(), 3);

    let summary = summarize(&session);
    assert_eq!(summary.ending, Ending::Finished);
    assert_eq!(summary.standing, Standing::Up);
    assert!((summary.net - 15.0).abs() < f64::EPSILON);
}

#[test]
fn bust_on_final_draw_is_reported_as_bust() {
    let mut engine = engine_with(&[Marble::White]);
    let mut session = engine.start(100.0, 1.0).unwrap();
    let outcome = engine.play_round(&mut session, 10.0).unwrap();
    assert!((outcome.gold_remaining_after - 50.0).abs() < f64::EPSILON);
    assert_eq!(outcome.status, SessionStatus::Bust);
    assert_eq!(summarize(&session).ending, Ending::Bust);
}

#[test]
fn red_losses_can_grind_down_to_a_bust() {
    let mut engine = engine_with(&[Marble::Red; 6]);
    let mut session = engine.start(100.0, 10.0).unwrap();
    let mut statuses = Vec::new();
    while !session.is_over() {
        statuses.push(engine.play_round(&mut session, 10.0).unwrap().status);
    }
    assert_eq!(statuses.len(), 5);
    assert_eq!(statuses.last(), Some(&SessionStatus::Bust));
    assert!((session.gold_remaining() - 50.0).abs() < f64::EPSILON);
    assert_eq!(session.draw_index(), 5);
}

#[test]
fn break_even_finish_is_even() {
    let mut engine = engine_with(&[Marble::Green, Marble::Red]);
    let mut session = engine.start(100.0, 2.0).unwrap();
    engine.play_round(&mut session, 10.0).unwrap();
    engine.play_round(&mut session, 20.0).unwrap();
    let summary = summarize(&session);
    assert_eq!(summary.ending, Ending::Finished);
    assert_eq!(summary.standing, Standing::Even);
    assert!(summary.net.abs() < f64::EPSILON);
}

#[test]
fn ledger_reconciles_every_round() {
    let table = MultiplierTable::STANDARD;
    let mut engine = Engine::seeded(0x5EED);
    let mut session = engine.start(1_000.0, 40.0).unwrap();
    let mut before = session.gold_remaining();
    let mut expected_index = 1;
    while !session.is_over() {
        let bet = (session.gold_remaining() * 0.05).max(1.0);
        let outcome = engine.play_round(&mut session, bet).unwrap();
        assert_eq!(outcome.draw_index, expected_index);
        let expected = before + table.delta(outcome.drawn, bet);
        assert!((outcome.gold_remaining_after - expected).abs() < 1e-9);
        before = outcome.gold_remaining_after;
        if outcome.status == SessionStatus::Ongoing {
            expected_index += 1;
        }
    }
    assert_eq!(session.history().len(), session.rounds_played());
    assert!(session.rounds_played() <= 40);
}

#[test]
fn rejected_bets_allow_a_retry() {
    let mut engine = engine_with(&[Marble::Black]);
    let mut session = engine.start(30.0, 2.0).unwrap();
    assert!(matches!(
        engine.play_round(&mut session, 31.0),
        Err(GameError::InvalidBet { .. })
    ));
    let outcome = engine.play_round(&mut session, 30.0).unwrap();
    assert!((outcome.delta - 300.0).abs() < f64::EPSILON);
    assert_eq!(outcome.draw_index, 1);
}

#[test]
fn sessions_are_independent_values() {
    let mut engine = engine_with(&[Marble::Green, Marble::White]);
    let mut alice = engine.start(100.0, 3.0).unwrap();
    let mut bob = engine.start(100.0, 3.0).unwrap();
    engine.play_round(&mut alice, 10.0).unwrap();
    engine.play_round(&mut bob, 10.0).unwrap();
    assert!((alice.gold_remaining() - 120.0).abs() < f64::EPSILON);
    assert!((bob.gold_remaining() - 50.0).abs() < f64::EPSILON);
    assert_eq!(alice.status(), SessionStatus::Ongoing);
    assert_eq!(bob.status(), SessionStatus::Bust);
}
