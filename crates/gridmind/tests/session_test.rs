//! Session orchestration: seats, auto-play, and cross-game learning.

use gridmind::{Board, Mark, Predictor, Session, SessionError, Status};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(11)
}

#[test]
fn test_mismatched_engine_is_refused() {
    let mut session = Session::new(Board::new());
    let result = session.seat_engine(Predictor::new(Mark::X), Mark::O);
    assert_eq!(
        result,
        Err(SessionError::MarkMismatch {
            good: Mark::X,
            bad: Mark::O,
        })
    );
    assert!(session.engine(Mark::O).is_none());
}

#[test]
fn test_engine_answers_a_human_move() {
    let mut session = Session::new(Board::new());
    session.seat_engine(Predictor::new(Mark::O), Mark::O).unwrap();
    let mut rng = rng();

    // X is human: nothing for the engine to do yet.
    assert_eq!(session.advance(&mut rng).unwrap(), 0);
    session.play_move(4).unwrap();

    assert!(session.engine_owns_turn());
    assert_eq!(session.advance(&mut rng).unwrap(), 1);
    assert_eq!(session.board().history().len(), 2);
    assert!(!session.engine_owns_turn());
}

#[test]
fn test_human_moves_are_refused_on_engine_turn() {
    let mut session = Session::new(Board::new());
    session.seat_engine(Predictor::new(Mark::X), Mark::X).unwrap();

    // X opens and X is the engine, so the human cannot move first.
    assert_eq!(session.play_move(0), Err(SessionError::EngineTurn));
}

#[test]
fn test_two_engines_play_to_completion() {
    let mut session = Session::new(Board::new());
    session.seat_engine(Predictor::new(Mark::X), Mark::X).unwrap();
    session.seat_engine(Predictor::new(Mark::O), Mark::O).unwrap();
    let mut rng = rng();

    let moves = session.advance(&mut rng).unwrap();
    assert!(session.board().status().is_terminal());
    assert_eq!(moves, session.board().history().len());
    assert!(moves >= 5, "a 3x3 game needs at least five moves");
}

#[test]
fn test_engines_learn_across_games() {
    let mut session = Session::new(Board::new());
    session.seat_engine(Predictor::new(Mark::X), Mark::X).unwrap();
    session.seat_engine(Predictor::new(Mark::O), Mark::O).unwrap();
    let mut rng = rng();

    let mut wins = 0;
    for _ in 0..10 {
        session.advance(&mut rng).unwrap();
        if matches!(session.board().status(), Status::Won(_)) {
            wins += 1;
        }
        session.next_game();
    }

    let x_intel = session.engine(Mark::X).unwrap();
    let o_intel = session.engine(Mark::O).unwrap();
    // Both observers saw the same games, so they know the same lines.
    assert_eq!(
        x_intel.borrow().knowledge(),
        o_intel.borrow().knowledge()
    );
    if wins > 0 {
        assert!(!x_intel.borrow().knowledge().is_empty());
    }
    assert!(x_intel.borrow().knowledge().len() <= session.board().lines().len());
}

#[test]
fn test_next_game_alternates_the_opening_mark() {
    let mut session = Session::new(Board::new());
    session.seat_engine(Predictor::new(Mark::X), Mark::X).unwrap();
    session.seat_engine(Predictor::new(Mark::O), Mark::O).unwrap();
    let mut rng = rng();

    assert_eq!(session.board().turn_mark(), Mark::X);
    session.advance(&mut rng).unwrap();
    session.next_game();
    assert_eq!(session.board().turn_mark(), Mark::O);
}
