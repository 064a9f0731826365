//! Tests for the per-lobby session state machine.

use gridrow::{Game, GameStatus, Mark};
use gridrow_server::{ConnId, GameError, Session};

const A: ConnId = ConnId(1);
const B: ConnId = ConnId(2);
const C: ConnId = ConnId(3);

fn session_3x3() -> Session {
    Session::new("test".into(), Game::new(3, 3).expect("valid dimensions"))
}

#[test]
fn test_marks_assigned_by_availability() {
    let mut session = session_3x3();

    let a = session.join(A).expect("first join");
    assert_eq!(a.mark, Mark::X);
    assert!(a.newly_joined);

    let b = session.join(B).expect("second join");
    assert_eq!(b.mark, Mark::O);

    assert_eq!(session.join(C), Err(GameError::LobbyFull));
    assert_eq!(session.participant_count(), 2);
}

#[test]
fn test_join_is_idempotent() {
    let mut session = session_3x3();

    let first = session.join(A).expect("join");
    let again = session.join(A).expect("rejoin");

    assert_eq!(first.mark, again.mark);
    assert!(!again.newly_joined);
    assert_eq!(session.participant_count(), 1);
}

#[test]
fn test_rejoin_after_leave_takes_vacant_mark() {
    let mut session = session_3x3();
    session.join(A).expect("join");
    session.join(B).expect("join");

    assert!(session.leave(A));
    assert_eq!(session.participant_count(), 1);

    // C inherits the vacated X; B keeps O and the board is untouched.
    let c = session.join(C).expect("join into vacancy");
    assert_eq!(c.mark, Mark::X);
    assert_eq!(session.mark_of(B), Some(Mark::O));
}

#[test]
fn test_no_two_handles_share_a_mark() {
    let mut session = session_3x3();
    session.join(A).expect("join");
    session.join(B).expect("join");

    let marks: Vec<Mark> = [A, B]
        .iter()
        .filter_map(|conn| session.mark_of(*conn))
        .collect();
    assert_eq!(marks, vec![Mark::X, Mark::O]);
}

#[test]
fn test_move_before_opponent_joins() {
    let mut session = session_3x3();
    session.join(A).expect("join");

    // A participant without an opponent waits; a stranger is rejected
    // as a non-participant first.
    assert_eq!(session.make_move(A, 0), Err(GameError::AwaitingOpponent));
    assert_eq!(session.make_move(C, 0), Err(GameError::NotAParticipant));
}

#[test]
fn test_out_of_turn_rejected() {
    let mut session = session_3x3();
    session.join(A).expect("join");
    session.join(B).expect("join");

    session.make_move(A, 5).expect("X opens");
    assert_eq!(session.make_move(A, 6), Err(GameError::OutOfTurn));
    // The board is unchanged by the failure.
    assert!(session.game().board().is_vacant(6));
}

#[test]
fn test_occupied_square_rejected_before_participancy() {
    let mut session = session_3x3();
    session.join(A).expect("join");
    session.join(B).expect("join");
    session.make_move(A, 4).expect("X opens");

    // Occupancy is checked before participancy, so a stranger probing an
    // occupied square sees the same error a participant would.
    assert_eq!(session.make_move(B, 4), Err(GameError::SquareOccupied));
    assert_eq!(session.make_move(C, 4), Err(GameError::SquareOccupied));
}

#[test]
fn test_out_of_range_index_reads_as_occupied() {
    let mut session = session_3x3();
    session.join(A).expect("join");
    session.join(B).expect("join");

    assert_eq!(session.make_move(A, 9), Err(GameError::SquareOccupied));
}

#[test]
fn test_turn_alternation_parity() {
    let mut session = session_3x3();
    session.join(A).expect("join");
    session.join(B).expect("join");

    // Four opening moves that never complete a run.
    let moves = [(A, 0), (B, 4), (A, 5), (B, 1)];
    for (count, (conn, index)) in moves.iter().enumerate() {
        let expected = if count % 2 == 0 { Mark::X } else { Mark::O };
        assert_eq!(session.game().to_move(), expected);
        session.make_move(*conn, *index).expect("vacant in turn");
    }
    assert_eq!(session.game().to_move(), Mark::X);
}

#[test]
fn test_row_win_concludes_game() {
    let mut session = session_3x3();
    session.join(A).expect("join");
    session.join(B).expect("join");

    for (conn, index) in [(A, 0), (B, 4), (A, 1), (B, 8)] {
        session.make_move(conn, index).expect("vacant in turn");
    }
    let placement = session.make_move(A, 2).expect("winning move");

    let win = match placement.status {
        GameStatus::Won(win) => win,
        other => panic!("expected a win, got {other:?}"),
    };
    assert_eq!(win.mark, Mark::X);
    assert_eq!(win.line, vec![0, 1, 2]);
}

#[test]
fn test_terminal_lock_until_reset() {
    let mut session = session_3x3();
    session.join(A).expect("join");
    session.join(B).expect("join");

    for (conn, index) in [(A, 0), (B, 4), (A, 1), (B, 8), (A, 2)] {
        session.make_move(conn, index).expect("vacant in turn");
    }

    let board_before = session.game().board().clone();
    // Every move fails now - vacant target, occupied target, either
    // player - and the conclusion outranks the occupancy check.
    assert_eq!(session.make_move(B, 5), Err(GameError::GameConcluded));
    assert_eq!(session.make_move(B, 0), Err(GameError::GameConcluded));
    assert_eq!(session.make_move(A, 5), Err(GameError::GameConcluded));
    assert_eq!(session.game().board(), &board_before);

    session.reset(B).expect("participant resets");
    session.make_move(A, 5).expect("play reopened");
}

#[test]
fn test_reset_preserves_assignments() {
    let mut session = session_3x3();
    session.join(A).expect("join");
    session.join(B).expect("join");
    session.make_move(A, 0).expect("X opens");

    session.reset(A).expect("participant resets");

    assert_eq!(session.mark_of(A), Some(Mark::X));
    assert_eq!(session.mark_of(B), Some(Mark::O));
    assert_eq!(session.game().to_move(), Mark::X);
    assert!(session.game().board().is_vacant(0));
}

#[test]
fn test_reset_requires_participancy() {
    let mut session = session_3x3();
    session.join(A).expect("join");

    assert_eq!(session.reset(C), Err(GameError::NotAParticipant));
}

#[test]
fn test_draw_flow() {
    let mut session = session_3x3();
    session.join(A).expect("join");
    session.join(B).expect("join");

    // X: 0, 2, 4, 5, 7 / O: 1, 3, 6, 8 - full board, no run.
    let moves = [
        (A, 0),
        (B, 1),
        (A, 2),
        (B, 3),
        (A, 4),
        (B, 6),
        (A, 5),
        (B, 8),
    ];
    for (conn, index) in moves {
        session.make_move(conn, index).expect("vacant in turn");
    }
    let placement = session.make_move(A, 7).expect("final cell");

    assert_eq!(placement.status, GameStatus::Draw);
    assert!(placement.status.is_draw());
    assert_eq!(placement.status.winner(), None);
}

#[test]
fn test_partial_leave_keeps_board() {
    let mut session = session_3x3();
    session.join(A).expect("join");
    session.join(B).expect("join");
    session.make_move(A, 4).expect("X opens");

    session.leave(B);
    assert!(!session.game().board().is_vacant(4));

    // The replacement opponent continues the game in progress.
    session.join(C).expect("join into vacancy");
    assert_eq!(session.mark_of(C), Some(Mark::O));
    session.make_move(C, 0).expect("O continues");
}

#[test]
fn test_leave_of_stranger_is_a_noop() {
    let mut session = session_3x3();
    session.join(A).expect("join");

    assert!(!session.leave(C));
    assert_eq!(session.participant_count(), 1);
}
