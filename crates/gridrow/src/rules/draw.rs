//! Draw detection logic for N-in-a-row boards.

use crate::types::{Board, Cell};
use tracing::instrument;

/// Checks if the board is full (all cells occupied).
///
/// A full board with no winner indicates a draw; callers derive draws as
/// `check_winner(board).is_none() && is_full(board)`.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|cell| *cell != Cell::Empty)
}

#[cfg(test)]
mod tests {
    use super::super::win::check_winner;
    use super::*;
    use crate::types::Mark;

    fn is_draw(board: &Board) -> bool {
        is_full(board) && check_winner(board).is_none()
    }

    #[test]
    fn test_empty_board_not_full() {
        let board = Board::new(3, 3).expect("valid dimensions");
        assert!(!is_full(&board));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut board = Board::new(3, 3).expect("valid dimensions");
        board.set(4, Cell::Occupied(Mark::X));
        assert!(!is_full(&board));
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new(3, 3).expect("valid dimensions");
        for index in 0..9 {
            board.set(index, Cell::Occupied(Mark::X));
        }
        assert!(is_full(&board));
    }

    #[test]
    fn test_draw_detection() {
        // X O X / O X X / O X O - full, no run.
        let mut board = Board::new(3, 3).expect("valid dimensions");
        for index in [0, 2, 4, 5, 7] {
            board.set(index, Cell::Occupied(Mark::X));
        }
        for index in [1, 3, 6, 8] {
            board.set(index, Cell::Occupied(Mark::O));
        }
        assert!(is_draw(&board));
    }

    #[test]
    fn test_not_draw_if_winner() {
        let mut board = Board::new(3, 3).expect("valid dimensions");
        for index in [0, 1, 2] {
            board.set(index, Cell::Occupied(Mark::X));
        }
        for index in [3, 4] {
            board.set(index, Cell::Occupied(Mark::O));
        }
        assert!(!is_draw(&board));
    }
}
