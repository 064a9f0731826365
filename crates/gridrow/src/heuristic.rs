//! Computer-opponent move selection: win, block, then random.

use crate::rules::{DIRECTIONS, RUN_LENGTH, run_indices};
use crate::types::{Board, Cell, Mark};
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Picks a move for `mark` on the given board.
///
/// Priority order:
/// 1. complete an own run (first completing cell in scan order),
/// 2. block the opponent's near-complete run,
/// 3. uniform random among the remaining vacant cells.
///
/// This is a greedy one-ply heuristic: it never looks further than a
/// single completing cell, so forks and other multi-threat positions fall
/// through to the random rule. Returns `None` only on a full board.
#[instrument(skip(board))]
pub fn choose_move(board: &Board, mark: Mark) -> Option<usize> {
    if let Some(index) = completing_move(board, mark) {
        debug!(index, %mark, "taking the winning cell");
        return Some(index);
    }

    if let Some(index) = completing_move(board, mark.opponent()) {
        debug!(index, %mark, "blocking the opponent");
        return Some(index);
    }

    let vacancies: Vec<usize> = board.vacancies().collect();
    let index = vacancies.choose(&mut rand::thread_rng()).copied();
    debug!(?index, %mark, "falling back to a random cell");
    index
}

/// First vacant cell in scan order that would complete a run for `target`:
/// a full-length in-bounds run holding `RUN_LENGTH - 1` cells of `target`
/// and one vacancy.
fn completing_move(board: &Board, target: Mark) -> Option<usize> {
    for row in 0..board.height() {
        for col in 0..board.width() {
            for (dr, dc) in DIRECTIONS {
                let Some(indices) = run_indices(board, row, col, dr, dc) else {
                    continue;
                };

                let mut vacant = None;
                let mut owned = 0;
                for &index in &indices {
                    match board.cell(index) {
                        Some(Cell::Occupied(mark)) if mark == target => owned += 1,
                        Some(Cell::Empty) if vacant.is_none() => vacant = Some(index),
                        _ => {}
                    }
                }

                if owned == RUN_LENGTH - 1 {
                    if let Some(index) = vacant {
                        return Some(index);
                    }
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(width: usize, height: usize, marks: &[(usize, Mark)]) -> Board {
        let mut board = Board::new(width, height).expect("valid dimensions");
        for &(index, mark) in marks {
            board.set(index, Cell::Occupied(mark));
        }
        board
    }

    #[test]
    fn test_takes_winning_cell() {
        // O holds 0 and 1; 2 completes the top row.
        let board = board_with(3, 3, &[(0, Mark::O), (1, Mark::O), (4, Mark::X), (8, Mark::X)]);
        assert_eq!(choose_move(&board, Mark::O), Some(2));
    }

    #[test]
    fn test_winning_cell_is_deterministic() {
        let board = board_with(3, 3, &[(0, Mark::O), (1, Mark::O), (4, Mark::X), (8, Mark::X)]);
        for _ in 0..20 {
            assert_eq!(choose_move(&board, Mark::O), Some(2));
        }
    }

    #[test]
    fn test_blocks_opponent() {
        // X threatens the left column at 6; O has no win of its own.
        let board = board_with(3, 3, &[(0, Mark::X), (3, Mark::X), (4, Mark::O)]);
        assert_eq!(choose_move(&board, Mark::O), Some(6));
    }

    #[test]
    fn test_win_preferred_over_block() {
        // Both sides have a completing cell; O takes its own win at 8
        // rather than blocking X at 2.
        let board = board_with(
            3,
            3,
            &[
                (0, Mark::X),
                (1, Mark::X),
                (6, Mark::O),
                (7, Mark::O),
                (4, Mark::X),
            ],
        );
        assert_eq!(choose_move(&board, Mark::O), Some(8));
    }

    #[test]
    fn test_random_fallback_is_a_vacancy() {
        let board = board_with(3, 3, &[(4, Mark::X)]);
        for _ in 0..20 {
            let index = choose_move(&board, Mark::O).expect("vacancies remain");
            assert!(board.is_vacant(index));
        }
    }

    #[test]
    fn test_full_board_yields_none() {
        let mut board = Board::new(3, 3).expect("valid dimensions");
        for index in 0..9 {
            let mark = if index % 2 == 0 { Mark::X } else { Mark::O };
            board.set(index, Cell::Occupied(mark));
        }
        assert_eq!(choose_move(&board, Mark::O), None);
    }

    #[test]
    fn test_mixed_line_not_completed() {
        // Two O cells and an X in the same run: nothing to complete.
        let board = board_with(3, 3, &[(0, Mark::O), (1, Mark::O), (2, Mark::X)]);
        assert_eq!(completing_move(&board, Mark::O), None);
    }
}
