//! Win detection logic for N-in-a-row boards.

use super::{DIRECTIONS, run_indices};
use crate::types::{Board, Cell, Mark};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A completed winning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Win {
    /// Mark that completed the run.
    pub mark: Mark,
    /// Board indices of the run, in direction order from its start cell.
    pub line: Vec<usize>,
}

/// Scans the board for a completed run.
///
/// Every cell is treated as the start of a candidate run in each of the
/// four directions; candidates that leave the board are skipped. Cells are
/// visited row-major and directions in their declaration order, and the
/// first qualifying run is returned. When one move completes two runs at
/// once the result is therefore a fixed scan-order pick, not a semantic
/// preference.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Win> {
    for row in 0..board.height() {
        for col in 0..board.width() {
            for (dr, dc) in DIRECTIONS {
                let Some(indices) = run_indices(board, row, col, dr, dc) else {
                    continue;
                };
                let Some(Cell::Occupied(mark)) = board.cell(indices[0]) else {
                    continue;
                };
                if indices[1..]
                    .iter()
                    .all(|&index| board.cell(index) == Some(Cell::Occupied(mark)))
                {
                    return Some(Win {
                        mark,
                        line: indices.to_vec(),
                    });
                }
            }
        }
    }

    None
}
