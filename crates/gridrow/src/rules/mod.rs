//! Win and draw rules for N-in-a-row boards.

mod draw;
mod win;

pub use draw::is_full;
pub use win::{Win, check_winner};

use crate::types::Board;

/// Consecutive same-mark cells required to win.
pub const RUN_LENGTH: usize = 3;

/// Candidate run directions, scanned in this order: right, down,
/// down-right, down-left.
pub(crate) const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Board indices of the run starting at `(row, col)` along `(dr, dc)`,
/// or `None` when the run leaves the board.
pub(crate) fn run_indices(
    board: &Board,
    row: usize,
    col: usize,
    dr: isize,
    dc: isize,
) -> Option<[usize; RUN_LENGTH]> {
    let mut indices = [0usize; RUN_LENGTH];
    for (step, slot) in indices.iter_mut().enumerate() {
        let r = row as isize + dr * step as isize;
        let c = col as isize + dc * step as isize;
        if r < 0 || c < 0 || r >= board.height() as isize || c >= board.width() as isize {
            return None;
        }
        *slot = r as usize * board.width() + c as usize;
    }
    Some(indices)
}
