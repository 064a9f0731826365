//! Single-game state machine: board, turn, terminal status.

use crate::rules::{Win, check_winner, is_full};
use crate::types::{Board, Cell, DimensionError, Mark};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Current status of the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended with a completed run.
    Won(Win),
    /// Game ended with a full board and no run.
    Draw,
}

impl GameStatus {
    /// The winning mark, if any.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            GameStatus::Won(win) => Some(win.mark),
            _ => None,
        }
    }

    /// Indices of the winning run, if any.
    pub fn winning_line(&self) -> Option<&[usize]> {
        match self {
            GameStatus::Won(win) => Some(&win.line),
            _ => None,
        }
    }

    /// Whether the game ended with a full board and no winner.
    pub fn is_draw(&self) -> bool {
        matches!(self, GameStatus::Draw)
    }
}

/// Errors that can occur when placing a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PlaceError {
    /// The game already ended; reset before playing on.
    #[display("game already concluded")]
    Concluded,
    /// The targeted cell is occupied or off the board.
    #[display("square is already occupied")]
    SquareOccupied,
}

/// Outcome of a successful placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Index the mark was placed at.
    pub index: usize,
    /// Mark that was placed.
    pub mark: Mark,
    /// Mark to move next (already flipped).
    pub to_move: Mark,
    /// Status after the placement.
    pub status: GameStatus,
}

/// One authoritative game: board, next mark, terminal status.
///
/// Terminal status only changes as the immediate result of a placement;
/// once the game is won or drawn, further placements fail until
/// [`Game::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    to_move: Mark,
    status: GameStatus,
}

impl Game {
    /// Creates a new game on an empty board, validating the dimensions.
    pub fn new(width: usize, height: usize) -> Result<Self, DimensionError> {
        Ok(Self {
            board: Board::new(width, height)?,
            to_move: Mark::X,
            status: GameStatus::InProgress,
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark that moves next.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// Whether moves are currently accepted.
    pub fn in_progress(&self) -> bool {
        self.status == GameStatus::InProgress
    }

    /// Places the next mark at `index`, flips the turn and re-evaluates
    /// the terminal status.
    ///
    /// # Errors
    ///
    /// [`PlaceError::Concluded`] after a win or draw,
    /// [`PlaceError::SquareOccupied`] for an occupied or off-board cell.
    #[instrument(skip(self), fields(mark = %self.to_move))]
    pub fn place(&mut self, index: usize) -> Result<Placement, PlaceError> {
        if !self.in_progress() {
            return Err(PlaceError::Concluded);
        }
        if !self.board.is_vacant(index) {
            return Err(PlaceError::SquareOccupied);
        }

        let mark = self.to_move;
        self.board.set(index, Cell::Occupied(mark));
        self.to_move = mark.opponent();

        self.status = if let Some(win) = check_winner(&self.board) {
            GameStatus::Won(win)
        } else if is_full(&self.board) {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        };

        Ok(Placement {
            index,
            mark,
            to_move: self.to_move,
            status: self.status.clone(),
        })
    }

    /// Clears the board, hands the first turn back to X and reopens play.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board.clear();
        self.to_move = Mark::X;
        self.status = GameStatus::InProgress;
    }
}
