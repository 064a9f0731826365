//! Gridrow library - generalized N-in-a-row game logic
//!
//! Pure rules for a two-player board game on configurable rectangular
//! boards: win detection, draw detection, a single-game state machine,
//! and the greedy move heuristic used by the local computer opponent.
//! No I/O, no async - lobby coordination lives in `gridrow_server`.
//!
//! # Example
//!
//! ```
//! use gridrow::{Game, GameStatus, Mark};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut game = Game::new(3, 3)?;
//! assert_eq!(game.to_move(), Mark::X);
//!
//! game.place(4)?;
//! assert_eq!(game.to_move(), Mark::O);
//! assert_eq!(game.status(), &GameStatus::InProgress);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod game;
mod heuristic;
mod rules;
mod types;

// Crate-level exports - game state machine
pub use game::{Game, GameStatus, PlaceError, Placement};

// Crate-level exports - computer opponent
pub use heuristic::choose_move;

// Crate-level exports - rules
pub use rules::{RUN_LENGTH, Win, check_winner, is_full};

// Crate-level exports - domain types
pub use types::{Board, Cell, DimensionError, MAX_DIMENSION, MIN_DIMENSION, Mark};
