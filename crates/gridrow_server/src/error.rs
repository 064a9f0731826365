//! Recoverable validation errors, reported only to the requesting
//! connection.

use derive_more::{Display, Error};
use gridrow::{DimensionError, MAX_DIMENSION, MIN_DIMENSION, PlaceError};

/// Validation failure for a lobby operation.
///
/// Every variant is recoverable: the requester gets an error event, the
/// session (if any) is left untouched and no other participant hears
/// about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// Join request with a dimension outside the accepted range.
    #[display(
        "board dimensions must be {}-{} on each axis",
        MIN_DIMENSION,
        MAX_DIMENSION
    )]
    InvalidBoardDimensions,
    /// Move or reset against an unknown lobby.
    #[display("no such lobby")]
    SessionNotFound,
    /// Move attempted after a win or draw, before a reset.
    #[display("game already concluded")]
    GameConcluded,
    /// Move targets an occupied or off-board square.
    #[display("square is already occupied")]
    SquareOccupied,
    /// Requester never joined this lobby.
    #[display("you are not a participant in this lobby")]
    NotAParticipant,
    /// Move attempted before a second participant joined.
    #[display("waiting for an opponent to join")]
    AwaitingOpponent,
    /// Move attempted by the participant whose mark is not up.
    #[display("not your turn")]
    OutOfTurn,
    /// Join attempted when both marks are already claimed.
    #[display("lobby already has two players")]
    LobbyFull,
}

impl From<DimensionError> for GameError {
    fn from(_: DimensionError) -> Self {
        GameError::InvalidBoardDimensions
    }
}

impl From<PlaceError> for GameError {
    fn from(err: PlaceError) -> Self {
        match err {
            PlaceError::Concluded => GameError::GameConcluded,
            PlaceError::SquareOccupied => GameError::SquareOccupied,
        }
    }
}
