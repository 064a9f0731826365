//! Wire contract between the transport and connected clients.
//!
//! JSON text frames, tagged with a `type` field. Event and field names
//! stay camelCase to match the browser client.

use crate::session::Session;
use gridrow::{Cell, Mark};
use serde::{Deserialize, Serialize};

/// Message from a client.
///
/// Socket closure is the disconnect signal; there is no explicit leave
/// message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientRequest {
    /// Join a lobby, creating it with the given board dimensions if it
    /// does not exist yet. Dimensions are ignored on an existing lobby.
    JoinLobby {
        /// Lobby to join.
        lobby_id: String,
        /// Board width for a newly created lobby.
        board_width: usize,
        /// Board height for a newly created lobby.
        board_height: usize,
    },
    /// Place a mark at a board index.
    MakeMove {
        /// Target lobby.
        lobby_id: String,
        /// Row-major board index.
        index: usize,
    },
    /// Clear the board and start over, keeping mark assignments.
    ResetGame {
        /// Target lobby.
        lobby_id: String,
    },
}

/// Message to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    /// Full state snapshot, sent to a joiner.
    GameState(Snapshot),
    /// Another participant joined; sent to everyone else.
    PlayerJoined {
        /// Participant count after the join.
        players: usize,
    },
    /// A participant left; sent to everyone remaining.
    PlayerLeft {
        /// Participant count after the departure.
        players: usize,
    },
    /// A mark was placed; sent to all participants.
    MoveMade {
        /// Index the mark was placed at.
        index: usize,
        /// Mark that was placed.
        player: Mark,
        /// Whether X moves next.
        x_is_next: bool,
        /// Winning mark, when this move concluded the game.
        winner: Option<Mark>,
        /// Indices of the winning run, when there is a winner.
        winning_line: Option<Vec<usize>>,
        /// Whether this move filled the board with no winner.
        draw: bool,
    },
    /// The board was cleared; sent to all participants.
    GameReset {
        /// The cleared board.
        board: Vec<Cell>,
        /// Whether X moves next (always true after a reset).
        x_is_next: bool,
    },
    /// A request failed validation; sent only to the requester.
    Error {
        /// Human-readable reason.
        message: String,
    },
}

/// Everything a joiner needs to render the lobby.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Cells in row-major order.
    pub board: Vec<Cell>,
    /// Board width.
    pub board_width: usize,
    /// Board height.
    pub board_height: usize,
    /// Mark assigned to the receiving connection.
    pub your_mark: Mark,
    /// Whether X moves next.
    pub x_is_next: bool,
    /// Current participant count.
    pub players: usize,
    /// Winning mark, when the game has concluded with a winner.
    pub winner: Option<Mark>,
    /// Indices of the winning run, when there is a winner.
    pub winning_line: Option<Vec<usize>>,
    /// Whether the game has concluded in a draw.
    pub draw: bool,
}

impl Snapshot {
    /// Builds the snapshot `mark`'s holder should see for `session`.
    pub fn for_participant(session: &Session, mark: Mark) -> Self {
        let game = session.game();
        let status = game.status();
        Self {
            board: game.board().cells().to_vec(),
            board_width: game.board().width(),
            board_height: game.board().height(),
            your_mark: mark,
            x_is_next: game.to_move() == Mark::X,
            players: session.participant_count(),
            winner: status.winner(),
            winning_line: status.winning_line().map(<[usize]>::to_vec),
            draw: status.is_draw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_request_wire_names() {
        let json = r#"{"type":"joinLobby","lobbyId":"abc","boardWidth":4,"boardHeight":4}"#;
        let request: ClientRequest = serde_json::from_str(json).expect("parses");
        assert_eq!(
            request,
            ClientRequest::JoinLobby {
                lobby_id: "abc".into(),
                board_width: 4,
                board_height: 4,
            }
        );
    }

    #[test]
    fn test_move_made_wire_shape() {
        let event = ServerEvent::MoveMade {
            index: 5,
            player: Mark::X,
            x_is_next: false,
            winner: None,
            winning_line: None,
            draw: false,
        };
        let json = serde_json::to_string(&event).expect("serializes");
        assert!(json.contains(r#""type":"moveMade""#));
        assert!(json.contains(r#""xIsNext":false"#));
        assert!(json.contains(r#""player":"X""#));
    }
}
