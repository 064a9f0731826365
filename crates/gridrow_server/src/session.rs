//! Per-lobby game session: mark assignment, turn arbitration, lifecycle.

use crate::error::GameError;
use derive_more::Display;
use gridrow::{Game, Mark, Placement};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a lobby.
pub type LobbyId = String;

/// Opaque handle for one connected client.
///
/// Handles are transient: a client that reconnects gets a fresh one, so a
/// returning human may end up with the other mark if both players cycled
/// before cleanup ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("conn-{}", _0)]
pub struct ConnId(pub u64);

/// Result of a join: the mark now held and whether it is newly assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Joined {
    /// Mark held by the joining connection.
    pub mark: Mark,
    /// `false` when the connection was already a participant.
    pub newly_joined: bool,
}

/// Authoritative state for one lobby: the game plus up to two
/// participants, at most one handle per mark at any time.
#[derive(Debug, Clone)]
pub struct Session {
    id: LobbyId,
    game: Game,
    player_x: Option<ConnId>,
    player_o: Option<ConnId>,
}

impl Session {
    /// Creates a session around a fresh game.
    #[instrument(skip(game))]
    pub fn new(id: LobbyId, game: Game) -> Self {
        info!(lobby = %id, "creating session");
        Self {
            id,
            game,
            player_x: None,
            player_o: None,
        }
    }

    /// Lobby identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The game state.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Mark held by `conn`, if it is a participant.
    pub fn mark_of(&self, conn: ConnId) -> Option<Mark> {
        if self.player_x == Some(conn) {
            Some(Mark::X)
        } else if self.player_o == Some(conn) {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// Number of connected participants (0-2).
    pub fn participant_count(&self) -> usize {
        usize::from(self.player_x.is_some()) + usize::from(self.player_o.is_some())
    }

    /// All participant handles.
    pub fn participants(&self) -> impl Iterator<Item = ConnId> + '_ {
        self.player_x.iter().chain(self.player_o.iter()).copied()
    }

    /// Participant handles other than `conn`.
    pub fn peers_of(&self, conn: ConnId) -> Vec<ConnId> {
        self.participants().filter(|peer| *peer != conn).collect()
    }

    /// Adds `conn` as a participant, assigning the first free mark
    /// (X before O).
    ///
    /// Idempotent per handle: a participant joining again re-receives its
    /// current mark without any reassignment. The free-mark policy means a
    /// handle rejoining after a disconnect takes whatever mark is vacant
    /// at that moment, not necessarily its old one.
    #[instrument(skip(self), fields(lobby = %self.id))]
    pub fn join(&mut self, conn: ConnId) -> Result<Joined, GameError> {
        if let Some(mark) = self.mark_of(conn) {
            debug!(%conn, %mark, "already a participant");
            return Ok(Joined {
                mark,
                newly_joined: false,
            });
        }

        if self.player_x.is_none() {
            self.player_x = Some(conn);
            info!(%conn, mark = %Mark::X, "participant joined");
            Ok(Joined {
                mark: Mark::X,
                newly_joined: true,
            })
        } else if self.player_o.is_none() {
            self.player_o = Some(conn);
            info!(%conn, mark = %Mark::O, "participant joined");
            Ok(Joined {
                mark: Mark::O,
                newly_joined: true,
            })
        } else {
            warn!(%conn, "lobby already has two players");
            Err(GameError::LobbyFull)
        }
    }

    /// Places a mark for `conn` at `index`.
    ///
    /// Validation order is fixed and fail-fast: concluded game, occupied
    /// square, participancy, opponent present, turn. The first violated
    /// rule wins and nothing is mutated.
    #[instrument(skip(self), fields(lobby = %self.id))]
    pub fn make_move(&mut self, conn: ConnId, index: usize) -> Result<Placement, GameError> {
        if !self.game.in_progress() {
            return Err(GameError::GameConcluded);
        }
        if !self.game.board().is_vacant(index) {
            return Err(GameError::SquareOccupied);
        }
        let mark = self.mark_of(conn).ok_or(GameError::NotAParticipant)?;
        if self.participant_count() < 2 {
            return Err(GameError::AwaitingOpponent);
        }
        if mark != self.game.to_move() {
            warn!(%conn, %mark, expected = %self.game.to_move(), "move out of turn");
            return Err(GameError::OutOfTurn);
        }

        let placement = self.game.place(index)?;
        info!(%conn, index, mark = %placement.mark, status = ?placement.status, "move placed");
        Ok(placement)
    }

    /// Clears the board and reopens play, keeping mark assignments.
    #[instrument(skip(self), fields(lobby = %self.id))]
    pub fn reset(&mut self, conn: ConnId) -> Result<(), GameError> {
        if self.mark_of(conn).is_none() {
            return Err(GameError::NotAParticipant);
        }
        self.game.reset();
        info!(%conn, "game reset");
        Ok(())
    }

    /// Removes `conn` from the session; returns whether it was a
    /// participant. Its mark becomes available for the next joiner and
    /// the board is left as-is.
    #[instrument(skip(self), fields(lobby = %self.id))]
    pub fn leave(&mut self, conn: ConnId) -> bool {
        if self.player_x == Some(conn) {
            self.player_x = None;
        } else if self.player_o == Some(conn) {
            self.player_o = None;
        } else {
            return false;
        }
        info!(%conn, remaining = self.participant_count(), "participant left");
        true
    }
}
