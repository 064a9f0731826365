//! Process-wide lobby registry: owns every session and serializes access.

use crate::error::GameError;
use crate::protocol::{ClientRequest, ServerEvent, Snapshot};
use crate::session::{ConnId, LobbyId, Session};
use gridrow::{Game, Mark};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex};
use tracing::{info, instrument, warn};

/// Inbound operation, dispatched through one typed entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Join `lobby`, creating it with the given dimensions if unseen.
    Join {
        /// Lobby to join.
        lobby: LobbyId,
        /// Board width for a newly created lobby.
        width: usize,
        /// Board height for a newly created lobby.
        height: usize,
    },
    /// Place a mark at `index`.
    Move {
        /// Target lobby.
        lobby: LobbyId,
        /// Row-major board index.
        index: usize,
    },
    /// Clear the board, keeping mark assignments.
    Reset {
        /// Target lobby.
        lobby: LobbyId,
    },
    /// Drop the connection from every session it joined.
    Leave,
}

impl From<ClientRequest> for Request {
    fn from(request: ClientRequest) -> Self {
        match request {
            ClientRequest::JoinLobby {
                lobby_id,
                board_width,
                board_height,
            } => Request::Join {
                lobby: lobby_id,
                width: board_width,
                height: board_height,
            },
            ClientRequest::MakeMove { lobby_id, index } => Request::Move {
                lobby: lobby_id,
                index,
            },
            ClientRequest::ResetGame { lobby_id } => Request::Reset { lobby: lobby_id },
        }
    }
}

/// An event addressed to a concrete set of connections.
#[derive(Debug, Clone, PartialEq)]
pub struct Outgoing {
    /// Recipient handles.
    pub to: Vec<ConnId>,
    /// Event payload.
    pub event: ServerEvent,
}

impl Outgoing {
    /// Event for a single recipient.
    pub fn only(conn: ConnId, event: ServerEvent) -> Self {
        Self {
            to: vec![conn],
            event,
        }
    }
}

/// Registry of all live lobbies.
///
/// Cloning shares the underlying map. One mutex serializes every
/// operation, so each validate-then-mutate sequence is atomic: of two
/// near-simultaneous moves on one lobby, the second observes the first's
/// occupied square and flipped turn. The registry is an owned value
/// handed to the transport, never a hidden static; tests run independent
/// registries side by side.
#[derive(Debug, Clone, Default)]
pub struct LobbyRegistry {
    sessions: Arc<Mutex<HashMap<LobbyId, Session>>>,
}

impl LobbyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one request for `conn` and returns the events to deliver.
    ///
    /// Validation failures surface as a single [`ServerEvent::Error`]
    /// addressed to `conn`; no state is mutated and nobody else is
    /// notified.
    #[instrument(skip(self))]
    pub fn dispatch(&self, conn: ConnId, request: Request) -> Vec<Outgoing> {
        match request {
            Request::Join {
                lobby,
                width,
                height,
            } => self.join(conn, lobby, width, height),
            Request::Move { lobby, index } => self.make_move(conn, &lobby, index),
            Request::Reset { lobby } => self.reset(conn, &lobby),
            Request::Leave => self.disconnect(conn),
        }
    }

    /// Identifiers of all live lobbies.
    pub fn lobbies(&self) -> Vec<LobbyId> {
        let sessions = self.sessions.lock().unwrap();
        sessions.keys().cloned().collect()
    }

    fn join(&self, conn: ConnId, lobby: LobbyId, width: usize, height: usize) -> Vec<Outgoing> {
        let mut sessions = self.sessions.lock().unwrap();

        let session = match sessions.entry(lobby) {
            // Dimensions of later joiners are ignored; the session is
            // already sized.
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let game = match Game::new(width, height) {
                    Ok(game) => game,
                    Err(err) => {
                        warn!(%conn, width, height, "rejecting lobby creation");
                        return vec![Outgoing::only(conn, error_event(err.into()))];
                    }
                };
                info!(lobby = %entry.key(), width, height, "creating lobby");
                let id = entry.key().clone();
                entry.insert(Session::new(id, game))
            }
        };

        match session.join(conn) {
            Ok(joined) => {
                let snapshot = Snapshot::for_participant(session, joined.mark);
                let mut out = vec![Outgoing::only(conn, ServerEvent::GameState(snapshot))];
                if joined.newly_joined {
                    let others = session.peers_of(conn);
                    if !others.is_empty() {
                        out.push(Outgoing {
                            to: others,
                            event: ServerEvent::PlayerJoined {
                                players: session.participant_count(),
                            },
                        });
                    }
                }
                out
            }
            Err(err) => vec![Outgoing::only(conn, error_event(err))],
        }
    }

    fn make_move(&self, conn: ConnId, lobby: &str, index: usize) -> Vec<Outgoing> {
        let mut sessions = self.sessions.lock().unwrap();
        let Some(session) = sessions.get_mut(lobby) else {
            return vec![Outgoing::only(conn, error_event(GameError::SessionNotFound))];
        };

        match session.make_move(conn, index) {
            Ok(placement) => vec![Outgoing {
                to: session.participants().collect(),
                event: ServerEvent::MoveMade {
                    index: placement.index,
                    player: placement.mark,
                    x_is_next: placement.to_move == Mark::X,
                    winner: placement.status.winner(),
                    winning_line: placement.status.winning_line().map(<[usize]>::to_vec),
                    draw: placement.status.is_draw(),
                },
            }],
            Err(err) => vec![Outgoing::only(conn, error_event(err))],
        }
    }

    fn reset(&self, conn: ConnId, lobby: &str) -> Vec<Outgoing> {
        let mut sessions = self.sessions.lock().unwrap();
        let Some(session) = sessions.get_mut(lobby) else {
            return vec![Outgoing::only(conn, error_event(GameError::SessionNotFound))];
        };

        match session.reset(conn) {
            Ok(()) => vec![Outgoing {
                to: session.participants().collect(),
                event: ServerEvent::GameReset {
                    board: session.game().board().cells().to_vec(),
                    x_is_next: true,
                },
            }],
            Err(err) => vec![Outgoing::only(conn, error_event(err))],
        }
    }

    /// A handle belongs to at most one lobby by construction; sweep all
    /// of them anyway.
    fn disconnect(&self, conn: ConnId) -> Vec<Outgoing> {
        let mut sessions = self.sessions.lock().unwrap();
        let mut out = Vec::new();

        sessions.retain(|lobby, session| {
            if !session.leave(conn) {
                return true;
            }
            let remaining = session.participant_count();
            if remaining == 0 {
                info!(lobby = %lobby, "last participant left, discarding lobby");
                return false;
            }
            out.push(Outgoing {
                to: session.participants().collect(),
                event: ServerEvent::PlayerLeft { players: remaining },
            });
            true
        });

        out
    }
}

fn error_event(err: GameError) -> ServerEvent {
    ServerEvent::Error {
        message: err.to_string(),
    }
}
