//! Gridrow server library - authoritative lobby coordination
//!
//! Tracks per-lobby game state for two-player N-in-a-row games,
//! arbitrates moves from connected participants and broadcasts state
//! transitions to every member of a lobby.
//!
//! # Architecture
//!
//! - **Registry**: owns every live [`Session`], one mutex serializing all
//!   operations, entries created on first join and discarded on last leave
//! - **Session**: the per-lobby state machine (mark assignment, turn
//!   arbitration, terminal lock)
//! - **Protocol**: the JSON wire contract with connected clients
//! - **Server**: the axum WebSocket transport mapping socket traffic onto
//!   registry operations
//!
//! # Example
//!
//! ```
//! use gridrow_server::{ConnId, LobbyRegistry, Request};
//!
//! let registry = LobbyRegistry::new();
//! let events = registry.dispatch(
//!     ConnId(1),
//!     Request::Join { lobby: "abc".into(), width: 3, height: 3 },
//! );
//! assert_eq!(events.len(), 1); // snapshot for the joiner
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod error;
mod protocol;
mod registry;
mod server;
mod session;

// Crate-level exports - error taxonomy
pub use error::GameError;

// Crate-level exports - wire contract
pub use protocol::{ClientRequest, ServerEvent, Snapshot};

// Crate-level exports - lobby registry
pub use registry::{LobbyRegistry, Outgoing, Request};

// Crate-level exports - transport
pub use server::{AppState, router, serve};

// Crate-level exports - session management
pub use session::{ConnId, Joined, LobbyId, Session};
