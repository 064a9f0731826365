//! WebSocket transport: maps socket traffic onto registry operations.

use crate::protocol::{ClientRequest, ServerEvent};
use crate::registry::{LobbyRegistry, Outgoing, Request};
use crate::session::ConnId;
use axum::Router;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use futures::{SinkExt, StreamExt};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, instrument, warn};

/// Outbound channels of all currently connected clients.
type PeerMap = Arc<Mutex<HashMap<ConnId, mpsc::UnboundedSender<ServerEvent>>>>;

/// Shared state handed to every connection handler.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    registry: LobbyRegistry,
    peers: PeerMap,
    next_conn: Arc<AtomicU64>,
}

impl AppState {
    /// Creates transport state around an existing registry.
    pub fn new(registry: LobbyRegistry) -> Self {
        Self {
            registry,
            peers: PeerMap::default(),
            next_conn: Arc::new(AtomicU64::new(0)),
        }
    }
}

/// Builds the HTTP router: a liveness probe at `/` and the WebSocket
/// endpoint at `/ws`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/ws", get(ws_handler))
        .layer(
            CorsLayer::new()
                .allow_methods(Any)
                .allow_headers(Any)
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds and serves the lobby server until the process is stopped.
#[instrument]
pub async fn serve(host: String, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(LobbyRegistry::new());
    let app = router(state);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    info!(%host, port, "lobby server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> &'static str {
    "gridrow server is running"
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Runs one connection: a writer task draining the peer's outbound
/// channel plus a read loop feeding the registry. Socket closure maps to
/// a leave against every session the handle had joined.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let conn = ConnId(state.next_conn.fetch_add(1, Ordering::Relaxed));
    info!(%conn, "client connected");

    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();
    state.peers.lock().unwrap().insert(conn, tx);

    let writer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(err) => {
                    warn!(%err, "failed to encode event");
                    continue;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                // Peer is gone; the read loop will observe the closure.
                break;
            }
        }
    });

    while let Some(message) = stream.next().await {
        let message = match message {
            Ok(message) => message,
            Err(err) => {
                debug!(%conn, %err, "socket error");
                break;
            }
        };

        match message {
            Message::Text(text) => {
                let batch = match serde_json::from_str::<ClientRequest>(&text) {
                    Ok(request) => state.registry.dispatch(conn, request.into()),
                    Err(err) => {
                        debug!(%conn, %err, "unparseable request");
                        vec![Outgoing::only(
                            conn,
                            ServerEvent::Error {
                                message: format!("malformed request: {err}"),
                            },
                        )]
                    }
                };
                deliver(&state.peers, batch);
            }
            Message::Close(_) => break,
            // Ping/pong are answered by axum itself.
            _ => {}
        }
    }

    state.peers.lock().unwrap().remove(&conn);
    let farewells = state.registry.dispatch(conn, Request::Leave);
    deliver(&state.peers, farewells);
    writer.abort();
    info!(%conn, "client disconnected");
}

/// Fans a batch of addressed events out to the connected peers.
fn deliver(peers: &PeerMap, batch: Vec<Outgoing>) {
    let peers = peers.lock().unwrap();
    for outgoing in batch {
        for conn in &outgoing.to {
            if let Some(tx) = peers.get(conn) {
                if tx.send(outgoing.event.clone()).is_err() {
                    debug!(%conn, "peer channel closed");
                }
            }
        }
    }
}
