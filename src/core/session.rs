use std::collections::HashMap;
use tokio::sync::broadcast;

use crate::models::{MoveRequest, PlayedMove, RejectReason, ServerMessage};

use super::{Board, Connection, ConnectionId, Seat, SeatAssignment, SeatMap};

/// Outcome of a move request, as seen by the gateway caller.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    Accepted { played: PlayedMove, fen: String },
    Rejected(RejectReason),
}

/// The single game session shared by every connection.
///
/// Owns the board, the two seats, the connection registry, and the
/// broadcast channel. Created once at process start and never reset;
/// there is no new-game operation. All mutation happens inside
/// [`connect`](Self::connect), [`disconnect`](Self::disconnect), and
/// [`handle_move`](Self::handle_move), which the transport serializes
/// behind one lock.
#[derive(Debug)]
pub struct GameSession {
    board: Board,
    seats: SeatMap,
    connections: HashMap<ConnectionId, Connection>,
    broadcast_tx: broadcast::Sender<String>,
}

impl GameSession {
    pub fn new() -> Self {
        let (broadcast_tx, _) = broadcast::channel(100);

        Self {
            board: Board::new(),
            seats: SeatMap::new(),
            connections: HashMap::new(),
            broadcast_tx,
        }
    }

    /// Subscribe to the fan-out stream of serialized messages.
    ///
    /// WebSocket handlers subscribe instead of the session holding
    /// socket handles; delivery failures are each subscriber's problem
    /// and never stall move processing.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.broadcast_tx.subscribe()
    }

    /// Register a new connection and assign it a role.
    ///
    /// The first open seat is claimed; with both seats held the
    /// connection becomes a spectator. Cannot fail. The caller is
    /// responsible for delivering the role notice to this connection
    /// alone.
    pub fn connect(&mut self, id: ConnectionId) -> SeatAssignment {
        self.connections.insert(id, Connection::new(id));
        let assignment = self.seats.claim(id);

        match assignment {
            SeatAssignment::Player(seat) => {
                tracing::info!("connection {} seated as {}", id, seat.as_str());
            }
            SeatAssignment::Spectator => {
                tracing::info!("connection {} joined as spectator", id);
            }
        }

        assignment
    }

    /// Drop a connection, freeing its seat if it held one.
    ///
    /// The freed seat waits for the next connect; nobody is promoted.
    /// Spectator departures change nothing observable.
    pub fn disconnect(&mut self, id: ConnectionId) {
        self.connections.remove(&id);

        if let Some(seat) = self.seats.release(id) {
            tracing::info!("connection {} left, {} seat now open", id, seat.as_str());
        } else {
            tracing::debug!("spectator {} left", id);
        }
    }

    /// The move gateway.
    ///
    /// Turn gate first: the requester must hold the seat matching the
    /// board's side-to-move, otherwise the engine is never consulted.
    /// Then the engine validates and applies. An accepted move fans out
    /// the echoed move followed by a full resync state; a rejected move
    /// touches nothing and is the requester's to hear about.
    pub fn handle_move(&mut self, id: ConnectionId, request: &MoveRequest) -> MoveOutcome {
        let turn = self.board.side_to_move();

        if self.seats.holder(turn) != Some(id) {
            tracing::debug!("connection {} moved out of turn", id);
            return MoveOutcome::Rejected(RejectReason::NotYourTurn);
        }

        if !self.board.apply_if_legal(&request.from, &request.to) {
            tracing::debug!(
                "engine refused {}-{} from connection {}",
                request.from,
                request.to,
                id
            );
            return MoveOutcome::Rejected(RejectReason::IllegalMove);
        }

        let played = PlayedMove::from(request);
        let fen = self.board.fen();

        tracing::info!("{} played {}-{}", turn.as_str(), played.from, played.to);

        // Move first, then the resync state; pushed back-to-back while
        // the session is locked so every subscriber sees them in order.
        self.broadcast(&ServerMessage::Move {
            played: played.clone(),
        });
        self.broadcast(&ServerMessage::State {
            serialized: fen.clone(),
        });

        MoveOutcome::Accepted { played, fen }
    }

    /// The seat `id` holds, if any. Absence means spectator.
    pub fn seat_of(&self, id: ConnectionId) -> Option<Seat> {
        self.seats.seat_of(id)
    }

    /// Current board state as FEN.
    pub fn fen(&self) -> String {
        self.board.fen()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Diagnostics snapshot for the stats endpoint.
    pub fn stats(&self) -> serde_json::Value {
        serde_json::json!({
            "connections": self.connections.len(),
            "seats_occupied": self.seats.occupied_count(),
            "first_seat_taken": self.seats.holder(Seat::First).is_some(),
            "second_seat_taken": self.seats.holder(Seat::Second).is_some(),
            "moves_played": self.board.moves_played(),
            "fen": self.board.fen(),
        })
    }

    /// Fire-and-forget fan-out. A send error just means nobody is
    /// listening right now.
    fn broadcast(&self, message: &ServerMessage) {
        if let Some(text) = message.to_json() {
            let _ = self.broadcast_tx.send(text);
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
