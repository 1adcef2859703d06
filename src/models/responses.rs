use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Seat, SeatAssignment};

use super::MoveRequest;

/// What a connection was assigned, as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleValue {
    First,
    Second,
    Spectator,
}

impl From<SeatAssignment> for RoleValue {
    fn from(assignment: SeatAssignment) -> Self {
        match assignment {
            SeatAssignment::Player(Seat::First) => RoleValue::First,
            SeatAssignment::Player(Seat::Second) => RoleValue::Second,
            SeatAssignment::Spectator => RoleValue::Spectator,
        }
    }
}

/// Why a move request was turned down.
///
/// Both cases are expected, client-correctable conditions. They go back
/// to the requester only and are never treated as server errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    #[error("it is not this connection's turn")]
    NotYourTurn,
    #[error("the rules engine refused the move")]
    IllegalMove,
}

/// An applied move, echoed back to every connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedMove {
    pub from: String,
    pub to: String,
    pub promotion: String,
}

impl From<&MoveRequest> for PlayedMove {
    fn from(request: &MoveRequest) -> Self {
        Self {
            from: request.from.clone(),
            to: request.to.clone(),
            promotion: request.promotion.clone(),
        }
    }
}

/// Every message the server sends over a WebSocket.
///
/// `Role` and `Rejected` are directed at a single connection; `Move` and
/// `State` fan out to everyone. A resync `State` also goes to each
/// connection once, right after its role notice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ServerMessage {
    Role {
        value: RoleValue,
    },
    Rejected {
        reason: RejectReason,
    },
    Move {
        #[serde(rename = "move")]
        played: PlayedMove,
    },
    State {
        serialized: String,
    },
}

impl ServerMessage {
    /// Serialize for the wire. Infallible in practice; a `None` here
    /// means the message is silently dropped rather than killing the
    /// connection.
    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}
