use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;
use uuid::Uuid;

/// Opaque identifier for a live connection.
///
/// Minted when the transport hands us a fresh socket and valid for its
/// lifetime. Carries no identity beyond uniqueness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A live connection as tracked by the registry.
///
/// Whether the connection holds a seat is not stored here; it is looked
/// up in the seat map, so there is a single source of truth for roles.
#[derive(Debug, Clone)]
pub struct Connection {
    pub id: ConnectionId,
    pub connected_at: OffsetDateTime,
}

impl Connection {
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            connected_at: OffsetDateTime::now_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(ConnectionId::new(), ConnectionId::new());
    }

    #[test]
    fn test_display_roundtrip() {
        let id = ConnectionId::new();
        let text = id.to_string();
        assert_eq!(text.len(), 36);
        assert_eq!(text.parse::<Uuid>().unwrap(), id.0);
    }

    #[test]
    fn test_new_connection_records_id() {
        let id = ConnectionId::new();
        let connection = Connection::new(id);
        assert_eq!(connection.id, id);
    }
}
