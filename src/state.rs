use crate::core::GameSession;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state.
///
/// There is exactly one [`GameSession`] per process. Every handler that
/// touches the board, the seats, or the connection registry goes through
/// this single lock, which serializes connects, disconnects, and move
/// requests against each other.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<GameSession>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: Arc::new(RwLock::new(GameSession::new())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
