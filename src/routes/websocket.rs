use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::{broadcast, mpsc};

use crate::{
    core::{ConnectionId, MoveOutcome},
    models::{MoveRequest, RejectReason, ServerMessage},
    state::AppState,
};

/// WebSocket endpoint for the game session.
///
/// # Flow
///
/// 1. Accept the connection and mint a fresh connection id
/// 2. Register with the session; first open seat or spectator
/// 3. Send the role notice and an initial board snapshot to this
///    connection only
/// 4. Forward broadcast move/state messages until either side hangs up
/// 5. Feed incoming move requests through the gateway; route rejections
///    back to this connection only
/// 6. On teardown, free the seat if one was held
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let connection_id = ConnectionId::new();

    // Register, claim a seat, and snapshot the board under one lock so
    // the role notice and the initial state agree with each other. The
    // broadcast subscription starts here too: moves accepted while this
    // handler is still setting up are buffered, not lost.
    let (assignment, fen, mut broadcast_rx) = {
        let mut session = state.session.write().await;
        let assignment = session.connect(connection_id);
        (assignment, session.fen(), session.subscribe())
    };

    let (mut sender, mut receiver) = socket.split();

    // Role notice goes to this connection alone, never broadcast.
    let role_notice = ServerMessage::Role {
        value: assignment.into(),
    };
    if let Some(text) = role_notice.to_json() {
        if sender.send(Message::Text(text)).await.is_err() {
            state.session.write().await.disconnect(connection_id);
            return;
        }
    }

    // One-off snapshot so a late joiner can render the position without
    // waiting for the next accepted move.
    let snapshot = ServerMessage::State { serialized: fen };
    if let Some(text) = snapshot.to_json() {
        let _ = sender.send(Message::Text(text)).await;
    }

    // Rejection notices are directed replies; they bypass the broadcast
    // channel entirely.
    let (direct_tx, mut direct_rx) = mpsc::unbounded_channel::<String>();

    let mut send_task = tokio::spawn(async move {
        loop {
            tokio::select! {
                fanned_out = broadcast_rx.recv() => match fanned_out {
                    Ok(text) => {
                        if sender.send(Message::Text(text)).await.is_err() {
                            break;
                        }
                    }
                    // A lagged receiver missed some messages; the next
                    // resync state catches it up.
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!("connection dropped {} broadcast messages", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                directed = direct_rx.recv() => match directed {
                    Some(text) => {
                        if sender.send(Message::Text(text)).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                },
            }
        }
    });

    let recv_state = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            match message {
                Message::Text(text) => {
                    let reply = match serde_json::from_str::<MoveRequest>(&text) {
                        Ok(request) => {
                            let request = request.normalized();
                            let outcome = recv_state
                                .session
                                .write()
                                .await
                                .handle_move(connection_id, &request);

                            match outcome {
                                // Acceptance reaches the mover through
                                // the broadcast like everyone else.
                                MoveOutcome::Accepted { .. } => None,
                                MoveOutcome::Rejected(reason) => {
                                    Some(ServerMessage::Rejected { reason })
                                }
                            }
                        }
                        // Unparseable payloads get the same answer as
                        // moves the engine refuses.
                        Err(_) => Some(ServerMessage::Rejected {
                            reason: RejectReason::IllegalMove,
                        }),
                    };

                    if let Some(text) = reply.and_then(|message| message.to_json()) {
                        if direct_tx.send(text).is_err() {
                            break;
                        }
                    }
                }
                Message::Close(_) => break,
                Message::Ping(_) | Message::Pong(_) => {
                    // Handled by axum at the protocol level.
                }
                Message::Binary(_) => {
                    tracing::warn!("unexpected binary frame from {}", connection_id);
                }
            }
        }
    });

    // Either task ending tears the other down.
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.session.write().await.disconnect(connection_id);
    tracing::info!("connection {} closed", connection_id);
}
