//! WebSocket message dispatch
//!
//! Successful mutations are announced to every client (including the sender)
//! through the state's broadcast channel, so handlers only return a direct
//! response for errors and snapshot requests.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::{AppState, SessionError};
use std::sync::Arc;

fn error_response(e: SessionError) -> Option<ServerMessage> {
    Some(ServerMessage::error(e.code(), e.to_string()))
}

/// Handle client messages and return optional response
pub async fn handle_message(msg: ClientMessage, state: &Arc<AppState>) -> Option<ServerMessage> {
    match msg {
        ClientMessage::AddOption { label } => match state.add_option(&label).await {
            Ok(_) => None,
            Err(e) => error_response(e),
        },

        ClientMessage::DeleteOption { id } => match state.delete_option(&id).await {
            Ok(_) => None,
            Err(e) => error_response(e),
        },

        ClientMessage::ClearHistory => {
            state.clear_history().await;
            None
        }

        ClientMessage::Spin => match state.start_spin().await {
            // The settle timer owns the outcome; nobody here awaits it
            Ok(_ticket) => None,
            Err(e) => {
                tracing::debug!("Spin rejected: {}", e);
                error_response(e)
            }
        },

        ClientMessage::DismissResult => match state.dismiss_result().await {
            Ok(_) => None,
            Err(e) => error_response(e),
        },

        ClientMessage::Sync => Some(ServerMessage::Wheel {
            wheel: state.view().await,
        }),
    }
}
