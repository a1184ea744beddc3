//! HTTP API endpoints.
//!
//! `/api/wheel-data` exposes the raw document store (read, and write by
//! action). `/api/wheel` returns the live session view.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::protocol::WheelView;
use crate::state::{AppState, SessionError};
use crate::store::{StoreAction, StoreError};
use crate::types::WheelDocument;

/// Errors surfaced by the HTTP layer as `{success: false, error}`
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to process request")]
    MalformedRequest(#[source] serde_json::Error),

    #[error("Failed to save wheel data")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Rejected(SessionError),
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Store(e) => ApiError::Store(e),
            other => ApiError::Rejected(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Rejected(SessionError::SpinInProgress) => StatusCode::CONFLICT,
            ApiError::Rejected(_) => StatusCode::BAD_REQUEST,
        };

        let body = serde_json::json!({
            "success": false,
            "error": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}

/// Successful write: the document as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteResponse {
    pub success: bool,
    pub data: WheelDocument,
}

/// Read the stored document.
///
/// GET /api/wheel-data
pub async fn read_wheel_data(State(state): State<Arc<AppState>>) -> Json<WheelDocument> {
    Json(state.store.read().await)
}

/// Apply one action to the stored document.
///
/// POST /api/wheel-data
///
/// Body: `{"action": "ADD_OPTION" | "DELETE_OPTION" | "ADD_HISTORY" | "RESET_HISTORY", "payload": ...}`.
/// The action is replayed on the live session so connected clients see it.
/// Option changes are refused with 409 while the wheel is spinning.
pub async fn write_wheel_data(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<WriteResponse>, ApiError> {
    let action: StoreAction = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!("Rejected wheel data request: {}", e);
        ApiError::MalformedRequest(e)
    })?;

    tracing::info!(action = action.name(), "Wheel data write");
    let doc = state.apply_store_action(action).await.map_err(|e| {
        tracing::warn!("Wheel data write failed: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(WriteResponse {
        success: true,
        data: doc,
    }))
}

/// Current session view (options, layout, history, spin state).
///
/// GET /api/wheel
pub async fn wheel_view(State(state): State<Arc<AppState>>) -> Json<WheelView> {
    Json(state.view().await)
}
