use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{api, state::AppState, ws};

/// Build the application router: API routes, the WebSocket, and static
/// front-end assets for everything else.
pub fn build_router(state: Arc<AppState>, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route(
            "/api/wheel-data",
            get(api::read_wheel_data).post(api::write_wheel_data),
        )
        .route("/api/wheel", get(api::wheel_view))
        .route("/ws", get(ws::ws_handler))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
