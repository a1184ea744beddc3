use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use luckywheel::{
    config::WheelConfig,
    router::build_router,
    state::AppState,
    store::{JsonFileStore, MemoryStore, WheelStore},
};

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "luckywheel=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Lucky Wheel...");

    let config = WheelConfig::from_env();

    let store: Arc<dyn WheelStore> = match &config.data_path {
        Some(path) => Arc::new(JsonFileStore::new(path)),
        None => {
            tracing::warn!("WHEEL_DATA_PATH is empty, wheel data will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let state = Arc::new(AppState::new(store, config.spin));
    state.load().await;

    let app = build_router(state, &config.static_dir);

    tracing::info!("Listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
