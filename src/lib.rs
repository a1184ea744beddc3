// Public API for integration tests and potential library usage

pub mod api;
pub mod config;
pub mod protocol;
pub mod router;
pub mod state;
pub mod store;
pub mod types;
pub mod wheel;
pub mod ws;

// Spin settle timer
pub mod broadcast;
