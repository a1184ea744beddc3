mod history;
mod options;
mod spin;

pub use spin::SpinTicket;

use crate::protocol::{ServerMessage, WheelView};
use crate::store::{MemoryStore, StoreAction, StoreError, WheelStore};
use crate::types::*;
use crate::wheel::{layout, SpinError, SpinSettings, WheelState};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Errors from session operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("option label cannot be empty")]
    EmptyLabel,

    #[error("option '{0}' not found")]
    OptionNotFound(OptionId),

    #[error("options cannot change while the wheel is spinning")]
    SpinInProgress,

    #[error(transparent)]
    Spin(#[from] SpinError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SessionError {
    /// Stable error code sent to clients
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::EmptyLabel => "EMPTY_LABEL",
            SessionError::OptionNotFound(_) => "OPTION_NOT_FOUND",
            SessionError::SpinInProgress => "SPIN_IN_PROGRESS",
            SessionError::Spin(SpinError::NoOptions) => "NO_OPTIONS",
            SessionError::Spin(SpinError::AlreadySpinning) => "ALREADY_SPINNING",
            SessionError::Spin(_) => "SPIN_FAILED",
            SessionError::Store(_) => "STORE_FAILED",
        }
    }
}

/// Shared application state.
///
/// The in-memory document is the source of truth for the running session.
/// Every mutation updates it first, notifies clients, then writes through to
/// the store; a failed write is logged and not rolled back.
///
/// Lock order: `wheel` before `document`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn WheelStore>,
    pub document: Arc<RwLock<WheelDocument>>,
    pub wheel: Arc<RwLock<WheelState>>,
    pub spin_settings: SpinSettings,
    /// Broadcast channel for sending messages to every connected client
    pub broadcast: broadcast::Sender<ServerMessage>,
}

impl AppState {
    pub fn new(store: Arc<dyn WheelStore>, spin_settings: SpinSettings) -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self {
            store,
            document: Arc::new(RwLock::new(WheelDocument::default())),
            wheel: Arc::new(RwLock::new(WheelState::new())),
            spin_settings,
            broadcast: tx,
        }
    }

    /// Pull the persisted document into memory
    pub async fn load(&self) {
        let doc = self.store.read().await;
        tracing::info!(
            store = %self.store.describe(),
            options = doc.options.len(),
            history = doc.history.len(),
            "Wheel data loaded"
        );
        *self.document.write().await = doc;
    }

    pub async fn document(&self) -> WheelDocument {
        self.document.read().await.clone()
    }

    pub async fn view(&self) -> WheelView {
        let wheel = self.wheel.read().await;
        let doc = self.document.read().await;
        WheelView {
            options: doc.options.clone(),
            segments: layout(&doc.options),
            history: doc.history.clone(),
            phase: wheel.phase(),
            rotation: wheel.rotation(),
            winner_index: wheel.winner_index(),
        }
    }

    /// Write an action straight to the store, then replay it on the session.
    ///
    /// Only the action is replayed; the session never adopts the stored
    /// document wholesale, so in-memory changes whose write failed survive.
    /// Option changes are refused while spinning. Returns the stored document.
    pub async fn apply_store_action(
        &self,
        action: StoreAction,
    ) -> Result<WheelDocument, SessionError> {
        let wheel = self.wheel.read().await;
        let touches_options = action.touches_options();
        if touches_options && wheel.is_spinning() {
            return Err(SessionError::SpinInProgress);
        }

        let name = action.name();
        let timestamp = now_timestamp();
        let stored = self.store.write(action.clone(), timestamp.clone()).await?;

        let (options, history) = {
            let mut doc = self.document.write().await;
            action.apply(&mut doc, timestamp);
            (doc.options.clone(), doc.history.clone())
        };
        drop(wheel);

        tracing::debug!(action = name, "Store write replayed on session");
        if touches_options {
            self.publish_options(options);
        } else {
            self.publish(ServerMessage::HistoryUpdated { history });
        }
        Ok(stored)
    }

    /// Send to all connected clients. No receivers is fine.
    pub fn publish(&self, msg: ServerMessage) {
        let _ = self.broadcast.send(msg);
    }

    fn publish_options(&self, options: Vec<WheelOption>) {
        let segments = layout(&options);
        self.publish(ServerMessage::OptionsUpdated { options, segments });
    }

    /// Write through to the store; failures leave the in-memory state as is
    async fn persist(&self, action: StoreAction, timestamp: String) {
        let name = action.name();
        if let Err(e) = self.store.write(action, timestamp).await {
            tracing::error!(action = name, "Failed to persist wheel data: {}", e);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(MemoryStore::new()), SpinSettings::default())
    }
}
