use super::AppState;
use crate::protocol::ServerMessage;
use crate::store::StoreAction;
use crate::types::now_timestamp;

impl AppState {
    /// Forget all past winners
    pub async fn clear_history(&self) {
        let cleared = {
            let mut doc = self.document.write().await;
            std::mem::take(&mut doc.history).len()
        };

        tracing::info!(cleared, "History cleared");
        self.publish(ServerMessage::HistoryUpdated {
            history: Vec::new(),
        });
        self.persist(StoreAction::ResetHistory {}, now_timestamp())
            .await;
    }
}
