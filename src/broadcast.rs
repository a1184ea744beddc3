use crate::state::AppState;
use crate::types::HistoryEntry;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

/// Spawn the one-shot task that lands a spin once its animation has run.
///
/// `settled` receives the recorded history entry. It is dropped without a
/// value if the spin was no longer active when the timer fired.
pub fn spawn_spin_settler(
    state: Arc<AppState>,
    spin_id: u64,
    after: Duration,
    settled: oneshot::Sender<HistoryEntry>,
) {
    tokio::spawn(async move {
        tokio::time::sleep(after).await;

        match state.settle_spin(spin_id).await {
            Ok(entry) => {
                // Ignore send errors (nobody waiting on this spin is fine)
                let _ = settled.send(entry);
            }
            Err(e) => {
                tracing::warn!(spin_id, "Spin could not be settled: {}", e);
            }
        }
    });
}
