use super::{AppState, SessionError};
use crate::protocol::ServerMessage;
use crate::store::StoreAction;
use crate::types::*;
use crate::wheel::{select_winner, SpinError, SpinPlan};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

/// A started spin. `settled` resolves once, when the spin lands.
#[derive(Debug)]
pub struct SpinTicket {
    pub plan: SpinPlan,
    pub settled: oneshot::Receiver<HistoryEntry>,
}

impl AppState {
    /// Pick a winner and start the wheel turning toward it.
    ///
    /// The winner is chosen from a snapshot of the current options; the same
    /// snapshot drives the animation, so the reported index always refers to
    /// what the clients are rendering.
    pub async fn start_spin(self: &Arc<Self>) -> Result<SpinTicket, SessionError> {
        let plan = {
            let mut wheel = self.wheel.write().await;
            if wheel.is_spinning() {
                return Err(SpinError::AlreadySpinning.into());
            }
            let doc = self.document.read().await.clone();

            let mut rng = rand::rng();
            let winner_index = select_winner(&doc.options, &doc.history, &mut rng)
                .ok_or(SpinError::NoOptions)?;
            wheel.begin_spin(doc.options, winner_index, &self.spin_settings, &mut rng)?
        };

        tracing::info!(
            spin_id = plan.spin_id,
            winner = %plan.winner.label,
            winner_index = plan.winner_index,
            target_rotation = plan.target_rotation,
            "Spin started"
        );
        self.publish(ServerMessage::SpinStarted { plan: plan.clone() });

        let (tx, rx) = oneshot::channel();
        crate::broadcast::spawn_spin_settler(
            self.clone(),
            plan.spin_id,
            Duration::from_millis(plan.duration_ms),
            tx,
        );

        Ok(SpinTicket { plan, settled: rx })
    }

    /// The spin animation finished: record and announce the winner
    pub async fn settle_spin(&self, spin_id: u64) -> Result<HistoryEntry, SessionError> {
        let (winner_index, winner) = self.wheel.write().await.complete(spin_id)?;
        let entry = HistoryEntry::new(winner.clone(), now_timestamp());

        let history = {
            let mut doc = self.document.write().await;
            doc.push_history(entry.clone());
            doc.history.clone()
        };

        tracing::info!(spin_id, winner = %winner.label, "Spin settled");
        self.publish(ServerMessage::SpinSettled {
            spin_id,
            winner_index,
            entry: entry.clone(),
        });
        self.publish(ServerMessage::HistoryUpdated { history });
        self.persist(StoreAction::AddHistory(winner), entry.timestamp.clone())
            .await;

        Ok(entry)
    }

    /// Close the result display. Returns false if there was nothing to close.
    pub async fn dismiss_result(&self) -> Result<bool, SessionError> {
        let dismissed = self.wheel.write().await.dismiss()?;
        if dismissed {
            self.publish(ServerMessage::ResultDismissed);
        }
        Ok(dismissed)
    }
}
