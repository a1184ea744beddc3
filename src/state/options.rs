use super::{AppState, SessionError};
use crate::store::StoreAction;
use crate::types::*;

impl AppState {
    /// Add an option to the end of the wheel, cycling segment colors
    pub async fn add_option(&self, label: &str) -> Result<WheelOption, SessionError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(SessionError::EmptyLabel);
        }

        let wheel = self.wheel.read().await;
        if wheel.is_spinning() {
            return Err(SessionError::SpinInProgress);
        }

        let (option, options) = {
            let mut doc = self.document.write().await;
            let (color, text_color) = next_colors(doc.options.last().map(|o| o.color.as_str()));
            let option = WheelOption {
                id: ulid::Ulid::new().to_string(),
                label: label.to_string(),
                color: color.to_string(),
                text_color: text_color.to_string(),
            };
            doc.options.push(option.clone());
            (option, doc.options.clone())
        };
        drop(wheel);

        tracing::info!(id = %option.id, label = %option.label, "Option added");
        self.publish_options(options);
        self.persist(StoreAction::AddOption(option.clone()), now_timestamp())
            .await;
        Ok(option)
    }

    /// Remove an option by id
    pub async fn delete_option(&self, id: &str) -> Result<WheelOption, SessionError> {
        let wheel = self.wheel.read().await;
        if wheel.is_spinning() {
            return Err(SessionError::SpinInProgress);
        }

        let (removed, options) = {
            let mut doc = self.document.write().await;
            let pos = doc
                .options
                .iter()
                .position(|o| o.id == id)
                .ok_or_else(|| SessionError::OptionNotFound(id.to_string()))?;
            let removed = doc.options.remove(pos);
            (removed, doc.options.clone())
        };
        drop(wheel);

        tracing::info!(id = %removed.id, label = %removed.label, "Option deleted");
        self.publish_options(options);
        self.persist(
            StoreAction::DeleteOption {
                id: removed.id.clone(),
            },
            now_timestamp(),
        )
        .await;
        Ok(removed)
    }
}
