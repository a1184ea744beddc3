use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::Mutex;

use super::{StoreAction, StoreResult, WheelStore};
use crate::types::WheelDocument;

/// Wheel document kept as pretty-printed JSON in a single file
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> StoreResult<WheelDocument> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(WheelDocument::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Load, falling back to an empty document on any failure
    async fn load_or_default(&self) -> WheelDocument {
        match self.load().await {
            Ok(doc) => doc,
            Err(e) => {
                tracing::error!(path = %self.path.display(), "Failed to read wheel data: {}", e);
                WheelDocument::default()
            }
        }
    }

    async fn save(&self, doc: &WheelDocument) -> StoreResult<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                tokio::fs::create_dir_all(dir).await?;
            }
        }
        let json = serde_json::to_string_pretty(doc)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl WheelStore for JsonFileStore {
    async fn read(&self) -> WheelDocument {
        let _guard = self.lock.lock().await;
        self.load_or_default().await
    }

    async fn write(&self, action: StoreAction, timestamp: String) -> StoreResult<WheelDocument> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load_or_default().await;

        let name = action.name();
        action.apply(&mut doc, timestamp);

        if let Err(e) = self.save(&doc).await {
            tracing::error!(path = %self.path.display(), action = name, "Failed to write wheel data: {}", e);
            return Err(e);
        }

        tracing::debug!(
            action = name,
            options = doc.options.len(),
            history = doc.history.len(),
            "Wheel data written"
        );
        Ok(doc)
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}
