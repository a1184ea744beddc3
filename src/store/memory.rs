use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreAction, StoreResult, WheelStore};
use crate::types::WheelDocument;

/// Store that never touches disk; contents are lost on restart
#[derive(Default)]
pub struct MemoryStore {
    doc: RwLock<WheelDocument>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(doc: WheelDocument) -> Self {
        Self {
            doc: RwLock::new(doc),
        }
    }
}

#[async_trait]
impl WheelStore for MemoryStore {
    async fn read(&self) -> WheelDocument {
        self.doc.read().await.clone()
    }

    async fn write(&self, action: StoreAction, timestamp: String) -> StoreResult<WheelDocument> {
        let mut doc = self.doc.write().await;
        action.apply(&mut doc, timestamp);
        Ok(doc.clone())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}
