//! Wheel document persistence.
//!
//! The store is a single `{options, history}` document that is read whole and
//! rewritten whole on every mutation. There is no schema validation beyond
//! the payload shapes and no transactional guarantee; last write wins.

mod file;
mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::types::{HistoryEntry, OptionId, WheelDocument, WheelOption};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A mutation of the wheel document, as sent by clients:
/// `{"action": "ADD_OPTION", "payload": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreAction {
    AddOption(WheelOption),
    DeleteOption { id: OptionId },
    /// The store stamps the timestamp; anything the client sent is replaced
    AddHistory(WheelOption),
    ResetHistory {},
}

impl StoreAction {
    pub fn name(&self) -> &'static str {
        match self {
            StoreAction::AddOption(_) => "ADD_OPTION",
            StoreAction::DeleteOption { .. } => "DELETE_OPTION",
            StoreAction::AddHistory(_) => "ADD_HISTORY",
            StoreAction::ResetHistory {} => "RESET_HISTORY",
        }
    }

    /// Whether this action changes the option list (and with it the layout)
    pub fn touches_options(&self) -> bool {
        matches!(self, StoreAction::AddOption(_) | StoreAction::DeleteOption { .. })
    }

    /// Apply this action to `doc`. `timestamp` is only used by `ADD_HISTORY`.
    pub fn apply(self, doc: &mut WheelDocument, timestamp: String) {
        match self {
            StoreAction::AddOption(option) => doc.options.push(option),
            StoreAction::DeleteOption { id } => doc.options.retain(|o| o.id != id),
            StoreAction::AddHistory(option) => {
                doc.push_history(HistoryEntry::new(option, timestamp));
            }
            StoreAction::ResetHistory {} => doc.history.clear(),
        }
    }
}

/// Narrow read/write interface over the wheel document
#[async_trait]
pub trait WheelStore: Send + Sync {
    /// Current document. Unreadable or missing data reads as empty.
    async fn read(&self) -> WheelDocument;

    /// Apply `action` to the stored document and return the result.
    /// `timestamp` stamps `ADD_HISTORY` entries so callers can keep their own
    /// copy of the entry identical to the stored one.
    async fn write(&self, action: StoreAction, timestamp: String) -> StoreResult<WheelDocument>;

    /// Short description for logs
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HISTORY_LIMIT;

    fn option(id: &str) -> WheelOption {
        WheelOption {
            id: id.to_string(),
            label: format!("Label {}", id),
            color: crate::types::COLOR_GOLD.to_string(),
            text_color: crate::types::COLOR_RED.to_string(),
        }
    }

    #[test]
    fn test_parse_client_actions() {
        let add: StoreAction = serde_json::from_str(
            r##"{"action":"ADD_OPTION","payload":{"id":"1","label":"Pho","color":"#D70018","textColor":"#FFD700"}}"##,
        )
        .unwrap();
        assert_eq!(add.name(), "ADD_OPTION");

        let delete: StoreAction =
            serde_json::from_str(r#"{"action":"DELETE_OPTION","payload":{"id":"1"}}"#).unwrap();
        assert_eq!(
            delete,
            StoreAction::DeleteOption {
                id: "1".to_string()
            }
        );

        let reset: StoreAction =
            serde_json::from_str(r#"{"action":"RESET_HISTORY","payload":{}}"#).unwrap();
        assert_eq!(reset, StoreAction::ResetHistory {});
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let result = serde_json::from_str::<StoreAction>(r#"{"action":"DROP_TABLE","payload":{}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_only_option_actions_touch_options() {
        assert!(StoreAction::AddOption(option("a")).touches_options());
        assert!(StoreAction::DeleteOption {
            id: "a".to_string()
        }
        .touches_options());
        assert!(!StoreAction::AddHistory(option("a")).touches_options());
        assert!(!StoreAction::ResetHistory {}.touches_options());
    }

    #[test]
    fn test_delete_filters_by_id() {
        let mut doc = WheelDocument {
            options: vec![option("a"), option("b"), option("c")],
            history: Vec::new(),
        };
        StoreAction::DeleteOption {
            id: "b".to_string(),
        }
        .apply(&mut doc, String::new());

        let ids: Vec<_> = doc.options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_add_history_stamps_and_truncates() {
        let mut doc = WheelDocument::default();
        for i in 0..HISTORY_LIMIT {
            StoreAction::AddHistory(option(&i.to_string())).apply(&mut doc, format!("t{}", i));
        }
        assert_eq!(doc.history.len(), HISTORY_LIMIT);

        StoreAction::AddHistory(option("newest")).apply(&mut doc, "now".to_string());
        assert_eq!(doc.history.len(), HISTORY_LIMIT);
        assert_eq!(doc.history[0].id(), "newest");
        assert_eq!(doc.history[0].timestamp, "now");
        // "0" was the oldest entry
        assert!(doc.history.iter().all(|h| h.id() != "0"));
    }

    #[test]
    fn test_reset_history_keeps_options() {
        let mut doc = WheelDocument {
            options: vec![option("a")],
            history: vec![HistoryEntry::new(option("a"), "t".to_string())],
        };
        StoreAction::ResetHistory {}.apply(&mut doc, String::new());
        assert!(doc.history.is_empty());
        assert_eq!(doc.options.len(), 1);
    }
}
