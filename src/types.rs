use serde::{Deserialize, Serialize};

/// Opaque ID type for wheel options
pub type OptionId = String;

/// Maximum number of history entries kept in the document
pub const HISTORY_LIMIT: usize = 50;

/// Number of most recent winners excluded from the next draw (when possible)
pub const RECENT_EXCLUSION_WINDOW: usize = 3;

/// Segment fill colors, cycled as options are added
pub const COLOR_RED: &str = "#D70018";
pub const COLOR_WHITE: &str = "#FFFFFF";
pub const COLOR_GOLD: &str = "#FFD700";

/// A user-defined wheel segment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WheelOption {
    pub id: OptionId,
    pub label: String,
    pub color: String,
    pub text_color: String,
}

/// A past winner, stamped with the time the spin settled (RFC 3339)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub option: WheelOption,
    pub timestamp: String,
}

impl HistoryEntry {
    pub fn new(option: WheelOption, timestamp: String) -> Self {
        Self { option, timestamp }
    }

    pub fn id(&self) -> &str {
        &self.option.id
    }
}

/// The persisted document: options in wheel order, history most-recent-first
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WheelDocument {
    #[serde(default)]
    pub options: Vec<WheelOption>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl WheelDocument {
    /// Prepend a winner and drop everything past [`HISTORY_LIMIT`]
    pub fn push_history(&mut self, entry: HistoryEntry) {
        self.history.insert(0, entry);
        self.history.truncate(HISTORY_LIMIT);
    }
}

/// Current timestamp in the format stored on history entries
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Pick fill and text colors for a new option based on the last option's fill.
///
/// Red is followed by white, white by gold, and anything else (including an
/// empty wheel) starts over at red.
pub fn next_colors(last_fill: Option<&str>) -> (&'static str, &'static str) {
    match last_fill {
        Some(COLOR_RED) => (COLOR_WHITE, COLOR_RED),
        Some(COLOR_WHITE) => (COLOR_GOLD, COLOR_RED),
        _ => (COLOR_RED, COLOR_GOLD),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(id: &str) -> WheelOption {
        WheelOption {
            id: id.to_string(),
            label: format!("Option {}", id),
            color: COLOR_RED.to_string(),
            text_color: COLOR_GOLD.to_string(),
        }
    }

    #[test]
    fn test_option_uses_camel_case_fields() {
        let json = serde_json::to_value(option("a")).unwrap();
        assert_eq!(json["textColor"], COLOR_GOLD);
        assert!(json.get("text_color").is_none());
    }

    #[test]
    fn test_history_entry_is_flattened() {
        let entry = HistoryEntry::new(option("a"), "2024-01-01T00:00:00.000Z".to_string());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], "a");
        assert_eq!(json["timestamp"], "2024-01-01T00:00:00.000Z");

        let parsed: HistoryEntry = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_document_fields_default_when_missing() {
        let doc: WheelDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.options.is_empty());
        assert!(doc.history.is_empty());
    }

    #[test]
    fn test_history_is_capped_most_recent_first() {
        let mut doc = WheelDocument::default();
        for i in 0..(HISTORY_LIMIT + 7) {
            doc.push_history(HistoryEntry::new(option(&i.to_string()), i.to_string()));
            assert!(doc.history.len() <= HISTORY_LIMIT);
        }

        assert_eq!(doc.history.len(), HISTORY_LIMIT);
        // Newest first, oldest seven gone
        assert_eq!(doc.history[0].id(), (HISTORY_LIMIT + 6).to_string());
        assert_eq!(doc.history[HISTORY_LIMIT - 1].id(), "7");
    }

    #[test]
    fn test_color_cycle() {
        assert_eq!(next_colors(None), (COLOR_RED, COLOR_GOLD));
        assert_eq!(next_colors(Some(COLOR_RED)), (COLOR_WHITE, COLOR_RED));
        assert_eq!(next_colors(Some(COLOR_WHITE)), (COLOR_GOLD, COLOR_RED));
        assert_eq!(next_colors(Some(COLOR_GOLD)), (COLOR_RED, COLOR_GOLD));
        assert_eq!(next_colors(Some("#123456")), (COLOR_RED, COLOR_GOLD));
    }
}
