use crate::types::*;
use crate::wheel::{Segment, SpinPhase, SpinPlan};
use serde::{Deserialize, Serialize};

pub const PROTOCOL_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    AddOption {
        label: String,
    },
    DeleteOption {
        id: OptionId,
    },
    ClearHistory,
    /// Request a spin; the server picks the winner
    Spin,
    /// Close the result display after a spin settled
    DismissResult,
    /// Ask for a full snapshot (e.g. after reconnecting)
    Sync,
}

/// Everything a client needs to draw the wheel and its side panels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WheelView {
    pub options: Vec<WheelOption>,
    pub segments: Vec<Segment>,
    pub history: Vec<HistoryEntry>,
    pub phase: SpinPhase,
    pub rotation: f64,
    pub winner_index: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        protocol: String,
        wheel: WheelView,
        server_now: String,
    },
    Wheel {
        wheel: WheelView,
    },
    OptionsUpdated {
        options: Vec<WheelOption>,
        segments: Vec<Segment>,
    },
    HistoryUpdated {
        history: Vec<HistoryEntry>,
    },
    SpinStarted {
        plan: SpinPlan,
    },
    SpinSettled {
        spin_id: u64,
        winner_index: usize,
        entry: HistoryEntry,
    },
    ResultDismissed,
    Error {
        code: String,
        msg: String,
    },
}

impl ServerMessage {
    pub fn error(code: &str, msg: impl Into<String>) -> Self {
        ServerMessage::Error {
            code: code.to_string(),
            msg: msg.into(),
        }
    }
}
