//! Payload types exchanged with the backend.
//!
//! Backend-owned schemas stay `serde_json::Value`; only the shapes this crate
//! builds itself (chat request, chat reply, dashboard snapshot) are typed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/chat/message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageRequest {
    pub message: String,
    pub session_id: String,
    pub user_id: String,
}

/// Assistant reply, live or produced offline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatReply {
    pub message: String,
    pub intent: String,
    pub confidence: Option<f64>,
    pub success: bool,
    pub offline_mode: bool,
    pub suggestions: Vec<String>,
    pub entities: Value,
}

impl Default for ChatReply {
    fn default() -> Self {
        Self {
            message: String::new(),
            intent: "general".to_string(),
            confidence: None,
            success: true,
            offline_mode: false,
            suggestions: Vec::new(),
            entities: Value::Null,
        }
    }
}

/// Overview, alerts and activity loaded together for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub overview: Value,
    pub alerts: Value,
    pub activity: Value,
}

/// Dashboard sections that load on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Inventory,
    Inbound,
    Outbound,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Inventory, Section::Inbound, Section::Outbound];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Inventory => "Inventory Management",
            Section::Inbound => "Inbound Shipments",
            Section::Outbound => "Outbound Orders",
        }
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown section '{}' (expected inventory, inbound or outbound)", s)
            })
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Inventory => f.write_str("inventory"),
            Section::Inbound => f.write_str("inbound"),
            Section::Outbound => f.write_str("outbound"),
        }
    }
}
