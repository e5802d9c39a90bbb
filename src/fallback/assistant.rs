//! Offline assistant replies.
//!
//! When the chat endpoint is unreachable the assistant still answers: it
//! classifies the message with a fixed set of keyword patterns, extracts a few
//! entities, and returns a canned reply for the detected intent.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::api::types::ChatReply;

const BASE_CONFIDENCE: f64 = 0.3;
const MAX_CONFIDENCE: f64 = 0.9;

const INVENTORY_SUGGESTIONS: &[&str] = &[
    "Check stock levels",
    "Find product location",
    "Search by SKU",
    "Get help",
];
const LOW_STOCK_SUGGESTIONS: &[&str] = &[
    "View critical items",
    "Check reorder levels",
    "Set up alerts",
    "Monitor trends",
];
const ANALYTICS_SUGGESTIONS: &[&str] = &[
    "Performance metrics",
    "Inventory analysis",
    "Cost reports",
    "Trend analysis",
];
const HELP_SUGGESTIONS: &[&str] = &["Check inventory", "View alerts", "Get reports", "Learn more"];
const GENERAL_SUGGESTIONS: &[&str] = &[
    "Learn about features",
    "Check system status",
    "Get help",
    "Try examples",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Inventory,
    LowStock,
    Search,
    Help,
    Status,
    Analytics,
    Orders,
    General,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Inventory => "inventory",
            Intent::LowStock => "low_stock",
            Intent::Search => "search",
            Intent::Help => "help",
            Intent::Status => "status",
            Intent::Analytics => "analytics",
            Intent::Orders => "orders",
            Intent::General => "general",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Declaration order matters: on equal confidence the earlier intent wins.
static INTENT_PATTERNS: Lazy<Vec<(Intent, Regex)>> = Lazy::new(|| {
    [
        (
            Intent::Inventory,
            r"(?i)(?:inventory|stock|level|quantity|available|check|item|product|sku)",
        ),
        (Intent::LowStock, r"(?i)(?:low|running low|empty|out|reorder|shortage|need)"),
        (Intent::Search, r"(?i)(?:find|search|where|location|lookup)"),
        (Intent::Help, r"(?i)(?:help|what|how|can you|support|guide)"),
        (Intent::Status, r"(?i)(?:status|health|how are|everything ok|system)"),
        (Intent::Analytics, r"(?i)(?:report|analytics|dashboard|metrics|performance|summary)"),
        (Intent::Orders, r"(?i)(?:order|ship|dispatch|delivery|customer)"),
    ]
    .into_iter()
    .map(|(intent, pattern)| (intent, Regex::new(pattern).expect("static intent pattern")))
    .collect()
});

static SKU_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:sku[:\s]*)?([A-Z]{2,}[0-9]{2,})").expect("static sku pattern")
});

static PRODUCT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(?:bluetooth\s+)?(?:wireless\s+)?(?:mouse|mice)",
        r"(?i)(?:bluetooth\s+)?(?:wireless\s+)?(?:keyboard|keyboards)",
        r"(?i)(?:laptop|laptops|notebook|notebooks)",
        r"(?i)(?:monitor|monitors|screen|screens|display|displays)",
        r"(?i)(?:headphone|headphones|headset|headsets)",
        r"(?i)(?:tablet|tablets|ipad|ipads)",
        r"(?i)(?:cable|cables|cord|cords)",
        r"(?i)(?:charger|chargers|adapter|adapters)",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("static product pattern"))
    .collect()
});

static QUANTITY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|\s)(\d+)(?:\s+(?:units?|pieces?|pcs?|items?))?")
        .expect("static quantity pattern")
});

/// Entities pulled out of a free-text message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
}

/// Best intent for `message` and its confidence score.
pub fn detect_intent(message: &str) -> (Intent, f64) {
    let mut best = Intent::General;
    let mut confidence = BASE_CONFIDENCE;

    for (intent, pattern) in INTENT_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(message) {
            let candidate = MAX_CONFIDENCE.min(0.5 + captures.len() as f64 * 0.2);
            if candidate > confidence {
                confidence = candidate;
                best = *intent;
            }
        }
    }

    (best, confidence)
}

pub fn extract_entities(message: &str) -> Entities {
    let sku = SKU_PATTERN
        .captures(message)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());

    let product = PRODUCT_PATTERNS
        .iter()
        .find_map(|pattern| pattern.find(message))
        .map(|m| m.as_str().to_string());

    let quantity = QUANTITY_PATTERN
        .captures(message)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok());

    Entities {
        sku,
        product,
        quantity,
    }
}

/// Reply used when the chat endpoint cannot be reached.
pub fn offline_reply(message: &str) -> ChatReply {
    let (intent, confidence) = detect_intent(message);
    let (text, suggestions) = reply_for(intent, message);

    ChatReply {
        message: text,
        intent: intent.as_str().to_string(),
        confidence: Some(confidence),
        success: true,
        offline_mode: true,
        suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        entities: serde_json::to_value(extract_entities(message)).unwrap_or_default(),
    }
}

fn reply_for(intent: Intent, message: &str) -> (String, &'static [&'static str]) {
    match intent {
        Intent::Inventory => (
            format!(
                "📦 **Inventory Information**\n\n\
                 I understand you're asking about \"{message}\". While I'm currently offline, \
                 here's what I typically help with for inventory:\n\n\
                 **Available Services:**\n\
                 • Stock level checks for any product\n\
                 • Product location and details\n\
                 • Availability status\n\
                 • SKU lookup and search\n\n\
                 **Sample Commands:**\n\
                 • \"Check wireless mouse inventory\"\n\
                 • \"How many laptops do we have?\"\n\
                 • \"Where are the keyboards located?\"\n\
                 • \"Show me product details for SKU123\"\n\n\
                 **Real-time Status:** I'll provide live inventory data once reconnected to our \
                 warehouse management system."
            ),
            INVENTORY_SUGGESTIONS,
        ),
        Intent::LowStock => (
            "⚠️ **Low Stock Monitoring**\n\n\
             You're asking about low stock items. Here's what I typically monitor:\n\n\
             **Alert Categories:**\n\
             • **Critical:** Items below safety stock\n\
             • **Warning:** Items approaching reorder level\n\
             • **Planning:** Seasonal demand trends\n\n\
             **Typical Low Stock Response:**\n\
             • Product name and current quantity\n\
             • Reorder recommendations\n\
             • Lead time estimates\n\
             • Alternative product suggestions\n\n\
             I'll provide real-time low stock alerts once reconnected!"
                .to_string(),
            LOW_STOCK_SUGGESTIONS,
        ),
        Intent::Analytics => (
            "📊 **Analytics & Reporting**\n\n\
             I can generate comprehensive warehouse analytics:\n\n\
             **Available Reports:**\n\
             • **Performance Metrics** - Daily/weekly/monthly summaries\n\
             • **Inventory Analysis** - Turnover, aging, optimization\n\
             • **Operational Efficiency** - Throughput, accuracy, costs\n\
             • **Trend Analysis** - Seasonal patterns, forecasting\n\n\
             Full analytics available once system reconnects!"
                .to_string(),
            ANALYTICS_SUGGESTIONS,
        ),
        Intent::Help => (
            "🤖 **Warehouse Assistant Help**\n\n\
             I'm your warehouse management assistant. Here's what I can do:\n\n\
             **Core Capabilities:**\n\
             • **Inventory Management** - Stock checks, alerts, updates\n\
             • **Order Processing** - Track shipments, manage deliveries\n\
             • **Analytics** - Reports, trends, performance metrics\n\n\
             **Popular Commands:**\n\
             • \"Show low stock items\"\n\
             • \"Check bluetooth headphones inventory\"\n\
             • \"What needs attention today?\"\n\
             • \"Generate performance report\"\n\n\
             Ask me anything about your warehouse operations!"
                .to_string(),
            HELP_SUGGESTIONS,
        ),
        Intent::Search | Intent::Status | Intent::Orders | Intent::General => (
            format!(
                "🏭 **Smart Warehouse Assistant**\n\n\
                 I understand you're asking about \"{message}\". While I'm temporarily offline, \
                 I'm designed to help with:\n\n\
                 **Warehouse Operations:**\n\
                 • Inventory tracking and management\n\
                 • Order processing and fulfillment\n\
                 • Analytics and performance monitoring\n\
                 • System alerts and notifications\n\n\
                 **Natural Language Interface:**\n\
                 • \"What items are running low?\"\n\
                 • \"How many laptops are in stock?\"\n\
                 • \"Show me today's performance metrics\"\n\n\
                 I'll provide live data and full functionality once reconnected to the warehouse system!"
            ),
            GENERAL_SUGGESTIONS,
        ),
    }
}

/// Reply used when even the offline path cannot produce an answer.
pub fn connection_error_reply() -> ChatReply {
    ChatReply {
        message: "I apologize, but I'm experiencing connectivity issues right now. \
                  Refresh and try again, or check your connection. \
                  I'll be back online shortly."
            .to_string(),
        intent: "connection_error".to_string(),
        confidence: None,
        success: false,
        offline_mode: true,
        suggestions: vec![
            "Refresh page".to_string(),
            "Check connection".to_string(),
            "Try again later".to_string(),
        ],
        entities: serde_json::Value::Null,
    }
}
