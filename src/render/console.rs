//! Plain-text presenter for terminals and logs.

use std::io::{self, Write};

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use crate::api::types::{ChatReply, DashboardSnapshot, Section};
use crate::fallback::assistant::connection_error_reply;
use crate::render::events::{DashboardEvent, NoticeLevel};
use crate::render::Presenter;
use crate::resilience::FetchOutcome;

pub const CACHED_DATA_BANNER: &str = "Using cached data - refresh to retry live connection";
pub const LOADED_NOTICE: &str = "Dashboard data loaded successfully";

/// Writes every event as text to `out`.
pub struct ConsolePresenter<W: Write> {
    out: W,
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsolePresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> Presenter for ConsolePresenter<W> {
    fn present(&mut self, event: &DashboardEvent) -> io::Result<()> {
        let text = match event {
            DashboardEvent::DashboardLoaded(outcome) => render_dashboard_outcome(outcome),
            DashboardEvent::SectionLoaded { section, outcome } => {
                render_section_outcome(*section, outcome)
            }
            DashboardEvent::ChatReply(outcome) => render_chat_outcome(outcome),
            DashboardEvent::Notice { level, message } => render_notice(*level, message),
        };
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }
}

pub fn render_notice(level: NoticeLevel, message: &str) -> String {
    format!("[{}] {}", level, message)
}

pub fn render_dashboard_outcome(outcome: &FetchOutcome<DashboardSnapshot>) -> String {
    match outcome {
        FetchOutcome::Success { payload } => {
            format!(
                "{}\n{}",
                render_dashboard(payload),
                render_notice(NoticeLevel::Success, LOADED_NOTICE)
            )
        }
        FetchOutcome::FallbackUsed { payload, .. } => {
            format!(
                "{}\n{}",
                render_dashboard(payload),
                render_notice(NoticeLevel::Warning, CACHED_DATA_BANNER)
            )
        }
        FetchOutcome::Failure { reason } => {
            render_notice(NoticeLevel::Error, &format!("Dashboard unavailable: {}", reason))
        }
    }
}

pub fn render_dashboard(snapshot: &DashboardSnapshot) -> String {
    [
        render_metrics(&snapshot.overview),
        render_alerts(&snapshot.alerts),
        render_activity(&snapshot.activity),
    ]
    .join("\n")
}

pub fn render_section_outcome(section: Section, outcome: &FetchOutcome) -> String {
    match outcome.payload() {
        Some(data) => {
            let body = match section {
                Section::Inventory => format!(
                    "{}\n{}",
                    render_inventory_summary(data),
                    render_inventory(data)
                ),
                Section::Inbound => render_inbound(data),
                Section::Outbound => render_outbound(data),
            };
            format!("== {} ==\n{}", section.title(), body)
        }
        None => render_notice(NoticeLevel::Error, &format!("Error loading {} data", section)),
    }
}

pub fn render_chat_outcome(outcome: &FetchOutcome<ChatReply>) -> String {
    match outcome {
        FetchOutcome::Success { payload } => render_chat_reply(payload),
        FetchOutcome::FallbackUsed { payload, .. } => {
            format!("{}\n(offline mode)", render_chat_reply(payload))
        }
        FetchOutcome::Failure { reason } => format!(
            "{}\n{}",
            render_chat_reply(&connection_error_reply()),
            render_notice(NoticeLevel::Error, &format!("Assistant unavailable: {}", reason))
        ),
    }
}

fn render_chat_reply(reply: &ChatReply) -> String {
    let mut text = reply.message.clone();
    if !reply.suggestions.is_empty() {
        text.push_str("\nSuggestions: ");
        text.push_str(&reply.suggestions.join(" | "));
    }
    text
}

/// Headline figures. Missing values show as 0.
pub fn render_metrics(overview: &Value) -> String {
    format!(
        "Total products: {}\nLow stock items: {}\nPending inbound: {}\nPending outbound: {}",
        figure(&overview["inventory"]["total_products"]),
        figure(&overview["inventory"]["low_stock_items"]),
        figure(&overview["operations"]["pending_inbound"]),
        figure(&overview["operations"]["pending_outbound"]),
    )
}

pub fn render_alerts(data: &Value) -> String {
    let alerts = match data["alerts"].as_array() {
        Some(alerts) if !alerts.is_empty() => alerts,
        _ => return "No active alerts".to_string(),
    };

    alerts
        .iter()
        .map(|alert| {
            let details = format_alert_details(&alert["details"]);
            let severity = text(&alert["severity"]).unwrap_or_else(|| "info".to_string());
            let message = text(&alert["message"]).unwrap_or_default();
            if details.is_empty() {
                format!("! [{}] {}", severity, message)
            } else {
                format!("! [{}] {} ({})", severity, message, details)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_activity(data: &Value) -> String {
    let activities = match data["activities"].as_array() {
        Some(activities) if !activities.is_empty() => activities,
        _ => return "No recent activity".to_string(),
    };

    activities
        .iter()
        .map(|activity| {
            let details = format_activity_details(&activity["details"]);
            let description = text(&activity["description"]).unwrap_or_default();
            let when = format_time(&activity["timestamp"]);
            if details.is_empty() {
                format!("* {} [{}]", description, when)
            } else {
                format!("* {} {} [{}]", description, details, when)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_inventory_summary(data: &Value) -> String {
    format!(
        "Total products: {} | Low stock items: {}",
        figure(&data["total_products"]),
        figure(&data["low_stock_count"])
    )
}

pub fn render_inventory(data: &Value) -> String {
    let rows = data["inventory"].as_array().map(Vec::as_slice).unwrap_or_default();
    let header = "SKU | Name | Category | Available | Reserved | Total | Location | Status";
    let mut lines = vec![header.to_string()];
    lines.extend(rows.iter().map(|item| {
        format!(
            "{} | {} | {} | {} | {} | {} | {} | {}",
            text(&item["sku"]).unwrap_or_default(),
            text(&item["name"]).unwrap_or_default(),
            text(&item["category"]).unwrap_or_else(|| "-".to_string()),
            figure(&item["available_quantity"]),
            figure(&item["reserved_quantity"]),
            figure(&item["quantity"]),
            text(&item["location"]).unwrap_or_else(|| "-".to_string()),
            stock_status(item),
        )
    }));
    lines.join("\n")
}

pub fn render_inbound(data: &Value) -> String {
    let rows = data.as_array().map(Vec::as_slice).unwrap_or_default();
    let mut lines = vec!["Shipment | Vendor | Expected | Arrived | Status | Items".to_string()];
    lines.extend(rows.iter().map(|shipment| {
        format!(
            "{} | {} | {} | {} | {} | {}",
            text(&shipment["shipment_number"]).unwrap_or_default(),
            text(&shipment["vendor"]["name"]).unwrap_or_else(|| "-".to_string()),
            format_date(&shipment["expected_date"]),
            format_date(&shipment["actual_arrival_date"]),
            status_label(&shipment["status"]),
            item_count(&shipment["items"]),
        )
    }));
    lines.join("\n")
}

pub fn render_outbound(data: &Value) -> String {
    let rows = data.as_array().map(Vec::as_slice).unwrap_or_default();
    let mut lines = vec!["Order | Customer | Ordered | Dispatch | Status | Items".to_string()];
    lines.extend(rows.iter().map(|order| {
        format!(
            "{} | {} | {} | {} | {} | {}",
            text(&order["order_number"]).unwrap_or_default(),
            text(&order["customer"]["name"]).unwrap_or_else(|| "-".to_string()),
            format_date(&order["order_date"]),
            format_date(&order["expected_dispatch_date"]),
            status_label(&order["status"]),
            item_count(&order["items"]),
        )
    }));
    lines.join("\n")
}

pub fn stock_status(item: &Value) -> &'static str {
    if item["available_quantity"].as_f64() == Some(0.0) {
        "Out of Stock"
    } else if item["needs_reorder"].as_bool().unwrap_or(false) {
        "Low Stock"
    } else {
        "In Stock"
    }
}

/// Status text with its severity class, e.g. `pending (warning)`.
pub fn status_label(status: &Value) -> String {
    let status = text(status).unwrap_or_default();
    let class = match status.as_str() {
        "pending" => "warning",
        "completed" | "dispatched" | "delivered" => "success",
        _ => "info",
    };
    format!("{} ({})", status, class)
}

pub fn format_alert_details(details: &Value) -> String {
    match (details.get("available"), details.get("reorder_level")) {
        (Some(available), Some(reorder_level)) => format!(
            "Available: {}, Reorder Level: {}",
            figure(available),
            figure(reorder_level)
        ),
        _ => String::new(),
    }
}

pub fn format_activity_details(details: &Value) -> String {
    if !details.is_object() {
        return String::new();
    }
    format!(
        "{} ({})",
        text(&details["product"]).unwrap_or_default(),
        text(&details["sku"]).unwrap_or_default()
    )
}

fn format_date(value: &Value) -> String {
    let Some(raw) = value.as_str() else {
        return "-".to_string();
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%Y-%m-%d").to_string();
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw.get(..10).unwrap_or(raw), "%Y-%m-%d") {
        return parsed.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

fn format_time(value: &Value) -> String {
    let Some(raw) = value.as_str() else {
        return "-".to_string();
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn item_count(items: &Value) -> usize {
    items.as_array().map(Vec::len).unwrap_or(0)
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn figure(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => "0".to_string(),
        Value::String(s) if s.is_empty() => "0".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
