//! Offline dashboard data.
//!
//! Mirrors the live payload shapes (`inventory`/`operations` in the overview,
//! an `alerts` list, an `activities` list) so presenters render it unchanged.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::api::types::DashboardSnapshot;

/// Placeholder shown for every figure while offline.
pub const OFFLINE_FIGURE: &str = "N/A (Offline)";

pub fn offline_overview(now: DateTime<Utc>) -> Value {
    json!({
        "inventory": {
            "total_products": OFFLINE_FIGURE,
            "total_inventory_value": OFFLINE_FIGURE,
            "low_stock_items": OFFLINE_FIGURE,
        },
        "operations": {
            "pending_inbound": OFFLINE_FIGURE,
            "pending_outbound": OFFLINE_FIGURE,
            "pending_orders": OFFLINE_FIGURE,
        },
        "system_status": "Offline Mode",
        "last_updated": now.to_rfc3339(),
    })
}

pub fn offline_alerts(now: DateTime<Utc>) -> Value {
    let timestamp = now.to_rfc3339();
    json!({
        "alerts": [
            {
                "id": "offline_1",
                "type": "warning",
                "severity": "medium",
                "message": "Dashboard is currently in offline mode. Live data unavailable.",
                "priority": "medium",
                "timestamp": timestamp,
            },
            {
                "id": "offline_2",
                "type": "info",
                "severity": "low",
                "message": "Refresh the page to attempt reconnection to the warehouse system.",
                "priority": "low",
                "timestamp": timestamp,
            }
        ]
    })
}

pub fn offline_activity(now: DateTime<Utc>) -> Value {
    json!({
        "activities": [
            {
                "id": "offline_activity",
                "description": "System running in offline mode",
                "timestamp": now.to_rfc3339(),
                "type": "system",
                "status": "offline",
            }
        ]
    })
}

/// The whole dashboard as it looks when the backend is unreachable.
pub fn offline_dashboard(now: DateTime<Utc>) -> DashboardSnapshot {
    DashboardSnapshot {
        overview: offline_overview(now),
        alerts: offline_alerts(now),
        activity: offline_activity(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_offline_dashboard_shape() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 8, 30, 0).unwrap();
        let snapshot = offline_dashboard(now);

        assert_eq!(snapshot.overview["inventory"]["total_products"], OFFLINE_FIGURE);
        assert_eq!(snapshot.overview["operations"]["pending_outbound"], OFFLINE_FIGURE);
        assert_eq!(snapshot.overview["system_status"], "Offline Mode");
        assert_eq!(snapshot.overview["last_updated"], "2026-03-01T08:30:00+00:00");

        let alerts = snapshot.alerts["alerts"].as_array().unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0]["id"], "offline_1");
        assert_eq!(alerts[1]["priority"], "low");

        let activities = snapshot.activity["activities"].as_array().unwrap();
        assert_eq!(activities[0]["status"], "offline");
    }
}
