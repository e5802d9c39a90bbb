//! Backend endpoints consumed by the console.

use std::fmt;

use crate::api::types::Section;
use crate::http::{ApiRequest, Method};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    DashboardOverview,
    InventoryAlerts,
    RecentActivity,
    InventorySummary,
    InboundShipments,
    OutboundOrders,
    ChatMessage,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::DashboardOverview => "/api/dashboard/overview",
            Endpoint::InventoryAlerts => "/api/dashboard/inventory-alerts",
            Endpoint::RecentActivity => "/api/dashboard/recent-activity",
            Endpoint::InventorySummary => "/api/inventory/summary",
            Endpoint::InboundShipments => "/api/inbound/shipments",
            Endpoint::OutboundOrders => "/api/outbound/orders",
            Endpoint::ChatMessage => "/api/chat/message",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::ChatMessage => Method::Post,
            _ => Method::Get,
        }
    }

    /// A fresh GET request for this endpoint.
    pub fn get(&self) -> ApiRequest {
        debug_assert_eq!(self.method(), Method::Get);
        ApiRequest::get(self.path())
    }
}

impl From<Section> for Endpoint {
    fn from(section: Section) -> Self {
        match section {
            Section::Inventory => Endpoint::InventorySummary,
            Section::Inbound => Endpoint::InboundShipments,
            Section::Outbound => Endpoint::OutboundOrders,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_endpoints() {
        assert_eq!(Endpoint::from(Section::Inventory).path(), "/api/inventory/summary");
        assert_eq!(Endpoint::from(Section::Outbound).path(), "/api/outbound/orders");
    }

    #[test]
    fn test_only_chat_posts() {
        assert_eq!(Endpoint::ChatMessage.to_string(), "POST /api/chat/message");
        assert_eq!(Endpoint::RecentActivity.method(), Method::Get);
    }
}
