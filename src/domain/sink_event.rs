//! Event model forwarded to the external analytics sink.

use serde_json::{Map, Value, json};

/// An in-memory representation of an event bound for the analytics sink.
///
/// Created by the ingestion path after the primary write succeeds, then sent
/// through a bounded channel to [`crate::domain::sink_worker::run_sink_worker`].
/// Losing one of these never affects what the store holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    PageView { page_location: String },
    ButtonClick { button_id: String, username: String },
    RouteListView { route_count: usize },
}

impl SinkEvent {
    /// Event name as understood by the sink.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PageView { .. } => "page_view",
            Self::ButtonClick { .. } => "button_click",
            Self::RouteListView { .. } => "route_list_view",
        }
    }

    /// Event-specific parameters.
    pub fn params(&self) -> Map<String, Value> {
        let value = match self {
            Self::PageView { page_location } => json!({ "page_location": page_location }),
            Self::ButtonClick {
                button_id,
                username,
            } => json!({ "button_id": button_id, "username": username }),
            Self::RouteListView { route_count } => json!({ "route_count": route_count }),
        };

        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_click_params() {
        let event = SinkEvent::ButtonClick {
            button_id: "export-data-btn".to_string(),
            username: "guest".to_string(),
        };

        assert_eq!(event.name(), "button_click");
        let params = event.params();
        assert_eq!(params["button_id"], "export-data-btn");
        assert_eq!(params["username"], "guest");
    }

    #[test]
    fn test_route_list_params() {
        let event = SinkEvent::RouteListView { route_count: 5 };
        assert_eq!(event.name(), "route_list_view");
        assert_eq!(event.params()["route_count"], 5);
    }
}
