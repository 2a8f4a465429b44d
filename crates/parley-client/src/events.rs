use serde::Serialize;
use tokio::sync::broadcast;

pub const EVENT_ROUTE_CHANGED: &str = "route-changed";

/// Capacity of the route-change broadcast channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteChangedPayload {
    pub route: String,
    pub href: String,
    pub previous_route: Option<String>,
}

pub fn emit_event<T: Clone>(tx: &broadcast::Sender<T>, event: &str, payload: T) {
    // No subscribers is the common case for a headless client.
    if tx.receiver_count() == 0 {
        return;
    }
    if tx.send(payload).is_err() {
        tracing::error!(event, "Failed to emit event");
    }
}
