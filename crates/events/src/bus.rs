//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! Events tell dependent views that something changed; they carry no
//! authority. Publishing never blocks and never fails.

use chrono::{DateTime, Utc};
use mentorhub_core::types::EntityId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

pub const BOOKING_CONFIRMED: &str = "booking.confirmed";
pub const AVAILABILITY_UPDATED: &str = "availability.updated";
pub const PROFILE_UPDATED: &str = "profile.updated";
pub const CATALOG_CHANGED: &str = "catalog.changed";
pub const REMINDER_REQUESTED: &str = "reminder.requested";

// ---------------------------------------------------------------------------
// MarketplaceEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceEvent {
    /// Dot-separated event name, e.g. `"booking.confirmed"`.
    pub event_type: String,
    pub source_entity_type: Option<String>,
    pub source_entity_id: Option<EntityId>,
    pub actor_user_id: Option<EntityId>,
    pub payload: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl MarketplaceEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
            source_entity_id: None,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: impl Into<EntityId>) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id.into());
        self
    }

    pub fn with_actor(mut self, user_id: impl Into<EntityId>) -> Self {
        self.actor_user_id = Some(user_id.into());
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

const DEFAULT_CAPACITY: usize = 256;

/// Fan-out bus shared as `Arc<EventBus>`.
pub struct EventBus {
    sender: broadcast::Sender<MarketplaceEvent>,
}

impl EventBus {
    /// Slow receivers past `capacity` observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped if there are none.
    pub fn publish(&self, event: MarketplaceEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MarketplaceEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
