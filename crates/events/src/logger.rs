//! Background consumer that writes every event to the log.
//!
//! Reminder requests have no delivery channel; logging them here is their
//! acknowledgement.

use tokio::sync::broadcast;

use crate::bus::{MarketplaceEvent, REMINDER_REQUESTED};

pub struct EventLogger;

impl EventLogger {
    /// Consume events until the bus is dropped. Returns how many events
    /// were handled.
    pub async fn run(mut receiver: broadcast::Receiver<MarketplaceEvent>) -> u64 {
        let mut handled = 0;
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    Self::record(&event);
                    handled += 1;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event logger lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!(handled, "Event bus closed, logger shutting down");
                    return handled;
                }
            }
        }
    }

    fn record(event: &MarketplaceEvent) {
        if event.event_type == REMINDER_REQUESTED {
            tracing::info!(
                contact = event.payload["contact"].as_str().unwrap_or_default(),
                event_title = event.payload["event_title"].as_str().unwrap_or_default(),
                event_date = event.payload["event_date"].as_str().unwrap_or_default(),
                "Reminder request received"
            );
        } else {
            tracing::debug!(
                event_type = %event.event_type,
                source = ?event.source_entity_id,
                actor = ?event.actor_user_id,
                "Marketplace event"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{EventBus, BOOKING_CONFIRMED};

    #[tokio::test]
    async fn logger_drains_until_bus_closes() {
        let bus = EventBus::default();
        let handle = tokio::spawn(EventLogger::run(bus.subscribe()));

        bus.publish(MarketplaceEvent::new(BOOKING_CONFIRMED));
        bus.publish(
            MarketplaceEvent::new(REMINDER_REQUESTED)
                .with_payload(serde_json::json!({"contact": "a@x.com"})),
        );
        drop(bus);

        assert_eq!(handle.await.unwrap(), 2);
    }
}
