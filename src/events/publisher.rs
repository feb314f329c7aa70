use serde_json::{json, Value};
use tokio::sync::broadcast;

use crate::constants::events::NOTICE_WARNING;

/// High-throughput event publisher for lifecycle events
#[derive(Debug, Clone)]
pub struct EventPublisher {
    sender: broadcast::Sender<PublishedEvent>,
}

/// Event that has been published
#[derive(Debug, Clone)]
pub struct PublishedEvent {
    pub name: String,
    pub context: Value,
    pub published_at: chrono::DateTime<chrono::Utc>,
}

impl EventPublisher {
    /// Create a new event publisher with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event with the given name and context
    pub async fn publish(
        &self,
        event_name: impl Into<String>,
        context: Value,
    ) -> Result<(), PublishError> {
        let event = PublishedEvent {
            name: event_name.into(),
            context,
            published_at: chrono::Utc::now(),
        };

        // For broadcast channels, send() returns an error if there are no subscribers.
        // Publishing without listeners is acceptable here.
        match self.sender.send(event) {
            Ok(_) => Ok(()),
            Err(broadcast::error::SendError(_)) => Ok(()),
        }
    }

    /// Publish a user-visible warning notice
    ///
    /// The host UI surfaces these the way it surfaces its own alerts.
    pub async fn publish_warning(
        &self,
        message: impl Into<String>,
    ) -> Result<(), PublishError> {
        let message = message.into();
        tracing::warn!(message = %message, "User-visible warning");
        self.publish(NOTICE_WARNING, json!({ "message": message }))
            .await
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Error types for event publishing
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Event channel is closed")]
    ChannelClosed,
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new(1000) // Default capacity of 1000 events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_publish_and_receive() {
        let publisher = EventPublisher::new(16);
        let mut receiver = publisher.subscribe();

        publisher
            .publish("job_order.completed", json!({"job_order": "JO-0001"}))
            .await
            .unwrap();

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.name, "job_order.completed");
        assert_eq!(event.context["job_order"], "JO-0001");
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_ok() {
        let publisher = EventPublisher::new(16);
        assert_eq!(publisher.subscriber_count(), 0);
        assert_ok!(publisher.publish("request.opened", json!({})).await);
    }

    #[tokio::test]
    async fn test_warning_notice_carries_message() {
        let publisher = EventPublisher::new(16);
        let mut receiver = publisher.subscribe();

        publisher
            .publish_warning("Maintenance Request MR-0001 has no request_date")
            .await
            .unwrap();

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.name, NOTICE_WARNING);
        assert!(event.context["message"]
            .as_str()
            .unwrap()
            .contains("request_date"));
    }
}
