// Event system foundation
//
// Lifecycle events and user-visible notices flow through a broadcast
// publisher; the host application subscribes and renders notices.

pub mod publisher;

pub use publisher::{EventPublisher, PublishError, PublishedEvent};
