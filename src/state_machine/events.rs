use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Events that can trigger job order state transitions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum JobOrderEvent {
    /// Put the order on the calendar (a start date was set)
    Schedule,
    /// Begin work on the order
    Start,
    /// Mark the order as completed at the given time
    Complete(NaiveDateTime),
    /// Cancel the order
    Cancel,
}

impl JobOrderEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Schedule => "schedule",
            Self::Start => "start",
            Self::Complete(_) => "complete",
            Self::Cancel => "cancel",
        }
    }

    /// Extract the completion time if this is a completion event
    pub fn completion_time(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Complete(at) => Some(*at),
            _ => None,
        }
    }

    /// Check if this event represents a terminal transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete(_) | Self::Cancel)
    }
}

/// Events that can trigger maintenance request state transitions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum RequestEvent {
    /// Acknowledge the request
    Open,
    /// Link a job order to the request
    Assign(String),
    /// Close the request
    Close,
}

impl RequestEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Assign(_) => "assign",
            Self::Close => "close",
        }
    }

    /// Extract the job order name if this is an assignment event
    pub fn job_order(&self) -> Option<&str> {
        match self {
            Self::Assign(name) => Some(name),
            _ => None,
        }
    }

    /// Check if this event represents a terminal transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Close)
    }
}

impl JobOrderEvent {
    /// Create a completion event for the given timestamp
    pub fn complete_at(at: NaiveDateTime) -> Self {
        Self::Complete(at)
    }
}

impl RequestEvent {
    /// Create an assignment event for the given job order
    pub fn assign_to(job_order: impl Into<String>) -> Self {
        Self::Assign(job_order.into())
    }
}
