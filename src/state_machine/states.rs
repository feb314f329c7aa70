use serde::{Deserialize, Serialize};
use std::fmt;

/// Job order state definitions matching the host application's status field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobOrderState {
    /// Initial state when the order is created
    Draft,
    /// A start date has been set and the order is on the calendar
    Scheduled,
    /// Work is underway
    InProgress,
    /// Work finished; response-time KPI may be stamped
    Completed,
    /// Order was cancelled
    Cancelled,
}

impl JobOrderState {
    /// Check if this is a terminal state (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Check if this is an active state (work is being performed)
    pub fn is_active(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// Check if the order still accepts work
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Draft | Self::Scheduled | Self::InProgress)
    }
}

impl fmt::Display for JobOrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Scheduled => write!(f, "scheduled"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for JobOrderState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "scheduled" => Ok(Self::Scheduled),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("Invalid job order state: {s}")),
        }
    }
}

/// Maintenance request state definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    /// Initial state when the request is logged
    Draft,
    /// Request acknowledged and awaiting assignment
    Open,
    /// A job order has been created for this request
    Assigned,
    /// Request resolved and closed
    Closed,
}

impl RequestState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Check if the request is still awaiting a job order
    pub fn is_unassigned(&self) -> bool {
        matches!(self, Self::Draft | Self::Open)
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Open => write!(f, "open"),
            Self::Assigned => write!(f, "assigned"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for RequestState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "open" => Ok(Self::Open),
            "assigned" => Ok(Self::Assigned),
            "closed" => Ok(Self::Closed),
            _ => Err(format!("Invalid request state: {s}")),
        }
    }
}

/// Default state for new job orders
impl Default for JobOrderState {
    fn default() -> Self {
        Self::Draft
    }
}

/// Default state for new maintenance requests
impl Default for RequestState {
    fn default() -> Self {
        Self::Draft
    }
}
