//! # System Constants and Configuration
//!
//! Core constants, enums, and defaults that define the operational
//! boundaries of the maintenance workflow system.
//!
//! This module keeps the wire-level vocabulary (event names, default
//! records, shared enums) in one place so embedders and the host
//! application agree on it.

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export state types for convenience
pub use crate::state_machine::{JobOrderState as JobOrderStatus, RequestState as RequestStatus};

/// Core system events that trigger state transitions and notifications
pub mod events {
    // Maintenance request lifecycle events
    pub const REQUEST_OPENED: &str = "request.opened";
    pub const REQUEST_ASSIGNED: &str = "request.assigned";
    pub const REQUEST_CLOSED: &str = "request.closed";

    // Job order lifecycle events
    pub const JOB_ORDER_SCHEDULED: &str = "job_order.scheduled";
    pub const JOB_ORDER_STARTED: &str = "job_order.started";
    pub const JOB_ORDER_COMPLETED: &str = "job_order.completed";
    pub const JOB_ORDER_CANCELLED: &str = "job_order.cancelled";

    // User-visible notices (the host UI surfaces these as alerts)
    pub const NOTICE_WARNING: &str = "notice.warning";
}

/// Well-known default records and values
pub mod system {
    /// Default maintenance team, created on demand when absent
    pub const DEFAULT_MAINTENANCE_TEAM: &str = "Factory Maintenance Team";
    /// Default service item appended when a request carries no materials
    pub const DEFAULT_MAINTENANCE_ITEM: &str = "MAINTENANCE_SERVICE";
    /// Role assigned to auto-enrolled roster members
    pub const DEFAULT_MAINTENANCE_ROLE: &str = "Technician";
    /// Maximum roster members enrolled when creating the default team
    pub const DEFAULT_ROSTER_LIMIT: usize = 3;
    /// Unit of measure for the default service item
    pub const DEFAULT_UOM: &str = "Hour";
    /// Fallback warehouse for requisition rows without one
    pub const DEFAULT_WAREHOUSE: &str = "Stores - Maintenance";
}

/// Doctype names as the host document framework knows them
pub mod doctypes {
    pub const MAINTENANCE_REQUEST: &str = "Maintenance Request";
    pub const JOB_ORDER: &str = "Job Order";
    pub const MATERIAL_REQUEST: &str = "Material Request";
    pub const MAINTENANCE_TEAM: &str = "Asset Maintenance Team";
    pub const EMPLOYEE: &str = "Employee";
    pub const USER: &str = "User";
    pub const ASSET: &str = "Asset";
    pub const JOB_ORDER_TASK: &str = "Job Order Task";
}

/// Status groupings used for filtering and reporting
pub mod status_groups {
    use crate::state_machine::JobOrderState;

    /// Job order states that still accept work
    pub const OPEN_JOB_ORDER_STATES: [JobOrderState; 3] = [
        JobOrderState::Draft,
        JobOrderState::Scheduled,
        JobOrderState::InProgress,
    ];
}

/// Request priority levels driving scheduling defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Check if this priority demands expedited handling
    pub fn is_urgent(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(format!("Invalid priority: {s}")),
        }
    }
}

/// Submission state of a document (draft documents remain editable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocStatus {
    Draft,
    Submitted,
}

impl DocStatus {
    /// Check if the document is still editable
    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Check if the document has been submitted and locked
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted)
    }
}

impl Default for DocStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl fmt::Display for DocStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Submitted => write!(f, "submitted"),
        }
    }
}
