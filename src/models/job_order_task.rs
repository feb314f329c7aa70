//! Job Order Task Model
//!
//! Child row of a job order. `duration` is derived from the two
//! timestamps by the task duration calculator.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A task row on a job order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOrderTask {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,

    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,

    /// Derived: elapsed hours between the two timestamps
    #[serde(default)]
    pub duration: Option<f64>,
}

impl JobOrderTask {
    /// Create an empty task row
    pub fn new() -> Self {
        Self {
            description: None,
            start_time: None,
            end_time: None,
            duration: None,
        }
    }
}

impl Default for JobOrderTask {
    fn default() -> Self {
        Self::new()
    }
}
