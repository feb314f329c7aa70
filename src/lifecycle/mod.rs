//! # Lifecycle Calculators
//!
//! The business calculations attached to record lifecycles:
//!
//! - [`scheduling`] - priority-driven expected-date defaults on requests
//! - [`completion`] - job order completion and the response-time KPI
//! - [`task_duration`] - derived duration on job order task rows

pub mod completion;
pub mod scheduling;
pub mod task_duration;

pub use completion::CompletionProcessor;

use chrono::NaiveDateTime;

/// Elapsed time between two timestamps in fractional hours
pub(crate) fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_seconds() as f64 / 3600.0
}

/// Round to two decimal places, the KPI's persisted precision
pub(crate) fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
