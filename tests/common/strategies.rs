//! Proptest strategies shared across property tests

#![allow(dead_code)]

use chrono::{DateTime, NaiveDateTime};
use proptest::prelude::*;

use maint_core::constants::Priority;

/// Any priority level
pub fn priority_strategy() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Low),
        Just(Priority::Medium),
        Just(Priority::High),
        Just(Priority::Critical),
    ]
}

/// Timestamps between 2000-01-01 and roughly 2090
pub fn datetime_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (946_684_800i64..3_800_000_000i64)
        .prop_map(|secs| DateTime::from_timestamp(secs, 0).unwrap().naive_utc())
}

/// An ordered pair of timestamps (start <= end)
pub fn ordered_datetime_pair_strategy() -> impl Strategy<Value = (NaiveDateTime, NaiveDateTime)> {
    (datetime_strategy(), 0i64..86_400_000)
        .prop_map(|(start, offset)| (start, start + chrono::Duration::seconds(offset)))
}
