//! Task Duration Calculator
//!
//! Derived-field rule for job order task rows, evaluated on either
//! timestamp's change. When a timestamp is removed the duration clears
//! rather than retaining its stale value.

use crate::lifecycle::hours_between;
use crate::models::JobOrderTask;

/// Recompute the derived `duration` field on a task row
pub fn recompute_duration(task: &mut JobOrderTask) {
    task.duration = match (task.start_time, task.end_time) {
        (Some(start), Some(end)) => Some(hours_between(start, end)),
        _ => None,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    #[test]
    fn test_duration_from_both_timestamps() {
        let mut task = JobOrderTask::new();
        task.start_time = Some(at(9, 0));
        task.end_time = Some(at(11, 30));

        recompute_duration(&mut task);
        assert_eq!(task.duration, Some(2.5));
    }

    #[test]
    fn test_duration_clears_when_timestamp_removed() {
        let mut task = JobOrderTask::new();
        task.start_time = Some(at(9, 0));
        task.end_time = Some(at(11, 30));
        recompute_duration(&mut task);
        assert_eq!(task.duration, Some(2.5));

        task.end_time = None;
        recompute_duration(&mut task);
        assert_eq!(task.duration, None);
    }

    #[test]
    fn test_duration_untouched_shape_with_no_timestamps() {
        let mut task = JobOrderTask::new();
        recompute_duration(&mut task);
        assert_eq!(task.duration, None);
    }
}
