//! Scheduling Default Calculator
//!
//! Computes default expected dates on a maintenance request from its
//! priority and `request_date`. Pure record mutation; persistence is the
//! caller's responsibility.

use chrono::{Duration, NaiveDateTime};

use crate::constants::Priority;
use crate::models::MaintenanceRequest;

/// Days between the expected start and expected end of a request
pub fn lead_days(priority: Priority) -> i64 {
    match priority {
        Priority::Critical => 1,
        Priority::High => 3,
        Priority::Low | Priority::Medium => 7,
    }
}

/// Service-level days allowed for a job order, measured from creation
pub fn sla_days(priority: Priority) -> i64 {
    match priority {
        Priority::Low => 14,
        Priority::Medium => 7,
        Priority::High => 3,
        Priority::Critical => 1,
    }
}

/// Expected end date of a job order created at `from`
pub fn sla_end_date(priority: Priority, from: NaiveDateTime) -> NaiveDateTime {
    from + Duration::days(sla_days(priority))
}

/// Apply the priority-driven expected-date defaults to a request
///
/// No-op unless `request_date` is set and `expected_start_date` is still
/// absent; dates are set exactly once and later priority changes never
/// overwrite them.
pub fn apply_priority_defaults(request: &mut MaintenanceRequest) {
    let (Some(request_date), None) = (request.request_date, request.expected_start_date) else {
        return;
    };

    let start_date = request_date + Duration::days(1);
    request.expected_start_date = Some(start_date);
    request.expected_end_date = Some(start_date + Duration::days(lead_days(request.priority)));

    tracing::debug!(
        request = %request.name,
        priority = %request.priority,
        expected_start_date = %start_date,
        "Applied scheduling defaults"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_lead_days_table() {
        assert_eq!(lead_days(Priority::Low), 7);
        assert_eq!(lead_days(Priority::Medium), 7);
        assert_eq!(lead_days(Priority::High), 3);
        assert_eq!(lead_days(Priority::Critical), 1);
    }

    #[test]
    fn test_sla_days_table() {
        assert_eq!(sla_days(Priority::Low), 14);
        assert_eq!(sla_days(Priority::Medium), 7);
        assert_eq!(sla_days(Priority::High), 3);
        assert_eq!(sla_days(Priority::Critical), 1);
    }

    #[test]
    fn test_high_priority_defaults() {
        let mut request = MaintenanceRequest::new("MR-0001");
        request.priority = Priority::High;
        request.request_date = Some(request_date());

        apply_priority_defaults(&mut request);

        let expected_start = request_date() + Duration::days(1);
        assert_eq!(request.expected_start_date, Some(expected_start));
        assert_eq!(
            request.expected_end_date,
            Some(expected_start + Duration::days(3))
        );
    }

    #[test]
    fn test_noop_without_request_date() {
        let mut request = MaintenanceRequest::new("MR-0001");
        apply_priority_defaults(&mut request);
        assert_eq!(request.expected_start_date, None);
        assert_eq!(request.expected_end_date, None);
    }

    #[test]
    fn test_idempotent_once_dates_are_set() {
        let mut request = MaintenanceRequest::new("MR-0001");
        request.priority = Priority::Critical;
        request.request_date = Some(request_date());

        apply_priority_defaults(&mut request);
        let first_start = request.expected_start_date;
        let first_end = request.expected_end_date;

        // A later priority change must not overwrite the dates
        request.priority = Priority::Low;
        apply_priority_defaults(&mut request);

        assert_eq!(request.expected_start_date, first_start);
        assert_eq!(request.expected_end_date, first_end);
    }
}
