use super::errors::{business_rule_violation, GuardResult};
use crate::models::{JobOrder, MaintenanceRequest};
use async_trait::async_trait;

/// Trait for implementing state transition guards
#[async_trait]
pub trait StateGuard<T>: Send + Sync {
    /// Check if a transition is allowed
    async fn check(&self, entity: &T) -> GuardResult<bool>;

    /// Get a description of this guard for logging
    fn description(&self) -> &'static str;
}

/// Guard to check that a job order may still be completed
///
/// Completion is only offered while the document is in draft submission
/// state and not already completed.
pub struct CompletionAllowedGuard;

#[async_trait]
impl StateGuard<JobOrder> for CompletionAllowedGuard {
    async fn check(&self, job_order: &JobOrder) -> GuardResult<bool> {
        if !job_order.docstatus.is_draft() {
            return Err(business_rule_violation(format!(
                "Job Order {} is submitted and can no longer be completed",
                job_order.name
            )));
        }

        if job_order.status == super::states::JobOrderState::Completed {
            return Err(business_rule_violation(format!(
                "Job Order {} is already completed",
                job_order.name
            )));
        }

        Ok(true)
    }

    fn description(&self) -> &'static str {
        "Job order must be in draft submission state and not completed"
    }
}

/// Guard to check that a request can receive a job order assignment
pub struct AssignableRequestGuard;

#[async_trait]
impl StateGuard<MaintenanceRequest> for AssignableRequestGuard {
    async fn check(&self, request: &MaintenanceRequest) -> GuardResult<bool> {
        if !request.docstatus.is_submitted() {
            return Err(business_rule_violation(format!(
                "Maintenance Request {} must be submitted before assignment",
                request.name
            )));
        }

        if let Some(existing) = &request.job_order {
            return Err(business_rule_violation(format!(
                "Maintenance Request {} already has Job Order {existing}",
                request.name
            )));
        }

        Ok(true)
    }

    fn description(&self) -> &'static str {
        "Request must be submitted and not already assigned"
    }
}

/// Guard to check that a cancelled or completed order is not rescheduled
pub struct OrderStillOpenGuard;

#[async_trait]
impl StateGuard<JobOrder> for OrderStillOpenGuard {
    async fn check(&self, job_order: &JobOrder) -> GuardResult<bool> {
        if !job_order.status.is_open() {
            return Err(business_rule_violation(format!(
                "Job Order {} is {} and accepts no further work",
                job_order.name, job_order.status
            )));
        }

        Ok(true)
    }

    fn description(&self) -> &'static str {
        "Job order must still be open"
    }
}
