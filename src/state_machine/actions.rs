use async_trait::async_trait;
use serde_json::{json, Value};

use super::errors::{ActionError, ActionResult};
use super::states::{JobOrderState, RequestState};
use crate::constants::events;
use crate::events::publisher::EventPublisher;
use crate::models::{JobOrder, MaintenanceRequest};

/// Trait for implementing state transition actions
#[async_trait]
pub trait StateAction<T>: Send + Sync {
    /// Execute the action
    async fn execute(
        &self,
        entity: &T,
        from_state: Option<String>,
        to_state: String,
        event: &str,
    ) -> ActionResult<()>;

    /// Get a description of this action for logging
    fn description(&self) -> &'static str;
}

/// Action to publish lifecycle events when state transitions occur
pub struct PublishTransitionEventAction {
    event_publisher: EventPublisher,
}

impl PublishTransitionEventAction {
    pub fn new(event_publisher: EventPublisher) -> Self {
        Self { event_publisher }
    }
}

#[async_trait]
impl StateAction<JobOrder> for PublishTransitionEventAction {
    async fn execute(
        &self,
        job_order: &JobOrder,
        from_state: Option<String>,
        to_state: String,
        event: &str,
    ) -> ActionResult<()> {
        let event_name = determine_job_order_event_name(&to_state);

        if let Some(event_name) = event_name {
            let context = build_job_order_event_context(job_order, &from_state, &to_state, event);

            self.event_publisher
                .publish(event_name, context)
                .await
                .map_err(|_| ActionError::EventPublishFailed {
                    event_name: event_name.to_string(),
                })?;
        }

        Ok(())
    }

    fn description(&self) -> &'static str {
        "Publish lifecycle event for job order transition"
    }
}

#[async_trait]
impl StateAction<MaintenanceRequest> for PublishTransitionEventAction {
    async fn execute(
        &self,
        request: &MaintenanceRequest,
        from_state: Option<String>,
        to_state: String,
        event: &str,
    ) -> ActionResult<()> {
        let event_name = determine_request_event_name(&to_state);

        if let Some(event_name) = event_name {
            let context = build_request_event_context(request, &from_state, &to_state, event);

            self.event_publisher
                .publish(event_name, context)
                .await
                .map_err(|_| ActionError::EventPublishFailed {
                    event_name: event_name.to_string(),
                })?;
        }

        Ok(())
    }

    fn description(&self) -> &'static str {
        "Publish lifecycle event for request transition"
    }
}

/// Action to log job order completion
pub struct LogCompletionAction;

#[async_trait]
impl StateAction<JobOrder> for LogCompletionAction {
    async fn execute(
        &self,
        job_order: &JobOrder,
        _from_state: Option<String>,
        to_state: String,
        _event: &str,
    ) -> ActionResult<()> {
        if to_state == JobOrderState::Completed.to_string() {
            tracing::info!(
                job_order = %job_order.name,
                maintenance_request = job_order.maintenance_request.as_deref(),
                "Job order marked as completed"
            );
        }

        Ok(())
    }

    fn description(&self) -> &'static str {
        "Log job order completion"
    }
}

fn determine_job_order_event_name(to_state: &str) -> Option<&'static str> {
    if to_state == JobOrderState::Scheduled.to_string() {
        Some(events::JOB_ORDER_SCHEDULED)
    } else if to_state == JobOrderState::InProgress.to_string() {
        Some(events::JOB_ORDER_STARTED)
    } else if to_state == JobOrderState::Completed.to_string() {
        Some(events::JOB_ORDER_COMPLETED)
    } else if to_state == JobOrderState::Cancelled.to_string() {
        Some(events::JOB_ORDER_CANCELLED)
    } else {
        None
    }
}

fn determine_request_event_name(to_state: &str) -> Option<&'static str> {
    if to_state == RequestState::Open.to_string() {
        Some(events::REQUEST_OPENED)
    } else if to_state == RequestState::Assigned.to_string() {
        Some(events::REQUEST_ASSIGNED)
    } else if to_state == RequestState::Closed.to_string() {
        Some(events::REQUEST_CLOSED)
    } else {
        None
    }
}

fn build_job_order_event_context(
    job_order: &JobOrder,
    from_state: &Option<String>,
    to_state: &str,
    event: &str,
) -> Value {
    json!({
        "job_order": job_order.name,
        "maintenance_request": job_order.maintenance_request,
        "from_state": from_state,
        "to_state": to_state,
        "event": event,
        "actual_response_time": job_order.actual_response_time,
    })
}

fn build_request_event_context(
    request: &MaintenanceRequest,
    from_state: &Option<String>,
    to_state: &str,
    event: &str,
) -> Value {
    json!({
        "maintenance_request": request.name,
        "job_order": request.job_order,
        "priority": request.priority,
        "from_state": from_state,
        "to_state": to_state,
        "event": event,
    })
}
