//! Job Order Completion & KPI Calculator
//!
//! Drives the completion transition, stamps the completion time onto the
//! record, computes the response-time KPI against the linked request, and
//! persists the result with a single save.
//!
//! The KPI lookup crosses the document-store boundary and is bounded by
//! the configured timeout; a lookup that never returns surfaces as a
//! distinct warning instead of stalling the flow.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::config::MaintConfig;
use crate::constants::doctypes;
use crate::error::{MaintError, Result};
use crate::events::publisher::EventPublisher;
use crate::lifecycle::{hours_between, round_to_hundredths};
use crate::logging::log_error;
use crate::models::JobOrder;
use crate::services::document_store::{lookup_field_with_timeout, DocumentStore};
use crate::state_machine::{JobOrderEvent, JobOrderStateMachine};

/// Orchestrates the completion flow for job orders
pub struct CompletionProcessor {
    store: Arc<dyn DocumentStore>,
    event_publisher: EventPublisher,
    config: MaintConfig,
}

impl CompletionProcessor {
    /// Create a new completion processor
    pub fn new(
        store: Arc<dyn DocumentStore>,
        event_publisher: EventPublisher,
        config: MaintConfig,
    ) -> Self {
        Self {
            store,
            event_publisher,
            config,
        }
    }

    /// Complete a job order at the given time
    ///
    /// Runs the guarded state transition, stamps the completion time,
    /// computes `actual_response_time` when a linked request carries a
    /// `request_date`, and persists the record. The record persists in
    /// all branches; only the KPI is conditional.
    pub async fn complete(
        &self,
        job_order: JobOrder,
        completion_time: NaiveDateTime,
    ) -> Result<JobOrder> {
        let mut machine = JobOrderStateMachine::new(job_order, self.event_publisher.clone());
        machine
            .transition(JobOrderEvent::Complete(completion_time))
            .await?;

        let mut job_order = machine.into_inner();
        job_order.expected_end_date = Some(completion_time);

        if let Some(request_name) = job_order.maintenance_request.clone() {
            match self.fetch_request_date(&request_name).await {
                Ok(Some(request_date)) => {
                    let elapsed = hours_between(request_date, completion_time);
                    job_order.actual_response_time = Some(round_to_hundredths(elapsed));
                }
                Ok(None) => {
                    self.warn(format!(
                        "Maintenance Request {request_name} does not have a request_date"
                    ))
                    .await?;
                }
                Err(e) => {
                    log_error(
                        "completion",
                        "request_date_lookup",
                        &e.to_string(),
                        Some(&job_order.name),
                    );
                    self.warn(format!(
                        "Could not read request_date from Maintenance Request {request_name}: {e}"
                    ))
                    .await?;
                }
            }
        }

        let doc = serde_json::to_value(&job_order)?;
        self.store
            .save(doctypes::JOB_ORDER, &job_order.name, doc)
            .await?;

        Ok(job_order)
    }

    async fn fetch_request_date(&self, request_name: &str) -> Result<Option<NaiveDateTime>> {
        let value = lookup_field_with_timeout(
            self.store.as_ref(),
            doctypes::MAINTENANCE_REQUEST,
            request_name,
            "request_date",
            self.config.lookup_timeout(),
        )
        .await?;

        match value {
            None | Some(Value::Null) => Ok(None),
            Some(v) => Ok(Some(serde_json::from_value(v)?)),
        }
    }

    async fn warn(&self, message: String) -> Result<()> {
        self.event_publisher
            .publish_warning(message)
            .await
            .map_err(|e| MaintError::EventError(e.to_string()))
    }
}
