//! # Field Handler Registry
//!
//! Registry for field-change handler management with thread-safe
//! operations.
//!
//! ## Overview
//!
//! The host framework fires a trigger when a form field changes; this
//! registry is the explicit equivalent. Handlers are keyed by
//! `(doctype, fieldname)` and invoked by the layer that mutates a field,
//! after validation. Unregistered keys dispatch to nothing.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use crate::constants::doctypes;
use crate::error::Result;
use crate::lifecycle::scheduling::apply_priority_defaults;
use crate::lifecycle::task_duration::recompute_duration;
use crate::logging::log_dispatch_operation;
use crate::models::{JobOrder, JobOrderTask, MaintenanceRequest};
use crate::services::document_store::Document;
use crate::state_machine::JobOrderState;

/// Trait for field-change handlers
#[async_trait]
pub trait FieldChangeHandler: Send + Sync {
    /// Apply the handler to the changed document
    async fn handle(&self, doc: &mut Document) -> Result<()>;

    /// Get a description of this handler for logging
    fn description(&self) -> &'static str;
}

/// Registry for managing field-change handlers
pub struct FieldHandlerRegistry {
    handlers: DashMap<(String, String), Arc<dyn FieldChangeHandler>>,
}

impl FieldHandlerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }

    /// Create a registry with the built-in maintenance handlers registered
    pub fn with_default_handlers() -> Self {
        let registry = Self::new();
        registry.register(
            doctypes::MAINTENANCE_REQUEST,
            "priority",
            Arc::new(PriorityDefaultsHandler),
        );
        registry.register(
            doctypes::JOB_ORDER,
            "start_date",
            Arc::new(ScheduleOnStartDateHandler),
        );
        registry.register(
            doctypes::JOB_ORDER_TASK,
            "start_time",
            Arc::new(TaskDurationHandler),
        );
        registry.register(
            doctypes::JOB_ORDER_TASK,
            "end_time",
            Arc::new(TaskDurationHandler),
        );
        registry
    }

    /// Register a handler for a (doctype, fieldname) key
    pub fn register(
        &self,
        doctype: &str,
        fieldname: &str,
        handler: Arc<dyn FieldChangeHandler>,
    ) {
        self.handlers
            .insert((doctype.to_string(), fieldname.to_string()), handler);
    }

    /// Number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Dispatch a field change to its registered handler
    ///
    /// Returns `true` when a handler ran; unregistered keys are a logged
    /// no-op.
    pub async fn dispatch(
        &self,
        doctype: &str,
        fieldname: &str,
        doc: &mut Document,
    ) -> Result<bool> {
        let handler = self
            .handlers
            .get(&(doctype.to_string(), fieldname.to_string()))
            .map(|entry| Arc::clone(entry.value()));

        match handler {
            Some(handler) => {
                log_dispatch_operation(doctype, fieldname, Some(handler.description()), "dispatched");
                handler.handle(doc).await?;
                Ok(true)
            }
            None => {
                log_dispatch_operation(doctype, fieldname, None, "no_handler");
                Ok(false)
            }
        }
    }
}

impl Default for FieldHandlerRegistry {
    fn default() -> Self {
        Self::with_default_handlers()
    }
}

/// Applies the priority-driven expected-date defaults to a request
pub struct PriorityDefaultsHandler;

#[async_trait]
impl FieldChangeHandler for PriorityDefaultsHandler {
    async fn handle(&self, doc: &mut Document) -> Result<()> {
        let mut request: MaintenanceRequest = serde_json::from_value(doc.clone())?;
        apply_priority_defaults(&mut request);
        *doc = serde_json::to_value(&request)?;
        Ok(())
    }

    fn description(&self) -> &'static str {
        "Apply scheduling defaults on priority change"
    }
}

/// Moves a draft order to scheduled once a start date is set
pub struct ScheduleOnStartDateHandler;

#[async_trait]
impl FieldChangeHandler for ScheduleOnStartDateHandler {
    async fn handle(&self, doc: &mut Document) -> Result<()> {
        let mut job_order: JobOrder = serde_json::from_value(doc.clone())?;
        if job_order.start_date.is_some() && job_order.status == JobOrderState::Draft {
            job_order.status = JobOrderState::Scheduled;
        }
        *doc = serde_json::to_value(&job_order)?;
        Ok(())
    }

    fn description(&self) -> &'static str {
        "Schedule job order when a start date is set"
    }
}

/// Recomputes the derived duration on a task row
pub struct TaskDurationHandler;

#[async_trait]
impl FieldChangeHandler for TaskDurationHandler {
    async fn handle(&self, doc: &mut Document) -> Result<()> {
        let mut task: JobOrderTask = serde_json::from_value(doc.clone())?;
        recompute_duration(&mut task);
        *doc = serde_json::to_value(&task)?;
        Ok(())
    }

    fn description(&self) -> &'static str {
        "Recompute task duration on timestamp change"
    }
}
