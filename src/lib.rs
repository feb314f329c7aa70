#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Maintenance Workflow Core
//!
//! Rust implementation of the core maintenance workflow engine: request
//! scheduling defaults, the job order completion lifecycle, and the
//! response-time KPI.
//!
//! ## Overview
//!
//! The host business-application framework owns storage, permissions,
//! and rendering; this crate owns the workflow logic. Records are typed,
//! state changes run through guarded state machines, field changes
//! dispatch through an explicit registry, and every external lookup is a
//! bounded wait.
//!
//! ## Module Organization
//!
//! - [`models`] - Typed records for the maintenance doctypes
//! - [`state_machine`] - Request and job order lifecycle management
//! - [`lifecycle`] - Scheduling, completion/KPI, and duration calculators
//! - [`registry`] - Field-change handler dispatch
//! - [`services`] - Document store boundary and maintenance API
//! - [`events`] - Lifecycle event publishing
//! - [`config`] - Configuration management
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use maint_core::config::MaintConfig;
//! use maint_core::events::EventPublisher;
//! use maint_core::lifecycle::CompletionProcessor;
//! use maint_core::models::JobOrder;
//! use maint_core::services::InMemoryDocumentStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(InMemoryDocumentStore::new());
//! let publisher = EventPublisher::default();
//! let processor = CompletionProcessor::new(store, publisher, MaintConfig::default());
//!
//! let job_order = JobOrder::new("JO-0001");
//! let completed = processor
//!     .complete(job_order, chrono::Utc::now().naive_utc())
//!     .await?;
//! println!("{} completed", completed.name);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod logging;
pub mod models;
pub mod registry;
pub mod services;
pub mod state_machine;

pub use config::MaintConfig;
pub use constants::{events as system_events, DocStatus, Priority};
pub use error::{MaintError, Result};
pub use events::{EventPublisher, PublishedEvent};
pub use lifecycle::CompletionProcessor;
pub use models::{JobOrder, JobOrderTask, MaintenanceRequest};
pub use registry::FieldHandlerRegistry;
pub use services::{DocumentStore, InMemoryDocumentStore};
pub use state_machine::{
    JobOrderEvent, JobOrderState, JobOrderStateMachine, RequestEvent, RequestState,
    RequestStateMachine,
};
