//! # Data Model Layer
//!
//! Typed records for the three maintenance doctypes. Records serialize to
//! and from the document store's JSON representation; derived fields are
//! recomputed by the lifecycle calculators.

pub mod job_order;
pub mod job_order_task;
pub mod maintenance_request;

pub use job_order::{JobOrder, MaterialRequisitionRef, RequiredMaterial};
pub use job_order_task::JobOrderTask;
pub use maintenance_request::MaintenanceRequest;
