//! # Service Boundary
//!
//! The document-store abstraction over the host framework plus the
//! maintenance API operations built on top of it.

pub mod document_store;
pub mod maintenance_api;

pub use document_store::{
    lookup_field_with_timeout, Document, DocumentStore, InMemoryDocumentStore,
};
pub use maintenance_api::{
    create_job_order, create_material_requisition, get_default_maintenance_team,
    get_default_technician, unlink_maintenance_request, validate_technician,
};
