//! # Component Registration
//!
//! Field-change handlers register here keyed by (doctype, fieldname);
//! the mutating layer dispatches to them synchronously after a field
//! changes.

pub mod field_handler_registry;

pub use field_handler_registry::{FieldChangeHandler, FieldHandlerRegistry};
