//! Shared builders for integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::json;

use maint_core::constants::{doctypes, DocStatus};
use maint_core::models::{JobOrder, MaintenanceRequest};
use maint_core::services::{DocumentStore, InMemoryDocumentStore};
use maint_core::state_machine::RequestState;

pub fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

/// A submitted, open request ready for job order assignment
pub fn submitted_request(name: &str, request_date: Option<NaiveDateTime>) -> MaintenanceRequest {
    let mut request = MaintenanceRequest::new(name);
    request.asset = Some("PUMP-001".to_string());
    request.status = RequestState::Open;
    request.docstatus = DocStatus::Submitted;
    request.request_date = request_date;
    request
}

/// A draft job order linked to the given request
pub fn linked_job_order(name: &str, request_name: &str) -> JobOrder {
    let mut job_order = JobOrder::new(name);
    job_order.maintenance_request = Some(request_name.to_string());
    job_order
}

pub async fn seed_request(store: &InMemoryDocumentStore, request: &MaintenanceRequest) {
    store
        .insert(
            doctypes::MAINTENANCE_REQUEST,
            serde_json::to_value(request).unwrap(),
        )
        .await
        .unwrap();
}

pub async fn seed_job_order(store: &InMemoryDocumentStore, job_order: &JobOrder) {
    store
        .insert(doctypes::JOB_ORDER, serde_json::to_value(job_order).unwrap())
        .await
        .unwrap();
}

/// Store seeded with three active maintenance employees and their users
pub async fn store_with_roster() -> InMemoryDocumentStore {
    let store = InMemoryDocumentStore::new();
    for (employee, full_name, user) in [
        ("EMP-001", "Asha Rao", "asha@example.com"),
        ("EMP-002", "Bruno Keller", "bruno@example.com"),
        ("EMP-003", "Chen Wei", "chen@example.com"),
    ] {
        store
            .insert(
                doctypes::EMPLOYEE,
                json!({
                    "name": employee,
                    "employee_name": full_name,
                    "user_id": user,
                    "department": "Maintenance",
                    "status": "Active",
                }),
            )
            .await
            .unwrap();
        store
            .insert(doctypes::USER, json!({ "name": user }))
            .await
            .unwrap();
    }
    store
}
