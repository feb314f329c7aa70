//! Completion Flow Tests
//!
//! End-to-end coverage of the job order completion lifecycle: the KPI
//! computation against the linked request, the warning branches, and the
//! bounded-wait lookup guard.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use common::builders::*;
use maint_core::config::MaintConfig;
use maint_core::constants::{doctypes, events, DocStatus};
use maint_core::error::Result;
use maint_core::events::EventPublisher;
use maint_core::lifecycle::CompletionProcessor;
use maint_core::models::JobOrder;
use maint_core::services::{Document, DocumentStore, InMemoryDocumentStore};
use maint_core::state_machine::JobOrderState;

fn processor(
    store: Arc<dyn DocumentStore>,
    publisher: EventPublisher,
) -> CompletionProcessor {
    CompletionProcessor::new(store, publisher, MaintConfig::default())
}

#[tokio::test]
async fn test_completion_computes_kpi_from_linked_request() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let request = submitted_request("MR-0001", Some(datetime(2025, 1, 1, 0, 0)));
    seed_request(&store, &request).await;

    let job_order = linked_job_order("JO-0001", "MR-0001");
    seed_job_order(&store, &job_order).await;

    let completed = processor(store.clone(), EventPublisher::default())
        .complete(job_order, datetime(2025, 1, 2, 6, 0))
        .await
        .unwrap();

    assert_eq!(completed.status, JobOrderState::Completed);
    assert_eq!(completed.expected_end_date, Some(datetime(2025, 1, 2, 6, 0)));
    assert_eq!(completed.actual_response_time, Some(30.0));

    // The record persisted with the KPI stamped
    let saved = store.get_record(doctypes::JOB_ORDER, "JO-0001").await.unwrap();
    let saved: JobOrder = serde_json::from_value(saved).unwrap();
    assert_eq!(saved.actual_response_time, Some(30.0));
    assert_eq!(saved.status, JobOrderState::Completed);
}

#[tokio::test]
async fn test_completion_without_linked_request_still_persists() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let job_order = JobOrder::new("JO-0002");
    seed_job_order(&store, &job_order).await;

    let completed = processor(store.clone(), EventPublisher::default())
        .complete(job_order, datetime(2025, 2, 1, 12, 0))
        .await
        .unwrap();

    assert_eq!(completed.status, JobOrderState::Completed);
    assert_eq!(completed.actual_response_time, None);

    let saved = store.get_record(doctypes::JOB_ORDER, "JO-0002").await.unwrap();
    assert_eq!(saved["status"], "completed");
}

#[tokio::test]
async fn test_missing_request_date_warns_and_persists() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let request = submitted_request("MR-0003", None);
    seed_request(&store, &request).await;

    let job_order = linked_job_order("JO-0003", "MR-0003");
    seed_job_order(&store, &job_order).await;

    let publisher = EventPublisher::default();
    let mut receiver = publisher.subscribe();

    let completed = processor(store.clone(), publisher)
        .complete(job_order, datetime(2025, 2, 1, 12, 0))
        .await
        .unwrap();

    assert_eq!(completed.status, JobOrderState::Completed);
    assert_eq!(completed.actual_response_time, None);

    // Both the lifecycle event and the warning notice surface
    let mut names = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        names.push(event.name);
    }
    assert!(names.contains(&events::JOB_ORDER_COMPLETED.to_string()));
    assert!(names.contains(&events::NOTICE_WARNING.to_string()));

    let saved = store.get_record(doctypes::JOB_ORDER, "JO-0003").await.unwrap();
    assert_eq!(saved["actual_response_time"], Value::Null);
}

#[tokio::test]
async fn test_completion_before_request_date_stores_negative_kpi() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let request = submitted_request("MR-0004", Some(datetime(2025, 3, 2, 0, 0)));
    seed_request(&store, &request).await;

    let job_order = linked_job_order("JO-0004", "MR-0004");
    seed_job_order(&store, &job_order).await;

    let completed = processor(store, EventPublisher::default())
        .complete(job_order, datetime(2025, 3, 1, 12, 0))
        .await
        .unwrap();

    // Data anomaly, not an error: stored as-is
    assert_eq!(completed.actual_response_time, Some(-12.0));
}

#[tokio::test]
async fn test_completion_unavailable_once_completed() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let mut job_order = JobOrder::new("JO-0005");
    job_order.status = JobOrderState::Completed;
    seed_job_order(&store, &job_order).await;

    let result = processor(store, EventPublisher::default())
        .complete(job_order, datetime(2025, 4, 1, 9, 0))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_completion_unavailable_for_submitted_document() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let mut job_order = JobOrder::new("JO-0006");
    job_order.docstatus = DocStatus::Submitted;
    seed_job_order(&store, &job_order).await;

    let result = processor(store, EventPublisher::default())
        .complete(job_order, datetime(2025, 4, 1, 9, 0))
        .await;
    assert!(result.is_err());
}

/// Store whose field lookups never return, exercising the bounded wait
struct StalledLookupStore {
    inner: InMemoryDocumentStore,
}

#[async_trait]
impl DocumentStore for StalledLookupStore {
    async fn get_record(&self, doctype: &str, name: &str) -> Result<Document> {
        self.inner.get_record(doctype, name).await
    }

    async fn lookup_field(&self, _: &str, _: &str, _: &str) -> Result<Option<Value>> {
        tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        Ok(None)
    }

    async fn insert(&self, doctype: &str, doc: Document) -> Result<String> {
        self.inner.insert(doctype, doc).await
    }

    async fn save(&self, doctype: &str, name: &str, doc: Document) -> Result<()> {
        self.inner.save(doctype, name, doc).await
    }

    async fn update_values(&self, doctype: &str, name: &str, values: &[(&str, Value)]) -> Result<()> {
        self.inner.update_values(doctype, name, values).await
    }

    async fn exists(&self, doctype: &str, name: &str) -> Result<bool> {
        self.inner.exists(doctype, name).await
    }

    async fn list(&self, doctype: &str, filters: &[(&str, Value)]) -> Result<Vec<Document>> {
        self.inner.list(doctype, filters).await
    }
}

#[tokio::test]
async fn test_lookup_timeout_surfaces_and_completion_persists() {
    let inner = InMemoryDocumentStore::new();
    let job_order = linked_job_order("JO-0007", "MR-0007");
    seed_job_order(&inner, &job_order).await;

    let store = Arc::new(StalledLookupStore { inner });
    let publisher = EventPublisher::default();
    let mut receiver = publisher.subscribe();

    let config = MaintConfig {
        lookup_timeout_ms: 20,
        ..MaintConfig::default()
    };
    let processor = CompletionProcessor::new(store.clone(), publisher, config);

    let completed = processor
        .complete(job_order, datetime(2025, 5, 1, 9, 0))
        .await
        .unwrap();

    // The stalled lookup never blocks the save; the KPI stays unset
    assert_eq!(completed.status, JobOrderState::Completed);
    assert_eq!(completed.actual_response_time, None);

    let mut warned = false;
    while let Ok(event) = receiver.try_recv() {
        if event.name == events::NOTICE_WARNING {
            let message = event.context["message"].as_str().unwrap_or_default();
            assert!(message.contains("timed out"));
            warned = true;
        }
    }
    assert!(warned);

    let saved = store.get_record(doctypes::JOB_ORDER, "JO-0007").await.unwrap();
    assert_eq!(saved["status"], "completed");
}
