//! # Document Store Abstraction
//!
//! The host application owns storage, permissions, and list rendering;
//! this crate only reads and writes documents through this trait. Every
//! call is a single asynchronous request/response; the bounded-wait
//! wrapper keeps a lookup that never returns from stalling a flow.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

use crate::error::{MaintError, Result};
use crate::logging::log_lookup_operation;

/// A document as the host framework represents it
pub type Document = Value;

/// Async boundary to the host document framework
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a full record
    async fn get_record(&self, doctype: &str, name: &str) -> Result<Document>;

    /// Fetch a single field from a record
    ///
    /// `Ok(None)` means the record exists but carries no such field;
    /// a missing record is an error.
    async fn lookup_field(&self, doctype: &str, name: &str, fieldname: &str)
        -> Result<Option<Value>>;

    /// Insert a new record, returning its assigned name
    async fn insert(&self, doctype: &str, doc: Document) -> Result<String>;

    /// Persist a record (upsert semantics)
    async fn save(&self, doctype: &str, name: &str, doc: Document) -> Result<()>;

    /// Set individual field values on an existing record
    async fn update_values(&self, doctype: &str, name: &str, values: &[(&str, Value)])
        -> Result<()>;

    /// Check whether a record exists
    async fn exists(&self, doctype: &str, name: &str) -> Result<bool>;

    /// Fetch records matching top-level field equality filters
    async fn list(&self, doctype: &str, filters: &[(&str, Value)]) -> Result<Vec<Document>>;
}

/// Bounded-wait wrapper around [`DocumentStore::lookup_field`]
///
/// A lookup that exceeds the timeout surfaces as a distinct
/// [`MaintError::LookupTimeout`] rather than stalling the caller.
pub async fn lookup_field_with_timeout(
    store: &dyn DocumentStore,
    doctype: &str,
    name: &str,
    fieldname: &str,
    timeout: Duration,
) -> Result<Option<Value>> {
    match tokio::time::timeout(timeout, store.lookup_field(doctype, name, fieldname)).await {
        Ok(result) => {
            let status = if result.is_ok() { "ok" } else { "error" };
            log_lookup_operation(doctype, name, fieldname, status, None);
            result
        }
        Err(_) => {
            log_lookup_operation(doctype, name, fieldname, "timeout", Some(timeout.as_millis() as u64));
            Err(MaintError::LookupTimeout {
                doctype: doctype.to_string(),
                fieldname: fieldname.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            })
        }
    }
}

/// In-memory document store for tests and embedders without a host
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    records: RwLock<HashMap<String, HashMap<String, Document>>>,
}

impl InMemoryDocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn generate_name(doctype: &str) -> String {
        let prefix: String = doctype
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect::<String>()
            .to_uppercase();
        let id = Uuid::new_v4().simple().to_string();
        format!("{prefix}-{}", &id[..8])
    }

    fn not_found(doctype: &str, name: &str) -> MaintError {
        MaintError::DocumentNotFound {
            doctype: doctype.to_string(),
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get_record(&self, doctype: &str, name: &str) -> Result<Document> {
        let records = self.records.read();
        records
            .get(doctype)
            .and_then(|docs| docs.get(name))
            .cloned()
            .ok_or_else(|| Self::not_found(doctype, name))
    }

    async fn lookup_field(
        &self,
        doctype: &str,
        name: &str,
        fieldname: &str,
    ) -> Result<Option<Value>> {
        let doc = self.get_record(doctype, name).await?;
        Ok(doc.get(fieldname).cloned())
    }

    async fn insert(&self, doctype: &str, mut doc: Document) -> Result<String> {
        let name = doc
            .get("name")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .unwrap_or_else(|| Self::generate_name(doctype));

        let mut records = self.records.write();
        let docs = records.entry(doctype.to_string()).or_default();
        if docs.contains_key(&name) {
            return Err(MaintError::StoreError(format!(
                "{doctype} {name} already exists"
            )));
        }

        doc["name"] = Value::String(name.clone());
        docs.insert(name.clone(), doc);
        Ok(name)
    }

    async fn save(&self, doctype: &str, name: &str, mut doc: Document) -> Result<()> {
        doc["name"] = Value::String(name.to_string());
        let mut records = self.records.write();
        records
            .entry(doctype.to_string())
            .or_default()
            .insert(name.to_string(), doc);
        Ok(())
    }

    async fn update_values(
        &self,
        doctype: &str,
        name: &str,
        values: &[(&str, Value)],
    ) -> Result<()> {
        let mut records = self.records.write();
        let doc = records
            .get_mut(doctype)
            .and_then(|docs| docs.get_mut(name))
            .ok_or_else(|| Self::not_found(doctype, name))?;

        for (fieldname, value) in values {
            doc[*fieldname] = value.clone();
        }
        Ok(())
    }

    async fn exists(&self, doctype: &str, name: &str) -> Result<bool> {
        let records = self.records.read();
        Ok(records
            .get(doctype)
            .map_or(false, |docs| docs.contains_key(name)))
    }

    async fn list(&self, doctype: &str, filters: &[(&str, Value)]) -> Result<Vec<Document>> {
        let records = self.records.read();
        let mut matches: Vec<Document> = records
            .get(doctype)
            .map(|docs| {
                docs.values()
                    .filter(|doc| {
                        filters
                            .iter()
                            .all(|(field, value)| doc.get(*field) == Some(value))
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        // Deterministic order for roster construction and tests
        matches.sort_by(|a, b| {
            let a_name = a.get("name").and_then(|v| v.as_str()).unwrap_or_default();
            let b_name = b.get("name").and_then(|v| v.as_str()).unwrap_or_default();
            a_name.cmp(b_name)
        });
        Ok(matches)
    }
}
