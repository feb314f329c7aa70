//! # Structured Logging Module
//!
//! Environment-aware structured logging for debugging async document
//! flows and dispatch operations.

use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(true)
                .with_filter(EnvFilter::new(log_level)),
        );

        // Use try_init to avoid panic if a global subscriber already exists
        if subscriber.try_init().is_err() {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        }

        tracing::info!(
            environment = %environment,
            "🔧 STRUCTURED LOGGING: Initialized"
        );
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var("MAINT_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Log structured data for document operations
pub fn log_document_operation(
    operation: &str,
    doctype: &str,
    name: Option<&str>,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        doctype = %doctype,
        name = name,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "📄 DOCUMENT_OPERATION"
    );
}

/// Log structured data for field-change dispatch
pub fn log_dispatch_operation(
    doctype: &str,
    fieldname: &str,
    handler: Option<&str>,
    status: &str,
) {
    tracing::debug!(
        doctype = %doctype,
        fieldname = %fieldname,
        handler = handler,
        status = %status,
        timestamp = %Utc::now().to_rfc3339(),
        "🗂️ FIELD_DISPATCH"
    );
}

/// Log structured data for external lookups
pub fn log_lookup_operation(
    doctype: &str,
    name: &str,
    fieldname: &str,
    status: &str,
    duration_ms: Option<u64>,
) {
    tracing::info!(
        doctype = %doctype,
        name = %name,
        fieldname = %fieldname,
        status = %status,
        duration_ms = duration_ms,
        timestamp = %Utc::now().to_rfc3339(),
        "🔍 LOOKUP_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "❌ ERROR"
    );
}
