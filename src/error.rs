use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum MaintError {
    DocumentNotFound { doctype: String, name: String },
    StoreError(String),
    LookupTimeout { doctype: String, fieldname: String, timeout_ms: u64 },
    StateTransitionError(String),
    ValidationError(String),
    ConfigurationError(String),
    EventError(String),
    SerializationError(String),
}

impl fmt::Display for MaintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaintError::DocumentNotFound { doctype, name } => {
                write!(f, "Document not found: {doctype} {name}")
            }
            MaintError::StoreError(msg) => write!(f, "Document store error: {msg}"),
            MaintError::LookupTimeout {
                doctype,
                fieldname,
                timeout_ms,
            } => write!(
                f,
                "Lookup timed out after {timeout_ms}ms: {doctype}.{fieldname}"
            ),
            MaintError::StateTransitionError(msg) => write!(f, "State transition error: {msg}"),
            MaintError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            MaintError::ConfigurationError(msg) => write!(f, "Configuration error: {msg}"),
            MaintError::EventError(msg) => write!(f, "Event error: {msg}"),
            MaintError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for MaintError {}

impl From<serde_json::Error> for MaintError {
    fn from(err: serde_json::Error) -> Self {
        MaintError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MaintError>;
