use thiserror::Error;

use crate::error::MaintError;

/// Errors raised while evaluating transition guards
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GuardError {
    #[error("Business rule violation: {0}")]
    BusinessRuleViolation(String),
    #[error("Invalid state: {state}")]
    InvalidState { state: String },
}

/// Errors raised while executing post-transition actions
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Failed to publish event: {event_name}")]
    EventPublishFailed { event_name: String },
    #[error("Store operation failed: {0}")]
    Store(String),
}

/// Top-level state machine error
#[derive(Debug, Error)]
pub enum StateMachineError {
    #[error("Invalid transition from {from:?} on {event}")]
    InvalidTransition { from: String, event: String },
    #[error(transparent)]
    Guard(#[from] GuardError),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error("Internal state machine error: {0}")]
    Internal(String),
}

pub type GuardResult<T> = Result<T, GuardError>;
pub type ActionResult<T> = Result<T, ActionError>;
pub type StateMachineResult<T> = Result<T, StateMachineError>;

impl From<StateMachineError> for MaintError {
    fn from(err: StateMachineError) -> Self {
        MaintError::StateTransitionError(err.to_string())
    }
}

/// Convenience constructor for business rule guard failures
pub fn business_rule_violation(msg: impl Into<String>) -> GuardError {
    GuardError::BusinessRuleViolation(msg.into())
}
