use super::{
    actions::{LogCompletionAction, PublishTransitionEventAction, StateAction},
    errors::{StateMachineError, StateMachineResult},
    events::JobOrderEvent,
    guards::{CompletionAllowedGuard, OrderStillOpenGuard, StateGuard},
    states::JobOrderState,
};
use crate::events::publisher::EventPublisher;
use crate::models::JobOrder;

/// State machine for the job order lifecycle
///
/// The current state lives on the record itself (the host application's
/// status field), so resolving it requires no external storage.
pub struct JobOrderStateMachine {
    job_order: JobOrder,
    event_publisher: EventPublisher,
}

impl JobOrderStateMachine {
    /// Create a new job order state machine instance
    pub fn new(job_order: JobOrder, event_publisher: EventPublisher) -> Self {
        Self {
            job_order,
            event_publisher,
        }
    }

    /// Get the current state of the job order
    pub fn current_state(&self) -> JobOrderState {
        self.job_order.status
    }

    /// Attempt to transition the job order state
    pub async fn transition(&mut self, event: JobOrderEvent) -> StateMachineResult<JobOrderState> {
        let current_state = self.current_state();
        let target_state = self.determine_target_state(current_state, &event)?;

        // Check guards
        self.check_guards(current_state, target_state, &event).await?;

        // State lives on the record; stamping it is the transition
        self.job_order.status = target_state;

        // Execute actions
        let event_str = serde_json::to_string(&event)
            .map_err(|e| StateMachineError::Internal(format!("Unserializable event: {e}")))?;
        self.execute_actions(current_state, target_state, &event_str)
            .await?;

        Ok(target_state)
    }

    /// Determine the target state based on current state and event
    pub fn determine_target_state(
        &self,
        current_state: JobOrderState,
        event: &JobOrderEvent,
    ) -> StateMachineResult<JobOrderState> {
        let target = match (current_state, event) {
            // Scheduling transitions
            (JobOrderState::Draft, JobOrderEvent::Schedule) => JobOrderState::Scheduled,

            // Start transitions
            (JobOrderState::Scheduled, JobOrderEvent::Start) => JobOrderState::InProgress,

            // Completion transitions
            (JobOrderState::Draft, JobOrderEvent::Complete(_))
            | (JobOrderState::Scheduled, JobOrderEvent::Complete(_))
            | (JobOrderState::InProgress, JobOrderEvent::Complete(_)) => JobOrderState::Completed,

            // Cancel transitions
            (JobOrderState::Draft, JobOrderEvent::Cancel)
            | (JobOrderState::Scheduled, JobOrderEvent::Cancel)
            | (JobOrderState::InProgress, JobOrderEvent::Cancel) => JobOrderState::Cancelled,

            // Invalid transitions
            (from_state, _) => {
                return Err(StateMachineError::InvalidTransition {
                    from: from_state.to_string(),
                    event: event.event_type().to_string(),
                })
            }
        };

        Ok(target)
    }

    /// Check guard conditions for the transition
    async fn check_guards(
        &self,
        current_state: JobOrderState,
        target_state: JobOrderState,
        event: &JobOrderEvent,
    ) -> StateMachineResult<()> {
        match (current_state, target_state, event) {
            // Completion requires an editable, not-yet-completed document
            (_, JobOrderState::Completed, JobOrderEvent::Complete(_)) => {
                let guard = CompletionAllowedGuard;
                guard.check(&self.job_order).await?;
            }

            // Scheduling requires the order to still be open
            (_, JobOrderState::Scheduled, JobOrderEvent::Schedule) => {
                let guard = OrderStillOpenGuard;
                guard.check(&self.job_order).await?;
            }

            // No special guards for other transitions
            _ => {}
        }

        Ok(())
    }

    /// Execute actions after successful transition
    async fn execute_actions(
        &self,
        from_state: JobOrderState,
        to_state: JobOrderState,
        event: &str,
    ) -> StateMachineResult<()> {
        let actions: Vec<Box<dyn StateAction<JobOrder> + Send + Sync>> = vec![
            Box::new(PublishTransitionEventAction::new(
                self.event_publisher.clone(),
            )),
            Box::new(LogCompletionAction),
        ];

        for action in actions {
            action
                .execute(
                    &self.job_order,
                    Some(from_state.to_string()),
                    to_state.to_string(),
                    event,
                )
                .await?;
        }

        Ok(())
    }

    /// Check if the job order is in a terminal state
    pub fn is_terminal(&self) -> bool {
        self.current_state().is_terminal()
    }

    /// Get job order information
    pub fn job_order(&self) -> &JobOrder {
        &self.job_order
    }

    /// Consume the machine, returning the (possibly transitioned) record
    pub fn into_inner(self) -> JobOrder {
        self.job_order
    }
}
