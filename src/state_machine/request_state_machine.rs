use super::{
    actions::{PublishTransitionEventAction, StateAction},
    errors::{StateMachineError, StateMachineResult},
    events::RequestEvent,
    guards::{AssignableRequestGuard, StateGuard},
    states::RequestState,
};
use crate::events::publisher::EventPublisher;
use crate::models::MaintenanceRequest;

/// State machine for the maintenance request lifecycle
pub struct RequestStateMachine {
    request: MaintenanceRequest,
    event_publisher: EventPublisher,
}

impl RequestStateMachine {
    /// Create a new request state machine instance
    pub fn new(request: MaintenanceRequest, event_publisher: EventPublisher) -> Self {
        Self {
            request,
            event_publisher,
        }
    }

    /// Get the current state of the request
    pub fn current_state(&self) -> RequestState {
        self.request.status
    }

    /// Attempt to transition the request state
    pub async fn transition(&mut self, event: RequestEvent) -> StateMachineResult<RequestState> {
        let current_state = self.current_state();
        let target_state = self.determine_target_state(current_state, &event)?;

        self.check_guards(current_state, target_state, &event).await?;

        self.request.status = target_state;
        if let RequestEvent::Assign(job_order) = &event {
            self.request.job_order = Some(job_order.clone());
        }

        let event_str = serde_json::to_string(&event)
            .map_err(|e| StateMachineError::Internal(format!("Unserializable event: {e}")))?;
        self.execute_actions(current_state, target_state, &event_str)
            .await?;

        Ok(target_state)
    }

    /// Determine the target state based on current state and event
    pub fn determine_target_state(
        &self,
        current_state: RequestState,
        event: &RequestEvent,
    ) -> StateMachineResult<RequestState> {
        let target = match (current_state, event) {
            (RequestState::Draft, RequestEvent::Open) => RequestState::Open,
            (RequestState::Open, RequestEvent::Assign(_)) => RequestState::Assigned,
            (RequestState::Open, RequestEvent::Close)
            | (RequestState::Assigned, RequestEvent::Close) => RequestState::Closed,

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
        _current_state: RequestState,
        target_state: RequestState,
        event: &RequestEvent,
    ) -> StateMachineResult<()> {
        if let (RequestState::Assigned, RequestEvent::Assign(_)) = (target_state, event) {
            let guard = AssignableRequestGuard;
            guard.check(&self.request).await?;
        }

        Ok(())
    }

    /// Execute actions after successful transition
    async fn execute_actions(
        &self,
        from_state: RequestState,
        to_state: RequestState,
        event: &str,
    ) -> StateMachineResult<()> {
        let action = PublishTransitionEventAction::new(self.event_publisher.clone());
        action
            .execute(
                &self.request,
                Some(from_state.to_string()),
                to_state.to_string(),
                event,
            )
            .await?;

        Ok(())
    }

    /// Check if the request is in a terminal state
    pub fn is_terminal(&self) -> bool {
        self.current_state().is_terminal()
    }

    /// Get request information
    pub fn request(&self) -> &MaintenanceRequest {
        &self.request
    }

    /// Consume the machine, returning the (possibly transitioned) record
    pub fn into_inner(self) -> MaintenanceRequest {
        self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DocStatus;

    fn create_test_state_machine() -> RequestStateMachine {
        RequestStateMachine::new(
            MaintenanceRequest::new("MR-0001"),
            EventPublisher::default(),
        )
    }

    #[test]
    fn test_state_transitions() {
        let sm = create_test_state_machine();

        assert_eq!(
            sm.determine_target_state(RequestState::Draft, &RequestEvent::Open)
                .unwrap(),
            RequestState::Open
        );

        assert_eq!(
            sm.determine_target_state(RequestState::Open, &RequestEvent::assign_to("JO-0001"))
                .unwrap(),
            RequestState::Assigned
        );
    }

    #[test]
    fn test_invalid_transitions() {
        let sm = create_test_state_machine();

        // Cannot assign straight from draft
        assert!(sm
            .determine_target_state(RequestState::Draft, &RequestEvent::assign_to("JO-0001"))
            .is_err());

        // Closed requests are terminal
        assert!(sm
            .determine_target_state(RequestState::Closed, &RequestEvent::Open)
            .is_err());
    }

    #[tokio::test]
    async fn test_assignment_sets_back_reference() {
        let mut request = MaintenanceRequest::new("MR-0001");
        request.status = RequestState::Open;
        request.docstatus = DocStatus::Submitted;

        let mut sm = RequestStateMachine::new(request, EventPublisher::default());
        let state = sm
            .transition(RequestEvent::assign_to("JO-0001"))
            .await
            .unwrap();

        assert_eq!(state, RequestState::Assigned);
        assert_eq!(sm.request().job_order.as_deref(), Some("JO-0001"));
    }

    #[tokio::test]
    async fn test_assignment_guard_blocks_unsubmitted_request() {
        let mut request = MaintenanceRequest::new("MR-0001");
        request.status = RequestState::Open;

        let mut sm = RequestStateMachine::new(request, EventPublisher::default());
        assert!(sm.transition(RequestEvent::assign_to("JO-0001")).await.is_err());
    }
}
