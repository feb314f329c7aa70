//! Maintenance Request Model
//!
//! A reported need for maintenance on an asset, carrying priority and
//! timing fields. Requests optionally spawn a one-to-one job order.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::{doctypes, DocStatus, Priority};
use crate::error::{MaintError, Result};
use crate::models::job_order::RequiredMaterial;
use crate::services::document_store::DocumentStore;
use crate::state_machine::RequestState;

/// A maintenance request record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRequest {
    /// Unique record name
    pub name: String,

    /// Asset the maintenance is requested for
    #[serde(default)]
    pub asset: Option<String>,

    /// When the need was logged; defaulted at validation time when absent
    #[serde(default)]
    pub request_date: Option<NaiveDateTime>,

    /// Priority driving the scheduling defaults
    #[serde(default)]
    pub priority: Priority,

    /// Expected work start; set once by the scheduling calculator
    #[serde(default)]
    pub expected_start_date: Option<NaiveDateTime>,

    /// Expected work end; set once by the scheduling calculator
    #[serde(default)]
    pub expected_end_date: Option<NaiveDateTime>,

    /// Maintenance team responsible for the request
    #[serde(default)]
    pub maintenance_team: Option<String>,

    /// Requesting user's preferred technician (a user id)
    #[serde(default)]
    pub assigned_to: Option<String>,

    /// Free-form problem description
    #[serde(default)]
    pub description: Option<String>,

    /// Materials the requester already knows are needed
    #[serde(default)]
    pub items: Vec<RequiredMaterial>,

    /// Back-reference to the job order created for this request
    #[serde(default)]
    pub job_order: Option<String>,

    /// Lifecycle status
    #[serde(default)]
    pub status: RequestState,

    /// Submission state
    #[serde(default)]
    pub docstatus: DocStatus,
}

impl MaintenanceRequest {
    /// Create a new draft request with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            asset: None,
            request_date: None,
            priority: Priority::default(),
            expected_start_date: None,
            expected_end_date: None,
            maintenance_team: None,
            assigned_to: None,
            description: None,
            items: Vec::new(),
            job_order: None,
            status: RequestState::default(),
            docstatus: DocStatus::default(),
        }
    }

    /// Run pre-save validation rules
    ///
    /// Defaults `request_date` to the supplied wall-clock time and verifies
    /// the assignee belongs to the selected maintenance team.
    pub async fn validate(&mut self, store: &dyn DocumentStore, now: NaiveDateTime) -> Result<()> {
        self.set_default_request_date(now);
        self.validate_team_assignment(store).await
    }

    /// Submission rule: a request must leave draft status before submitting
    pub fn before_submit(&self) -> Result<()> {
        if self.status == RequestState::Draft {
            return Err(MaintError::ValidationError(
                "Please change status from Draft before submitting".to_string(),
            ));
        }
        Ok(())
    }

    fn set_default_request_date(&mut self, now: NaiveDateTime) {
        if self.request_date.is_none() {
            self.request_date = Some(now);
        }
    }

    async fn validate_team_assignment(&self, store: &dyn DocumentStore) -> Result<()> {
        let (Some(team), Some(assigned)) = (&self.maintenance_team, &self.assigned_to) else {
            return Ok(());
        };

        let team_doc = match store.get_record(doctypes::MAINTENANCE_TEAM, team).await {
            Ok(doc) => doc,
            Err(MaintError::DocumentNotFound { .. }) => {
                return Err(MaintError::ValidationError(format!(
                    "Maintenance team {team} does not exist"
                )))
            }
            Err(e) => return Err(e),
        };

        let members: Vec<crate::services::maintenance_api::TeamMember> =
            serde_json::from_value(team_doc["maintenance_team_members"].clone())
                .unwrap_or_default();

        if !members.iter().any(|m| &m.team_member == assigned) {
            return Err(MaintError::ValidationError(format!(
                "Selected user is not part of {team}"
            )));
        }

        Ok(())
    }
}
