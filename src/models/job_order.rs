//! Job Order Model
//!
//! A unit of scheduled maintenance work, optionally linked back to the
//! maintenance request that produced it. Completion stamps the
//! response-time KPI when a linked request carries a `request_date`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::{DocStatus, Priority};
use crate::error::{MaintError, Result};
use crate::events::publisher::EventPublisher;
use crate::models::job_order_task::JobOrderTask;
use crate::state_machine::JobOrderState;

/// A material row required by a job order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredMaterial {
    pub item_code: String,
    pub quantity: f64,
    pub uom: String,
    #[serde(default)]
    pub warehouse: Option<String>,
    #[serde(default)]
    pub rate: Option<f64>,
    /// Derived: quantity × rate, recomputed at validation time
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub required_date: Option<NaiveDateTime>,
}

/// Reference to a material requisition raised for a job order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRequisitionRef {
    pub material_request: String,
    pub status: String,
    pub date: NaiveDateTime,
}

/// A job order record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOrder {
    /// Unique record name
    pub name: String,

    /// Lifecycle status
    #[serde(default)]
    pub status: JobOrderState,

    /// Scheduled work start
    #[serde(default)]
    pub start_date: Option<NaiveDateTime>,

    /// Expected (and, once completed, actual) work end
    #[serde(default)]
    pub expected_end_date: Option<NaiveDateTime>,

    /// Back-reference to the originating maintenance request
    #[serde(default)]
    pub maintenance_request: Option<String>,

    /// Asset the work is performed on
    #[serde(default)]
    pub asset: Option<String>,

    /// Team performing the work
    #[serde(default)]
    pub maintenance_team: Option<String>,

    /// Technician performing the work (an employee id)
    #[serde(default)]
    pub assigned_to: Option<String>,

    /// Priority inherited from the request
    #[serde(default)]
    pub priority: Priority,

    /// Work description
    #[serde(default)]
    pub description: Option<String>,

    /// Elapsed hours between request logging and completion, 2dp
    #[serde(default)]
    pub actual_response_time: Option<f64>,

    /// Materials required for the work, in entry order
    #[serde(default)]
    pub required_materials: Vec<RequiredMaterial>,

    /// Requisitions raised against this order
    #[serde(default)]
    pub material_requisitions: Vec<MaterialRequisitionRef>,

    /// Child task rows
    #[serde(default)]
    pub tasks: Vec<JobOrderTask>,

    /// Submission state
    #[serde(default)]
    pub docstatus: DocStatus,
}

impl JobOrder {
    /// Create a new draft job order with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: JobOrderState::default(),
            start_date: None,
            expected_end_date: None,
            maintenance_request: None,
            asset: None,
            maintenance_team: None,
            assigned_to: None,
            priority: Priority::default(),
            description: None,
            actual_response_time: None,
            required_materials: Vec::new(),
            material_requisitions: Vec::new(),
            tasks: Vec::new(),
            docstatus: DocStatus::default(),
        }
    }

    /// Run pre-save validation rules
    ///
    /// Checks date ordering and recomputes the derived material amounts
    /// and task durations.
    pub fn validate(&mut self) -> Result<()> {
        self.validate_dates()?;
        self.calculate_material_amounts();
        self.update_task_durations();
        Ok(())
    }

    /// Submission rule: only completed orders may submit; missing
    /// requisitions are surfaced as a warning, not an error
    pub async fn before_submit(&self, publisher: &EventPublisher) -> Result<()> {
        if self.status != JobOrderState::Completed {
            return Err(MaintError::ValidationError(
                "Only Completed Job Orders can be submitted".to_string(),
            ));
        }

        if self.material_requisitions.is_empty() {
            publisher
                .publish_warning("No material requisitions created for this job")
                .await
                .map_err(|e| MaintError::EventError(e.to_string()))?;
        }

        Ok(())
    }

    fn validate_dates(&self) -> Result<()> {
        if let (Some(end), Some(start)) = (self.expected_end_date, self.start_date) {
            if end < start {
                return Err(MaintError::ValidationError(
                    "Expected End Date cannot be before Start Date".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn calculate_material_amounts(&mut self) {
        for item in &mut self.required_materials {
            if let Some(rate) = item.rate {
                if item.quantity > 0.0 {
                    item.amount = Some(item.quantity * rate);
                }
            }
        }
    }

    fn update_task_durations(&mut self) {
        for task in &mut self.tasks {
            crate::lifecycle::task_duration::recompute_duration(task);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn datetime(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_validate_rejects_inverted_dates() {
        let mut job_order = JobOrder::new("JO-0001");
        job_order.start_date = Some(datetime(10, 8));
        job_order.expected_end_date = Some(datetime(9, 8));
        assert!(job_order.validate().is_err());

        job_order.expected_end_date = Some(datetime(11, 8));
        assert!(job_order.validate().is_ok());
    }

    #[test]
    fn test_material_amounts_recomputed() {
        let mut job_order = JobOrder::new("JO-0001");
        job_order.required_materials.push(RequiredMaterial {
            item_code: "BEARING-6204".to_string(),
            quantity: 4.0,
            uom: "Nos".to_string(),
            warehouse: None,
            rate: Some(12.5),
            amount: None,
            required_date: None,
        });
        job_order.required_materials.push(RequiredMaterial {
            item_code: "GREASE".to_string(),
            quantity: 1.0,
            uom: "Kg".to_string(),
            warehouse: None,
            rate: None,
            amount: None,
            required_date: None,
        });

        job_order.validate().unwrap();
        assert_eq!(job_order.required_materials[0].amount, Some(50.0));
        assert_eq!(job_order.required_materials[1].amount, None);
    }

    #[test]
    fn test_task_durations_recomputed_on_validate() {
        let mut job_order = JobOrder::new("JO-0001");
        job_order.tasks.push(JobOrderTask {
            description: Some("Replace bearing".to_string()),
            start_time: Some(datetime(10, 9)),
            end_time: Some(datetime(10, 11)),
            duration: None,
        });

        job_order.validate().unwrap();
        assert_eq!(job_order.tasks[0].duration, Some(2.0));
    }

    #[tokio::test]
    async fn test_before_submit_requires_completion() {
        let publisher = EventPublisher::default();
        let job_order = JobOrder::new("JO-0001");
        assert!(job_order.before_submit(&publisher).await.is_err());

        let mut completed = JobOrder::new("JO-0002");
        completed.status = JobOrderState::Completed;
        assert!(completed.before_submit(&publisher).await.is_ok());
    }

    #[tokio::test]
    async fn test_before_submit_warns_on_missing_requisitions() {
        let publisher = EventPublisher::default();
        let mut receiver = publisher.subscribe();

        let mut completed = JobOrder::new("JO-0001");
        completed.status = JobOrderState::Completed;
        completed.before_submit(&publisher).await.unwrap();

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.name, crate::constants::events::NOTICE_WARNING);
    }
}
