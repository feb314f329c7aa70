//! # Maintenance API Operations
//!
//! Cross-record operations the host application exposes as whitelisted
//! endpoints: job order creation from a request, material requisitions,
//! link management, and team/technician resolution.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::constants::{doctypes, system};
use crate::error::{MaintError, Result};
use crate::lifecycle::scheduling::sla_end_date;
use crate::logging::{log_document_operation, log_error};
use crate::models::{JobOrder, MaintenanceRequest, MaterialRequisitionRef, RequiredMaterial};
use crate::services::document_store::DocumentStore;
use crate::state_machine::RequestState;

/// Roster row of a maintenance team
///
/// `team_member` is a user id; the matching employee record is resolved
/// through the employee's `user_id` link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub team_member: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub maintenance_role: Option<String>,
}

/// Create a job order from the given maintenance request
///
/// Reads the request without modifying it beyond the back-link update,
/// resolves the team and technician with fallbacks, and stamps the
/// scheduling defaults onto the new order.
pub async fn create_job_order(
    store: &dyn DocumentStore,
    maintenance_request: &str,
) -> Result<String> {
    let doc = store
        .get_record(doctypes::MAINTENANCE_REQUEST, maintenance_request)
        .await?;
    let request: MaintenanceRequest = serde_json::from_value(doc)?;

    if request.asset.is_none() {
        return Err(MaintError::ValidationError(
            "Asset is required before creating Job Order".to_string(),
        ));
    }

    let maintenance_team = match &request.maintenance_team {
        Some(team) => team.clone(),
        None => get_default_maintenance_team(store).await?,
    };

    // Validated assignee from the request, falling back to the first
    // available roster technician.
    let mut assigned_to = validate_technician(store, request.assigned_to.as_deref()).await?;
    if assigned_to.is_none() {
        assigned_to = get_default_technician(store, &maintenance_team).await?;
        if assigned_to.is_none() {
            log_error(
                "maintenance_api",
                "create_job_order",
                "No valid technician assigned",
                Some(maintenance_request),
            );
        }
    }

    let now = Utc::now().naive_utc();
    let mut job_order = JobOrder::new("");
    job_order.maintenance_request = Some(request.name.clone());
    job_order.asset = request.asset.clone();
    job_order.maintenance_team = Some(maintenance_team);
    job_order.assigned_to = assigned_to;
    job_order.priority = request.priority;
    job_order.description = Some(
        request
            .description
            .clone()
            .unwrap_or_else(|| "Maintenance work required".to_string()),
    );
    job_order.start_date = Some(now + Duration::days(1));
    job_order.expected_end_date = Some(sla_end_date(request.priority, now));
    job_order.required_materials = request.items.clone();

    // Seed the default service item when the request carries no materials
    if job_order.required_materials.is_empty() {
        job_order.required_materials.push(RequiredMaterial {
            item_code: system::DEFAULT_MAINTENANCE_ITEM.to_string(),
            quantity: 1.0,
            uom: system::DEFAULT_UOM.to_string(),
            warehouse: None,
            rate: None,
            amount: None,
            required_date: Some(now),
        });
    }

    let name = store
        .insert(doctypes::JOB_ORDER, serde_json::to_value(&job_order)?)
        .await?;

    store
        .update_values(
            doctypes::MAINTENANCE_REQUEST,
            maintenance_request,
            &[
                ("job_order", json!(name.clone())),
                ("status", json!(RequestState::Assigned)),
            ],
        )
        .await?;

    log_document_operation(
        "create_job_order",
        doctypes::JOB_ORDER,
        Some(&name),
        "created",
        Some(maintenance_request),
    );
    Ok(name)
}

/// Create a material requisition for the given job order
pub async fn create_material_requisition(
    store: &dyn DocumentStore,
    job_order_name: &str,
) -> Result<String> {
    let doc = store.get_record(doctypes::JOB_ORDER, job_order_name).await?;
    let mut job_order: JobOrder = serde_json::from_value(doc)?;

    if job_order.required_materials.is_empty() {
        return Err(MaintError::ValidationError(
            "No materials required for this job".to_string(),
        ));
    }

    let now = Utc::now().naive_utc();
    let items: Vec<Value> = job_order
        .required_materials
        .iter()
        .map(|item| {
            json!({
                "item_code": item.item_code,
                "qty": item.quantity,
                "uom": item.uom,
                "warehouse": item
                    .warehouse
                    .clone()
                    .unwrap_or_else(|| system::DEFAULT_WAREHOUSE.to_string()),
                "rate": item.rate.unwrap_or(0.0),
            })
        })
        .collect();

    let requisition = json!({
        "material_request_type": "Material Transfer",
        "job_order": job_order_name,
        "schedule_date": now + Duration::days(1),
        "items": items,
    });

    let requisition_name = store.insert(doctypes::MATERIAL_REQUEST, requisition).await?;

    job_order.material_requisitions.push(MaterialRequisitionRef {
        material_request: requisition_name.clone(),
        status: "Draft".to_string(),
        date: now,
    });
    store
        .save(
            doctypes::JOB_ORDER,
            job_order_name,
            serde_json::to_value(&job_order)?,
        )
        .await?;

    log_document_operation(
        "create_material_requisition",
        doctypes::MATERIAL_REQUEST,
        Some(&requisition_name),
        "created",
        Some(job_order_name),
    );
    Ok(requisition_name)
}

/// Unlink the maintenance request from the given job order
///
/// Clears the reverse link on the request when present, then clears the
/// job order's own reference. Returns a confirmation message.
pub async fn unlink_maintenance_request(
    store: &dyn DocumentStore,
    job_order_name: &str,
) -> Result<String> {
    let doc = store.get_record(doctypes::JOB_ORDER, job_order_name).await?;
    let mut job_order: JobOrder = serde_json::from_value(doc)?;

    if let Some(request_name) = job_order.maintenance_request.take() {
        match store
            .get_record(doctypes::MAINTENANCE_REQUEST, &request_name)
            .await
        {
            Ok(request_doc) => {
                let has_reverse_link = request_doc
                    .get("job_order")
                    .map_or(false, |v| !v.is_null());
                if has_reverse_link {
                    store
                        .update_values(
                            doctypes::MAINTENANCE_REQUEST,
                            &request_name,
                            &[("job_order", Value::Null)],
                        )
                        .await?;
                }
            }
            // A dangling link leaves nothing to clear
            Err(MaintError::DocumentNotFound { .. }) => {}
            Err(e) => return Err(e),
        }
    }

    store
        .save(
            doctypes::JOB_ORDER,
            job_order_name,
            serde_json::to_value(&job_order)?,
        )
        .await?;

    Ok("Maintenance Request unlinked from Job Order successfully.".to_string())
}

/// Return the default maintenance team, creating it when absent
///
/// A newly created team is populated with up to
/// [`system::DEFAULT_ROSTER_LIMIT`] active maintenance employees. Roster
/// creation failures are logged and the name is still returned.
pub async fn get_default_maintenance_team(store: &dyn DocumentStore) -> Result<String> {
    let team_name = system::DEFAULT_MAINTENANCE_TEAM;
    if store.exists(doctypes::MAINTENANCE_TEAM, team_name).await? {
        return Ok(team_name.to_string());
    }

    let employees = store
        .list(
            doctypes::EMPLOYEE,
            &[
                ("department", json!("Maintenance")),
                ("status", json!("Active")),
            ],
        )
        .await?;

    let members: Vec<TeamMember> = employees
        .iter()
        .filter_map(|employee| {
            let user = employee.get("user_id").and_then(|v| v.as_str())?;
            Some(TeamMember {
                team_member: user.to_string(),
                full_name: employee
                    .get("employee_name")
                    .and_then(|v| v.as_str())
                    .map(ToString::to_string),
                maintenance_role: Some(system::DEFAULT_MAINTENANCE_ROLE.to_string()),
            })
        })
        .take(system::DEFAULT_ROSTER_LIMIT)
        .collect();

    let team = json!({
        "name": team_name,
        "maintenance_team_name": team_name,
        "maintenance_team_members": members,
    });

    if let Err(e) = store.insert(doctypes::MAINTENANCE_TEAM, team).await {
        log_error(
            "maintenance_api",
            "get_default_maintenance_team",
            &e.to_string(),
            Some("Failed to create default maintenance team"),
        );
    }

    Ok(team_name.to_string())
}

/// Return the first available technician's employee record from the team
pub async fn get_default_technician(
    store: &dyn DocumentStore,
    team_name: &str,
) -> Result<Option<String>> {
    if !store.exists(doctypes::MAINTENANCE_TEAM, team_name).await? {
        return Ok(None);
    }

    let team_doc = store
        .get_record(doctypes::MAINTENANCE_TEAM, team_name)
        .await?;
    let members: Vec<TeamMember> =
        serde_json::from_value(team_doc["maintenance_team_members"].clone()).unwrap_or_default();

    let Some(first) = members.first() else {
        return Ok(None);
    };
    employee_for_user(store, &first.team_member).await
}

/// Resolve a technician user to an employee record
///
/// Returns `None` for an absent user, logging when a user exists but no
/// employee record links back to it.
pub async fn validate_technician(
    store: &dyn DocumentStore,
    user: Option<&str>,
) -> Result<Option<String>> {
    let Some(user) = user.filter(|u| !u.is_empty()) else {
        return Ok(None);
    };

    if !store.exists(doctypes::USER, user).await? {
        return Ok(None);
    }

    match employee_for_user(store, user).await? {
        Some(employee) => Ok(Some(employee)),
        None => {
            log_error(
                "maintenance_api",
                "validate_technician",
                "User found but no Employee record linked for technician",
                Some(user),
            );
            Ok(None)
        }
    }
}

async fn employee_for_user(store: &dyn DocumentStore, user: &str) -> Result<Option<String>> {
    let employees = store
        .list(doctypes::EMPLOYEE, &[("user_id", json!(user))])
        .await?;
    Ok(employees
        .first()
        .and_then(|doc| doc.get("name"))
        .and_then(|v| v.as_str())
        .map(ToString::to_string))
}
