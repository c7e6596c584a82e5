use axum::{extract::State, Extension};
use serde::Deserialize;

use crate::api::extract::{Json, Query};
use crate::api::EmployeeForm;
use crate::database::models::Employee;
use crate::middleware::{ApiResponse, ApiResult, AuthEmployee};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateQuery {
    pub id: i64,
}

/// PUT /employee/update?id= - overwrite an existing employee's details
///
/// Answers 202 Accepted on success, 404 when the employee does not exist.
pub async fn update_employee(
    State(state): State<AppState>,
    Query(query): Query<UpdateQuery>,
    actor: Option<Extension<AuthEmployee>>,
    Json(form): Json<EmployeeForm>,
) -> ApiResult<Employee> {
    match actor {
        Some(Extension(actor)) => tracing::info!(
            "Update employee {} requested by employee {} <{}> ({})",
            query.id,
            actor.employee_id,
            actor.email,
            actor.role
        ),
        None => tracing::info!("Update employee endpoint accessed"),
    }

    let employee = state.directory.update(query.id, form).await?;
    Ok(ApiResponse::accepted(employee))
}
