use axum::extract::State;

use crate::api::extract::Json;
use crate::api::EmployeeForm;
use crate::database::models::Employee;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /employee/add - sign up a new employee
///
/// Returns 201 with the stored employee (no credential). Validation failures
/// are reported per field:
/// ```json
/// { "success": false, "status": 400, "code": "VALIDATION_ERROR",
///   "fieldErrors": { "email": "Email is required" } }
/// ```
pub async fn add_employee(State(state): State<AppState>, Json(form): Json<EmployeeForm>) -> ApiResult<Employee> {
    tracing::info!("Add employee endpoint accessed");
    let employee = state.directory.add(form).await?;
    Ok(ApiResponse::created(employee))
}
