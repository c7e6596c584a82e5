use axum::extract::State;

use crate::api::DepartmentDetail;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /employee/department/all - departments with employee counts
pub async fn all_departments(State(state): State<AppState>) -> ApiResult<Vec<DepartmentDetail>> {
    tracing::info!("Find all departments endpoint accessed");
    Ok(ApiResponse::success(state.departments.all_department_details().await?))
}
