use axum::extract::State;

use crate::api::EmployeeSummary;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /employee/all - directory listing ordered by id
pub async fn all_employees(State(state): State<AppState>) -> ApiResult<Vec<EmployeeSummary>> {
    tracing::info!("Find all employees endpoint accessed");
    Ok(ApiResponse::success(state.directory.list().await?))
}
