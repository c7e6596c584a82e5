use axum::extract::State;

use crate::api::extract::Path;
use crate::database::models::Employee;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /employee/:id
pub async fn get_employee(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Employee> {
    tracing::info!("Fetch employee endpoint accessed");
    Ok(ApiResponse::success(state.directory.get(id).await?))
}
