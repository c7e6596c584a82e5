use axum::{extract::State, Extension};

use crate::api::extract::Path;
use crate::middleware::{ApiResponse, ApiResult, AuthEmployee};
use crate::state::AppState;

/// DELETE /employee/remove/:id
///
/// Direct reports of the removed employee are handed to its own manager.
pub async fn remove_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    actor: Option<Extension<AuthEmployee>>,
) -> ApiResult<String> {
    match actor {
        Some(Extension(actor)) => tracing::info!(
            "Remove employee {} requested by employee {} <{}> ({})",
            id,
            actor.employee_id,
            actor.email,
            actor.role
        ),
        None => tracing::info!("Remove employee endpoint accessed"),
    }

    Ok(ApiResponse::success(state.directory.delete(id).await?))
}
