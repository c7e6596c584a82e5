use axum::extract::State;
use serde::Deserialize;

use crate::api::extract::Query;
use crate::api::HierarchyView;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyQuery {
    pub department_id: Option<i64>,
    pub id: Option<i64>,
}

/// GET /hierarchy                     - CEOs and every department
/// GET /hierarchy?departmentId=<id>   - managers of one department
/// GET /hierarchy?id=<id>             - direct reports of a CEO/manager, or
///                                      the reporting chain of an employee
pub async fn hierarchy(State(state): State<AppState>, Query(query): Query<HierarchyQuery>) -> ApiResult<HierarchyView> {
    let view = match (query.department_id, query.id) {
        (Some(_), Some(_)) => {
            return Err(ApiError::validation_error("Use either departmentId or id, not both", None));
        }
        (Some(department_id), None) => {
            tracing::info!("Managers of department {} requested", department_id);
            HierarchyView::Managers(state.hierarchy.managers_of_department(department_id).await?)
        }
        (None, Some(employee_id)) => {
            tracing::info!("Reports or reporting chain of employee {} requested", employee_id);
            HierarchyView::Related(state.hierarchy.child_employees_or_reporting_managers(employee_id).await?)
        }
        (None, None) => {
            tracing::info!("CEOs and departments requested");
            HierarchyView::Organisation(state.hierarchy.ceo_and_all_departments().await?)
        }
    };

    Ok(ApiResponse::success(view))
}
