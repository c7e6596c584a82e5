use axum::extract::State;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET / - service description
pub async fn root(State(state): State<AppState>) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "name": "Org Chart API",
        "version": env!("CARGO_PKG_VERSION"),
        "organisation": state.config.organisation.name,
        "endpoints": {
            "employees": "/employee/add, /employee/:id, /employee/update?id=, /employee/remove/:id, /employee/all",
            "login": "/employee/login",
            "departments": "/employee/department/all",
            "hierarchy": "/hierarchy[?departmentId=|?id=]",
        }
    })))
}

/// GET /health - liveness plus a store round-trip
pub async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    if let Err(e) = state.store.health_check().await {
        tracing::error!("Health check failed: {}", e);
        return Err(ApiError::service_unavailable("Store unavailable"));
    }

    Ok(ApiResponse::success(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "store": "ok"
    })))
}
