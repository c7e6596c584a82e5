use axum::extract::State;
use std::collections::HashMap;

use crate::api::extract::Json;
use crate::api::{LoginRequest, LoginResponse};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /employee/login - exchange email and password for a bearer token
///
/// Expected Input:
/// ```json
/// { "email": "alice@example.com", "password": "..." }
/// ```
///
/// Expected Output (Success):
/// ```json
/// {
///   "success": true,
///   "status": 200,
///   "data": {
///     "token": "eyJhbGciOiJIUzI1NiI...",
///     "tokenType": "Bearer",
///     "expiresIn": 604800,
///     "employee": { "id": 1, "name": "Alice", "role": "CEO", ... }
///   }
/// }
/// ```
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> ApiResult<LoginResponse> {
    tracing::info!("Login endpoint accessed");

    let mut field_errors = HashMap::new();
    let email = request.email.filter(|e| !e.trim().is_empty());
    let password = request.password.filter(|p| !p.is_empty());
    if email.is_none() {
        field_errors.insert("email".to_string(), "Email is required".to_string());
    }
    if password.is_none() {
        field_errors.insert("password".to_string(), "Password is required".to_string());
    }

    let (Some(email), Some(password)) = (email, password) else {
        return Err(ApiError::validation_error("Missing login credentials", Some(field_errors)));
    };

    let response = state.auth.login(&email, &password).await?;
    Ok(ApiResponse::success(response))
}
