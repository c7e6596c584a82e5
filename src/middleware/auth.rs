use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::Claims;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated employee extracted from a bearer token
#[derive(Clone, Debug)]
pub struct AuthEmployee {
    pub employee_id: i64,
    pub email: String,
    pub role: crate::database::models::Role,
}

impl From<Claims> for AuthEmployee {
    fn from(claims: Claims) -> Self {
        Self {
            employee_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Guards administrative writes (update, remove). Only active when
/// `security.require_auth_for_writes` is set; the caller must then present a
/// valid token belonging to a CEO or manager.
pub async fn require_admin(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.config.security.require_auth_for_writes {
        return Ok(next.run(request).await);
    }

    let token = extract_jwt_from_headers(&headers).map_err(ApiError::unauthorized)?;
    let claims = state
        .auth
        .verify(&token)
        .map_err(|e| ApiError::unauthorized(e.to_string()))?;

    if !claims.role.can_manage() {
        tracing::warn!("Employee {} attempted an administrative write", claims.sub);
        return Err(ApiError::forbidden("Only a CEO or manager may modify employees"));
    }

    request.extensions_mut().insert(AuthEmployee::from(claims));
    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        assert!(extract_jwt_from_headers(&headers).is_err());

        headers.insert("authorization", HeaderValue::from_static("Basic abc"));
        assert!(extract_jwt_from_headers(&headers).is_err());

        headers.insert("authorization", HeaderValue::from_static("Bearer  "));
        assert!(extract_jwt_from_headers(&headers).is_err());

        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_jwt_from_headers(&headers).unwrap(), "abc.def.ghi");
    }
}
