use std::sync::Arc;

use tracing::{info, warn};

use crate::api::LoginResponse;
use crate::auth::{self, Claims, JwtSettings};
use crate::database::OrgStore;
use crate::services::ServiceError;

/// Credential checks and token issuance
#[derive(Clone)]
pub struct AuthGateway {
    store: Arc<dyn OrgStore>,
    jwt: JwtSettings,
}

impl AuthGateway {
    pub fn new(store: Arc<dyn OrgStore>, jwt: JwtSettings) -> Self {
        Self { store, jwt }
    }

    /// Unknown emails and wrong passwords both yield `InvalidCredentials`
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ServiceError> {
        let email = email.trim().to_lowercase();

        let Some(employee) = self.store.employee_by_email(&email).await? else {
            warn!("Login failed: unknown email");
            return Err(ServiceError::InvalidCredentials);
        };

        if !auth::verify_password(password, &employee.password_hash) {
            warn!("Login failed: bad password for employee {}", employee.id);
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self.jwt.generate(&self.jwt.claims_for(&employee))?;
        info!("Employee {} logged in", employee.id);

        Ok(LoginResponse {
            token,
            token_type: "Bearer",
            expires_in: self.jwt.expires_in_secs(),
            employee,
        })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, auth::JwtError> {
        self.jwt.validate(token)
    }
}
