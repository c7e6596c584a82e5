use std::collections::HashMap;
use thiserror::Error;

use crate::auth::JwtError;
use crate::database::StoreError;

/// Failures of the directory, auth and hierarchy services
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{message}")]
    Validation {
        message: String,
        field_errors: HashMap<String, String>,
    },

    #[error("Employee not found: {0}")]
    EmployeeNotFound(i64),

    #[error("Department not found: {0}")]
    DepartmentNotFound(i64),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Employee {0} still has direct reports and no manager to hand them to")]
    HasDirectReports(i64),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Token(#[from] JwtError),

    #[error(transparent)]
    Store(StoreError),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        ServiceError::Validation {
            message: message.into(),
            field_errors,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmployeeNotFound(id) => ServiceError::EmployeeNotFound(id),
            StoreError::DuplicateEmail(email) => ServiceError::DuplicateEmail(email),
            other => ServiceError::Store(other),
        }
    }
}
