use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::{Department, Employee, EmployeeChanges, NewEmployee};

/// Errors raised by an [`OrgStore`] backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Employee not found: {0}")]
    EmployeeNotFound(i64),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Invalid department name: {0}")]
    InvalidDepartmentName(String),

    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence seam for employees and departments.
///
/// Implementations must allow concurrent readers and serialize writers.
/// Email uniqueness is enforced by the store itself so that two concurrent
/// signups cannot both succeed.
#[async_trait]
pub trait OrgStore: Send + Sync {
    /// Cheap round-trip used by the health endpoint
    async fn health_check(&self) -> Result<(), StoreError>;

    /// All departments ordered by id
    async fn departments(&self) -> Result<Vec<Department>, StoreError>;

    /// Return the department with this name, creating it if missing
    async fn ensure_department(&self, name: &str) -> Result<Department, StoreError>;

    /// All employees ordered by id
    async fn employees(&self) -> Result<Vec<Employee>, StoreError>;

    async fn employee(&self, id: i64) -> Result<Option<Employee>, StoreError>;

    async fn employee_by_email(&self, email: &str) -> Result<Option<Employee>, StoreError>;

    async fn insert_employee(&self, employee: NewEmployee) -> Result<Employee, StoreError>;

    async fn update_employee(&self, id: i64, changes: EmployeeChanges) -> Result<Employee, StoreError>;

    /// Remove an employee, moving its direct reports under `reassign_to`.
    /// Both steps happen atomically.
    async fn delete_employee(&self, id: i64, reassign_to: Option<i64>) -> Result<Employee, StoreError>;
}
