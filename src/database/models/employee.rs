use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Position of an employee in the reporting hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Ceo,
    Manager,
    Employee,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown role '{0}', expected one of CEO, MANAGER, EMPLOYEE")]
pub struct RoleParseError(pub String);

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Ceo => "CEO",
            Role::Manager => "MANAGER",
            Role::Employee => "EMPLOYEE",
        }
    }

    /// Whether employees of this role may have direct reports
    pub fn can_manage(&self) -> bool {
        matches!(self, Role::Ceo | Role::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CEO" => Ok(Role::Ceo),
            "MANAGER" => Ok(Role::Manager),
            "EMPLOYEE" => Ok(Role::Employee),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = RoleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Stored employee record. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub designation: Option<String>,
    pub mobile_number: Option<String>,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub department_id: Option<i64>,
    pub reporting_manager_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn is_ceo(&self) -> bool {
        self.reporting_manager_id.is_none()
    }
}

/// Validated input for a new employee
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub designation: Option<String>,
    pub mobile_number: Option<String>,
    pub role: Role,
    pub department_id: Option<i64>,
    pub reporting_manager_id: Option<i64>,
}

/// Validated replacement of an employee's mutable fields.
/// `password_hash` is only rewritten when present.
#[derive(Debug, Clone)]
pub struct EmployeeChanges {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub designation: Option<String>,
    pub mobile_number: Option<String>,
    pub role: Role,
    pub department_id: Option<i64>,
    pub reporting_manager_id: Option<i64>,
}

impl EmployeeChanges {
    pub fn apply_to(self, employee: &mut Employee, now: DateTime<Utc>) {
        employee.name = self.name;
        employee.email = self.email;
        if let Some(hash) = self.password_hash {
            employee.password_hash = hash;
        }
        employee.designation = self.designation;
        employee.mobile_number = self.mobile_number;
        employee.role = self.role;
        employee.department_id = self.department_id;
        employee.reporting_manager_id = self.reporting_manager_id;
        employee.updated_at = now;
    }
}
