// Request and response shapes for the HTTP surface. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::database::models::{Employee, Role};

/// Body of `POST /employee/add` and `PUT /employee/update`.
///
/// Every field is optional at the serde level so that missing fields surface
/// as field-level validation errors rather than a bare JSON rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub designation: Option<String>,
    pub mobile_number: Option<String>,
    pub role: Option<String>,
    pub department_id: Option<i64>,
    pub reporting_manager_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub employee: Employee,
}

/// Directory projection of an employee, without credentials
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub designation: Option<String>,
    pub role: Role,
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
    pub reporting_manager_id: Option<i64>,
    pub reporting_manager_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDetail {
    pub id: i64,
    pub name: String,
    pub employee_count: usize,
    pub manager_count: usize,
}

/// Root of the organisation view: CEOs plus every department
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationHierarchy {
    pub organisation: String,
    pub ceos: Vec<EmployeeSummary>,
    pub departments: Vec<DepartmentDetail>,
    /// Non-CEO employees whose department is missing or no longer exists
    pub unassigned_employees: usize,
}

/// Employees related to a given employee, tagged by traversal direction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "relation", content = "employees", rename_all = "camelCase")]
pub enum RelatedEmployees {
    /// Employees reporting directly to a CEO or manager
    DirectReports(Vec<EmployeeSummary>),
    /// Managers from the immediate one up to the CEO
    ReportingChain(Vec<EmployeeSummary>),
}

/// Payload of `GET /hierarchy`, which depends on the query parameters used
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum HierarchyView {
    Organisation(OrganisationHierarchy),
    Managers(Vec<EmployeeSummary>),
    Related(RelatedEmployees),
}
