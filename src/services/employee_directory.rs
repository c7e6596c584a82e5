use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::api::{EmployeeForm, EmployeeSummary};
use crate::auth;
use crate::database::models::{Employee, EmployeeChanges, NewEmployee, Role};
use crate::database::OrgStore;
use crate::hierarchy::OrgChart;
use crate::services::{load_chart, ServiceError};

const MAX_NAME_LENGTH: usize = 100;
const MAX_EMAIL_LENGTH: usize = 254;

/// CRUD over employee records. Every write is validated against a fresh
/// snapshot of the organisation so the reporting forest stays acyclic.
///
/// Writes are serialized: the snapshot, the validation and the store write
/// all happen under `writes`, so a check can never be invalidated by another
/// write landing in between.
#[derive(Clone)]
pub struct EmployeeDirectory {
    store: Arc<dyn OrgStore>,
    password_min_length: usize,
    writes: Arc<Mutex<()>>,
}

/// Employee fields after validation, before hashing
#[derive(Debug)]
struct ValidatedEmployee {
    name: String,
    email: String,
    password: Option<String>,
    designation: Option<String>,
    mobile_number: Option<String>,
    role: Role,
    department_id: Option<i64>,
    reporting_manager_id: Option<i64>,
}

#[derive(Default)]
struct FieldErrors(HashMap<String, String>);

impl FieldErrors {
    fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    fn into_result(self) -> Result<(), ServiceError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::validation("Invalid employee details", self.0))
        }
    }
}

impl EmployeeDirectory {
    pub fn new(store: Arc<dyn OrgStore>, password_min_length: usize) -> Self {
        Self {
            store,
            password_min_length,
            writes: Arc::new(Mutex::new(())),
        }
    }

    pub async fn add(&self, form: EmployeeForm) -> Result<Employee, ServiceError> {
        let password_hash = self.prehash(form.password.as_deref())?;

        let _writes = self.writes.lock().await;
        let chart = load_chart(self.store.as_ref()).await?;
        let valid = self.validate(form, None, &chart)?;
        ensure_email_free(&chart, &valid.email, None)?;

        // A validated new employee always carries an acceptable password
        let password_hash = valid
            .password
            .and(password_hash)
            .ok_or_else(|| ServiceError::validation("Invalid employee details", HashMap::new()))?;
        let new = NewEmployee {
            password_hash,
            name: valid.name,
            email: valid.email,
            designation: valid.designation,
            mobile_number: valid.mobile_number,
            role: valid.role,
            department_id: valid.department_id,
            reporting_manager_id: valid.reporting_manager_id,
        };

        let employee = self.store.insert_employee(new).await?;
        info!("Employee {} added as {}", employee.id, employee.role);
        Ok(employee)
    }

    pub async fn get(&self, id: i64) -> Result<Employee, ServiceError> {
        self.store
            .employee(id)
            .await?
            .ok_or(ServiceError::EmployeeNotFound(id))
    }

    /// Overwrite the mutable fields of an existing employee. Fields missing
    /// from the form keep their current value; the password is only changed
    /// when supplied.
    pub async fn update(&self, id: i64, form: EmployeeForm) -> Result<Employee, ServiceError> {
        let password_hash = self.prehash(form.password.as_deref())?;

        let _writes = self.writes.lock().await;
        let chart = load_chart(self.store.as_ref()).await?;
        let current = chart.employee(id).ok_or(ServiceError::EmployeeNotFound(id))?;
        let valid = self.validate(form, Some(current), &chart)?;
        ensure_email_free(&chart, &valid.email, Some(id))?;

        let changes = EmployeeChanges {
            password_hash: valid.password.and(password_hash),
            name: valid.name,
            email: valid.email,
            designation: valid.designation,
            mobile_number: valid.mobile_number,
            role: valid.role,
            department_id: valid.department_id,
            reporting_manager_id: valid.reporting_manager_id,
        };

        let employee = self.store.update_employee(id, changes).await?;
        info!("Employee {} updated", id);
        Ok(employee)
    }

    /// Remove an employee. Its direct reports move under its own manager;
    /// a CEO with direct reports cannot be removed.
    pub async fn delete(&self, id: i64) -> Result<String, ServiceError> {
        let _writes = self.writes.lock().await;
        let chart = load_chart(self.store.as_ref()).await?;
        let employee = chart.employee(id).ok_or(ServiceError::EmployeeNotFound(id))?;

        let reassign_to = employee.reporting_manager_id;
        if reassign_to.is_none() && chart.has_direct_reports(id) {
            return Err(ServiceError::HasDirectReports(id));
        }

        self.store.delete_employee(id, reassign_to).await?;
        info!("Employee {} removed, reports reassigned to {:?}", id, reassign_to);
        Ok(format!("Employee {} removed successfully", id))
    }

    pub async fn list(&self) -> Result<Vec<EmployeeSummary>, ServiceError> {
        let chart = load_chart(self.store.as_ref()).await?;
        Ok(chart.summaries())
    }

    /// Hash a supplied password before the write lock is taken. Passwords
    /// too short to pass validation are skipped and reported by `validate`.
    fn prehash(&self, password: Option<&str>) -> Result<Option<String>, ServiceError> {
        match password {
            Some(p) if !p.is_empty() && p.chars().count() >= self.password_min_length => hash(p).map(Some),
            _ => Ok(None),
        }
    }

    fn validate(
        &self,
        form: EmployeeForm,
        current: Option<&Employee>,
        chart: &OrgChart,
    ) -> Result<ValidatedEmployee, ServiceError> {
        let mut errors = FieldErrors::default();

        let name = non_blank(form.name).or_else(|| current.map(|c| c.name.clone()));
        match &name {
            None => errors.add("name", "Name is required"),
            Some(n) if n.chars().count() > MAX_NAME_LENGTH => {
                errors.add("name", format!("Name must be at most {} characters", MAX_NAME_LENGTH))
            }
            Some(_) => {}
        }

        let email = non_blank(form.email).map(|e| e.to_lowercase());
        if let Some(e) = &email {
            if !is_valid_email(e) {
                errors.add("email", "Email is not a valid address");
            }
        }
        let email = email.or_else(|| current.map(|c| c.email.clone()));
        if email.is_none() {
            errors.add("email", "Email is required");
        }

        let password = form.password.filter(|p| !p.is_empty());
        match &password {
            Some(p) if p.chars().count() < self.password_min_length => errors.add(
                "password",
                format!("Password must be at least {} characters", self.password_min_length),
            ),
            None if current.is_none() => errors.add("password", "Password is required"),
            _ => {}
        }

        let mobile_number = non_blank(form.mobile_number);
        if let Some(m) = &mobile_number {
            if !is_valid_mobile(m) {
                errors.add("mobileNumber", "Mobile number must contain 7 to 15 digits");
            }
        }
        let mobile_number = mobile_number.or_else(|| current.and_then(|c| c.mobile_number.clone()));
        let designation = non_blank(form.designation).or_else(|| current.and_then(|c| c.designation.clone()));

        let role = match non_blank(form.role) {
            Some(raw) => match raw.parse::<Role>() {
                Ok(role) => Some(role),
                Err(e) => {
                    errors.add("role", e.to_string());
                    None
                }
            },
            None => current.map(|c| c.role),
        };

        let department_id = form.department_id.or_else(|| current.and_then(|c| c.department_id));
        if let Some(department_id) = department_id {
            if chart.department(department_id).is_none() {
                errors.add("departmentId", format!("Department {} does not exist", department_id));
            }
        }

        let mut reporting_manager_id = None;
        match role {
            None => {
                if current.is_none() && errors.0.get("role").is_none() {
                    errors.add("role", "Role is required");
                }
            }
            Some(Role::Ceo) => {
                if form.reporting_manager_id.is_some() {
                    errors.add("reportingManagerId", "A CEO cannot have a reporting manager");
                }
            }
            Some(role) => {
                if department_id.is_none() {
                    errors.add("departmentId", "Department is required");
                }

                reporting_manager_id = form
                    .reporting_manager_id
                    .or_else(|| current.and_then(|c| c.reporting_manager_id));
                match reporting_manager_id {
                    None => errors.add("reportingManagerId", "Reporting manager is required"),
                    Some(manager_id) => {
                        if let Some(message) = check_manager(chart, current, manager_id) {
                            errors.add("reportingManagerId", message);
                        }
                    }
                }

                if let Some(current) = current {
                    if role == Role::Employee && chart.has_direct_reports(current.id) {
                        errors.add("role", "An employee with direct reports cannot be given the EMPLOYEE role");
                    }
                }
            }
        }

        errors.into_result()?;

        // Presence of every required field was checked above
        match (name, email, role) {
            (Some(name), Some(email), Some(role)) => Ok(ValidatedEmployee {
                name,
                email,
                password,
                designation,
                mobile_number,
                role,
                department_id,
                reporting_manager_id,
            }),
            _ => Err(ServiceError::validation("Invalid employee details", HashMap::new())),
        }
    }
}

fn check_manager(chart: &OrgChart, current: Option<&Employee>, manager_id: i64) -> Option<String> {
    if current.is_some_and(|c| c.id == manager_id) {
        return Some("An employee cannot report to themselves".to_string());
    }

    let Some(manager) = chart.employee(manager_id) else {
        return Some(format!("Reporting manager {} does not exist", manager_id));
    };
    if !manager.role.can_manage() {
        return Some(format!("Reporting manager {} must be a CEO or MANAGER", manager_id));
    }
    if current.is_some_and(|c| chart.is_descendant(manager_id, c.id)) {
        return Some(format!("Reporting manager {} already reports to this employee", manager_id));
    }
    None
}

fn ensure_email_free(chart: &OrgChart, email: &str, except: Option<i64>) -> Result<(), ServiceError> {
    let taken = chart.employee_by_email(email).is_some_and(|e| Some(e.id) != except);
    if taken {
        return Err(ServiceError::DuplicateEmail(email.to_string()));
    }
    Ok(())
}

fn hash(password: &str) -> Result<String, ServiceError> {
    auth::hash_password(password).map_err(|e| ServiceError::PasswordHash(e.to_string()))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LENGTH || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn is_valid_mobile(mobile: &str) -> bool {
    let allowed = mobile
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));
    let digits = mobile.chars().filter(|c| c.is_ascii_digit()).count();
    allowed && (7..=15).contains(&digits)
}
