// Startup fixtures: a YAML description of departments and employees.
//
// ```yaml
// departments: [Engineering, Sales]
// employees:
//   - name: Alice
//     email: alice@example.com
//     password: change-me
//     role: CEO
//   - name: Bob
//     email: bob@example.com
//     password: change-me
//     role: MANAGER
//     department: Engineering
//     manager: alice@example.com
// ```
//
// Employees are added in file order through the employee directory, so a
// manager must appear before its reports. Employees whose email already
// exists are skipped, which makes re-applying a fixture harmless.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::api::EmployeeForm;
use crate::state::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub departments: Vec<String>,
    #[serde(default)]
    pub employees: Vec<EmployeeFixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeFixture {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub designation: Option<String>,
    pub mobile_number: Option<String>,
    /// Department name
    pub department: Option<String>,
    /// Email of the reporting manager
    pub manager: Option<String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct FixtureReport {
    pub departments: usize,
    pub added: usize,
    pub skipped: usize,
}

impl Fixture {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).with_context(|| format!("failed to read fixture {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid fixture {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub async fn apply(&self, state: &AppState) -> Result<FixtureReport> {
        let mut report = FixtureReport::default();

        for name in &self.departments {
            state.store.ensure_department(name).await?;
            report.departments += 1;
        }

        let department_ids: HashMap<String, i64> = state
            .store
            .departments()
            .await?
            .into_iter()
            .map(|d| (d.name, d.id))
            .collect();

        for entry in &self.employees {
            let email = entry.email.trim().to_lowercase();
            if state.store.employee_by_email(&email).await?.is_some() {
                report.skipped += 1;
                continue;
            }

            let department_id = match &entry.department {
                Some(name) => Some(
                    *department_ids
                        .get(name.trim())
                        .ok_or_else(|| anyhow!("{}: unknown department '{}'", entry.email, name))?,
                ),
                None => None,
            };

            let reporting_manager_id = match &entry.manager {
                Some(manager) => {
                    let manager = state
                        .store
                        .employee_by_email(&manager.trim().to_lowercase())
                        .await?
                        .ok_or_else(|| anyhow!("{}: manager '{}' must be listed earlier", entry.email, manager))?;
                    Some(manager.id)
                }
                None => None,
            };

            let form = EmployeeForm {
                name: Some(entry.name.clone()),
                email: Some(email),
                password: Some(entry.password.clone()),
                designation: entry.designation.clone(),
                mobile_number: entry.mobile_number.clone(),
                role: Some(entry.role.clone()),
                department_id,
                reporting_manager_id,
            };
            state
                .directory
                .add(form)
                .await
                .with_context(|| format!("failed to add fixture employee {}", entry.email))?;
            report.added += 1;
        }

        Ok(report)
    }
}
