//! Read-only view of the organisation used for every hierarchy query.
//!
//! An [`OrgChart`] is built from a snapshot of the store and indexes the
//! reporting forest by manager. Stored data is not trusted to be acyclic or
//! fully consistent: dangling department or manager references are rendered
//! as unassigned, and every upward walk is bounded by the number of employees.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::api::{DepartmentDetail, EmployeeSummary, OrganisationHierarchy, RelatedEmployees};
use crate::database::models::{Department, Employee, Role};

#[derive(Debug, Default)]
pub struct OrgChart {
    employees: BTreeMap<i64, Employee>,
    departments: BTreeMap<i64, Department>,
    /// manager id -> direct report ids, ascending
    reports: HashMap<i64, Vec<i64>>,
}

impl OrgChart {
    pub fn new(employees: Vec<Employee>, departments: Vec<Department>) -> Self {
        let employees: BTreeMap<i64, Employee> = employees.into_iter().map(|e| (e.id, e)).collect();
        let departments = departments.into_iter().map(|d| (d.id, d)).collect();

        let mut reports: HashMap<i64, Vec<i64>> = HashMap::new();
        // BTreeMap iteration keeps each report list sorted by id
        for employee in employees.values() {
            if let Some(manager_id) = employee.reporting_manager_id {
                reports.entry(manager_id).or_default().push(employee.id);
            }
        }

        Self {
            employees,
            departments,
            reports,
        }
    }

    pub fn employee(&self, id: i64) -> Option<&Employee> {
        self.employees.get(&id)
    }

    pub fn department(&self, id: i64) -> Option<&Department> {
        self.departments.get(&id)
    }

    pub fn employee_by_email(&self, email: &str) -> Option<&Employee> {
        self.employees.values().find(|e| e.email == email)
    }

    pub fn summary(&self, employee: &Employee) -> EmployeeSummary {
        EmployeeSummary {
            id: employee.id,
            name: employee.name.clone(),
            email: employee.email.clone(),
            designation: employee.designation.clone(),
            role: employee.role,
            department_id: employee.department_id,
            department_name: employee
                .department_id
                .and_then(|id| self.departments.get(&id))
                .map(|d| d.name.clone()),
            reporting_manager_id: employee.reporting_manager_id,
            reporting_manager_name: employee
                .reporting_manager_id
                .and_then(|id| self.employees.get(&id))
                .map(|m| m.name.clone()),
        }
    }

    /// Every employee, ordered by id
    pub fn summaries(&self) -> Vec<EmployeeSummary> {
        self.employees.values().map(|e| self.summary(e)).collect()
    }

    /// Top-level employees: those without a reporting manager
    pub fn ceos(&self) -> Vec<EmployeeSummary> {
        self.employees
            .values()
            .filter(|e| e.is_ceo())
            .map(|e| self.summary(e))
            .collect()
    }

    pub fn department_details(&self) -> Vec<DepartmentDetail> {
        let mut counts: HashMap<i64, (usize, usize)> = HashMap::new();
        for employee in self.employees.values() {
            if let Some(department_id) = employee.department_id {
                let entry = counts.entry(department_id).or_default();
                entry.0 += 1;
                if employee.role == Role::Manager {
                    entry.1 += 1;
                }
            }
        }

        self.departments
            .values()
            .map(|d| {
                let (employee_count, manager_count) = counts.get(&d.id).copied().unwrap_or_default();
                DepartmentDetail {
                    id: d.id,
                    name: d.name.clone(),
                    employee_count,
                    manager_count,
                }
            })
            .collect()
    }

    /// Non-CEO employees whose department reference is null or dangling
    pub fn unassigned_count(&self) -> usize {
        self.employees
            .values()
            .filter(|e| !e.is_ceo())
            .filter(|e| e.department_id.map_or(true, |id| !self.departments.contains_key(&id)))
            .count()
    }

    pub fn organisation(&self, name: &str) -> OrganisationHierarchy {
        OrganisationHierarchy {
            organisation: name.to_string(),
            ceos: self.ceos(),
            departments: self.department_details(),
            unassigned_employees: self.unassigned_count(),
        }
    }

    /// Managers of a department, or `None` if the department does not exist
    pub fn managers_of(&self, department_id: i64) -> Option<Vec<EmployeeSummary>> {
        if !self.departments.contains_key(&department_id) {
            return None;
        }

        Some(
            self.employees
                .values()
                .filter(|e| e.department_id == Some(department_id) && e.role == Role::Manager)
                .map(|e| self.summary(e))
                .collect(),
        )
    }

    pub fn has_direct_reports(&self, id: i64) -> bool {
        self.reports.get(&id).is_some_and(|r| !r.is_empty())
    }

    pub fn direct_reports(&self, id: i64) -> Vec<EmployeeSummary> {
        self.reports
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(|report_id| self.employees.get(report_id))
            .map(|e| self.summary(e))
            .collect()
    }

    /// Manager ids from the immediate manager upward. Stops at a CEO, a
    /// dangling reference, or a repeated id.
    fn ancestors(&self, id: i64) -> Vec<i64> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([id]);
        let mut current = self.employees.get(&id).and_then(|e| e.reporting_manager_id);

        while let Some(manager_id) = current {
            if chain.len() >= self.employees.len() || !seen.insert(manager_id) {
                tracing::warn!("Reporting cycle detected above employee {}", id);
                break;
            }
            let Some(manager) = self.employees.get(&manager_id) else {
                break;
            };
            chain.push(manager_id);
            current = manager.reporting_manager_id;
        }

        chain
    }

    pub fn reporting_chain(&self, id: i64) -> Vec<EmployeeSummary> {
        self.ancestors(id)
            .into_iter()
            .filter_map(|manager_id| self.employees.get(&manager_id))
            .map(|e| self.summary(e))
            .collect()
    }

    /// Direct reports for CEOs and managers, the reporting chain for everyone else
    pub fn related(&self, id: i64) -> Option<RelatedEmployees> {
        let employee = self.employees.get(&id)?;
        let related = if employee.role.can_manage() {
            RelatedEmployees::DirectReports(self.direct_reports(id))
        } else {
            RelatedEmployees::ReportingChain(self.reporting_chain(id))
        };
        Some(related)
    }

    /// Whether `candidate` sits below `ancestor` in the reporting forest
    pub fn is_descendant(&self, candidate: i64, ancestor: i64) -> bool {
        self.ancestors(candidate).contains(&ancestor)
    }
}
