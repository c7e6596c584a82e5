use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::database::models::{Department, Employee, EmployeeChanges, NewEmployee};
use crate::database::store::{OrgStore, StoreError};

#[derive(Debug, Default)]
struct Tables {
    employees: BTreeMap<i64, Employee>,
    departments: BTreeMap<i64, Department>,
    last_employee_id: i64,
    last_department_id: i64,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.employees
            .values()
            .any(|e| e.email == email && Some(e.id) != except)
    }
}

/// In-process store backed by ordered maps behind a tokio `RwLock`
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrgStore for MemoryStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        let _tables = self.tables.read().await;
        Ok(())
    }

    async fn departments(&self) -> Result<Vec<Department>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.departments.values().cloned().collect())
    }

    async fn ensure_department(&self, name: &str) -> Result<Department, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidDepartmentName(name.to_string()));
        }

        let mut tables = self.tables.write().await;
        if let Some(existing) = tables.departments.values().find(|d| d.name == name) {
            return Ok(existing.clone());
        }

        tables.last_department_id += 1;
        let department = Department {
            id: tables.last_department_id,
            name: name.to_string(),
        };
        tables.departments.insert(department.id, department.clone());
        Ok(department)
    }

    async fn employees(&self) -> Result<Vec<Employee>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.employees.values().cloned().collect())
    }

    async fn employee(&self, id: i64) -> Result<Option<Employee>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.employees.get(&id).cloned())
    }

    async fn employee_by_email(&self, email: &str) -> Result<Option<Employee>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.employees.values().find(|e| e.email == email).cloned())
    }

    async fn insert_employee(&self, new: NewEmployee) -> Result<Employee, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&new.email, None) {
            return Err(StoreError::DuplicateEmail(new.email));
        }

        tables.last_employee_id += 1;
        let now = Utc::now();
        let employee = Employee {
            id: tables.last_employee_id,
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            designation: new.designation,
            mobile_number: new.mobile_number,
            role: new.role,
            department_id: new.department_id,
            reporting_manager_id: new.reporting_manager_id,
            created_at: now,
            updated_at: now,
        };
        tables.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn update_employee(&self, id: i64, changes: EmployeeChanges) -> Result<Employee, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.employees.contains_key(&id) {
            return Err(StoreError::EmployeeNotFound(id));
        }
        if tables.email_taken(&changes.email, Some(id)) {
            return Err(StoreError::DuplicateEmail(changes.email));
        }

        let employee = tables
            .employees
            .get_mut(&id)
            .ok_or(StoreError::EmployeeNotFound(id))?;
        changes.apply_to(employee, Utc::now());
        Ok(employee.clone())
    }

    async fn delete_employee(&self, id: i64, reassign_to: Option<i64>) -> Result<Employee, StoreError> {
        let mut tables = self.tables.write().await;
        let removed = tables
            .employees
            .remove(&id)
            .ok_or(StoreError::EmployeeNotFound(id))?;

        let now = Utc::now();
        for report in tables
            .employees
            .values_mut()
            .filter(|e| e.reporting_manager_id == Some(id))
        {
            report.reporting_manager_id = reassign_to;
            report.updated_at = now;
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Role;

    fn new_employee(email: &str, role: Role, manager: Option<i64>) -> NewEmployee {
        NewEmployee {
            name: email.split('@').next().unwrap_or_default().to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            designation: None,
            mobile_number: None,
            role,
            department_id: None,
            reporting_manager_id: manager,
        }
    }

    #[tokio::test]
    async fn assigns_increasing_ids_and_rejects_duplicate_email() {
        let store = MemoryStore::new();
        let a = store.insert_employee(new_employee("a@x.io", Role::Ceo, None)).await.unwrap();
        let b = store.insert_employee(new_employee("b@x.io", Role::Manager, Some(a.id))).await.unwrap();
        assert!(b.id > a.id);

        let err = store
            .insert_employee(new_employee("a@x.io", Role::Employee, Some(b.id)))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail(_)));
        assert_eq!(store.employees().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn ensure_department_is_idempotent() {
        let store = MemoryStore::new();
        let first = store.ensure_department("Engineering").await.unwrap();
        let again = store.ensure_department(" Engineering ").await.unwrap();
        assert_eq!(first, again);
        assert_eq!(store.departments().await.unwrap().len(), 1);
        assert!(store.ensure_department("  ").await.is_err());
    }

    #[tokio::test]
    async fn delete_reassigns_direct_reports() {
        let store = MemoryStore::new();
        let ceo = store.insert_employee(new_employee("ceo@x.io", Role::Ceo, None)).await.unwrap();
        let mgr = store.insert_employee(new_employee("mgr@x.io", Role::Manager, Some(ceo.id))).await.unwrap();
        let dev = store.insert_employee(new_employee("dev@x.io", Role::Employee, Some(mgr.id))).await.unwrap();

        store.delete_employee(mgr.id, Some(ceo.id)).await.unwrap();

        assert!(store.employee(mgr.id).await.unwrap().is_none());
        let dev = store.employee(dev.id).await.unwrap().unwrap();
        assert_eq!(dev.reporting_manager_id, Some(ceo.id));
    }

    #[tokio::test]
    async fn update_missing_employee_leaves_store_unchanged() {
        let store = MemoryStore::new();
        store.insert_employee(new_employee("a@x.io", Role::Ceo, None)).await.unwrap();
        let before = store.employees().await.unwrap();

        let changes = EmployeeChanges {
            name: "Ghost".to_string(),
            email: "ghost@x.io".to_string(),
            password_hash: None,
            designation: None,
            mobile_number: None,
            role: Role::Ceo,
            department_id: None,
            reporting_manager_id: None,
        };
        let err = store.update_employee(99, changes).await.unwrap_err();
        assert!(matches!(err, StoreError::EmployeeNotFound(99)));

        let after = store.employees().await.unwrap();
        assert_eq!(before.len(), after.len());
        assert_eq!(before[0].email, after[0].email);
    }
}
