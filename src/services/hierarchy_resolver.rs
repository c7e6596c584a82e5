use std::sync::Arc;

use crate::api::{EmployeeSummary, OrganisationHierarchy, RelatedEmployees};
use crate::database::OrgStore;
use crate::services::{load_chart, ServiceError};

/// Organisation tree views: CEOs and departments, department managers,
/// and the reports or reporting chain of one employee
#[derive(Clone)]
pub struct HierarchyResolver {
    store: Arc<dyn OrgStore>,
    organisation_name: String,
}

impl HierarchyResolver {
    pub fn new(store: Arc<dyn OrgStore>, organisation_name: impl Into<String>) -> Self {
        Self {
            store,
            organisation_name: organisation_name.into(),
        }
    }

    pub async fn ceo_and_all_departments(&self) -> Result<OrganisationHierarchy, ServiceError> {
        let chart = load_chart(self.store.as_ref()).await?;
        Ok(chart.organisation(&self.organisation_name))
    }

    pub async fn managers_of_department(&self, department_id: i64) -> Result<Vec<EmployeeSummary>, ServiceError> {
        let chart = load_chart(self.store.as_ref()).await?;
        chart
            .managers_of(department_id)
            .ok_or(ServiceError::DepartmentNotFound(department_id))
    }

    pub async fn child_employees_or_reporting_managers(
        &self,
        employee_id: i64,
    ) -> Result<RelatedEmployees, ServiceError> {
        let chart = load_chart(self.store.as_ref()).await?;
        chart
            .related(employee_id)
            .ok_or(ServiceError::EmployeeNotFound(employee_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestOrg;

    #[tokio::test]
    async fn organisation_includes_every_department_once() {
        let org = TestOrg::seeded().await;
        let view = org.state.hierarchy.ceo_and_all_departments().await.unwrap();

        assert_eq!(view.organisation, "Test Org");
        assert_eq!(view.ceos.len(), 1);
        assert_eq!(view.ceos[0].id, org.ceo);

        let mut names: Vec<&str> = view.departments.iter().map(|d| d.name.as_str()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
        assert!(names.contains(&"Finance"));
    }

    #[tokio::test]
    async fn department_without_managers_is_empty_not_error() {
        let org = TestOrg::seeded().await;
        let managers = org.state.hierarchy.managers_of_department(org.finance).await.unwrap();
        assert!(managers.is_empty());

        let managers = org.state.hierarchy.managers_of_department(org.engineering).await.unwrap();
        assert_eq!(managers.iter().map(|m| m.id).collect::<Vec<_>>(), vec![org.eng_manager]);
    }

    #[tokio::test]
    async fn missing_department_is_not_found() {
        let org = TestOrg::seeded().await;
        let err = org.state.hierarchy.managers_of_department(404).await.unwrap_err();
        assert!(matches!(err, ServiceError::DepartmentNotFound(404)));
    }

    #[tokio::test]
    async fn related_employees_by_role() {
        let org = TestOrg::seeded().await;
        let hierarchy = &org.state.hierarchy;

        match hierarchy.child_employees_or_reporting_managers(org.eng_manager).await.unwrap() {
            RelatedEmployees::DirectReports(reports) => {
                assert_eq!(reports.iter().map(|r| r.id).collect::<Vec<_>>(), vec![org.engineer]);
            }
            other => panic!("unexpected {:?}", other),
        }

        match hierarchy.child_employees_or_reporting_managers(org.engineer).await.unwrap() {
            RelatedEmployees::ReportingChain(chain) => {
                assert_eq!(chain.iter().map(|m| m.id).collect::<Vec<_>>(), vec![org.eng_manager, org.ceo]);
            }
            other => panic!("unexpected {:?}", other),
        }

        assert!(matches!(
            hierarchy.child_employees_or_reporting_managers(9999).await,
            Err(ServiceError::EmployeeNotFound(9999))
        ));
    }
}
