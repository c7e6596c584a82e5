use std::sync::Arc;

use crate::api::DepartmentDetail;
use crate::database::OrgStore;
use crate::services::{load_chart, ServiceError};

#[derive(Clone)]
pub struct DepartmentQuery {
    store: Arc<dyn OrgStore>,
}

impl DepartmentQuery {
    pub fn new(store: Arc<dyn OrgStore>) -> Self {
        Self { store }
    }

    /// Every department with its employee count, ordered by id
    pub async fn all_department_details(&self) -> Result<Vec<DepartmentDetail>, ServiceError> {
        let chart = load_chart(self.store.as_ref()).await?;
        Ok(chart.department_details())
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::TestOrg;

    #[tokio::test]
    async fn counts_employees_per_department() {
        let org = TestOrg::seeded().await;
        let details = org.state.departments.all_department_details().await.unwrap();

        let engineering = details.iter().find(|d| d.id == org.engineering).unwrap();
        assert_eq!(engineering.employee_count, 2);
        assert_eq!(engineering.manager_count, 1);

        let finance = details.iter().find(|d| d.id == org.finance).unwrap();
        assert_eq!(finance.employee_count, 0);

        let ids: Vec<i64> = details.iter().map(|d| d.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }
}
