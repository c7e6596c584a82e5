pub mod auth_gateway;
pub mod department_query;
pub mod employee_directory;
pub mod error;
pub mod hierarchy_resolver;

pub use auth_gateway::AuthGateway;
pub use department_query::DepartmentQuery;
pub use employee_directory::EmployeeDirectory;
pub use error::ServiceError;
pub use hierarchy_resolver::HierarchyResolver;

use crate::database::OrgStore;
use crate::hierarchy::OrgChart;

/// Snapshot the store into an [`OrgChart`]
pub(crate) async fn load_chart(store: &dyn OrgStore) -> Result<OrgChart, ServiceError> {
    let employees = store.employees().await?;
    let departments = store.departments().await?;
    Ok(OrgChart::new(employees, departments))
}
