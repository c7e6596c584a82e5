pub mod dto;
pub mod extract;

pub use dto::{
    DepartmentDetail, EmployeeForm, EmployeeSummary, HierarchyView, LoginRequest, LoginResponse,
    OrganisationHierarchy, RelatedEmployees,
};
