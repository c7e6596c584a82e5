use std::sync::Arc;

use crate::api::EmployeeForm;
use crate::config::AppConfig;
use crate::database::MemoryStore;
use crate::state::AppState;

pub const TEST_PASSWORD: &str = "s3cret-pass";

/// A small seeded organisation on an in-memory store:
///
/// Alice (CEO) -> Bob (Engineering manager) -> Carol (engineer)
/// Alice (CEO) -> Dave (Human Resources manager)
pub struct TestOrg {
    pub state: AppState,
    pub engineering: i64,
    pub human_resources: i64,
    pub finance: i64,
    pub ceo: i64,
    pub eng_manager: i64,
    pub engineer: i64,
    pub hr_manager: i64,
}

impl TestOrg {
    pub fn config() -> AppConfig {
        let mut config = AppConfig::for_tests();
        config.organisation.name = "Test Org".to_string();
        config
    }

    pub async fn empty() -> AppState {
        let state = AppState::new(Arc::new(MemoryStore::new()), Self::config());
        state.seed_departments().await.expect("seed departments");
        state
    }

    pub async fn seeded() -> Self {
        let state = Self::empty().await;
        let departments = state.departments.all_department_details().await.expect("departments");
        let department = |name: &str| {
            departments
                .iter()
                .find(|d| d.name == name)
                .map(|d| d.id)
                .unwrap_or_else(|| panic!("department {} not seeded", name))
        };
        let engineering = department("Engineering");
        let human_resources = department("Human Resources");
        let finance = department("Finance");

        let add = |name: &str, role: &str, department: Option<i64>, manager: Option<i64>| {
            let state = state.clone();
            let form = EmployeeForm {
                name: Some(name.to_string()),
                email: Some(format!("{}@example.com", name.to_lowercase())),
                password: Some(TEST_PASSWORD.to_string()),
                role: Some(role.to_string()),
                department_id: department,
                reporting_manager_id: manager,
                ..Default::default()
            };
            async move { state.directory.add(form).await.expect("add employee").id }
        };

        let ceo = add("Alice", "CEO", None, None).await;
        let eng_manager = add("Bob", "MANAGER", Some(engineering), Some(ceo)).await;
        let engineer = add("Carol", "EMPLOYEE", Some(engineering), Some(eng_manager)).await;
        let hr_manager = add("Dave", "MANAGER", Some(human_resources), Some(ceo)).await;

        Self {
            state,
            engineering,
            human_resources,
            finance,
            ceo,
            eng_manager,
            engineer,
            hr_manager,
        }
    }
}
