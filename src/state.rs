use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::auth::JwtSettings;
use crate::config::{AppConfig, StoreBackend};
use crate::database::{MemoryStore, OrgStore, PgStore};
use crate::services::{AuthGateway, DepartmentQuery, EmployeeDirectory, HierarchyResolver};

/// Everything a request handler needs, wired explicitly at startup
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn OrgStore>,
    pub directory: EmployeeDirectory,
    pub auth: AuthGateway,
    pub hierarchy: HierarchyResolver,
    pub departments: DepartmentQuery,
}

impl AppState {
    pub fn new(store: Arc<dyn OrgStore>, config: AppConfig) -> Self {
        let directory = EmployeeDirectory::new(store.clone(), config.security.password_min_length);
        let auth = AuthGateway::new(store.clone(), JwtSettings::from_config(&config.security));
        let hierarchy = HierarchyResolver::new(store.clone(), config.organisation.name.clone());
        let departments = DepartmentQuery::new(store.clone());

        Self {
            config: Arc::new(config),
            store,
            directory,
            auth,
            hierarchy,
            departments,
        }
    }

    /// Open the configured store, seed departments and apply the fixture
    pub async fn bootstrap(config: AppConfig) -> anyhow::Result<Self> {
        if config.security.jwt_secret.is_empty() {
            anyhow::bail!("JWT_SECRET must be set outside development");
        }

        let store: Arc<dyn OrgStore> = match config.store.backend {
            StoreBackend::Memory => {
                info!("Using in-memory store");
                Arc::new(MemoryStore::new())
            }
            StoreBackend::Postgres => {
                let store = PgStore::connect(config.store.database_url.as_deref(), config.store.max_connections)
                    .await
                    .context("failed to connect to PostgreSQL")?;
                store.migrate().await.context("failed to prepare database schema")?;
                Arc::new(store)
            }
        };

        let fixture = config.organisation.fixture.clone();
        let state = Self::new(store, config);
        state.seed_departments().await?;

        if let Some(path) = fixture {
            let fixture = crate::fixture::Fixture::load(&path)?;
            let report = fixture.apply(&state).await?;
            info!(
                "Applied fixture {}: {} departments, {} employees added, {} already present",
                path, report.departments, report.added, report.skipped
            );
        }

        Ok(state)
    }

    /// Make sure every configured department exists
    pub async fn seed_departments(&self) -> anyhow::Result<()> {
        for name in &self.config.organisation.departments {
            self.store
                .ensure_department(name)
                .await
                .with_context(|| format!("failed to seed department '{}'", name))?;
        }
        Ok(())
    }
}
