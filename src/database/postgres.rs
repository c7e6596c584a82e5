use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::info;

use crate::database::models::{Department, Employee, EmployeeChanges, NewEmployee};
use crate::database::store::{OrgStore, StoreError};

const EMPLOYEE_COLUMNS: &str = "id, name, email, password_hash, designation, mobile_number, role, \
     department_id, reporting_manager_id, created_at, updated_at";

/// Statements run once at startup; each is idempotent.
const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS departments (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    )"#,
    r#"CREATE TABLE IF NOT EXISTS employees (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        designation TEXT,
        mobile_number TEXT,
        role TEXT NOT NULL,
        department_id BIGINT REFERENCES departments (id) ON DELETE SET NULL,
        reporting_manager_id BIGINT REFERENCES employees (id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )"#,
    "CREATE UNIQUE INDEX IF NOT EXISTS employees_email_key ON employees (email)",
    "CREATE INDEX IF NOT EXISTS employees_manager_idx ON employees (reporting_manager_id)",
];

/// PostgreSQL-backed store
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: Option<&str>, max_connections: u32) -> Result<Self, StoreError> {
        let url = database_url.ok_or(StoreError::ConfigMissing("DATABASE_URL"))?;
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect(url)
            .await?;

        info!("Connected PostgreSQL pool (max {} connections)", max_connections);
        Ok(Self { pool })
    }

    /// Create tables and indexes when missing
    pub async fn migrate(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Database schema ready");
        Ok(())
    }
}

fn map_unique_violation(err: sqlx::Error, email: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateEmail(email.to_string()),
        _ => StoreError::Sqlx(err),
    }
}

#[async_trait]
impl OrgStore for PgStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn departments(&self) -> Result<Vec<Department>, StoreError> {
        let rows = sqlx::query_as::<_, Department>("SELECT id, name FROM departments ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn ensure_department(&self, name: &str) -> Result<Department, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidDepartmentName(name.to_string()));
        }

        let row = sqlx::query_as::<_, Department>(
            "INSERT INTO departments (name) VALUES ($1)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn employees(&self) -> Result<Vec<Employee>, StoreError> {
        let sql = format!("SELECT {} FROM employees ORDER BY id", EMPLOYEE_COLUMNS);
        let rows = sqlx::query_as::<_, Employee>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn employee(&self, id: i64) -> Result<Option<Employee>, StoreError> {
        let sql = format!("SELECT {} FROM employees WHERE id = $1", EMPLOYEE_COLUMNS);
        let row = sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn employee_by_email(&self, email: &str) -> Result<Option<Employee>, StoreError> {
        let sql = format!("SELECT {} FROM employees WHERE email = $1", EMPLOYEE_COLUMNS);
        let row = sqlx::query_as::<_, Employee>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_employee(&self, new: NewEmployee) -> Result<Employee, StoreError> {
        let sql = format!(
            "INSERT INTO employees
                (name, email, password_hash, designation, mobile_number, role, department_id, reporting_manager_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {}",
            EMPLOYEE_COLUMNS
        );
        sqlx::query_as::<_, Employee>(&sql)
            .bind(&new.name)
            .bind(&new.email)
            .bind(&new.password_hash)
            .bind(&new.designation)
            .bind(&new.mobile_number)
            .bind(new.role.as_str())
            .bind(new.department_id)
            .bind(new.reporting_manager_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, &new.email))
    }

    async fn update_employee(&self, id: i64, changes: EmployeeChanges) -> Result<Employee, StoreError> {
        let sql = format!(
            "UPDATE employees SET
                name = $2,
                email = $3,
                password_hash = COALESCE($4, password_hash),
                designation = $5,
                mobile_number = $6,
                role = $7,
                department_id = $8,
                reporting_manager_id = $9,
                updated_at = now()
             WHERE id = $1
             RETURNING {}",
            EMPLOYEE_COLUMNS
        );
        sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.email)
            .bind(&changes.password_hash)
            .bind(&changes.designation)
            .bind(&changes.mobile_number)
            .bind(changes.role.as_str())
            .bind(changes.department_id)
            .bind(changes.reporting_manager_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, &changes.email))?
            .ok_or(StoreError::EmployeeNotFound(id))
    }

    async fn delete_employee(&self, id: i64, reassign_to: Option<i64>) -> Result<Employee, StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE employees SET reporting_manager_id = $2, updated_at = now()
             WHERE reporting_manager_id = $1",
        )
        .bind(id)
        .bind(reassign_to)
        .execute(&mut *tx)
        .await?;

        let sql = format!("DELETE FROM employees WHERE id = $1 RETURNING {}", EMPLOYEE_COLUMNS);
        let removed = sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        match removed {
            Some(employee) => {
                tx.commit().await?;
                Ok(employee)
            }
            None => {
                tx.rollback().await?;
                Err(StoreError::EmployeeNotFound(id))
            }
        }
    }
}
