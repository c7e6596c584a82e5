#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use org_chart_api::config::AppConfig;
use org_chart_api::database::MemoryStore;
use org_chart_api::AppState;

pub const PASSWORD: &str = "s3cret-pass";

/// Router over a fresh in-memory organisation, driven with `oneshot`
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(AppConfig::for_tests()).await
    }

    pub async fn with_config(mut config: AppConfig) -> Self {
        config.server.enable_request_logging = false;
        let state = AppState::new(Arc::new(MemoryStore::new()), config);
        state.seed_departments().await.expect("seed departments");
        Self {
            router: org_chart_api::app(state),
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send(method, uri, body, None).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self.router.clone().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    /// Department id by name, from the department listing
    pub async fn department_id(&self, name: &str) -> i64 {
        let (status, body) = self.get("/employee/department/all").await;
        assert_eq!(status, StatusCode::OK);
        body["data"]
            .as_array()
            .and_then(|all| all.iter().find(|d| d["name"] == name))
            .and_then(|d| d["id"].as_i64())
            .unwrap_or_else(|| panic!("department {} not seeded", name))
    }

    /// Add an employee and return its id, failing the test on anything but 201
    pub async fn add(&self, name: &str, role: &str, department_id: Option<i64>, manager_id: Option<i64>) -> i64 {
        let (status, body) = self
            .request(
                Method::POST,
                "/employee/add",
                Some(employee_body(name, role, department_id, manager_id)),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "add {} failed: {}", name, body);
        body["data"]["id"].as_i64().expect("employee id")
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/employee/login",
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }
}

pub fn email_for(name: &str) -> String {
    format!("{}@example.com", name.to_lowercase())
}

pub fn employee_body(name: &str, role: &str, department_id: Option<i64>, manager_id: Option<i64>) -> Value {
    json!({
        "name": name,
        "email": email_for(name),
        "password": PASSWORD,
        "designation": format!("{} designation", role),
        "role": role,
        "departmentId": department_id,
        "reportingManagerId": manager_id,
    })
}

/// The four-person organisation most tests start from
pub struct SeededOrg {
    pub app: TestApp,
    pub engineering: i64,
    pub human_resources: i64,
    pub ceo: i64,
    pub eng_manager: i64,
    pub engineer: i64,
    pub hr_manager: i64,
}

impl SeededOrg {
    pub async fn new() -> Self {
        Self::build(TestApp::new().await).await
    }

    pub async fn build(app: TestApp) -> Self {
        let engineering = app.department_id("Engineering").await;
        let human_resources = app.department_id("Human Resources").await;

        let ceo = app.add("Alice", "CEO", None, None).await;
        let eng_manager = app.add("Bob", "MANAGER", Some(engineering), Some(ceo)).await;
        let engineer = app.add("Carol", "EMPLOYEE", Some(engineering), Some(eng_manager)).await;
        let hr_manager = app.add("Dave", "MANAGER", Some(human_resources), Some(ceo)).await;

        Self {
            app,
            engineering,
            human_resources,
            ceo,
            eng_manager,
            engineer,
            hr_manager,
        }
    }
}

/// The server binary started on a free port; killed when dropped
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    pub async fn start(args: &[&str]) -> Result<Self> {
        let server = Self::spawn(args)?;
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    fn spawn(args: &[&str]) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_org-chart-api"));
        cmd.args(["--memory", "--host", "127.0.0.1"])
            .args(args)
            .env("ORG_CHART_PORT", port.to_string())
            .env("APP_ENV", "development")
            .env("JWT_SECRET", "integration-secret")
            .env("RUST_LOG", "warn")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        let url = format!("{}/health", self.base_url);
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == reqwest::StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
