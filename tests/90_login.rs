mod common;

use axum::http::{Method, StatusCode};
use common::{SeededOrg, TestApp, PASSWORD};
use org_chart_api::config::AppConfig;
use serde_json::json;

#[tokio::test]
async fn login_with_correct_password_returns_token() {
    let org = SeededOrg::new().await;

    let (status, body) = org.app.login("Bob@Example.com", PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["tokenType"], "Bearer");
    assert!(body["data"]["token"].as_str().unwrap().split('.').count() == 3);
    assert!(body["data"]["expiresIn"].as_i64().unwrap() > 0);
    assert_eq!(body["data"]["employee"]["id"], org.eng_manager);
    assert!(body["data"]["employee"].get("passwordHash").is_none());
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let org = SeededOrg::new().await;

    let (status, body) = org.app.login("bob@example.com", "not-the-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_CREDENTIALS");

    // Unknown email is indistinguishable from a wrong password
    let (status, unknown) = org.app.login("nobody@example.com", PASSWORD).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown["error"], body["error"]);
}

#[tokio::test]
async fn login_with_missing_fields_is_validation_error() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request(Method::POST, "/employee/login", Some(json!({ "email": "" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fieldErrors"]["email"].is_string());
    assert!(body["fieldErrors"]["password"].is_string());
}

fn guarded_config() -> AppConfig {
    let mut config = AppConfig::for_tests();
    config.security.require_auth_for_writes = true;
    config
}

#[tokio::test]
async fn guarded_writes_require_a_token() {
    let org = SeededOrg::build(TestApp::with_config(guarded_config()).await).await;

    let (status, body) = org
        .app
        .request(Method::DELETE, &format!("/employee/remove/{}", org.engineer), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = org
        .app
        .send(Method::DELETE, &format!("/employee/remove/{}", org.engineer), None, Some("garbage"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn guarded_writes_need_a_manager() {
    let org = SeededOrg::build(TestApp::with_config(guarded_config()).await).await;

    let (_, body) = org.app.login("carol@example.com", PASSWORD).await;
    let employee_token = body["data"]["token"].as_str().unwrap().to_string();
    let (status, body) = org
        .app
        .send(
            Method::PUT,
            &format!("/employee/update?id={}", org.engineer),
            Some(json!({ "designation": "Self promoted" })),
            Some(&employee_token),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (_, body) = org.app.login("bob@example.com", PASSWORD).await;
    let manager_token = body["data"]["token"].as_str().unwrap().to_string();
    let (status, body) = org
        .app
        .send(
            Method::PUT,
            &format!("/employee/update?id={}", org.engineer),
            Some(json!({ "designation": "Senior Engineer" })),
            Some(&manager_token),
        )
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["data"]["designation"], "Senior Engineer");
}

#[tokio::test]
async fn reads_stay_open_when_writes_are_guarded() {
    let org = SeededOrg::build(TestApp::with_config(guarded_config()).await).await;

    let (status, _) = org.app.get("/employee/all").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = org.app.get("/hierarchy").await;
    assert_eq!(status, StatusCode::OK);
}
