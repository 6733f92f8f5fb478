use std::time::Duration;

use argon2::{password_hash::SaltString, Argon2, PasswordHasher};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use budgetflow_core::tasks::MirrorPolicy;
use budgetflow_server::{
    api::app_router,
    auth::AuthConfig,
    build_state,
    config::{AdminSeed, Config},
};
use rand::{rngs::OsRng, RngCore};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

async fn build_test_router(admin_password: &str) -> (Router, TempDir) {
    let tmp = tempdir().unwrap();

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(admin_password.as_bytes(), &salt)
        .unwrap()
        .to_string();

    let mut secret = vec![0u8; 32];
    OsRng.fill_bytes(&mut secret);

    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("auth.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        mirror_policy: MirrorPolicy::Lenient,
        auth: Some(AuthConfig {
            jwt_secret: secret,
            access_token_ttl: Duration::from_secs(600),
        }),
        admin_seed: Some(AdminSeed {
            username: "root".to_string(),
            password_hash,
        }),
    };
    let state = build_state(&config).await.unwrap();
    (app_router(state, &config), tmp)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn login(app: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await
}

#[tokio::test]
async fn login_and_access_protected_route() {
    let (app, _tmp) = build_test_router("super-secret").await;

    let (status, _) = send(&app, Method::GET, "/api/v1/users/select", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, Method::GET, "/api/v1/auth/status", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["requiresPassword"], true);

    let (status, body) = login(&app, "root", "wrong").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"].is_string());

    let (status, body) = login(&app, "root", "super-secret").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tokenType"], "Bearer");
    let token = body["accessToken"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::GET, "/api/v1/users/select", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["username"], "root");
    assert!(body[0].get("passwordHash").is_none());

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/users/select",
        Some("not.a.token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn capabilities_gate_each_route() {
    let (app, _tmp) = build_test_router("super-secret").await;
    let (_, body) = login(&app, "root", "super-secret").await;
    let admin_token = body["accessToken"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/users/create",
        Some(&admin_token),
        Some(json!({
            "name": "Ana",
            "username": "ana",
            "password": "planner-pass",
            "auth": { "project": true }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["auth"]["project"], true);
    assert_eq!(body["data"]["auth"]["admin"], false);

    let (status, body) = login(&app, "ana", "planner-pass").await;
    assert_eq!(status, StatusCode::OK);
    let token = body["accessToken"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/project/create",
        Some(&token),
        Some(json!({ "name": "Warehouse" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let project_uuid = body["data"]["project"]["uuid"].as_str().unwrap().to_string();

    let (status, _) = send(&app, Method::GET, "/api/v1/users/select", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let uri = format!("/api/v1/transactions/select?projectUuid={project_uuid}");
    let (status, body) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"].as_str().unwrap().contains("financial"));

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/project/select/ware",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}
