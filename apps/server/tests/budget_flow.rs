use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use budgetflow_core::tasks::MirrorPolicy;
use budgetflow_server::{api::app_router, build_state, config::Config};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

/// Router with authentication disabled, so every call carries all capabilities.
async fn build_open_router() -> (Router, TempDir) {
    let tmp = tempdir().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("flow.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        mirror_policy: MirrorPolicy::Lenient,
        auth: None,
        admin_seed: None,
    };
    let state = build_state(&config).await.unwrap();
    (app_router(state, &config), tmp)
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
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
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn expense_task(project_uuid: &str, name: &str, sub_uuid: &str, amount: u32) -> Value {
    json!({
        "name": name,
        "description": "",
        "finished": false,
        "beginDate": "2024-06-03T08:00:00Z",
        "endDate": "2024-06-05T18:00:00Z",
        "revenue": 100,
        "statusUuid": "status-open",
        "projectUuid": project_uuid,
        "taskExpense": { "uuid": sub_uuid, "amount": amount }
    })
}

fn activity_task(project_uuid: &str, name: &str, sub_uuid: &str) -> Value {
    json!({
        "name": name,
        "description": "",
        "finished": false,
        "beginDate": "2024-06-03T08:00:00Z",
        "endDate": "2024-06-03T12:00:00Z",
        "revenue": 25,
        "statusUuid": "status-open",
        "projectUuid": project_uuid,
        "taskActivity": { "uuid": sub_uuid, "hourlyRate": 50 }
    })
}

async fn create_project(app: &Router, name: &str) -> (String, String) {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/v1/project/create",
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Project created");
    (
        body["data"]["project"]["uuid"].as_str().unwrap().to_string(),
        body["data"]["budget"]["uuid"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn budget_to_report_round_trip() {
    let (app, _tmp) = build_open_router().await;
    let (project_uuid, budget_uuid) = create_project(&app, "Beach house").await;

    let (status, body) = call(
        &app,
        Method::PUT,
        "/api/v1/budget/task/update",
        Some(json!({
            "uuid": budget_uuid,
            "tasks": [
                expense_task(&project_uuid, "Foundation", "", 300),
                activity_task(&project_uuid, "Survey", ""),
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["created"], 4);

    let uri = format!("/api/v1/budget/select/all?projectUuid={project_uuid}");
    let (status, body) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let budget = &body[0];
    assert!(budget["register"].is_string());
    let tasks = budget["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    let foundation = tasks.iter().find(|t| t["name"] == "Foundation").unwrap();
    assert_eq!(foundation["taskExpense"]["amount"], "R$ 300,00");
    assert_eq!(foundation["beginDate"], "03/06/24 08:00");

    let uri = format!("/api/v1/tasks/select?projectUuid={project_uuid}");
    let (status, body) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let live = body.as_array().unwrap();
    assert_eq!(live.len(), 2);
    assert!(live.iter().all(|t| t["budgetUuid"].is_null()));
    assert!(live.iter().all(|t| t["originalTaskId"].is_number()));
    let live_expense = live.iter().find(|t| t["name"] == "Foundation").unwrap();
    let expense_sub = live_expense["taskExpense"]["uuid"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/tasks/done/create",
        Some(json!({
            "name": "Cement",
            "userUuid": "user-1",
            "doneExpense": {
                "taskUuid": expense_sub,
                "amount": 150,
                "date": "2024-06-04T10:00:00Z"
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/v1/transactions/create",
        Some(json!({
            "projectUuid": project_uuid,
            "date": "2024-06-10T00:00:00Z",
            "kind": { "type": "INCOME", "amount": 500 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(&app, Method::GET, "/api/v1/project/select/beach", None).await;
    assert_eq!(status, StatusCode::OK);
    let report = &body[0];
    assert_eq!(report["budget"]["cost"], "R$ 500,00");
    assert_eq!(report["budget"]["revenue"], "R$ 200,00");
    assert_eq!(report["budget"]["total"], "R$ 700,00");
    assert_eq!(report["proj"]["cost"], "R$ 150,00");
    assert_eq!(report["proj"]["revenue"], "R$ 50,00");
    assert_eq!(report["proj"]["total"], "R$ 200,00");
    assert_eq!(report["tx"]["income"], "R$ 500,00");
    assert!(report["dates"]["first"].is_string());

    let uri = format!("/api/v1/tasks/done/select?projectUuid={project_uuid}");
    let (status, body) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["doneExpense"]["amount"], 150.0);
}

#[tokio::test]
async fn live_update_keeps_realized_tasks() {
    let (app, _tmp) = build_open_router().await;
    let (project_uuid, budget_uuid) = create_project(&app, "Office").await;

    call(
        &app,
        Method::PUT,
        "/api/v1/budget/task/update",
        Some(json!({
            "uuid": budget_uuid,
            "tasks": [
                expense_task(&project_uuid, "Paint", "", 80),
                activity_task(&project_uuid, "Design", ""),
            ]
        })),
    )
    .await;

    let uri = format!("/api/v1/tasks/select?projectUuid={project_uuid}");
    let (_, body) = call(&app, Method::GET, &uri, None).await;
    let live = body.as_array().unwrap();
    let paint_sub = live
        .iter()
        .find(|t| t["name"] == "Paint")
        .unwrap()["taskExpense"]["uuid"]
        .as_str()
        .unwrap()
        .to_string();
    let design_sub = live
        .iter()
        .find(|t| t["name"] == "Design")
        .unwrap()["taskActivity"]["uuid"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/v1/tasks/done/create",
        Some(json!({
            "name": "Two coats",
            "userUuid": "user-1",
            "doneExpense": {
                "taskUuid": paint_sub,
                "amount": 40,
                "date": "2024-06-04T10:00:00Z"
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Only the design task is resubmitted: paint has a done and survives.
    let (status, body) = call(
        &app,
        Method::PUT,
        "/api/v1/tasks/update",
        Some(json!({ "tasks": [activity_task(&project_uuid, "Design v2", &design_sub)] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["updated"], 1);
    assert_eq!(body["data"]["deleted"], 0);

    let (_, body) = call(&app, Method::GET, &uri, None).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Paint"));
    assert!(names.contains(&"Design v2"));
}

#[tokio::test]
async fn rejected_requests_answer_401() {
    let (app, _tmp) = build_open_router().await;
    let (project_uuid, budget_uuid) = create_project(&app, "Garage").await;

    let mut both = expense_task(&project_uuid, "Roof", "", 10);
    both["taskActivity"] = json!({ "uuid": "", "hourlyRate": 5 });
    let (status, body) = call(
        &app,
        Method::PUT,
        "/api/v1/budget/task/update",
        Some(json!({ "uuid": budget_uuid, "tasks": [both] })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"].is_string());

    let (status, _) = call(
        &app,
        Method::PUT,
        "/api/v1/budget/task/update",
        Some(json!({
            "uuid": "missing-budget",
            "tasks": [expense_task(&project_uuid, "Roof", "", 10)]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(&app, Method::GET, "/api/v1/tasks/select", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(
        &app,
        Method::PUT,
        "/api/v1/tasks/update",
        Some(json!({ "tasks": "not-a-list" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = call(
        &app,
        Method::PUT,
        "/api/v1/tasks/update",
        Some(json!({ "tasks": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["created"], 0);
}

#[tokio::test]
async fn malformed_query_and_path_answer_401_json() {
    let (app, _tmp) = build_open_router().await;

    let (status, body) = call(
        &app,
        Method::GET,
        "/api/v1/tasks/select?projectUuid=a&projectUuid=b",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);
    assert!(body["message"].is_string());

    let (status, body) = call(&app, Method::GET, "/api/v1/project/select/%FF", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"].is_string());

    let (status, body) = call(
        &app,
        Method::GET,
        "/api/v1/budget/select/%FF?projectUuid=p",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn oversized_amounts_are_rejected_before_storage() {
    let (app, _tmp) = build_open_router().await;
    let (project_uuid, budget_uuid) = create_project(&app, "Tower").await;

    let mut task = activity_task(&project_uuid, "Crane", "");
    task["taskActivity"]["hourlyRate"] = json!(1e25);
    let (status, _) = call(
        &app,
        Method::PUT,
        "/api/v1/budget/task/update",
        Some(json!({ "uuid": budget_uuid, "tasks": [task] })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/v1/transactions/create",
        Some(json!({
            "projectUuid": project_uuid,
            "date": "2024-06-10T00:00:00Z",
            "kind": {
                "type": "LOAN",
                "amount": 1000,
                "installment": 1e20,
                "months": 2147483647
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = call(&app, Method::GET, "/api/v1/project/select/tower", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}
