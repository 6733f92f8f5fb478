use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use budgetflow_core::{dones::DoneInput, tasks::ReconcileReport};

use crate::{
    api::created,
    auth::Session,
    error::{ApiJson, ApiQuery, ApiResult},
    main_lib::AppState,
    models::{DoneView, MessageResponse, ProjectQuery, ProjectTasksRequest, TaskView},
};

async fn select_tasks(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    ApiQuery(query): ApiQuery<ProjectQuery>,
) -> ApiResult<Json<Vec<TaskView>>> {
    let tasks = state
        .task_service
        .select_live_tasks(&session.capability, query.require()?)?;
    Ok(Json(tasks.into_iter().map(TaskView::from).collect()))
}

async fn update_tasks(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    ApiJson(body): ApiJson<ProjectTasksRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse<ReconcileReport>>)> {
    let report = state
        .task_service
        .update_project_tasks(&session.capability, body.tasks)
        .await?;
    Ok(created("Tasks updated", Some(report)))
}

async fn create_done(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    ApiJson(input): ApiJson<DoneInput>,
) -> ApiResult<(StatusCode, Json<MessageResponse<DoneView>>)> {
    let done = state
        .done_service
        .create_done(&session.capability, input)
        .await?;
    Ok(created("Done recorded", Some(DoneView::from(done))))
}

async fn select_dones(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    ApiQuery(query): ApiQuery<ProjectQuery>,
) -> ApiResult<Json<Vec<DoneView>>> {
    let dones = state
        .done_service
        .list_dones(&session.capability, query.require()?)?;
    Ok(Json(dones.into_iter().map(DoneView::from).collect()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks/select", get(select_tasks))
        .route("/tasks/update", put(update_tasks))
        .route("/tasks/done/create", post(create_done))
        .route("/tasks/done/select", get(select_dones))
}
