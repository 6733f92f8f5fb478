use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use budgetflow_core::projects::{NewProject, Project, ProjectUpdate};

use crate::{
    api::created,
    auth::Session,
    error::{ApiJson, ApiPath, ApiResult},
    main_lib::AppState,
    models::{MessageResponse, ProjectCreated, ProjectView},
};

async fn select_projects(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    ApiPath(key): ApiPath<String>,
) -> ApiResult<Json<Vec<ProjectView>>> {
    let summaries = state
        .project_service
        .select_projects(&session.capability, &key)?;
    Ok(Json(summaries.into_iter().map(ProjectView::from).collect()))
}

async fn create_project(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    ApiJson(mut new_project): ApiJson<NewProject>,
) -> ApiResult<(StatusCode, Json<MessageResponse<ProjectCreated>>)> {
    if new_project.user_uuid.is_none() {
        new_project.user_uuid = session.user_uuid.clone();
    }
    let (project, budget) = state
        .project_service
        .create_project(&session.capability, new_project)
        .await?;
    Ok(created(
        "Project created",
        Some(ProjectCreated { project, budget }),
    ))
}

async fn update_project(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    ApiJson(update): ApiJson<ProjectUpdate>,
) -> ApiResult<(StatusCode, Json<MessageResponse<Project>>)> {
    let project = state
        .project_service
        .update_project(&session.capability, update)
        .await?;
    Ok(created("Project updated", Some(project)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/project/select/{key}", get(select_projects))
        .route("/project/create", post(create_project))
        .route("/project/update", put(update_project))
}
