use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use budgetflow_core::tasks::ReconcileReport;

use crate::{
    api::created,
    auth::Session,
    error::{ApiJson, ApiPath, ApiQuery, ApiResult},
    main_lib::AppState,
    models::{BudgetTasksRequest, BudgetView, MessageResponse, ProjectQuery},
};

async fn select_budgets(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    ApiPath(key): ApiPath<String>,
    ApiQuery(query): ApiQuery<ProjectQuery>,
) -> ApiResult<Json<Vec<BudgetView>>> {
    let budgets = state.budget_service.select_budgets(
        &session.capability,
        &key,
        query.project_uuid.as_deref(),
    )?;
    Ok(Json(budgets.into_iter().map(BudgetView::from).collect()))
}

async fn update_budget_tasks(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    ApiJson(body): ApiJson<BudgetTasksRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse<ReconcileReport>>)> {
    let report = state
        .budget_service
        .update_budget_tasks(&session.capability, &body.uuid, body.tasks)
        .await?;
    Ok(created("Budget tasks updated", Some(report)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budget/select/{key}", get(select_budgets))
        .route("/budget/task/update", put(update_budget_tasks))
}
