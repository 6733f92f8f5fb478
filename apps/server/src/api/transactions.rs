use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use budgetflow_core::transactions::{NewTransaction, Transaction};

use crate::{
    api::created,
    auth::Session,
    error::{ApiJson, ApiQuery, ApiResult},
    main_lib::AppState,
    models::{MessageResponse, ProjectQuery},
};

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    ApiJson(new_transaction): ApiJson<NewTransaction>,
) -> ApiResult<(StatusCode, Json<MessageResponse<Transaction>>)> {
    let transaction = state
        .transaction_service
        .create_transaction(&session.capability, new_transaction)
        .await?;
    Ok(created("Transaction created", Some(transaction)))
}

async fn select_transactions(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    ApiQuery(query): ApiQuery<ProjectQuery>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = state
        .transaction_service
        .list_transactions(&session.capability, query.project_uuid.as_deref())?;
    Ok(Json(transactions))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/transactions/create", post(create_transaction))
        .route("/transactions/select", get(select_transactions))
}
