use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use budgetflow_core::{
    errors::ValidationError,
    parties::{NewParty, Party},
    users::User,
    Error as CoreError,
};

use crate::{
    api::created,
    auth::{hash_password, Session},
    error::{ApiJson, ApiResult},
    main_lib::AppState,
    models::{MessageResponse, NewUserRequest},
};

async fn create_user(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    ApiJson(request): ApiJson<NewUserRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse<User>>)> {
    if request.password.is_empty() {
        return Err(CoreError::from(ValidationError::MissingField("password".to_string())).into());
    }
    let password = request.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| anyhow::anyhow!("Password hashing task failed: {e}"))??;
    let user = state
        .user_service
        .create_user(&session.capability, request.into_new_user(password_hash))
        .await?;
    Ok(created("User created", Some(user)))
}

async fn select_users(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.user_service.list_users(&session.capability)?))
}

async fn create_client(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    ApiJson(new_party): ApiJson<NewParty>,
) -> ApiResult<(StatusCode, Json<MessageResponse<Party>>)> {
    let party = state
        .party_service
        .create_client(&session.capability, new_party)
        .await?;
    Ok(created("Client created", Some(party)))
}

async fn select_clients(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<Vec<Party>>> {
    Ok(Json(state.party_service.list_clients(&session.capability)?))
}

async fn create_supplier(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    ApiJson(new_party): ApiJson<NewParty>,
) -> ApiResult<(StatusCode, Json<MessageResponse<Party>>)> {
    let party = state
        .party_service
        .create_supplier(&session.capability, new_party)
        .await?;
    Ok(created("Supplier created", Some(party)))
}

async fn select_suppliers(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<Vec<Party>>> {
    Ok(Json(state.party_service.list_suppliers(&session.capability)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/create", post(create_user))
        .route("/users/select", get(select_users))
        .route("/clients/create", post(create_client))
        .route("/clients/select", get(select_clients))
        .route("/suppliers/create", post(create_supplier))
        .route("/suppliers/select", get(select_suppliers))
}
