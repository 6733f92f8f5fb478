mod budgets;
mod entities;
mod projects;
mod tasks;
mod transactions;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, StatusCode},
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    auth::{auth_status, login, require_jwt},
    config::Config,
    main_lib::AppState,
    models::MessageResponse,
};

pub async fn healthz() -> &'static str {
    "ok"
}

/// `201 {message, data}` answer of write endpoints.
pub(crate) fn created<T: Serialize>(
    message: &str,
    data: Option<T>,
) -> (StatusCode, Json<MessageResponse<T>>) {
    (
        StatusCode::CREATED,
        Json(MessageResponse {
            message: message.to_string(),
            data,
        }),
    )
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::new().allow_origin(Any);
    }
    let origins = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect::<Vec<_>>();
    CorsLayer::new().allow_origin(origins)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let protected = Router::new()
        .merge(budgets::router())
        .merge(tasks::router())
        .merge(projects::router())
        .merge(transactions::router())
        .merge(entities::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_jwt));

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/auth/login", post(login))
        .route("/auth/status", get(auth_status))
        .merge(protected);

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors_layer(config))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
