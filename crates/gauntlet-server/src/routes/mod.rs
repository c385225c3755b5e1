use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::app_state::AppState;

pub mod bid;
pub mod deposit;
pub mod health;
pub mod subscribe;

pub const MAX_BODY_SIZE: usize = 1024 * 1024;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/deposit", post(deposit::submit_deposit_handler))
        .route("/bid", post(bid::submit_bid_handler))
        .route("/subscribe", get(subscribe::websocket_subscribe_handler))
        .route("/health", get(health::health_handler))
        .fallback(fallback)
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
}

pub async fn fallback() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "not_found", "message": "404 Not Found" })),
    )
}
