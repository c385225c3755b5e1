use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::app_state::AppState;

pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let open_auctions = state.engine().registry().open_auctions().await;
    Json(json!({ "status": "ok", "openAuctions": open_auctions }))
}
