use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use gauntlet_primitives::Bid;
use serde_json::json;

use crate::{app_state::AppState, error::Result};

pub async fn submit_bid_handler(
    State(state): State<AppState>,
    Json(bid): Json<Bid>,
) -> Result<impl IntoResponse> {
    tracing::debug!("bid submitted by {} for {}", bid.relayer_address, bid.auction_id);
    state.engine().submit_bid(bid).await?;
    Ok((StatusCode::OK, Json(json!({ "message": "Bid accepted" }))))
}
