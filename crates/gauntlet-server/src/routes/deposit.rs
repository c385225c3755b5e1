use axum::{extract::State, Json};
use gauntlet_primitives::{DepositRequest, DepositReturnData};

use crate::{app_state::AppState, error::Result};

/// Responds once the deposit's auction has closed.
pub async fn submit_deposit_handler(
    State(state): State<AppState>,
    Json(deposit): Json<DepositRequest>,
) -> Result<Json<DepositReturnData>> {
    tracing::info!(
        "deposit submitted: {} to {} on chain {}",
        deposit.amount,
        deposit.recipient,
        deposit.destination_chain_id
    );
    let return_data = state.engine().submit_deposit(deposit).await?;
    Ok(Json(return_data))
}
