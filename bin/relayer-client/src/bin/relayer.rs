use std::{env, str::FromStr};

use color_eyre::{eyre::Context, Result};
use dotenv::dotenv;
use gauntlet_client::{api::submit::AuctionApiClient, bidder::BidSigner, relayer::RelayerClient};
use gauntlet_primitives::{alloy::signers::PrivateKeySigner, DepositRequest};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use url::Url;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_max_level(Level::INFO)
        .init();

    // Load environment variables from the `.env` file
    dotenv().ok();
    let server_url = Url::parse(
        &env::var("SERVER_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
    )?;
    let priv_key = env::var("RELAYER_PRIVATE_KEY").context("RELAYER_PRIVATE_KEY is not set")?;
    let signer = PrivateKeySigner::from_str(&priv_key)?;

    let mut relayer = RelayerClient::new(server_url.clone(), BidSigner::new(signer))?;
    if let Ok(chains) = env::var("DESTINATION_CHAIN_IDS") {
        let chain_ids = chains
            .split(',')
            .map(|id| id.trim().parse::<u64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("DESTINATION_CHAIN_IDS must be a comma separated list of chain ids")?;
        relayer = relayer.with_destination_chains(chain_ids);
    }
    let relayer_task = tokio::spawn(async move { relayer.run().await });

    // optionally drive some activity through the auction house
    if let Ok(path) = env::var("DEMO_DEPOSIT") {
        let deposit: DepositRequest = serde_json::from_str(
            &std::fs::read_to_string(&path).context(format!("Failed to read {path}"))?,
        )
        .context("Invalid demo deposit")?;
        let api = AuctionApiClient::new(server_url)?;
        let return_data = api.submit_deposit(&deposit).await?;
        tracing::info!(
            "demo deposit settled: recipient {}, message {}",
            return_data.recipient,
            return_data.message
        );
    }

    relayer_task.await??;
    Ok(())
}
