use std::{collections::HashMap, sync::Arc, time::Duration};

use gauntlet_primitives::{
    alloy::{
        primitives::Address,
        signers::{PrivateKeySigner, SignerSync},
        utils::hex,
    },
    signing::{auction_signing_hash, SigningDomain},
    AuctionEvent, AuctionId, Bid, DepositRequest,
};
use gauntlet_server::{
    engine::{AuctionConfig, AuctionEngine},
    subscription_manager::SubscriptionManager,
};
use rstest::*;

/// anvil's first two dev accounts
pub const RELAYER_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const OTHER_RELAYER_KEY: &str =
    "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

pub const SETTLEMENT_CONTRACT: &str = "0x1111111111111111111111111111111111111111";

#[fixture]
pub fn deposit_request() -> DepositRequest {
    DepositRequest {
        recipient: format!("0x{}", "aa".repeat(20)),
        token_address: format!("0x{}", "bb".repeat(20)),
        amount: "1000".to_string(),
        destination_chain_id: 10,
        relayer_fee_pct: "1".to_string(),
        quote_timestamp: "100".to_string(),
        message: "0x".to_string(),
        max_count: "1".to_string(),
        tx_value: "0".to_string(),
        source_chain_id: 1,
    }
}

#[fixture]
pub fn relayer() -> PrivateKeySigner {
    RELAYER_KEY.parse().unwrap()
}

#[fixture]
pub fn other_relayer() -> PrivateKeySigner {
    OTHER_RELAYER_KEY.parse().unwrap()
}

pub fn settlement_contracts() -> HashMap<u64, Address> {
    HashMap::from([(10, SETTLEMENT_CONTRACT.parse().unwrap())])
}

pub fn auction_config(window_ms: u64, settlement_contracts: HashMap<u64, Address>) -> AuctionConfig {
    AuctionConfig {
        bid_wait_time: Duration::from_millis(window_ms),
        settlement_contracts,
        ..AuctionConfig::default()
    }
}

pub fn engine(
    config: AuctionConfig,
) -> (Arc<AuctionEngine>, Arc<SubscriptionManager<AuctionEvent>>) {
    engine_with(config, |engine| engine)
}

pub fn engine_with<F>(
    config: AuctionConfig,
    customize: F,
) -> (Arc<AuctionEngine>, Arc<SubscriptionManager<AuctionEvent>>)
where
    F: FnOnce(AuctionEngine) -> AuctionEngine,
{
    let subscription_manager = Arc::new(SubscriptionManager::new(64));
    let engine = customize(AuctionEngine::new(config, subscription_manager.clone()));
    (Arc::new(engine), subscription_manager)
}

/// Sign `(auction_id, expiry)` the way a relayer would.
pub fn sign_bid(
    signer: &PrivateKeySigner,
    auction_id: AuctionId,
    destination_chain_id: u64,
    expiry: u64,
) -> Bid {
    let digest = auction_signing_hash(
        &SigningDomain::default(),
        destination_chain_id,
        auction_id,
        u32::try_from(expiry).unwrap(),
    );
    let signature = signer.sign_hash_sync(&digest).unwrap();
    Bid {
        auction_id: auction_id.to_string(),
        relayer_address: signer.address().to_checksum(None),
        signature: hex::encode_prefixed(signature.as_bytes()),
    }
}
