use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::{auction_id::AuctionId, deposit::DepositRequest};

/// Auction announcement sent to relayers when a deposit opens an auction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionBroadcastData {
    pub auction_id: AuctionId,
    pub deposit: DepositRequest,
    /// Bids must arrive before this unix time in milliseconds.
    pub bid_deadline_ms: u64,
    /// Unix seconds until which the winner holds exclusive fill rights. Bidders sign over it.
    pub expiry: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidBroadcastData {
    pub auction_id: AuctionId,
    pub relayer_address: Address,
    pub bid_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionCompleteBroadcastData {
    pub auction_id: AuctionId,
    /// Unset when the deposit falls back to non-exclusive filling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winning_relayer: Option<Address>,
}

/// Everything observers of the auction house are told about, as `{"type": .., "data": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AuctionEvent {
    Deposit(AuctionBroadcastData),
    Bid(BidBroadcastData),
    AuctionComplete(AuctionCompleteBroadcastData),
}

impl AuctionEvent {
    #[must_use]
    pub fn auction_id(&self) -> AuctionId {
        match self {
            Self::Deposit(data) => data.auction_id,
            Self::Bid(data) => data.auction_id,
            Self::AuctionComplete(data) => data.auction_id,
        }
    }
}
