//! In-flight auctions.
//!
//! The registry is the only shared mutable state of the auction house. Every operation takes
//! the lock for a single map access, so check-and-insert, bid upsert and close are each atomic
//! and no lock is ever held across the bidding window or signature recovery.

use std::collections::HashMap;

use gauntlet_primitives::{alloy::primitives::Address, AuctionId, ParsedBid, ParsedDeposit};
use tokio::sync::RwLock;

use crate::error::{Result, ServerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuctionStatus {
    Open,
    /// Bidding window elapsed, winner selection in progress. Bids are refused.
    Closing,
}

#[derive(Debug, Clone)]
pub struct AuctionRecord {
    pub deposit: ParsedDeposit,
    /// Unix seconds until which the winner holds exclusive fill rights.
    pub expiry: u64,
    /// Latest bid per relayer.
    pub bids: HashMap<Address, ParsedBid>,
    pub status: AuctionStatus,
}

impl AuctionRecord {
    #[must_use]
    pub fn new(deposit: ParsedDeposit, expiry: u64) -> Self {
        Self {
            deposit,
            expiry,
            bids: HashMap::new(),
            status: AuctionStatus::Open,
        }
    }
}

/// What a bid is authenticated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenAuction {
    pub destination_chain_id: u64,
    pub expiry: u64,
}

#[derive(Debug, Default)]
pub struct AuctionRegistry {
    auctions: RwLock<HashMap<AuctionId, AuctionRecord>>,
}

impl AuctionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new auction, refusing ids that are still open or closing.
    pub async fn open(&self, auction_id: AuctionId, record: AuctionRecord) -> Result<()> {
        let mut auctions = self.auctions.write().await;
        if auctions.contains_key(&auction_id) {
            return Err(ServerError::Conflict(auction_id));
        }
        auctions.insert(auction_id, record);
        Ok(())
    }

    pub async fn lookup_open(&self, auction_id: AuctionId) -> Option<OpenAuction> {
        let auctions = self.auctions.read().await;
        auctions
            .get(&auction_id)
            .filter(|record| record.status == AuctionStatus::Open)
            .map(|record| OpenAuction {
                destination_chain_id: record.deposit.destination_chain_id,
                expiry: record.expiry,
            })
    }

    /// Insert or replace the relayer's bid. Fails if the auction closed since the bid was
    /// authenticated against `expected`.
    pub async fn record_bid(&self, bid: ParsedBid, expected: OpenAuction) -> Result<()> {
        let mut auctions = self.auctions.write().await;
        let record = auctions
            .get_mut(&bid.auction_id)
            .filter(|record| {
                record.status == AuctionStatus::Open
                    && record.expiry == expected.expiry
                    && record.deposit.destination_chain_id == expected.destination_chain_id
            })
            .ok_or_else(|| not_open(bid.auction_id))?;
        record.bids.insert(bid.relayer_address, bid);
        Ok(())
    }

    /// Stop accepting bids and hand out the final bid set.
    pub async fn close(&self, auction_id: AuctionId) -> Result<HashMap<Address, ParsedBid>> {
        let mut auctions = self.auctions.write().await;
        match auctions.get_mut(&auction_id) {
            Some(record) if record.status == AuctionStatus::Open => {
                record.status = AuctionStatus::Closing;
                Ok(std::mem::take(&mut record.bids))
            }
            _ => Err(ServerError::InternalInvariantViolation(auction_id)),
        }
    }

    pub async fn purge(&self, auction_id: AuctionId) -> Option<AuctionRecord> {
        self.auctions.write().await.remove(&auction_id)
    }

    pub async fn bids(&self, auction_id: AuctionId) -> Option<HashMap<Address, ParsedBid>> {
        let auctions = self.auctions.read().await;
        auctions.get(&auction_id).map(|record| record.bids.clone())
    }

    pub async fn open_auctions(&self) -> usize {
        self.auctions.read().await.len()
    }
}

fn not_open(auction_id: AuctionId) -> ServerError {
    ServerError::InvalidInput(format!("auction {auction_id} is not open"))
}
