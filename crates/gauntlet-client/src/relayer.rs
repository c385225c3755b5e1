use futures_util::StreamExt;
use gauntlet_primitives::{events::AuctionBroadcastData, AuctionEvent};
use url::Url;

use crate::{
    api::{submit::AuctionApiClient, subscribe::SubscribeApiClient},
    bidder::BidSigner,
    error::{ClientError, Result},
};

/// Relayer that listens to the auction house and bids on every announced deposit.
#[derive(Debug, Clone)]
pub struct RelayerClient {
    api: AuctionApiClient,
    subscriber: SubscribeApiClient,
    bidder: BidSigner,
    chain_ids: Option<Vec<u64>>,
}

impl RelayerClient {
    pub fn new(server_url: Url, bidder: BidSigner) -> Result<Self> {
        Ok(Self {
            api: AuctionApiClient::new(server_url.clone())?,
            subscriber: SubscribeApiClient::new(server_url),
            bidder,
            chain_ids: None,
        })
    }

    /// Only bid on deposits headed to one of `chain_ids`.
    pub fn with_destination_chains(mut self, chain_ids: Vec<u64>) -> Self {
        self.chain_ids = Some(chain_ids);
        self
    }

    pub async fn run(&self) -> Result<()> {
        let mut events = self
            .subscriber
            .subscribe()
            .await
            .map_err(|e| ClientError::ServerSubscriptionError(e.to_string()))?;
        tracing::info!("relayer {} subscribed, waiting for deposits", self.bidder.address());

        while let Some(event) = events.next().await {
            match event {
                Ok(event) => self.handle_event(event).await,
                Err(e) => tracing::error!("Error receiving event: {e}"),
            }
        }

        tracing::info!("auction event stream ended");
        Ok(())
    }

    async fn handle_event(&self, event: AuctionEvent) {
        match event {
            AuctionEvent::Deposit(auction) => {
                if let Err(e) = self.bid(&auction).await {
                    tracing::error!("failed to bid on auction {}: {e}", auction.auction_id);
                }
            }
            AuctionEvent::Bid(bid) => tracing::info!(
                "auction {}: bid from {} at {}",
                bid.auction_id,
                bid.relayer_address,
                bid.bid_time_ms
            ),
            AuctionEvent::AuctionComplete(complete) => match complete.winning_relayer {
                Some(winner) if winner == self.bidder.address() => {
                    tracing::info!("auction {}: won", complete.auction_id)
                }
                Some(winner) => {
                    tracing::info!("auction {}: lost to {winner}", complete.auction_id)
                }
                None => tracing::info!("auction {}: closed without winner", complete.auction_id),
            },
        }
    }

    /// Sign and submit a bid for `auction`, unless its destination chain is filtered out.
    pub async fn bid(&self, auction: &AuctionBroadcastData) -> Result<bool> {
        let destination = auction.deposit.destination_chain_id;
        if let Some(chain_ids) = &self.chain_ids {
            if !chain_ids.contains(&destination) {
                tracing::debug!(
                    "skipping auction {} to chain {destination}",
                    auction.auction_id
                );
                return Ok(false);
            }
        }

        let bid = self.bidder.bid_for(auction)?;
        self.api.submit_bid(&bid).await?;
        tracing::info!(
            "bid on auction {} for {} to chain {destination}",
            auction.auction_id,
            auction.deposit.amount
        );
        Ok(true)
    }
}
