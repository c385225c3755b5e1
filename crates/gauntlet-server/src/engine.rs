//! Auction lifecycle.
//!
//! A deposit opens an auction and waits out the bidding window in a task of its own, so the
//! auction concludes even when the depositor disconnects. Bids are authenticated outside the
//! registry lock and then upserted only if the auction is still open.

use std::{collections::HashMap, fmt, sync::Arc, time::Duration};

use gauntlet_primitives::{
    alloy::primitives::Address,
    constants::{
        DEFAULT_BID_WAIT_TIME_MS, DEFAULT_SETTLEMENT_CONTRACTS,
        DEFAULT_WINNER_PERMISSION_TIME_SECS,
    },
    events::{AuctionBroadcastData, AuctionCompleteBroadcastData, BidBroadcastData},
    signing::{BidAuthenticator, SigningDomain},
    utils::{exclusivity_expiry, now_ms},
    AuctionEvent, AuctionId, Bid, DepositRequest, DepositReturnData, ParsedBid, ParsedDeposit,
    ReturnDataSynthesizer,
};
use tokio::{
    sync::oneshot,
    time::{sleep_until, Instant},
};

use crate::{
    error::{Result, ServerError},
    registry::{AuctionRecord, AuctionRegistry},
    selector::{RandomWinnerSelector, WinnerSelector},
};

/// Receives auction events. Delivery is best effort.
pub trait Notifier: Send + Sync + fmt::Debug {
    /// Returns the number of observers the event reached.
    fn notify(&self, event: AuctionEvent) -> Result<usize>;
}

#[derive(Debug, Clone)]
pub struct AuctionConfig {
    pub bid_wait_time: Duration,
    pub winner_permission_time_secs: u64,
    pub settlement_contracts: HashMap<u64, Address>,
    pub signing_domain: SigningDomain,
}

impl Default for AuctionConfig {
    fn default() -> Self {
        Self {
            bid_wait_time: Duration::from_millis(DEFAULT_BID_WAIT_TIME_MS),
            winner_permission_time_secs: DEFAULT_WINNER_PERMISSION_TIME_SECS,
            settlement_contracts: DEFAULT_SETTLEMENT_CONTRACTS.clone(),
            signing_domain: SigningDomain::default(),
        }
    }
}

#[derive(Debug)]
pub struct AuctionEngine {
    registry: AuctionRegistry,
    authenticator: BidAuthenticator,
    selector: Arc<dyn WinnerSelector>,
    synthesizer: ReturnDataSynthesizer,
    notifier: Arc<dyn Notifier>,
    bid_wait_time: Duration,
    winner_permission_time_secs: u64,
}

impl AuctionEngine {
    pub fn new(config: AuctionConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            registry: AuctionRegistry::new(),
            authenticator: BidAuthenticator::new(config.signing_domain),
            selector: Arc::new(RandomWinnerSelector::from_entropy()),
            synthesizer: ReturnDataSynthesizer::new(
                config.settlement_contracts,
                config.winner_permission_time_secs,
            ),
            notifier,
            bid_wait_time: config.bid_wait_time,
            winner_permission_time_secs: config.winner_permission_time_secs,
        }
    }

    #[must_use]
    pub fn with_authenticator(mut self, authenticator: BidAuthenticator) -> Self {
        self.authenticator = authenticator;
        self
    }

    #[must_use]
    pub fn with_selector(mut self, selector: Arc<dyn WinnerSelector>) -> Self {
        self.selector = selector;
        self
    }

    pub fn registry(&self) -> &AuctionRegistry {
        &self.registry
    }

    /// Run an auction for `request` and return the deposit's final instructions once the
    /// bidding window has closed.
    pub async fn submit_deposit(self: &Arc<Self>, request: DepositRequest) -> Result<DepositReturnData> {
        let deposit = request.parse().map_err(|e| {
            tracing::warn!("rejected deposit: {e}");
            ServerError::InvalidInput(e.to_string())
        })?;
        let auction_id = deposit.auction_id();

        let started = Instant::now();
        let (Some(deadline), Some(bid_deadline_ms)) = (
            started.checked_add(self.bid_wait_time),
            now_ms().checked_add(self.bid_wait_time_ms()),
        ) else {
            tracing::error!(
                "auction {auction_id}: bidding window {:?} overflows the clock",
                self.bid_wait_time
            );
            return Err(ServerError::DeadlineOverflow(auction_id));
        };
        let expiry = exclusivity_expiry(bid_deadline_ms, self.winner_permission_time_secs);

        self.registry
            .open(auction_id, AuctionRecord::new(deposit.clone(), expiry))
            .await
            .inspect_err(|_| tracing::warn!("auction {auction_id} already running"))?;

        tracing::info!(
            "auction {auction_id} open for deposit to {} on chain {}, bids until {bid_deadline_ms}",
            deposit.recipient,
            deposit.destination_chain_id
        );
        self.notify(AuctionEvent::Deposit(AuctionBroadcastData {
            auction_id,
            deposit: request,
            bid_deadline_ms,
            expiry,
        }));

        let (outcome_tx, outcome_rx) = oneshot::channel();
        let engine = Arc::clone(self);
        tokio::spawn(async move {
            sleep_until(deadline).await;
            let outcome = engine.conclude(auction_id, &deposit).await;
            if outcome_tx.send(outcome).is_err() {
                tracing::debug!("depositor of auction {auction_id} went away before it closed");
            }
        });

        outcome_rx
            .await
            .map_err(|_| ServerError::InternalInvariantViolation(auction_id))?
    }

    /// Accept `bid` into its auction, replacing any earlier bid from the same relayer.
    pub async fn submit_bid(&self, bid: Bid) -> Result<()> {
        let bid_time_ms = now_ms();
        let bid = bid.parse().map_err(|e| {
            tracing::warn!("rejected bid: {e}");
            ServerError::InvalidInput(e.to_string())
        })?;
        let auction_id = bid.auction_id;

        let open = self.registry.lookup_open(auction_id).await.ok_or_else(|| {
            tracing::warn!("bid from {} for auction {auction_id} which is not open", bid.relayer_address);
            ServerError::InvalidInput(format!("auction {auction_id} is not open"))
        })?;

        self.authenticator
            .authenticate(&bid, open.destination_chain_id, open.expiry)
            .map_err(|e| {
                tracing::warn!("bid from {} for auction {auction_id} failed authentication: {e}", bid.relayer_address);
                ServerError::AuthenticationFailure(e.to_string())
            })?;

        let relayer_address = bid.relayer_address;
        self.registry.record_bid(bid, open).await?;

        tracing::debug!("auction {auction_id}: bid from {relayer_address} at {bid_time_ms}");
        self.notify(AuctionEvent::Bid(BidBroadcastData {
            auction_id,
            relayer_address,
            bid_time_ms,
        }));
        Ok(())
    }

    async fn conclude(&self, auction_id: AuctionId, deposit: &ParsedDeposit) -> Result<DepositReturnData> {
        let bids = match self.registry.close(auction_id).await {
            Ok(bids) => bids,
            Err(e) => {
                tracing::error!("closing auction {auction_id}: {e}");
                self.announce_winner(auction_id, None);
                return Err(e);
            }
        };

        let winner = self.selector.select(&bids);
        match &winner {
            Some(bid) => tracing::info!(
                "auction {auction_id} won by {} out of {} bidders",
                bid.relayer_address,
                bids.len()
            ),
            None => tracing::info!("auction {auction_id} closed without bids"),
        }
        self.announce_winner(auction_id, winner.as_ref());

        let return_data = self.synthesizer.synthesize(deposit, winner.as_ref(), now_ms());
        self.registry.purge(auction_id).await;
        Ok(return_data)
    }

    fn announce_winner(&self, auction_id: AuctionId, winner: Option<&ParsedBid>) {
        self.notify(AuctionEvent::AuctionComplete(AuctionCompleteBroadcastData {
            auction_id,
            winning_relayer: winner.map(|bid| bid.relayer_address),
        }));
    }

    fn notify(&self, event: AuctionEvent) {
        let auction_id = event.auction_id();
        match self.notifier.notify(event) {
            Ok(receivers) => tracing::debug!("auction {auction_id}: event sent to {receivers} subscribers"),
            Err(e) => tracing::warn!("auction {auction_id}: event not delivered: {e}"),
        }
    }

    fn bid_wait_time_ms(&self) -> u64 {
        u64::try_from(self.bid_wait_time.as_millis()).unwrap_or(u64::MAX)
    }
}
