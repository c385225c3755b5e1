use gauntlet_primitives::AuctionEvent;
use tokio::sync::broadcast;

use crate::{
    engine::Notifier,
    error::{Result, ServerError},
};

pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Fans auction events out to every connected subscriber.
#[derive(Debug)]
pub struct SubscriptionManager<M = AuctionEvent> {
    sender: broadcast::Sender<M>,
}

impl<M: Clone> SubscriptionManager<M> {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn add_subscription(&self) -> broadcast::Receiver<M> {
        self.sender.subscribe()
    }

    /// Send `message` to all current subscribers, returning how many received it.
    pub fn broadcast(&self, message: M) -> Result<usize> {
        if self.sender.receiver_count() == 0 {
            return Err(ServerError::BroadcastError(
                "no active subscribers".to_string(),
            ));
        }
        self.sender
            .send(message)
            .map_err(|e| ServerError::BroadcastError(e.to_string()))
    }

    pub fn active_subscriptions(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<M: Clone> Default for SubscriptionManager<M> {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

impl Notifier for SubscriptionManager<AuctionEvent> {
    fn notify(&self, event: AuctionEvent) -> Result<usize> {
        self.broadcast(event)
    }
}
