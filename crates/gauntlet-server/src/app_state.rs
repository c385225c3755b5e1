use std::sync::Arc;

use gauntlet_primitives::AuctionEvent;

use crate::{engine::AuctionEngine, subscription_manager::SubscriptionManager};

#[derive(Clone, Debug)]
pub struct AppState {
    engine: Arc<AuctionEngine>,
    subscription_manager: Arc<SubscriptionManager<AuctionEvent>>,
}

impl AppState {
    pub fn new(
        engine: Arc<AuctionEngine>,
        subscription_manager: Arc<SubscriptionManager<AuctionEvent>>,
    ) -> Self {
        Self {
            engine,
            subscription_manager,
        }
    }

    pub fn engine(&self) -> Arc<AuctionEngine> {
        self.engine.clone()
    }

    pub fn subscription_manager(&self) -> Arc<SubscriptionManager<AuctionEvent>> {
        self.subscription_manager.clone()
    }
}
