use std::{
    collections::HashMap,
    fmt,
    sync::{Mutex, PoisonError},
};

use gauntlet_primitives::{alloy::primitives::Address, ParsedBid};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, RngCore, SeedableRng};

/// Picks the auction winner from the final bid set.
pub trait WinnerSelector: Send + Sync + fmt::Debug {
    fn select(&self, bids: &HashMap<Address, ParsedBid>) -> Option<ParsedBid>;
}

/// Uniform draw over the distinct bidders. Bidders are sorted first, so a seeded generator
/// always yields the same winner for the same bid set.
pub fn select_winner<R: Rng + ?Sized>(
    bids: &HashMap<Address, ParsedBid>,
    rng: &mut R,
) -> Option<ParsedBid> {
    let mut bidders: Vec<&Address> = bids.keys().collect();
    bidders.sort_unstable();
    let winner = bidders.choose(rng)?;
    bids.get(*winner).cloned()
}

pub struct RandomWinnerSelector<R = StdRng> {
    rng: Mutex<R>,
}

impl RandomWinnerSelector<StdRng> {
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R> RandomWinnerSelector<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl<R> fmt::Debug for RandomWinnerSelector<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomWinnerSelector").finish_non_exhaustive()
    }
}

impl<R: RngCore + Send> WinnerSelector for RandomWinnerSelector<R> {
    fn select(&self, bids: &HashMap<Address, ParsedBid>) -> Option<ParsedBid> {
        // a panic while drawing cannot leave the generator in a state worth refusing
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        select_winner(bids, &mut *rng)
    }
}
