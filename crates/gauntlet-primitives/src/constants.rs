use std::collections::HashMap;

use alloy::primitives::{address, Address};
use lazy_static::lazy_static;

/// EIP-712 domain name relayers sign bids under.
pub const SIGNING_DOMAIN_NAME: &str = "RelayerCartel";
/// EIP-712 domain version relayers sign bids under.
pub const SIGNING_DOMAIN_VERSION: &str = "0";

/// Default length of the bidding window.
pub const DEFAULT_BID_WAIT_TIME_MS: u64 = 60 * 1000;
/// Default length of the winner's exclusive fill window.
pub const DEFAULT_WINNER_PERMISSION_TIME_SECS: u64 = 60 * 5;
/// Longest bidding window a server accepts.
pub const MAX_BID_WAIT_TIME_MS: u64 = 24 * 60 * 60 * 1000;
/// Longest exclusive fill window a server accepts. Keeps signed `uint32` expiries in range.
pub const MAX_WINNER_PERMISSION_TIME_SECS: u64 = 7 * 24 * 60 * 60;

pub const SIGNATURE_LENGTH: usize = 65;

lazy_static! {
    /// Settlement contracts that understand the exclusive relay message, keyed by chain id.
    pub static ref DEFAULT_SETTLEMENT_CONTRACTS: HashMap<u64, Address> = HashMap::from([
        // Ethereum Goerli
        (5, address!("55ac15D7f3610c3aaf3f891cA62964B30e7fAb68")),
        // Arbitrum Goerli
        (421613, address!("284ca1d6841C05942658Cd062E220Cb831964872")),
    ]);
}
