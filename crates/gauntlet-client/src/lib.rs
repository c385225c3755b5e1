pub mod api;
pub mod bidder;
pub mod error;
pub mod relayer;
