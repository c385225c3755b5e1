//! Core types for the Gauntlet relayer auction
//!
//! This crate re-exports the alloy types used across the workspace so that the server,
//! client and binaries agree on a single version, and provides the pure pieces of the
//! auction: deposit/bid wire types, input validation, fingerprinting, typed-data bid
//! authentication and return-data synthesis.

pub mod alloy {
    pub mod primitives {
        pub use alloy::primitives::{
            address, fixed_bytes, keccak256, Address, Bytes, FixedBytes, PrimitiveSignature, B256,
            U256,
        };
    }

    pub mod signers {
        pub use alloy::signers::{local::PrivateKeySigner, Signer, SignerSync};
    }

    pub mod sol_types {
        pub use alloy::sol_types::{Eip712Domain, SolStruct, SolValue};
    }

    pub mod utils {
        pub use alloy::hex;
    }
}

pub mod auction_id;
pub mod bid;
pub mod constants;
pub mod deposit;
pub mod error;
pub mod events;
pub mod return_data;
pub mod signing;
pub mod utils;
pub mod validation;

pub use auction_id::AuctionId;
pub use bid::{Bid, ParsedBid};
pub use deposit::{DepositRequest, ParsedDeposit};
pub use error::{PrimitivesError, Result};
pub use events::AuctionEvent;
pub use return_data::{DepositReturnData, ExclusiveRelayMessage, ReturnDataSynthesizer};
