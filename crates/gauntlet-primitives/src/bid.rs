use alloy::primitives::{Address, FixedBytes};
use serde::{Deserialize, Serialize};

use crate::{
    auction_id::AuctionId,
    constants::SIGNATURE_LENGTH,
    validation::{parse_address, parse_bytes},
    PrimitivesError, Result,
};

/// Bid as submitted by a relayer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub auction_id: String,
    pub relayer_address: String,
    pub signature: String,
}

impl Bid {
    /// Check the bid's format. Whether the auction is open is up to the registry.
    pub fn parse(&self) -> Result<ParsedBid> {
        ParsedBid::try_from(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBid {
    pub auction_id: AuctionId,
    pub relayer_address: Address,
    pub signature: FixedBytes<SIGNATURE_LENGTH>,
}

impl TryFrom<&Bid> for ParsedBid {
    type Error = PrimitivesError;

    fn try_from(bid: &Bid) -> Result<Self> {
        let signature = parse_bytes("signature", &bid.signature)?;
        if signature.len() != SIGNATURE_LENGTH {
            return Err(PrimitivesError::ValidationError(format!(
                "signature: expected {SIGNATURE_LENGTH} bytes, got {}",
                signature.len()
            )));
        }

        Ok(Self {
            auction_id: bid.auction_id.parse()?,
            relayer_address: parse_address("relayerAddress", &bid.relayer_address)?,
            signature: FixedBytes::from_slice(&signature),
        })
    }
}
