use std::collections::HashMap;

use alloy::primitives::{Address, Bytes, FixedBytes};
use serde::{Deserialize, Serialize};

use crate::{
    auction_id::AuctionId, bid::ParsedBid, constants::SIGNATURE_LENGTH, deposit::ParsedDeposit,
    utils::exclusivity_expiry, PrimitivesError, Result,
};

/// Deposit instructions handed back to the depositor once the auction is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositReturnData {
    pub recipient: String,
    pub relayer_fee_pct: String,
    pub message: String,
}

impl DepositReturnData {
    /// The depositor's own instructions, untouched.
    #[must_use]
    pub fn pass_through(deposit: &ParsedDeposit) -> Self {
        Self {
            recipient: deposit.request.recipient.clone(),
            relayer_fee_pct: deposit.request.relayer_fee_pct.clone(),
            message: deposit.request.message.clone(),
        }
    }
}

/// Message a settlement contract receives in place of the depositor's message. It proves which
/// relayer won the auction and until when that relayer holds exclusive fill rights.
///
/// Layout: `auction_id (4) | expiry (4, big endian) | recipient (20) | signature (65) | message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusiveRelayMessage {
    pub auction_id: AuctionId,
    pub expiry: u32,
    pub recipient: Address,
    pub signature: FixedBytes<SIGNATURE_LENGTH>,
    pub message: Bytes,
}

impl ExclusiveRelayMessage {
    pub const HEADER_LENGTH: usize = AuctionId::LENGTH + 4 + 20 + SIGNATURE_LENGTH;

    #[must_use]
    pub fn encode(&self) -> Bytes {
        let mut encoded = Vec::with_capacity(Self::HEADER_LENGTH + self.message.len());
        encoded.extend_from_slice(self.auction_id.as_bytes());
        encoded.extend_from_slice(&self.expiry.to_be_bytes());
        encoded.extend_from_slice(self.recipient.as_slice());
        encoded.extend_from_slice(self.signature.as_slice());
        encoded.extend_from_slice(&self.message);
        encoded.into()
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < Self::HEADER_LENGTH {
            return Err(PrimitivesError::DecodingError(format!(
                "exclusive relay message needs at least {} bytes, got {}",
                Self::HEADER_LENGTH,
                data.len()
            )));
        }

        let (auction_id, rest) = data.split_at(AuctionId::LENGTH);
        let (expiry, rest) = rest.split_at(4);
        let (recipient, rest) = rest.split_at(20);
        let (signature, message) = rest.split_at(SIGNATURE_LENGTH);

        let mut id = [0u8; AuctionId::LENGTH];
        id.copy_from_slice(auction_id);
        let mut expiry_bytes = [0u8; 4];
        expiry_bytes.copy_from_slice(expiry);

        Ok(Self {
            auction_id: AuctionId::new(id),
            expiry: u32::from_be_bytes(expiry_bytes),
            recipient: Address::from_slice(recipient),
            signature: FixedBytes::from_slice(signature),
            message: Bytes::copy_from_slice(message),
        })
    }
}

/// Builds the depositor's return data from the auction outcome.
#[derive(Debug, Clone)]
pub struct ReturnDataSynthesizer {
    settlement_contracts: HashMap<u64, Address>,
    winner_permission_time_secs: u64,
}

impl ReturnDataSynthesizer {
    #[must_use]
    pub fn new(settlement_contracts: HashMap<u64, Address>, winner_permission_time_secs: u64) -> Self {
        Self {
            settlement_contracts,
            winner_permission_time_secs,
        }
    }

    #[must_use]
    pub fn settlement_contract(&self, chain_id: u64) -> Option<Address> {
        self.settlement_contracts.get(&chain_id).copied()
    }

    /// Without a winner, or without a settlement contract on the destination chain, the
    /// deposit passes through unchanged. Otherwise the deposit is redirected to the settlement
    /// contract with a fresh exclusivity window starting at `now_ms`.
    #[must_use]
    pub fn synthesize(
        &self,
        deposit: &ParsedDeposit,
        winning_bid: Option<&ParsedBid>,
        now_ms: u64,
    ) -> DepositReturnData {
        let (Some(bid), Some(settlement)) = (
            winning_bid,
            self.settlement_contract(deposit.destination_chain_id),
        ) else {
            return DepositReturnData::pass_through(deposit);
        };

        let expiry = exclusivity_expiry(now_ms, self.winner_permission_time_secs);
        let message = ExclusiveRelayMessage {
            auction_id: bid.auction_id,
            expiry: u32::try_from(expiry).unwrap_or(u32::MAX),
            recipient: deposit.recipient,
            signature: bid.signature,
            message: deposit.message.clone(),
        };

        DepositReturnData {
            recipient: settlement.to_checksum(None),
            relayer_fee_pct: deposit.request.relayer_fee_pct.clone(),
            message: alloy::hex::encode_prefixed(message.encode()),
        }
    }
}
