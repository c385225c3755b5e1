use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::{
    auction_id::AuctionId,
    validation::{
        parse_address, parse_bytes, parse_int64, parse_uint256, parse_uint32, validate_chain_id,
    },
    Result,
};

/// Deposit as submitted by a depositor. Big numbers travel as strings, chain ids as numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    pub recipient: String,
    pub token_address: String,
    pub amount: String,
    pub destination_chain_id: u64,
    pub relayer_fee_pct: String,
    pub quote_timestamp: String,
    pub message: String,
    pub max_count: String,
    pub tx_value: String,
    pub source_chain_id: u64,
}

impl DepositRequest {
    /// Validate every field and return the typed representation.
    pub fn parse(&self) -> Result<ParsedDeposit> {
        ParsedDeposit::try_from(self)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.parse().is_ok()
    }
}

/// A deposit whose fields passed shape and bound checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDeposit {
    pub recipient: Address,
    pub token_address: Address,
    pub amount: U256,
    pub destination_chain_id: u64,
    pub relayer_fee_pct: i64,
    pub quote_timestamp: u32,
    pub message: Bytes,
    pub max_count: U256,
    pub tx_value: U256,
    pub source_chain_id: u64,
    /// Original wire form, kept so pass-through responses echo the depositor's exact strings.
    pub request: DepositRequest,
}

impl ParsedDeposit {
    #[must_use]
    pub fn auction_id(&self) -> AuctionId {
        AuctionId::fingerprint(self)
    }
}

impl TryFrom<&DepositRequest> for ParsedDeposit {
    type Error = crate::PrimitivesError;

    fn try_from(deposit: &DepositRequest) -> Result<Self> {
        Ok(Self {
            recipient: parse_address("recipient", &deposit.recipient)?,
            token_address: parse_address("tokenAddress", &deposit.token_address)?,
            source_chain_id: validate_chain_id("sourceChainId", deposit.source_chain_id)?,
            // unsupported destinations still run an auction and fall back to pass-through
            destination_chain_id: validate_chain_id(
                "destinationChainId",
                deposit.destination_chain_id,
            )?,
            amount: parse_uint256("amount", &deposit.amount)?,
            relayer_fee_pct: parse_int64("relayerFeePct", &deposit.relayer_fee_pct)?,
            quote_timestamp: parse_uint32("quoteTimestamp", &deposit.quote_timestamp)?,
            message: parse_bytes("message", &deposit.message)?,
            max_count: parse_uint256("maxCount", &deposit.max_count)?,
            tx_value: parse_uint256("txValue", &deposit.tx_value)?,
            request: deposit.clone(),
        })
    }
}
