use std::{fmt, str::FromStr};

use alloy::{
    primitives::{keccak256, FixedBytes, U256},
    sol_types::SolValue,
};
use serde::{Deserialize, Serialize};

use crate::{deposit::ParsedDeposit, PrimitivesError};

/// First 4 bytes of the keccak256 hash of the ABI encoded deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuctionId(FixedBytes<4>);

impl AuctionId {
    pub const LENGTH: usize = 4;

    #[must_use]
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(FixedBytes(bytes))
    }

    /// Derive the id from the deposit content. Identical deposits always share an id.
    #[must_use]
    pub fn fingerprint(deposit: &ParsedDeposit) -> Self {
        let encoded = (
            deposit.recipient,
            deposit.token_address,
            deposit.amount,
            U256::from(deposit.destination_chain_id),
            deposit.relayer_fee_pct,
            deposit.quote_timestamp,
            deposit.message.clone(),
            deposit.max_count,
            deposit.tx_value,
            U256::from(deposit.source_chain_id),
        )
            .abi_encode_params();

        let hash = keccak256(encoded);
        Self(FixedBytes::from_slice(&hash[..Self::LENGTH]))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0 .0
    }

    /// The id as the `uint32` relayers sign over.
    #[must_use]
    pub fn as_u32(&self) -> u32 {
        u32::from_be_bytes(self.0 .0)
    }
}

impl fmt::Display for AuctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", alloy::hex::encode(self.0))
    }
}

impl FromStr for AuctionId {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").ok_or_else(|| {
            PrimitivesError::ValidationError("auctionId: missing 0x prefix".into())
        })?;
        if digits.len() != Self::LENGTH * 2 {
            return Err(PrimitivesError::ValidationError(
                "auctionId: expected 4 bytes".into(),
            ));
        }
        FixedBytes::<4>::from_str(digits)
            .map(Self)
            .map_err(|e| PrimitivesError::ValidationError(format!("auctionId: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DepositRequest;

    fn reference_deposit() -> DepositRequest {
        DepositRequest {
            recipient: format!("0x{}", "aa".repeat(20)),
            token_address: format!("0x{}", "bb".repeat(20)),
            amount: "1000".to_string(),
            destination_chain_id: 10,
            relayer_fee_pct: "1".to_string(),
            quote_timestamp: "100".to_string(),
            message: "0x".to_string(),
            max_count: "1".to_string(),
            tx_value: "0".to_string(),
            source_chain_id: 1,
        }
    }

    #[test]
    fn fingerprint_matches_abi_encoding() {
        let id = reference_deposit().parse().unwrap().auction_id();
        assert_eq!(id.to_string(), "0xccc3f0a2");
        assert_eq!(id.as_u32(), 0xccc3_f0a2);
    }

    #[test]
    fn fingerprint_sign_extends_negative_fee() {
        let mut deposit = reference_deposit();
        deposit.relayer_fee_pct = "-1".to_string();
        deposit.message = "0x0102".to_string();
        assert_eq!(
            deposit.parse().unwrap().auction_id().to_string(),
            "0x31a90b56"
        );
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let deposit = reference_deposit().parse().unwrap();
        assert_eq!(deposit.auction_id(), deposit.auction_id());
        assert_eq!(
            deposit.auction_id(),
            reference_deposit().parse().unwrap().auction_id()
        );
    }

    #[test]
    fn fingerprint_changes_with_content() {
        let mut other = reference_deposit();
        other.amount = "1001".to_string();
        assert_ne!(
            reference_deposit().parse().unwrap().auction_id(),
            other.parse().unwrap().auction_id()
        );
    }

    #[test]
    fn parses_either_hex_case() {
        let id: AuctionId = "0xCCC3F0A2".parse().unwrap();
        assert_eq!(id, AuctionId::new([0xcc, 0xc3, 0xf0, 0xa2]));
        assert!("ccc3f0a2".parse::<AuctionId>().is_err());
        assert!("0xccc3f0".parse::<AuctionId>().is_err());
        assert!("0xccc3f0zz".parse::<AuctionId>().is_err());
    }
}
