//! Typed-data bid authentication.
//!
//! A relayer bids by signing `auction(uint32 id,uint32 expiry)` under an EIP-712 domain bound to
//! the deposit's destination chain. Binding both the id and the expiry stops a signature from
//! being replayed into another auction or stretched over a different exclusivity window.

use std::{borrow::Cow, fmt, sync::Arc};

use alloy::{
    primitives::{Address, PrimitiveSignature, B256, U256},
    sol,
    sol_types::{Eip712Domain, SolStruct},
};
use serde::{Deserialize, Serialize};

use crate::{
    auction_id::AuctionId,
    bid::ParsedBid,
    constants::{SIGNING_DOMAIN_NAME, SIGNING_DOMAIN_VERSION},
    PrimitivesError, Result,
};

sol! {
    #[allow(non_camel_case_types)]
    struct auction {
        uint32 id;
        uint32 expiry;
    }
}

/// The EIP-712 message relayers sign.
pub type AuctionPayload = auction;

/// Name and version of the signing domain. The chain id is taken from each deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningDomain {
    pub name: String,
    pub version: String,
}

impl Default for SigningDomain {
    fn default() -> Self {
        Self {
            name: SIGNING_DOMAIN_NAME.to_string(),
            version: SIGNING_DOMAIN_VERSION.to_string(),
        }
    }
}

impl SigningDomain {
    #[must_use]
    pub fn for_chain(&self, chain_id: u64) -> Eip712Domain {
        Eip712Domain::new(
            Some(Cow::Owned(self.name.clone())),
            Some(Cow::Owned(self.version.clone())),
            Some(U256::from(chain_id)),
            None,
            None,
        )
    }
}

/// Digest a relayer signs to bid on `auction_id` for a deposit headed to `chain_id`.
#[must_use]
pub fn auction_signing_hash(
    domain: &SigningDomain,
    chain_id: u64,
    auction_id: AuctionId,
    expiry: u32,
) -> B256 {
    let payload = AuctionPayload {
        id: auction_id.as_u32(),
        expiry,
    };
    payload.eip712_signing_hash(&domain.for_chain(chain_id))
}

/// Recovers the address that signed a typed payload.
pub trait SignatureRecoverer: Send + Sync + fmt::Debug {
    fn recover(
        &self,
        domain: &Eip712Domain,
        payload: &AuctionPayload,
        signature: &[u8],
    ) -> Result<Address>;
}

/// ECDSA recovery over the EIP-712 signing hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct Eip712Recoverer;

impl SignatureRecoverer for Eip712Recoverer {
    fn recover(
        &self,
        domain: &Eip712Domain,
        payload: &AuctionPayload,
        signature: &[u8],
    ) -> Result<Address> {
        let signature = PrimitiveSignature::try_from(signature)
            .map_err(|e| PrimitivesError::SignatureError(e.to_string()))?;
        let digest = payload.eip712_signing_hash(domain);
        signature
            .recover_address_from_prehash(&digest)
            .map_err(|e| PrimitivesError::SignatureError(format!("ec recover failed: {e}")))
    }
}

#[derive(Debug, Clone)]
pub struct BidAuthenticator {
    domain: SigningDomain,
    recoverer: Arc<dyn SignatureRecoverer>,
}

impl BidAuthenticator {
    #[must_use]
    pub fn new(domain: SigningDomain) -> Self {
        Self::with_recoverer(domain, Arc::new(Eip712Recoverer))
    }

    #[must_use]
    pub fn with_recoverer(domain: SigningDomain, recoverer: Arc<dyn SignatureRecoverer>) -> Self {
        Self { domain, recoverer }
    }

    #[must_use]
    pub fn domain(&self) -> &SigningDomain {
        &self.domain
    }

    /// Succeeds iff the bid's signature over `(auction_id, expiry)` recovers to its relayer.
    pub fn authenticate(
        &self,
        bid: &ParsedBid,
        destination_chain_id: u64,
        expiry: u64,
    ) -> Result<()> {
        let expiry = u32::try_from(expiry).map_err(|_| {
            PrimitivesError::SignatureError("auction expiry exceeds uint32".into())
        })?;
        let payload = AuctionPayload {
            id: bid.auction_id.as_u32(),
            expiry,
        };

        let signer = self.recoverer.recover(
            &self.domain.for_chain(destination_chain_id),
            &payload,
            bid.signature.as_slice(),
        )?;

        if signer != bid.relayer_address {
            return Err(PrimitivesError::SignatureError(format!(
                "recovered signer {signer} != relayer {}",
                bid.relayer_address
            )));
        }
        Ok(())
    }
}
