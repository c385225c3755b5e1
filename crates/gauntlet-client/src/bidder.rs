use gauntlet_primitives::{
    alloy::{
        primitives::Address,
        signers::{PrivateKeySigner, SignerSync},
        utils::hex,
    },
    events::AuctionBroadcastData,
    signing::{auction_signing_hash, SigningDomain},
    AuctionId, Bid,
};

use crate::error::{ClientError, Result};

/// Signs bids on behalf of a relayer.
#[derive(Debug, Clone)]
pub struct BidSigner {
    signer: PrivateKeySigner,
    domain: SigningDomain,
}

impl BidSigner {
    pub fn new(signer: PrivateKeySigner) -> Self {
        Self {
            signer,
            domain: SigningDomain::default(),
        }
    }

    pub fn with_domain(mut self, domain: SigningDomain) -> Self {
        self.domain = domain;
        self
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Bid on an announced auction.
    pub fn bid_for(&self, auction: &AuctionBroadcastData) -> Result<Bid> {
        self.sign(
            auction.auction_id,
            auction.deposit.destination_chain_id,
            auction.expiry,
        )
    }

    pub fn sign(&self, auction_id: AuctionId, destination_chain_id: u64, expiry: u64) -> Result<Bid> {
        let expiry = u32::try_from(expiry)
            .map_err(|_| ClientError::BidSigningError(format!("expiry {expiry} exceeds uint32")))?;
        let digest = auction_signing_hash(&self.domain, destination_chain_id, auction_id, expiry);
        let signature = self
            .signer
            .sign_hash_sync(&digest)
            .map_err(|e| ClientError::BidSigningError(e.to_string()))?;

        Ok(Bid {
            auction_id: auction_id.to_string(),
            relayer_address: self.address().to_checksum(None),
            signature: hex::encode_prefixed(signature.as_bytes()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauntlet_primitives::signing::BidAuthenticator;

    fn signer() -> BidSigner {
        BidSigner::new(
            "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
                .parse()
                .unwrap(),
        )
    }

    #[test]
    fn signed_bid_authenticates() {
        let signer = signer();
        let auction_id = AuctionId::new([0xcc, 0xc3, 0xf0, 0xa2]);
        let bid = signer.sign(auction_id, 10, 1_700_000_300).unwrap();

        assert_eq!(bid.auction_id, "0xccc3f0a2");
        assert_eq!(bid.relayer_address, "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        assert_eq!(bid.signature.len(), 2 + 65 * 2);

        let parsed = bid.parse().unwrap();
        let authenticator = BidAuthenticator::new(SigningDomain::default());
        authenticator.authenticate(&parsed, 10, 1_700_000_300).unwrap();
        assert!(authenticator.authenticate(&parsed, 10, 1_700_000_301).is_err());
        assert!(authenticator.authenticate(&parsed, 5, 1_700_000_300).is_err());
    }

    #[test]
    fn custom_domain_is_not_interchangeable() {
        let domain = SigningDomain {
            name: "Other".to_string(),
            version: "1".to_string(),
        };
        let bid = signer()
            .with_domain(domain.clone())
            .sign(AuctionId::new([1, 2, 3, 4]), 10, 100)
            .unwrap()
            .parse()
            .unwrap();

        assert!(BidAuthenticator::new(domain).authenticate(&bid, 10, 100).is_ok());
        assert!(BidAuthenticator::new(SigningDomain::default())
            .authenticate(&bid, 10, 100)
            .is_err());
    }

    #[test]
    fn rejects_expiry_beyond_uint32() {
        let err = signer()
            .sign(AuctionId::new([1, 2, 3, 4]), 10, u64::from(u32::MAX) + 1)
            .unwrap_err();
        assert!(matches!(err, ClientError::BidSigningError(_)));
    }
}
