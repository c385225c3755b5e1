//! Parsers for the string-encoded fields of deposits and bids.
//!
//! Every parser returns a `ValidationError` instead of panicking, so malformed client input
//! can never take the engine down.

use std::str::FromStr;

use alloy::{
    hex,
    primitives::{Address, Bytes, U256},
};

use crate::{PrimitivesError, Result};

fn invalid(field: &str, reason: impl std::fmt::Display) -> PrimitivesError {
    PrimitivesError::ValidationError(format!("{field}: {reason}"))
}

/// Parse a 20-byte address. Mixed-case input must carry a valid EIP-55 checksum.
pub fn parse_address(field: &str, value: &str) -> Result<Address> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid(field, "not a 20 byte hex address"));
    }

    let address = Address::from_str(digits).map_err(|e| invalid(field, e))?;

    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && address.to_checksum(None)[2..] != *digits {
        return Err(invalid(field, "bad address checksum"));
    }

    Ok(address)
}

/// Parse a `0x` prefixed, even length hex string. `"0x"` is the empty byte string.
pub fn parse_bytes(field: &str, value: &str) -> Result<Bytes> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| invalid(field, "missing 0x prefix"))?;
    hex::decode(digits)
        .map(Bytes::from)
        .map_err(|e| invalid(field, e))
}

/// Parse an integer literal into sign and magnitude. Accepts decimal or `0x` hex digits with
/// an optional leading `-`.
fn parse_integer(field: &str, value: &str) -> Result<(bool, U256)> {
    let (negative, magnitude) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };

    let (digits, radix) = match magnitude.strip_prefix("0x") {
        Some(hex_digits) => (hex_digits, 16),
        None => (magnitude, 10),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid(field, "not an integer"));
    }

    let parsed =
        U256::from_str_radix(digits, radix as u64).map_err(|_| invalid(field, "out of uint256 range"))?;
    Ok((negative, parsed))
}

/// Parse an unsigned 256 bit integer, range [0, 2^256 - 1].
pub fn parse_uint256(field: &str, value: &str) -> Result<U256> {
    match parse_integer(field, value)? {
        (true, magnitude) if !magnitude.is_zero() => Err(invalid(field, "negative uint256")),
        (_, magnitude) => Ok(magnitude),
    }
}

/// Parse a signed 64 bit integer, range [-2^63, 2^63 - 1].
pub fn parse_int64(field: &str, value: &str) -> Result<i64> {
    let (negative, magnitude) = parse_integer(field, value)?;
    let magnitude = u64::try_from(magnitude).map_err(|_| invalid(field, "out of int64 range"))?;
    let signed = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    i64::try_from(signed).map_err(|_| invalid(field, "out of int64 range"))
}

/// Parse an unsigned 32 bit integer, range [0, 2^32 - 1].
pub fn parse_uint32(field: &str, value: &str) -> Result<u32> {
    let parsed = parse_uint256(field, value)?;
    u32::try_from(parsed).map_err(|_| invalid(field, "out of uint32 range"))
}

/// Chain ids must be strictly positive.
pub fn validate_chain_id(field: &str, value: u64) -> Result<u64> {
    if value == 0 {
        return Err(invalid(field, "chain id must be positive"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0x9A8f92a830A5cB89a3816e3D267CB7791c16b04D", true)]
    #[case("0x9a8f92a830a5cb89a3816e3d267cb7791c16b04d", true)]
    #[case("0x9A8F92A830A5CB89A3816E3D267CB7791C16B04D", true)]
    #[case("9a8f92a830a5cb89a3816e3d267cb7791c16b04d", true)]
    // one letter flipped breaks the checksum
    #[case("0x9a8f92a830A5cB89a3816e3D267CB7791c16b04D", false)]
    #[case("0x9a8f92a830a5cb89a3816e3d267cb7791c16b0", false)]
    #[case("0x9a8f92a830a5cb89a3816e3d267cb7791c16b04g", false)]
    #[case("", false)]
    fn address_parsing(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(parse_address("recipient", input).is_ok(), valid);
    }

    #[rstest]
    #[case("0x", Some(vec![]))]
    #[case("0x00ff", Some(vec![0x00, 0xff]))]
    #[case("0xABcd", Some(vec![0xab, 0xcd]))]
    #[case("0x0", None)]
    #[case("00ff", None)]
    #[case("0xzz", None)]
    fn bytes_parsing(#[case] input: &str, #[case] expected: Option<Vec<u8>>) {
        assert_eq!(
            parse_bytes("message", input).ok().map(|b| b.to_vec()),
            expected
        );
    }

    #[test]
    fn uint256_bounds() {
        assert_eq!(parse_uint256("amount", "0").unwrap(), U256::ZERO);
        assert_eq!(parse_uint256("amount", "-0").unwrap(), U256::ZERO);
        assert_eq!(parse_uint256("amount", "0x10").unwrap(), U256::from(16));
        assert_eq!(
            parse_uint256(
                "amount",
                "115792089237316195423570985008687907853269984665640564039457584007913129639935"
            )
            .unwrap(),
            U256::MAX
        );
        assert!(parse_uint256(
            "amount",
            "115792089237316195423570985008687907853269984665640564039457584007913129639936"
        )
        .is_err());
        assert!(parse_uint256("amount", "-1").is_err());
        assert!(parse_uint256("amount", "1.5").is_err());
        assert!(parse_uint256("amount", "").is_err());
        assert!(parse_uint256("amount", "0x").is_err());
        assert!(parse_uint256("amount", "1_000").is_err());
    }

    #[rstest]
    #[case("1", Some(1))]
    #[case("-1", Some(-1))]
    #[case("9223372036854775807", Some(i64::MAX))]
    #[case("-9223372036854775808", Some(i64::MIN))]
    #[case("9223372036854775808", None)]
    #[case("-9223372036854775809", None)]
    #[case("0x7fffffffffffffff", Some(i64::MAX))]
    #[case("--1", None)]
    fn int64_bounds(#[case] input: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_int64("relayerFeePct", input).ok(), expected);
    }

    #[rstest]
    #[case("0", Some(0))]
    #[case("4294967295", Some(u32::MAX))]
    #[case("4294967296", None)]
    #[case("-5", None)]
    fn uint32_bounds(#[case] input: &str, #[case] expected: Option<u32>) {
        assert_eq!(parse_uint32("quoteTimestamp", input).ok(), expected);
    }

    #[test]
    fn zero_chain_id_is_rejected() {
        assert!(validate_chain_id("sourceChainId", 0).is_err());
        assert_eq!(validate_chain_id("sourceChainId", 10).unwrap(), 10);
    }
}
