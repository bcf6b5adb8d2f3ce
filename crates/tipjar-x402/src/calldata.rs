//! ERC-20 `transfer(address,uint256)` calldata encoding.
//!
//! The payload is the 4-byte function selector followed by two 32-byte
//! big-endian words: the recipient left-padded with zeros, then the amount.

use alloy::primitives::{Address, U256};

use crate::error::TipError;

/// Function selector for `transfer(address,uint256)`.
pub const TRANSFER_SELECTOR: [u8; 4] = [0xa9, 0x05, 0x9c, 0xbb];

/// Exact length of an encoded transfer: selector + two 32-byte words.
pub const TRANSFER_CALLDATA_LEN: usize = 4 + 32 + 32;

/// Parse a `0x`-prefixed 40-hex-char recipient address.
pub fn parse_recipient(address: &str) -> Result<Address, TipError> {
    let hex_part = address
        .strip_prefix("0x")
        .ok_or_else(|| TipError::InvalidRecipient(format!("'{address}': missing 0x prefix")))?;
    if hex_part.len() != 40 {
        return Err(TipError::InvalidRecipient(format!(
            "'{address}': expected 40 hex chars, got {}",
            hex_part.len()
        )));
    }
    address
        .parse::<Address>()
        .map_err(|e| TipError::InvalidRecipient(format!("'{address}': {e}")))
}

/// Encode `transfer(recipient, amount)` calldata from a `0x`-prefixed
/// recipient string. Fails with [`TipError::InvalidRecipient`] rather than
/// emitting a malformed instruction.
pub fn encode_transfer(recipient: &str, amount: U256) -> Result<Vec<u8>, TipError> {
    let to = parse_recipient(recipient)?;
    Ok(encode_transfer_to(to, amount))
}

/// Encode `transfer(to, amount)` calldata from an already-parsed address.
/// Always exactly [`TRANSFER_CALLDATA_LEN`] bytes.
pub fn encode_transfer_to(to: Address, amount: U256) -> Vec<u8> {
    let mut data = Vec::with_capacity(TRANSFER_CALLDATA_LEN);
    data.extend_from_slice(&TRANSFER_SELECTOR);
    data.extend_from_slice(&[0u8; 12]);
    data.extend_from_slice(to.as_slice());
    data.extend_from_slice(&amount.to_be_bytes::<32>());
    data
}

/// Encode transfer calldata as a `0x`-prefixed hex string for JSON bodies.
pub fn encode_transfer_hex(recipient: &str, amount: U256) -> Result<String, TipError> {
    let data = encode_transfer(recipient, amount)?;
    Ok(format!("0x{}", alloy::hex::encode(data)))
}
