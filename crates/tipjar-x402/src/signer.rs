//! Signer capability for payment authorizations.
//!
//! Wallet state is passed into the core as an explicit capability object
//! rather than read from ambient environment state, so sessions stay
//! independently testable.

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;

use crate::error::TipError;

/// A connected wallet capable of signing human-readable messages.
///
/// "Not connected" and "signature declined" are distinct, user-reportable
/// conditions: the former surfaces via [`is_connected`](TipSigner::is_connected)
/// / [`address`](TipSigner::address), the latter via the `Err` of
/// [`sign_message`](TipSigner::sign_message).
pub trait TipSigner: Send + Sync {
    /// Whether a wallet is currently connected.
    fn is_connected(&self) -> bool;

    /// Address of the connected account, if any.
    fn address(&self) -> Option<Address>;

    /// Sign an arbitrary message (EIP-191 personal sign), returning the
    /// signature as a 0x-prefixed hex string.
    fn sign_message(
        &self,
        message: &str,
    ) -> impl std::future::Future<Output = Result<String, TipError>> + Send;
}

/// Encode a signature as a hex string with 0x prefix (65 bytes -> 0x + 130 hex).
pub fn encode_signature_hex(sig: &alloy::primitives::Signature) -> String {
    format!("0x{}", alloy::hex::encode(sig.as_bytes()))
}

/// Local in-process signer backed by a private key.
pub struct LocalTipSigner {
    inner: PrivateKeySigner,
}

impl LocalTipSigner {
    /// Create a signer from a hex-encoded private key (with or without 0x prefix).
    pub fn new(private_key: &str) -> Result<Self, TipError> {
        let key = private_key.strip_prefix("0x").unwrap_or(private_key);
        let inner: PrivateKeySigner = key
            .parse()
            .map_err(|e| TipError::SigningRejected(format!("invalid private key: {e}")))?;
        Ok(Self { inner })
    }

    /// Generate a new random keypair.
    pub fn random() -> Self {
        Self {
            inner: PrivateKeySigner::random(),
        }
    }
}

impl From<PrivateKeySigner> for LocalTipSigner {
    fn from(inner: PrivateKeySigner) -> Self {
        Self { inner }
    }
}

impl TipSigner for LocalTipSigner {
    fn is_connected(&self) -> bool {
        true
    }

    fn address(&self) -> Option<Address> {
        Some(self.inner.address())
    }

    async fn sign_message(&self, message: &str) -> Result<String, TipError> {
        let sig = self
            .inner
            .sign_message_sync(message.as_bytes())
            .map_err(|e| TipError::SigningRejected(format!("signing failed: {e}")))?;
        Ok(encode_signature_hex(&sig))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_signer_is_connected() {
        let signer = LocalTipSigner::random();
        assert!(signer.is_connected());
        assert!(signer.address().is_some());
    }

    #[test]
    fn test_rejects_bad_key() {
        assert!(LocalTipSigner::new("0xnot-a-key").is_err());
    }

    #[tokio::test]
    async fn test_sign_message_recovers_address() {
        let signer = LocalTipSigner::random();
        let address = signer.address().unwrap();

        let message = "Pay 0.100000 USDC to 0x1111111111111111111111111111111111111111";
        let sig_hex = signer.sign_message(message).await.unwrap();
        assert!(sig_hex.starts_with("0x"));
        assert_eq!(sig_hex.len(), 132); // 0x + 130 hex chars

        let sig_bytes = alloy::hex::decode(sig_hex.strip_prefix("0x").unwrap()).unwrap();
        let sig = alloy::primitives::Signature::from_raw(&sig_bytes).unwrap();
        let recovered = sig.recover_address_from_msg(message.as_bytes()).unwrap();
        assert_eq!(recovered, address);
    }
}
