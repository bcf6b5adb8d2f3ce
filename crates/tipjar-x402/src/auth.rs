//! Payment authorization: canonical message construction and signing.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::amount::from_base_units;
use crate::constants::TipConfig;
use crate::error::TipError;
use crate::signer::TipSigner;

/// Signed payment authorization, consumed exactly once by the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAuthorization {
    /// Signer address.
    pub from: Address,
    /// Amount in base units, as a decimal string.
    pub amount: String,
    /// Token contract the amount is denominated in.
    pub token: Address,
    /// The exact human-readable message that was signed.
    pub message: String,
    /// 0x-prefixed hex signature over `message`.
    pub signature: String,
}

/// Builds signed [`PaymentAuthorization`]s from a connected signer.
pub struct TipAuthorizer<S> {
    signer: S,
    config: TipConfig,
}

impl<S: TipSigner> TipAuthorizer<S> {
    /// Create an authorizer with USDC-on-Base defaults.
    pub fn new(signer: S) -> Self {
        Self {
            signer,
            config: TipConfig::default(),
        }
    }

    /// Create an authorizer with a custom chain configuration.
    pub fn with_config(signer: S, config: TipConfig) -> Self {
        Self { signer, config }
    }

    pub fn signer(&self) -> &S {
        &self.signer
    }

    pub fn config(&self) -> &TipConfig {
        &self.config
    }

    /// Canonical message the user is asked to sign.
    pub fn payment_message(&self, amount: U256, recipient: Address) -> String {
        let display = from_base_units(amount, self.config.token_decimals);
        format!(
            "Pay {display} {symbol} to {recipient}",
            symbol = self.config.token_symbol
        )
    }

    /// Sign a payment of `amount` base units to `recipient`.
    ///
    /// Fails with [`TipError::NotConnected`] when no wallet is available and
    /// [`TipError::SigningRejected`] when the signer declines or errors.
    /// This is the single suspension point that waits on human interaction.
    pub async fn authorize(
        &self,
        amount: U256,
        recipient: Address,
    ) -> Result<PaymentAuthorization, TipError> {
        if !self.signer.is_connected() {
            return Err(TipError::NotConnected);
        }
        let from = self.signer.address().ok_or(TipError::NotConnected)?;

        let message = self.payment_message(amount, recipient);
        tracing::debug!(%from, %recipient, %amount, "requesting payment signature");
        let signature = self.signer.sign_message(&message).await?;

        Ok(PaymentAuthorization {
            from,
            amount: amount.to_string(),
            token: self.config.token,
            message,
            signature,
        })
    }
}
