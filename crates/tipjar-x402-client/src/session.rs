//! Payment session state machine.
//!
//! Drives one tip payment through
//! `Idle -> Authorizing -> Submitting -> Settled | Failed`. Input validation
//! happens strictly before `Authorizing` is entered; every downstream failure
//! is caught at this boundary and converted into the `Failed` state with a
//! human-readable message. No error escapes to the caller uncaught.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use alloy::primitives::{Address, U256};
use tipjar::wire::{PaymentMetadata, PaymentRequest};
use tipjar::{amount, calldata, TipAuthorizer, TipConfig, TipError, TipSigner};

use crate::transport::PaymentTransport;

/// Current phase of a payment session. Callers should disable resubmission
/// while the phase is `Authorizing` or `Submitting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Authorizing,
    Submitting,
    Settled,
    Failed,
}

impl SessionPhase {
    /// Whether a payment attempt is currently running.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SessionPhase::Authorizing | SessionPhase::Submitting)
    }
}

/// Status snapshot readable by UI layers. At rest, exactly one terminal
/// field is set: `tx_hash` on success, `error` on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentStatus {
    pub is_processing: bool,
    pub is_success: bool,
    pub error: Option<String>,
    pub tx_hash: Option<String>,
}

/// Outcome of a single `submit` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentResult {
    pub success: bool,
    pub tx_hash: Option<String>,
    pub error: Option<String>,
}

impl PaymentResult {
    fn settled(tx_hash: String) -> Self {
        Self {
            success: true,
            tx_hash: Some(tx_hash),
            error: None,
        }
    }

    fn failed(error: String) -> Self {
        Self {
            success: false,
            tx_hash: None,
            error: Some(error),
        }
    }
}

/// Cancellation token checked before each suspension point (signing and the
/// network round trip). Cancelling does not abort work already in progress
/// past the last checkpoint.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

struct SessionState {
    phase: SessionPhase,
    status: PaymentStatus,
}

/// One payment session: owns its status record exclusively and allows a
/// single in-flight attempt at a time.
pub struct PaymentSession<S, T> {
    authorizer: TipAuthorizer<S>,
    transport: T,
    state: Mutex<SessionState>,
}

impl<S: TipSigner, T: PaymentTransport> PaymentSession<S, T> {
    /// Create a session with USDC-on-Base defaults.
    pub fn new(signer: S, transport: T) -> Self {
        Self::with_config(signer, transport, TipConfig::default())
    }

    /// Create a session with a custom chain configuration.
    pub fn with_config(signer: S, transport: T, config: TipConfig) -> Self {
        Self {
            authorizer: TipAuthorizer::with_config(signer, config),
            transport,
            state: Mutex::new(SessionState {
                phase: SessionPhase::Idle,
                status: PaymentStatus::default(),
            }),
        }
    }

    pub fn config(&self) -> &TipConfig {
        self.authorizer.config()
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        self.lock().phase
    }

    /// Snapshot of the current status.
    pub fn status(&self) -> PaymentStatus {
        self.lock().status.clone()
    }

    /// Return to `Idle` and clear all status fields. Ignored while a payment
    /// is in flight; an attempt always runs to `Settled` or `Failed` first.
    pub fn reset(&self) {
        let mut state = self.lock();
        if state.phase.is_in_flight() {
            return;
        }
        state.phase = SessionPhase::Idle;
        state.status = PaymentStatus::default();
    }

    /// Submit a tip payment. Validates input, obtains a signed authorization,
    /// submits it, and resolves to the settlement outcome. Never returns an
    /// error: failures resolve to `success: false` plus a message, and the
    /// session lands in `Failed`.
    pub async fn submit(
        &self,
        amount: &str,
        recipient: &str,
        message: Option<&str>,
    ) -> PaymentResult {
        self.submit_cancellable(amount, recipient, message, &CancelHandle::new())
            .await
    }

    /// Like [`submit`](Self::submit), with a [`CancelHandle`] checked before
    /// each suspension point.
    pub async fn submit_cancellable(
        &self,
        amount: &str,
        recipient: &str,
        message: Option<&str>,
        cancel: &CancelHandle,
    ) -> PaymentResult {
        // Re-entrancy gate and validation under one short lock. Validation
        // failures report without leaving `Idle`.
        let (base_units, to) = {
            let mut state = self.lock();
            if state.phase.is_in_flight() {
                return PaymentResult::failed("a payment is already in progress".to_string());
            }
            match self.validate(amount, recipient) {
                Ok(parsed) => {
                    state.phase = SessionPhase::Authorizing;
                    state.status = PaymentStatus {
                        is_processing: true,
                        ..PaymentStatus::default()
                    };
                    parsed
                }
                Err(e) => {
                    let error = e.to_string();
                    tracing::warn!(%error, "tip rejected by validation");
                    state.phase = SessionPhase::Idle;
                    state.status = PaymentStatus {
                        error: Some(error.clone()),
                        ..PaymentStatus::default()
                    };
                    return PaymentResult::failed(error);
                }
            }
        };

        if cancel.is_cancelled() {
            return self.fail("payment cancelled".to_string());
        }

        let authorization = match self.authorizer.authorize(base_units, to).await {
            Ok(auth) => auth,
            Err(e) => return self.fail(e.to_string()),
        };
        self.lock().phase = SessionPhase::Submitting;

        // Fail closed rather than send a malformed instruction.
        let data = match calldata::encode_transfer_hex(recipient, base_units) {
            Ok(data) => data,
            Err(e) => return self.fail(e.to_string()),
        };
        let request = PaymentRequest {
            from: authorization.from,
            to,
            amount: base_units.to_string(),
            token: self.config().token,
            chain_id: self.config().chain_id,
            data,
            metadata: PaymentMetadata {
                message: message.unwrap_or_default().to_string(),
            },
        };

        if cancel.is_cancelled() {
            return self.fail("payment cancelled".to_string());
        }

        match self.transport.submit(&authorization, &request).await {
            Ok(receipt) => {
                let mut state = self.lock();
                state.phase = SessionPhase::Settled;
                state.status = PaymentStatus {
                    is_success: true,
                    tx_hash: Some(receipt.tx_hash.clone()),
                    ..PaymentStatus::default()
                };
                PaymentResult::settled(receipt.tx_hash)
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    /// Guards checked before `Authorizing` is entered: amount parses and
    /// meets the minimum, the recipient is well-formed, a wallet is connected.
    fn validate(&self, amount_str: &str, recipient: &str) -> Result<(U256, Address), TipError> {
        let config = self.config();
        let base_units = amount::to_base_units(amount_str, config.token_decimals)?;
        let minimum = U256::from(config.min_tip_base_units);
        if base_units < minimum {
            return Err(TipError::InvalidAmount(format!(
                "minimum tip is {} {}",
                amount::from_base_units(minimum, config.token_decimals),
                config.token_symbol
            )));
        }
        let to = calldata::parse_recipient(recipient)?;
        if !self.authorizer.signer().is_connected()
            || self.authorizer.signer().address().is_none()
        {
            return Err(TipError::NotConnected);
        }
        Ok((base_units, to))
    }

    fn fail(&self, error: String) -> PaymentResult {
        tracing::warn!(%error, "payment failed");
        let mut state = self.lock();
        state.phase = SessionPhase::Failed;
        state.status = PaymentStatus {
            error: Some(error.clone()),
            ..PaymentStatus::default()
        };
        PaymentResult::failed(error)
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        // A poisoned lock only means a panic elsewhere; the state itself
        // stays coherent.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
