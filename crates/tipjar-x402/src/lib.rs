//! x402 tip payment core.
//!
//! Turns a user-entered amount and recipient into a signed, transport-ready
//! payment authorization for HTTP 402 tip payments (USDC on Base), and
//! defines the wire formats the payments endpoint speaks.
//!
//! # Pieces
//!
//! - [`amount`] — decimal string <-> base-unit conversion, integer-only
//! - [`calldata`] — ERC-20 `transfer(address,uint256)` instruction encoding
//! - [`TipSigner`] / [`TipAuthorizer`] — wallet capability and signed
//!   authorization construction
//! - [`wire`] — `X-402-Payment` header and payments-endpoint body formats
//!
//! The state machine that drives a payment to settlement lives in the
//! companion client crate (`tipjar-x402-client`).
//!
//! # Quick example
//!
//! ```
//! use tipjar::{LocalTipSigner, TipAuthorizer};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let authorizer = TipAuthorizer::new(LocalTipSigner::random());
//! let amount = tipjar::amount::to_base_units("0.10", 6).unwrap();
//! let recipient = "0x1111111111111111111111111111111111111111".parse().unwrap();
//!
//! let auth = authorizer.authorize(amount, recipient).await.unwrap();
//! assert!(auth.message.starts_with("Pay 0.100000 USDC to "));
//! # }
//! ```

pub mod amount;
pub mod auth;
pub mod calldata;
pub mod constants;
pub mod error;
pub mod signer;
pub mod wire;

pub use auth::{PaymentAuthorization, TipAuthorizer};
pub use constants::TipConfig;
pub use constants::*;
pub use error::TipError;
pub use signer::{LocalTipSigner, TipSigner};
pub use wire::{
    decode_payment_header, encode_payment_header, PaymentHeader, PaymentMetadata, PaymentRequest,
    SettlementBody, SettlementReceipt,
};
