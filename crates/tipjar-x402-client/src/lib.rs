//! x402 tip payment client.
//!
//! Drives a tip payment end to end: validate input, obtain a signed payment
//! authorization, POST it to the payments endpoint with the `X-402-Payment`
//! header, and surface the settlement outcome.
//!
//! # Quick example
//!
//! ```no_run
//! use tipjar::LocalTipSigner;
//! use tipjar_client::{HttpPaymentTransport, PaymentSession};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let signer = LocalTipSigner::new("0xYOUR_KEY").unwrap();
//! let transport = HttpPaymentTransport::new("https://api.x402.io/v1/payments");
//! let session = PaymentSession::new(signer, transport);
//!
//! let result = session
//!     .submit("0.10", "0x1111111111111111111111111111111111111111", Some("gm"))
//!     .await;
//!
//! match result.tx_hash {
//!     Some(tx) => println!("settled: {tx}"),
//!     None => eprintln!("failed: {}", result.error.unwrap_or_default()),
//! }
//! # }
//! ```

mod session;
mod transport;

pub use session::{CancelHandle, PaymentResult, PaymentSession, PaymentStatus, SessionPhase};
pub use transport::{extract_receipt, HttpPaymentTransport, PaymentTransport};

// Re-export commonly needed types from core
pub use tipjar::{
    LocalTipSigner, PaymentAuthorization, SettlementReceipt, TipAuthorizer, TipConfig, TipError,
    TipSigner, TOKEN_DECIMALS, USDC_BASE_ADDRESS,
};
