//! Payment submission over HTTP.
//!
//! The contract here is the manual-authorization-header style: one POST to
//! the payments endpoint carrying the signed authorization in the
//! `X-402-Payment` header. A delegated 402 challenge/retry client would be an
//! alternate implementation of [`PaymentTransport`], not a second code path.

use base64::Engine;
use tipjar::wire::{PaymentRequest, SettlementBody, SettlementReceipt};
use tipjar::{encode_payment_header, PaymentAuthorization, TipError};
use tipjar::{PAYMENT_HEADER, PAYMENT_RESPONSE_HEADER};

/// Submits a signed authorization and yields a settlement receipt.
///
/// From the caller's perspective this is a single logical call that either
/// settles or fails; no interim state is exposed upward.
pub trait PaymentTransport: Send + Sync {
    fn submit(
        &self,
        authorization: &PaymentAuthorization,
        request: &PaymentRequest,
    ) -> impl std::future::Future<Output = Result<SettlementReceipt, TipError>> + Send;
}

/// HTTP transport: POSTs the payment request with the `X-402-Payment` header
/// and reads the settlement receipt from the response body or the
/// `X-PAYMENT-RESPONSE` header.
pub struct HttpPaymentTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpPaymentTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("failed to build HTTP client"),
            endpoint: endpoint.into(),
        }
    }

    /// Create a transport with a custom reqwest::Client.
    pub fn with_http_client(endpoint: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PaymentTransport for HttpPaymentTransport {
    async fn submit(
        &self,
        authorization: &PaymentAuthorization,
        request: &PaymentRequest,
    ) -> Result<SettlementReceipt, TipError> {
        let header = encode_payment_header(authorization)?;

        tracing::debug!(endpoint = %self.endpoint, from = %request.from, "submitting payment");
        let resp = self
            .http
            .post(&self.endpoint)
            .header(PAYMENT_HEADER, header)
            .json(request)
            .send()
            .await
            .map_err(|e| TipError::TransportError(format!("request failed: {e}")))?;

        let status = resp.status().as_u16();
        let settle_header = resp
            .headers()
            .get(PAYMENT_RESPONSE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = resp
            .bytes()
            .await
            .map_err(|e| TipError::TransportError(format!("failed to read response: {e}")))?;

        let receipt = extract_receipt(status, settle_header.as_deref(), &body)?;
        tracing::info!(tx_hash = %receipt.tx_hash, "payment settled");
        Ok(receipt)
    }
}

/// Locate the settlement transaction id in a payments-endpoint response.
///
/// Accepts both response shapes: a `txHash`/`transactionHash` field in the
/// JSON body, or an `X-PAYMENT-RESPONSE` header of base64-encoded (or plain)
/// JSON. A success status with no transaction id is a malformed response,
/// never a success.
pub fn extract_receipt(
    status: u16,
    payment_response: Option<&str>,
    body: &[u8],
) -> Result<SettlementReceipt, TipError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<SettlementBody>(body)
            .ok()
            .and_then(|b| b.failure_message().map(str::to_owned))
            .unwrap_or_else(|| format!("server returned status {status}"));
        return Err(TipError::TransportError(message));
    }

    if let Some(tx) = serde_json::from_slice::<SettlementBody>(body)
        .ok()
        .and_then(|b| b.transaction().map(str::to_owned))
    {
        return Ok(SettlementReceipt { tx_hash: tx });
    }

    if let Some(raw) = payment_response {
        // Base64-wrapped JSON per the header convention, plain JSON fallback
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(raw)
            .ok()
            .and_then(|bytes| serde_json::from_slice::<SettlementBody>(&bytes).ok())
            .or_else(|| serde_json::from_str::<SettlementBody>(raw).ok());
        if let Some(tx) = decoded.and_then(|b| b.transaction().map(str::to_owned)) {
            return Ok(SettlementReceipt { tx_hash: tx });
        }
    }

    Err(TipError::MalformedResponse(
        "no transaction id in response body or X-PAYMENT-RESPONSE header".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b64(s: &str) -> String {
        base64::engine::general_purpose::STANDARD.encode(s)
    }

    #[test]
    fn test_tx_hash_in_body() {
        let receipt = extract_receipt(200, None, br#"{"txHash":"0xabc"}"#).unwrap();
        assert_eq!(receipt.tx_hash, "0xabc");
    }

    #[test]
    fn test_tx_hash_in_header_only() {
        let header = b64(r#"{"txHash":"0xabc"}"#);
        let receipt = extract_receipt(200, Some(&header), b"{}").unwrap();
        assert_eq!(receipt.tx_hash, "0xabc");
    }

    #[test]
    fn test_transaction_hash_alias_in_header() {
        let header = b64(r#"{"transactionHash":"0xdef"}"#);
        let receipt = extract_receipt(200, Some(&header), b"").unwrap();
        assert_eq!(receipt.tx_hash, "0xdef");
    }

    #[test]
    fn test_plain_json_header_fallback() {
        let receipt = extract_receipt(200, Some(r#"{"txHash":"0x123"}"#), b"").unwrap();
        assert_eq!(receipt.tx_hash, "0x123");
    }

    #[test]
    fn test_body_wins_over_header() {
        let header = b64(r#"{"txHash":"0xheader"}"#);
        let receipt = extract_receipt(200, Some(&header), br#"{"txHash":"0xbody"}"#).unwrap();
        assert_eq!(receipt.tx_hash, "0xbody");
    }

    #[test]
    fn test_success_without_tx_is_malformed() {
        let err = extract_receipt(200, None, b"{}").unwrap_err();
        assert!(matches!(err, TipError::MalformedResponse(_)));
    }

    #[test]
    fn test_server_message_passed_through() {
        let err = extract_receipt(400, None, br#"{"message":"insufficient funds"}"#).unwrap_err();
        match err {
            TipError::TransportError(msg) => assert_eq!(msg, "insufficient funds"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_field_passed_through() {
        let err = extract_receipt(500, None, br#"{"error":"settlement reverted"}"#).unwrap_err();
        match err {
            TipError::TransportError(msg) => assert_eq!(msg, "settlement reverted"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_generic_fallback_for_opaque_failure() {
        let err = extract_receipt(502, None, b"<html>bad gateway</html>").unwrap_err();
        match err {
            TipError::TransportError(msg) => assert_eq!(msg, "server returned status 502"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
