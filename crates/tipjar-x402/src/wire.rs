//! Wire formats: the `X-402-Payment` request header, the payments-endpoint
//! request body, and settlement extraction types.

use alloy::primitives::Address;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::auth::PaymentAuthorization;
use crate::error::TipError;

/// JSON value of the `X-402-Payment` request header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentHeader {
    pub amount: String,
    pub token: Address,
    pub signature: String,
    pub message: String,
}

impl From<&PaymentAuthorization> for PaymentHeader {
    fn from(auth: &PaymentAuthorization) -> Self {
        Self {
            amount: auth.amount.clone(),
            token: auth.token,
            signature: auth.signature.clone(),
            message: auth.message.clone(),
        }
    }
}

/// Serialize an authorization for the `X-402-Payment` header (plain JSON).
pub fn encode_payment_header(auth: &PaymentAuthorization) -> Result<String, TipError> {
    Ok(serde_json::to_string(&PaymentHeader::from(auth))?)
}

/// Decode an `X-402-Payment` header value. Accepts base64-wrapped JSON and
/// falls back to plain JSON, mirroring what servers in the wild send back.
pub fn decode_payment_header(encoded: &str) -> Result<PaymentHeader, TipError> {
    if let Ok(bytes) = base64::engine::general_purpose::STANDARD.decode(encoded) {
        if let Ok(header) = serde_json::from_slice::<PaymentHeader>(&bytes) {
            return Ok(header);
        }
    }
    serde_json::from_str(encoded)
        .map_err(|e| TipError::MalformedResponse(format!("invalid payment header: {e}")))
}

/// JSON body POSTed to the payments endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub from: Address,
    pub to: Address,
    /// Amount in base units, as a decimal string.
    pub amount: String,
    pub token: Address,
    pub chain_id: u64,
    /// ERC-20 transfer calldata, 0x-hex. The exact instruction the
    /// authorization covers.
    pub data: String,
    pub metadata: PaymentMetadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMetadata {
    pub message: String,
}

/// Settlement confirmation: the transaction identifier proving execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementReceipt {
    pub tx_hash: String,
}

/// Loose settlement body shape: servers return `txHash` or `transactionHash`,
/// and error payloads carry `message` or `error`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementBody {
    pub tx_hash: Option<String>,
    pub transaction_hash: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl SettlementBody {
    /// Transaction identifier, whichever field the server used.
    pub fn transaction(&self) -> Option<&str> {
        self.tx_hash
            .as_deref()
            .or(self.transaction_hash.as_deref())
    }

    /// Server-supplied failure message, whichever field the server used.
    pub fn failure_message(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::USDC_BASE_ADDRESS;

    fn sample_auth() -> PaymentAuthorization {
        PaymentAuthorization {
            from: Address::ZERO,
            amount: "100000".to_string(),
            token: USDC_BASE_ADDRESS,
            message: "Pay 0.100000 USDC to 0x1111111111111111111111111111111111111111"
                .to_string(),
            signature: "0xdead".to_string(),
        }
    }

    #[test]
    fn test_header_roundtrip() {
        let encoded = encode_payment_header(&sample_auth()).unwrap();
        let decoded = decode_payment_header(&encoded).unwrap();
        assert_eq!(decoded.amount, "100000");
        assert_eq!(decoded.token, USDC_BASE_ADDRESS);
        assert_eq!(decoded.signature, "0xdead");
    }

    #[test]
    fn test_header_is_plain_json() {
        let encoded = encode_payment_header(&sample_auth()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(json["amount"], "100000");
        assert!(json["message"].as_str().unwrap().starts_with("Pay "));
    }

    #[test]
    fn test_decode_accepts_base64() {
        let encoded = encode_payment_header(&sample_auth()).unwrap();
        let wrapped = base64::engine::general_purpose::STANDARD.encode(&encoded);
        let decoded = decode_payment_header(&wrapped).unwrap();
        assert_eq!(decoded.amount, "100000");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_payment_header("not json at all").is_err());
    }

    #[test]
    fn test_settlement_body_field_aliases() {
        let a: SettlementBody = serde_json::from_str(r#"{"txHash":"0xabc"}"#).unwrap();
        assert_eq!(a.transaction(), Some("0xabc"));

        let b: SettlementBody =
            serde_json::from_str(r#"{"transactionHash":"0xdef"}"#).unwrap();
        assert_eq!(b.transaction(), Some("0xdef"));

        let c: SettlementBody = serde_json::from_str(r#"{"error":"insufficient funds"}"#).unwrap();
        assert_eq!(c.transaction(), None);
        assert_eq!(c.failure_message(), Some("insufficient funds"));
    }

    #[test]
    fn test_payment_request_serializes_camel_case() {
        let request = PaymentRequest {
            from: Address::ZERO,
            to: Address::ZERO,
            amount: "100000".to_string(),
            token: USDC_BASE_ADDRESS,
            chain_id: 8453,
            data: "0xa9059cbb".to_string(),
            metadata: PaymentMetadata {
                message: "thanks!".to_string(),
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["chainId"], 8453);
        assert_eq!(json["metadata"]["message"], "thanks!");
    }
}
