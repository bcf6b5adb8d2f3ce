use alloy::primitives::Address;

/// Base mainnet chain ID.
pub const BASE_CHAIN_ID: u64 = 8453;

/// USDC token contract on Base mainnet.
pub const USDC_BASE_ADDRESS: Address = Address::new([
    0x83, 0x35, 0x89, 0xfc, 0xd6, 0xed, 0xb6, 0xe0, 0x8f, 0x4c, 0x7c, 0x32, 0xd4, 0xf7, 0x1b, 0x54,
    0xbd, 0xa0, 0x29, 0x13,
]);

/// USDC has 6 decimal places.
pub const TOKEN_DECIMALS: u32 = 6;

/// Display symbol used in the canonical authorization message.
pub const TOKEN_SYMBOL: &str = "USDC";

/// Minimum tip, in base units (0.10 USDC).
pub const MIN_TIP_BASE_UNITS: u64 = 100_000;

/// Default x402 payment API base URL.
pub const API_URL: &str = "https://api.x402.io";

/// Path of the payments endpoint, relative to the API base URL.
pub const PAYMENTS_PATH: &str = "/v1/payments";

/// Request header carrying the signed payment authorization as JSON.
pub const PAYMENT_HEADER: &str = "X-402-Payment";

/// Response header carrying base64-encoded settlement JSON.
pub const PAYMENT_RESPONSE_HEADER: &str = "X-PAYMENT-RESPONSE";

/// Runtime chain/token configuration. Decouples the payment core from
/// compile-time constants so sessions can target other tokens or endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipConfig {
    pub chain_id: u64,
    pub token: Address,
    pub token_decimals: u32,
    pub token_symbol: String,
    pub api_url: String,
    pub payments_path: String,
    pub min_tip_base_units: u64,
}

impl Default for TipConfig {
    /// Defaults to USDC on Base mainnet.
    fn default() -> Self {
        Self {
            chain_id: BASE_CHAIN_ID,
            token: USDC_BASE_ADDRESS,
            token_decimals: TOKEN_DECIMALS,
            token_symbol: TOKEN_SYMBOL.to_string(),
            api_url: API_URL.to_string(),
            payments_path: PAYMENTS_PATH.to_string(),
            min_tip_base_units: MIN_TIP_BASE_UNITS,
        }
    }
}

impl TipConfig {
    /// Full URL of the payments endpoint.
    pub fn payments_url(&self) -> String {
        format!("{}{}", self.api_url, self.payments_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usdc_address_checksum() {
        assert_eq!(
            format!("{USDC_BASE_ADDRESS}"),
            "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"
        );
    }

    #[test]
    fn test_default_payments_url() {
        let config = TipConfig::default();
        assert_eq!(config.payments_url(), "https://api.x402.io/v1/payments");
    }
}
