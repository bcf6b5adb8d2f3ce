//! Decimal amount codec.
//!
//! Converts user-entered decimal strings (e.g. `"0.10"`) to and from integer
//! base-unit amounts. Integer-only arithmetic -- no f64 anywhere in the
//! pipeline, since 6-decimal token amounts must be exact.

use alloy::primitives::U256;

use crate::error::TipError;

/// Parse a decimal amount string into base units (`amount * 10^decimals`).
///
/// Rejects non-numeric input, negative values, and more fractional digits
/// than `decimals` with [`TipError::InvalidAmount`]. A scaled value that does
/// not fit in 256 bits fails with [`TipError::AmountOverflow`].
pub fn to_base_units(amount: &str, decimals: u32) -> Result<U256, TipError> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Err(TipError::InvalidAmount("empty amount".to_string()));
    }
    if trimmed.starts_with('-') {
        return Err(TipError::InvalidAmount(format!(
            "'{trimmed}': negative amounts are not allowed"
        )));
    }

    let (integer_part, fractional_part) = match trimmed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (trimmed, ""),
    };

    if integer_part.is_empty() && fractional_part.is_empty() {
        return Err(TipError::InvalidAmount(format!(
            "'{trimmed}': no digits"
        )));
    }
    if !integer_part.chars().all(|c| c.is_ascii_digit())
        || !fractional_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(TipError::InvalidAmount(format!(
            "'{trimmed}': not a decimal number"
        )));
    }
    if fractional_part.len() > decimals as usize {
        return Err(TipError::InvalidAmount(format!(
            "'{trimmed}': more than {decimals} fractional digits"
        )));
    }

    let integer: U256 = if integer_part.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(integer_part, 10).map_err(|_| {
            TipError::AmountOverflow(format!("'{trimmed}': integer part exceeds 256 bits"))
        })?
    };

    // Fractional part has at most `decimals` digits, so u64 is plenty.
    let fractional: u64 = if fractional_part.is_empty() {
        0
    } else {
        fractional_part
            .parse::<u64>()
            .map_err(|e| TipError::InvalidAmount(format!("'{trimmed}': fractional part: {e}")))?
    };
    let frac_scale =
        U256::from(10u64).pow(U256::from(decimals - fractional_part.len() as u32));

    let scale = U256::from(10u64).pow(U256::from(decimals));
    integer
        .checked_mul(scale)
        .and_then(|v| v.checked_add(U256::from(fractional) * frac_scale))
        .ok_or_else(|| TipError::AmountOverflow(format!("'{trimmed}': exceeds 256 bits")))
}

/// Format a base-unit amount as a decimal string with exactly `decimals`
/// fractional digits. Inverse of [`to_base_units`] up to normalization.
pub fn from_base_units(value: U256, decimals: u32) -> String {
    if decimals == 0 {
        return value.to_string();
    }
    let scale = U256::from(10u64).pow(U256::from(decimals));
    let integer = value / scale;
    let fractional = value % scale;
    format!(
        "{integer}.{fractional:0>width$}",
        fractional = fractional.to_string(),
        width = decimals as usize
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_typical_tip() {
        assert_eq!(to_base_units("0.10", 6).unwrap(), U256::from(100_000u64));
    }

    #[test]
    fn test_parse_whole_number() {
        assert_eq!(to_base_units("5", 6).unwrap(), U256::from(5_000_000u64));
    }

    #[test]
    fn test_parse_bare_fraction() {
        assert_eq!(to_base_units(".5", 6).unwrap(), U256::from(500_000u64));
    }

    #[test]
    fn test_parse_full_precision() {
        assert_eq!(to_base_units("0.000001", 6).unwrap(), U256::from(1u64));
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert!(matches!(
            to_base_units("abc", 6),
            Err(TipError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_rejects_negative() {
        assert!(matches!(
            to_base_units("-1", 6),
            Err(TipError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_rejects_excess_precision() {
        // 7 fractional digits at 6 decimals
        assert!(matches!(
            to_base_units("0.0000001", 6),
            Err(TipError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_rejects_empty_and_dot() {
        assert!(to_base_units("", 6).is_err());
        assert!(to_base_units(".", 6).is_err());
        assert!(to_base_units("   ", 6).is_err());
    }

    #[test]
    fn test_rejects_double_dot() {
        assert!(to_base_units("1.2.3", 6).is_err());
    }

    #[test]
    fn test_overflow_fails() {
        // 78 nines -- larger than U256::MAX even before scaling
        let huge = "9".repeat(78);
        assert!(matches!(
            to_base_units(&huge, 6),
            Err(TipError::AmountOverflow(_))
        ));
    }

    #[test]
    fn test_format_fixed_decimals() {
        assert_eq!(from_base_units(U256::from(100_000u64), 6), "0.100000");
        assert_eq!(from_base_units(U256::from(1u64), 6), "0.000001");
        assert_eq!(from_base_units(U256::from(5_000_000u64), 6), "5.000000");
        assert_eq!(from_base_units(U256::from(42u64), 0), "42");
    }

    #[test]
    fn test_round_trip_normalizes() {
        for input in ["0.1", "0.10", "1", "12.345678", "0.000001"] {
            let base = to_base_units(input, 6).unwrap();
            let display = from_base_units(base, 6);
            assert_eq!(to_base_units(&display, 6).unwrap(), base, "input {input}");
            // Normalized form always carries exactly 6 fractional digits
            assert_eq!(display.split('.').nth(1).unwrap().len(), 6);
        }
    }
}
