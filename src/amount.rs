//! Fixed-point amount codec
//!
//! Converts between human decimal strings ("0.5") and fixed-point integer
//! strings ("500000000000000000" at 18 decimals), matching on-chain token
//! units. All conversion is digit-string arithmetic; native floating point is
//! never used, so amounts with many significant digits stay exact.
//!
//! Fractional digits beyond `decimals` are truncated toward zero, never
//! rounded up.

use crate::{Error, Result};

/// Convert a human decimal string to a fixed-point integer string.
///
/// Excess fractional precision is truncated toward zero.
pub fn to_fixed_point(amount: &str, decimals: u32) -> Result<String> {
    let amount = amount.trim();

    if amount.is_empty() {
        return Err(Error::InvalidAmount("empty amount".to_string()));
    }
    if amount.starts_with('-') {
        return Err(Error::InvalidAmount(format!("negative amount: {amount}")));
    }

    let mut parts = amount.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let frac = parts.next().unwrap_or("");

    if frac.contains('.') {
        return Err(Error::InvalidAmount(format!(
            "multiple decimal points: {amount}"
        )));
    }
    if whole.is_empty() && frac.is_empty() {
        return Err(Error::InvalidAmount(amount.to_string()));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidAmount(format!("invalid whole part: {whole}")));
    }
    if !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidAmount(format!(
            "invalid fractional part: {frac}"
        )));
    }

    let width = decimals as usize;
    let frac_scaled = if frac.len() >= width {
        frac[..width].to_string()
    } else {
        format!("{frac:0<width$}")
    };

    let combined = format!("{whole}{frac_scaled}");
    let trimmed = combined.trim_start_matches('0');
    if trimmed.is_empty() {
        Ok("0".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

/// Convert a fixed-point integer string back to a human decimal string.
///
/// Insignificant trailing zeros are trimmed for display; the result re-encodes
/// to the same fixed-point value.
pub fn from_fixed_point(value: &str, decimals: u32) -> Result<String> {
    let value = value.trim();

    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidAmount(format!(
            "not an unsigned integer: {value}"
        )));
    }

    let width = decimals as usize;
    if width == 0 {
        let trimmed = value.trim_start_matches('0');
        return Ok(if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        });
    }

    // Pad so at least one whole-part digit remains
    let min_len = width + 1;
    let padded = format!("{value:0>min_len$}");
    let split = padded.len() - width;

    let whole = padded[..split].trim_start_matches('0');
    let whole = if whole.is_empty() { "0" } else { whole };
    let frac = padded[split..].trim_end_matches('0');

    if frac.is_empty() {
        Ok(whole.to_string())
    } else {
        Ok(format!("{whole}.{frac}"))
    }
}

/// Whether an amount string scales to zero at the given precision
pub fn is_zero_amount(amount: &str, decimals: u32) -> bool {
    matches!(to_fixed_point(amount, decimals).as_deref(), Ok("0"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_to_fixed_point() {
        assert_eq!(to_fixed_point("1", 18).unwrap(), format!("1{}", "0".repeat(18)));
        assert_eq!(to_fixed_point("0.5", 18).unwrap(), "500000000000000000");
        assert_eq!(
            to_fixed_point("50000", 18).unwrap(),
            "50000000000000000000000"
        );
        assert_eq!(to_fixed_point("1.23", 2).unwrap(), "123");
        assert_eq!(to_fixed_point("0.000001", 6).unwrap(), "1");
        assert_eq!(to_fixed_point("42", 0).unwrap(), "42");
        assert_eq!(to_fixed_point(".5", 1).unwrap(), "5");
        assert_eq!(to_fixed_point("007", 0).unwrap(), "7");
        assert_eq!(to_fixed_point("0", 18).unwrap(), "0");
        assert_eq!(to_fixed_point("0.0", 18).unwrap(), "0");
    }

    #[test]
    fn test_truncates_excess_precision() {
        // Truncation toward zero, never rounding up
        assert_eq!(to_fixed_point("1.239", 2).unwrap(), "123");
        assert_eq!(to_fixed_point("0.999", 0).unwrap(), "0");
        assert_eq!(to_fixed_point("5.9", 0).unwrap(), "5");
    }

    #[test]
    fn test_to_fixed_point_rejects_malformed() {
        assert!(to_fixed_point("", 18).is_err());
        assert!(to_fixed_point("   ", 18).is_err());
        assert!(to_fixed_point(".", 18).is_err());
        assert!(to_fixed_point("-1", 18).is_err());
        assert!(to_fixed_point("1.2.3", 18).is_err());
        assert!(to_fixed_point("1,5", 18).is_err());
        assert!(to_fixed_point("abc", 18).is_err());
        assert!(to_fixed_point("1e18", 18).is_err());
    }

    #[test]
    fn test_from_fixed_point() {
        assert_eq!(from_fixed_point("500000000000000000", 18).unwrap(), "0.5");
        assert_eq!(
            from_fixed_point("50000000000000000000000", 18).unwrap(),
            "50000"
        );
        assert_eq!(from_fixed_point("123", 2).unwrap(), "1.23");
        assert_eq!(from_fixed_point("1", 6).unwrap(), "0.000001");
        assert_eq!(from_fixed_point("42", 0).unwrap(), "42");
        assert_eq!(from_fixed_point("0", 18).unwrap(), "0");
        assert_eq!(from_fixed_point("000", 0).unwrap(), "0");
    }

    #[test]
    fn test_from_fixed_point_rejects_malformed() {
        assert!(from_fixed_point("", 18).is_err());
        assert!(from_fixed_point("1.5", 18).is_err());
        assert!(from_fixed_point("-1", 18).is_err());
        assert!(from_fixed_point("0x10", 18).is_err());
    }

    #[test]
    fn test_exact_beyond_native_integer_range() {
        // 78 significant digits, far past u128
        let big = "9".repeat(78);
        let fixed = to_fixed_point(&big, 18).unwrap();
        assert_eq!(fixed, format!("{big}{}", "0".repeat(18)));
        assert_eq!(from_fixed_point(&fixed, 18).unwrap(), big);
    }

    #[test]
    fn test_is_zero_amount() {
        assert!(is_zero_amount("0", 18));
        assert!(is_zero_amount("0.000", 18));
        assert!(is_zero_amount("0.0001", 2)); // truncates to zero
        assert!(!is_zero_amount("0.01", 2));
        assert!(!is_zero_amount("1", 18));
        assert!(!is_zero_amount("garbage", 18));
    }

    proptest! {
        #[test]
        fn codec_round_trip(whole in any::<u64>(), frac in 0u64..1_000_000) {
            // Canonical display form: no trailing fractional zeros
            let frac_str = format!("{frac:06}");
            let trimmed = frac_str.trim_end_matches('0');
            let display = if trimmed.is_empty() {
                format!("{whole}")
            } else {
                format!("{whole}.{trimmed}")
            };

            for decimals in [6u32, 18] {
                let fixed = to_fixed_point(&display, decimals).unwrap();
                prop_assert_eq!(from_fixed_point(&fixed, decimals).unwrap(), display.clone());
            }
        }

        #[test]
        fn integer_round_trip_decimals_0_and_2(value in any::<u64>()) {
            let s = value.to_string();
            prop_assert_eq!(from_fixed_point(&to_fixed_point(&s, 0).unwrap(), 0).unwrap(), s.clone());

            let cents = to_fixed_point(&s, 2).unwrap();
            prop_assert_eq!(from_fixed_point(&cents, 2).unwrap(), s);
        }
    }
}
