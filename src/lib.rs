//! # Payment URIs for SmartVerse
//!
//! This crate implements the SmartVerse QR payment payload protocol: encoding
//! a payment intent into a scannable URI string on the payee side, and
//! classifying an arbitrary scanned string back into a typed intent on the
//! payer side.
//!
//! ## Wire formats
//!
//! Three string formats are recognized:
//!
//! ```text
//! ethereum:<recipient>?value=<fixedPoint>&chainId=<id>
//! ethereum:<token>/transfer?address=<recipient>&uint256=<fixedPoint>&chainId=<id>
//! https://smartverse.app/pay?address=<recipient>&category=<text>&type=<business|personal>&...
//! ```
//!
//! The first two carry amounts as base-10 integers in the token's smallest
//! unit (18-decimal fixed point for the native currency). The deep-link form
//! carries human-decimal amounts because it is read back by the application
//! that generated it. A bare `0x`-prefixed address is also accepted by the
//! parser as a minimal, amount-less native intent.
//!
//! ## Overview
//!
//! - [`PaymentUriBuilder`] builds a [`PaymentUri`] from a recipient plus
//!   optional amount, token, category and chain id, choosing the format by
//!   fixed priority rules.
//! - [`parse_uri`] is the inverse: a total classification function that
//!   returns a [`PaymentIntent`], using the `Invalid` variant instead of ever
//!   raising an error across the crate boundary.
//! - [`to_fixed_point`] / [`from_fixed_point`] convert between human decimal
//!   strings and fixed-point integer strings without floating point.

mod address;
mod amount;
mod builder;
mod error;
mod intent;
mod parser;
mod request;
mod resolver;

#[cfg(feature = "qrcode")]
mod qr;

pub use address::{is_hex_address, Address};
pub use amount::{from_fixed_point, is_zero_amount, to_fixed_point};
pub use builder::{PaymentUri, PaymentUriBuilder};
pub use error::{Error, Result};
pub use intent::{normalize_category, PaymentIntent, PaymentType, TokenInfo, UriFormat};
pub use parser::{parse_uri, parse_uri_for};
pub use request::{PaymentRequest, PaymentRequestStatus};
pub use resolver::{resolve_recipient, NameResolver};

#[cfg(feature = "qrcode")]
pub use qr::{render_data_uri, render_png, DEFAULT_QR_SIZE};

/// Scheme literal for on-chain transfer URIs
pub const ETHEREUM_SCHEME: &str = "ethereum";

/// Path segment marking the ERC-20 transfer form of the scheme
pub const TRANSFER_PATH: &str = "transfer";

/// Base URL for application deep-links
pub const APP_BASE_URL: &str = "https://smartverse.app";

/// Payment endpoint path segment of the deep-link form
pub const PAY_PATH: &str = "pay";

/// Token decimals assumed when no token-specific metadata is known.
///
/// Previously generated codes were produced under this default, so changing
/// it would break round-trip compatibility.
pub const DEFAULT_TOKEN_DECIMALS: u32 = 18;

/// Category supplied when a payload carries none
pub const DEFAULT_CATEGORY: &str = "General Payment";

/// Symbol supplied when a token address arrives without one
pub const DEFAULT_TOKEN_SYMBOL: &str = "TOKEN";

/// Suffix of registered SmartVerse names
pub const SW_NAME_SUFFIX: &str = ".sw";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(ETHEREUM_SCHEME, "ethereum");
        assert_eq!(DEFAULT_TOKEN_DECIMALS, 18);
        assert_eq!(DEFAULT_CATEGORY, "General Payment");
    }
}
