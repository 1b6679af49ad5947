//! Payment URI construction
//!
//! The builder picks the wire format from what was supplied, first match
//! wins: token plus non-zero amount yields a token-transfer URI, a non-zero
//! amount alone yields a native-currency URI, and everything else becomes a
//! reusable application deep-link. Generation is pure; identical inputs
//! always produce a byte-identical string, which matters for static codes
//! customers scan repeatedly.

use std::fmt;
use std::str::FromStr;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::{
    amount, normalize_category, parse_uri, Address, Error, PaymentIntent, PaymentType, Result,
    TokenInfo, UriFormat, APP_BASE_URL, DEFAULT_TOKEN_DECIMALS, ETHEREUM_SCHEME, PAY_PATH,
    TRANSFER_PATH,
};

/// Builder for scannable payment URIs
pub struct PaymentUriBuilder {
    recipient: Address,
    amount: Option<String>,
    token: Option<TokenInfo>,
    chain_id: Option<u64>,
    category: Option<String>,
    payment_type: PaymentType,
    app_base: String,
}

impl PaymentUriBuilder {
    /// Create a builder for payments to the given recipient
    pub fn new(recipient: Address) -> Self {
        Self {
            recipient,
            amount: None,
            token: None,
            chain_id: None,
            category: None,
            payment_type: PaymentType::default(),
            app_base: APP_BASE_URL.to_string(),
        }
    }

    /// Set the amount as a human decimal string (e.g. `"0.5"`)
    pub fn amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    /// Request an ERC-20 transfer through the given token
    pub fn token(mut self, token: TokenInfo) -> Self {
        self.token = Some(token);
        self
    }

    /// Pin the payment to a network
    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Set the bookkeeping category carried by deep-links
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the business/personal tag carried by deep-links
    pub fn payment_type(mut self, payment_type: PaymentType) -> Self {
        self.payment_type = payment_type;
        self
    }

    /// Override the deep-link base URL
    pub fn app_base(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.app_base = base.trim_end_matches('/').to_string();
        self
    }

    /// Build the payment URI, validating recipient and amount first
    pub fn build(self) -> Result<PaymentUri> {
        let decimals = self
            .token
            .as_ref()
            .map(|t| t.decimals)
            .unwrap_or(DEFAULT_TOKEN_DECIMALS);

        // Zero scales to a worthless transfer; treat it as "no amount" so the
        // result is a reusable static code instead.
        let fixed = match self.amount.as_deref() {
            Some(a) if amount::is_zero_amount(a, decimals) => None,
            Some(a) => Some(amount::to_fixed_point(a, decimals)?),
            None => None,
        };

        let intent = match (self.token, fixed) {
            (Some(token), Some(units)) => PaymentIntent::TokenTransfer {
                token: token.address,
                recipient: self.recipient,
                amount_base_units: units,
                decimals,
                chain_id: self.chain_id,
            },
            (None, Some(wei)) => PaymentIntent::NativeTransfer {
                recipient: self.recipient,
                amount_wei: Some(wei),
                chain_id: self.chain_id,
            },
            (token, None) => PaymentIntent::AppDeepLink {
                recipient: self.recipient,
                amount: None,
                category: normalize_category(self.category.as_deref()),
                payment_type: self.payment_type,
                chain_id: self.chain_id,
                token,
            },
        };

        Ok(PaymentUri {
            intent,
            app_base: self.app_base,
        })
    }
}

/// A buildable, renderable payment URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentUri {
    intent: PaymentIntent,
    app_base: String,
}

impl PaymentUri {
    /// Wrap an already-classified intent; invalid intents are rejected
    pub fn from_intent(intent: PaymentIntent) -> Result<Self> {
        if let PaymentIntent::Invalid { reason } = intent {
            return Err(Error::UnrecognizedFormat(reason));
        }
        Ok(Self {
            intent,
            app_base: APP_BASE_URL.to_string(),
        })
    }

    /// Get the underlying intent
    pub fn intent(&self) -> &PaymentIntent {
        &self.intent
    }

    /// Consume self and return the intent
    pub fn into_intent(self) -> PaymentIntent {
        self.intent
    }

    /// Wire format of this URI
    pub fn format(&self) -> UriFormat {
        self.intent.format()
    }

    /// Render the full URI string
    pub fn to_uri_string(&self) -> String {
        match &self.intent {
            PaymentIntent::NativeTransfer {
                recipient,
                amount_wei,
                chain_id,
            } => {
                let mut params = Vec::new();
                if let Some(wei) = amount_wei {
                    params.push(format!("value={wei}"));
                }
                if let Some(id) = chain_id {
                    params.push(format!("chainId={id}"));
                }
                render(format!("{ETHEREUM_SCHEME}:{recipient}"), &params)
            }
            PaymentIntent::TokenTransfer {
                token,
                recipient,
                amount_base_units,
                chain_id,
                ..
            } => {
                let mut params = vec![
                    format!("address={recipient}"),
                    format!("uint256={amount_base_units}"),
                ];
                if let Some(id) = chain_id {
                    params.push(format!("chainId={id}"));
                }
                render(format!("{ETHEREUM_SCHEME}:{token}/{TRANSFER_PATH}"), &params)
            }
            PaymentIntent::AppDeepLink {
                recipient,
                amount,
                category,
                payment_type,
                chain_id,
                token,
            } => {
                let mut params = vec![format!("address={recipient}")];
                if let Some(a) = amount {
                    params.push(format!("amount={a}"));
                }
                params.push(format!("category={}", encode_text(category)));
                params.push(format!("type={payment_type}"));
                if let Some(id) = chain_id {
                    params.push(format!("chainId={id}"));
                }
                if let Some(t) = token {
                    params.push(format!("token={}", t.address));
                    params.push(format!("tokenSymbol={}", encode_text(&t.symbol)));
                }
                render(format!("{}/{PAY_PATH}", self.app_base), &params)
            }
            // Both constructors reject invalid intents
            PaymentIntent::Invalid { .. } => String::new(),
        }
    }
}

fn render(head: String, params: &[String]) -> String {
    if params.is_empty() {
        head
    } else {
        format!("{head}?{}", params.join("&"))
    }
}

fn encode_text(s: &str) -> String {
    utf8_percent_encode(s, NON_ALPHANUMERIC).to_string()
}

impl fmt::Display for PaymentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uri_string())
    }
}

impl FromStr for PaymentUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match parse_uri(s) {
            PaymentIntent::Invalid { reason } => Err(Error::UnrecognizedFormat(reason)),
            intent => Ok(Self {
                intent,
                app_base: APP_BASE_URL.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(fill: &str) -> Address {
        Address::parse(&format!("0x{}", fill.repeat(40 / fill.len()))).unwrap()
    }

    #[test]
    fn test_native_uri() {
        let uri = PaymentUriBuilder::new(addr("ab"))
            .amount("0.5")
            .chain_id(11155111)
            .build()
            .unwrap();

        assert_eq!(uri.format(), UriFormat::NativeUri);
        assert_eq!(
            uri.to_uri_string(),
            format!(
                "ethereum:0x{}?value=500000000000000000&chainId=11155111",
                "ab".repeat(20)
            )
        );
    }

    #[test]
    fn test_token_transfer_uri() {
        let vault = addr("1122");
        let token = addr("3344");
        let uri = PaymentUriBuilder::new(vault)
            .token(TokenInfo::new(token).with_symbol("IDRT"))
            .amount("50000")
            .chain_id(11155111)
            .build()
            .unwrap();

        assert_eq!(uri.format(), UriFormat::TokenTransferUri);
        assert_eq!(
            uri.to_uri_string(),
            format!(
                "ethereum:0x{}/transfer?address=0x{}&uint256=50000000000000000000000&chainId=11155111",
                "3344".repeat(10),
                "1122".repeat(10)
            )
        );
    }

    #[test]
    fn test_static_deep_link() {
        let uri = PaymentUriBuilder::new(addr("cd"))
            .category("Food & Beverage")
            .payment_type(PaymentType::Business)
            .chain_id(11155111)
            .build()
            .unwrap();

        assert_eq!(uri.format(), UriFormat::DappUrl);
        let s = uri.to_uri_string();
        assert!(s.starts_with("https://smartverse.app/pay?address=0x"));
        assert!(s.contains("category=Food%20%26%20Beverage"));
        assert!(s.contains("type=business"));
        assert!(s.contains("chainId=11155111"));
        assert!(!s.contains("amount="));
    }

    #[test]
    fn test_deep_link_carries_token_for_later_resolution() {
        let uri = PaymentUriBuilder::new(addr("cd"))
            .token(TokenInfo::new(addr("ef")).with_symbol("IDRT"))
            .payment_type(PaymentType::Business)
            .build()
            .unwrap();

        let s = uri.to_uri_string();
        assert_eq!(uri.format(), UriFormat::DappUrl);
        assert!(s.contains(&format!("token=0x{}", "ef".repeat(20))));
        assert!(s.contains("tokenSymbol=IDRT"));
    }

    #[test]
    fn test_zero_amount_becomes_static_code() {
        let uri = PaymentUriBuilder::new(addr("ab"))
            .amount("0.0")
            .build()
            .unwrap();
        assert_eq!(uri.format(), UriFormat::DappUrl);
    }

    #[test]
    fn test_subunit_amount_becomes_static_code() {
        // 0.001 truncates to zero at 2 decimals, so no transfer URI is emitted
        let uri = PaymentUriBuilder::new(addr("ab"))
            .token(TokenInfo::new(addr("cd")).with_decimals(2))
            .amount("0.001")
            .build()
            .unwrap();
        assert_eq!(uri.format(), UriFormat::DappUrl);
    }

    #[test]
    fn test_default_category() {
        let uri = PaymentUriBuilder::new(addr("ab")).build().unwrap();
        assert!(uri.to_uri_string().contains("category=General%20Payment"));
    }

    #[test]
    fn test_builder_is_deterministic() {
        let build = || {
            PaymentUriBuilder::new(addr("ab"))
                .amount("1.25")
                .chain_id(1)
                .build()
                .unwrap()
                .to_uri_string()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_invalid_amount_rejected_before_emitting() {
        let err = PaymentUriBuilder::new(addr("ab"))
            .amount("not-a-number")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidAmount(_)));
    }

    #[test]
    fn test_from_intent_rejects_invalid() {
        let err = PaymentUri::from_intent(PaymentIntent::invalid("scan failed")).unwrap_err();
        assert!(matches!(err, Error::UnrecognizedFormat(_)));
    }

    #[test]
    fn test_display_and_from_str_round_trip() {
        let uri = PaymentUriBuilder::new(addr("ab"))
            .amount("0.5")
            .chain_id(1)
            .build()
            .unwrap();

        let parsed: PaymentUri = uri.to_string().parse().unwrap();
        assert_eq!(parsed.intent(), uri.intent());
    }

    #[test]
    fn test_token_decimals_respected() {
        let uri = PaymentUriBuilder::new(addr("ab"))
            .token(TokenInfo::new(addr("cd")).with_decimals(6))
            .amount("1.5")
            .build()
            .unwrap();
        assert!(uri.to_uri_string().ends_with("uint256=1500000"));
    }

    #[test]
    fn test_app_base_override() {
        let uri = PaymentUriBuilder::new(addr("ab"))
            .app_base("https://staging.smartverse.app/")
            .build()
            .unwrap();
        assert!(uri
            .to_uri_string()
            .starts_with("https://staging.smartverse.app/pay?"));
    }
}
