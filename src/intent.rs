//! Typed payment intents
//!
//! A [`PaymentIntent`] is the logical entity carried by a scannable payment
//! string. One variant exists per wire format, so a state like "token amount
//! on a native transfer" cannot be represented. Intents are transient: each
//! scan or generation produces a fresh value which is consumed immediately by
//! the URI renderer or the transaction-construction step.

use serde::{Deserialize, Serialize};

use crate::{
    address::Address, amount, DEFAULT_CATEGORY, DEFAULT_TOKEN_DECIMALS, DEFAULT_TOKEN_SYMBOL,
};

/// Wire format tag of a payment payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UriFormat {
    /// Native-currency transfer URI (`ethereum:<addr>?value=...`)
    #[serde(rename = "native-uri")]
    NativeUri,
    /// ERC-20 transfer URI (`ethereum:<token>/transfer?...`)
    #[serde(rename = "token-transfer-uri")]
    TokenTransferUri,
    /// Application deep-link (`https://<host>/pay?...`)
    #[serde(rename = "dapp-url")]
    DappUrl,
    /// Unclassifiable input
    #[serde(rename = "invalid")]
    Invalid,
}

impl UriFormat {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            UriFormat::NativeUri => "native-uri",
            UriFormat::TokenTransferUri => "token-transfer-uri",
            UriFormat::DappUrl => "dapp-url",
            UriFormat::Invalid => "invalid",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "native-uri" => Some(UriFormat::NativeUri),
            "token-transfer-uri" => Some(UriFormat::TokenTransferUri),
            "dapp-url" => Some(UriFormat::DappUrl),
            "invalid" => Some(UriFormat::Invalid),
            _ => None,
        }
    }
}

impl std::fmt::Display for UriFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Deep-link `type` tag partitioning vault payments from direct transfers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    /// Destined for a business vault with category bookkeeping
    Business,
    /// Destined for a direct personal transfer
    #[default]
    Personal,
}

impl PaymentType {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Business => "business",
            PaymentType::Personal => "personal",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "business" => Some(PaymentType::Business),
            "personal" => Some(PaymentType::Personal),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display metadata for an ERC-20 token referenced by a payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Token contract address
    pub address: Address,
    /// Display symbol; a conventional default when unresolved
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Token decimals; 18 when no metadata is known
    #[serde(default = "default_decimals")]
    pub decimals: u32,
}

fn default_symbol() -> String {
    DEFAULT_TOKEN_SYMBOL.to_string()
}

fn default_decimals() -> u32 {
    DEFAULT_TOKEN_DECIMALS
}

impl TokenInfo {
    /// Token info with the default symbol and decimals
    pub fn new(address: Address) -> Self {
        Self {
            address,
            symbol: default_symbol(),
            decimals: DEFAULT_TOKEN_DECIMALS,
        }
    }

    /// Set the display symbol
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Set the token decimals
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }
}

/// A classified payment payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format")]
pub enum PaymentIntent {
    /// Native-currency transfer, amount in wei-style fixed point
    #[serde(rename = "native-uri")]
    NativeTransfer {
        recipient: Address,
        /// Fixed-point amount at 18 decimals; absent for reusable codes
        #[serde(skip_serializing_if = "Option::is_none")]
        amount_wei: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        chain_id: Option<u64>,
    },
    /// ERC-20 transfer through the token contract
    #[serde(rename = "token-transfer-uri")]
    TokenTransfer {
        token: Address,
        recipient: Address,
        /// Fixed-point amount in the token's smallest unit
        amount_base_units: String,
        #[serde(default = "default_decimals")]
        decimals: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        chain_id: Option<u64>,
    },
    /// Application deep-link, read back by the app that generated it
    #[serde(rename = "dapp-url")]
    AppDeepLink {
        recipient: Address,
        /// Human-decimal amount, unlike the fixed-point on-chain forms
        #[serde(skip_serializing_if = "Option::is_none")]
        amount: Option<String>,
        category: String,
        payment_type: PaymentType,
        #[serde(skip_serializing_if = "Option::is_none")]
        chain_id: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        token: Option<TokenInfo>,
    },
    /// Unclassifiable input; carries no usable recipient and must not be
    /// used to construct a transaction
    #[serde(rename = "invalid")]
    Invalid { reason: String },
}

impl PaymentIntent {
    /// Tag an unclassifiable input with a human-readable reason
    pub fn invalid(reason: impl Into<String>) -> Self {
        PaymentIntent::Invalid {
            reason: reason.into(),
        }
    }

    /// Wire format of this intent
    pub fn format(&self) -> UriFormat {
        match self {
            PaymentIntent::NativeTransfer { .. } => UriFormat::NativeUri,
            PaymentIntent::TokenTransfer { .. } => UriFormat::TokenTransferUri,
            PaymentIntent::AppDeepLink { .. } => UriFormat::DappUrl,
            PaymentIntent::Invalid { .. } => UriFormat::Invalid,
        }
    }

    /// Whether classification failed
    pub fn is_invalid(&self) -> bool {
        matches!(self, PaymentIntent::Invalid { .. })
    }

    /// Destination address; `None` for invalid intents
    pub fn recipient(&self) -> Option<&Address> {
        match self {
            PaymentIntent::NativeTransfer { recipient, .. }
            | PaymentIntent::TokenTransfer { recipient, .. }
            | PaymentIntent::AppDeepLink { recipient, .. } => Some(recipient),
            PaymentIntent::Invalid { .. } => None,
        }
    }

    /// Intended network, when the payload carried one
    pub fn chain_id(&self) -> Option<u64> {
        match self {
            PaymentIntent::NativeTransfer { chain_id, .. }
            | PaymentIntent::TokenTransfer { chain_id, .. }
            | PaymentIntent::AppDeepLink { chain_id, .. } => *chain_id,
            PaymentIntent::Invalid { .. } => None,
        }
    }

    /// Human-decimal display amount, converted through the fixed-point codec
    /// where the wire carried smallest-unit integers
    pub fn amount_formatted(&self) -> Option<String> {
        match self {
            PaymentIntent::NativeTransfer { amount_wei, .. } => amount_wei
                .as_deref()
                .and_then(|w| amount::from_fixed_point(w, DEFAULT_TOKEN_DECIMALS).ok()),
            PaymentIntent::TokenTransfer {
                amount_base_units,
                decimals,
                ..
            } => amount::from_fixed_point(amount_base_units, *decimals).ok(),
            PaymentIntent::AppDeepLink { amount, .. } => amount.clone(),
            PaymentIntent::Invalid { .. } => None,
        }
    }
}

/// Supply the conventional default category when a payload carries none,
/// so downstream bookkeeping always has a non-empty category
pub fn normalize_category(category: Option<&str>) -> String {
    match category {
        Some(c) if !c.trim().is_empty() => c.trim().to_string(),
        _ => DEFAULT_CATEGORY.to_string(),
    }
}
