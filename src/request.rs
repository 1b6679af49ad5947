//! Payment request bookkeeping entity
//!
//! A [`PaymentRequest`] is the durable counterpart of an ephemeral
//! [`crate::PaymentIntent`]: it identifies one expected payment into a
//! business vault and tracks its status as the payment resolves. Storage of
//! these records is the host application's concern; this module only defines
//! the serializable entity and its lifecycle checks.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{amount, Address, Error, Result, DEFAULT_TOKEN_DECIMALS};

/// Default validity window for a payment request
const DEFAULT_VALIDITY_MINUTES: i64 = 15;

/// Resolution status of a tracked payment request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentRequestStatus {
    /// Awaiting payment
    #[default]
    Pending,
    /// Transaction submitted, awaiting confirmation
    Processing,
    /// Payment confirmed
    Success,
    /// Payment failed or was rejected
    Failed,
}

impl PaymentRequestStatus {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentRequestStatus::Pending => "pending",
            PaymentRequestStatus::Processing => "processing",
            PaymentRequestStatus::Success => "success",
            PaymentRequestStatus::Failed => "failed",
        }
    }

    /// Whether the status can no longer change
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PaymentRequestStatus::Success | PaymentRequestStatus::Failed
        )
    }
}

impl std::fmt::Display for PaymentRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One expected payment into a business vault
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Identifier the request is keyed by
    pub id: String,
    /// Destination vault address
    pub vault: Address,
    /// Expected amount as a human decimal string
    pub amount: String,
    /// Bookkeeping category
    pub category: String,
    /// When the request was created
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
    /// When the request stops being payable
    #[serde(with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
    /// Current resolution status
    #[serde(default)]
    pub status: PaymentRequestStatus,
    /// Network the payment is expected on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
}

impl PaymentRequest {
    /// Create a pending request with the default validity window
    pub fn new(
        id: impl Into<String>,
        vault: Address,
        amount: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            vault,
            amount: amount.into(),
            category: category.into(),
            created_at: now,
            expires_at: now + Duration::minutes(DEFAULT_VALIDITY_MINUTES),
            status: PaymentRequestStatus::default(),
            chain_id: None,
        }
    }

    /// Override the validity window
    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.expires_at = self.created_at + validity;
        self
    }

    /// Pin the request to a network
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Check whether the request can still be paid
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Time remaining until expiration
    pub fn time_remaining(&self) -> Duration {
        self.expires_at - Utc::now()
    }

    /// Advance the status. Terminal statuses never change again.
    pub fn set_status(&mut self, status: PaymentRequestStatus) {
        if !self.status.is_terminal() {
            self.status = status;
        }
    }

    /// Validate the request fields
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::MissingParameter("id"));
        }
        amount::to_fixed_point(&self.amount, DEFAULT_TOKEN_DECIMALS)?;
        Ok(())
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Into::into)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }
}
