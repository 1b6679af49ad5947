//! Error types for payment URI operations

use thiserror::Error;

/// Result type alias for payment URI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or classifying payment URIs
#[derive(Debug, Error)]
pub enum Error {
    /// The candidate address fails the 0x-prefixed 40-hex-character check
    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),

    /// The amount string is empty, non-numeric or negative
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// The scanned string matches none of the known schemes
    #[error("Unrecognized payment format: {0}")]
    UnrecognizedFormat(String),

    /// A deep-link carried a `type` the calling context does not accept
    #[error("Unsupported payment type: expected {expected}, got {actual}")]
    UnsupportedPaymentType { expected: String, actual: String },

    /// Missing required query parameter
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// The `chainId` parameter is not a base-10 integer
    #[error("Invalid chain id: {0}")]
    InvalidChainId(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Name resolution failed
    #[error("Name resolution failed: {0}")]
    Resolution(String),

    /// QR code rendering failed
    #[error("QR encoding failed: {0}")]
    QrEncoding(String),
}
