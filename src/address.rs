//! Account address validation
//!
//! Addresses are 20-byte account identifiers rendered as `0x`-prefixed
//! 40-hex-character strings. The check is checksum-agnostic: mixed-case input
//! is accepted and the original casing is preserved so re-emitted URIs are
//! byte-identical to their input.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// Check whether a string has the `0x` + 40 hex character address shape
pub fn is_hex_address(s: &str) -> bool {
    s.len() == 42 && s.starts_with("0x") && s[2..].chars().all(|c| c.is_ascii_hexdigit())
}

/// A validated account address
#[derive(Debug, Clone)]
pub struct Address(String);

impl Address {
    /// Validate and wrap a candidate address string
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if is_hex_address(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(Error::InvalidRecipient(s.to_string()))
        }
    }

    /// Get the address as originally cased
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
