//! Name resolution seam
//!
//! Recipients can be entered either as raw addresses or as registered `.sw`
//! names. Resolution is a one-shot request/response against an injected
//! client; the core imposes no retry or timeout, and holds no hidden client
//! state of its own.

use async_trait::async_trait;

use crate::{address::is_hex_address, Address, Error, Result, SW_NAME_SUFFIX};

/// Client capable of resolving registered names to addresses
#[async_trait]
pub trait NameResolver: Send + Sync {
    /// Resolve a registered name to the address it points at
    async fn resolve(&self, name: &str) -> Result<Address>;
}

/// Turn user-entered recipient input into an address.
///
/// Hex addresses pass through untouched; `.sw` names go to the resolver;
/// anything else is rejected as an invalid recipient.
pub async fn resolve_recipient(input: &str, resolver: &dyn NameResolver) -> Result<Address> {
    let input = input.trim();

    if is_hex_address(input) {
        return Address::parse(input);
    }
    if input.to_ascii_lowercase().ends_with(SW_NAME_SUFFIX) && input.len() > SW_NAME_SUFFIX.len() {
        return resolver.resolve(input).await;
    }

    Err(Error::InvalidRecipient(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapResolver(HashMap<String, Address>);

    #[async_trait]
    impl NameResolver for MapResolver {
        async fn resolve(&self, name: &str) -> Result<Address> {
            self.0
                .get(name)
                .cloned()
                .ok_or_else(|| Error::Resolution(format!("name not registered: {name}")))
        }
    }

    fn fixture() -> (MapResolver, Address) {
        let addr = Address::parse(&format!("0x{}", "ab".repeat(20))).unwrap();
        let mut names = HashMap::new();
        names.insert("warung.sw".to_string(), addr.clone());
        (MapResolver(names), addr)
    }

    #[tokio::test]
    async fn test_hex_address_passes_through() {
        let (resolver, addr) = fixture();
        let resolved = resolve_recipient(addr.as_str(), &resolver).await.unwrap();
        assert_eq!(resolved, addr);
    }

    #[tokio::test]
    async fn test_registered_name_resolves() {
        let (resolver, addr) = fixture();
        let resolved = resolve_recipient("warung.sw", &resolver).await.unwrap();
        assert_eq!(resolved, addr);
    }

    #[tokio::test]
    async fn test_unregistered_name_fails() {
        let (resolver, _) = fixture();
        let err = resolve_recipient("unknown.sw", &resolver).await.unwrap_err();
        assert!(matches!(err, Error::Resolution(_)));
    }

    #[tokio::test]
    async fn test_non_name_non_address_rejected() {
        let (resolver, _) = fixture();
        let err = resolve_recipient("warung", &resolver).await.unwrap_err();
        assert!(matches!(err, Error::InvalidRecipient(_)));

        let err = resolve_recipient(".sw", &resolver).await.unwrap_err();
        assert!(matches!(err, Error::InvalidRecipient(_)));
    }
}
