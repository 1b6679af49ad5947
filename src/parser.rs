//! Payment URI classification
//!
//! [`parse_uri`] turns an arbitrary scanned string into a [`PaymentIntent`].
//! It is a total, synchronous, single-pass function: every internal failure
//! (malformed URL, bad address shape, non-numeric amount) is converted into
//! the `Invalid` variant with a human-readable reason, so the caller can
//! prompt for a rescan instead of handling errors.
//!
//! Dispatch order: `ethereum:` scheme (token-transfer sub-pattern first,
//! native-value fallback), then application deep-links whose path contains
//! the payment endpoint, then bare addresses.

use std::collections::HashMap;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::{
    address::is_hex_address, amount, normalize_category, Address, Error, PaymentIntent,
    PaymentType, Result, TokenInfo, DEFAULT_TOKEN_DECIMALS, DEFAULT_TOKEN_SYMBOL,
    ETHEREUM_SCHEME, PAY_PATH, TRANSFER_PATH,
};

/// Classify a scanned string into a payment intent. Never fails; rejected
/// input comes back as [`PaymentIntent::Invalid`].
pub fn parse_uri(input: &str) -> PaymentIntent {
    classify(input.trim()).unwrap_or_else(|e| PaymentIntent::invalid(e.to_string()))
}

/// Classify a scanned string, additionally requiring any deep-link to carry
/// the expected `type` tag. A business-payment scanner handed a personal link
/// (or vice versa) gets an invalid result rather than a silent pass-through.
pub fn parse_uri_for(input: &str, expected: PaymentType) -> PaymentIntent {
    let intent = parse_uri(input);
    if let PaymentIntent::AppDeepLink { payment_type, .. } = &intent {
        if *payment_type != expected {
            let err = Error::UnsupportedPaymentType {
                expected: expected.to_string(),
                actual: payment_type.to_string(),
            };
            return PaymentIntent::invalid(err.to_string());
        }
    }
    intent
}

fn classify(input: &str) -> Result<PaymentIntent> {
    if input.is_empty() {
        return Err(Error::UnrecognizedFormat("empty input".to_string()));
    }

    if let Some(rest) = input
        .strip_prefix(ETHEREUM_SCHEME)
        .and_then(|r| r.strip_prefix(':'))
    {
        return parse_ethereum(rest);
    }

    if is_deep_link(input) {
        return parse_deep_link(input);
    }

    if is_hex_address(input) {
        return Ok(PaymentIntent::NativeTransfer {
            recipient: Address::parse(input)?,
            amount_wei: None,
            chain_id: None,
        });
    }

    Err(Error::UnrecognizedFormat(format!(
        "not a recognized payment string: {input}"
    )))
}

fn is_deep_link(input: &str) -> bool {
    (input.starts_with("https://") || input.starts_with("http://"))
        && input.contains(&format!("/{PAY_PATH}"))
}

/// `ethereum:` is not a hierarchical scheme, so parameters are split by hand
/// the same way fragment parameters are in wallet URI handlers.
fn parse_ethereum(rest: &str) -> Result<PaymentIntent> {
    let (target, query) = match rest.split_once('?') {
        Some((t, q)) => (t, Some(q)),
        None => (rest, None),
    };
    let params = match query {
        Some(q) => parse_query(q)?,
        None => HashMap::new(),
    };
    let chain_id = parse_chain_id(&params)?;

    // Token-transfer sub-pattern: <token>/transfer?address=..&uint256=..
    if let Some((token, path)) = target.split_once('/') {
        if path != TRANSFER_PATH {
            return Err(Error::UnrecognizedFormat(format!(
                "unknown path segment: {path}"
            )));
        }
        let token = Address::parse(token)?;
        let recipient = params
            .get("address")
            .ok_or(Error::MissingParameter("address"))?;
        let recipient = Address::parse(recipient)?;
        let units = params
            .get("uint256")
            .ok_or(Error::MissingParameter("uint256"))?;
        require_integer(units)?;

        return Ok(PaymentIntent::TokenTransfer {
            token,
            recipient,
            amount_base_units: units.clone(),
            decimals: DEFAULT_TOKEN_DECIMALS,
            chain_id,
        });
    }

    // Native-value sub-pattern: <recipient>?value=..
    let recipient = Address::parse(target)?;
    let amount_wei = match params.get("value") {
        Some(v) => {
            require_integer(v)?;
            Some(v.clone())
        }
        None => None,
    };

    Ok(PaymentIntent::NativeTransfer {
        recipient,
        amount_wei,
        chain_id,
    })
}

fn parse_deep_link(input: &str) -> Result<PaymentIntent> {
    let url = Url::parse(input)?;
    let params: HashMap<String, String> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let recipient = params
        .get("address")
        .ok_or(Error::MissingParameter("address"))?;
    let recipient = Address::parse(recipient)?;

    // Deep-link amounts are human-decimal; validate through the codec
    let amount = match params.get("amount") {
        Some(a) if !a.is_empty() => {
            amount::to_fixed_point(a, DEFAULT_TOKEN_DECIMALS)?;
            Some(a.clone())
        }
        _ => None,
    };

    let payment_type = match params.get("type") {
        Some(t) => PaymentType::from_str(t).ok_or_else(|| Error::UnsupportedPaymentType {
            expected: "business or personal".to_string(),
            actual: t.clone(),
        })?,
        None => PaymentType::default(),
    };

    let token = match params.get("token") {
        Some(t) => {
            let address = Address::parse(t)?;
            let symbol = params
                .get("tokenSymbol")
                .filter(|s| !s.is_empty())
                .cloned()
                .unwrap_or_else(|| DEFAULT_TOKEN_SYMBOL.to_string());
            Some(TokenInfo {
                address,
                symbol,
                decimals: DEFAULT_TOKEN_DECIMALS,
            })
        }
        None => None,
    };

    Ok(PaymentIntent::AppDeepLink {
        recipient,
        amount,
        category: normalize_category(params.get("category").map(String::as_str)),
        payment_type,
        chain_id: parse_chain_id(&params)?,
        token,
    })
}

fn parse_query(query: &str) -> Result<HashMap<String, String>> {
    let mut params = HashMap::new();
    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let mut parts = pair.splitn(2, '=');
        let name = parts.next().unwrap_or("");
        let value = parts.next().unwrap_or("");
        let decoded = percent_decode_str(value)
            .decode_utf8()
            .map_err(|e| Error::UnrecognizedFormat(format!("bad percent-encoding: {e}")))?;
        params.insert(name.to_string(), decoded.into_owned());
    }
    Ok(params)
}

fn parse_chain_id(params: &HashMap<String, String>) -> Result<Option<u64>> {
    match params.get("chainId") {
        Some(raw) => raw
            .parse::<u64>()
            .map(Some)
            .map_err(|_| Error::InvalidChainId(raw.clone())),
        None => Ok(None),
    }
}

fn require_integer(value: &str) -> Result<()> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidAmount(format!(
            "expected an unsigned integer: {value}"
        )));
    }
    Ok(())
}
