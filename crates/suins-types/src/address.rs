//! Address normalization utilities.
//!
//! This module is the canonical source for address normalization in the workspace.
//! Other crates should import from here rather than defining their own logic.
//!
//! Sui addresses are 32-byte values, but they're often represented in different formats:
//! - Short form: "0x2"
//! - Full form: "0x0000000000000000000000000000000000000000000000000000000000000002"
//! - Without prefix: "2"
//!
//! [`reverse_lookup_key`] uses the hex digits it is given; resolving an
//! address normalizes it first, so reverse keys are always 64 lower-case hex
//! digits. Ownership comparisons also go through [`normalize_address`].

use move_core_types::account_address::AccountAddress;

/// Suffix of the reverse zone under which address -> name claims live.
pub const REVERSE_ZONE_SUFFIX: &str = ".addr.reverse";

/// Normalize an address to lowercase with 0x prefix and full 64 hex characters.
///
/// This is the canonical address format for internal use and comparisons.
///
/// # Examples
///
/// ```
/// use suins_types::address::normalize_address;
///
/// assert_eq!(
///     normalize_address("0x2"),
///     "0x0000000000000000000000000000000000000000000000000000000000000002"
/// );
/// assert_eq!(
///     normalize_address("ABC"),
///     "0x0000000000000000000000000000000000000000000000000000000000000abc"
/// );
/// ```
pub fn normalize_address(addr: &str) -> String {
    let hex = strip_hex_prefix(addr).to_lowercase();
    if hex.len() < 64 {
        format!("0x{:0>64}", hex)
    } else {
        format!("0x{}", &hex[..64])
    }
}

/// Normalize an address, returning None if it's not a valid hex address.
///
/// Empty input and inputs longer than 32 bytes are rejected.
///
/// # Examples
///
/// ```
/// use suins_types::address::normalize_address_checked;
///
/// assert_eq!(
///     normalize_address_checked("0x2"),
///     Some("0x0000000000000000000000000000000000000000000000000000000000000002".to_string())
/// );
/// assert_eq!(normalize_address_checked("not-hex"), None);
/// assert_eq!(normalize_address_checked("0x"), None);
/// ```
pub fn normalize_address_checked(addr: &str) -> Option<String> {
    let hex = strip_hex_prefix(addr);
    if hex.is_empty() || hex.len() > 64 {
        return None;
    }
    let normalized = normalize_address(addr);
    AccountAddress::from_hex_literal(&normalized).ok()?;
    Some(normalized)
}

/// Parse a string address into an AccountAddress.
///
/// Handles both short ("0x2") and full forms.
pub fn parse_address(addr: &str) -> Option<AccountAddress> {
    let normalized = normalize_address_checked(addr)?;
    AccountAddress::from_hex_literal(&normalized).ok()
}

/// Compare two addresses after normalization.
pub fn addresses_equal(a: &str, b: &str) -> bool {
    match (normalize_address_checked(a), normalize_address_checked(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Build the reverse-zone key for an address: prefix stripped, zone appended.
///
/// # Examples
///
/// ```
/// use suins_types::address::reverse_lookup_key;
///
/// assert_eq!(reverse_lookup_key("0xab12"), "ab12.addr.reverse");
/// ```
pub fn reverse_lookup_key(addr: &str) -> String {
    format!("{}{}", strip_hex_prefix(addr), REVERSE_ZONE_SUFFIX)
}

/// Whether a registry key belongs to the reverse zone.
pub fn is_reverse_key(key: &str) -> bool {
    key.ends_with(REVERSE_ZONE_SUFFIX)
}

fn strip_hex_prefix(addr: &str) -> &str {
    let addr = addr.trim();
    addr.strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr)
}
