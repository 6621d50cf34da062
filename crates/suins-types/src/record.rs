//! The resolved name record handed back to callers.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Sentinel reported when an avatar is set but no longer held by the name's owner.
pub const AVATAR_NOT_OWNED: &str = "AVATAR_NOT_OWNED";

/// Avatar state of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    /// Object id of the avatar asset, not yet enriched.
    Reference(String),
    /// Display image of an avatar still owned by the name's owner.
    ImageUrl(String),
    /// Owned avatar whose display carries no `image_url`.
    NoImage,
    /// The avatar asset changed hands independently of the name.
    NotOwned,
}

impl Avatar {
    pub fn is_not_owned(&self) -> bool {
        matches!(self, Avatar::NotOwned)
    }

    pub fn image_url(&self) -> Option<&str> {
        match self {
            Avatar::ImageUrl(url) => Some(url),
            _ => None,
        }
    }

    pub fn reference(&self) -> Option<&str> {
        match self {
            Avatar::Reference(id) => Some(id),
            _ => None,
        }
    }
}

impl Serialize for Avatar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Avatar::Reference(value) | Avatar::ImageUrl(value) => serializer.serialize_str(value),
            Avatar::NoImage => serializer.serialize_none(),
            Avatar::NotOwned => serializer.serialize_str(AVATAR_NOT_OWNED),
        }
    }
}

/// A resolved SuiNS name.
///
/// Every field is optional. An unregistered name is the default record, which
/// serializes to `{}`; a registered name always carries `id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nft_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Avatar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_domain_name: Option<String>,
    /// Cache lifetime hint in seconds. Zero means "re-fetch every time".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolver: Option<String>,
    /// Canonical fields the registry carries that have no dedicated slot.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl NameRecord {
    /// True for the record returned for unregistered names.
    pub fn is_empty(&self) -> bool {
        self == &NameRecord::default()
    }

    /// Target address, treating an empty string as unset.
    pub fn target(&self) -> Option<&str> {
        self.target_address.as_deref().filter(|a| !a.is_empty())
    }
}
