//! Contract descriptor and the selectors that pick one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Network whose published descriptor document is used during bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Devnet,
    Testnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Devnet => "devnet",
            Network::Testnet => "testnet",
        }
    }

    /// File name of the descriptor document published for this network.
    pub fn descriptor_file(&self) -> &'static str {
        match self {
            Network::Devnet => "devnet.json",
            Network::Testnet => "testnet.json",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "devnet" => Ok(Network::Devnet),
            "testnet" => Ok(Network::Testnet),
            other => Err(format!("unknown network: {}", other)),
        }
    }
}

/// Registry layout generation.
///
/// Each generation stores names differently on chain; the resolver picks one
/// strategy per client instead of probing layouts per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVersion {
    /// Registry keyed by `<package>::domain::Domain` (`[label, tld]`), record
    /// fields stored inline, reverse registry keyed by `address`.
    #[default]
    #[serde(alias = "domain")]
    DomainKey,
    /// Registry keyed by the full name string, record fields inline with an
    /// auxiliary `data` table for avatar and content hash.
    #[serde(alias = "inline")]
    InlineRecord,
    /// Registry keyed by the full name string whose entry points at a
    /// separate resolver object holding the record.
    #[serde(alias = "resolver")]
    ResolverHop,
}

impl SchemaVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVersion::DomainKey => "domain_key",
            SchemaVersion::InlineRecord => "inline_record",
            SchemaVersion::ResolverHop => "resolver_hop",
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "domain_key" | "domain" => Ok(SchemaVersion::DomainKey),
            "inline_record" | "inline" => Ok(SchemaVersion::InlineRecord),
            "resolver_hop" | "resolver" => Ok(SchemaVersion::ResolverHop),
            other => Err(format!("unknown registry schema: {}", other)),
        }
    }
}

/// Root object ids of a deployed SuiNS contract.
///
/// Accepts both the current key names and the older `registry` /
/// `reverseRegistry` spellings found in published descriptor documents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDescriptor {
    #[serde(default)]
    pub package_id: String,
    #[serde(default, alias = "registry")]
    pub registry_id: String,
    #[serde(default, alias = "reverseRegistry", skip_serializing_if = "Option::is_none")]
    pub reverse_registry_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaVersion>,
}

impl ContractDescriptor {
    pub fn new(package_id: impl Into<String>, registry_id: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
            registry_id: registry_id.into(),
            ..Default::default()
        }
    }

    pub fn with_reverse_registry(mut self, id: impl Into<String>) -> Self {
        self.reverse_registry_id = Some(id.into());
        self
    }

    pub fn with_schema(mut self, schema: SchemaVersion) -> Self {
        self.schema = Some(schema);
        self
    }

    /// A descriptor counts as bootstrapped once it names a package.
    pub fn is_bootstrapped(&self) -> bool {
        !self.package_id.trim().is_empty()
    }

    /// Move type of the composite registry key.
    pub fn domain_type(&self) -> String {
        format!("{}::domain::Domain", self.package_id)
    }
}
