//! Registry layouts.
//!
//! Each [`SchemaVersion`] maps to one [`RegistrySchema`] strategy that knows
//! how the registry is keyed and where the record fields live. The resolution
//! engine only ever talks to the strategy.

use async_trait::async_trait;
use serde_json::{json, Value};
use suins_types::{
    is_reverse_key, normalize_address_checked, reverse_lookup_key, ContractDescriptor,
    SchemaVersion, REVERSE_ZONE_SUFFIX,
};
use tracing::debug;

use crate::error::{ConfigError, ResolverError, Result};
use crate::locator::{ChildRecord, DynamicFieldLocator, FieldKey, ADDRESS_TYPE, STRING_TYPE};
use crate::normalizer::{normalize, CanonicalFields};

/// A validated registry lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    /// Forward name `<label>.<tld>`; the label may itself contain dots.
    Name {
        full: String,
        label: String,
        tld: String,
    },
    /// Reverse-zone entry. `key` is the exact registry string; `address` is
    /// the normalized address it names, when the hex part is a valid address.
    Reverse {
        address: Option<String>,
        key: String,
    },
}

impl LookupKey {
    /// Parse a name. Reverse-zone names (`<hex>.addr.reverse`) become reverse
    /// keys looked up exactly as written.
    pub fn parse_name(name: &str) -> Result<Self> {
        let name = name.trim();
        if is_reverse_key(name) {
            let hex = &name[..name.len() - REVERSE_ZONE_SUFFIX.len()];
            if hex.is_empty() {
                return Err(ResolverError::InvalidName(name.to_string()));
            }
            return Ok(LookupKey::Reverse {
                address: normalize_address_checked(hex),
                key: name.to_string(),
            });
        }

        match name.rsplit_once('.') {
            Some((label, tld)) if !label.is_empty() && !tld.is_empty() => Ok(LookupKey::Name {
                full: name.to_string(),
                label: label.to_string(),
                tld: tld.to_string(),
            }),
            _ => Err(ResolverError::InvalidName(name.to_string())),
        }
    }

    /// Reverse key of an address, derived from its normalized form.
    pub fn reverse(address: &str) -> Result<Self> {
        let address = normalize_address_checked(address)
            .ok_or_else(|| ResolverError::InvalidAddress(address.to_string()))?;
        let key = reverse_lookup_key(&address);
        Ok(LookupKey::Reverse {
            address: Some(address),
            key,
        })
    }

    pub fn is_reverse(&self) -> bool {
        matches!(self, LookupKey::Reverse { .. })
    }

    /// The exact string the string-keyed registries use.
    pub fn registry_key(&self) -> &str {
        match self {
            LookupKey::Name { full, .. } => full,
            LookupKey::Reverse { key, .. } => key,
        }
    }
}

/// How one registry generation stores names.
#[async_trait]
pub trait RegistrySchema: Send + Sync {
    fn version(&self) -> SchemaVersion;

    /// Find the registry entry for `key`, `None` when unregistered.
    async fn locate_entry(
        &self,
        locator: &DynamicFieldLocator,
        descriptor: &ContractDescriptor,
        key: &LookupKey,
    ) -> Result<Option<ChildRecord>>;

    /// Turn a located entry into canonical fields, following any extra hop
    /// the layout needs.
    async fn locate_record(
        &self,
        locator: &DynamicFieldLocator,
        descriptor: &ContractDescriptor,
        key: &LookupKey,
        entry: &ChildRecord,
    ) -> Result<CanonicalFields>;
}

/// Strategy for a schema version.
pub fn strategy(version: SchemaVersion) -> &'static dyn RegistrySchema {
    match version {
        SchemaVersion::DomainKey => &DomainKeySchema,
        SchemaVersion::InlineRecord => &InlineRecordSchema,
        SchemaVersion::ResolverHop => &ResolverHopSchema,
    }
}

async fn locate_by_string(
    locator: &DynamicFieldLocator,
    descriptor: &ContractDescriptor,
    key: &LookupKey,
) -> Result<Option<ChildRecord>> {
    let field_key = FieldKey::Str(key.registry_key().to_string());
    locator
        .lookup_child_field(&descriptor.registry_id, &field_key, STRING_TYPE)
        .await
}

/// Registry keyed by `Domain` structs with inline records, plus a separate
/// reverse registry keyed by address whose value is the default name.
pub struct DomainKeySchema;

#[async_trait]
impl RegistrySchema for DomainKeySchema {
    fn version(&self) -> SchemaVersion {
        SchemaVersion::DomainKey
    }

    async fn locate_entry(
        &self,
        locator: &DynamicFieldLocator,
        descriptor: &ContractDescriptor,
        key: &LookupKey,
    ) -> Result<Option<ChildRecord>> {
        match key {
            LookupKey::Name { label, tld, .. } => {
                let field_key = FieldKey::Composite(vec![label.clone(), tld.clone()]);
                locator
                    .lookup_child_field(&descriptor.registry_id, &field_key, &descriptor.domain_type())
                    .await
            }
            LookupKey::Reverse { address, key } => {
                let address = address
                    .as_deref()
                    .ok_or_else(|| ResolverError::InvalidName(key.clone()))?;
                let reverse_registry = descriptor
                    .reverse_registry_id
                    .as_deref()
                    .filter(|id| !id.trim().is_empty())
                    .ok_or(ConfigError::Missing("reverse registry id"))?;
                locator
                    .lookup_child_field(
                        reverse_registry,
                        &FieldKey::Address(address.to_string()),
                        ADDRESS_TYPE,
                    )
                    .await
            }
        }
    }

    async fn locate_record(
        &self,
        _locator: &DynamicFieldLocator,
        _descriptor: &ContractDescriptor,
        _key: &LookupKey,
        entry: &ChildRecord,
    ) -> Result<CanonicalFields> {
        Ok(match &entry.value {
            Value::String(name) => normalize(&json!({ "default_domain_name": name })),
            other => normalize(other),
        })
    }
}

/// String-keyed registry with the record stored inline in the entry.
pub struct InlineRecordSchema;

#[async_trait]
impl RegistrySchema for InlineRecordSchema {
    fn version(&self) -> SchemaVersion {
        SchemaVersion::InlineRecord
    }

    async fn locate_entry(
        &self,
        locator: &DynamicFieldLocator,
        descriptor: &ContractDescriptor,
        key: &LookupKey,
    ) -> Result<Option<ChildRecord>> {
        locate_by_string(locator, descriptor, key).await
    }

    async fn locate_record(
        &self,
        _locator: &DynamicFieldLocator,
        _descriptor: &ContractDescriptor,
        _key: &LookupKey,
        entry: &ChildRecord,
    ) -> Result<CanonicalFields> {
        Ok(normalize(&entry.value))
    }
}

/// String-keyed registry whose entries point at a resolver object holding
/// the record under the same key.
pub struct ResolverHopSchema;

#[async_trait]
impl RegistrySchema for ResolverHopSchema {
    fn version(&self) -> SchemaVersion {
        SchemaVersion::ResolverHop
    }

    async fn locate_entry(
        &self,
        locator: &DynamicFieldLocator,
        descriptor: &ContractDescriptor,
        key: &LookupKey,
    ) -> Result<Option<ChildRecord>> {
        locate_by_string(locator, descriptor, key).await
    }

    async fn locate_record(
        &self,
        locator: &DynamicFieldLocator,
        _descriptor: &ContractDescriptor,
        key: &LookupKey,
        entry: &ChildRecord,
    ) -> Result<CanonicalFields> {
        let mut fields = normalize(&entry.value);
        let Some(resolver_id) = fields.get_str("resolver").filter(|id| !id.is_empty()) else {
            return Ok(fields);
        };

        let field_key = FieldKey::Str(key.registry_key().to_string());
        match locator
            .lookup_child_field(&resolver_id, &field_key, STRING_TYPE)
            .await?
        {
            Some(record) => fields.merge_resolver(normalize(&record.value)),
            None => debug!(resolver = %resolver_id, key = key.registry_key(), "no resolver record"),
        }
        Ok(fields)
    }
}
