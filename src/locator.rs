//! Dynamic field lookups under registry and resolver objects.

use std::sync::Arc;

use futures::future::join_all;
use serde_json::{json, Value};
use suins_transport::{FieldName, KeyEncoding, ObjectReader, ObjectResponse};
use suins_types::{normalize_address, parse_address};
use tracing::debug;

use crate::error::{ResolverError, Result};

/// Move type of plain string keys.
pub const STRING_TYPE: &str = "0x1::string::String";
/// Move type of reverse-registry keys.
pub const ADDRESS_TYPE: &str = "address";

/// The Move value of a dynamic-field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKey {
    Str(String),
    /// Multi-part key such as a `Domain` (`[label, tld]`).
    Composite(Vec<String>),
    Address(String),
}

impl FieldKey {
    pub fn to_json(&self) -> Value {
        match self {
            FieldKey::Str(s) => Value::String(s.clone()),
            FieldKey::Composite(parts) => json!(parts),
            FieldKey::Address(addr) => Value::String(normalize_address(addr)),
        }
    }

    /// BCS bytes of the key as the Move value it names.
    pub fn to_bcs(&self) -> Result<Vec<u8>> {
        let bytes = match self {
            FieldKey::Str(s) => bcs::to_bytes(s),
            FieldKey::Composite(parts) => bcs::to_bytes(parts),
            FieldKey::Address(addr) => {
                let parsed = parse_address(addr)
                    .ok_or_else(|| ResolverError::InvalidAddress(addr.clone()))?;
                bcs::to_bytes(&parsed)
            }
        };
        bytes.map_err(|e| ResolverError::Transport(anyhow::Error::new(e)))
    }

    pub fn to_field_name(&self, type_tag: &str, encoding: KeyEncoding) -> Result<FieldName> {
        Ok(match encoding {
            KeyEncoding::Symbolic => FieldName::Symbolic {
                type_tag: type_tag.to_string(),
                value: self.to_json(),
            },
            KeyEncoding::Bcs => FieldName::Bcs {
                type_tag: type_tag.to_string(),
                bytes: self.to_bcs()?,
            },
        })
    }
}

/// A located dynamic field.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildRecord {
    /// Object id of the field object; this becomes the record id.
    pub object_id: String,
    pub type_string: Option<String>,
    /// The field's value, with the `Field { id, name, value }` envelope removed.
    pub value: Value,
}

impl ChildRecord {
    fn from_response(response: ObjectResponse) -> Option<Self> {
        let object = response.data?;
        let content = object.content.unwrap_or(Value::Null);
        let value = match content {
            Value::Object(mut map) if map.contains_key("name") && map.contains_key("value") => {
                map.remove("value").unwrap_or(Value::Null)
            }
            other => other,
        };
        Some(Self {
            object_id: object.object_id,
            type_string: object.type_string,
            value,
        })
    }
}

/// Fetches children of a parent object by key, mapping "no such field" to `None`.
#[derive(Clone)]
pub struct DynamicFieldLocator {
    reader: Arc<dyn ObjectReader>,
    encoding: KeyEncoding,
}

impl DynamicFieldLocator {
    /// Locator using the reader's preferred key encoding.
    pub fn new(reader: Arc<dyn ObjectReader>) -> Self {
        let encoding = reader.key_encoding();
        Self { reader, encoding }
    }

    pub fn with_encoding(reader: Arc<dyn ObjectReader>, encoding: KeyEncoding) -> Self {
        Self { reader, encoding }
    }

    pub fn encoding(&self) -> KeyEncoding {
        self.encoding
    }

    pub fn reader(&self) -> &Arc<dyn ObjectReader> {
        &self.reader
    }

    pub async fn lookup_child_field(
        &self,
        parent_id: &str,
        key: &FieldKey,
        type_tag: &str,
    ) -> Result<Option<ChildRecord>> {
        let name = key.to_field_name(type_tag, self.encoding)?;
        let response = self.reader.fetch_dynamic_field(parent_id, &name).await?;

        if let Some(err) = &response.error {
            if err.is_not_found() {
                debug!(parent = parent_id, key = ?key, "dynamic field absent");
                return Ok(None);
            }
            return Err(ResolverError::Transport(anyhow::Error::new(err.clone())));
        }
        Ok(ChildRecord::from_response(response))
    }

    /// Look up several string-keyed children at once.
    ///
    /// Returns the `(key, value)` pairs that were found; absent keys and
    /// failed lookups are dropped.
    pub async fn lookup_fields(&self, parent_id: &str, keys: &[&str]) -> Vec<(String, Value)> {
        let lookups = keys.iter().map(|key| async move {
            let field_key = FieldKey::Str(key.to_string());
            match self.lookup_child_field(parent_id, &field_key, STRING_TYPE).await {
                Ok(Some(child)) => Some((key.to_string(), child.value)),
                Ok(None) => None,
                Err(e) => {
                    debug!(parent = parent_id, key = *key, error = %e, "table lookup failed");
                    None
                }
            }
        });
        join_all(lookups).await.into_iter().flatten().collect()
    }
}
