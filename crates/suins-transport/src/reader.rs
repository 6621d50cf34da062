//! The read-only object interface the resolver is built on.
//!
//! Two capabilities are all the resolver needs from a Sui node: fetch an
//! object with a chosen projection, and fetch one dynamic field of a parent
//! by its typed name. Both return an [`ObjectResponse`] that keeps
//! "object does not exist" as a typed error code instead of a failed request,
//! so callers can tell permanent absence from transport faults without
//! inspecting error text.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which parts of an object a fetch should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObjectProjection {
    pub content: bool,
    pub owner: bool,
    pub display: bool,
}

impl ObjectProjection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(mut self) -> Self {
        self.content = true;
        self
    }

    pub fn with_owner(mut self) -> Self {
        self.owner = true;
        self
    }

    pub fn with_display(mut self) -> Self {
        self.display = true;
        self
    }
}

/// Object ownership information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectOwner {
    Address(String),
    Shared { initial_version: u64 },
    Immutable,
    Parent(String),
    Unknown,
}

impl ObjectOwner {
    /// The owning address, for single-address ownership only.
    pub fn address(&self) -> Option<&str> {
        match self {
            ObjectOwner::Address(addr) => Some(addr),
            _ => None,
        }
    }
}

/// Object data returned by a node, restricted to the requested projection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuiObject {
    pub object_id: String,
    pub version: u64,
    pub type_string: Option<String>,
    pub owner: Option<ObjectOwner>,
    /// Move struct fields as JSON (`{ field: value }`; nested structs may be
    /// wrapped as `{ type, fields }`).
    pub content: Option<Value>,
    /// Rendered Display fields (`image_url`, `name`, ...).
    pub display: Option<BTreeMap<String, String>>,
}

/// Error codes a node reports in place of object data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "code", rename_all = "camelCase")]
pub enum ObjectResponseError {
    #[error("object {object_id} does not exist")]
    NotExists { object_id: String },
    #[error("dynamic field not found under {parent_object_id}")]
    DynamicFieldNotFound { parent_object_id: String },
    #[error("object {object_id} was deleted")]
    Deleted { object_id: String },
    #[error("display error: {error}")]
    DisplayError { error: String },
    #[error("unknown object error")]
    #[serde(other)]
    Unknown,
}

impl ObjectResponseError {
    /// Codes that mean the object or field is absent, as opposed to broken.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ObjectResponseError::NotExists { .. }
                | ObjectResponseError::DynamicFieldNotFound { .. }
                | ObjectResponseError::Deleted { .. }
        )
    }
}

/// Result of a single object or dynamic-field fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectResponse {
    pub data: Option<SuiObject>,
    pub error: Option<ObjectResponseError>,
}

impl ObjectResponse {
    pub fn found(object: SuiObject) -> Self {
        Self {
            data: Some(object),
            error: None,
        }
    }

    pub fn missing(error: ObjectResponseError) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }
}

/// How a dynamic-field name is sent to the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyEncoding {
    /// `{ type, value }` with the value as JSON (JSON-RPC).
    #[default]
    Symbolic,
    /// `{ type, bcs }` with the BCS bytes of the Move value (GraphQL).
    Bcs,
}

/// Typed name of a dynamic field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldName {
    Symbolic { type_tag: String, value: Value },
    Bcs { type_tag: String, bytes: Vec<u8> },
}

impl FieldName {
    pub fn type_tag(&self) -> &str {
        match self {
            FieldName::Symbolic { type_tag, .. } | FieldName::Bcs { type_tag, .. } => type_tag,
        }
    }
}

/// Read access to Sui objects.
#[async_trait::async_trait]
pub trait ObjectReader: Send + Sync {
    /// Fetch an object by id with the given projection.
    async fn fetch_object(&self, id: &str, projection: ObjectProjection)
        -> Result<ObjectResponse>;

    /// Fetch the dynamic field of `parent_id` whose name is `name`.
    async fn fetch_dynamic_field(&self, parent_id: &str, name: &FieldName)
        -> Result<ObjectResponse>;

    /// Name encoding this reader understands.
    fn key_encoding(&self) -> KeyEncoding {
        KeyEncoding::Symbolic
    }
}
