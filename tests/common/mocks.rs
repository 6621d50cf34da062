//! In-memory stand-ins for a Sui node and the descriptor bucket.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::anyhow;
use parking_lot::Mutex;
use serde_json::{json, Value};
use suins_client::{
    DescriptorFetchError, DescriptorFetcher, FieldKey, FieldName, KeyEncoding, ObjectOwner,
    ObjectProjection, ObjectReader, ObjectResponse, ObjectResponseError, SuiObject,
};

/// A node holding a fixed set of objects and dynamic fields.
///
/// Dynamic fields are stored under the name encoding the chain was built
/// with, so a lookup using the other encoding misses.
pub struct MockChain {
    encoding: KeyEncoding,
    objects: Mutex<HashMap<String, SuiObject>>,
    fields: Mutex<HashMap<(String, String), SuiObject>>,
    failing: Mutex<HashSet<String>>,
    object_calls: AtomicUsize,
    field_calls: AtomicUsize,
}

impl MockChain {
    pub fn new(encoding: KeyEncoding) -> Self {
        Self {
            encoding,
            objects: Mutex::new(HashMap::new()),
            fields: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashSet::new()),
            object_calls: AtomicUsize::new(0),
            field_calls: AtomicUsize::new(0),
        }
    }

    /// Put an object owned by `owner` (or shared when `None`) with optional display.
    pub fn insert_object(&self, id: &str, owner: Option<&str>, image_url: Option<&str>) {
        let display = image_url.map(|url| {
            let mut display = BTreeMap::new();
            display.insert("image_url".to_string(), url.to_string());
            display.insert("name".to_string(), "avatar".to_string());
            display
        });
        let owner = match owner {
            Some(addr) => ObjectOwner::Address(addr.to_string()),
            None => ObjectOwner::Shared { initial_version: 1 },
        };
        self.objects.lock().insert(
            id.to_string(),
            SuiObject {
                object_id: id.to_string(),
                version: 1,
                type_string: Some("0x2::object::Object".to_string()),
                owner: Some(owner),
                content: Some(json!({ "id": { "id": id } })),
                display,
            },
        );
    }

    pub fn transfer(&self, id: &str, new_owner: &str) {
        if let Some(object) = self.objects.lock().get_mut(id) {
            object.owner = Some(ObjectOwner::Address(new_owner.to_string()));
            object.version += 1;
        }
    }

    pub fn delete(&self, id: &str) {
        self.objects.lock().remove(id);
    }

    /// Put the dynamic field `key: type_tag` under `parent` holding `value`.
    pub fn insert_field(
        &self,
        parent: &str,
        key: &FieldKey,
        type_tag: &str,
        field_id: &str,
        value: Value,
    ) {
        let name = key
            .to_field_name(type_tag, self.encoding)
            .expect("fixture key must encode");
        self.fields.lock().insert(
            (parent.to_string(), fingerprint(&name)),
            SuiObject {
                object_id: field_id.to_string(),
                version: 1,
                type_string: Some(format!("0x2::dynamic_field::Field<{}, _>", type_tag)),
                owner: Some(ObjectOwner::Parent(parent.to_string())),
                content: Some(json!({
                    "id": { "id": field_id },
                    "name": key.to_json(),
                    "value": value,
                })),
                display: None,
            },
        );
    }

    /// Make every fetch touching `id` (as object or as parent) fail at the transport.
    pub fn fail(&self, id: &str) {
        self.failing.lock().insert(id.to_string());
    }

    pub fn object_calls(&self) -> usize {
        self.object_calls.load(Ordering::SeqCst)
    }

    pub fn field_calls(&self) -> usize {
        self.field_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.object_calls() + self.field_calls()
    }
}

fn fingerprint(name: &FieldName) -> String {
    match name {
        FieldName::Symbolic { type_tag, value } => format!("{}|{}", type_tag, value),
        FieldName::Bcs { type_tag, bytes } => format!("{}|{}", type_tag, hex::encode(bytes)),
    }
}

#[async_trait::async_trait]
impl ObjectReader for MockChain {
    async fn fetch_object(
        &self,
        id: &str,
        projection: ObjectProjection,
    ) -> anyhow::Result<ObjectResponse> {
        self.object_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.lock().contains(id) {
            return Err(anyhow!("connection reset while fetching {}", id));
        }
        let Some(mut object) = self.objects.lock().get(id).cloned() else {
            return Ok(ObjectResponse::missing(ObjectResponseError::NotExists {
                object_id: id.to_string(),
            }));
        };
        if !projection.owner {
            object.owner = None;
        }
        if !projection.content {
            object.content = None;
        }
        if !projection.display {
            object.display = None;
        }
        Ok(ObjectResponse::found(object))
    }

    async fn fetch_dynamic_field(
        &self,
        parent_id: &str,
        name: &FieldName,
    ) -> anyhow::Result<ObjectResponse> {
        self.field_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.lock().contains(parent_id) {
            return Err(anyhow!("connection reset while reading {}", parent_id));
        }
        let key = (parent_id.to_string(), fingerprint(name));
        Ok(match self.fields.lock().get(&key).cloned() {
            Some(object) => ObjectResponse::found(object),
            None => ObjectResponse::missing(ObjectResponseError::DynamicFieldNotFound {
                parent_object_id: parent_id.to_string(),
            }),
        })
    }

    fn key_encoding(&self) -> KeyEncoding {
        self.encoding
    }
}

/// Descriptor bucket serving one document and counting requests.
pub struct StaticDescriptorFetcher {
    body: String,
    calls: AtomicUsize,
}

impl StaticDescriptorFetcher {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl DescriptorFetcher for StaticDescriptorFetcher {
    async fn fetch_descriptor(&self, _url: &str) -> Result<String, DescriptorFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.body.clone())
    }
}
