//! Schema normalizer.
//!
//! Registry objects come back in several shapes depending on the transport
//! and the registry generation:
//!
//! - a plain JSON map of snake_case fields (GraphQL `json`);
//! - Move structs wrapped as `{ type, fields }` (JSON-RPC content);
//! - `VecMap`s rendered as `{ contents: [{ key, value }] }`;
//! - lists of typed entries `[{ type, fields: { key, value } }]`.
//!
//! [`normalize`] flattens all of these into [`CanonicalFields`]: camelCase keys,
//! canonical address strings for address-typed values, and the auxiliary
//! `data` table either flattened in place (inline `VecMap`) or remembered as a
//! table reference for the engine to enrich. Nothing past this module sees a
//! raw field name.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use suins_types::{normalize_address_checked, Avatar, NameRecord};

/// Field holding the auxiliary key/value table of a record.
const DATA_FIELD: &str = "data";

/// Canonical keys a resolver record may contribute in the two-hop layout.
pub const RESOLVER_KEYS: [&str; 4] = ["addr", "avatar", "contenthash", "name"];

/// Rename a snake_case key to camelCase.
///
/// Every `_` followed by a letter is dropped and the letter uppercased, left
/// to right. Underscores not followed by a letter are kept.
///
/// ```
/// use suins_client::normalizer::camel_case;
///
/// assert_eq!(camel_case("target_address"), "targetAddress");
/// assert_eq!(camel_case("default_domain_name"), "defaultDomainName");
/// assert_eq!(camel_case("label_1"), "label_1");
/// ```
pub fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '_' {
            if let Some(next) = chars.peek().copied().filter(|n| n.is_alphabetic()) {
                chars.next();
                out.extend(next.to_uppercase());
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Record fields after normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalFields {
    fields: BTreeMap<String, Value>,
    table_ref: Option<String>,
}

impl CanonicalFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String form of a field; numbers are rendered, empty strings kept.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.fields.get(key).and_then(value_to_string)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    /// Object id of the auxiliary table still to be fetched, if any.
    pub fn table_ref(&self) -> Option<&str> {
        self.table_ref.as_deref()
    }

    /// Flatten fetched table entries into the record. Raw keys get the same
    /// treatment as top-level fields.
    pub fn merge_table<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        for (key, value) in entries {
            self.push_raw(&key, None, value);
        }
        self.table_ref = None;
    }

    /// Merge the fields of a resolver record. Only [`RESOLVER_KEYS`] are taken
    /// and they overwrite what the registry entry said.
    pub fn merge_resolver(&mut self, resolver: CanonicalFields) {
        for (key, value) in resolver.fields {
            if RESOLVER_KEYS.contains(&key.as_str()) {
                self.fields.insert(key, value);
            }
        }
    }

    fn push_raw(&mut self, key: &str, type_tag: Option<&str>, value: Value) {
        let (type_tag, value) = unwrap_struct(value, type_tag);
        if key == DATA_FIELD {
            self.absorb_data(type_tag.as_deref(), value);
            return;
        }
        let value = if is_address_like(key, type_tag.as_deref()) {
            canonical_address_value(value)
        } else {
            value
        };
        self.fields.insert(camel_case(key), value);
    }

    fn absorb_data(&mut self, type_tag: Option<&str>, value: Value) {
        if let Some(entries) = entry_list(&value) {
            for (key, type_tag, value) in entries {
                if key != DATA_FIELD {
                    self.push_raw(&key, type_tag.as_deref(), value);
                }
            }
        } else if let Some(id) = table_id(&value, type_tag) {
            self.table_ref = Some(id);
        }
    }

    /// Build the caller-facing record. `id` is the registry entry's object id.
    ///
    /// `defaultDomainName` (and a resolver record's `name`) only carry meaning
    /// on reverse entries and are dropped from forward records.
    pub fn into_record(self, id: Option<String>, reverse: bool) -> NameRecord {
        let mut fields = self.fields;
        let mut record = NameRecord {
            id,
            ..Default::default()
        };

        record.nft_id = take_string(&mut fields, "nftId").filter(|s| !s.is_empty());
        record.owner = take_string(&mut fields, "owner").filter(|s| !s.is_empty());
        record.resolver = take_string(&mut fields, "resolver").filter(|s| !s.is_empty());

        let target = take_string(&mut fields, "targetAddress").filter(|s| !s.is_empty());
        let linked = take_string(&mut fields, "linkedAddr").filter(|s| !s.is_empty());
        let addr = take_string(&mut fields, "addr").filter(|s| !s.is_empty());
        record.target_address = addr.or(target).or(linked);

        record.avatar = take_string(&mut fields, "avatar")
            .filter(|s| !s.is_empty())
            .map(Avatar::Reference);

        let content_hash = take_string(&mut fields, "contentHash");
        let contenthash = take_string(&mut fields, "contenthash");
        record.content_hash = contenthash.or(content_hash).filter(|s| !s.is_empty());

        record.ttl = fields.remove("ttl").and_then(|v| match v {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        });

        let default_name = take_string(&mut fields, "defaultDomainName");
        let resolver_name = take_string(&mut fields, "name");
        if reverse {
            record.default_domain_name = resolver_name.or(default_name).filter(|s| !s.is_empty());
        }

        fields.remove("id");
        record.extra = fields;
        record
    }
}

/// Normalize the raw content of a registry entry or resolver record.
pub fn normalize(raw: &Value) -> CanonicalFields {
    let mut out = CanonicalFields::new();
    let (_, value) = unwrap_struct(raw.clone(), None);

    if let Some(entries) = entry_list(&value) {
        for (key, type_tag, value) in entries {
            out.push_raw(&key, type_tag.as_deref(), value);
        }
    } else if let Value::Object(map) = value {
        for (key, value) in map {
            out.push_raw(&key, None, value);
        }
    }
    out
}

/// Strip `{ type, fields }` wrappers and `Option` encodings, returning the
/// innermost type tag seen alongside the bare value.
fn unwrap_struct(value: Value, type_tag: Option<&str>) -> (Option<String>, Value) {
    let mut type_tag = type_tag.map(String::from);
    let mut value = value;
    loop {
        match value {
            Value::Object(mut map) if is_struct_wrapper(&map) => {
                if let Some(Value::String(t)) = map.remove("type") {
                    type_tag = Some(t);
                }
                value = map.remove("fields").unwrap_or(Value::Null);
            }
            Value::Object(mut map) if is_option(&map) => {
                // Option<T> renders as { vec: [] } or { vec: [x] }.
                value = match map.remove("vec") {
                    Some(Value::Array(mut items)) if !items.is_empty() => items.swap_remove(0),
                    _ => Value::Null,
                };
            }
            other => return (type_tag, other),
        }
    }
}

fn is_struct_wrapper(map: &Map<String, Value>) -> bool {
    map.len() == 2 && map.contains_key("type") && map.contains_key("fields")
}

fn is_option(map: &Map<String, Value>) -> bool {
    map.len() == 1 && matches!(map.get("vec"), Some(Value::Array(_)))
}

/// Key/value entries of a `VecMap` or a typed entry list.
fn entry_list(value: &Value) -> Option<Vec<(String, Option<String>, Value)>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) if map.len() == 1 => match map.get("contents") {
            Some(Value::Array(items)) => items,
            _ => return None,
        },
        _ => return None,
    };

    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        let (type_tag, entry) = unwrap_struct(item.clone(), None);
        let Value::Object(mut entry) = entry else {
            return None;
        };
        let key = match entry.remove("key") {
            Some(Value::String(key)) => key,
            _ => return None,
        };
        let value = entry.remove("value").unwrap_or(Value::Null);
        entries.push((key, type_tag, value));
    }
    Some(entries)
}

/// Object id of a table-like reference (`{ id: { id }, size }`).
fn table_id(value: &Value, type_tag: Option<&str>) -> Option<String> {
    let map = value.as_object()?;
    let looks_like_table = map.contains_key("size")
        || type_tag
            .map(|t| t.contains("::table::") || t.contains("::bag::"))
            .unwrap_or(false);
    if !looks_like_table {
        return None;
    }
    match map.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Object(uid) => match uid.get("id") {
            Some(Value::String(id)) => Some(id.clone()),
            _ => None,
        },
        _ => None,
    }
}

fn is_address_like(key: &str, type_tag: Option<&str>) -> bool {
    if let Some(tag) = type_tag {
        if tag.to_ascii_lowercase().contains("address") {
            return true;
        }
    }
    key == "addr" || key.ends_with("_address") || key.ends_with("_addr")
}

fn canonical_address_value(value: Value) -> Value {
    match value {
        Value::String(s) if !s.is_empty() => match normalize_address_checked(&s) {
            Some(normalized) => Value::String(normalized),
            None => Value::String(s),
        },
        other => other,
    }
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn take_string(fields: &mut BTreeMap<String, Value>, key: &str) -> Option<String> {
    fields.remove(key).as_ref().and_then(value_to_string)
}
