//! GraphQL Client for Sui Network
//!
//! Reads objects and dynamic fields through Sui's GraphQL API. Dynamic fields
//! are addressed by their BCS-encoded name (`{ type, bcs }`), so callers must
//! encode keys as Move values before asking; see [`KeyEncoding::Bcs`].
//!
//! ## Endpoints
//! - Devnet: `https://graphql.devnet.sui.io/graphql`
//! - Testnet: `https://graphql.testnet.sui.io/graphql`
//!
//! ## Usage
//!
//! ```ignore
//! let client = GraphQLClient::testnet();
//! let obj = client.fetch_object("0x...", ObjectProjection::new().with_content())?;
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use base64::Engine;
use serde_json::Value;
use suins_types::Network;

use crate::http::{build_agent, default_timeouts};
use crate::network::default_graphql_endpoint;
use crate::reader::{
    FieldName, KeyEncoding, ObjectOwner, ObjectProjection, ObjectReader, ObjectResponse,
    ObjectResponseError, SuiObject,
};

/// GraphQL client for Sui network queries.
#[derive(Clone)]
pub struct GraphQLClient {
    endpoint: String,
    agent: ureq::Agent,
}

impl GraphQLClient {
    /// Create a client for devnet.
    pub fn devnet() -> Self {
        Self::for_network(Network::Devnet)
    }

    /// Create a client for testnet.
    pub fn testnet() -> Self {
        Self::for_network(Network::Testnet)
    }

    pub fn for_network(network: Network) -> Self {
        Self::new(&default_graphql_endpoint(network))
    }

    /// Create a client with a custom endpoint.
    pub fn new(endpoint: &str) -> Self {
        let (timeout, connect_timeout) = default_timeouts();
        Self::with_timeouts(endpoint, timeout, connect_timeout)
    }

    /// Create a client with explicit timeouts.
    pub fn with_timeouts(endpoint: &str, timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            agent: build_agent(timeout, connect_timeout),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute a GraphQL query.
    fn query(&self, query: &str, variables: Option<Value>) -> Result<Value> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables.unwrap_or(Value::Null)
        });

        let response: Value = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_json(&body)
            .map_err(|e| anyhow!("GraphQL request failed: {}", e))?
            .into_json()
            .map_err(|e| anyhow!("Failed to parse GraphQL response: {}", e))?;

        // Check for GraphQL errors
        if let Some(errors) = response.get("errors") {
            if let Some(arr) = errors.as_array() {
                if !arr.is_empty() {
                    let msg = arr[0]
                        .get("message")
                        .and_then(|m| m.as_str())
                        .unwrap_or("unknown error");
                    return Err(anyhow!("GraphQL error: {}", msg));
                }
            }
        }

        response
            .get("data")
            .cloned()
            .ok_or_else(|| anyhow!("No data in GraphQL response"))
    }

    /// Fetch an object by address.
    ///
    /// A missing object is reported as [`ObjectResponseError::NotExists`].
    pub fn fetch_object(&self, address: &str, projection: ObjectProjection) -> Result<ObjectResponse> {
        let query = r#"
            query GetObject($address: SuiAddress!) {
                object(address: $address) {
                    address
                    version
                    owner {
                        __typename
                        ... on AddressOwner {
                            address { address }
                        }
                        ... on Shared {
                            initialSharedVersion
                        }
                        ... on ObjectOwner {
                            address { address }
                        }
                    }
                    asMoveObject {
                        contents {
                            type { repr }
                            json
                        }
                        display {
                            key
                            value
                        }
                    }
                }
            }
        "#;

        let variables = serde_json::json!({
            "address": address
        });

        let data = self.query(query, Some(variables))?;

        let Some(obj) = data.get("object").filter(|o| !o.is_null()) else {
            return Ok(ObjectResponse::missing(ObjectResponseError::NotExists {
                object_id: address.to_string(),
            }));
        };

        let move_obj = obj.get("asMoveObject");
        let contents = move_obj.and_then(|m| m.get("contents"));
        let type_string = contents
            .and_then(|c| c.get("type"))
            .and_then(|t| t.get("repr"))
            .and_then(|r| r.as_str())
            .map(|s| s.to_string());

        Ok(ObjectResponse::found(SuiObject {
            object_id: obj
                .get("address")
                .and_then(|a| a.as_str())
                .unwrap_or(address)
                .to_string(),
            version: obj.get("version").and_then(|v| v.as_u64()).unwrap_or(1),
            type_string,
            owner: projection.owner.then(|| parse_owner(obj.get("owner"))),
            content: if projection.content {
                contents.and_then(|c| c.get("json")).cloned()
            } else {
                None
            },
            display: if projection.display {
                move_obj.and_then(|m| m.get("display")).map(parse_display)
            } else {
                None
            },
        }))
    }

    /// Fetch a single dynamic field by name (type + BCS key).
    ///
    /// The returned object's content mirrors the on-chain `Field` struct:
    /// `{ id, name, value }`.
    pub fn fetch_dynamic_field_by_name(
        &self,
        parent_address: &str,
        name_type: &str,
        name_bcs: &[u8],
    ) -> Result<ObjectResponse> {
        let name_bcs_b64 = base64::engine::general_purpose::STANDARD.encode(name_bcs);

        let query = r#"
            query GetDynamicFieldByName(
                $address: SuiAddress!,
                $nameType: String!,
                $nameBcs: Base64!
            ) {
                object(address: $address) {
                    dynamicField(name: { type: $nameType, bcs: $nameBcs }) {
                        address
                        name {
                            type { repr }
                            json
                        }
                        value {
                            __typename
                            ... on MoveObject {
                                address
                                version
                                contents {
                                    type { repr }
                                    json
                                }
                            }
                            ... on MoveValue {
                                type { repr }
                                json
                            }
                        }
                    }
                }
            }
        "#;

        let variables = serde_json::json!({
            "address": parent_address,
            "nameType": name_type,
            "nameBcs": name_bcs_b64,
        });

        let data = self.query(query, Some(variables))?;
        let node = data
            .get("object")
            .and_then(|o| o.get("dynamicField"))
            .filter(|df| !df.is_null());

        match node.and_then(parse_dynamic_field) {
            Some(object) => Ok(ObjectResponse::found(object)),
            None => Ok(ObjectResponse::missing(
                ObjectResponseError::DynamicFieldNotFound {
                    parent_object_id: parent_address.to_string(),
                },
            )),
        }
    }
}

#[async_trait::async_trait]
impl ObjectReader for GraphQLClient {
    async fn fetch_object(
        &self,
        id: &str,
        projection: ObjectProjection,
    ) -> Result<ObjectResponse> {
        let client = self.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || GraphQLClient::fetch_object(&client, &id, projection))
            .await
            .map_err(|e| anyhow!("GraphQL task failed: {}", e))?
    }

    async fn fetch_dynamic_field(
        &self,
        parent_id: &str,
        name: &FieldName,
    ) -> Result<ObjectResponse> {
        let FieldName::Bcs { type_tag, bytes } = name else {
            bail!(
                "GraphQL dynamic field lookup needs a BCS key, got a symbolic one for {}",
                name.type_tag()
            );
        };
        let client = self.clone();
        let parent_id = parent_id.to_string();
        let type_tag = type_tag.clone();
        let bytes = bytes.clone();
        tokio::task::spawn_blocking(move || {
            client.fetch_dynamic_field_by_name(&parent_id, &type_tag, &bytes)
        })
        .await
        .map_err(|e| anyhow!("GraphQL task failed: {}", e))?
    }

    fn key_encoding(&self) -> KeyEncoding {
        KeyEncoding::Bcs
    }
}

fn parse_dynamic_field(node: &Value) -> Option<SuiObject> {
    let name = node.get("name")?;
    let value = node.get("value")?;

    let (value_address, value_type, value_json) =
        match value.get("__typename").and_then(|t| t.as_str()) {
            Some("MoveObject") => {
                let contents = value.get("contents");
                (
                    value.get("address").and_then(|a| a.as_str()).map(String::from),
                    contents
                        .and_then(|c| c.get("type"))
                        .and_then(|t| t.get("repr"))
                        .and_then(|r| r.as_str())
                        .map(String::from),
                    contents.and_then(|c| c.get("json")).cloned(),
                )
            }
            Some("MoveValue") => (
                None,
                value
                    .get("type")
                    .and_then(|t| t.get("repr"))
                    .and_then(|r| r.as_str())
                    .map(String::from),
                value.get("json").cloned(),
            ),
            _ => return None,
        };

    let object_id = node
        .get("address")
        .and_then(|a| a.as_str())
        .map(String::from)
        .or(value_address)?;

    Some(SuiObject {
        content: Some(serde_json::json!({
            "id": { "id": object_id },
            "name": name.get("json").cloned().unwrap_or(Value::Null),
            "value": value_json.unwrap_or(Value::Null),
        })),
        object_id,
        version: value.get("version").and_then(|v| v.as_u64()).unwrap_or(0),
        type_string: value_type,
        owner: None,
        display: None,
    })
}

fn parse_display(display: &Value) -> BTreeMap<String, String> {
    display
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    let key = entry.get("key")?.as_str()?;
                    let value = entry.get("value")?.as_str()?;
                    Some((key.to_string(), value.to_string()))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn parse_owner(owner: Option<&Value>) -> ObjectOwner {
    let Some(owner) = owner.filter(|o| !o.is_null()) else {
        return ObjectOwner::Immutable;
    };

    let typename = owner.get("__typename").and_then(|t| t.as_str());

    match typename {
        Some("AddressOwner") => {
            let addr = owner
                .get("address")
                .and_then(|a| a.get("address"))
                .and_then(|a| a.as_str())
                .unwrap_or("")
                .to_string();
            ObjectOwner::Address(addr)
        }
        Some("Shared") => {
            let initial_version = owner
                .get("initialSharedVersion")
                .and_then(|v| v.as_u64())
                .unwrap_or(0);
            ObjectOwner::Shared { initial_version }
        }
        Some("Immutable") => ObjectOwner::Immutable,
        Some("ObjectOwner") => {
            // Object owned by another object (dynamic fields)
            let parent = owner
                .get("address")
                .and_then(|a| a.get("address"))
                .and_then(|a| a.as_str())
                .unwrap_or("")
                .to_string();
            ObjectOwner::Parent(parent)
        }
        _ => ObjectOwner::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let devnet = GraphQLClient::devnet();
        assert!(devnet.endpoint.contains("devnet"));

        let testnet = GraphQLClient::testnet();
        assert!(testnet.endpoint.contains("testnet"));

        let custom = GraphQLClient::new("https://custom.endpoint");
        assert_eq!(custom.endpoint, "https://custom.endpoint");
    }

    #[test]
    fn test_parse_dynamic_field_move_value() {
        let node = json!({
            "address": "0xf1",
            "name": { "type": { "repr": "address" }, "json": "0xaa" },
            "value": {
                "__typename": "MoveValue",
                "type": { "repr": "0x1::string::String" },
                "json": "alice.sui"
            }
        });
        let obj = parse_dynamic_field(&node).unwrap();
        assert_eq!(obj.object_id, "0xf1");
        assert_eq!(obj.type_string.as_deref(), Some("0x1::string::String"));
        let content = obj.content.unwrap();
        assert_eq!(content["value"], "alice.sui");
        assert_eq!(content["id"]["id"], "0xf1");
    }

    #[test]
    fn test_parse_dynamic_field_without_value_typename() {
        let node = json!({ "address": "0xf1", "name": {}, "value": {} });
        assert!(parse_dynamic_field(&node).is_none());
    }

    #[test]
    fn test_parse_owner_variants() {
        let owner = json!({
            "__typename": "AddressOwner",
            "address": { "address": "0x77" }
        });
        assert_eq!(parse_owner(Some(&owner)), ObjectOwner::Address("0x77".into()));
        assert_eq!(parse_owner(None), ObjectOwner::Immutable);
        let shared = json!({ "__typename": "Shared", "initialSharedVersion": 3 });
        assert_eq!(
            parse_owner(Some(&shared)),
            ObjectOwner::Shared { initial_version: 3 }
        );
    }

    #[test]
    fn test_parse_display_entries() {
        let display = json!([
            { "key": "image_url", "value": "https://img/1.png" },
            { "key": "broken", "value": null }
        ]);
        let parsed = parse_display(&display);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed["image_url"], "https://img/1.png");
    }

    /// Test fetching the clock object (shared)
    /// Run with: cargo test test_fetch_clock_object -- --ignored --nocapture
    #[test]
    #[ignore = "requires network access to Sui testnet"]
    fn test_fetch_clock_object() {
        let client = GraphQLClient::testnet();

        let result = client.fetch_object("0x6", ObjectProjection::new().with_owner());
        assert!(result.is_ok(), "Failed to fetch clock: {:?}", result.err());

        let obj = result.unwrap().data.expect("clock exists");
        assert!(
            obj.type_string
                .as_ref()
                .map(|t| t.contains("Clock"))
                .unwrap_or(false),
            "Object should be a Clock"
        );
        assert!(matches!(obj.owner, Some(ObjectOwner::Shared { .. })));
    }
}
