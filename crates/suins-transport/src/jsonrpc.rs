//! JSON-RPC client for Sui full nodes.
//!
//! Dynamic fields are looked up symbolically: the node receives the key as
//! `{ type, value }` JSON and performs the Move encoding itself. Missing
//! objects and fields come back as typed error codes inside a successful
//! response, which this client surfaces as [`ObjectResponse::error`].
//!
//! ## Usage
//!
//! ```ignore
//! let client = JsonRpcClient::testnet();
//! let obj = client.get_object("0x...", ObjectProjection::new().with_owner())?;
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use serde_json::Value;
use suins_types::Network;

use crate::http::{build_agent, default_timeouts};
use crate::network::default_rpc_endpoint;
use crate::reader::{
    FieldName, KeyEncoding, ObjectOwner, ObjectProjection, ObjectReader, ObjectResponse,
    ObjectResponseError, SuiObject,
};

/// JSON-RPC client for Sui object reads.
#[derive(Clone)]
pub struct JsonRpcClient {
    endpoint: String,
    agent: ureq::Agent,
}

impl JsonRpcClient {
    /// Create a client for devnet.
    pub fn devnet() -> Self {
        Self::for_network(Network::Devnet)
    }

    /// Create a client for testnet.
    pub fn testnet() -> Self {
        Self::for_network(Network::Testnet)
    }

    pub fn for_network(network: Network) -> Self {
        Self::new(&default_rpc_endpoint(network))
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

    /// Execute a JSON-RPC call and return its `result`.
    fn call(&self, method: &str, params: Value) -> Result<Value> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response: Value = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_json(&body)
            .map_err(|e| anyhow!("JSON-RPC request {} failed: {}", method, e))?
            .into_json()
            .map_err(|e| anyhow!("Failed to parse JSON-RPC response: {}", e))?;

        if let Some(error) = response.get("error").filter(|e| !e.is_null()) {
            let msg = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown error");
            return Err(anyhow!("JSON-RPC error in {}: {}", method, msg));
        }

        response
            .get("result")
            .cloned()
            .ok_or_else(|| anyhow!("No result in JSON-RPC response to {}", method))
    }

    /// Fetch an object by id (`sui_getObject`).
    pub fn get_object(&self, id: &str, projection: ObjectProjection) -> Result<ObjectResponse> {
        let options = serde_json::json!({
            "showType": true,
            "showContent": projection.content,
            "showOwner": projection.owner,
            "showDisplay": projection.display,
        });
        let result = self.call("sui_getObject", serde_json::json!([id, options]))?;
        parse_object_response(&result)
    }

    /// Fetch a dynamic field object by symbolic name (`suix_getDynamicFieldObject`).
    pub fn get_dynamic_field_object(
        &self,
        parent_id: &str,
        type_tag: &str,
        value: &Value,
    ) -> Result<ObjectResponse> {
        let name = serde_json::json!({ "type": type_tag, "value": value });
        let result = self.call(
            "suix_getDynamicFieldObject",
            serde_json::json!([parent_id, name]),
        )?;
        parse_object_response(&result)
    }
}

#[async_trait::async_trait]
impl ObjectReader for JsonRpcClient {
    async fn fetch_object(
        &self,
        id: &str,
        projection: ObjectProjection,
    ) -> Result<ObjectResponse> {
        let client = self.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || client.get_object(&id, projection))
            .await
            .map_err(|e| anyhow!("JSON-RPC task failed: {}", e))?
    }

    async fn fetch_dynamic_field(
        &self,
        parent_id: &str,
        name: &FieldName,
    ) -> Result<ObjectResponse> {
        let FieldName::Symbolic { type_tag, value } = name else {
            bail!(
                "JSON-RPC dynamic field lookup needs a symbolic key, got BCS for {}",
                name.type_tag()
            );
        };
        let client = self.clone();
        let parent_id = parent_id.to_string();
        let type_tag = type_tag.clone();
        let value = value.clone();
        tokio::task::spawn_blocking(move || {
            client.get_dynamic_field_object(&parent_id, &type_tag, &value)
        })
        .await
        .map_err(|e| anyhow!("JSON-RPC task failed: {}", e))?
    }

    fn key_encoding(&self) -> KeyEncoding {
        KeyEncoding::Symbolic
    }
}

/// Parse a `SuiObjectResponse` (`{ data?, error? }`).
pub fn parse_object_response(result: &Value) -> Result<ObjectResponse> {
    if let Some(error) = result.get("error").filter(|e| !e.is_null()) {
        let error: ObjectResponseError = serde_json::from_value(error.clone())
            .map_err(|e| anyhow!("Unrecognized object error {}: {}", error, e))?;
        return Ok(ObjectResponse::missing(error));
    }

    let Some(data) = result.get("data").filter(|d| !d.is_null()) else {
        return Ok(ObjectResponse::default());
    };

    let object_id = data
        .get("objectId")
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow!("Object data without objectId"))?
        .to_string();

    // Versions are serialized as strings by current nodes, numbers by older ones.
    let version = match data.get("version") {
        Some(Value::String(s)) => s.parse().unwrap_or(0),
        Some(v) => v.as_u64().unwrap_or(0),
        None => 0,
    };

    let content = data
        .get("content")
        .filter(|c| c.get("dataType").and_then(|d| d.as_str()) == Some("moveObject"))
        .and_then(|c| c.get("fields"))
        .cloned();

    let display = data
        .get("display")
        .and_then(|d| d.get("data"))
        .and_then(|d| d.as_object())
        .map(|map| {
            map.iter()
                .map(|(k, v)| {
                    let value = v
                        .as_str()
                        .map(String::from)
                        .unwrap_or_else(|| v.to_string());
                    (k.clone(), value)
                })
                .collect::<BTreeMap<_, _>>()
        });

    Ok(ObjectResponse::found(SuiObject {
        object_id,
        version,
        type_string: data.get("type").and_then(|t| t.as_str()).map(String::from),
        owner: data.get("owner").map(parse_rpc_owner),
        content,
        display,
    }))
}

fn parse_rpc_owner(owner: &Value) -> ObjectOwner {
    if owner.as_str() == Some("Immutable") {
        return ObjectOwner::Immutable;
    }
    if let Some(addr) = owner.get("AddressOwner").and_then(|a| a.as_str()) {
        return ObjectOwner::Address(addr.to_string());
    }
    if let Some(parent) = owner.get("ObjectOwner").and_then(|a| a.as_str()) {
        return ObjectOwner::Parent(parent.to_string());
    }
    if let Some(shared) = owner.get("Shared") {
        let initial_version = match shared.get("initial_shared_version") {
            Some(Value::String(s)) => s.parse().unwrap_or(0),
            Some(v) => v.as_u64().unwrap_or(0),
            None => 0,
        };
        return ObjectOwner::Shared { initial_version };
    }
    ObjectOwner::Unknown
}
