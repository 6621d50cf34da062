//! Client configuration.
//!
//! Values come from the caller, with `from_env` filling in overrides:
//!
//! - `SUINS_NETWORK`: `devnet` (default) or `testnet`
//! - `SUINS_SCHEMA`: registry layout (`domain_key`, `inline_record`, `resolver_hop`)
//! - `SUINS_KEY_ENCODING`: `symbolic` (JSON-RPC) or `bcs` (GraphQL)
//! - `SUINS_DESCRIPTOR_BASE_URL`: where `<network>.json` descriptors live
//! - `SUI_RPC_URL` / `SUI_GRAPHQL_ENDPOINT`: node endpoints

use suins_transport::network::{
    descriptor_url, resolve_descriptor_base_url, resolve_graphql_endpoint, resolve_rpc_endpoint,
};
use suins_transport::KeyEncoding;
use suins_types::{env_string, ContractDescriptor, Network, SchemaVersion};

#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub network: Network,
    /// Descriptor supplied up front; bypasses the remote fetch when it names a package.
    pub descriptor: Option<ContractDescriptor>,
    /// Forces a registry layout regardless of what the descriptor says.
    pub schema: Option<SchemaVersion>,
    /// Forces a dynamic-field key encoding regardless of the transport's preference.
    pub key_encoding: Option<KeyEncoding>,
    pub descriptor_base_url: Option<String>,
    pub rpc_endpoint: Option<String>,
    pub graphql_endpoint: Option<String>,
}

impl ClientConfig {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            ..Default::default()
        }
    }

    pub fn from_env() -> Self {
        Self::from_vars(env_string)
    }

    /// Build from a variable lookup; `from_env` uses the process environment.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            network: lookup("SUINS_NETWORK")
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            descriptor: None,
            schema: lookup("SUINS_SCHEMA").and_then(|v| v.parse().ok()),
            key_encoding: lookup("SUINS_KEY_ENCODING").and_then(|v| parse_key_encoding(&v)),
            descriptor_base_url: lookup("SUINS_DESCRIPTOR_BASE_URL"),
            rpc_endpoint: lookup("SUI_RPC_URL"),
            graphql_endpoint: lookup("SUI_GRAPHQL_ENDPOINT"),
        }
    }

    pub fn with_descriptor(mut self, descriptor: ContractDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    pub fn with_schema(mut self, schema: SchemaVersion) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_key_encoding(mut self, encoding: KeyEncoding) -> Self {
        self.key_encoding = Some(encoding);
        self
    }

    pub fn with_descriptor_base_url(mut self, url: impl Into<String>) -> Self {
        self.descriptor_base_url = Some(url.into());
        self
    }

    pub fn with_rpc_endpoint(mut self, url: impl Into<String>) -> Self {
        self.rpc_endpoint = Some(url.into());
        self
    }

    pub fn with_graphql_endpoint(mut self, url: impl Into<String>) -> Self {
        self.graphql_endpoint = Some(url.into());
        self
    }

    pub fn rpc_endpoint(&self) -> String {
        self.rpc_endpoint
            .clone()
            .unwrap_or_else(|| resolve_rpc_endpoint(self.network))
    }

    pub fn graphql_endpoint(&self) -> String {
        self.graphql_endpoint
            .clone()
            .unwrap_or_else(|| resolve_graphql_endpoint(self.network))
    }

    /// URL of the descriptor document for the configured network.
    pub fn descriptor_url(&self) -> String {
        let base = self
            .descriptor_base_url
            .clone()
            .unwrap_or_else(resolve_descriptor_base_url);
        descriptor_url(&base, self.network)
    }
}

fn parse_key_encoding(value: &str) -> Option<KeyEncoding> {
    match value.to_ascii_lowercase().as_str() {
        "symbolic" | "json" | "jsonrpc" => Some(KeyEncoding::Symbolic),
        "bcs" | "graphql" => Some(KeyEncoding::Bcs),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_url_follows_network() {
        let config = ClientConfig::new(Network::Testnet)
            .with_descriptor_base_url("https://bucket.example/suins");
        assert_eq!(
            config.descriptor_url(),
            "https://bucket.example/suins/testnet.json"
        );

        let config = ClientConfig::default().with_descriptor_base_url("https://bucket.example/");
        assert_eq!(config.descriptor_url(), "https://bucket.example/devnet.json");
    }

    #[test]
    fn test_explicit_endpoints_win() {
        let config = ClientConfig::new(Network::Testnet)
            .with_rpc_endpoint("http://127.0.0.1:9000")
            .with_graphql_endpoint("http://127.0.0.1:9125/graphql");
        assert_eq!(config.rpc_endpoint(), "http://127.0.0.1:9000");
        assert_eq!(config.graphql_endpoint(), "http://127.0.0.1:9125/graphql");
    }

    #[test]
    fn test_parse_key_encoding() {
        assert_eq!(parse_key_encoding("BCS"), Some(KeyEncoding::Bcs));
        assert_eq!(parse_key_encoding("jsonrpc"), Some(KeyEncoding::Symbolic));
        assert_eq!(parse_key_encoding("grpc"), None);
    }

    #[test]
    fn test_from_vars_reads_overrides() {
        let vars: std::collections::HashMap<&str, &str> = [
            ("SUINS_NETWORK", "testnet"),
            ("SUINS_SCHEMA", "resolver"),
            ("SUINS_KEY_ENCODING", "bcs"),
            ("SUI_RPC_URL", "http://127.0.0.1:9000"),
        ]
        .into_iter()
        .collect();
        let config = ClientConfig::from_vars(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.schema, Some(SchemaVersion::ResolverHop));
        assert_eq!(config.key_encoding, Some(KeyEncoding::Bcs));
        assert_eq!(config.rpc_endpoint(), "http://127.0.0.1:9000");
        assert_eq!(config.descriptor_base_url, None);
    }

    #[test]
    fn test_from_vars_ignores_unknown_values() {
        let config = ClientConfig::from_vars(|key| match key {
            "SUINS_NETWORK" => Some("mainnet".to_string()),
            "SUINS_SCHEMA" => Some("v9".to_string()),
            _ => None,
        });
        assert_eq!(config.network, Network::Devnet);
        assert_eq!(config.schema, None);
    }
}
