//! The resolution engine.

use std::sync::Arc;

use suins_transport::{
    DescriptorFetcher, GraphQLClient, HttpDescriptorFetcher, JsonRpcClient, KeyEncoding,
    ObjectReader,
};
use suins_types::{addresses_equal, normalize_address, ContractDescriptor, NameRecord, SchemaVersion};
use tracing::debug;

use crate::bootstrap::ContractBootstrap;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::locator::DynamicFieldLocator;
use crate::ownership::{apply_avatar_rule, OwnershipVerifier};
use crate::schema::{strategy, LookupKey, RegistrySchema};

/// Table keys fetched during enrichment.
const AVATAR_KEY: &str = "avatar";
const CONTENT_HASH_KEY: &str = "content_hash";

/// Which optional parts of a record to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolveOptions {
    pub show_owner: bool,
    pub show_avatar: bool,
    pub show_content_hash: bool,
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_owner(mut self) -> Self {
        self.show_owner = true;
        self
    }

    pub fn with_avatar(mut self) -> Self {
        self.show_avatar = true;
        self
    }

    pub fn with_content_hash(mut self) -> Self {
        self.show_content_hash = true;
        self
    }

    pub fn all() -> Self {
        Self::new().with_owner().with_avatar().with_content_hash()
    }

    fn table_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.show_avatar {
            keys.push(AVATAR_KEY);
        }
        if self.show_content_hash {
            keys.push(CONTENT_HASH_KEY);
        }
        keys
    }
}

/// SuiNS name resolution over a Sui node.
///
/// # Example
///
/// ```no_run
/// use suins_client::{ClientConfig, ResolveOptions, SuinsClient};
///
/// # async fn run() -> suins_client::Result<()> {
/// let client = SuinsClient::from_config(ClientConfig::from_env());
/// let target = client.resolve_address("alice.sui").await?;
/// let record = client
///     .resolve_record("alice.sui", ResolveOptions::new().with_avatar())
///     .await?;
/// println!("{:?} {}", target, serde_json::to_string(&record).unwrap_or_default());
/// # Ok(())
/// # }
/// ```
pub struct SuinsClient {
    bootstrap: ContractBootstrap,
    locator: DynamicFieldLocator,
    verifier: OwnershipVerifier,
    schema_override: Option<SchemaVersion>,
}

impl SuinsClient {
    pub fn new(reader: Arc<dyn ObjectReader>, config: ClientConfig) -> Self {
        Self::with_descriptor_fetcher(reader, Arc::new(HttpDescriptorFetcher::new()), config)
    }

    pub fn with_descriptor_fetcher(
        reader: Arc<dyn ObjectReader>,
        fetcher: Arc<dyn DescriptorFetcher>,
        config: ClientConfig,
    ) -> Self {
        let locator = match config.key_encoding {
            Some(encoding) => DynamicFieldLocator::with_encoding(reader.clone(), encoding),
            None => DynamicFieldLocator::new(reader.clone()),
        };
        Self {
            bootstrap: ContractBootstrap::new(&config, fetcher),
            locator,
            verifier: OwnershipVerifier::new(reader),
            schema_override: config.schema,
        }
    }

    /// Client over the configured transport: JSON-RPC unless BCS keys were asked for.
    pub fn from_config(config: ClientConfig) -> Self {
        let reader: Arc<dyn ObjectReader> = match config.key_encoding.unwrap_or_default() {
            KeyEncoding::Symbolic => Arc::new(JsonRpcClient::new(&config.rpc_endpoint())),
            KeyEncoding::Bcs => Arc::new(GraphQLClient::new(&config.graphql_endpoint())),
        };
        Self::new(reader, config)
    }

    /// The contract descriptor, bootstrapping on first use.
    pub async fn descriptor(&self) -> Result<Arc<ContractDescriptor>> {
        self.bootstrap.ensure_descriptor().await
    }

    /// Address a name points at, if it is registered and has a target.
    pub async fn resolve_address(&self, name: &str) -> Result<Option<String>> {
        let record = self.resolve_record(name, ResolveOptions::default()).await?;
        Ok(record.target().map(str::to_string))
    }

    /// Default name of an address, verified against the name's current owner.
    ///
    /// A reverse entry left behind after the name changed hands resolves to
    /// `None`.
    pub async fn resolve_name(&self, address: &str) -> Result<Option<String>> {
        let key = LookupKey::reverse(address)?;
        let reverse = self.resolve_key(&key, ResolveOptions::default()).await?;
        let Some(name) = reverse.default_domain_name.filter(|n| !n.is_empty()) else {
            return Ok(None);
        };

        let forward = match LookupKey::parse_name(&name) {
            Ok(forward) => forward,
            Err(e) => {
                debug!(address, name = %name, error = %e, "default name is not resolvable");
                return Ok(None);
            }
        };
        let record = self
            .resolve_key(&forward, ResolveOptions::new().with_owner())
            .await?;
        match record.owner {
            Some(owner) if addresses_equal(&owner, address) => Ok(Some(name)),
            owner => {
                debug!(address, name = %name, owner = ?owner, "reverse entry is stale");
                Ok(None)
            }
        }
    }

    /// Full record of a name. Unregistered names yield an empty record.
    pub async fn resolve_record(&self, name: &str, options: ResolveOptions) -> Result<NameRecord> {
        let key = LookupKey::parse_name(name)?;
        self.resolve_key(&key, options).await
    }

    fn schema_for(&self, descriptor: &ContractDescriptor) -> &'static dyn RegistrySchema {
        strategy(
            self.schema_override
                .or(descriptor.schema)
                .unwrap_or_default(),
        )
    }

    async fn resolve_key(&self, key: &LookupKey, options: ResolveOptions) -> Result<NameRecord> {
        let descriptor = self.bootstrap.ensure_descriptor().await?;
        let schema = self.schema_for(&descriptor);

        let Some(entry) = schema.locate_entry(&self.locator, &descriptor, key).await? else {
            debug!(key = key.registry_key(), schema = %schema.version(), "name not registered");
            return Ok(NameRecord::default());
        };
        let fields = schema
            .locate_record(&self.locator, &descriptor, key, &entry)
            .await?;

        if key.is_reverse() {
            let mut record = fields.into_record(Some(entry.object_id), true);
            record.owner = None;
            record.avatar = None;
            if !options.show_content_hash {
                record.content_hash = None;
            }
            return Ok(record);
        }

        let nft_id = fields.get_str("nftId").filter(|id| !id.is_empty());
        let inline_owner = fields.get_str("owner").filter(|o| !o.is_empty());
        let avatar_possible =
            options.show_avatar && (fields.contains(AVATAR_KEY) || fields.table_ref().is_some());
        let want_owner = options.show_owner || avatar_possible;

        let owner_lookup = async {
            if !want_owner {
                return Ok(None);
            }
            match &nft_id {
                Some(id) => self.verifier.verify_owner(id).await,
                None => Ok(inline_owner.as_deref().map(normalize_address)),
            }
        };

        let table_keys = options.table_keys();
        let avatar_lookup = async move {
            let mut fields = fields;
            if let Some(table) = fields.table_ref().map(str::to_string) {
                if !table_keys.is_empty() {
                    let entries = self.locator.lookup_fields(&table, &table_keys).await;
                    fields.merge_table(entries);
                }
            }
            let avatar_ref = fields
                .get_str(AVATAR_KEY)
                .filter(|id| options.show_avatar && !id.is_empty());
            let asset = match &avatar_ref {
                Some(id) => Some(self.verifier.fetch_avatar(id).await),
                None => None,
            };
            (fields, avatar_ref, asset)
        };

        let (owner, (fields, avatar_ref, asset)) = futures::join!(owner_lookup, avatar_lookup);
        let owner = owner.map_err(|e| {
            debug!(nft = ?nft_id, error = %e, "owner lookup failed");
        });

        let mut record = fields.into_record(Some(entry.object_id), false);
        record.owner = match &owner {
            Ok(owner) if options.show_owner || avatar_ref.is_some() => owner.clone(),
            _ => None,
        };
        // an unknown owner cannot confirm or refute the avatar
        record.avatar = match (asset, &owner) {
            (Some(Ok(asset)), Ok(owner)) => {
                Some(apply_avatar_rule(asset.as_ref(), owner.as_deref()))
            }
            (Some(Err(e)), _) => {
                debug!(avatar = ?avatar_ref, error = %e, "avatar lookup failed");
                None
            }
            _ => None,
        };
        if !options.show_content_hash {
            record.content_hash = None;
        }
        Ok(record)
    }
}
