//! Application state shared by all request handlers.
//!
//! The storage backend behind the engine is chosen at compile time via the
//! `inmemory` / `dynamodb` features (see `crate::storage`).

use std::sync::Arc;

use anyhow::Context;
use tablegraph_core::resolver::ResolverMap;
use tablegraph_core::schema::Catalog;
use tablegraph_core::storage::StorageBackend;

use crate::config::Config;
use crate::engine::MappingEngine;

/// Shared application state.
///
/// Cloned for each request handler; clones share the same engine.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<MappingEngine>,
    pub resolvers: Arc<ResolverMap>,
}

impl AppState {
    pub fn new(engine: MappingEngine, resolvers: ResolverMap) -> Self {
        Self {
            engine: Arc::new(engine),
            resolvers: Arc::new(resolvers),
        }
    }

    /// Builds the state the server runs with: the default catalog and
    /// resolver map over the compiled-in storage backend.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let catalog = Catalog::default_catalog();
        anyhow::ensure!(!catalog.is_empty(), "table catalog is empty");
        let resolvers = ResolverMap::default_map();
        resolvers
            .validate(&catalog)
            .context("resolver map does not match the table catalog")?;

        let storage = create_storage(config).await;

        tracing::info!(
            tables = catalog.len(),
            policy = %config.access_policy,
            timeout_ms = config.storage_timeout_ms,
            "Engine configured"
        );

        let engine = MappingEngine::new(Arc::new(catalog), storage)
            .with_policy(config.access_policy)
            .with_timeout(config.storage_timeout());

        Ok(Self::new(engine, resolvers))
    }
}

#[cfg(feature = "inmemory")]
async fn create_storage(_config: &Config) -> Arc<dyn StorageBackend> {
    tracing::info!("Using in-memory storage");
    Arc::new(crate::storage::InMemoryStorage::new())
}

#[cfg(feature = "dynamodb")]
async fn create_storage(config: &Config) -> Arc<dyn StorageBackend> {
    tracing::info!(
        region = %config.aws_region,
        endpoint = config.aws_endpoint_url.as_deref().unwrap_or("default"),
        "Using DynamoDB storage"
    );
    Arc::new(crate::storage::DynamoDbStorage::from_config(config).await)
}
