//! Persistence layer for tool-layer scopes and scope configs

#[cfg(feature = "sqlite")]
pub mod store;

#[cfg(feature = "sqlite")]
pub use store::SqliteScopeStore;

use crate::core::{ScopeConfig, ScopeDescriptor, StoreError};
use std::collections::HashMap;

/// Storage collaborator consulted by the resolver.
///
/// One store serves one plugin: scope keys are `(connection_id, scope_id)`.
#[async_trait::async_trait]
pub trait ScopeStore: Send + Sync {
    /// Load a scope by its composite key
    async fn get_scope(
        &self,
        connection_id: u64,
        scope_id: &str,
    ) -> Result<ScopeDescriptor, StoreError>;

    /// Load a scope config by id
    async fn get_scope_config(&self, id: u64) -> Result<ScopeConfig, StoreError>;

    /// Load a scope together with its scope config.
    ///
    /// Scopes without a config reference get an empty default config and
    /// never touch the config table.
    async fn get_scope_and_config(
        &self,
        connection_id: u64,
        scope_id: &str,
    ) -> Result<(ScopeDescriptor, ScopeConfig), StoreError> {
        let scope = self.get_scope(connection_id, scope_id).await?;
        let config = match scope.scope_config_id {
            Some(id) if id != 0 => self.get_scope_config(id).await?,
            _ => ScopeConfig::default(),
        };
        Ok((scope, config))
    }
}

/// In-memory scope store (for testing or catalog-driven runs)
pub struct InMemoryScopeStore {
    scopes: tokio::sync::RwLock<HashMap<(u64, String), ScopeDescriptor>>,
    configs: tokio::sync::RwLock<HashMap<u64, ScopeConfig>>,
}

impl InMemoryScopeStore {
    pub fn new() -> Self {
        Self {
            scopes: tokio::sync::RwLock::new(HashMap::new()),
            configs: tokio::sync::RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace a scope
    pub async fn put_scope(&self, scope: ScopeDescriptor) {
        let mut scopes = self.scopes.write().await;
        scopes.insert((scope.connection_id, scope.scope_id.clone()), scope);
    }

    /// Insert or replace a scope config
    pub async fn put_scope_config(&self, config: ScopeConfig) {
        let mut configs = self.configs.write().await;
        configs.insert(config.id, config);
    }

    /// Build a store from a plugin's inline catalog
    pub async fn from_catalog(catalog: &crate::core::config::PluginCatalog) -> Self {
        let store = Self::new();
        for entry in &catalog.scope_configs {
            store.put_scope_config(entry.into()).await;
        }
        for entry in &catalog.scopes {
            store.put_scope(entry.into()).await;
        }
        store
    }
}

impl Default for InMemoryScopeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ScopeStore for InMemoryScopeStore {
    async fn get_scope(
        &self,
        connection_id: u64,
        scope_id: &str,
    ) -> Result<ScopeDescriptor, StoreError> {
        let scopes = self.scopes.read().await;
        scopes
            .get(&(connection_id, scope_id.to_string()))
            .cloned()
            .ok_or_else(|| {
                StoreError::not_found("scope", format!("{}:{}", connection_id, scope_id))
            })
    }

    async fn get_scope_config(&self, id: u64) -> Result<ScopeConfig, StoreError> {
        let configs = self.configs.read().await;
        configs
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("scope config", id.to_string()))
    }
}
