//! Scope and scope-config resolution

use crate::core::{ScopeConfig, ScopeDescriptor, StoreError};
use crate::persistence::ScopeStore;
use std::sync::Arc;
use tracing::debug;

/// Fetches a scope and its scope config from the store.
///
/// Nothing is cached: configs may change between runs.
#[derive(Clone)]
pub struct ScopeResolver {
    store: Arc<dyn ScopeStore>,
}

impl ScopeResolver {
    pub fn new(store: Arc<dyn ScopeStore>) -> Self {
        Self { store }
    }

    /// Resolve `(connection_id, scope_id)` to its descriptor and config
    pub async fn resolve(
        &self,
        connection_id: u64,
        scope_id: &str,
    ) -> Result<(ScopeDescriptor, ScopeConfig), StoreError> {
        debug!("Resolving scope {} of connection {}", scope_id, connection_id);
        let (scope, config) = self.store.get_scope_and_config(connection_id, scope_id).await?;
        debug!(
            "Scope {} uses config {} with entities {:?}",
            scope_id, config.id, config.entities
        );
        Ok((scope, config))
    }
}
