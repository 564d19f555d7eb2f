//! Domain scope mapper - canonical scopes for enabled categories

use crate::core::{BlueprintScope, DomainScope, PlanError};
use crate::persistence::ScopeStore;
use crate::planning::ScopeResolver;
use crate::plugin::DataSource;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Builds canonical domain scopes for blueprint scopes whose config
/// enables the data source's category
#[derive(Clone)]
pub struct DomainScopeMapper {
    resolver: ScopeResolver,
}

impl DomainScopeMapper {
    pub fn new(store: Arc<dyn ScopeStore>) -> Self {
        Self {
            resolver: ScopeResolver::new(store),
        }
    }

    /// Map blueprint scopes to domain scopes.
    ///
    /// Scopes whose config disables the category are skipped. Scopes that
    /// resolve to an id already produced are emitted once. Any failure
    /// aborts the whole mapping.
    pub async fn map_scopes(
        &self,
        source: &dyn DataSource,
        bp_scopes: &[BlueprintScope],
        connection_id: u64,
    ) -> Result<Vec<DomainScope>, PlanError> {
        let mut scopes = Vec::with_capacity(bp_scopes.len());
        let mut seen = HashSet::new();

        for (index, bp_scope) in bp_scopes.iter().enumerate() {
            let (scope, config) = self
                .resolver
                .resolve(connection_id, &bp_scope.scope_id)
                .await
                .map_err(|e| PlanError::resolve(index, connection_id, &bp_scope.scope_id, e))?;

            if !source.maps_to_category(&config) {
                debug!(
                    "Skipping {} scope {}: {} not enabled",
                    source.name(),
                    bp_scope.scope_id,
                    source.category()
                );
                continue;
            }

            let domain_scope = source
                .build_domain_scope(&scope)
                .map_err(|e| PlanError::at_scope(index, connection_id, &bp_scope.scope_id, e))?;
            if !seen.insert(domain_scope.id.clone()) {
                debug!("Domain scope {} already mapped", domain_scope.id);
                continue;
            }
            scopes.push(domain_scope);
        }

        info!(
            "Mapped {} of {} {} scopes to {}",
            scopes.len(),
            bp_scopes.len(),
            source.name(),
            source.category()
        );
        Ok(scopes)
    }
}
