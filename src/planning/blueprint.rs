//! Blueprint planning across data sources and connections

use crate::core::config::BlueprintConfig;
use crate::core::{BlueprintScope, DomainScope, PipelinePlan, PlanError};
use crate::persistence::ScopeStore;
use crate::planning::{DomainScopeMapper, PlanCompiler};
use crate::plugin::{DataSource, SubtaskMeta};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::info;

/// Plan and domain scopes for one data-source connection.
///
/// The plan is compiled first; either failure discards both results.
pub async fn make_data_source_plan(
    source: &dyn DataSource,
    store: Arc<dyn ScopeStore>,
    subtask_metas: &[SubtaskMeta],
    connection_id: u64,
    bp_scopes: &[BlueprintScope],
) -> Result<(PipelinePlan, Vec<DomainScope>), PlanError> {
    let plan = PlanCompiler::new(store.clone())
        .compile(source, subtask_metas, bp_scopes, connection_id)
        .await?;
    let scopes = DomainScopeMapper::new(store)
        .map_scopes(source, bp_scopes, connection_id)
        .await?;
    Ok((plan, scopes))
}

/// Result of planning a whole blueprint
#[derive(Debug, Clone, Default, Serialize)]
pub struct BlueprintPlan {
    pub plan: PipelinePlan,
    pub scopes: Vec<DomainScope>,
}

struct SourceBinding {
    source: Arc<dyn DataSource>,
    store: Arc<dyn ScopeStore>,
}

/// Plans every connection of a blueprint through registered data sources
#[derive(Default)]
pub struct BlueprintPlanner {
    sources: HashMap<String, SourceBinding>,
}

impl BlueprintPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a data source together with the store holding its scopes
    pub fn register(&mut self, source: Arc<dyn DataSource>, store: Arc<dyn ScopeStore>) {
        self.sources
            .insert(source.name().to_string(), SourceBinding { source, store });
    }

    pub fn with_source(mut self, source: Arc<dyn DataSource>, store: Arc<dyn ScopeStore>) -> Self {
        self.register(source, store);
        self
    }

    /// Registered plugin names, sorted
    pub fn plugins(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sources.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Plan a blueprint.
    ///
    /// Connections are planned in declaration order; their stages are merged
    /// by index so all plugins' work for position `i` lands in stage `i`.
    /// Domain scopes are concatenated and deduplicated by id. Any failure
    /// aborts the whole blueprint.
    pub async fn plan(&self, config: &BlueprintConfig) -> Result<BlueprintPlan, PlanError> {
        info!(
            "Planning blueprint '{}' ({} connections)",
            config.name,
            config.connections.len()
        );

        let mut result = BlueprintPlan::default();
        let mut seen = HashSet::new();

        for connection in &config.connections {
            let binding = self
                .sources
                .get(&connection.plugin)
                .ok_or_else(|| PlanError::UnknownPlugin(connection.plugin.clone()))?;

            let (plan, scopes) = make_data_source_plan(
                binding.source.as_ref(),
                binding.store.clone(),
                &binding.source.subtask_metas(),
                connection.connection_id,
                &connection.blueprint_scopes(),
            )
            .await?;

            result.plan.merge(plan);
            for scope in scopes {
                if seen.insert(scope.id.clone()) {
                    result.scopes.push(scope);
                }
            }
        }

        info!(
            "Blueprint '{}' planned: {} stages, {} tasks, {} domain scopes",
            config.name,
            result.plan.len(),
            result.plan.task_count(),
            result.scopes.len()
        );
        Ok(result)
    }
}
