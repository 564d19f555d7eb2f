//! Plan compiler - turns blueprint scopes into pipeline stages

use crate::core::{BlueprintScope, PipelinePlan, PipelineTask, PlanError};
use crate::persistence::ScopeStore;
use crate::planning::{select_subtasks, ScopeResolver};
use crate::plugin::{DataSource, SubtaskMeta};
use std::sync::Arc;
use tracing::{debug, info};

/// Compiles one stage per blueprint scope for a data source
#[derive(Clone)]
pub struct PlanCompiler {
    resolver: ScopeResolver,
}

impl PlanCompiler {
    pub fn new(store: Arc<dyn ScopeStore>) -> Self {
        Self {
            resolver: ScopeResolver::new(store),
        }
    }

    /// Compile a plan with `bp_scopes.len()` stages, stage `i` holding the
    /// task for scope `i`.
    ///
    /// Scopes are resolved sequentially; the first failure aborts the whole
    /// compile and no partial plan is returned.
    pub async fn compile(
        &self,
        source: &dyn DataSource,
        subtask_metas: &[SubtaskMeta],
        bp_scopes: &[BlueprintScope],
        connection_id: u64,
    ) -> Result<PipelinePlan, PlanError> {
        info!(
            "Compiling {} plan for connection {} ({} scopes)",
            source.name(),
            connection_id,
            bp_scopes.len()
        );

        let mut plan = PipelinePlan::with_stages(bp_scopes.len());

        for (index, bp_scope) in bp_scopes.iter().enumerate() {
            let (scope, config) = self
                .resolver
                .resolve(connection_id, &bp_scope.scope_id)
                .await
                .map_err(|e| PlanError::resolve(index, connection_id, &bp_scope.scope_id, e))?;

            let options = source
                .build_options(connection_id, &scope, &config)
                .map_err(|e| PlanError::at_scope(index, connection_id, &bp_scope.scope_id, e))?;
            let subtasks = select_subtasks(subtask_metas, &config.entities);
            debug!(
                "Stage {}: {} scope {} -> {} subtasks",
                index,
                source.name(),
                bp_scope.scope_id,
                subtasks.len()
            );

            plan.push_task(
                index,
                PipelineTask {
                    plugin: source.name().to_string(),
                    subtasks,
                    options,
                },
            );
        }

        info!("Compiled {} plan with {} stages", source.name(), plan.len());
        Ok(plan)
    }
}
