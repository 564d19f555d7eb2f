//! Zentao projects

use crate::core::{
    domain_type, DomainIdGenerator, DomainScope, DomainScopeKind, PlanError, ScopeConfig,
    ScopeDescriptor, TaskOptions,
};
use crate::plugin::{base_options, DataSource, SubtaskMeta};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct Zentao;

impl Zentao {
    fn project_id(scope: &ScopeDescriptor) -> Result<i64, PlanError> {
        scope.scope_id.parse().map_err(|_| {
            PlanError::ContractViolation(format!(
                "zentao project id '{}' is not numeric",
                scope.scope_id
            ))
        })
    }
}

impl DataSource for Zentao {
    fn name(&self) -> &'static str {
        "zentao"
    }

    fn category(&self) -> &'static str {
        domain_type::TICKET
    }

    fn subtask_metas(&self) -> Vec<SubtaskMeta> {
        use domain_type::{CROSS, TICKET};
        vec![
            SubtaskMeta::new("convertProjects", Some(TICKET), "convert projects to boards"),
            SubtaskMeta::new("collectExecutions", Some(TICKET), "collect project executions"),
            SubtaskMeta::new("extractExecutions", Some(TICKET), "extract project executions"),
            SubtaskMeta::new("collectStories", Some(TICKET), "collect stories"),
            SubtaskMeta::new("extractStories", Some(TICKET), "extract stories"),
            SubtaskMeta::new("collectBugs", Some(TICKET), "collect bugs"),
            SubtaskMeta::new("extractBugs", Some(TICKET), "extract bugs"),
            SubtaskMeta::new("collectTasks", Some(TICKET), "collect tasks with their children"),
            SubtaskMeta::new("extractTasks", Some(TICKET), "extract flattened tasks"),
            SubtaskMeta::new("convertTasks", Some(TICKET), "convert tasks to issues"),
            SubtaskMeta::new("convertBugCommits", Some(CROSS), "link bugs to commits"),
            SubtaskMeta::ungated("collectAccounts", "collect accounts"),
            SubtaskMeta::ungated("extractAccounts", "extract accounts"),
        ]
    }

    fn build_options(
        &self,
        connection_id: u64,
        scope: &ScopeDescriptor,
        _config: &ScopeConfig,
    ) -> Result<TaskOptions, PlanError> {
        let mut options = base_options(connection_id);
        options.insert("projectId".to_string(), Value::from(Self::project_id(scope)?));
        options.insert("timeAfter".to_string(), Value::from(""));
        Ok(options)
    }

    fn build_domain_scope(&self, scope: &ScopeDescriptor) -> Result<DomainScope, PlanError> {
        let id = DomainIdGenerator::new(self.name(), "ZentaoProject")
            .generate(scope.connection_id, [Self::project_id(scope)?])?;
        Ok(DomainScope {
            id,
            name: scope.name.clone(),
            description: scope.description.clone(),
            url: scope.url.clone(),
            created_date: scope.created_date,
            kind: DomainScopeKind::Board {
                board_type: scope.scope_type.clone(),
            },
        })
    }
}
