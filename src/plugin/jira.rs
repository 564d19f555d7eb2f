//! Jira boards

use crate::core::{
    domain_type, DomainIdGenerator, DomainScope, DomainScopeKind, PlanError, ScopeConfig,
    ScopeDescriptor, TaskOptions,
};
use crate::plugin::{base_options, DataSource, SubtaskMeta};
use serde_json::Value;

/// Jira data source; scopes are boards
#[derive(Debug, Clone, Copy, Default)]
pub struct Jira;

impl Jira {
    fn board_id(scope: &ScopeDescriptor) -> Result<u64, PlanError> {
        scope.scope_id.parse().map_err(|_| {
            PlanError::ContractViolation(format!(
                "jira board id '{}' is not numeric",
                scope.scope_id
            ))
        })
    }
}

impl DataSource for Jira {
    fn name(&self) -> &'static str {
        "jira"
    }

    fn category(&self) -> &'static str {
        domain_type::TICKET
    }

    fn subtask_metas(&self) -> Vec<SubtaskMeta> {
        use domain_type::{CROSS, TICKET};
        vec![
            SubtaskMeta::ungated("collectStatus", "collect issue statuses"),
            SubtaskMeta::ungated("extractStatus", "extract issue statuses"),
            SubtaskMeta::new("collectProjects", Some(TICKET), "collect projects"),
            SubtaskMeta::new("extractProjects", Some(TICKET), "extract projects"),
            SubtaskMeta::new("collectIssueTypes", Some(TICKET), "collect issue types"),
            SubtaskMeta::new("collectIssues", Some(TICKET), "collect board issues"),
            SubtaskMeta::new("extractIssues", Some(TICKET), "extract board issues"),
            SubtaskMeta::new("collectSprints", Some(TICKET), "collect board sprints"),
            SubtaskMeta::new("extractSprints", Some(TICKET), "extract board sprints"),
            SubtaskMeta::new("collectRemotelinks", Some(CROSS), "collect issue remote links"),
            SubtaskMeta::new("extractRemotelinks", Some(CROSS), "extract issue remote links"),
            SubtaskMeta::new("convertBoard", Some(TICKET), "convert board to domain layer"),
            SubtaskMeta::new("convertIssues", Some(TICKET), "convert issues to domain layer"),
            SubtaskMeta::new("convertSprints", Some(TICKET), "convert sprints to domain layer"),
            SubtaskMeta::new("convertIssueCommits", Some(CROSS), "link issues to commits"),
        ]
    }

    fn build_options(
        &self,
        connection_id: u64,
        scope: &ScopeDescriptor,
        _config: &ScopeConfig,
    ) -> Result<TaskOptions, PlanError> {
        let mut options = base_options(connection_id);
        options.insert("boardId".to_string(), Value::from(Self::board_id(scope)?));
        if let Some(scope_config_id) = scope.scope_config_id {
            options.insert("scopeConfigId".to_string(), Value::from(scope_config_id));
        }
        Ok(options)
    }

    fn build_domain_scope(&self, scope: &ScopeDescriptor) -> Result<DomainScope, PlanError> {
        let id = DomainIdGenerator::new(self.name(), "JiraBoard")
            .generate(scope.connection_id, [Self::board_id(scope)?])?;
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
