//! Trello boards

use crate::core::{
    domain_type, DomainIdGenerator, DomainScope, DomainScopeKind, PlanError, ScopeConfig,
    ScopeDescriptor, TaskOptions,
};
use crate::plugin::{base_options, DataSource, SubtaskMeta};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct Trello;

impl DataSource for Trello {
    fn name(&self) -> &'static str {
        "trello"
    }

    fn category(&self) -> &'static str {
        domain_type::TICKET
    }

    fn subtask_metas(&self) -> Vec<SubtaskMeta> {
        use domain_type::TICKET;
        vec![
            SubtaskMeta::new("collectLists", Some(TICKET), "collect board lists"),
            SubtaskMeta::new("extractLists", Some(TICKET), "extract board lists"),
            SubtaskMeta::new("collectCards", Some(TICKET), "collect board cards"),
            SubtaskMeta::new("extractCards", Some(TICKET), "extract board cards"),
            SubtaskMeta::new("collectCheckItems", Some(TICKET), "collect card check items"),
            SubtaskMeta::new("extractCheckItems", Some(TICKET), "extract card check items"),
            SubtaskMeta::new("collectLabels", Some(TICKET), "collect board labels"),
            SubtaskMeta::new("extractLabels", Some(TICKET), "extract board labels"),
            SubtaskMeta::ungated("collectMembers", "collect board members"),
            SubtaskMeta::ungated("extractMembers", "extract board members"),
        ]
    }

    fn build_options(
        &self,
        connection_id: u64,
        scope: &ScopeDescriptor,
        _config: &ScopeConfig,
    ) -> Result<TaskOptions, PlanError> {
        let mut options = base_options(connection_id);
        options.insert("scopeId".to_string(), Value::from(scope.scope_id.clone()));
        Ok(options)
    }

    fn build_domain_scope(&self, scope: &ScopeDescriptor) -> Result<DomainScope, PlanError> {
        let id = DomainIdGenerator::new(self.name(), "TrelloBoard")
            .generate(scope.connection_id, [&scope.scope_id])?;
        Ok(DomainScope {
            id,
            name: scope.name.clone(),
            description: None,
            url: None,
            created_date: None,
            kind: DomainScopeKind::Board { board_type: None },
        })
    }
}
