//! CircleCI projects

use crate::core::{
    domain_type, DomainIdGenerator, DomainScope, DomainScopeKind, PlanError, ScopeConfig,
    ScopeDescriptor, TaskOptions,
};
use crate::plugin::{base_options, DataSource, SubtaskMeta};
use serde_json::Value;

/// CircleCI data source; scopes are projects addressed by slug
#[derive(Debug, Clone, Copy, Default)]
pub struct Circleci;

impl DataSource for Circleci {
    fn name(&self) -> &'static str {
        "circleci"
    }

    fn category(&self) -> &'static str {
        domain_type::CICD
    }

    fn subtask_metas(&self) -> Vec<SubtaskMeta> {
        use domain_type::CICD;
        vec![
            SubtaskMeta::ungated("convertProjects", "convert projects to cicd scopes"),
            SubtaskMeta::new("collectPipelines", Some(CICD), "collect pipelines"),
            SubtaskMeta::new("extractPipelines", Some(CICD), "extract pipelines"),
            SubtaskMeta::new("collectWorkflows", Some(CICD), "collect workflows"),
            SubtaskMeta::new("extractWorkflows", Some(CICD), "extract workflows"),
            SubtaskMeta::new("collectJobs", Some(CICD), "collect workflow jobs"),
            SubtaskMeta::new("extractJobs", Some(CICD), "extract workflow jobs"),
            SubtaskMeta::new("convertPipelines", Some(CICD), "convert pipelines to domain layer"),
            SubtaskMeta::new("convertWorkflows", Some(CICD), "convert workflows to domain layer"),
            SubtaskMeta::new("convertJobs", Some(CICD), "convert jobs to domain layer"),
        ]
    }

    fn build_options(
        &self,
        connection_id: u64,
        scope: &ScopeDescriptor,
        _config: &ScopeConfig,
    ) -> Result<TaskOptions, PlanError> {
        let slug = scope.slug.as_deref().filter(|s| !s.is_empty()).ok_or_else(|| {
            PlanError::ContractViolation(format!(
                "circleci project '{}' has no slug",
                scope.scope_id
            ))
        })?;

        let mut options = base_options(connection_id);
        options.insert("projectSlug".to_string(), Value::from(slug));
        Ok(options)
    }

    fn build_domain_scope(&self, scope: &ScopeDescriptor) -> Result<DomainScope, PlanError> {
        let id = DomainIdGenerator::new(self.name(), "CircleciProject")
            .generate(scope.connection_id, [&scope.scope_id])?;
        Ok(DomainScope {
            id,
            name: scope.name.clone(),
            description: scope.description.clone(),
            url: scope.url.clone(),
            created_date: scope.created_date,
            kind: DomainScopeKind::CicdScope,
        })
    }
}
