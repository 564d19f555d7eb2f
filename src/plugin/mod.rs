//! Data source plugins
//!
//! Each source differs only in how task options and canonical scopes are
//! built; the planning layer drives all of them through [`DataSource`].

pub mod circleci;
pub mod jira;
pub mod trello;
pub mod zentao;

pub use circleci::Circleci;
pub use jira::Jira;
pub use trello::Trello;
pub use zentao::Zentao;

use crate::core::{DomainScope, PlanError, ScopeConfig, ScopeDescriptor, TaskOptions};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry entry describing one subtask of a plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtaskMeta {
    pub name: String,

    /// Domain type that must be enabled for this subtask to run; `None` always runs
    pub required_domain_type: Option<String>,

    pub description: String,
}

impl SubtaskMeta {
    pub fn new(name: &str, required_domain_type: Option<&str>, description: &str) -> Self {
        Self {
            name: name.to_string(),
            required_domain_type: required_domain_type.map(str::to_string),
            description: description.to_string(),
        }
    }

    /// A subtask that runs regardless of enabled domain types
    pub fn ungated(name: &str, description: &str) -> Self {
        Self::new(name, None, description)
    }
}

/// Per-source plan and scope-mapping behaviour
pub trait DataSource: Send + Sync {
    /// Plugin name used in pipeline tasks and domain ids
    fn name(&self) -> &'static str;

    /// Domain type whose scopes this source contributes (`TICKET`, `CICD`, ...)
    fn category(&self) -> &'static str;

    /// Subtask registry in execution order
    fn subtask_metas(&self) -> Vec<SubtaskMeta>;

    /// Task options for one scope. `connectionId` is always present.
    fn build_options(
        &self,
        connection_id: u64,
        scope: &ScopeDescriptor,
        config: &ScopeConfig,
    ) -> Result<TaskOptions, PlanError>;

    /// Whether scopes under `config` produce a canonical scope
    fn maps_to_category(&self, config: &ScopeConfig) -> bool {
        config.enables(self.category())
    }

    /// Canonical scope for a tool-layer scope
    fn build_domain_scope(&self, scope: &ScopeDescriptor) -> Result<DomainScope, PlanError>;
}

/// Options every task carries
pub(crate) fn base_options(connection_id: u64) -> TaskOptions {
    let mut options = TaskOptions::new();
    options.insert("connectionId".to_string(), Value::from(connection_id));
    options
}

/// Names of the data sources this crate ships
pub fn builtin_names() -> &'static [&'static str] {
    &["jira", "trello", "circleci", "zentao"]
}

/// Look up a built-in data source by plugin name
pub fn builtin(name: &str) -> Option<Arc<dyn DataSource>> {
    match name {
        "jira" => Some(Arc::new(Jira)),
        "trello" => Some(Arc::new(Trello)),
        "circleci" => Some(Arc::new(Circleci)),
        "zentao" => Some(Arc::new(Zentao)),
        _ => None,
    }
}

/// All built-in data sources keyed by plugin name
pub fn builtin_registry() -> HashMap<String, Arc<dyn DataSource>> {
    builtin_names()
        .iter()
        .filter_map(|name| builtin(name).map(|source| (name.to_string(), source)))
        .collect()
}
