//! Tool-layer scopes, scope configs and canonical domain scopes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical domain-type tags a scope config can enable
pub mod domain_type {
    pub const CODE: &str = "CODE";
    pub const TICKET: &str = "TICKET";
    pub const CODE_REVIEW: &str = "CODEREVIEW";
    pub const CROSS: &str = "CROSS";
    pub const CICD: &str = "CICD";
    pub const CODE_QUALITY: &str = "CODEQUALITY";

    /// Every known tag
    pub const ALL: &[&str] = &[CODE, TICKET, CODE_REVIEW, CROSS, CICD, CODE_QUALITY];
}

/// A collectible scope as stored by a plugin (board, project, repo)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeDescriptor {
    pub connection_id: u64,

    /// Native key of the scope in the source system
    pub scope_id: String,

    pub name: String,

    /// Path-like identifier some sources need (CircleCI project slug)
    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    /// Source-specific scope kind (`project`, `product/normal`, `scrum`, ...)
    #[serde(default)]
    pub scope_type: Option<String>,

    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,

    /// Referenced scope config; `None` resolves to an empty config
    #[serde(default)]
    pub scope_config_id: Option<u64>,
}

impl ScopeDescriptor {
    pub fn new(connection_id: u64, scope_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            connection_id,
            scope_id: scope_id.into(),
            name: name.into(),
            slug: None,
            description: None,
            url: None,
            scope_type: None,
            created_date: None,
            scope_config_id: None,
        }
    }

    pub fn with_scope_config(mut self, id: u64) -> Self {
        self.scope_config_id = Some(id);
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_scope_type(mut self, scope_type: impl Into<String>) -> Self {
        self.scope_type = Some(scope_type.into());
        self
    }
}

/// Named set of enabled domain types, shared by many scopes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeConfig {
    #[serde(default)]
    pub id: u64,

    #[serde(default)]
    pub name: String,

    /// Enabled domain-type tags
    #[serde(default)]
    pub entities: Vec<String>,
}

impl ScopeConfig {
    pub fn new(id: u64, name: impl Into<String>, entities: &[&str]) -> Self {
        Self {
            id,
            name: name.into(),
            entities: entities.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Check whether a domain type is enabled
    pub fn enables(&self, domain_type: &str) -> bool {
        self.entities.iter().any(|e| e == domain_type)
    }
}

/// Kind of canonical scope a data source contributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DomainScopeKind {
    /// Ticket board
    Board {
        #[serde(default, rename = "type")]
        board_type: Option<String>,
    },
    /// CI/CD scope
    CicdScope,
}

/// Canonical, source-agnostic scope entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainScope {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub kind: DomainScopeKind,
}

impl DomainScope {
    /// Canonical table the entity lands in
    pub fn table_name(&self) -> &'static str {
        match self.kind {
            DomainScopeKind::Board { .. } => "boards",
            DomainScopeKind::CicdScope => "cicd_scopes",
        }
    }
}
