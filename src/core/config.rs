//! Blueprint configuration from YAML

use crate::core::{BlueprintScope, ScopeConfig, ScopeDescriptor};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Top-level blueprint configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlueprintConfig {
    /// Blueprint (project) name
    pub name: String,

    /// Connections and the scopes to collect from each
    #[serde(default)]
    pub connections: Vec<ConnectionConfig>,

    /// Inline scopes and scope configs, keyed by plugin name.
    /// Used instead of a database when present.
    #[serde(default)]
    pub catalog: BTreeMap<String, PluginCatalog>,
}

/// One connection of a blueprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Data source plugin (`jira`, `trello`, `circleci`, `zentao`)
    pub plugin: String,

    pub connection_id: u64,

    #[serde(default)]
    pub scopes: Vec<ScopeRef>,
}

/// Reference to a scope inside a connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeRef {
    pub scope_id: String,
}

/// Scopes and scope configs of one plugin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginCatalog {
    #[serde(default)]
    pub scope_configs: Vec<ScopeConfigEntry>,

    #[serde(default)]
    pub scopes: Vec<ScopeEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeConfigEntry {
    pub id: u64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub entities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeEntry {
    pub connection_id: u64,
    pub scope_id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "type")]
    pub scope_type: Option<String>,
    #[serde(default)]
    pub scope_config_id: Option<u64>,
}

impl From<&ScopeConfigEntry> for ScopeConfig {
    fn from(entry: &ScopeConfigEntry) -> Self {
        ScopeConfig {
            id: entry.id,
            name: entry.name.clone(),
            entities: entry.entities.clone(),
        }
    }
}

impl From<&ScopeEntry> for ScopeDescriptor {
    fn from(entry: &ScopeEntry) -> Self {
        ScopeDescriptor {
            connection_id: entry.connection_id,
            scope_id: entry.scope_id.clone(),
            name: entry.name.clone(),
            slug: entry.slug.clone(),
            description: entry.description.clone(),
            url: entry.url.clone(),
            scope_type: entry.scope_type.clone(),
            created_date: None,
            scope_config_id: entry.scope_config_id,
        }
    }
}

impl ConnectionConfig {
    /// Blueprint scopes of this connection, in declaration order
    pub fn blueprint_scopes(&self) -> Vec<BlueprintScope> {
        self.scopes
            .iter()
            .map(|s| BlueprintScope::new(self.connection_id, s.scope_id.clone()))
            .collect()
    }
}

impl BlueprintConfig {
    /// Load blueprint configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse blueprint configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: BlueprintConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the blueprint configuration
    pub fn validate(&self) -> Result<()> {
        let known = crate::plugin::builtin_names();

        for connection in &self.connections {
            if !known.contains(&connection.plugin.as_str()) {
                anyhow::bail!(
                    "Connection {} uses unknown plugin '{}'",
                    connection.connection_id,
                    connection.plugin
                );
            }

            let mut seen = HashSet::new();
            for scope in &connection.scopes {
                if scope.scope_id.is_empty() {
                    anyhow::bail!(
                        "Connection {} ({}) has a scope with an empty scope_id",
                        connection.connection_id,
                        connection.plugin
                    );
                }
                if !seen.insert(&scope.scope_id) {
                    anyhow::bail!(
                        "Duplicate scope '{}' in connection {} ({})",
                        scope.scope_id,
                        connection.connection_id,
                        connection.plugin
                    );
                }
            }
        }

        for (plugin, catalog) in &self.catalog {
            if !known.contains(&plugin.as_str()) {
                anyhow::bail!("Catalog references unknown plugin '{}'", plugin);
            }

            let config_ids: HashSet<u64> = catalog.scope_configs.iter().map(|c| c.id).collect();
            for scope in &catalog.scopes {
                if let Some(config_id) = scope.scope_config_id {
                    if !config_ids.contains(&config_id) {
                        anyhow::bail!(
                            "Scope '{}' of {} references non-existent scope config {}",
                            scope.scope_id,
                            plugin,
                            config_id
                        );
                    }
                }
            }
        }

        Ok(())
    }

    /// Total number of scopes across all connections
    pub fn scope_count(&self) -> usize {
        self.connections.iter().map(|c| c.scopes.len()).sum()
    }

    pub fn has_catalog(&self) -> bool {
        !self.catalog.is_empty()
    }
}
