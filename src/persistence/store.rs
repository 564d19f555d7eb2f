//! SQLite-based scope store

use crate::core::{ScopeConfig, ScopeDescriptor, StoreError};
use crate::persistence::ScopeStore;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;

/// SQLite scope store serving one plugin's tool-layer tables
#[derive(Clone)]
pub struct SqliteScopeStore {
    pool: SqlitePool,
    plugin: String,
}

impl SqliteScopeStore {
    /// Open (creating if missing) the database at `db_path`
    pub async fn new(db_path: &str, plugin: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path))
            .context("Invalid database path")?
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .context("Failed to connect to database")?;

        let store = Self {
            pool,
            plugin: plugin.to_string(),
        };
        store.init().await?;

        Ok(store)
    }

    /// Single-connection in-memory database
    pub async fn in_memory(plugin: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory database")?;

        let store = Self {
            pool,
            plugin: plugin.to_string(),
        };
        store.init().await?;

        Ok(store)
    }

    /// Create store with default path
    pub async fn with_default_path(plugin: &str) -> Result<Self> {
        let data_dir = dirs::data_local_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
        let db_dir = data_dir.join("blueprint");
        std::fs::create_dir_all(&db_dir)?;

        let db_path = db_dir.join("scopes.db");
        let db_path = db_path
            .to_str()
            .context("Database path is not valid UTF-8")?;
        Self::new(db_path, plugin).await
    }

    /// A store for another plugin sharing the same database
    pub fn for_plugin(&self, plugin: &str) -> Self {
        Self {
            pool: self.pool.clone(),
            plugin: plugin.to_string(),
        }
    }

    pub fn plugin(&self) -> &str {
        &self.plugin
    }

    /// Initialize database schema
    async fn init(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _tool_scopes (
                plugin TEXT NOT NULL,
                connection_id INTEGER NOT NULL,
                scope_id TEXT NOT NULL,
                name TEXT NOT NULL,
                slug TEXT,
                description TEXT,
                url TEXT,
                scope_type TEXT,
                created_date TEXT,
                scope_config_id INTEGER,
                PRIMARY KEY (plugin, connection_id, scope_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _tool_scope_configs (
                plugin TEXT NOT NULL,
                id INTEGER NOT NULL,
                name TEXT NOT NULL DEFAULT '',
                entities TEXT NOT NULL DEFAULT '[]',
                PRIMARY KEY (plugin, id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert or replace a scope
    pub async fn save_scope(&self, scope: &ScopeDescriptor) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO _tool_scopes
            (plugin, connection_id, scope_id, name, slug, description, url,
             scope_type, created_date, scope_config_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&self.plugin)
        .bind(scope.connection_id as i64)
        .bind(&scope.scope_id)
        .bind(&scope.name)
        .bind(&scope.slug)
        .bind(&scope.description)
        .bind(&scope.url)
        .bind(&scope.scope_type)
        .bind(scope.created_date)
        .bind(scope.scope_config_id.map(|id| id as i64))
        .execute(&self.pool)
        .await
        .context("Failed to save scope")?;

        Ok(())
    }

    /// Insert or replace a scope config
    pub async fn save_scope_config(&self, config: &ScopeConfig) -> Result<()> {
        let entities = serde_json::to_string(&config.entities)?;
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO _tool_scope_configs (plugin, id, name, entities)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&self.plugin)
        .bind(config.id as i64)
        .bind(&config.name)
        .bind(entities)
        .execute(&self.pool)
        .await
        .context("Failed to save scope config")?;

        Ok(())
    }

    fn scope_from_row(row: &SqliteRow) -> ScopeDescriptor {
        ScopeDescriptor {
            connection_id: row.get::<i64, _>("connection_id") as u64,
            scope_id: row.get("scope_id"),
            name: row.get("name"),
            slug: row.get("slug"),
            description: row.get("description"),
            url: row.get("url"),
            scope_type: row.get("scope_type"),
            created_date: row.get::<Option<DateTime<Utc>>, _>("created_date"),
            scope_config_id: row.get::<Option<i64>, _>("scope_config_id").map(|id| id as u64),
        }
    }
}

fn storage_error(err: sqlx::Error) -> StoreError {
    StoreError::Storage(err.to_string())
}

#[async_trait::async_trait]
impl ScopeStore for SqliteScopeStore {
    async fn get_scope(
        &self,
        connection_id: u64,
        scope_id: &str,
    ) -> Result<ScopeDescriptor, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT connection_id, scope_id, name, slug, description, url,
                   scope_type, created_date, scope_config_id
            FROM _tool_scopes
            WHERE plugin = ?1 AND connection_id = ?2 AND scope_id = ?3
            "#,
        )
        .bind(&self.plugin)
        .bind(connection_id as i64)
        .bind(scope_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        match row {
            Some(row) => Ok(Self::scope_from_row(&row)),
            None => Err(StoreError::not_found(
                "scope",
                format!("{}:{}:{}", self.plugin, connection_id, scope_id),
            )),
        }
    }

    async fn get_scope_config(&self, id: u64) -> Result<ScopeConfig, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, entities
            FROM _tool_scope_configs
            WHERE plugin = ?1 AND id = ?2
            "#,
        )
        .bind(&self.plugin)
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        let Some(row) = row else {
            return Err(StoreError::not_found("scope config", format!("{}:{}", self.plugin, id)));
        };

        let entities: Vec<String> = serde_json::from_str(&row.get::<String, _>("entities"))
            .map_err(|e| {
                StoreError::Storage(format!("malformed entities for scope config {}: {}", id, e))
            })?;

        Ok(ScopeConfig {
            id: row.get::<i64, _>("id") as u64,
            name: row.get("name"),
            entities,
        })
    }
}
