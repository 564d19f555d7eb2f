//! Test utility functions for blueprint planning

use async_trait::async_trait;
use blueprint::core::{ScopeConfig, ScopeDescriptor, StoreError};
use blueprint::persistence::{InMemoryScopeStore, ScopeStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// How a scripted lookup fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    NotFound,
    Storage,
}

/// Store backed by memory that fails on chosen scope ids and counts lookups
pub struct ScriptedStore {
    inner: InMemoryScopeStore,
    failures: Vec<(String, Failure)>,
    scope_lookups: AtomicUsize,
    config_lookups: AtomicUsize,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryScopeStore::new(),
            failures: Vec::new(),
            scope_lookups: AtomicUsize::new(0),
            config_lookups: AtomicUsize::new(0),
        }
    }

    pub fn failing_on(mut self, scope_id: &str, failure: Failure) -> Self {
        self.failures.push((scope_id.to_string(), failure));
        self
    }

    pub async fn with_config(self, config: ScopeConfig) -> Self {
        self.inner.put_scope_config(config).await;
        self
    }

    pub async fn with_scope(self, scope: ScopeDescriptor) -> Self {
        self.inner.put_scope(scope).await;
        self
    }

    pub fn scope_lookups(&self) -> usize {
        self.scope_lookups.load(Ordering::SeqCst)
    }

    pub fn config_lookups(&self) -> usize {
        self.config_lookups.load(Ordering::SeqCst)
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl ScopeStore for ScriptedStore {
    async fn get_scope(
        &self,
        connection_id: u64,
        scope_id: &str,
    ) -> Result<ScopeDescriptor, StoreError> {
        self.scope_lookups.fetch_add(1, Ordering::SeqCst);

        if let Some((_, failure)) = self.failures.iter().find(|(id, _)| id == scope_id) {
            return Err(match failure {
                Failure::NotFound => {
                    StoreError::not_found("scope", format!("{}:{}", connection_id, scope_id))
                }
                Failure::Storage => StoreError::Storage("connection reset by peer".to_string()),
            });
        }

        self.inner.get_scope(connection_id, scope_id).await
    }

    async fn get_scope_config(&self, id: u64) -> Result<ScopeConfig, StoreError> {
        self.config_lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.get_scope_config(id).await
    }
}

/// Store with three numeric scopes `1..=3` under connection 1, all using a
/// TICKET+CROSS config
pub async fn ticket_store() -> ScriptedStore {
    let mut store = ScriptedStore::new()
        .with_config(ScopeConfig::new(10, "tickets", &["TICKET", "CROSS"]))
        .await;
    for id in 1..=3 {
        store = store
            .with_scope(
                ScopeDescriptor::new(1, id.to_string(), format!("Board {}", id))
                    .with_scope_type("scrum")
                    .with_scope_config(10),
            )
            .await;
    }
    store
}
