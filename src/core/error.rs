//! Error types shared by the store and the planning layer

use thiserror::Error;

/// Errors raised by a scope store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            key: key.into(),
        }
    }
}

/// Errors raised while compiling plans or mapping domain scopes
#[derive(Debug, Error)]
pub enum PlanError {
    /// Resolving the scope at `index` failed; the whole operation is aborted
    #[error(
        "failed to resolve scope '{scope_id}' (connection {connection_id}, index {index}): {source}"
    )]
    Resolve {
        index: usize,
        connection_id: u64,
        scope_id: String,
        #[source]
        source: StoreError,
    },

    /// Caller supplied malformed input (empty key, unparsable id, ...)
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    #[error("Unknown data source: {0}")]
    UnknownPlugin(String),

    /// A resolved scope at `index` was rejected by its data source
    #[error("scope '{scope_id}' (connection {connection_id}, index {index}): {source}")]
    Scope {
        index: usize,
        connection_id: u64,
        scope_id: String,
        #[source]
        source: Box<PlanError>,
    },
}

impl PlanError {
    /// True when the underlying cause is a missing scope or scope config
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PlanError::Resolve {
                source: StoreError::NotFound { .. },
                ..
            }
        )
    }

    /// Index of the blueprint scope that caused the failure, if any
    pub fn index(&self) -> Option<usize> {
        match self {
            PlanError::Resolve { index, .. } | PlanError::Scope { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// The error without its positional wrapper
    pub fn cause(&self) -> &PlanError {
        match self {
            PlanError::Scope { source, .. } => source.cause(),
            other => other,
        }
    }

    /// Attach positional context to a store error
    pub(crate) fn resolve(
        index: usize,
        connection_id: u64,
        scope_id: &str,
        source: StoreError,
    ) -> Self {
        PlanError::Resolve {
            index,
            connection_id,
            scope_id: scope_id.to_string(),
            source,
        }
    }

    /// Attach positional context to a data source failure
    pub(crate) fn at_scope(
        index: usize,
        connection_id: u64,
        scope_id: &str,
        source: PlanError,
    ) -> Self {
        PlanError::Scope {
            index,
            connection_id,
            scope_id: scope_id.to_string(),
            source: Box::new(source),
        }
    }
}
