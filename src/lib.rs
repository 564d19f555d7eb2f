//! blueprint - compiles data-source blueprints into collection plans and
//! canonical domain scopes

pub mod cli;
pub mod collection;
pub mod core;
pub mod persistence;
pub mod planning;
pub mod plugin;

// Re-export commonly used types
pub use collection::{flatten, FlattenError, HierarchicalRecord, TaskRecord};
pub use core::{
    BlueprintScope, DomainIdGenerator, DomainScope, PipelinePlan, PipelineTask, PlanError,
    ScopeConfig, ScopeDescriptor, StoreError,
};
pub use persistence::{InMemoryScopeStore, ScopeStore};
pub use planning::{BlueprintPlanner, DomainScopeMapper, PlanCompiler, ScopeResolver};
pub use plugin::{DataSource, SubtaskMeta};
