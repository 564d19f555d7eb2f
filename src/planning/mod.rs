//! Plan compilation and domain scope mapping

pub mod blueprint;
pub mod compiler;
pub mod mapper;
pub mod resolver;
pub mod selector;

pub use blueprint::{make_data_source_plan, BlueprintPlan, BlueprintPlanner};
pub use compiler::PlanCompiler;
pub use mapper::DomainScopeMapper;
pub use resolver::ScopeResolver;
pub use selector::select_subtasks;
