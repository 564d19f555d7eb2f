//! Scenario-based tests for blueprint planning

mod helpers;

mod all_or_nothing;
mod domain_scopes;
mod plan_shape;
