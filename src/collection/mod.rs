//! Tool-layer record handling applied during collection

pub mod flatten;
pub mod task;

pub use flatten::{flatten, FlattenError, HierarchicalRecord};
pub use task::TaskRecord;
