//! Flattening of nested parent/child records
//!
//! Some APIs return tasks with their subtasks embedded recursively. Before
//! extraction each tree is linearized: every logical node (native key)
//! appears once, and a node nested under itself is reported instead of
//! being walked forever. Traversal uses an explicit stack, so depth is
//! bounded by the heap rather than the call stack.

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while flattening
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlattenError {
    #[error("Cycle detected: record {key} is nested under itself")]
    CycleDetected { key: String },
}

/// A record with a native key and owned child records
pub trait HierarchicalRecord: Sized {
    type Key: Eq + Hash + Clone + Display + Debug;

    fn key(&self) -> Self::Key;

    fn children(&self) -> &[Self];
}

/// Traversal status of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    /// On the current root-to-node path
    Visiting,
    Visited,
}

/// Flatten `root` and all its descendants into one list.
///
/// The order is pre-order depth-first but callers should only rely on
/// membership. Records are returned by reference, so each keeps its own
/// `children` untouched.
pub fn flatten<R: HierarchicalRecord>(root: &R) -> Result<Vec<&R>, FlattenError> {
    let mut states: HashMap<R::Key, VisitState> = HashMap::new();
    let mut flattened = Vec::new();

    // (record, index of the next child to visit)
    let mut stack: Vec<(&R, usize)> = vec![(root, 0)];
    states.insert(root.key(), VisitState::Visiting);
    flattened.push(root);

    while let Some(frame) = stack.last_mut() {
        let (record, next_child) = *frame;

        let Some(child) = record.children().get(next_child) else {
            states.insert(record.key(), VisitState::Visited);
            stack.pop();
            continue;
        };
        frame.1 += 1;

        let key = child.key();
        match states.get(&key).copied().unwrap_or(VisitState::Unvisited) {
            VisitState::Unvisited => {
                states.insert(key, VisitState::Visiting);
                flattened.push(child);
                stack.push((child, 0));
            }
            VisitState::Visiting => {
                warn!("Record {} is nested under itself", key);
                return Err(FlattenError::CycleDetected {
                    key: key.to_string(),
                });
            }
            VisitState::Visited => {
                // emitted already, but this copy may carry other descendants
                debug!("Record {} already flattened, walking its children", key);
                states.insert(key, VisitState::Visiting);
                stack.push((child, 0));
            }
        }
    }

    Ok(flattened)
}
