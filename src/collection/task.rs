//! Zentao task records as returned by the task API

use crate::collection::HierarchicalRecord;
use serde::{Deserialize, Serialize};

/// A task with its subtasks embedded under `children`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: i64,
    #[serde(default)]
    pub project: i64,
    #[serde(default)]
    pub parent: i64,
    #[serde(default)]
    pub execution: i64,
    #[serde(default)]
    pub story: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub task_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub estimate: f64,
    #[serde(default)]
    pub consumed: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub children: Vec<TaskRecord>,
}

impl TaskRecord {
    pub fn new(id: i64, children: Vec<TaskRecord>) -> Self {
        Self {
            id,
            children,
            ..Default::default()
        }
    }

    /// `(parent id, child id)` pairs of the flattened records, rebuilt from
    /// each record's own children rather than from row order
    pub fn parent_links(records: &[&TaskRecord]) -> Vec<(i64, i64)> {
        records
            .iter()
            .flat_map(|record| record.children.iter().map(move |child| (record.id, child.id)))
            .collect()
    }
}

impl HierarchicalRecord for TaskRecord {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }

    fn children(&self) -> &[TaskRecord] {
        &self.children
    }
}
