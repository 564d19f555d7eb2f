//! Compiled pipeline plan model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Options handed to a plugin task (`connectionId`, scope identifier, ...)
pub type TaskOptions = Map<String, Value>;

/// One scope (board, project, repo) a blueprint wants collected
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintScope {
    pub connection_id: u64,
    pub scope_id: String,
}

impl BlueprintScope {
    pub fn new(connection_id: u64, scope_id: impl Into<String>) -> Self {
        Self {
            connection_id,
            scope_id: scope_id.into(),
        }
    }
}

/// One plugin's work for one scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTask {
    /// Plugin that runs the subtasks
    pub plugin: String,

    /// Subtask names in execution order
    pub subtasks: Vec<String>,

    /// Task options
    pub options: TaskOptions,
}

/// Tasks that may run concurrently
pub type PipelineStage = Vec<PipelineTask>;

/// Ordered stages; stage `i` belongs to blueprint scope `i`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelinePlan {
    stages: Vec<PipelineStage>,
}

impl PipelinePlan {
    /// A plan with `len` empty stages
    pub fn with_stages(len: usize) -> Self {
        Self {
            stages: vec![PipelineStage::new(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stages(&self) -> &[PipelineStage] {
        &self.stages
    }

    pub fn stage(&self, index: usize) -> Option<&PipelineStage> {
        self.stages.get(index)
    }

    /// Append a task to stage `index`, growing the plan when the stage is absent
    pub fn push_task(&mut self, index: usize, task: PipelineTask) {
        if self.stages.len() <= index {
            self.stages.resize_with(index + 1, PipelineStage::new);
        }
        self.stages[index].push(task);
    }

    /// Merge another plan by stage index, so plugins compiled separately share positions
    pub fn merge(&mut self, other: PipelinePlan) {
        for (index, stage) in other.stages.into_iter().enumerate() {
            if self.stages.len() <= index {
                self.stages.push(stage);
            } else {
                self.stages[index].extend(stage);
            }
        }
    }

    /// Total number of tasks across all stages
    pub fn task_count(&self) -> usize {
        self.stages.iter().map(Vec::len).sum()
    }

    pub fn into_stages(self) -> Vec<PipelineStage> {
        self.stages
    }
}

impl From<Vec<PipelineStage>> for PipelinePlan {
    fn from(stages: Vec<PipelineStage>) -> Self {
        Self { stages }
    }
}
