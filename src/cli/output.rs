//! CLI output formatting

use crate::collection::TaskRecord;
use crate::core::{DomainScope, DomainScopeKind, PipelinePlan, PipelineTask};
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");

/// Format one task as a single line
pub fn format_task(task: &PipelineTask) -> String {
    let options = serde_json::Value::Object(task.options.clone()).to_string();
    let subtasks = if task.subtasks.is_empty() {
        style("(no subtasks)").dim().to_string()
    } else {
        task.subtasks.join(", ")
    };
    format!(
        "{} {} {}",
        style(&task.plugin).bold(),
        style(options).dim(),
        subtasks
    )
}

/// Format a plan, one block per stage
pub fn format_plan(plan: &PipelinePlan) -> String {
    let mut out = String::new();
    for (index, stage) in plan.stages().iter().enumerate() {
        out.push_str(&format!(
            "{} ({} tasks)\n",
            style(format!("Stage {}", index + 1)).cyan().bold(),
            stage.len()
        ));
        for task in stage {
            out.push_str(&format!("  - {}\n", format_task(task)));
        }
    }
    out
}

/// Format a domain scope
pub fn format_domain_scope(scope: &DomainScope) -> String {
    let kind = match &scope.kind {
        DomainScopeKind::Board { board_type: Some(t) } => format!("board/{}", t),
        DomainScopeKind::Board { board_type: None } => "board".to_string(),
        DomainScopeKind::CicdScope => "cicd".to_string(),
    };
    format!(
        "{} {} [{}]",
        style(&scope.id).cyan(),
        style(&scope.name).bold(),
        style(kind).dim()
    )
}

/// Format a flattened task
pub fn format_task_record(task: &TaskRecord) -> String {
    let children: Vec<String> = task.children.iter().map(|c| c.id.to_string()).collect();
    if children.is_empty() {
        format!("{} {}", style(task.id).cyan(), task.name)
    } else {
        format!(
            "{} {} {}",
            style(task.id).cyan(),
            task.name,
            style(format!("-> [{}]", children.join(", "))).dim()
        )
    }
}
