//! Subtask selection by enabled domain types

use crate::plugin::SubtaskMeta;
use std::collections::HashSet;

/// Select subtask names from a registry, preserving registry order.
///
/// A subtask is kept when its required domain type is enabled or when it
/// declares none. Repeated names are kept once.
pub fn select_subtasks(registry: &[SubtaskMeta], enabled: &[String]) -> Vec<String> {
    let enabled: HashSet<&str> = enabled.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut selected = Vec::new();

    for meta in registry {
        let gated_in = match &meta.required_domain_type {
            Some(domain_type) => enabled.contains(domain_type.as_str()),
            None => true,
        };
        if gated_in && seen.insert(meta.name.as_str()) {
            selected.push(meta.name.clone());
        }
    }

    selected
}
