//! Test: plan shape, options and subtask gating

use crate::helpers::*;
use blueprint::core::{BlueprintScope, ScopeConfig, ScopeDescriptor};
use blueprint::planning::PlanCompiler;
use blueprint::plugin::{Circleci, DataSource, Jira, SubtaskMeta, Trello};

/// N scopes compile to N stages, each carrying the connection id
#[tokio::test]
async fn test_one_stage_per_scope_in_order() {
    let store = ticket_store().await.into_arc();
    let scopes = vec![
        BlueprintScope::new(1, "3"),
        BlueprintScope::new(1, "1"),
        BlueprintScope::new(1, "2"),
    ];

    let plan = PlanCompiler::new(store)
        .compile(&Jira, &Jira.subtask_metas(), &scopes, 1)
        .await
        .unwrap();

    assert_eq!(plan.len(), 3);
    let board_ids: Vec<u64> = plan
        .stages()
        .iter()
        .map(|stage| {
            assert_eq!(stage.len(), 1);
            assert_eq!(stage[0].options["connectionId"], 1);
            stage[0].options["boardId"].as_u64().unwrap()
        })
        .collect();
    assert_eq!(board_ids, vec![3, 1, 2]);
}

/// Registry {A:TICKET, B:CICD, C:ungated} with {TICKET} selects [A, C]
#[tokio::test]
async fn test_subtask_gating() {
    let store = ScriptedStore::new()
        .with_config(ScopeConfig::new(1, "tickets", &["TICKET"]))
        .await
        .with_scope(ScopeDescriptor::new(1, "b", "Board").with_scope_config(1))
        .await
        .into_arc();
    let registry = vec![
        SubtaskMeta::new("A", Some("TICKET"), ""),
        SubtaskMeta::new("B", Some("CICD"), ""),
        SubtaskMeta::ungated("C", ""),
    ];

    let plan = PlanCompiler::new(store)
        .compile(&Trello, &registry, &[BlueprintScope::new(1, "b")], 1)
        .await
        .unwrap();

    assert_eq!(plan.stage(0).unwrap()[0].subtasks, vec!["A", "C"]);
}

/// Options are built per scope and never shared
#[tokio::test]
async fn test_options_are_per_scope() {
    let store = ScriptedStore::new()
        .with_config(ScopeConfig::new(1, "ci", &["CICD"]))
        .await
        .with_scope(
            ScopeDescriptor::new(9, "p1", "api")
                .with_slug("gh/acme/api")
                .with_scope_config(1),
        )
        .await
        .with_scope(ScopeDescriptor::new(9, "p2", "web").with_slug("gh/acme/web"))
        .await
        .into_arc();

    let mut plan = PlanCompiler::new(store)
        .compile(
            &Circleci,
            &Circleci.subtask_metas(),
            &[BlueprintScope::new(9, "p1"), BlueprintScope::new(9, "p2")],
            9,
        )
        .await
        .unwrap()
        .into_stages();

    plan[0][0]
        .options
        .insert("projectSlug".to_string(), serde_json::Value::from("changed"));
    assert_eq!(plan[1][0].options["projectSlug"], "gh/acme/web");

    // p2 has no config: only the ungated subtask
    assert_eq!(plan[1][0].subtasks, vec!["convertProjects"]);
    assert!(plan[0][0].subtasks.contains(&"collectJobs".to_string()));
}

/// Scopes without a config never hit the config table
#[tokio::test]
async fn test_scope_without_config_skips_config_lookup() {
    let store = ScriptedStore::new()
        .with_scope(ScopeDescriptor::new(1, "1", "test/testRepo").with_scope_type("project"))
        .await
        .into_arc();

    PlanCompiler::new(store.clone())
        .compile(&Jira, &Jira.subtask_metas(), &[BlueprintScope::new(1, "1")], 1)
        .await
        .unwrap();

    assert_eq!(store.scope_lookups(), 1);
    assert_eq!(store.config_lookups(), 0);
}

/// Compiling twice gives identical plans
#[tokio::test]
async fn test_compile_is_deterministic() {
    let store = ticket_store().await.into_arc();
    let compiler = PlanCompiler::new(store);
    let scopes = vec![BlueprintScope::new(1, "1"), BlueprintScope::new(1, "2")];

    let first = compiler.compile(&Jira, &Jira.subtask_metas(), &scopes, 1).await.unwrap();
    let second = compiler.compile(&Jira, &Jira.subtask_metas(), &scopes, 1).await.unwrap();
    assert_eq!(first, second);
}
