//! Test: domain scope mapping and blueprint planning

use crate::helpers::*;
use blueprint::core::config::BlueprintConfig;
use blueprint::core::{BlueprintScope, DomainScopeKind, ScopeConfig, ScopeDescriptor};
use blueprint::persistence::InMemoryScopeStore;
use blueprint::planning::{make_data_source_plan, BlueprintPlanner, DomainScopeMapper};
use blueprint::plugin::{self, DataSource, Jira, Zentao};
use std::sync::Arc;

/// Identical inputs map to identical ids, distinct scopes to distinct ids
#[tokio::test]
async fn test_domain_ids_are_deterministic_and_unique() {
    let store = ticket_store().await.into_arc();
    let mapper = DomainScopeMapper::new(store);
    let scopes = vec![
        BlueprintScope::new(1, "1"),
        BlueprintScope::new(1, "2"),
        BlueprintScope::new(1, "3"),
    ];

    let first = mapper.map_scopes(&Jira, &scopes, 1).await.unwrap();
    let second = mapper.map_scopes(&Jira, &scopes, 1).await.unwrap();

    assert_eq!(first, second);
    let ids: Vec<&str> = first.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["jira:JiraBoard:1:1", "jira:JiraBoard:1:2", "jira:JiraBoard:1:3"]);
    assert_eq!(
        first[0].kind,
        DomainScopeKind::Board {
            board_type: Some("scrum".to_string())
        }
    );
}

/// A scope with empty entities yields no domain scope but still a task
#[tokio::test]
async fn test_disabled_scope_skipped_but_planned() {
    let store = ScriptedStore::new()
        .with_config(ScopeConfig::new(1, "tickets", &["TICKET"]))
        .await
        .with_config(ScopeConfig::new(2, "nothing", &[]))
        .await
        .with_scope(ScopeDescriptor::new(1, "1", "enabled").with_scope_config(1))
        .await
        .with_scope(ScopeDescriptor::new(1, "2", "disabled").with_scope_config(2))
        .await
        .into_arc();

    let (plan, scopes) = make_data_source_plan(
        &Zentao,
        store,
        &Zentao.subtask_metas(),
        1,
        &[BlueprintScope::new(1, "1"), BlueprintScope::new(1, "2")],
    )
    .await
    .unwrap();

    assert_eq!(plan.len(), 2);
    assert_eq!(plan.stage(1).unwrap()[0].subtasks, vec!["collectAccounts", "extractAccounts"]);
    assert_eq!(scopes.len(), 1);
    assert_eq!(scopes[0].id, "zentao:ZentaoProject:1:1");
    assert_eq!(scopes[0].name, "enabled");
}

/// A full blueprint across plugins driven by an inline catalog
#[tokio::test]
async fn test_blueprint_with_catalog() {
    let config = BlueprintConfig::from_yaml(
        r#"
name: "Platform"
connections:
  - plugin: circleci
    connection_id: 2
    scopes:
      - scope_id: "p-1"
      - scope_id: "p-2"
  - plugin: trello
    connection_id: 5
    scopes:
      - scope_id: "roadmap"
catalog:
  circleci:
    scope_configs:
      - id: 1
        name: "ci"
        entities: ["CICD"]
    scopes:
      - connection_id: 2
        scope_id: "p-1"
        name: "api"
        slug: "gh/acme/api"
        scope_config_id: 1
      - connection_id: 2
        scope_id: "p-2"
        name: "web"
        slug: "gh/acme/web"
  trello:
    scope_configs:
      - id: 1
        name: "tickets"
        entities: ["TICKET"]
    scopes:
      - connection_id: 5
        scope_id: "roadmap"
        name: "Roadmap"
        scope_config_id: 1
"#,
    )
    .unwrap();

    let mut planner = BlueprintPlanner::new();
    for (name, catalog) in &config.catalog {
        let source = plugin::builtin(name).unwrap();
        planner.register(source, Arc::new(InMemoryScopeStore::from_catalog(catalog).await));
    }

    let result = planner.plan(&config).await.unwrap();

    assert_eq!(result.plan.len(), 2);
    let first: Vec<&str> = result
        .plan
        .stage(0)
        .unwrap()
        .iter()
        .map(|t| t.plugin.as_str())
        .collect();
    assert_eq!(first, vec!["circleci", "trello"]);
    assert_eq!(result.plan.stage(1).unwrap()[0].options["projectSlug"], "gh/acme/web");

    let ids: Vec<&str> = result.scopes.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["circleci:CircleciProject:2:p-1", "trello:TrelloBoard:5:roadmap"]);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["plan"].as_array().unwrap().len(), 2);
    assert_eq!(json["scopes"][0]["kind"], "cicdScope");
}
