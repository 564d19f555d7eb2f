//! Test: any resolution failure aborts the whole operation

use crate::helpers::*;
use blueprint::core::{BlueprintScope, PlanError, ScopeConfig, ScopeDescriptor, StoreError};
use blueprint::planning::{make_data_source_plan, DomainScopeMapper, PlanCompiler};
use blueprint::plugin::{DataSource, Jira, Trello};

fn three_scopes() -> Vec<BlueprintScope> {
    vec![
        BlueprintScope::new(1, "1"),
        BlueprintScope::new(1, "2"),
        BlueprintScope::new(1, "3"),
    ]
}

/// Failure at index 2 of 3 returns the error and no partial plan
#[tokio::test]
async fn test_compile_failure_at_last_index() {
    let store = ticket_store().await.failing_on("3", Failure::NotFound).into_arc();
    let compiler = PlanCompiler::new(store.clone());

    let result = compiler
        .compile(&Jira, &Jira.subtask_metas(), &three_scopes(), 1)
        .await;

    let err = result.expect_err("compile must not return a partial plan");
    assert!(err.is_not_found());
    assert_eq!(err.index(), Some(2));
    match &err {
        PlanError::Resolve { connection_id, scope_id, .. } => {
            assert_eq!(*connection_id, 1);
            assert_eq!(scope_id, "3");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(store.scope_lookups(), 3);
}

/// The mapper follows the same contract
#[tokio::test]
async fn test_map_failure_at_last_index() {
    let store = ticket_store().await.failing_on("3", Failure::Storage).into_arc();
    let mapper = DomainScopeMapper::new(store);

    let err = mapper
        .map_scopes(&Jira, &three_scopes(), 1)
        .await
        .expect_err("mapping must not return a partial scope list");

    assert!(!err.is_not_found());
    assert_eq!(err.index(), Some(2));
    assert!(matches!(
        err,
        PlanError::Resolve { source: StoreError::Storage(_), .. }
    ));
}

/// Later scopes are never resolved after a failure
#[tokio::test]
async fn test_compile_stops_at_first_failure() {
    let store = ticket_store().await.failing_on("1", Failure::NotFound).into_arc();
    let compiler = PlanCompiler::new(store.clone());

    assert!(compiler
        .compile(&Jira, &Jira.subtask_metas(), &three_scopes(), 1)
        .await
        .is_err());
    assert_eq!(store.scope_lookups(), 1);
}

/// A data-source plan discards both outputs on failure
#[tokio::test]
async fn test_data_source_plan_is_all_or_nothing() {
    let store = ticket_store().await.failing_on("2", Failure::Storage).into_arc();

    let result =
        make_data_source_plan(&Jira, store, &Jira.subtask_metas(), 1, &three_scopes()).await;
    assert!(matches!(result, Err(PlanError::Resolve { index: 1, .. })));
}

/// Malformed native keys surface as contract violations at their index
#[tokio::test]
async fn test_non_numeric_board_is_contract_violation() {
    let store = ScriptedStore::new()
        .with_scope(ScopeDescriptor::new(1, "1", "good"))
        .await
        .with_scope(ScopeDescriptor::new(1, "x", "bad"))
        .await
        .into_arc();

    let err = PlanCompiler::new(store)
        .compile(
            &Jira,
            &[],
            &[BlueprintScope::new(1, "1"), BlueprintScope::new(1, "x")],
            1,
        )
        .await
        .unwrap_err();

    assert_eq!(err.index(), Some(1));
    assert!(matches!(err.cause(), PlanError::ContractViolation(_)));
    match &err {
        PlanError::Scope {
            connection_id,
            scope_id,
            ..
        } => {
            assert_eq!(*connection_id, 1);
            assert_eq!(scope_id, "x");
        }
        other => panic!("expected scope context, got {:?}", other),
    }
}

/// A scope whose native key is empty cannot be mapped; the index is reported
#[tokio::test]
async fn test_empty_native_key_aborts_mapping_at_index() {
    let store = ScriptedStore::new()
        .with_config(ScopeConfig::new(1, "tickets", &["TICKET"]))
        .await
        .with_scope(ScopeDescriptor::new(1, "a", "first").with_scope_config(1))
        .await
        .with_scope(ScopeDescriptor::new(1, "", "nameless").with_scope_config(1))
        .await
        .into_arc();

    let err = DomainScopeMapper::new(store)
        .map_scopes(
            &Trello,
            &[BlueprintScope::new(1, "a"), BlueprintScope::new(1, "")],
            1,
        )
        .await
        .expect_err("mapping must not return a partial scope list");

    assert_eq!(err.index(), Some(1));
    assert!(matches!(err.cause(), PlanError::ContractViolation(_)));
}
