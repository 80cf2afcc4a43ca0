use domain::SourceTable;
use serde_json::json;
use shipnet_aggregate::ServiceAggregator;
use shipnet_analysis::{
    CabinAnswer, ChatAnswer, ChatRouter, FieldAnswer, QueryIntent, Route, ThresholdOp,
    detect_systems, route,
};
use shipnet_storage::InMemoryTableStore;
use std::sync::Arc;

fn router() -> ChatRouter {
    let store = InMemoryTableStore::new();
    store.insert_json(
        "pbx",
        json!([
            { "primary_cabin__rccl_": "1001", "user": "pax", "online_status": "ONLINE" },
            { "primary_cabin__rccl_": "1001", "user": "pax", "online_status": "OFFLINE" },
            { "primary_cabin__rccl_": "1002", "user": "crew", "online_status": "ONLINE" },
            { "primary_cabin__rccl_": "1003", "user": "crew", "online_status": "ONLINE" },
            { "primary_cabin__rccl_": "1003", "user": "pax", "online_status": "ONLINE" },
        ]),
    );
    store.insert_json(
        "field_cables",
        json!([
            { "cable_id": "FC-1", "rdp_yard": "102B" },
            { "cable_id": "FC-2", "rdp_yard": "102B" },
            { "cable_id": "FC-3", "rdp_yard": "103B" },
        ]),
    );
    ChatRouter::new(ServiceAggregator::new(Arc::new(store)))
}

#[test]
fn routes_by_keyword() {
    assert_eq!(
        route("how many cabins have exactly two phones?", None),
        Route::Cabins {
            systems: vec![SourceTable::Pbx],
            intent: QueryIntent::Threshold {
                op: ThresholdOp::Exactly,
                value: Some(2),
            },
        }
    );
    assert_eq!(
        route("which wifi access points are offline", None),
        Route::Status {
            systems: vec![SourceTable::Wifi],
        }
    );
    assert!(matches!(
        route("distribution of rdp", None),
        Route::Field {
            intent: QueryIntent::Distribution,
            ..
        }
    ));
    assert_eq!(
        route("how many cabins have 2 phones?", None),
        Route::Cabins {
            systems: vec![SourceTable::Pbx],
            intent: QueryIntent::Threshold {
                op: ThresholdOp::Exactly,
                value: Some(2),
            },
        }
    );
    assert!(matches!(
        route("deck distribution over all systems", None),
        Route::Field {
            intent: QueryIntent::Distribution,
            ..
        }
    ));
    assert_eq!(route("tell me a joke", None), Route::Unknown);
}

#[test]
fn explicit_system_hint_wins() {
    assert_eq!(
        detect_systems("phones per cabin", Some(SourceTable::Tv)),
        vec![SourceTable::Tv]
    );
    assert_eq!(detect_systems("per cabin", None), SourceTable::ALL.to_vec());
    assert_eq!(
        detect_systems("cabin switches per cabin", None),
        vec![SourceTable::CabinSwitch]
    );
}

#[tokio::test]
async fn cabin_question_is_answered_from_loaded_records() {
    let answer = router()
        .answer("how many cabins have exactly two phones?", None)
        .await;
    match answer {
        ChatAnswer::Cabins { systems } => {
            assert_eq!(systems.len(), 1);
            let (system, answer) = &systems[0];
            assert_eq!(*system, SourceTable::Pbx);
            match answer {
                CabinAnswer::Threshold { cabins, value, .. } => {
                    assert_eq!(*value, 2);
                    assert_eq!(cabins, &vec!["1001", "1003"]);
                }
                other => panic!("unexpected cabin answer: {other:?}"),
            }
        }
        other => panic!("unexpected answer: {other:?}"),
    }
}

fn shared_cabin_router() -> ChatRouter {
    let store = InMemoryTableStore::new();
    store.insert_json(
        "wifi",
        json!([{ "primary_cabin__rccl_": "2001", "user": "pax" }]),
    );
    store.insert_json(
        "pbx",
        json!([
            { "primary_cabin__rccl_": "2001", "user": "pax" },
            { "primary_cabin__rccl_": "2002", "user": "pax" },
            { "primary_cabin__rccl_": "2002", "user": "crew" },
            { "primary_cabin__rccl_": "2003", "user": "pax" },
        ]),
    );
    ChatRouter::new(ServiceAggregator::new(Arc::new(store)))
}

fn threshold_cabins(answer: ChatAnswer) -> Vec<(SourceTable, Vec<String>)> {
    match answer {
        ChatAnswer::Cabins { systems } => systems
            .into_iter()
            .map(|(system, answer)| match answer {
                CabinAnswer::Threshold { cabins, .. } => (system, cabins),
                other => panic!("unexpected cabin answer for {system}: {other:?}"),
            })
            .collect(),
        other => panic!("unexpected answer: {other:?}"),
    }
}

#[tokio::test]
async fn cabins_are_bucketed_per_system() {
    let answer = shared_cabin_router()
        .answer("which cabins have exactly 2 devices?", None)
        .await;
    let per_system = threshold_cabins(answer);
    assert_eq!(per_system.len(), SourceTable::ALL.len());
    for (system, cabins) in per_system {
        match system {
            SourceTable::Pbx => assert_eq!(cabins, vec!["2002"]),
            _ => assert!(cabins.is_empty(), "{system} should have no 2-device cabin"),
        }
    }
}

#[tokio::test]
async fn bare_number_means_exactly_that_many_devices() {
    let answer = shared_cabin_router()
        .answer("how many cabins have 2 phones?", None)
        .await;
    assert_eq!(
        threshold_cabins(answer),
        vec![(SourceTable::Pbx, vec!["2002".to_string()])]
    );
}

#[tokio::test]
async fn unattached_number_is_undetermined() {
    let answer = shared_cabin_router()
        .answer("how many cabins are in zone 5?", Some(SourceTable::Pbx))
        .await;
    assert_eq!(
        answer,
        ChatAnswer::Cabins {
            systems: vec![(
                SourceTable::Pbx,
                CabinAnswer::ThresholdUndetermined {
                    op: ThresholdOp::Exactly
                }
            )],
        }
    );
}

#[tokio::test]
async fn status_question_returns_system_statuses() {
    let answer = router().answer("how many phones are online", None).await;
    match answer {
        ChatAnswer::Status { systems, totals } => {
            assert_eq!(systems.len(), 1);
            assert_eq!(totals.total, 5);
            assert_eq!(totals.online, 4);
            assert_eq!(totals.offline, 1);
            assert_eq!(totals.unique_cabins, 3);
        }
        other => panic!("unexpected answer: {other:?}"),
    }
}

#[tokio::test]
async fn field_question_uses_table_specific_columns() {
    let answer = router()
        .answer("list rdp_yard with more than 1", Some(SourceTable::FieldCables))
        .await;
    match answer {
        ChatAnswer::Field {
            answer: FieldAnswer::Threshold { matches, .. },
            ..
        } => {
            assert_eq!(matches.len(), 1);
            assert_eq!(matches[0].value, "102B");
        }
        other => panic!("unexpected answer: {other:?}"),
    }
}

#[tokio::test]
async fn unknown_question_is_first_class() {
    assert_eq!(router().answer("tell me a joke", None).await, ChatAnswer::Unknown);
}
