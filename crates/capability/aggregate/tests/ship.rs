use domain::{Area, ServiceStatus, SourceTable};
use serde_json::json;
use shipnet_aggregate::{
    AggregateError, ServiceAggregator, combine, parse_systems, parse_timestamp, unique_cabins,
};
use shipnet_storage::InMemoryTableStore;
use std::sync::Arc;

fn seeded_store() -> InMemoryTableStore {
    let store = InMemoryTableStore::new();
    store.insert_json(
        "wifi",
        json!([
            { "user": "pax", "primary_cabin__rccl_": "0128", "online__at_once_": "ONLINE",
              "cable_id": "C-1", "updated_at": "2024-01-01T00:00:00Z" },
            { "user": "crew", "primary_cabin__rccl_": "-", "online__at_once_": "OFFLINE",
              "cable_id": "C-2", "updated_at": "2024-02-01T00:00:00Z" },
        ]),
    );
    store.insert_json(
        "pbx",
        json!([
            { "user": "pax", "primary_cabin__rccl_": "0128", "online_status": "OFFLINE",
              "cable_id": "C-1", "created_at": "2024-05-01T12:00:00+00:00" },
            { "user": "pax", "primary_cabin__rccl_": "0200", "online_status": "ONLINE",
              "cable_id": "C-3", "created_at": null },
        ]),
    );
    store
}

#[tokio::test]
async fn dashboard_combines_all_systems() {
    let aggregator = ServiceAggregator::new(Arc::new(seeded_store()));
    let summary = aggregator.dashboard().await;

    assert_eq!(summary.systems.len(), SourceTable::ALL.len());
    assert_eq!(summary.totals.total, 4);
    assert_eq!(summary.totals.online, 2);
    assert_eq!(summary.totals.offline, 2);
    assert_eq!(summary.totals.unique_cabins, 2);
    assert_eq!(
        summary.last_updated,
        parse_timestamp("2024-05-01T12:00:00Z")
    );
}

#[test]
fn combine_sums_system_totals() {
    let mut wifi = ServiceStatus::zero();
    wifi.total.total = 10;
    wifi.online.total = 7;
    wifi.offline.total = 3;
    let mut tv = ServiceStatus::zero();
    tv.total.total = 5;
    tv.offline.total = 5;
    let totals = combine(&[(SourceTable::Wifi, wifi), (SourceTable::Tv, tv)], 4);
    assert_eq!(totals.total, 15);
    assert_eq!(totals.online, 7);
    assert_eq!(totals.offline, 8);
    assert_eq!(totals.unique_cabins, 4);
}

#[tokio::test]
async fn unique_cabins_ignore_placeholders_across_systems() {
    let aggregator = ServiceAggregator::new(Arc::new(seeded_store()));
    let loaded = aggregator
        .load_many(&[SourceTable::Wifi, SourceTable::Pbx])
        .await;
    let cabins = unique_cabins(loaded.iter().flat_map(|(_, records)| records.iter()));
    assert_eq!(
        cabins.into_iter().collect::<Vec<_>>(),
        vec!["0128".to_string(), "0200".to_string()]
    );
}

#[tokio::test]
async fn overview_reports_count_fields_and_samples() {
    let aggregator = ServiceAggregator::new(Arc::new(seeded_store()));
    let overview = aggregator.overview(SourceTable::Pbx, 1).await;
    assert_eq!(overview.total_count, 2);
    assert_eq!(overview.sample_rows.len(), 1);
    assert!(overview.fields.contains(&"primary_cabin__rccl_".to_string()));

    let empty = aggregator.overview(SourceTable::Tv, 5).await;
    assert_eq!(empty.total_count, 0);
    assert!(empty.fields.is_empty());
}

#[tokio::test]
async fn cable_lists_split_by_area_and_mark_offline_cables() {
    let aggregator = ServiceAggregator::new(Arc::new(seeded_store()));
    let systems = [SourceTable::Wifi, SourceTable::Pbx];

    let cabin = aggregator.cable_list(&systems, Area::Cabin).await;
    assert_eq!(cabin.len(), 3);
    // C-1 在 pbx 上离线，wifi 上同一线缆号的行也标记离线
    assert!(
        cabin
            .iter()
            .filter(|row| row.record.cable_id == "C-1")
            .all(|row| row.offline)
    );
    assert!(
        cabin
            .iter()
            .any(|row| row.record.cable_id == "C-3" && !row.offline)
    );

    let public = aggregator.cable_list(&systems, Area::Public).await;
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].record.cable_id, "C-2");
    assert!(public[0].offline);
}

#[tokio::test]
async fn status_and_cable_list_agree_on_cabin_flags() {
    let store = InMemoryTableStore::new();
    store.insert_json(
        "pbx",
        json!([
            { "user": "pax", "inside_cabin": "Yes", "primary_cabin__rccl_": "3001",
              "online_status": "ONLINE", "cable_id": "P-1" },
            { "user": "pax", "inside_cabin": "Yes", "primary_cabin__rccl_": "3002",
              "online_status": "ONLINE", "cable_id": "P-2" },
            { "user": "pax", "inside_cabin": "no", "primary_cabin__rccl_": "3003",
              "online_status": "ONLINE", "cable_id": "P-3" },
        ]),
    );
    let aggregator = ServiceAggregator::new(Arc::new(store));

    let status = aggregator.status(SourceTable::Pbx).await;
    assert_eq!(status.total.pax, 3);
    assert_eq!(status.total.cabin_pax, 2);

    let cabin = aggregator.cable_list(&[SourceTable::Pbx], Area::Cabin).await;
    assert_eq!(cabin.len() as u64, status.total.cabin_pax);
    let public = aggregator.cable_list(&[SourceTable::Pbx], Area::Public).await;
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].record.cable_id, "P-3");
}

#[test]
fn systems_parameter_parsing() {
    assert_eq!(
        parse_systems(None).expect("all systems").len(),
        SourceTable::ALL.len()
    );
    assert_eq!(
        parse_systems(Some("wifi, tv,wifi")).expect("systems"),
        vec![SourceTable::Wifi, SourceTable::Tv]
    );
    assert!(matches!(
        parse_systems(Some("wifi,radar")),
        Err(AggregateError::UnknownSystem(name)) if name == "radar"
    ));
}
