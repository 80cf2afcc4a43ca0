use async_trait::async_trait;
use domain::RawRecord;
use serde_json::json;
use shipnet_storage::{
    Filter, InMemoryTableStore, PaginationConfig, RowQuery, StopReason, StorageError, TableStore,
    fetch_all, fetch_table,
};

fn rows(count: usize) -> Vec<RawRecord> {
    (0..count)
        .map(|id| {
            json!({ "id": id, "user": if id % 2 == 0 { "crew" } else { "pax" } })
                .as_object()
                .cloned()
                .unwrap_or_default()
        })
        .collect()
}

#[tokio::test]
async fn table_of_2500_rows_takes_three_pages() {
    let store = InMemoryTableStore::new();
    store.insert_rows("wifi", rows(2500));

    let outcome = fetch_table(&store, "wifi", &PaginationConfig::default()).await;
    assert_eq!(outcome.rows.len(), 2500);
    assert_eq!(outcome.pages, 3);
    assert_eq!(store.fetch_calls("wifi"), 3);
    assert_eq!(outcome.stop, StopReason::ShortPage);
    assert!(outcome.is_complete());
}

#[tokio::test]
async fn table_of_exactly_one_page_stops_on_empty_page() {
    let store = InMemoryTableStore::new();
    store.insert_rows("pbx", rows(1000));

    let outcome = fetch_table(&store, "pbx", &PaginationConfig::default()).await;
    assert_eq!(outcome.rows.len(), 1000);
    assert_eq!(store.fetch_calls("pbx"), 2);
    assert_eq!(outcome.stop, StopReason::Empty);
}

#[tokio::test]
async fn empty_table_takes_one_request() {
    let store = InMemoryTableStore::new();
    let outcome = fetch_table(&store, "tv", &PaginationConfig::default()).await;
    assert!(outcome.rows.is_empty());
    assert_eq!(outcome.pages, 1);
    assert_eq!(outcome.stop, StopReason::Empty);
}

struct EndlessStore;

#[async_trait]
impl TableStore for EndlessStore {
    async fn count(&self, _table: &str, _filters: &[Filter]) -> Result<u64, StorageError> {
        Ok(0)
    }

    async fn fetch_range(
        &self,
        _query: &RowQuery,
        _offset: usize,
        limit: usize,
    ) -> Result<Vec<RawRecord>, StorageError> {
        Ok(rows(limit))
    }
}

#[tokio::test]
async fn misbehaving_backend_stops_at_page_limit() {
    let outcome = fetch_table(&EndlessStore, "wifi", &PaginationConfig::default()).await;
    assert_eq!(outcome.pages, 20);
    assert_eq!(outcome.rows.len(), 20_000);
    assert_eq!(outcome.stop, StopReason::PageLimit);
    assert!(!outcome.is_complete());
}

#[tokio::test]
async fn failed_page_returns_partial_rows() {
    let store = InMemoryTableStore::new();
    store.insert_rows("tv", rows(2500));
    store.fail_fetch_at("tv", 1000);

    let outcome = fetch_table(&store, "tv", &PaginationConfig::default()).await;
    assert_eq!(outcome.rows.len(), 1000);
    assert_eq!(outcome.pages, 2);
    assert!(matches!(outcome.stop, StopReason::Failed(_)));
}

#[tokio::test]
async fn refetch_yields_identical_rows() {
    let store = InMemoryTableStore::new();
    store.insert_rows("wifi", rows(2345));
    let config = PaginationConfig::new(400, 20);

    let first = fetch_table(&store, "wifi", &config).await;
    let second = fetch_table(&store, "wifi", &config).await;
    assert_eq!(first.rows.len(), 2345);
    assert_eq!(first.pages, 6);
    assert_eq!(first.rows, second.rows);
}

#[tokio::test]
async fn filters_and_projection_apply_to_every_page() {
    let store = InMemoryTableStore::new();
    store.insert_rows("wifi", rows(2500));
    let query = RowQuery::new("wifi")
        .select(["id"])
        .filter(Filter::contains("user", "CREW"));

    let outcome = fetch_all(&store, &query, &PaginationConfig::default()).await;
    assert_eq!(outcome.rows.len(), 1250);
    assert!(outcome.rows.iter().all(|row| row.len() == 1 && row.contains_key("id")));
}

#[test]
fn oversized_page_size_is_clamped_to_store_cap() {
    let config = PaginationConfig::new(5000, 0);
    assert_eq!(config.page_size, 1000);
    assert_eq!(config.max_pages, 1);
}
