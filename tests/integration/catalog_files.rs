//! Catalogs loaded from JSON files.

use std::fs;

use super::common::{ids, FIXTURE_CATALOG};
use shelfsort::{Engine, MemoryStore, SearchRequest};

#[test]
fn test_fixture_catalog_search() {
    let store = MemoryStore::from_path(FIXTURE_CATALOG.as_ref()).unwrap();
    assert_eq!(store.len(), 5);

    let engine = Engine::default();
    let query = engine.prepare(SearchRequest::new("blue shirt"));
    let results = engine.search(&query, &store).unwrap();
    assert_eq!(ids(&results), vec![1, 3, 2]);
    assert_eq!(results, engine.rank(&query, store.items()));
}

#[test]
fn test_fixture_catalog_price_sort() {
    let store = MemoryStore::from_path(FIXTURE_CATALOG.as_ref()).unwrap();
    let engine = Engine::default();
    let query = engine.prepare(SearchRequest::new("shirt").with_orderby("price"));
    assert_eq!(ids(&engine.search(&query, &store).unwrap()), vec![3, 1, 2]);
}

#[test]
fn test_catalog_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    let items = shelfsort::testing::sample_catalog();
    fs::write(&path, serde_json::to_string(&items).unwrap()).unwrap();

    let store = MemoryStore::from_path(&path).unwrap();
    assert_eq!(store.items(), items.as_slice());
}

#[test]
fn test_bad_catalog_reports_context() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(&path, r#"[{"id": "one"}]"#).unwrap();
    let err = MemoryStore::from_path(&path).unwrap_err();
    assert!(err.to_string().contains("catalog"));
}
