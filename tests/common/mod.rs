//! Shared test utilities and fixtures.

#![allow(dead_code)]

use shelfsort::{Engine, MemoryStore, RankedItem, SearchRequest, SearchableItem};

// Re-export canonical test utilities from shelfsort::testing
pub use shelfsort::testing::{make_full_item, make_item, make_priced_item, sample_catalog};

/// JSON catalog checked into the repo.
pub const FIXTURE_CATALOG: &str = "tests/fixtures/catalog.json";

/// Ids of a result list, in order.
pub fn ids(items: &[RankedItem]) -> Vec<u64> {
    items.iter().map(|r| r.item.id.get()).collect()
}

/// Titles of a result list, in order.
pub fn titles(items: &[RankedItem]) -> Vec<&str> {
    items.iter().map(|r| r.item.title.as_str()).collect()
}

/// Run a request both ways and insist they agree.
///
/// Returns the plan path's results.
pub fn search_both(engine: &Engine, request: SearchRequest, items: &[SearchableItem]) -> Vec<RankedItem> {
    let query = engine.prepare(request);
    let store = MemoryStore::new(items.to_vec());
    let planned = engine.search(&query, &store).unwrap();
    let direct = engine.rank(&query, items);
    assert_eq!(planned, direct, "plan path and direct ranking disagree");
    planned
}

/// Default-engine search over the sample catalog.
pub fn search_sample(request: SearchRequest) -> Vec<RankedItem> {
    search_both(&Engine::default(), request.with_seed(7), &sample_catalog())
}
