//! Explicit and ambient sort modes, end to end.
//!
//! Sample catalog facts these tests lean on (ids 1-8):
//! - popularity: 2=10, 3=20, 5=40, 6=50, 8=70, others missing
//! - rating: 1=1, 3=3, 4=4, 5=5, 7=2, 8=3, others missing
//! - created and menu order both follow the id (newest and lowest last)

use super::common::{ids, search_sample};
use shelfsort::{AmbientOrder, OrderByValue, SearchRequest};

fn ambient(orderby: &str, meta_key: Option<&str>, order: Option<&str>) -> AmbientOrder {
    AmbientOrder {
        orderby: Some(OrderByValue::from(orderby)),
        meta_key: meta_key.map(str::to_string),
        order: order.map(str::to_string),
    }
}

fn shirts(orderby: &str) -> Vec<u64> {
    ids(&search_sample(SearchRequest::new("shirt").with_orderby(orderby)))
}

// ============================================================================
// EXPLICIT MODES
// ============================================================================

#[test]
fn test_price_ascending_and_descending() {
    assert_eq!(shirts("price"), vec![3, 1, 2, 4, 5]);
    assert_eq!(shirts("price-desc"), vec![4, 2, 1, 3, 5]);
}

#[test]
fn test_popularity_missing_values_last() {
    // 1 and 4 have no sales; relevance orders them.
    assert_eq!(shirts("popularity"), vec![5, 3, 2, 1, 4]);
}

#[test]
fn test_rating_missing_values_last() {
    assert_eq!(shirts("rating"), vec![5, 4, 3, 1, 2]);
}

#[test]
fn test_date_and_menu_order() {
    assert_eq!(shirts("date"), vec![5, 4, 3, 2, 1]);
    assert_eq!(shirts("menu_order"), vec![5, 4, 3, 2, 1]);
}

#[test]
fn test_sort_without_phrase_orders_whole_scope() {
    let results = search_sample(SearchRequest::new("").with_orderby("price"));
    assert_eq!(ids(&results), vec![6, 3, 1, 2, 4, 7, 8, 5]);
    assert!(results.iter().all(|r| r.score.is_none()));
}

#[test]
fn test_sorted_results_keep_scores() {
    let results = search_sample(SearchRequest::new("shirt").with_orderby("price"));
    assert!(results.iter().all(|r| r.score.is_some()));
}

#[test]
fn test_random_is_stable_per_seed() {
    let run = |seed: u64| {
        ids(&search_sample(
            SearchRequest::new("shirt").with_orderby("rand").with_seed(seed),
        ))
    };
    let first = run(11);
    assert_eq!(first, run(11));

    let mut sorted = first.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
}

// ============================================================================
// AMBIENT ORDER-BY
// ============================================================================

#[test]
fn test_ambient_price_meta_value() {
    let request = SearchRequest::new("shirt").with_ambient(ambient(
        "meta_value_num",
        Some("_price"),
        Some("DESC"),
    ));
    assert_eq!(ids(&search_sample(request)), vec![4, 2, 1, 3, 5]);
}

#[test]
fn test_ambient_token_list() {
    let request = SearchRequest::new("shirt").with_ambient(ambient("menu_order title", None, None));
    assert_eq!(ids(&search_sample(request)), vec![5, 4, 3, 2, 1]);
}

#[test]
fn test_explicit_beats_ambient() {
    let request = SearchRequest::new("shirt")
        .with_orderby("rating")
        .with_ambient(ambient("price", None, None));
    assert_eq!(ids(&search_sample(request)), vec![5, 4, 3, 1, 2]);
}

#[test]
fn test_explicit_direction_steers_ambient_price() {
    let request = SearchRequest::new("shirt")
        .with_orderby("desc")
        .with_ambient(ambient("price", None, None));
    assert_eq!(ids(&search_sample(request)), vec![4, 2, 1, 3, 5]);
}

#[test]
fn test_unknown_ambient_falls_back_to_relevance() {
    let relevance = ids(&search_sample(SearchRequest::new("shirt")));
    let request = SearchRequest::new("shirt").with_ambient(ambient("title", None, Some("ASC")));
    assert_eq!(ids(&search_sample(request)), relevance);
}

#[test]
fn test_bogus_directive_ranks_by_relevance() {
    let relevance = search_sample(SearchRequest::new("blue shirt"));
    let bogus = search_sample(SearchRequest::new("blue shirt").with_orderby("bogus_token"));
    assert_eq!(ids(&bogus), vec![1, 4, 2, 3, 5]);
    assert_eq!(ids(&bogus), ids(&relevance));
    assert!(bogus.iter().all(|r| r.score.is_some()));
}
