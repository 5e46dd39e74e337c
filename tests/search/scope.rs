//! Item type scoping and passthrough.

use super::common::{ids, search_sample};
use shelfsort::SearchRequest;

#[test]
fn test_out_of_scope_types_pass_through() {
    let results = search_sample(SearchRequest::new("blue shirt").with_item_types(["post"]));
    assert_eq!(ids(&results), vec![100]);
    assert!(results[0].score.is_none());
}

#[test]
fn test_out_of_scope_ignores_sort() {
    let request = SearchRequest::new("")
        .with_item_types(Vec::<String>::new())
        .with_orderby("price");
    let results = search_sample(request);
    assert_eq!(ids(&results), vec![1, 2, 3, 4, 5, 6, 7, 8, 100]);
}

#[test]
fn test_mixed_types_rank_together() {
    let results = search_sample(SearchRequest::new("blue shirt").with_item_types(["product", "post"]));
    assert_eq!(ids(&results), vec![1, 4, 100, 2, 3, 5]);
}

#[test]
fn test_limit_applies_after_ranking() {
    let results = search_sample(SearchRequest::new("blue shirt").with_limit(2));
    assert_eq!(ids(&results), vec![1, 4]);
}
