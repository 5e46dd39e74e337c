//! Relevance ordering over the sample catalog.

use super::common::{ids, make_full_item, search_both, search_sample};
use shelfsort::{Engine, SearchRequest};

// ============================================================================
// END TO END
// ============================================================================

#[test]
fn test_blue_shirt_ordering() {
    let results = search_sample(SearchRequest::new("blue shirt"));

    // 1 and 4 carry the whole phrase in the title; 4 also carries the
    // catchword and has fewer field hits. 2 has both tokens out of order.
    // 3 has both tokens in its description, 5 only one.
    assert_eq!(ids(&results), vec![1, 4, 2, 3, 5]);

    let top = results[0].score.unwrap();
    assert!(top.title_exact_phrase);
    assert!(top.exact_match);
    assert!(top.title_ordered_phrase);
    assert_eq!(top.overall_token_hits, 2);

    let universal = results[1].score.unwrap();
    assert_eq!(universal.universal_penalty, 20);
    assert!(universal.relevance < top.relevance);
}

#[test]
fn test_phrase_case_and_duplicates_do_not_matter() {
    let base = ids(&search_sample(SearchRequest::new("blue shirt")));
    assert_eq!(ids(&search_sample(SearchRequest::new("BLUE Shirt"))), base);
    assert_eq!(ids(&search_sample(SearchRequest::new("blue blue shirt shirt"))), base);
}

#[test]
fn test_sku_fragment_matches() {
    let results = search_sample(SearchRequest::new("SH-00"));
    // Equal relevance ties on title; the catchword item drops to the end.
    assert_eq!(ids(&results), vec![1, 3, 2, 4]);
    for ranked in &results {
        let score = ranked.score.unwrap();
        assert_eq!(score.title_token_hits, 0);
        assert_eq!(score.overall_token_hits, 1);
    }
}

#[test]
fn test_price_token_matches_with_and_without_currency() {
    for phrase in ["19.99", "$19.99"] {
        let results = search_sample(SearchRequest::new(phrase));
        assert_eq!(ids(&results), vec![1], "{phrase}");
        let score = results[0].score.unwrap();
        assert_eq!(score.relevance, 90);
        assert_eq!(score.token_score, 4);
    }
}

#[test]
fn test_empty_phrase_passes_through_unscored() {
    let results = search_sample(SearchRequest::new("   "));
    assert_eq!(ids(&results), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    assert!(results.iter().all(|r| r.score.is_none()));

    let limited = search_sample(SearchRequest::new("").with_limit(3));
    assert_eq!(ids(&limited), vec![1, 2, 3]);
}

#[test]
fn test_no_matches() {
    assert!(search_sample(SearchRequest::new("blue zeppelin")).is_empty());
}

// ============================================================================
// SIGNAL PRECEDENCE
// ============================================================================

#[test]
fn test_title_coverage_beats_more_field_hits() {
    let items = vec![
        make_full_item(1, "Cotton", "cotton tee, crew neck", "tee cotton", "TEE-1", None),
        make_full_item(2, "Cotton Tee", "", "", "", None),
    ];
    let results = search_both(&Engine::default(), SearchRequest::new("tee cotton"), &items);
    assert_eq!(ids(&results), vec![2, 1]);
    assert!(results[1].score.unwrap().relevance > results[0].score.unwrap().relevance);
}

#[test]
fn test_ordered_title_beats_unordered_title() {
    let items = vec![
        make_full_item(1, "Scarf in Red Wool", "", "", "", None),
        make_full_item(2, "Red Wool Scarf", "", "", "", None),
    ];
    let results = search_both(&Engine::default(), SearchRequest::new("red scarf"), &items);
    assert_eq!(ids(&results), vec![2, 1]);
    assert!(results[0].score.unwrap().title_ordered_phrase);
    assert!(!results[1].score.unwrap().title_exact_phrase);
}

#[test]
fn test_relevance_breaks_ties_before_title() {
    let items = vec![
        make_full_item(1, "A Lamp", "", "", "", None),
        make_full_item(2, "Z Lamp", "", "", "LAMP-2", None),
    ];
    let results = search_both(&Engine::default(), SearchRequest::new("lamp"), &items);
    assert_eq!(ids(&results), vec![2, 1]);
}

#[test]
fn test_full_ties_fall_back_to_title_then_id() {
    let items = vec![
        make_full_item(9, "Mug", "", "", "", None),
        make_full_item(4, "Mug", "", "", "", None),
        make_full_item(5, "Big Mug", "", "", "", None),
    ];
    let results = search_both(&Engine::default(), SearchRequest::new("mug"), &items);
    assert_eq!(ids(&results), vec![5, 4, 9]);
}
