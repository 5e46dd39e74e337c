//! Catchword penalty behavior.

use super::common::{ids, make_full_item, search_both};
use shelfsort::{Engine, PenaltyConfig, RankingConfig, SearchRequest, SearchableItem};

fn chargers() -> Vec<SearchableItem> {
    vec![
        make_full_item(1, "Alpha Universal Charger", "", "", "", None),
        make_full_item(2, "Zeta Charger", "", "", "", None),
        make_full_item(3, "Mid Charger", "refurbished unit", "", "", None),
    ]
}

fn with_penalty(penalty: PenaltyConfig) -> Engine {
    let config = RankingConfig {
        penalty,
        ..RankingConfig::default()
    }
    .validated()
    .unwrap();
    Engine::new(config)
}

#[test]
fn test_penalty_demotes_unrequested_catchword() {
    let results = search_both(&Engine::default(), SearchRequest::new("charger"), &chargers());
    assert_eq!(ids(&results), vec![3, 2, 1]);
    assert_eq!(results[2].score.unwrap().universal_penalty, 20);
    assert_eq!(results[2].score.unwrap().relevance, 80);
}

#[test]
fn test_penalty_lifted_when_phrase_names_it() {
    let results = search_both(
        &Engine::default(),
        SearchRequest::new("Universal charger"),
        &chargers(),
    );
    assert_eq!(ids(&results), vec![1]);
    assert_eq!(results[0].score.unwrap().universal_penalty, 0);
}

#[test]
fn test_penalty_disabled() {
    let engine = with_penalty(PenaltyConfig {
        enabled: false,
        ..PenaltyConfig::default()
    });
    let results = search_both(&engine, SearchRequest::new("charger"), &chargers());
    assert_eq!(ids(&results), vec![1, 3, 2]);
    assert!(results.iter().all(|r| r.score.unwrap().universal_penalty == 0));
}

#[test]
fn test_custom_keyword_and_amount() {
    let engine = with_penalty(PenaltyConfig {
        enabled: true,
        keyword: " Refurbished ".to_string(),
        amount: 50,
    });
    let results = search_both(&engine, SearchRequest::new("charger"), &chargers());
    // Keyword lives in the description of 3.
    assert_eq!(ids(&results), vec![1, 2, 3]);
    assert_eq!(results[2].score.unwrap().universal_penalty, 50);
}

#[test]
fn test_mixed_case_keyword_without_validation() {
    let config = RankingConfig {
        penalty: PenaltyConfig {
            enabled: true,
            keyword: "Refurbished".to_string(),
            amount: 50,
        },
        ..RankingConfig::default()
    };
    let engine = Engine::new(config);
    let results = search_both(&engine, SearchRequest::new("charger"), &chargers());
    assert_eq!(ids(&results), vec![1, 2, 3]);
    assert_eq!(results[2].score.unwrap().universal_penalty, 50);

    let asked = search_both(&engine, SearchRequest::new("refurbished charger"), &chargers());
    assert_eq!(ids(&asked), vec![3]);
    assert_eq!(asked[0].score.unwrap().universal_penalty, 0);
}

#[test]
fn test_penalty_ignores_price_text() {
    let items = vec![make_full_item(1, "Cable", "", "", "", Some("universal"))];
    let results = search_both(&Engine::default(), SearchRequest::new("cable"), &items);
    assert_eq!(results[0].score.unwrap().universal_penalty, 0);
}
