//! Ranking config loaded from JSON files.

use std::io::Write;

use super::common::{ids, search_both, make_item};
use shelfsort::{Engine, Error, RankingConfig, SearchRequest};
use tempfile::NamedTempFile;

fn write_config(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_partial_config_keeps_defaults() {
    let file = write_config(r#"{"penalty": {"amount": 5}}"#);
    let config = RankingConfig::from_path(file.path()).unwrap();
    assert_eq!(config.penalty.amount, 5);
    assert!(config.penalty.enabled);
    assert_eq!(config.penalty.keyword, "universal");
    assert_eq!(config.relevance_weights, RankingConfig::default().relevance_weights);
}

#[test]
fn test_config_changes_ranking() {
    let items = vec![make_item(1, "Alpha Universal Lamp"), make_item(2, "Beta Lamp")];
    let default_order = ids(&search_both(&Engine::default(), SearchRequest::new("lamp"), &items));
    assert_eq!(default_order, vec![2, 1]);

    let file = write_config(r#"{"penalty": {"enabled": false}}"#);
    let engine = Engine::new(RankingConfig::from_path(file.path()).unwrap());
    assert_eq!(ids(&search_both(&engine, SearchRequest::new("lamp"), &items)), vec![1, 2]);
}

#[test]
fn test_in_scope_types_from_config() {
    let items = vec![
        make_item(1, "Lamp"),
        shelfsort::testing::make_item_of_type(2, "Lamp Guide", "post"),
    ];
    let file = write_config(r#"{"inScopeItemTypes": ["post"]}"#);
    let engine = Engine::new(RankingConfig::from_path(file.path()).unwrap());

    let results = search_both(&engine, SearchRequest::new("lamp").with_item_types(["post"]), &items);
    assert_eq!(ids(&results), vec![2]);
    assert!(results[0].score.is_some());

    let products = search_both(&engine, SearchRequest::new("lamp"), &items);
    assert!(products[0].score.is_none());
}

#[test]
fn test_invalid_configs_rejected() {
    let file = write_config(r#"{"penalty": {"keyword": "  "}}"#);
    assert!(matches!(
        RankingConfig::from_path(file.path()),
        Err(Error::InvalidConfig { .. })
    ));

    let file = write_config(r#"{"inScopeItemTypes": []}"#);
    assert!(matches!(
        RankingConfig::from_path(file.path()),
        Err(Error::InvalidConfig { .. })
    ));

    let file = write_config("{not json");
    let err = RankingConfig::from_path(file.path()).unwrap_err();
    assert!(matches!(err, Error::Json { .. }));
    assert!(err.to_string().contains("ranking config"));
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = RankingConfig::from_path(&path).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}
