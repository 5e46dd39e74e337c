//! The shelfsort binary, end to end.

use std::process::{Command, Output};

use super::common::FIXTURE_CATALOG;

fn shelfsort(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shelfsort"))
        .args(args)
        .env("NO_COLOR", "1")
        .env("SHELFSORT_LOG", "off")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_search_json_output() {
    let output = shelfsort(&["search", "--catalog", FIXTURE_CATALOG, "--phrase", "blue shirt", "--json"]);
    assert!(output.status.success());

    let results: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let ids: Vec<u64> = results
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["item"]["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3, 2]);
    assert_eq!(results[1]["score"]["universal_penalty"], 20);
}

#[test]
fn test_search_table_output() {
    let output = shelfsort(&[
        "search", "--catalog", FIXTURE_CATALOG, "--phrase", "shirt", "--orderby", "price", "--explain",
    ]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("[price_asc]"));
    assert!(text.contains("Universal Blue Shirt"));
    assert!(text.contains("penalty 20"));
}

#[test]
fn test_plan_select() {
    let output = shelfsort(&["plan", "--phrase", "blue", "--orderby", "rand", "--seed", "3", "--select"]);
    assert!(output.status.success());
    let sql = stdout(&output);
    assert!(sql.starts_with("SELECT wp_posts.*"));
    assert!(sql.contains("ORDER BY RAND(3) ASC"));
    assert!(sql.contains("LEFT JOIN wp_postmeta AS shelf_price"));
}

#[test]
fn test_plan_with_exposed_columns() {
    let output = shelfsort(&[
        "plan", "--phrase", "blue", "--exposed", "price", "--exposed", "sku", "--exposed", "attributes",
        "--select",
    ]);
    assert!(output.status.success());
    assert!(!stdout(&output).contains("LEFT JOIN"));
}

#[test]
fn test_resolve_ambient_json_map() {
    let output = shelfsort(&[
        "resolve",
        "--ambient-orderby",
        r#"{"meta_value_num": "DESC"}"#,
        "--meta-key",
        "_price",
    ]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("[price_desc]"));
    assert!(text.contains("ambient order-by"));
}

#[test]
fn test_missing_catalog_fails() {
    let output = shelfsort(&["search", "--catalog", "does/not/exist.json", "--phrase", "x"]);
    assert_eq!(output.status.code(), Some(1));
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("loading catalog"));
}

#[test]
fn test_bad_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"inScopeItemTypes": []}"#).unwrap();
    let output = shelfsort(&["--config", path.to_str().unwrap(), "resolve"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid ranking config"));
}
