//! Rendered SQL for plans built through the engine.

use super::common::{ids, sample_catalog};
use shelfsort::plan::{Column, Expr};
use shelfsort::{
    Engine, ItemStore, MemoryStore, QueryPlan, RankingConfig, SearchRequest, SideTables, SqlClauses,
    SqlRenderer,
};

fn clauses(request: SearchRequest, side_tables: SideTables) -> SqlClauses {
    let engine = Engine::default();
    let query = engine.prepare(request.with_seed(5));
    SqlRenderer::default().render(&engine.plan(&query, side_tables))
}

#[test]
fn test_phrase_plan_clauses() {
    let sql = clauses(SearchRequest::new("blue shirt"), SideTables::NONE);

    assert_eq!(sql.scope, "wp_posts.post_type IN ('product')");
    assert!(sql.fields.contains(" AS relevance"));
    assert!(sql.fields.contains(" AS title_exact_phrase"));
    assert!(sql.filter.contains("'%blue%'"));
    assert!(sql.filter.contains("'%shirt%'"));
    assert!(sql.join.contains("AS shelf_price"));
    assert!(sql.join.contains("AS shelf_sku"));
    assert!(sql.join.contains("AS shelf_attr"));
    assert_eq!(sql.groupby, "wp_posts.ID");
    assert!(sql.orderby.starts_with("title_exact_phrase DESC, title_all_tokens DESC"));
    assert!(sql
        .orderby
        .ends_with("relevance DESC, token_score DESC, wp_posts.post_title ASC, wp_posts.ID ASC"));
}

#[test]
fn test_exposed_columns_need_no_joins() {
    let sql = clauses(SearchRequest::new("blue shirt"), SideTables::ALL);
    assert!(sql.join.is_empty());
    assert!(sql.filter.contains("wp_posts.sku"));
}

#[test]
fn test_price_sort_without_phrase() {
    let sql = clauses(SearchRequest::new("").with_orderby("price-desc"), SideTables::NONE);
    assert!(sql.fields.is_empty());
    assert!(sql.filter.is_empty());
    assert!(sql.join.contains("AS shelf_price"));
    assert!(!sql.join.contains("AS shelf_sku"));
    assert!(sql.orderby.starts_with("(CAST(NULLIF(REPLACE("));
    assert!(sql.orderby.contains("IS NULL) ASC"));
    assert!(sql.orderby.ends_with("wp_posts.post_title ASC, wp_posts.ID ASC"));
    assert!(!sql.orderby.contains("relevance"));
}

#[test]
fn test_random_sort_renders_seed() {
    let sql = clauses(SearchRequest::new("").with_orderby("rand"), SideTables::NONE);
    assert_eq!(sql.orderby, "RAND(5) ASC");
}

#[test]
fn test_passthrough_plan_is_bare() {
    let sql = clauses(SearchRequest::new(""), SideTables::NONE);
    assert!(sql.fields.is_empty());
    assert!(sql.join.is_empty());
    assert!(sql.filter.is_empty());
    assert!(sql.orderby.is_empty());
    assert!(sql.groupby.is_empty());
}

#[test]
fn test_quotes_and_wildcards_in_phrase() {
    let sql = clauses(SearchRequest::new("o'neil 100%"), SideTables::ALL);
    assert!(sql.filter.contains("'%o''neil%'"));
    assert!(sql.filter.contains(r"'%100\\%%'"));
}

#[test]
fn test_select_statement_assembles_clauses() {
    let renderer = SqlRenderer::default();
    let sql = clauses(SearchRequest::new("shirt").with_limit(5), SideTables::ALL);
    let select = sql.to_select(renderer.names());
    assert!(select.starts_with("SELECT wp_posts.*, "));
    assert!(select.contains(" FROM wp_posts WHERE wp_posts.post_type IN ('product') AND "));
    assert!(select.contains(" GROUP BY wp_posts.ID ORDER BY "));
    assert!(select.ends_with(" LIMIT 5"));
}

// ============================================================================
// HOST PLANS
// ============================================================================

#[test]
fn test_augment_is_idempotent() {
    let engine = Engine::default();
    let query = engine.prepare(SearchRequest::new("blue shirt").with_orderby("price"));
    let mut plan = QueryPlan::new(["product"]);
    engine.augment(&query, &mut plan, SideTables::NONE);
    let once = plan.clone();
    engine.augment(&query, &mut plan, SideTables::NONE);
    assert_eq!(plan, once);
    assert!(plan.is_augmented());
}

#[test]
fn test_host_filter_narrows_or_widens() {
    let store = MemoryStore::new(sample_catalog());
    let host = Expr::contains(Column::Title, "red");

    // AND: shirts with "red" in the title. OR: shirts plus anything red.
    for (combine_host_filter, expected) in [(false, vec![3]), (true, vec![1, 2, 3, 4, 5, 8])] {
        let engine = Engine::new(RankingConfig {
            combine_host_filter,
            ..RankingConfig::default()
        });
        let query = engine.prepare(SearchRequest::new("shirt"));
        let mut plan = QueryPlan::new(["product"]).with_host_filter(host.clone());
        engine.augment(&query, &mut plan, store.side_tables());

        let mut got = ids(&store.execute(&plan).unwrap());
        got.sort_unstable();
        assert_eq!(got, expected, "combine_host_filter={combine_host_filter}");
    }
}
