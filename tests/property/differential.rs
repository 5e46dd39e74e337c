//! Differential tests: plan path against direct ranking.
//!
//! `Engine::search` emits a plan and lets `MemoryStore` evaluate it;
//! `Engine::rank` scores items in place. They must return the same items in
//! the same order with the same score records for every request.

use super::*;
use shelfsort::plan::{SqlNames, SqlRenderer};
use shelfsort::{AmbientOrder, Engine, MemoryStore, OrderByValue, SearchRequest, SideTables};

fn request_strategy() -> impl Strategy<Value = SearchRequest> {
    (
        text_strategy(),
        orderby_strategy(),
        prop::option::of(prop::sample::select(vec![
            "price", "popularity", "meta_value_num", "menu_order", "title",
        ])),
        prop::option::of(prop::sample::select(vec!["_price", "total_sales"])),
        prop::option::of(0usize..6),
        prop::sample::select(vec![
            vec!["product"],
            vec!["product", "post"],
            vec!["post"],
            vec![],
        ]),
        any::<u64>(),
    )
        .prop_map(|(phrase, orderby, ambient, meta_key, limit, types, seed)| {
            let mut request = SearchRequest::new(phrase)
                .with_item_types(types)
                .with_seed(seed)
                .with_ambient(AmbientOrder {
                    orderby: ambient.map(OrderByValue::from),
                    meta_key: meta_key.map(str::to_string),
                    order: None,
                });
            request.orderby = orderby;
            request.limit = limit;
            request
        })
}

/// Drop later duplicates so both paths see the same catalog.
fn unique(items: Vec<SearchableItem>) -> Vec<SearchableItem> {
    MemoryStore::new(items).items().to_vec()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn prop_plan_matches_direct_rank(
        items in catalog_strategy(),
        request in request_strategy(),
    ) {
        let items = unique(items);
        let engine = Engine::default();
        let query = engine.prepare(request);
        let direct = engine.rank(&query, &items);
        let planned = engine.search(&query, &MemoryStore::new(items.clone())).unwrap();
        prop_assert_eq!(direct, planned);
    }

    /// Results are a subset of the scoped catalog and respect the limit.
    #[test]
    fn prop_results_are_scoped_and_limited(
        items in catalog_strategy(),
        request in request_strategy(),
    ) {
        let items = unique(items);
        let engine = Engine::default();
        let limit = request.limit;
        let types = request.item_types.clone();
        let query = engine.prepare(request);
        let results = engine.rank(&query, &items);

        if let Some(limit) = limit {
            prop_assert!(results.len() <= limit);
        }
        for ranked in &results {
            prop_assert!(items.contains(&ranked.item));
            prop_assert!(types.is_empty() || types.contains(&ranked.item.item_type));
            prop_assert_eq!(ranked.score.is_some(), query.is_search_active());
        }
    }

    /// Rendering never panics and always names our aliases when searching.
    #[test]
    fn prop_rendered_sql_names_aliases(request in request_strategy()) {
        let engine = Engine::default();
        let query = engine.prepare(request);
        let plan = engine.plan(&query, SideTables::NONE);
        let sql = SqlRenderer::new(SqlNames::default()).render(&plan);
        if query.is_search_active() {
            prop_assert!(sql.fields.contains(" AS relevance"));
            prop_assert!(!sql.filter.is_empty());
            prop_assert_eq!(sql.groupby.as_str(), "wp_posts.ID");
        } else {
            prop_assert!(sql.fields.is_empty());
        }
    }
}
