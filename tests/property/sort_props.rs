//! Sort resolution properties.

use super::*;
use shelfsort::{resolve, AmbientOrder, OrderByValue, RankingConfig, SortMode, SortOrigin};

fn sort_token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "price", "price-desc", "price_asc", "popularity", "rating", "menu_order", "title",
            "date", "rand", "meta_value_num", "meta_value", "ID", "desc", "ASC",
        ])
        .prop_map(str::to_string),
        string_regex("[a-z_.-]{0,8}").unwrap(),
    ]
}

fn ambient_strategy() -> impl Strategy<Value = AmbientOrder> {
    (
        prop::option::of(prop_oneof![
            sort_token_strategy().prop_map(OrderByValue::Text),
            prop::collection::vec(sort_token_strategy(), 0..4).prop_map(OrderByValue::List),
        ]),
        prop::option::of(prop::sample::select(vec![
            "_price",
            "_wc_average_rating",
            "total_sales",
            "_sku",
            "",
        ])),
        prop::option::of(prop::sample::select(vec!["asc", "DESC", "sideways"])),
    )
        .prop_map(|(orderby, meta_key, order)| AmbientOrder {
            orderby,
            meta_key: meta_key.map(str::to_string),
            order: order.map(str::to_string),
        })
}

proptest! {
    /// Resolution never fails and is a pure function of its inputs.
    #[test]
    fn prop_resolution_is_deterministic(
        explicit in prop::option::of(sort_token_strategy()),
        ambient in ambient_strategy(),
    ) {
        let config = RankingConfig::default();
        let first = resolve(explicit.as_deref(), &ambient, &config);
        let second = resolve(explicit.as_deref(), &ambient, &config);
        prop_assert_eq!(first, second);
    }

    /// A recognized explicit directive always wins over ambient state.
    #[test]
    fn prop_recognized_explicit_wins(
        explicit in prop::sample::select(vec![
            ("price", SortMode::PriceAsc),
            ("PRICE-DESC", SortMode::PriceDesc),
            ("popularity", SortMode::Popularity),
            ("Rating", SortMode::Rating),
            ("date", SortMode::Date),
            ("menu.order", SortMode::MenuOrder),
            ("rand", SortMode::Random),
            ("relevance", SortMode::Relevance),
        ]),
        ambient in ambient_strategy(),
    ) {
        let resolution = resolve(Some(explicit.0), &ambient, &RankingConfig::default());
        prop_assert_eq!(resolution.mode, explicit.1);
        prop_assert_eq!(resolution.origin, SortOrigin::Requested);
    }

    /// Only ambient resolution can pick the ambient origin, and a fallback
    /// is always relevance.
    #[test]
    fn prop_fallback_is_relevance(ambient in ambient_strategy()) {
        let resolution = resolve(None, &ambient, &RankingConfig::default());
        prop_assert_ne!(resolution.origin, SortOrigin::Requested);
        if resolution.origin == SortOrigin::Fallback {
            prop_assert_eq!(resolution.mode, SortMode::Relevance);
        }
        prop_assert!(resolution.tokens.iter().all(|t| t != "asc" && t != "desc"));
    }

    /// Without any order-by there is nothing to resolve.
    #[test]
    fn prop_empty_ambient_falls_back(meta_key in prop::option::of("[a-z_]{0,10}")) {
        let ambient = AmbientOrder { orderby: None, meta_key, order: None };
        let resolution = resolve(None, &ambient, &RankingConfig::default());
        prop_assert_eq!(resolution.mode, SortMode::Relevance);
        prop_assert_eq!(resolution.origin, SortOrigin::Fallback);
    }
}
