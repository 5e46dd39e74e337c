// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Plan path against direct ranking on arbitrary catalogs.
//!
//! `Engine::search` builds a query plan and lets `MemoryStore` evaluate it.
//! `Engine::rank` scores in place. Any disagreement in membership, order or
//! score records is a bug in one of the two.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shelfsort::testing::make_full_item;
use shelfsort::{Engine, MemoryStore, SearchRequest, SearchableItem};

#[derive(Arbitrary, Debug)]
struct RawItem {
    id: u8,
    title: String,
    content: String,
    attributes: String,
    sku: String,
    price: Option<String>,
    popularity: Option<i16>,
    rating: Option<u8>,
    menu_order: i8,
    is_post: bool,
}

#[derive(Arbitrary, Debug)]
struct Input {
    phrase: String,
    orderby: Option<u8>,
    limit: Option<u8>,
    seed: u64,
    items: Vec<RawItem>,
}

const ORDERBY: &[&str] = &[
    "price", "price-desc", "popularity", "rating", "date", "menu_order", "rand", "relevance",
];

fn build(raw: &RawItem) -> SearchableItem {
    let mut item = make_full_item(
        u64::from(raw.id),
        &raw.title,
        &raw.content,
        &raw.attributes,
        &raw.sku,
        raw.price.as_deref(),
    );
    item.popularity = raw.popularity.map(i64::from);
    item.rating = raw.rating.map(|r| f64::from(r) / 10.0);
    item.menu_order = i64::from(raw.menu_order);
    item.created = Some(shelfsort::testing::day(i64::from(raw.id % 7)));
    if raw.is_post {
        item.item_type = "post".to_string();
    }
    item
}

fuzz_target!(|input: Input| {
    if input.items.len() > 64 || input.phrase.len() > 64 {
        return;
    }
    let store = MemoryStore::new(input.items.iter().map(build).collect());

    let mut request = SearchRequest::new(input.phrase).with_seed(input.seed);
    request.orderby = input
        .orderby
        .map(|i| ORDERBY[usize::from(i) % ORDERBY.len()].to_string());
    request.limit = input.limit.map(usize::from);

    let engine = Engine::default();
    let query = engine.prepare(request);
    let direct = engine.rank(&query, store.items());
    let planned = match engine.search(&query, &store) {
        Ok(items) => items,
        Err(never) => match never {},
    };

    // INVARIANT: both paths agree exactly
    assert_eq!(direct, planned);
});
