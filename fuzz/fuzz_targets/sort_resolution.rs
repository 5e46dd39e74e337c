// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sort resolution under arbitrary host state.
//!
//! Order-by values come straight from query strings, so anything goes. The
//! resolver has to pick exactly one mode without panicking, deterministically.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shelfsort::{resolve, AmbientOrder, OrderByValue, RankingConfig, SortMode, SortOrigin};

#[derive(Arbitrary, Debug)]
enum RawOrderBy {
    Text(String),
    List(Vec<String>),
    Json(String),
}

#[derive(Arbitrary, Debug)]
struct Input {
    explicit: Option<String>,
    orderby: Option<RawOrderBy>,
    meta_key: Option<String>,
    order: Option<String>,
}

fuzz_target!(|input: Input| {
    let orderby = match input.orderby {
        Some(RawOrderBy::Text(text)) => Some(OrderByValue::Text(text)),
        Some(RawOrderBy::List(items)) => Some(OrderByValue::List(items)),
        Some(RawOrderBy::Json(json)) => serde_json::from_str(&json).ok(),
        None => None,
    };
    let ambient = AmbientOrder {
        orderby,
        meta_key: input.meta_key,
        order: input.order,
    };

    let config = RankingConfig::default();
    let first = resolve(input.explicit.as_deref(), &ambient, &config);
    let second = resolve(input.explicit.as_deref(), &ambient, &config);

    // INVARIANT 1: deterministic
    assert_eq!(first, second);

    // INVARIANT 2: fallback always means relevance
    if first.origin == SortOrigin::Fallback {
        assert_eq!(first.mode, SortMode::Relevance);
    }

    // INVARIANT 3: direction words never leak into the token set
    assert!(first.tokens.iter().all(|t| t != "asc" && t != "desc"));

    // INVARIANT 4: without an explicit directive the origin is never Requested
    if input.explicit.is_none() {
        assert_ne!(first.origin, SortOrigin::Requested);
    }
});
