// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! SQL rendering under hostile phrases.
//!
//! Phrases end up inside string literals. Whatever the shopper types, every
//! quote must come out doubled so the literal never terminates early.

#![no_main]

use libfuzzer_sys::fuzz_target;
use shelfsort::{Engine, SearchRequest, SideTables, SqlRenderer};

/// Single quotes outside literals must pair up; an odd count means a literal
/// was left open.
fn quotes_balanced(sql: &str) -> bool {
    sql.matches('\'').count() % 2 == 0
}

fuzz_target!(|phrase: &str| {
    if phrase.len() > 256 {
        return;
    }
    let engine = Engine::default();
    let query = engine.prepare(SearchRequest::new(phrase).with_seed(1));
    let plan = engine.plan(&query, SideTables::NONE);
    let sql = SqlRenderer::default().render(&plan);

    // INVARIANT 1: every literal is closed
    for clause in [&sql.fields, &sql.filter, &sql.join, &sql.orderby] {
        assert!(quotes_balanced(clause), "unbalanced quotes in {clause}");
    }

    // INVARIANT 2: a search phrase always yields a filter and a relevance field
    if query.is_search_active() {
        assert!(!sql.filter.is_empty());
        assert!(sql.fields.contains(" AS relevance"));
    }
});
