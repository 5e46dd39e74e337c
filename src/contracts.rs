// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for tokens, score records and plans.
//!
//! Debug-mode assertions over the properties the ranking relies on. Zero
//! cost in release builds (`debug_assert!`), loud in tests.
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract                       | Property                                     |
//! |--------------------------------|----------------------------------------------|
//! | `check_tokens_unique`          | no token appears twice                       |
//! | `check_score_record`           | counters bounded by token count, flags agree |
//! | `check_plan_aliases_unique`    | no duplicate derived field or join alias     |
//! | `check_ranked_order`           | output respects the ordering chain           |
//!
//! # Usage
//!
//! ```ignore
//! use shelfsort::contracts::*;
//!
//! // In debug builds, this panics if the record is inconsistent
//! check_score_record(&record, tokens.len() as u32, &config);
//! ```

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::config::{self, RankingConfig};
use crate::plan::QueryPlan;
use crate::scoring::ranking::{compare_ranked, OrderStep};
use crate::types::{RankedItem, ScoreRecord};

// ============================================================================
// COMPILE-TIME ASSERTIONS (evaluated at build time)
// ============================================================================

/// Default weights keep title as the strongest field in both tables.
const _: () = {
    assert!(config::TOKEN_TITLE > config::TOKEN_SKU);
    assert!(config::TOKEN_SKU > config::TOKEN_ATTRIBUTES);
    assert!(config::TOKEN_ATTRIBUTES > config::TOKEN_CONTENT);
    assert!(config::TOKEN_CONTENT > config::TOKEN_PRICE);

    assert!(config::RELEVANCE_TITLE > config::RELEVANCE_PRICE);
    assert!(config::RELEVANCE_PRICE > config::RELEVANCE_CONTENT);
    assert!(config::RELEVANCE_CONTENT > config::RELEVANCE_ATTRIBUTES);
    assert!(config::RELEVANCE_ATTRIBUTES > config::RELEVANCE_SKU);

    // One stray catchword can never outweigh a title hit.
    assert!(config::PENALTY_AMOUNT < config::RELEVANCE_TITLE);
};

// ============================================================================
// TOKEN CONTRACTS
// ============================================================================

/// Check that no token repeats.
///
/// # Panics (debug builds only)
/// Panics on the first duplicate.
#[inline]
pub fn check_tokens_unique(tokens: &[String]) {
    let mut seen = HashSet::with_capacity(tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        debug_assert!(
            seen.insert(token.as_str()),
            "Contract violation: tokens[{}] '{}' is a duplicate",
            i,
            token
        );
    }
}

// ============================================================================
// SCORE CONTRACTS
// ============================================================================

/// Check that a score record is consistent with its token count.
///
/// ```text
/// field_hits ≤ overall_token_hits ≤ tokens
/// *_all_tokens ⇔ field_hits ≥ tokens  (tokens > 0)
/// token_score ≤ tokens × max(token weights)
/// relevance + penalty ≤ tokens × Σ(relevance weights)
/// penalty ∈ {0, amount}
/// title_exact_phrase ⇒ exact_match
/// ```
///
/// # Panics (debug builds only)
/// Panics if any of the above fails.
#[inline]
pub fn check_score_record(record: &ScoreRecord, tokens: u32, config: &RankingConfig) {
    for (name, hits) in [
        ("title_token_hits", record.title_token_hits),
        ("attr_token_hits", record.attr_token_hits),
        ("content_token_hits", record.content_token_hits),
    ] {
        debug_assert!(
            hits <= record.overall_token_hits,
            "Contract violation: {} {} > overall_token_hits {}",
            name,
            hits,
            record.overall_token_hits
        );
    }
    debug_assert!(
        record.overall_token_hits <= tokens,
        "Contract violation: overall_token_hits {} > tokens {}",
        record.overall_token_hits,
        tokens
    );

    if tokens > 0 {
        debug_assert_eq!(
            record.title_all_tokens,
            record.title_token_hits >= tokens,
            "Contract violation: title_all_tokens disagrees with title_token_hits"
        );
        debug_assert_eq!(
            record.attr_all_tokens,
            record.attr_token_hits >= tokens,
            "Contract violation: attr_all_tokens disagrees with attr_token_hits"
        );
        debug_assert_eq!(
            record.content_all_tokens,
            record.content_token_hits >= tokens,
            "Contract violation: content_all_tokens disagrees with content_token_hits"
        );
    }

    let max_token_score = i64::from(tokens) * i64::from(config.token_weights.max());
    debug_assert!(
        (0..=max_token_score).contains(&record.token_score),
        "Contract violation: token_score {} outside 0..={}",
        record.token_score,
        max_token_score
    );

    let max_relevance = i64::from(tokens) * config.relevance_weights.total() as i64;
    debug_assert!(
        record.relevance + record.universal_penalty <= max_relevance,
        "Contract violation: relevance {} + penalty {} > {}",
        record.relevance,
        record.universal_penalty,
        max_relevance
    );

    debug_assert!(
        record.universal_penalty == 0 || record.universal_penalty == config.penalty_amount(),
        "Contract violation: universal_penalty {} is neither 0 nor {}",
        record.universal_penalty,
        config.penalty_amount()
    );

    debug_assert!(
        !record.title_exact_phrase || record.exact_match,
        "Contract violation: title_exact_phrase without exact_match"
    );
}

// ============================================================================
// PLAN CONTRACTS
// ============================================================================

/// Check that a plan carries each field and join alias at most once.
///
/// # Panics (debug builds only)
/// Panics on the first repeated alias.
#[inline]
pub fn check_plan_aliases_unique(plan: &QueryPlan) {
    let mut fields = HashSet::new();
    for field in &plan.fields {
        debug_assert!(
            fields.insert(field.alias.as_str()),
            "Contract violation: derived field '{}' emitted twice",
            field.alias
        );
    }
    let mut joins = HashSet::new();
    for join in &plan.joins {
        debug_assert!(
            joins.insert(join.alias.as_str()),
            "Contract violation: join '{}' emitted twice",
            join.alias
        );
    }
}

// ============================================================================
// RANKING CONTRACTS
// ============================================================================

/// Check that ranked output is sorted along its chain.
///
/// # Panics (debug builds only)
/// Panics if any adjacent pair is out of order.
#[inline]
pub fn check_ranked_order(items: &[RankedItem], chain: &[OrderStep]) {
    for i in 1..items.len() {
        debug_assert!(
            compare_ranked(&items[i - 1], &items[i], chain) != Ordering::Greater,
            "Contract violation: ranked[{}] (id {}) sorts after ranked[{}] (id {})",
            i - 1,
            items[i - 1].item.id,
            i,
            items[i].item.id
        );
    }
}
