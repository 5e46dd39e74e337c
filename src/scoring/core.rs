// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind catalog ranking.
//!
//! Every item that survives the filter gets a [`ScoreRecord`]. All of it is
//! derived from one table: for each distinct token, which fields matched.
//!
//! ```text
//!            title  content  attrs  sku  price
//! "blue"       ✓                ✓
//! "shirt"      ✓       ✓
//! ```
//!
//! Rows feed the per-token scores, columns feed the hit counters.
//!
//! # Weights
//!
//! | Field      | relevance (summed) | token_score (max per token) |
//! |------------|--------------------|-----------------------------|
//! | Title      | 100                | 10                          |
//! | Price      | 90                 | 4                           |
//! | Content    | 80                 | 5                           |
//! | Attributes | 70                 | 6                           |
//! | SKU        | 60                 | 8                           |
//!
//! # Key Invariant: Per-token bound
//!
//! ```text
//! token_score ≤ tokens × max(token weights)
//! relevance + penalty ≤ tokens × Σ(relevance weights)
//! ```

use crate::config::{FieldWeights, RankingConfig};
use crate::matcher::{match_token, FieldMatches};
use crate::tokenize::Tokens;
use crate::types::{ScoreRecord, SearchableItem};
use crate::utils::{contains_folded, contains_in_order};

/// Match every token against every field of an item, in token order.
pub fn collect_matches(tokens: &Tokens, item: &SearchableItem) -> Vec<FieldMatches> {
    tokens.iter().map(|token| match_token(item, token)).collect()
}

/// AND across tokens, OR across fields.
///
/// Zero tokens is not "matches nothing": it means search is off and the
/// caller must not filter at all. This returns false so nobody relies on it.
pub fn passes_filter(matches: &[FieldMatches]) -> bool {
    !matches.is_empty() && matches.iter().all(FieldMatches::any)
}

/// Best single-field bonus for one token, floored at zero.
pub fn token_bonus(matches: &FieldMatches, weights: &FieldWeights) -> i64 {
    [
        (matches.title, weights.title),
        (matches.sku, weights.sku),
        (matches.attributes, weights.attributes),
        (matches.content, weights.content),
        (matches.price, weights.price),
    ]
    .into_iter()
    .map(|(hit, weight)| if hit { i64::from(weight) } else { 0 })
    .max()
    .unwrap_or(0)
    .max(0)
}

/// Additive relevance for one token: every matched field adds its weight.
pub fn token_relevance(matches: &FieldMatches, weights: &FieldWeights) -> i64 {
    [
        (matches.title, weights.title),
        (matches.price, weights.price),
        (matches.content, weights.content),
        (matches.attributes, weights.attributes),
        (matches.sku, weights.sku),
    ]
    .into_iter()
    .filter(|(hit, _)| *hit)
    .map(|(_, weight)| i64::from(weight))
    .sum()
}

/// The catchword penalty.
///
/// Applies when the shopper did not type the keyword but the item carries it
/// in title, content, attributes or SKU. Price is not consulted.
pub fn universal_penalty(phrase: &str, item: &SearchableItem, config: &RankingConfig) -> i64 {
    let amount = config.penalty_amount();
    let keyword = config.penalty_keyword();
    let keyword = keyword.as_str();
    if amount == 0 || keyword.is_empty() || phrase.to_lowercase().contains(keyword) {
        return 0;
    }
    let carries_keyword = contains_folded(&item.title, keyword)
        || contains_folded(&item.content, keyword)
        || contains_folded(&item.attributes, keyword)
        || contains_folded(&item.sku, keyword);
    if carries_keyword {
        amount
    } else {
        0
    }
}

/// Fold per-token matches into a score record.
///
/// `matches` must come from [`collect_matches`] for the same tokens and item.
pub fn aggregate(
    tokens: &Tokens,
    item: &SearchableItem,
    matches: &[FieldMatches],
    config: &RankingConfig,
) -> ScoreRecord {
    let total = tokens.len() as u32;
    let mut record = ScoreRecord::default();

    let mut raw_relevance = 0i64;
    for m in matches {
        record.title_token_hits += u32::from(m.title);
        record.attr_token_hits += u32::from(m.attributes);
        record.content_token_hits += u32::from(m.content);
        record.overall_token_hits += u32::from(m.any());
        record.token_score += token_bonus(m, &config.token_weights);
        raw_relevance += token_relevance(m, &config.relevance_weights);
    }

    if total > 0 {
        record.title_all_tokens = record.title_token_hits >= total;
        record.attr_all_tokens = record.attr_token_hits >= total;
        record.content_all_tokens = record.content_token_hits >= total;
        record.title_ordered_phrase = contains_in_order(&item.title, tokens.as_slice());

        let phrase = tokens.phrase();
        record.title_exact_phrase = contains_folded(&item.title, phrase);
        record.exact_match = record.title_exact_phrase || contains_folded(&item.content, phrase);
    }

    record.universal_penalty = universal_penalty(tokens.phrase(), item, config);
    record.relevance = raw_relevance - record.universal_penalty;

    crate::contracts::check_score_record(&record, total, config);
    record
}

/// Score one item, or `None` when there is nothing to score with.
///
/// This does not apply the filter; an item that fails it still gets a record.
pub fn score_item(
    tokens: &Tokens,
    item: &SearchableItem,
    config: &RankingConfig,
) -> Option<ScoreRecord> {
    if tokens.is_empty() {
        return None;
    }
    let matches = collect_matches(tokens, item);
    Some(aggregate(tokens, item, &matches, config))
}

/// Filter and score in one pass: `Some` only for items that pass the filter.
pub fn score_candidate(
    tokens: &Tokens,
    item: &SearchableItem,
    config: &RankingConfig,
) -> Option<ScoreRecord> {
    let matches = collect_matches(tokens, item);
    if !passes_filter(&matches) {
        return None;
    }
    Some(aggregate(tokens, item, &matches, config))
}
