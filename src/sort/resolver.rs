// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sort mode resolution.
//!
//! One decision per query:
//!
//! ```text
//! explicit directive ──table──▶ Requested
//!        │ unrecognized token
//!        ▼
//! ambient order-by ──precedence──▶ Ambient
//!        │ nothing matched
//!        ▼
//! Fallback: relevance (a phrase exists) or the store's own order
//! ```

use serde::Serialize;

use super::orderby::{parse_ambient, AmbientOrder, AmbientTokens};
use crate::config::RankingConfig;
use crate::scoring::ranking::{order_chain, OrderStep};
use crate::types::{Direction, SortMode};
use crate::utils::normalize_sort_key;

/// Where the resolved mode came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrigin {
    /// The request named a mode.
    Requested,
    /// The host's ambient order-by matched the precedence table.
    Ambient,
    /// Nothing matched.
    Fallback,
}

/// The outcome of sort resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortResolution {
    pub mode: SortMode,
    pub origin: SortOrigin,
    /// Derived direction, if any entry or hint gave one.
    pub direction: Option<Direction>,
    /// Normalized ambient token set, unrecognized directive included.
    pub tokens: Vec<String>,
}

impl SortResolution {
    /// No phrase and nothing to sort by: leave the store's order alone.
    pub fn is_passthrough(&self, scored: bool) -> bool {
        self.mode == SortMode::Relevance && !scored
    }

    /// Ordering chain for this resolution.
    pub fn chain(&self, scored: bool, random_seed: u64) -> Vec<OrderStep> {
        order_chain(self.mode, scored, random_seed)
    }
}

/// Map an explicit directive through the fixed table.
///
/// Input must already be normalized.
pub fn explicit_mode(token: &str) -> Option<SortMode> {
    match token {
        "price" | "price_asc" => Some(SortMode::PriceAsc),
        "price_desc" => Some(SortMode::PriceDesc),
        "popularity" => Some(SortMode::Popularity),
        "rating" => Some(SortMode::Rating),
        "date" => Some(SortMode::Date),
        "menu_order" => Some(SortMode::MenuOrder),
        "rand" | "random" => Some(SortMode::Random),
        "relevance" => Some(SortMode::Relevance),
        _ => None,
    }
}

fn meta_key_is(parsed: &AmbientTokens, key: &str) -> bool {
    parsed.meta_key.as_deref() == Some(key)
}

/// Ambient precedence. First match wins.
pub fn ambient_mode(parsed: &AmbientTokens, config: &RankingConfig) -> Option<SortMode> {
    let desc = parsed.direction == Some(Direction::Desc);
    let keys = &config.meta_keys;

    if parsed.contains("price_desc") {
        return Some(SortMode::PriceDesc);
    }
    if parsed.contains("price_asc") {
        return Some(SortMode::PriceAsc);
    }
    if parsed.contains("price") {
        return Some(if desc {
            SortMode::PriceDesc
        } else {
            SortMode::PriceAsc
        });
    }
    if parsed.contains("popularity") {
        return Some(SortMode::Popularity);
    }
    if parsed.contains("rating") {
        return Some(SortMode::Rating);
    }
    if parsed.contains("menu_order") {
        return Some(SortMode::MenuOrder);
    }
    if meta_key_is(parsed, &keys.price) && parsed.contains_any(&config.numeric_sort_tokens) {
        return Some(SortMode::price(parsed.direction.unwrap_or_default()));
    }
    if meta_key_is(parsed, &keys.rating) && parsed.contains_any(&config.rating_sort_tokens) {
        return Some(SortMode::Rating);
    }
    if meta_key_is(parsed, &keys.popularity) && parsed.contains_any(&config.numeric_sort_tokens) {
        return Some(SortMode::Popularity);
    }
    None
}

/// Resolve the sort mode for one query.
///
/// `explicit` is the request's own directive. An unresolved sort comes back
/// as relevance with [`SortOrigin::Fallback`]; whether that ranks or passes
/// through depends on the phrase, see [`SortResolution::is_passthrough`].
pub fn resolve(
    explicit: Option<&str>,
    ambient: &AmbientOrder,
    config: &RankingConfig,
) -> SortResolution {
    let mut parsed = parse_ambient(ambient);
    let explicit = explicit.map(normalize_sort_key).filter(|t| !t.is_empty());

    if let Some(token) = explicit {
        if let Some(mode) = explicit_mode(&token) {
            return SortResolution {
                mode,
                origin: SortOrigin::Requested,
                direction: parsed.direction,
                tokens: parsed.tokens,
            };
        }
        match Direction::parse(&token) {
            Some(direction) => {
                parsed.direction.get_or_insert(direction);
            }
            None => parsed.insert(token, true),
        }
    }

    match ambient_mode(&parsed, config) {
        Some(mode) => SortResolution {
            mode,
            origin: SortOrigin::Ambient,
            direction: parsed.direction,
            tokens: parsed.tokens,
        },
        None => SortResolution {
            mode: SortMode::Relevance,
            origin: SortOrigin::Fallback,
            direction: parsed.direction,
            tokens: parsed.tokens,
        },
    }
}
