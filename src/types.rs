// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a catalog search.
//!
//! These types describe what a catalog item looks like to the ranker, which
//! ordering modes exist, and what the ranker computes for each item.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **ScoreRecord**: every field is a pure function of (phrase, item, config).
//!   Nothing here is cached across requests.
//!
//! - **ScoreRecord**: `*_all_tokens` is true iff the matching hit counter is at
//!   least the distinct token count, and never true for zero tokens.
//!
//! - **SortMode**: exactly one mode is active per query.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// NEWTYPES
// =============================================================================

/// Catalog item identifier (the store's primary key).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        ItemId(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// ITEM TYPES
// =============================================================================

/// A catalog record as the ranker sees it.
///
/// Text fields that the store has no value for are empty strings; numeric
/// sort columns are `None`. Absence never excludes an item on its own, it
/// just means that field contributes no match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchableItem {
    pub id: ItemId,
    pub title: String,
    /// Description / body text.
    pub content: String,
    /// Attribute term names, space-joined (e.g. "blue cotton xl").
    pub attributes: String,
    pub sku: String,
    /// Price exactly as stored, e.g. "19.99". Not parsed for matching.
    pub price: Option<String>,
    /// Store-level type, e.g. "product". Out-of-scope types pass through.
    pub item_type: String,
    /// Total sales.
    pub popularity: Option<i64>,
    /// Average rating.
    pub rating: Option<f64>,
    pub created: Option<DateTime<Utc>>,
    pub menu_order: i64,
}

impl SearchableItem {
    /// Price text for matching; missing prices match as the empty string.
    #[inline]
    pub fn price_text(&self) -> &str {
        self.price.as_deref().unwrap_or("")
    }
}

/// The searchable text fields of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    Title,
    Content,
    Attributes,
    Sku,
    Price,
}

// =============================================================================
// SORTING
// =============================================================================

/// Ascending or descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// Parse "asc"/"desc" in any case. Anything else is not a direction.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Direction::Asc),
            "desc" => Some(Direction::Desc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// The single active ranking strategy for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    Popularity,
    Rating,
    Date,
    MenuOrder,
    Random,
}

impl SortMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Relevance => "relevance",
            SortMode::PriceAsc => "price_asc",
            SortMode::PriceDesc => "price_desc",
            SortMode::Popularity => "popularity",
            SortMode::Rating => "rating",
            SortMode::Date => "date",
            SortMode::MenuOrder => "menu_order",
            SortMode::Random => "random",
        }
    }

    /// Price mode for a direction.
    pub fn price(direction: Direction) -> Self {
        match direction {
            Direction::Asc => SortMode::PriceAsc,
            Direction::Desc => SortMode::PriceDesc,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// SCORING OUTPUT
// =============================================================================

/// Per-item ranking signals for one phrase.
///
/// Only exists when the phrase produced at least one token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Title contains the whole phrase.
    pub title_exact_phrase: bool,
    /// Title or content contains the whole phrase.
    pub exact_match: bool,
    pub title_token_hits: u32,
    pub attr_token_hits: u32,
    pub content_token_hits: u32,
    /// Tokens found in any field (title, content, attributes, SKU, price).
    pub overall_token_hits: u32,
    pub title_all_tokens: bool,
    pub attr_all_tokens: bool,
    pub content_all_tokens: bool,
    /// Title contains all tokens left to right.
    pub title_ordered_phrase: bool,
    /// Sum over tokens of the best single-field weight.
    pub token_score: i64,
    pub universal_penalty: i64,
    /// Sum over tokens of every matched field weight, minus the penalty.
    pub relevance: i64,
}

/// An item that survived filtering, with its signals when a phrase was active.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedItem {
    pub item: SearchableItem,
    pub score: Option<ScoreRecord>,
}
