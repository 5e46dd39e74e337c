// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how ranked items get sorted.
//!
//! The order is a chain of keys, each one only consulted when every key
//! before it ties. [`order_chain`] is the single definition of that chain per
//! sort mode. The in-memory ranker walks it with [`compare_ranked`], and the
//! plan emitter lowers the same chain into order-by expressions, so both
//! paths agree by construction.
//!
//! Chain shape for every mode:
//!
//! ```text
//! primary key(s)  →  relevance DESC (if scored)  →  title ASC  →  id ASC
//! ```
//!
//! `random` is the exception: one shuffled key, nothing after it.

use std::cmp::Ordering;

use crate::types::{Direction, RankedItem, ScoreRecord, SortMode};
use crate::utils::parse_price;

/// A score signal usable as an order key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    TitleExactPhrase,
    ExactMatch,
    TitleAllTokens,
    TitleOrderedPhrase,
    AttrAllTokens,
    ContentAllTokens,
    OverallTokenHits,
    Relevance,
    TokenScore,
}

impl Signal {
    /// Integer view of the signal (flags are 0/1).
    pub fn value(self, record: &ScoreRecord) -> i64 {
        match self {
            Signal::TitleExactPhrase => i64::from(record.title_exact_phrase),
            Signal::ExactMatch => i64::from(record.exact_match),
            Signal::TitleAllTokens => i64::from(record.title_all_tokens),
            Signal::TitleOrderedPhrase => i64::from(record.title_ordered_phrase),
            Signal::AttrAllTokens => i64::from(record.attr_all_tokens),
            Signal::ContentAllTokens => i64::from(record.content_all_tokens),
            Signal::OverallTokenHits => i64::from(record.overall_token_hits),
            Signal::Relevance => record.relevance,
            Signal::TokenScore => record.token_score,
        }
    }
}

/// One key of the ordering chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderTerm {
    Signal(Signal),
    /// Price cast to a number at sort time.
    Price,
    Popularity,
    Rating,
    Created,
    MenuOrder,
    Title,
    Id,
    Random { seed: u64 },
}

impl OrderTerm {
    /// Columns that can be missing sort after every present value.
    pub fn nulls_last(self) -> bool {
        matches!(
            self,
            OrderTerm::Price | OrderTerm::Popularity | OrderTerm::Rating | OrderTerm::Created
        )
    }
}

/// A key plus its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderStep {
    pub term: OrderTerm,
    pub direction: Direction,
}

impl OrderStep {
    pub fn asc(term: OrderTerm) -> Self {
        Self {
            term,
            direction: Direction::Asc,
        }
    }

    pub fn desc(term: OrderTerm) -> Self {
        Self {
            term,
            direction: Direction::Desc,
        }
    }
}

/// Relevance-mode primary keys, strongest first.
///
/// Whole phrase in the title beats everything; then full token coverage of
/// the title; then token order; then whole phrase anywhere; then coverage of
/// attributes and content; then raw breadth; then the two weighted scores.
pub const RELEVANCE_SIGNALS: [Signal; 9] = [
    Signal::TitleExactPhrase,
    Signal::TitleAllTokens,
    Signal::TitleOrderedPhrase,
    Signal::ExactMatch,
    Signal::AttrAllTokens,
    Signal::ContentAllTokens,
    Signal::OverallTokenHits,
    Signal::Relevance,
    Signal::TokenScore,
];

/// The ordering chain for a mode.
///
/// `scored` says whether score signals exist (the query had tokens). An
/// empty chain means "leave the store's default order alone"; that only
/// happens for relevance without a phrase.
pub fn order_chain(mode: SortMode, scored: bool, random_seed: u64) -> Vec<OrderStep> {
    let primary = match mode {
        SortMode::Relevance => {
            if !scored {
                return Vec::new();
            }
            RELEVANCE_SIGNALS
                .iter()
                .map(|s| OrderStep::desc(OrderTerm::Signal(*s)))
                .collect()
        }
        SortMode::Random => return vec![OrderStep::asc(OrderTerm::Random { seed: random_seed })],
        SortMode::PriceAsc => vec![OrderStep::asc(OrderTerm::Price)],
        SortMode::PriceDesc => vec![OrderStep::desc(OrderTerm::Price)],
        SortMode::Popularity => vec![OrderStep::desc(OrderTerm::Popularity)],
        SortMode::Rating => vec![OrderStep::desc(OrderTerm::Rating)],
        SortMode::Date => vec![OrderStep::desc(OrderTerm::Created)],
        SortMode::MenuOrder => vec![OrderStep::asc(OrderTerm::MenuOrder)],
    };

    let mut chain: Vec<OrderStep> = primary;
    let has_relevance = chain
        .iter()
        .any(|s| s.term == OrderTerm::Signal(Signal::Relevance));
    if scored && !has_relevance {
        chain.push(OrderStep::desc(OrderTerm::Signal(Signal::Relevance)));
    }
    chain.push(OrderStep::asc(OrderTerm::Title));
    chain.push(OrderStep::asc(OrderTerm::Id));
    chain
}

/// Shuffle key for random ordering. Same seed, same order.
pub fn random_key(id: u64, seed: u64) -> i64 {
    (xxhash_rust::xxh3::xxh3_64_with_seed(&id.to_le_bytes(), seed) >> 1) as i64
}

/// Title collation: case-insensitive first, raw bytes to break ties.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Compare optional values with missing ones last regardless of direction.
fn compare_nullable<T, F>(a: Option<T>, b: Option<T>, direction: Direction, cmp: F) -> Ordering
where
    F: Fn(&T, &T) -> Ordering,
{
    match (a, b) {
        (Some(x), Some(y)) => apply_direction(cmp(&x, &y), direction),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[inline]
fn apply_direction(ord: Ordering, direction: Direction) -> Ordering {
    match direction {
        Direction::Asc => ord,
        Direction::Desc => ord.reverse(),
    }
}

fn compare_step(a: &RankedItem, b: &RankedItem, step: &OrderStep) -> Ordering {
    let (x, y) = (&a.item, &b.item);
    match step.term {
        OrderTerm::Signal(signal) => {
            let va = a.score.as_ref().map_or(0, |r| signal.value(r));
            let vb = b.score.as_ref().map_or(0, |r| signal.value(r));
            apply_direction(va.cmp(&vb), step.direction)
        }
        OrderTerm::Price => compare_nullable(
            x.price.as_deref().and_then(parse_price),
            y.price.as_deref().and_then(parse_price),
            step.direction,
            |p, q| p.total_cmp(q),
        ),
        OrderTerm::Popularity => {
            compare_nullable(x.popularity, y.popularity, step.direction, Ord::cmp)
        }
        OrderTerm::Rating => {
            compare_nullable(x.rating, y.rating, step.direction, |p, q| p.total_cmp(q))
        }
        OrderTerm::Created => compare_nullable(x.created, y.created, step.direction, Ord::cmp),
        OrderTerm::MenuOrder => apply_direction(x.menu_order.cmp(&y.menu_order), step.direction),
        OrderTerm::Title => apply_direction(compare_text(&x.title, &y.title), step.direction),
        OrderTerm::Id => apply_direction(x.id.cmp(&y.id), step.direction),
        OrderTerm::Random { seed } => apply_direction(
            random_key(x.id.get(), seed).cmp(&random_key(y.id.get(), seed)),
            step.direction,
        ),
    }
}

/// Compare two ranked items along a chain.
///
/// An empty chain compares everything equal, so a stable sort keeps the
/// store's order.
pub fn compare_ranked(a: &RankedItem, b: &RankedItem, chain: &[OrderStep]) -> Ordering {
    chain
        .iter()
        .map(|step| compare_step(a, b, step))
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// Sort ranked items in place along a chain.
pub fn sort_ranked(items: &mut [RankedItem], chain: &[OrderStep]) {
    items.sort_by(|a, b| compare_ranked(a, b, chain));
}
