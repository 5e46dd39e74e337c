// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query plan emission.
//!
//! Turns (tokens, sort mode) into the pieces the item store has to apply:
//! derived fields, the search filter, order keys, a group key and the side
//! table joins those pieces read from.
//!
//! **Invariant**: applying the same augmentation twice leaves the plan as it
//! was after the first time. Fields and joins are keyed by alias, the search
//! filter and order are replaced rather than appended.
//!
//! Derived fields never reference each other. MySQL cannot read a select
//! alias inside the same select list, so `title_all_tokens` repeats the
//! counter expression instead of pointing at `title_token_hits`. Order keys
//! do use aliases.

use std::collections::BTreeSet;

use crate::config::RankingConfig;
use crate::scoring::ranking::{OrderStep, OrderTerm, Signal};
use crate::tokenize::Tokens;
use crate::types::SearchField;

use super::expr::{Column, DerivedField, Expr, OrderKey};

/// Derived field aliases. Names match [`crate::ScoreRecord`] fields.
pub mod aliases {
    pub const TITLE_EXACT_PHRASE: &str = "title_exact_phrase";
    pub const EXACT_MATCH: &str = "exact_match";
    pub const TITLE_TOKEN_HITS: &str = "title_token_hits";
    pub const ATTR_TOKEN_HITS: &str = "attr_token_hits";
    pub const CONTENT_TOKEN_HITS: &str = "content_token_hits";
    pub const OVERALL_TOKEN_HITS: &str = "overall_token_hits";
    pub const TITLE_ALL_TOKENS: &str = "title_all_tokens";
    pub const ATTR_ALL_TOKENS: &str = "attr_all_tokens";
    pub const CONTENT_ALL_TOKENS: &str = "content_all_tokens";
    pub const TITLE_ORDERED_PHRASE: &str = "title_ordered_phrase";
    pub const TOKEN_SCORE: &str = "token_score";
    pub const UNIVERSAL_PENALTY: &str = "universal_penalty";
    pub const RELEVANCE: &str = "relevance";

    /// Join aliases.
    pub const JOIN_PRICE: &str = "shelf_price";
    pub const JOIN_SKU: &str = "shelf_sku";
    pub const JOIN_ATTRIBUTES: &str = "shelf_attr";
    pub const JOIN_POPULARITY: &str = "shelf_sales";
    pub const JOIN_RATING: &str = "shelf_rating";
}

/// Alias of the derived field behind a score signal.
pub fn signal_alias(signal: Signal) -> &'static str {
    match signal {
        Signal::TitleExactPhrase => aliases::TITLE_EXACT_PHRASE,
        Signal::ExactMatch => aliases::EXACT_MATCH,
        Signal::TitleAllTokens => aliases::TITLE_ALL_TOKENS,
        Signal::TitleOrderedPhrase => aliases::TITLE_ORDERED_PHRASE,
        Signal::AttrAllTokens => aliases::ATTR_ALL_TOKENS,
        Signal::ContentAllTokens => aliases::CONTENT_ALL_TOKENS,
        Signal::OverallTokenHits => aliases::OVERALL_TOKEN_HITS,
        Signal::Relevance => aliases::RELEVANCE,
        Signal::TokenScore => aliases::TOKEN_SCORE,
    }
}

// =============================================================================
// SIDE TABLES AND JOINS
// =============================================================================

/// Which side-table columns the store already exposes on the item row.
///
/// Exposed columns are read directly; everything else the plan touches gets
/// a join.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideTables {
    pub price: bool,
    pub sku: bool,
    pub attributes: bool,
    pub popularity: bool,
    pub rating: bool,
}

impl SideTables {
    /// Nothing exposed: join every side column the plan reads.
    pub const NONE: SideTables = SideTables {
        price: false,
        sku: false,
        attributes: false,
        popularity: false,
        rating: false,
    };

    /// Everything exposed: never join.
    pub const ALL: SideTables = SideTables {
        price: true,
        sku: true,
        attributes: true,
        popularity: true,
        rating: true,
    };

    pub fn exposes(&self, column: Column) -> bool {
        match column {
            Column::Price => self.price,
            Column::Sku => self.sku,
            Column::Attributes => self.attributes,
            Column::Popularity => self.popularity,
            Column::Rating => self.rating,
            _ => true,
        }
    }
}

/// Where a joined column comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinSource {
    /// One meta row per item under `key`.
    Meta { key: String },
    /// Space-joined names of the item's terms in taxonomies with `prefix`.
    AttributeTerms { taxonomy_prefix: String },
}

/// A side-table join providing one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub alias: String,
    pub column: Column,
    pub source: JoinSource,
}

fn join_for(column: Column, config: &RankingConfig) -> Option<Join> {
    let meta = |alias: &str, key: &str| Join {
        alias: alias.to_string(),
        column,
        source: JoinSource::Meta {
            key: key.to_string(),
        },
    };
    let keys = &config.meta_keys;
    match column {
        Column::Price => Some(meta(aliases::JOIN_PRICE, &keys.price)),
        Column::Sku => Some(meta(aliases::JOIN_SKU, &keys.sku)),
        Column::Popularity => Some(meta(aliases::JOIN_POPULARITY, &keys.popularity)),
        Column::Rating => Some(meta(aliases::JOIN_RATING, &keys.rating)),
        Column::Attributes => Some(Join {
            alias: aliases::JOIN_ATTRIBUTES.to_string(),
            column,
            source: JoinSource::AttributeTerms {
                taxonomy_prefix: config.attribute_taxonomy_prefix.clone(),
            },
        }),
        _ => None,
    }
}

/// Joins for every side column read by the fields, filter and order keys
/// that the store does not expose.
pub fn required_joins(
    fields: &[DerivedField],
    filter: Option<&Expr>,
    order: &[OrderKey],
    side_tables: SideTables,
    config: &RankingConfig,
) -> Vec<Join> {
    let mut columns = BTreeSet::new();
    for field in fields {
        field.expr.columns(&mut columns);
    }
    if let Some(filter) = filter {
        filter.columns(&mut columns);
    }
    for key in order {
        key.expr.columns(&mut columns);
    }
    columns
        .into_iter()
        .filter(|c| c.is_side() && !side_tables.exposes(*c))
        .filter_map(|c| join_for(c, config))
        .collect()
}

// =============================================================================
// FIELDS, FILTER, ORDER
// =============================================================================

fn hit_counter(tokens: &Tokens, field: SearchField) -> Expr {
    Expr::Sum(
        tokens
            .iter()
            .map(|t| Expr::case(Expr::field_match(field, t), 1))
            .collect(),
    )
}

fn penalty_expr(tokens: &Tokens, config: &RankingConfig) -> Expr {
    let amount = config.penalty_amount();
    let keyword = config.penalty_keyword();
    let keyword = keyword.as_str();
    if amount == 0 || keyword.is_empty() || tokens.phrase().contains(keyword) {
        return Expr::Int(0);
    }
    Expr::case(
        Expr::Or(vec![
            Expr::contains(Column::Title, keyword),
            Expr::contains(Column::Content, keyword),
            Expr::contains(Column::Attributes, keyword),
            Expr::contains(Column::Sku, keyword),
        ]),
        amount,
    )
}

/// Every derived field for a non-empty token list, in emission order.
pub fn derived_fields(tokens: &Tokens, config: &RankingConfig) -> Vec<DerivedField> {
    if tokens.is_empty() {
        return Vec::new();
    }
    let n = tokens.len() as i64;
    let phrase = tokens.phrase();
    let tw = &config.token_weights;
    let rw = &config.relevance_weights;

    let title_hits = hit_counter(tokens, SearchField::Title);
    let attr_hits = hit_counter(tokens, SearchField::Attributes);
    let content_hits = hit_counter(tokens, SearchField::Content);
    let overall_hits = Expr::Sum(
        tokens
            .iter()
            .map(|t| Expr::case(Expr::any_field_match(t), 1))
            .collect(),
    );

    let token_score = Expr::Sum(
        tokens
            .iter()
            .map(|t| {
                Expr::Greatest(vec![
                    Expr::Int(0),
                    Expr::case(Expr::field_match(SearchField::Title, t), i64::from(tw.title)),
                    Expr::case(Expr::field_match(SearchField::Sku, t), i64::from(tw.sku)),
                    Expr::case(
                        Expr::field_match(SearchField::Attributes, t),
                        i64::from(tw.attributes),
                    ),
                    Expr::case(Expr::field_match(SearchField::Content, t), i64::from(tw.content)),
                    Expr::case(Expr::field_match(SearchField::Price, t), i64::from(tw.price)),
                ])
            })
            .collect(),
    );

    let weighted_sum = Expr::Sum(
        tokens
            .iter()
            .flat_map(|t| {
                [
                    (SearchField::Title, rw.title),
                    (SearchField::Price, rw.price),
                    (SearchField::Content, rw.content),
                    (SearchField::Attributes, rw.attributes),
                    (SearchField::Sku, rw.sku),
                ]
                .into_iter()
                .map(move |(field, weight)| {
                    Expr::case(Expr::field_match(field, t), i64::from(weight))
                })
            })
            .collect(),
    );
    let penalty = penalty_expr(tokens, config);

    vec![
        DerivedField::new(
            aliases::TITLE_EXACT_PHRASE,
            Expr::contains(Column::Title, phrase),
        ),
        DerivedField::new(
            aliases::EXACT_MATCH,
            Expr::Or(vec![
                Expr::contains(Column::Title, phrase),
                Expr::contains(Column::Content, phrase),
            ]),
        ),
        DerivedField::new(aliases::TITLE_TOKEN_HITS, title_hits.clone()),
        DerivedField::new(aliases::ATTR_TOKEN_HITS, attr_hits.clone()),
        DerivedField::new(aliases::CONTENT_TOKEN_HITS, content_hits.clone()),
        DerivedField::new(aliases::OVERALL_TOKEN_HITS, overall_hits),
        DerivedField::new(aliases::TITLE_ALL_TOKENS, Expr::at_least(title_hits, n)),
        DerivedField::new(aliases::ATTR_ALL_TOKENS, Expr::at_least(attr_hits, n)),
        DerivedField::new(aliases::CONTENT_ALL_TOKENS, Expr::at_least(content_hits, n)),
        DerivedField::new(
            aliases::TITLE_ORDERED_PHRASE,
            Expr::ContainsInOrder {
                column: Column::Title,
                needles: tokens.as_slice().to_vec(),
            },
        ),
        DerivedField::new(aliases::TOKEN_SCORE, token_score),
        DerivedField::new(aliases::UNIVERSAL_PENALTY, penalty.clone()),
        DerivedField::new(aliases::RELEVANCE, Expr::sub(weighted_sum, penalty)),
    ]
}

/// AND over tokens of (OR over fields).
pub fn search_filter(tokens: &Tokens) -> Option<Expr> {
    if tokens.is_empty() {
        return None;
    }
    Some(Expr::And(
        tokens.iter().map(|t| Expr::any_field_match(t)).collect(),
    ))
}

/// Lower an ordering chain into order-by keys.
pub fn order_keys(chain: &[OrderStep]) -> Vec<OrderKey> {
    chain
        .iter()
        .map(|step| {
            let expr = match step.term {
                OrderTerm::Signal(signal) => Expr::field(signal_alias(signal)),
                OrderTerm::Price => Expr::Numeric(Column::Price),
                OrderTerm::Popularity => Expr::Numeric(Column::Popularity),
                OrderTerm::Rating => Expr::Numeric(Column::Rating),
                OrderTerm::Created => Expr::Column(Column::Created),
                OrderTerm::MenuOrder => Expr::Column(Column::MenuOrder),
                OrderTerm::Title => Expr::Column(Column::Title),
                OrderTerm::Id => Expr::Column(Column::Id),
                OrderTerm::Random { seed } => Expr::Random { seed },
            };
            OrderKey {
                expr,
                direction: step.direction,
                nulls_last: step.term.nulls_last(),
            }
        })
        .collect()
}

// =============================================================================
// AUGMENTATION AND PLAN
// =============================================================================

/// Everything one query adds to a plan.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Augmentation {
    /// A phrase produced tokens and the query was in scope.
    pub search_active: bool,
    pub fields: Vec<DerivedField>,
    pub filter: Option<Expr>,
    pub order: Vec<OrderKey>,
    pub group_by: Option<Column>,
    pub joins: Vec<Join>,
}

impl Augmentation {
    /// Leave the plan alone.
    pub fn passthrough() -> Self {
        Self::default()
    }

    pub fn is_passthrough(&self) -> bool {
        !self.search_active && self.order.is_empty()
    }
}

/// Emit the augmentation for tokens and an ordering chain.
///
/// An empty chain with no tokens is a pass-through.
pub fn emit(
    tokens: &Tokens,
    chain: &[OrderStep],
    side_tables: SideTables,
    config: &RankingConfig,
) -> Augmentation {
    if tokens.is_empty() && chain.is_empty() {
        return Augmentation::passthrough();
    }
    let fields = derived_fields(tokens, config);
    let filter = search_filter(tokens);
    let order = order_keys(chain);
    let joins = required_joins(&fields, filter.as_ref(), &order, side_tables, config);
    Augmentation {
        search_active: !tokens.is_empty(),
        fields,
        filter,
        order,
        group_by: Some(Column::Id),
        joins,
    }
}

/// How the search filter combines with a host filter already on the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Both must hold.
    #[default]
    And,
    /// Either may hold (widen the host's own search).
    Or,
}

/// A catalog query as the store will run it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryPlan {
    /// Item types in the query's scope; empty means all.
    pub item_types: Vec<String>,
    pub fields: Vec<DerivedField>,
    pub joins: Vec<Join>,
    /// Filter the host put on the plan before us.
    pub host_filter: Option<Expr>,
    pub search_filter: Option<Expr>,
    pub filter_mode: FilterMode,
    pub order: Vec<OrderKey>,
    pub group_by: Option<Column>,
    pub limit: Option<usize>,
}

impl QueryPlan {
    pub fn new<S: Into<String>>(item_types: impl IntoIterator<Item = S>) -> Self {
        Self {
            item_types: item_types.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_host_filter(mut self, filter: Expr) -> Self {
        self.host_filter = Some(filter);
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn has_field(&self, alias: &str) -> bool {
        self.fields.iter().any(|f| f.alias == alias)
    }

    pub fn has_join(&self, alias: &str) -> bool {
        self.joins.iter().any(|j| j.alias == alias)
    }

    /// Already carries our derived fields or joins.
    pub fn is_augmented(&self) -> bool {
        self.has_field(aliases::RELEVANCE)
            || self.joins.iter().any(|j| {
                [
                    aliases::JOIN_PRICE,
                    aliases::JOIN_SKU,
                    aliases::JOIN_ATTRIBUTES,
                    aliases::JOIN_POPULARITY,
                    aliases::JOIN_RATING,
                ]
                .contains(&j.alias.as_str())
            })
    }

    /// Merge an augmentation. Idempotent; returns whether anything changed.
    pub fn apply(&mut self, augmentation: &Augmentation, config: &RankingConfig) -> bool {
        if augmentation.is_passthrough() {
            return false;
        }
        let before = self.clone();

        for join in &augmentation.joins {
            if !self.has_join(&join.alias) {
                self.joins.push(join.clone());
            }
        }
        for field in &augmentation.fields {
            if !self.has_field(&field.alias) {
                self.fields.push(field.clone());
            }
        }
        if augmentation.filter.is_some() {
            self.search_filter = augmentation.filter.clone();
            self.filter_mode = if config.combine_host_filter {
                FilterMode::Or
            } else {
                FilterMode::And
            };
        }
        if !augmentation.order.is_empty() {
            self.order = augmentation.order.clone();
        }
        if augmentation.group_by.is_some() {
            self.group_by = augmentation.group_by;
        }

        crate::contracts::check_plan_aliases_unique(self);
        *self != before
    }

    /// The combined filter the store should apply.
    pub fn filter(&self) -> Option<Expr> {
        match (&self.host_filter, &self.search_filter) {
            (None, None) => None,
            (Some(host), None) => Some(host.clone()),
            (None, Some(ours)) => Some(ours.clone()),
            (Some(host), Some(ours)) => Some(match self.filter_mode {
                FilterMode::And => Expr::And(vec![host.clone(), ours.clone()]),
                FilterMode::Or => Expr::Or(vec![host.clone(), ours.clone()]),
            }),
        }
    }
}
