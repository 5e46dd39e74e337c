// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory evaluation of plan expressions.
//!
//! Mirrors what the store does with the rendered SQL: `LIKE` becomes
//! [`contains_folded`], `REGEXP` becomes [`contains_in_order`], casts go
//! through [`parse_price`]. Values carry a total order so a plan's order keys
//! can sort rows without a database.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use super::emitter::aliases;
use super::expr::{Column, DerivedField, Expr, OrderKey};
use crate::scoring::ranking::{compare_text, random_key};
use crate::types::{Direction, ScoreRecord, SearchableItem};
use crate::utils::{contains_folded, contains_in_order, parse_price, strip_currency};

/// A typed cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Num(f64),
    Text(String),
    Time(DateTime<Utc>),
}

impl Value {
    /// SQL truthiness: NULL and zero are false.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Num(n) => *n != 0.0,
            Value::Text(s) => !s.is_empty(),
            Value::Time(_) => true,
        }
    }

    pub fn as_int(&self) -> i64 {
        match self {
            Value::Bool(b) => i64::from(*b),
            Value::Int(n) => *n,
            Value::Num(n) => *n as i64,
            Value::Null | Value::Text(_) | Value::Time(_) => 0,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) | Value::Int(_) | Value::Num(_) => 1,
            Value::Text(_) => 2,
            Value::Time(_) => 3,
        }
    }
}

/// Total order over values. NULL sorts first; numbers compare across kinds.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Text(x), Value::Text(y)) => compare_text(x, y),
        (Value::Time(x), Value::Time(y)) => x.cmp(y),
        (Value::Num(x), Value::Num(y)) => x.total_cmp(y),
        (Value::Num(x), other) if other.rank() == 1 => x.total_cmp(&(other.as_int() as f64)),
        (other, Value::Num(y)) if other.rank() == 1 => (other.as_int() as f64).total_cmp(y),
        (x, y) if x.rank() == 1 && y.rank() == 1 => x.as_int().cmp(&y.as_int()),
        (x, y) => x.rank().cmp(&y.rank()),
    }
}

/// An item plus the derived values computed for it so far.
#[derive(Debug, Clone)]
pub struct Row<'a> {
    pub item: &'a SearchableItem,
    pub fields: Vec<(String, Value)>,
}

impl<'a> Row<'a> {
    pub fn new(item: &'a SearchableItem) -> Self {
        Self {
            item,
            fields: Vec::new(),
        }
    }

    /// Evaluate derived fields in order and attach them.
    pub fn derive(item: &'a SearchableItem, fields: &[DerivedField]) -> Self {
        let mut row = Self::new(item);
        for field in fields {
            let value = eval(&field.expr, &row);
            row.fields.push((field.alias.clone(), value));
        }
        row
    }

    pub fn get(&self, alias: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == alias)
            .map(|(_, value)| value)
    }
}

/// Column text for matching; missing values read as empty.
fn column_text(item: &SearchableItem, column: Column) -> String {
    match column {
        Column::Title => item.title.clone(),
        Column::Content => item.content.clone(),
        Column::Attributes => item.attributes.clone(),
        Column::Sku => item.sku.clone(),
        Column::Price => item.price_text().to_string(),
        Column::ItemType => item.item_type.clone(),
        Column::Id => item.id.to_string(),
        Column::MenuOrder => item.menu_order.to_string(),
        Column::Popularity => item.popularity.map(|p| p.to_string()).unwrap_or_default(),
        Column::Rating => item.rating.map(|r| r.to_string()).unwrap_or_default(),
        Column::Created => item.created.map(|c| c.to_rfc3339()).unwrap_or_default(),
    }
}

fn column_value(item: &SearchableItem, column: Column) -> Value {
    match column {
        Column::Id => Value::Int(item.id.get() as i64),
        Column::Title => Value::Text(item.title.clone()),
        Column::Content => Value::Text(item.content.clone()),
        Column::Attributes => Value::Text(item.attributes.clone()),
        Column::Sku => Value::Text(item.sku.clone()),
        Column::ItemType => Value::Text(item.item_type.clone()),
        Column::Price => item.price.clone().map_or(Value::Null, Value::Text),
        Column::MenuOrder => Value::Int(item.menu_order),
        Column::Popularity => item.popularity.map_or(Value::Null, Value::Int),
        Column::Rating => item.rating.map_or(Value::Null, Value::Num),
        Column::Created => item.created.map_or(Value::Null, Value::Time),
    }
}

/// Evaluate an expression against a row.
pub fn eval(expr: &Expr, row: &Row<'_>) -> Value {
    match expr {
        Expr::Contains {
            column,
            needle,
            strip_currency: strip,
        } => {
            let text = column_text(row.item, *column);
            let text = if *strip { strip_currency(&text) } else { text };
            Value::Bool(contains_folded(&text, needle))
        }
        Expr::ContainsInOrder { column, needles } => {
            Value::Bool(contains_in_order(&column_text(row.item, *column), needles))
        }
        Expr::And(items) => Value::Bool(items.iter().all(|e| eval(e, row).truthy())),
        Expr::Or(items) => Value::Bool(items.iter().any(|e| eval(e, row).truthy())),
        Expr::Not(inner) => Value::Bool(!eval(inner, row).truthy()),
        Expr::Case { when, then } => Value::Int(if eval(when, row).truthy() { *then } else { 0 }),
        Expr::Sum(items) => Value::Int(items.iter().map(|e| eval(e, row).as_int()).sum()),
        Expr::Greatest(items) => Value::Int(
            items
                .iter()
                .map(|e| eval(e, row).as_int())
                .max()
                .unwrap_or(0),
        ),
        Expr::Sub(lhs, rhs) => Value::Int(eval(lhs, row).as_int() - eval(rhs, row).as_int()),
        Expr::AtLeast { expr, min } => Value::Bool(eval(expr, row).as_int() >= *min),
        Expr::Int(n) => Value::Int(*n),
        Expr::Bool(b) => Value::Bool(*b),
        Expr::Column(column) => column_value(row.item, *column),
        Expr::Numeric(Column::Price) => row
            .item
            .price
            .as_deref()
            .and_then(parse_price)
            .map_or(Value::Null, Value::Num),
        Expr::Numeric(column) => column_value(row.item, *column),
        Expr::Field(alias) => row.get(alias).cloned().unwrap_or(Value::Null),
        Expr::Random { seed } => Value::Int(random_key(row.item.id.get(), *seed)),
    }
}

/// Compare two rows on one order key.
pub fn compare_on_key(a: &Row<'_>, b: &Row<'_>, key: &OrderKey) -> Ordering {
    let va = eval(&key.expr, a);
    let vb = eval(&key.expr, b);
    if key.nulls_last {
        match (va.is_null(), vb.is_null()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }
    }
    let ord = compare_values(&va, &vb);
    match key.direction {
        Direction::Asc => ord,
        Direction::Desc => ord.reverse(),
    }
}

/// Compare two rows along a plan's order keys.
pub fn compare_rows(a: &Row<'_>, b: &Row<'_>, order: &[OrderKey]) -> Ordering {
    order
        .iter()
        .map(|key| compare_on_key(a, b, key))
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// Rebuild a score record from derived field values.
///
/// `None` unless the row carries the relevance field, i.e. the plan scored.
pub fn score_from_fields(row: &Row<'_>) -> Option<ScoreRecord> {
    row.get(aliases::RELEVANCE)?;
    let int = |alias: &str| row.get(alias).map_or(0, Value::as_int);
    let flag = |alias: &str| row.get(alias).is_some_and(Value::truthy);
    let count = |alias: &str| u32::try_from(int(alias)).unwrap_or(0);
    Some(ScoreRecord {
        title_exact_phrase: flag(aliases::TITLE_EXACT_PHRASE),
        exact_match: flag(aliases::EXACT_MATCH),
        title_token_hits: count(aliases::TITLE_TOKEN_HITS),
        attr_token_hits: count(aliases::ATTR_TOKEN_HITS),
        content_token_hits: count(aliases::CONTENT_TOKEN_HITS),
        overall_token_hits: count(aliases::OVERALL_TOKEN_HITS),
        title_all_tokens: flag(aliases::TITLE_ALL_TOKENS),
        attr_all_tokens: flag(aliases::ATTR_ALL_TOKENS),
        content_all_tokens: flag(aliases::CONTENT_ALL_TOKENS),
        title_ordered_phrase: flag(aliases::TITLE_ORDERED_PHRASE),
        token_score: int(aliases::TOKEN_SCORE),
        universal_penalty: int(aliases::UNIVERSAL_PENALTY),
        relevance: int(aliases::RELEVANCE),
    })
}
