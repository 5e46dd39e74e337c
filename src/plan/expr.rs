// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Structured query expressions.
//!
//! Filters, derived fields and order keys are trees, not strings. The same
//! tree is rendered to SQL by [`super::render`] and evaluated against an
//! in-memory item by [`super::eval`], which is how the test suite checks that
//! the SQL we hand the store means what the Rust scorer computes.

use std::collections::BTreeSet;

use crate::types::{Direction, SearchField};
use crate::utils::strip_currency;

/// A column of the item store, before any join aliasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Id,
    Title,
    Content,
    ItemType,
    Created,
    MenuOrder,
    // Side-table columns: may need a join.
    Price,
    Sku,
    Attributes,
    Popularity,
    Rating,
}

impl Column {
    /// Columns that live in side tables rather than on the item row.
    pub const SIDE: [Column; 5] = [
        Column::Price,
        Column::Sku,
        Column::Attributes,
        Column::Popularity,
        Column::Rating,
    ];

    pub fn is_side(self) -> bool {
        Column::SIDE.contains(&self)
    }
}

impl From<SearchField> for Column {
    fn from(field: SearchField) -> Self {
        match field {
            SearchField::Title => Column::Title,
            SearchField::Content => Column::Content,
            SearchField::Attributes => Column::Attributes,
            SearchField::Sku => Column::Sku,
            SearchField::Price => Column::Price,
        }
    }
}

/// Expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `LOWER(column) LIKE '%needle%'`. With `strip_currency`, `$` is removed
    /// from the column first (the needle is stored already stripped).
    Contains {
        column: Column,
        needle: String,
        strip_currency: bool,
    },
    /// Every needle in order, anything in between.
    ContainsInOrder { column: Column, needles: Vec<String> },
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Not(Box<Expr>),
    /// `CASE WHEN cond THEN weight ELSE 0 END`
    Case { when: Box<Expr>, then: i64 },
    Sum(Vec<Expr>),
    Greatest(Vec<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    /// `expr >= min`
    AtLeast { expr: Box<Expr>, min: i64 },
    Int(i64),
    Bool(bool),
    Column(Column),
    /// Column cast to a number (price text → decimal).
    Numeric(Column),
    /// Reference to a derived field by alias.
    Field(String),
    Random { seed: u64 },
}

impl Expr {
    pub fn contains(column: Column, needle: impl Into<String>) -> Self {
        Expr::Contains {
            column,
            needle: needle.into(),
            strip_currency: false,
        }
    }

    /// Price either form: direct, or with `$` stripped from both sides.
    pub fn price_match(token: &str) -> Self {
        let direct = Expr::contains(Column::Price, token);
        let stripped = strip_currency(token);
        if stripped.is_empty() {
            return direct;
        }
        Expr::Or(vec![
            direct,
            Expr::Contains {
                column: Column::Price,
                needle: stripped,
                strip_currency: true,
            },
        ])
    }

    /// Token match for one searchable field.
    pub fn field_match(field: SearchField, token: &str) -> Self {
        match field {
            SearchField::Price => Expr::price_match(token),
            other => Expr::contains(other.into(), token),
        }
    }

    /// Token found in any searchable field.
    pub fn any_field_match(token: &str) -> Self {
        Expr::Or(
            [
                SearchField::Title,
                SearchField::Content,
                SearchField::Price,
                SearchField::Attributes,
                SearchField::Sku,
            ]
            .into_iter()
            .map(|f| Expr::field_match(f, token))
            .collect(),
        )
    }

    pub fn case(when: Expr, then: i64) -> Self {
        Expr::Case {
            when: Box::new(when),
            then,
        }
    }

    pub fn at_least(expr: Expr, min: i64) -> Self {
        Expr::AtLeast {
            expr: Box::new(expr),
            min,
        }
    }

    pub fn sub(lhs: Expr, rhs: Expr) -> Self {
        Expr::Sub(Box::new(lhs), Box::new(rhs))
    }

    pub fn field(alias: &str) -> Self {
        Expr::Field(alias.to_string())
    }

    /// Every store column the expression reads.
    pub fn columns(&self, out: &mut BTreeSet<Column>) {
        match self {
            Expr::Contains { column, .. }
            | Expr::ContainsInOrder { column, .. }
            | Expr::Column(column)
            | Expr::Numeric(column) => {
                out.insert(*column);
            }
            Expr::And(children)
            | Expr::Or(children)
            | Expr::Sum(children)
            | Expr::Greatest(children) => {
                for child in children {
                    child.columns(out);
                }
            }
            Expr::Not(inner) | Expr::Case { when: inner, .. } | Expr::AtLeast { expr: inner, .. } => {
                inner.columns(out)
            }
            Expr::Sub(lhs, rhs) => {
                lhs.columns(out);
                rhs.columns(out);
            }
            Expr::Random { .. } => {
                out.insert(Column::Id);
            }
            Expr::Int(_) | Expr::Bool(_) | Expr::Field(_) => {}
        }
    }
}

/// A named per-item computed value (`expr AS alias`).
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedField {
    pub alias: String,
    pub expr: Expr,
}

impl DerivedField {
    pub fn new(alias: &str, expr: Expr) -> Self {
        Self {
            alias: alias.to_string(),
            expr,
        }
    }
}

/// One `ORDER BY` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderKey {
    pub expr: Expr,
    pub direction: Direction,
    /// Missing values sort after present ones in both directions.
    pub nulls_last: bool,
}
