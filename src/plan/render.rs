// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! SQL rendering of query plans.
//!
//! MySQL flavoured. Every literal that reaches the output goes through
//! [`sql_literal`]; every `LIKE` needle goes through [`like_escape`] first.
//!
//! # Escaping
//!
//! ```text
//! token        like_escape     sql_literal
//! 50%      →   50\%        →   '%50\\%%'
//! o'neil   →   o'neil      →   '%o''neil%'
//! a_b      →   a\_b        →   '%a\\_b%'
//! ```
//!
//! Column names and aliases come from [`SqlNames`] and the plan, never from
//! user input, and are emitted as-is.

use super::emitter::{Join, JoinSource, QueryPlan};
use super::expr::{Column, Expr, OrderKey};
use crate::tokenize::in_order_regex;

/// Table and column names of the target schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlNames {
    pub items: String,
    pub id: String,
    pub title: String,
    pub content: String,
    pub item_type: String,
    pub created: String,
    pub menu_order: String,

    /// Side columns as exposed on the item row when no join is emitted.
    pub price: String,
    pub sku: String,
    pub attributes: String,
    pub popularity: String,
    pub rating: String,

    pub meta: String,
    pub meta_item_id: String,
    pub meta_key: String,
    pub meta_value: String,

    pub term_relationships: String,
    pub term_taxonomy: String,
    pub terms: String,
}

impl Default for SqlNames {
    fn default() -> Self {
        Self {
            items: "wp_posts".to_string(),
            id: "ID".to_string(),
            title: "post_title".to_string(),
            content: "post_content".to_string(),
            item_type: "post_type".to_string(),
            created: "post_date".to_string(),
            menu_order: "menu_order".to_string(),
            price: "price".to_string(),
            sku: "sku".to_string(),
            attributes: "attributes".to_string(),
            popularity: "total_sales".to_string(),
            rating: "average_rating".to_string(),
            meta: "wp_postmeta".to_string(),
            meta_item_id: "post_id".to_string(),
            meta_key: "meta_key".to_string(),
            meta_value: "meta_value".to_string(),
            term_relationships: "wp_term_relationships".to_string(),
            term_taxonomy: "wp_term_taxonomy".to_string(),
            terms: "wp_terms".to_string(),
        }
    }
}

/// Rendered clause fragments, ready to splice into a `SELECT`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SqlClauses {
    /// `expr AS alias, ...`; empty when the plan derives nothing.
    pub fields: String,
    /// `LEFT JOIN ...` lines joined by a space.
    pub join: String,
    /// Item type scope, e.g. `wp_posts.post_type IN ('product')`.
    pub scope: String,
    /// Combined host and search filter.
    pub filter: String,
    pub orderby: String,
    pub groupby: String,
    pub limit: Option<usize>,
}

impl SqlClauses {
    /// Assemble a full statement, mostly for display and debugging.
    pub fn to_select(&self, names: &SqlNames) -> String {
        let mut sql = format!("SELECT {}.*", names.items);
        if !self.fields.is_empty() {
            sql.push_str(", ");
            sql.push_str(&self.fields);
        }
        sql.push_str(&format!(" FROM {}", names.items));
        if !self.join.is_empty() {
            sql.push(' ');
            sql.push_str(&self.join);
        }
        let conditions: Vec<&str> = [self.scope.as_str(), self.filter.as_str()]
            .into_iter()
            .filter(|c| !c.is_empty())
            .collect();
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        if !self.groupby.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.groupby);
        }
        if !self.orderby.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.orderby);
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        sql
    }
}

/// Escape `LIKE` wildcards and the escape character itself.
pub fn like_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Quote a string literal: backslashes and single quotes doubled.
pub fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
}

/// Renders expressions and plans against a schema.
#[derive(Debug, Clone, Default)]
pub struct SqlRenderer {
    names: SqlNames,
}

impl SqlRenderer {
    pub fn new(names: SqlNames) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &SqlNames {
        &self.names
    }

    /// Render every clause of a plan.
    pub fn render(&self, plan: &QueryPlan) -> SqlClauses {
        let fields = plan
            .fields
            .iter()
            .map(|f| format!("{} AS {}", self.expr(&f.expr, &plan.joins), f.alias))
            .collect::<Vec<_>>()
            .join(", ");
        let join = plan
            .joins
            .iter()
            .map(|j| self.join(j))
            .collect::<Vec<_>>()
            .join(" ");
        let scope = if plan.item_types.is_empty() {
            String::new()
        } else {
            format!(
                "{}.{} IN ({})",
                self.names.items,
                self.names.item_type,
                plan.item_types
                    .iter()
                    .map(|t| sql_literal(t))
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        };
        let filter = plan
            .filter()
            .map(|f| self.expr(&f, &plan.joins))
            .unwrap_or_default();
        let orderby = plan
            .order
            .iter()
            .map(|k| self.order_key(k, &plan.joins))
            .collect::<Vec<_>>()
            .join(", ");
        let groupby = plan
            .group_by
            .map(|c| self.column(c, &plan.joins))
            .unwrap_or_default();

        SqlClauses {
            fields,
            join,
            scope,
            filter,
            orderby,
            groupby,
            limit: plan.limit,
        }
    }

    fn join(&self, join: &Join) -> String {
        let n = &self.names;
        match &join.source {
            JoinSource::Meta { key } => format!(
                "LEFT JOIN {meta} AS {a} ON ({a}.{item_id} = {items}.{id} AND {a}.{mk} = {key})",
                meta = n.meta,
                a = join.alias,
                item_id = n.meta_item_id,
                items = n.items,
                id = n.id,
                mk = n.meta_key,
                key = sql_literal(key),
            ),
            JoinSource::AttributeTerms { taxonomy_prefix } => format!(
                "LEFT JOIN (SELECT tr.object_id, GROUP_CONCAT(t.name SEPARATOR ' ') AS {val} \
                 FROM {tr} AS tr \
                 INNER JOIN {tt} AS tt ON tt.term_taxonomy_id = tr.term_taxonomy_id \
                 INNER JOIN {terms} AS t ON t.term_id = tt.term_id \
                 WHERE tt.taxonomy LIKE {prefix} \
                 GROUP BY tr.object_id) AS {a} ON {a}.object_id = {items}.{id}",
                val = n.meta_value,
                tr = n.term_relationships,
                tt = n.term_taxonomy,
                terms = n.terms,
                prefix = sql_literal(&format!("{}%", like_escape(taxonomy_prefix))),
                a = join.alias,
                items = n.items,
                id = n.id,
            ),
        }
    }

    /// Qualified column reference, through a join when the plan has one.
    fn column(&self, column: Column, joins: &[Join]) -> String {
        if let Some(join) = joins.iter().find(|j| j.column == column) {
            return format!("{}.{}", join.alias, self.names.meta_value);
        }
        let n = &self.names;
        let name = match column {
            Column::Id => &n.id,
            Column::Title => &n.title,
            Column::Content => &n.content,
            Column::ItemType => &n.item_type,
            Column::Created => &n.created,
            Column::MenuOrder => &n.menu_order,
            Column::Price => &n.price,
            Column::Sku => &n.sku,
            Column::Attributes => &n.attributes,
            Column::Popularity => &n.popularity,
            Column::Rating => &n.rating,
        };
        format!("{}.{}", n.items, name)
    }

    /// Lower-cased text of a column; missing side rows read as empty.
    fn folded(&self, column: Column, strip_currency: bool, joins: &[Join]) -> String {
        let col = format!("COALESCE({}, '')", self.column(column, joins));
        if strip_currency {
            format!("LOWER(REPLACE({}, '$', ''))", col)
        } else {
            format!("LOWER({})", col)
        }
    }

    fn list(&self, items: &[Expr], sep: &str, empty: &str, joins: &[Join]) -> String {
        match items {
            [] => empty.to_string(),
            [single] => self.expr(single, joins),
            many => format!(
                "({})",
                many.iter()
                    .map(|e| self.expr(e, joins))
                    .collect::<Vec<_>>()
                    .join(sep)
            ),
        }
    }

    /// Render one expression.
    pub fn expr(&self, expr: &Expr, joins: &[Join]) -> String {
        match expr {
            Expr::Contains {
                column,
                needle,
                strip_currency,
            } => format!(
                "{} LIKE {}",
                self.folded(*column, *strip_currency, joins),
                sql_literal(&format!("%{}%", like_escape(needle)))
            ),
            Expr::ContainsInOrder { column, needles } => {
                // The column is already lower-cased; only dot-all is needed.
                let pattern = in_order_regex(needles, "s");
                format!(
                    "{} REGEXP {}",
                    self.folded(*column, false, joins),
                    sql_literal(&pattern)
                )
            }
            Expr::And(items) => self.list(items, " AND ", "TRUE", joins),
            Expr::Or(items) => self.list(items, " OR ", "FALSE", joins),
            Expr::Not(inner) => format!("(NOT {})", self.expr(inner, joins)),
            Expr::Case { when, then } => format!(
                "(CASE WHEN {} THEN {} ELSE 0 END)",
                self.expr(when, joins),
                then
            ),
            Expr::Sum(items) => self.list(items, " + ", "0", joins),
            Expr::Greatest(items) => match items.as_slice() {
                [] => "0".to_string(),
                [single] => self.expr(single, joins),
                many => format!(
                    "GREATEST({})",
                    many.iter()
                        .map(|e| self.expr(e, joins))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            },
            Expr::Sub(lhs, rhs) => format!(
                "({} - {})",
                self.expr(lhs, joins),
                self.expr(rhs, joins)
            ),
            Expr::AtLeast { expr, min } => format!("({} >= {})", self.expr(expr, joins), min),
            Expr::Int(n) => n.to_string(),
            Expr::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            Expr::Column(column) => self.column(*column, joins),
            Expr::Numeric(column) => {
                let col = self.column(*column, joins);
                match column {
                    Column::Price => format!(
                        "CAST(NULLIF(REPLACE({}, '$', ''), '') AS DECIMAL(20,4))",
                        col
                    ),
                    Column::Popularity => format!("CAST({} AS SIGNED)", col),
                    _ => format!("CAST({} AS DECIMAL(20,4))", col),
                }
            }
            Expr::Field(alias) => alias.clone(),
            Expr::Random { seed } => format!("RAND({})", seed),
        }
    }

    /// One order-by entry; nullable keys get an `IS NULL` key in front.
    pub fn order_key(&self, key: &OrderKey, joins: &[Join]) -> String {
        let expr = self.expr(&key.expr, joins);
        if key.nulls_last {
            format!("({} IS NULL) ASC, {} {}", expr, expr, key.direction.as_str())
        } else {
            format!("{} {}", expr, key.direction.as_str())
        }
    }
}
