// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Item stores: whatever executes a [`QueryPlan`].
//!
//! Production stores render the plan with [`crate::plan::SqlRenderer`] and
//! hand it to a database. [`MemoryStore`] evaluates the same plan over a
//! `Vec` of items, which is how the pipeline is tested end to end.

use std::collections::HashSet;
use std::convert::Infallible;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::plan::eval::{compare_rows, eval, score_from_fields, Row};
use crate::plan::{QueryPlan, SideTables};
use crate::types::{ItemId, RankedItem, SearchableItem};

/// Executes query plans.
pub trait ItemStore {
    type Error;

    /// Run a plan and return matching items in plan order.
    fn execute(&self, plan: &QueryPlan) -> std::result::Result<Vec<RankedItem>, Self::Error>;

    /// Side-table columns this store exposes without a join.
    fn side_tables(&self) -> SideTables {
        SideTables::NONE
    }
}

/// Whether an item is of one of the given types. No types means all.
pub(crate) fn in_item_types<S: AsRef<str>>(item: &SearchableItem, item_types: &[S]) -> bool {
    item_types.is_empty() || item_types.iter().any(|t| t.as_ref() == item.item_type)
}

/// Keep the first item per id.
pub(crate) fn dedupe_by_id<'a, I>(items: I) -> Vec<&'a SearchableItem>
where
    I: IntoIterator<Item = &'a SearchableItem>,
{
    let mut seen: HashSet<ItemId> = HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.id)).collect()
}

/// In-memory catalog that evaluates plans directly.
///
/// Ids are unique: later duplicates are dropped on construction.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Vec<SearchableItem>,
}

impl MemoryStore {
    pub fn new(items: Vec<SearchableItem>) -> Self {
        let mut seen = HashSet::new();
        let items = items.into_iter().filter(|item| seen.insert(item.id)).collect();
        Self { items }
    }

    /// Parse a JSON array of items.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let items: Vec<SearchableItem> =
            serde_json::from_str(json).map_err(|source| Error::Json {
                context: "catalog".to_string(),
                source,
            })?;
        Ok(Self::new(items))
    }

    /// Read a JSON array of items from a file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn items(&self) -> &[SearchableItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemStore for MemoryStore {
    type Error = Infallible;

    fn side_tables(&self) -> SideTables {
        SideTables::ALL
    }

    fn execute(&self, plan: &QueryPlan) -> std::result::Result<Vec<RankedItem>, Infallible> {
        let filter = plan.filter();
        let scoped = self
            .items
            .iter()
            .filter(|item| in_item_types(item, &plan.item_types));
        let candidates = if plan.group_by.is_some() {
            dedupe_by_id(scoped)
        } else {
            scoped.collect()
        };

        let mut rows: Vec<Row<'_>> = candidates
            .into_iter()
            .map(|item| Row::derive(item, &plan.fields))
            .filter(|row| {
                filter
                    .as_ref()
                    .map_or(true, |f| eval(f, row).truthy())
            })
            .collect();

        rows.sort_by(|a, b| compare_rows(a, b, &plan.order));
        if let Some(limit) = plan.limit {
            rows.truncate(limit);
        }

        Ok(rows
            .into_iter()
            .map(|row| RankedItem {
                score: score_from_fields(&row),
                item: row.item.clone(),
            })
            .collect())
    }
}
