// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use chrono::{DateTime, TimeZone, Utc};

use crate::types::{ItemId, SearchableItem};

/// Create a catalog product with only a title.
///
/// This is the canonical implementation used across all tests.
pub fn make_item(id: u64, title: &str) -> SearchableItem {
    SearchableItem {
        id: ItemId(id),
        title: title.to_string(),
        content: String::new(),
        attributes: String::new(),
        sku: String::new(),
        price: None,
        item_type: "product".to_string(),
        popularity: None,
        rating: None,
        created: None,
        menu_order: 0,
    }
}

/// Create a product with a price string.
pub fn make_priced_item(id: u64, title: &str, price: &str) -> SearchableItem {
    SearchableItem {
        price: Some(price.to_string()),
        ..make_item(id, title)
    }
}

/// Create a fully populated product.
pub fn make_full_item(
    id: u64,
    title: &str,
    content: &str,
    attributes: &str,
    sku: &str,
    price: Option<&str>,
) -> SearchableItem {
    SearchableItem {
        content: content.to_string(),
        attributes: attributes.to_string(),
        sku: sku.to_string(),
        price: price.map(str::to_string),
        ..make_item(id, title)
    }
}

/// Create a non-product item (e.g. a blog post).
pub fn make_item_of_type(id: u64, title: &str, item_type: &str) -> SearchableItem {
    SearchableItem {
        item_type: item_type.to_string(),
        ..make_item(id, title)
    }
}

/// Deterministic timestamp `days` after 2024-01-01.
pub fn day(days: i64) -> DateTime<Utc> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default();
    base + chrono::Duration::days(days)
}

/// A small mixed catalog used by integration tests and benchmarks.
pub fn sample_catalog() -> Vec<SearchableItem> {
    let mut items = vec![
        make_full_item(1, "Blue Shirt", "Classic cotton shirt", "blue cotton", "SH-001", Some("19.99")),
        make_full_item(2, "Shirt Blue Edition", "Limited run", "blue", "SH-002", Some("24.50")),
        make_full_item(3, "Red Shirt", "A shirt that is not blue", "red", "SH-003", Some("$15.00")),
        make_full_item(4, "Universal Blue Shirt", "Fits everyone", "blue", "SH-004", Some("29.00")),
        make_full_item(5, "Blue Jeans", "Denim, goes with any shirt", "blue denim", "JN-001", None),
        make_full_item(6, "Universal Remote Control", "Controls any TV", "black", "RC-100", Some("12.00")),
        make_full_item(7, "Deluxe Remote Control", "Backlit buttons", "black", "RC-200", Some("34.99")),
        make_full_item(8, "Red Shoes", "Running shoes", "red", "SHOES-001", Some("59.00")),
    ];
    for (i, item) in items.iter_mut().enumerate() {
        let i = i as i64;
        item.popularity = if i % 3 == 0 { None } else { Some(10 * i) };
        item.rating = if i % 4 == 1 { None } else { Some(1.0 + (i % 5) as f64) };
        item.created = Some(day(i * 7));
        item.menu_order = 8 - i;
    }
    items.push(make_item_of_type(100, "Blue Shirt Lookbook", "post"));
    items
}
