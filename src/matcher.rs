// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Field matching: does this token appear in this field?
//!
//! Pure textual infix tests, case-insensitive on both sides. There is no
//! numeric parsing here, not even for price: "19.9" matches a stored
//! "19.99" because it is a substring, exactly like the store would do it.
//!
//! Price gets one special case. The `$` sign is stripped from both the token
//! and the stored price and the test is retried, so "$19.99" and "19.99"
//! both match a price stored as "19.99" (or as "$19.99").

use crate::types::{SearchField, SearchableItem};
use crate::utils::{contains_folded, strip_currency};

/// Which fields one token matched in one item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldMatches {
    pub title: bool,
    pub content: bool,
    pub attributes: bool,
    pub sku: bool,
    /// Direct or `$`-stripped price match.
    pub price: bool,
}

impl FieldMatches {
    /// Matched at least one field.
    #[inline]
    pub fn any(&self) -> bool {
        self.title || self.content || self.attributes || self.sku || self.price
    }
}

/// Price test: direct substring, then both sides with `$` removed.
///
/// A token that is nothing but `$` signs never matches on the stripped pass;
/// an empty needle would otherwise match every priced item.
pub fn price_matches(price: &str, token: &str) -> bool {
    if contains_folded(price, token) {
        return true;
    }
    let stripped = strip_currency(token);
    !stripped.is_empty() && contains_folded(&strip_currency(price), &stripped)
}

/// Test one field of an item against a lower-cased token.
pub fn field_matches(item: &SearchableItem, field: SearchField, token: &str) -> bool {
    match field {
        SearchField::Title => contains_folded(&item.title, token),
        SearchField::Content => contains_folded(&item.content, token),
        SearchField::Attributes => contains_folded(&item.attributes, token),
        SearchField::Sku => contains_folded(&item.sku, token),
        SearchField::Price => price_matches(item.price_text(), token),
    }
}

/// Test every searchable field of an item against a lower-cased token.
pub fn match_token(item: &SearchableItem, token: &str) -> FieldMatches {
    FieldMatches {
        title: field_matches(item, SearchField::Title, token),
        content: field_matches(item, SearchField::Content, token),
        attributes: field_matches(item, SearchField::Attributes, token),
        sku: field_matches(item, SearchField::Sku, token),
        price: field_matches(item, SearchField::Price, token),
    }
}
