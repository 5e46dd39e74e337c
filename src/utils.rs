// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Utility functions for string processing.
//!
//! Everything the matcher, tokenizer and sort resolver agree on lives here so
//! the in-memory path and the rendered SQL path fold case the same way.

/// Normalize a phrase for whole-phrase matching: lowercase and trim.
///
/// Interior whitespace is kept as typed. `LIKE '%blue  shirt%'` does not
/// match "blue shirt" either, and the exact-phrase signals follow the store.
pub fn normalize_phrase(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Normalize a sort key: lowercase, trim, and map `-` and `.` to `_`.
///
/// - "price-desc" → "price_desc"
/// - "Menu.Order" → "menu_order"
/// - " DESC " → "desc"
pub fn normalize_sort_key(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == '.' { '_' } else { c })
        .collect()
}

/// Remove every literal `$` from a price string or price token.
pub fn strip_currency(value: &str) -> String {
    value.replace('$', "")
}

/// Case-insensitive infix containment, the in-memory twin of
/// `LOWER(haystack) LIKE '%needle%'`.
///
/// `needle` must already be lowercase (tokens always are). An empty needle
/// matches everything, same as `LIKE '%%'`.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(needle)
}

/// Does `haystack` contain every needle, in order, with anything in between?
///
/// Equivalent to the case-insensitive, dot-matches-newline regex
/// `n1.*n2.*...nN` with each needle escaped as a literal. Greedy leftmost
/// matching of each needle is enough: if any placement works, the leftmost
/// one does.
pub fn contains_in_order<S: AsRef<str>>(haystack: &str, needles: &[S]) -> bool {
    if needles.is_empty() {
        return false;
    }
    let folded = haystack.to_lowercase();
    let mut rest = folded.as_str();
    for needle in needles {
        let needle = needle.as_ref();
        match rest.find(needle) {
            Some(pos) => rest = &rest[pos + needle.len()..],
            None => return false,
        }
    }
    true
}

/// Parse stored price text as a number for explicit price sorts.
///
/// Leading `$` and surrounding whitespace are ignored. Anything else that
/// does not parse is treated as "no price", which sorts last.
pub fn parse_price(value: &str) -> Option<f64> {
    let cleaned = strip_currency(value);
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|p| p.is_finite())
}
