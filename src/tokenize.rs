// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Phrase tokenization.
//!
//! Whitespace split, lowercase, dedupe. No stemming, no stopwords, no
//! language detection: a token is matched as a raw infix substring, so
//! anything cleverer here would just disagree with the store's `LIKE`.
//!
//! **Invariant**: tokens are unique and keep first-occurrence order.
//! "Red red shoes" is `["red", "shoes"]`, never `["red", "red", "shoes"]`,
//! because a repeated token would count twice in every hit counter.

use std::collections::HashSet;

use crate::utils::normalize_phrase;

/// The tokens of a search phrase plus the phrase itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tokens {
    phrase: String,
    tokens: Vec<String>,
}

impl Tokens {
    /// Lower-cased, trimmed whole phrase (for the exact-phrase signals).
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// No usable tokens: search is disabled for this query.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.tokens.iter()
    }

    /// Case-insensitive regex matching every token in order, e.g.
    /// `(?is)blue.*shirt`. Tokens are escaped as literals.
    ///
    /// `None` when there are no tokens.
    pub fn ordered_pattern(&self) -> Option<String> {
        if self.tokens.is_empty() {
            return None;
        }
        Some(in_order_regex(&self.tokens, "is"))
    }
}

/// Regex matching every needle in order with anything between. `flags` are
/// inline regex flags and must include `s` so `.*` crosses newlines.
pub fn in_order_regex<S: AsRef<str>>(needles: &[S], flags: &str) -> String {
    let body = needles
        .iter()
        .map(|n| regex::escape(n.as_ref()))
        .collect::<Vec<_>>()
        .join(".*");
    format!("(?{}){}", flags, body)
}

impl<'a> IntoIterator for &'a Tokens {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// A piece is usable if it has something a shopper could have meant.
/// "$", "--" and "&" are noise.
fn is_usable(piece: &str) -> bool {
    piece.chars().any(char::is_alphanumeric)
}

/// Split a phrase into unique lower-cased tokens.
///
/// # Example
///
/// ```
/// use shelfsort::tokenize;
///
/// let tokens = tokenize("Red Red  Shoes");
/// assert_eq!(tokens.as_slice(), &["red", "shoes"]);
/// assert!(tokenize("   ").is_empty());
/// ```
pub fn tokenize(phrase: &str) -> Tokens {
    let mut seen = HashSet::new();
    let tokens = phrase
        .split_whitespace()
        .map(str::trim)
        .filter(|piece| !piece.is_empty() && is_usable(piece))
        .map(str::to_lowercase)
        .filter(|token| seen.insert(token.clone()))
        .collect::<Vec<_>>();

    let phrase = if tokens.is_empty() {
        String::new()
    } else {
        normalize_phrase(phrase)
    };

    Tokens { phrase, tokens }
}
