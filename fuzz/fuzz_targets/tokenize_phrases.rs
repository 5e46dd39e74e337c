// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tokenizer under arbitrary phrases.
//!
//! Shoppers type anything: emoji, RTL text, NUL bytes, a pasted CSV row.
//! Tokenizing must never panic, and the tokens it returns must be unique,
//! lower-cased and carry at least one alphanumeric character.

#![no_main]

use libfuzzer_sys::fuzz_target;
use shelfsort::tokenize;
use std::collections::HashSet;

fuzz_target!(|phrase: &str| {
    let tokens = tokenize(phrase);

    let mut seen = HashSet::new();
    for token in &tokens {
        // INVARIANT 1: no duplicates
        assert!(seen.insert(token.as_str()), "duplicate token {token:?}");
        // INVARIANT 2: already folded
        assert_eq!(token, &token.to_lowercase());
        // INVARIANT 3: no whitespace and no pure punctuation
        assert!(!token.chars().any(char::is_whitespace));
        assert!(token.chars().any(char::is_alphanumeric));
    }

    // INVARIANT 4: phrase is only kept when there is something to search for
    if tokens.is_empty() {
        assert!(tokens.phrase().is_empty());
    } else {
        assert_eq!(tokens.phrase(), phrase.trim().to_lowercase());
    }

    // INVARIANT 5: idempotent on its own output
    let rejoined = tokens.as_slice().join(" ");
    assert_eq!(tokenize(&rejoined).as_slice(), tokens.as_slice());
});
