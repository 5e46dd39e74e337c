// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how catalog items get their numbers.
//!
//! Two scores live side by side and neither replaces the other. `relevance`
//! adds up every field a token hit, so a token in title and content is worth
//! more than a token in title alone. `token_score` only credits each token's
//! single best field. They break ties in sequence, never merged into one.

mod core;
pub mod ranking;

pub use core::*;
