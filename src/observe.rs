// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search observability.
//!
//! The engine reports what it decided through a [`SearchObserver`]. The
//! default does nothing; [`TracingObserver`] turns every call into a
//! `tracing` event under the `shelfsort` target.

use tracing::{debug, trace};

use crate::plan::Augmentation;
use crate::sort::SortResolution;
use crate::tokenize::Tokens;

/// Hooks called by [`crate::Engine`]. Every method defaults to a no-op.
pub trait SearchObserver: Send + Sync {
    /// The phrase was split into tokens (possibly none).
    fn tokens_extracted(&self, _tokens: &Tokens) {}

    /// Sort resolution ran for a query. Called once per query.
    fn sort_resolved(&self, _phrase: &str, _resolution: &SortResolution) {}

    /// The query's item types are not ranked here.
    fn out_of_scope(&self, _item_types: &[String]) {}

    /// A plan was augmented.
    fn plan_augmented(&self, _augmentation: &Augmentation) {}

    /// Ranking finished.
    fn ranked(&self, _candidates: usize, _returned: usize) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Observer that emits `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn tokens_extracted(&self, tokens: &Tokens) {
        trace!(target: "shelfsort", tokens = ?tokens.as_slice(), "tokenized phrase");
    }

    fn sort_resolved(&self, phrase: &str, resolution: &SortResolution) {
        debug!(
            target: "shelfsort",
            phrase,
            mode = %resolution.mode,
            origin = ?resolution.origin,
            direction = ?resolution.direction,
            tokens = ?resolution.tokens,
            "resolved sort"
        );
    }

    fn out_of_scope(&self, item_types: &[String]) {
        debug!(target: "shelfsort", ?item_types, "item types out of scope, passing through");
    }

    fn plan_augmented(&self, augmentation: &Augmentation) {
        debug!(
            target: "shelfsort",
            search_active = augmentation.search_active,
            fields = augmentation.fields.len(),
            order_keys = augmentation.order.len(),
            joins = augmentation.joins.len(),
            "augmented plan"
        );
    }

    fn ranked(&self, candidates: usize, returned: usize) {
        debug!(target: "shelfsort", candidates, returned, "ranked");
    }
}
