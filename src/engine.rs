// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The per-request façade.
//!
//! ```text
//! SearchRequest ──prepare──▶ Query (tokens, memoized sort)
//!                              │
//!              ┌───────────────┼──────────────────┐
//!              ▼               ▼                  ▼
//!          augment          search              rank
//!       (your plan)    (plan + ItemStore)   (items, no plan)
//! ```
//!
//! `search` and `rank` return the same items in the same order with the same
//! scores. The first goes through a plan and a store, the second scores
//! directly; both walk the chain from [`order_chain`].
//!
//! [`order_chain`]: crate::scoring::ranking::order_chain

use std::sync::{Arc, OnceLock};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::RankingConfig;
use crate::observe::{NoopObserver, SearchObserver};
use crate::plan::{emit, Augmentation, QueryPlan, SideTables};
use crate::scoring::ranking::{sort_ranked, OrderStep};
use crate::scoring::score_candidate;
use crate::sort::{resolve, AmbientOrder, SortResolution};
use crate::store::{dedupe_by_id, in_item_types, ItemStore};
use crate::tokenize::{tokenize, Tokens};
use crate::types::{RankedItem, SearchableItem};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Below this many candidates, scoring stays on one thread.
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 2048;

/// One search request as the host sees it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    /// Free-text phrase; blank disables search.
    pub phrase: String,
    /// Explicit sort directive, e.g. `price-desc`.
    pub orderby: Option<String>,
    /// The host's own ordering state.
    pub ambient: AmbientOrder,
    /// Item types the query covers.
    pub item_types: Vec<String>,
    /// Seed for random ordering; the clock when absent.
    pub random_seed: Option<u64>,
    pub limit: Option<usize>,
}

impl SearchRequest {
    /// A product search for `phrase`.
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            item_types: vec!["product".to_string()],
            ..Default::default()
        }
    }

    pub fn with_orderby(mut self, orderby: impl Into<String>) -> Self {
        self.orderby = Some(orderby.into());
        self
    }

    pub fn with_ambient(mut self, ambient: AmbientOrder) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_item_types<S: Into<String>>(mut self, types: impl IntoIterator<Item = S>) -> Self {
        self.item_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A prepared request. Sort resolution runs at most once per `Query`.
#[derive(Debug)]
pub struct Query {
    request: SearchRequest,
    tokens: Tokens,
    in_scope: bool,
    random_seed: u64,
    sort: OnceLock<SortResolution>,
}

impl Query {
    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    pub fn tokens(&self) -> &Tokens {
        &self.tokens
    }

    /// The request's item types are ranked here.
    pub fn in_scope(&self) -> bool {
        self.in_scope
    }

    /// In scope and the phrase produced tokens.
    pub fn is_search_active(&self) -> bool {
        self.in_scope && !self.tokens.is_empty()
    }

    pub fn random_seed(&self) -> u64 {
        self.random_seed
    }

    /// Sort resolution, if it already ran.
    pub fn resolved_sort(&self) -> Option<&SortResolution> {
        self.sort.get()
    }
}

fn clock_seed() -> u64 {
    Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64
}

/// Ranking engine: config plus an observer. Cheap to share across threads.
#[derive(Clone)]
pub struct Engine {
    config: RankingConfig,
    observer: Arc<dyn SearchObserver>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(RankingConfig::default())
    }
}

impl Engine {
    pub fn new(config: RankingConfig) -> Self {
        Self {
            config,
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: impl SearchObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Tokenize and scope a request.
    pub fn prepare(&self, request: SearchRequest) -> Query {
        let tokens = tokenize(&request.phrase);
        crate::contracts::check_tokens_unique(tokens.as_slice());
        self.observer.tokens_extracted(&tokens);
        let in_scope = self.config.in_scope(&request.item_types);
        let random_seed = request.random_seed.unwrap_or_else(clock_seed);
        Query {
            request,
            tokens,
            in_scope,
            random_seed,
            sort: OnceLock::new(),
        }
    }

    /// Resolve the query's sort mode, once.
    pub fn sort<'q>(&self, query: &'q Query) -> &'q SortResolution {
        query.sort.get_or_init(|| {
            let resolution = resolve(
                query.request.orderby.as_deref(),
                &query.request.ambient,
                &self.config,
            );
            self.observer.sort_resolved(query.tokens.phrase(), &resolution);
            resolution
        })
    }

    /// Ordering chain for an in-scope query.
    pub fn chain(&self, query: &Query) -> Vec<OrderStep> {
        self.sort(query)
            .chain(!query.tokens.is_empty(), query.random_seed)
    }

    /// Augment a host plan for this query. Out-of-scope queries and queries
    /// with neither a phrase nor a sort leave the plan untouched.
    pub fn augment(
        &self,
        query: &Query,
        plan: &mut QueryPlan,
        side_tables: SideTables,
    ) -> Augmentation {
        if !query.in_scope {
            self.observer.out_of_scope(&query.request.item_types);
            return Augmentation::passthrough();
        }
        let augmentation = emit(&query.tokens, &self.chain(query), side_tables, &self.config);
        if plan.apply(&augmentation, &self.config) {
            self.observer.plan_augmented(&augmentation);
        }
        augmentation
    }

    /// A fresh plan for this query, augmented.
    pub fn plan(&self, query: &Query, side_tables: SideTables) -> QueryPlan {
        let mut plan = QueryPlan::new(query.request.item_types.iter().cloned())
            .with_limit(query.request.limit);
        self.augment(query, &mut plan, side_tables);
        plan
    }

    /// Run the query through a store. Store errors come back unchanged.
    pub fn search<S: ItemStore>(
        &self,
        query: &Query,
        store: &S,
    ) -> Result<Vec<RankedItem>, S::Error> {
        let plan = self.plan(query, store.side_tables());
        let items = store.execute(&plan)?;
        self.observer.ranked(items.len(), items.len());
        Ok(items)
    }

    /// Rank items directly, without a plan.
    pub fn rank(&self, query: &Query, items: &[SearchableItem]) -> Vec<RankedItem> {
        let scoped = items
            .iter()
            .filter(|item| in_item_types(item, &query.request.item_types));

        if !query.in_scope {
            self.observer.out_of_scope(&query.request.item_types);
            let mut passed: Vec<RankedItem> = scoped
                .map(|item| RankedItem {
                    item: item.clone(),
                    score: None,
                })
                .collect();
            truncate(&mut passed, query.request.limit);
            return passed;
        }

        let candidates = dedupe_by_id(scoped);
        let total = candidates.len();
        let mut ranked = if query.tokens.is_empty() {
            candidates
                .into_iter()
                .map(|item| RankedItem {
                    item: item.clone(),
                    score: None,
                })
                .collect()
        } else {
            self.score_all(&query.tokens, &candidates)
        };

        let chain = self.chain(query);
        sort_ranked(&mut ranked, &chain);
        crate::contracts::check_ranked_order(&ranked, &chain);
        truncate(&mut ranked, query.request.limit);
        self.observer.ranked(total, ranked.len());
        ranked
    }

    fn score_all(&self, tokens: &Tokens, candidates: &[&SearchableItem]) -> Vec<RankedItem> {
        let score = |item: &&SearchableItem| {
            score_candidate(tokens, item, &self.config).map(|record| RankedItem {
                item: (*item).clone(),
                score: Some(record),
            })
        };

        #[cfg(feature = "parallel")]
        if candidates.len() >= PARALLEL_THRESHOLD {
            return candidates.par_iter().filter_map(score).collect();
        }

        candidates.iter().filter_map(score).collect()
    }
}

fn truncate(items: &mut Vec<RankedItem>, limit: Option<usize>) {
    if let Some(limit) = limit {
        items.truncate(limit);
    }
}
