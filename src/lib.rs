// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Weighted catalog search ranking.
//!
//! Takes a shopper's phrase and a catalog query and decides which items match
//! and in what order. Matching is plain case-insensitive substring tests over
//! title, description, attributes, SKU and price; ranking is a fixed chain of
//! signals with deterministic tiebreaks.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐   ┌────────────┐   ┌─────────────┐   ┌──────────────┐
//! │ tokenize   │──▶│ matcher    │──▶│ scoring     │──▶│ ranking      │
//! │ (Tokens)   │   │(FieldMatch)│   │(ScoreRecord)│   │ (order_chain)│
//! └────────────┘   └────────────┘   └─────────────┘   └──────┬───────┘
//!                                                            │
//! ┌────────────┐                    ┌─────────────┐          │
//! │ sort       │───SortMode────────▶│ plan        │◀─────────┘
//! │ (resolve)  │                    │ (emit, SQL, │
//! └────────────┘                    │  eval)      │
//!                                   └──────┬──────┘
//!                                          ▼
//!                                   ┌─────────────┐
//!                                   │ store       │
//!                                   │ (ItemStore) │
//!                                   └─────────────┘
//! ```
//!
//! [`Engine`] wires it together per request.
//!
//! # Usage
//!
//! ```
//! use shelfsort::{Engine, MemoryStore, SearchRequest};
//! use shelfsort::testing::sample_catalog;
//!
//! let engine = Engine::default();
//! let store = MemoryStore::new(sample_catalog());
//! let query = engine.prepare(SearchRequest::new("blue shirt"));
//!
//! let results = engine.search(&query, &store).unwrap();
//! assert_eq!(results[0].item.title, "Blue Shirt");
//! ```

// Module declarations
pub mod config;
pub mod contracts;
mod engine;
mod error;
pub mod matcher;
pub mod observe;
pub mod plan;
pub mod scoring;
pub mod sort;
pub mod store;
pub mod testing;
mod tokenize;
mod types;
mod utils;

// Re-exports for public API
pub use config::{FieldWeights, MetaKeys, PenaltyConfig, RankingConfig};
pub use engine::{Engine, Query, SearchRequest};
pub use error::{Error, Result};
pub use matcher::{match_token, FieldMatches};
pub use observe::{NoopObserver, SearchObserver, TracingObserver};
pub use plan::{Augmentation, QueryPlan, SideTables, SqlClauses, SqlNames, SqlRenderer};
pub use scoring::ranking::{order_chain, OrderStep, OrderTerm, Signal};
pub use scoring::{score_candidate, score_item};
pub use sort::{resolve, AmbientOrder, OrderByValue, SortOrigin, SortResolution};
pub use store::{ItemStore, MemoryStore};
pub use tokenize::{tokenize, Tokens};
pub use types::{
    Direction, ItemId, RankedItem, ScoreRecord, SearchField, SearchableItem, SortMode,
};
pub use utils::{normalize_sort_key, parse_price};
