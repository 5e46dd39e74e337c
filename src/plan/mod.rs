// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query plans: what the item store is asked to do.
//!
//! ```text
//! Tokens + OrderStep chain
//!        │
//!        ▼  emitter::emit
//!   Augmentation ──apply──▶ QueryPlan
//!                               │
//!              ┌────────────────┴────────────────┐
//!              ▼                                 ▼
//!      render::SqlRenderer               eval (MemoryStore)
//!        SQL fragments                   in-memory rows
//! ```

pub mod emitter;
pub mod eval;
pub mod expr;
pub mod render;

pub use emitter::{aliases, emit, Augmentation, FilterMode, Join, JoinSource, QueryPlan, SideTables};
pub use expr::{Column, DerivedField, Expr, OrderKey};
pub use render::{SqlClauses, SqlNames, SqlRenderer};
