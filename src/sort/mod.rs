// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Which ordering governs a query.

pub mod orderby;
mod resolver;

pub use orderby::{parse_ambient, AmbientOrder, AmbientTokens, OrderByValue, OrderPairs};
pub use resolver::{ambient_mode, explicit_mode, resolve, SortOrigin, SortResolution};
