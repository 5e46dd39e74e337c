// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the shelfsort command-line interface.
//!
//! Three subcommands: `search` ranks a JSON catalog, `plan` prints the SQL a
//! store would run, and `resolve` shows which sort mode a request ends up
//! with.

pub mod display;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "shelfsort",
    about = "Weighted catalog search ranking and query plans",
    version
)]
pub struct Cli {
    /// Ranking config (JSON). Defaults apply to anything it leaves out.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Sort inputs shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct SortArgs {
    /// Explicit sort directive (price, price-desc, popularity, rating, date,
    /// menu_order, rand, relevance)
    #[arg(long)]
    pub orderby: Option<String>,

    /// Ambient order-by: a token, a space/comma list, or JSON (list or map)
    #[arg(long = "ambient-orderby")]
    pub ambient_orderby: Option<String>,

    /// Meta key the ambient order-by sorts on (e.g. _price)
    #[arg(long = "meta-key")]
    pub meta_key: Option<String>,

    /// Direction hint (asc or desc)
    #[arg(long)]
    pub order: Option<String>,

    /// Item types the query covers
    #[arg(long = "item-type", default_values_t = vec!["product".to_string()])]
    pub item_types: Vec<String>,

    /// Seed for random ordering
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Side-table columns the target store exposes without a join.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exposed {
    Price,
    Sku,
    Attributes,
    Popularity,
    Rating,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank a JSON catalog for a phrase
    Search {
        /// Catalog file: a JSON array of items
        #[arg(short, long)]
        catalog: PathBuf,

        /// Search phrase
        #[arg(short, long, default_value = "")]
        phrase: String,

        #[command(flatten)]
        sort: SortArgs,

        /// Maximum number of results to return
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Show every score signal per result
        #[arg(long)]
        explain: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the SQL clauses for a phrase and sort
    Plan {
        /// Search phrase
        #[arg(short, long, default_value = "")]
        phrase: String,

        #[command(flatten)]
        sort: SortArgs,

        /// Columns the store already exposes (repeatable)
        #[arg(long, value_enum)]
        exposed: Vec<Exposed>,

        /// Print the assembled SELECT instead of the clauses
        #[arg(long)]
        select: bool,
    },

    /// Show which sort mode a request resolves to
    Resolve {
        /// Search phrase
        #[arg(short, long, default_value = "")]
        phrase: String,

        #[command(flatten)]
        sort: SortArgs,
    },
}
