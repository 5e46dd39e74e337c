// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! shelfsort CLI: rank a catalog, print the SQL plan, or explain a sort.

mod cli;

use std::path::Path;
use std::sync::Once;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::display::{
    flag, mode_badge, origin_label, pad_right, relevance_value, row, section_bot, section_mid,
    section_top, themed, truncate_text, wrapped_rows, Tone, BOLD, DIM,
};
use cli::{Cli, Commands, Exposed, SortArgs};
use shelfsort::{
    AmbientOrder, Engine, MemoryStore, OrderByValue, RankedItem, RankingConfig, SearchRequest,
    SideTables, SqlNames, SqlRenderer, TracingObserver,
};

static INIT: Once = Once::new();

/// Logs go to stderr. `SHELFSORT_LOG` overrides the default filter.
fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("SHELFSORT_LOG")
            .unwrap_or_else(|_| EnvFilter::new("shelfsort=info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    });
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", themed(Tone::Error, &[BOLD], "error:"), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let engine = Engine::new(config).with_observer(TracingObserver);

    match cli.command {
        Commands::Search {
            catalog,
            phrase,
            sort,
            limit,
            explain,
            json,
        } => {
            let store = MemoryStore::from_path(&catalog)
                .with_context(|| format!("loading catalog {}", catalog.display()))?;
            tracing::info!(items = store.len(), "loaded catalog");

            let request = build_request(phrase, &sort)?.with_limit(limit);
            let query = engine.prepare(request);
            let results = match engine.search(&query, &store) {
                Ok(results) => results,
                Err(never) => match never {},
            };

            if json {
                let out = serde_json::to_string_pretty(&results)
                    .context("serializing results")?;
                println!("{}", out);
            } else {
                print_results(&engine, &query, &results, explain);
            }
        }

        Commands::Plan {
            phrase,
            sort,
            exposed,
            select,
        } => {
            let request = build_request(phrase, &sort)?;
            let query = engine.prepare(request);
            let plan = engine.plan(&query, side_tables(&exposed));
            let renderer = SqlRenderer::new(SqlNames::default());
            let clauses = renderer.render(&plan);

            if select {
                println!("{}", clauses.to_select(renderer.names()));
                return Ok(());
            }

            section_top("PLAN");
            row(&format!(
                " search {}   augmented {}   joins {}",
                flag(query.is_search_active()),
                flag(plan.is_augmented()),
                plan.joins.len()
            ));
            for (label, text) in [
                ("SCOPE", &clauses.scope),
                ("FIELDS", &clauses.fields),
                ("JOIN", &clauses.join),
                ("WHERE", &clauses.filter),
                ("GROUP BY", &clauses.groupby),
                ("ORDER BY", &clauses.orderby),
            ] {
                section_mid(label);
                wrapped_rows(text);
            }
            section_bot();
        }

        Commands::Resolve { phrase, sort } => {
            let request = build_request(phrase, &sort)?;
            let query = engine.prepare(request);
            let resolution = engine.sort(&query).clone();
            let scored = !query.tokens().is_empty();

            section_top("SORT");
            row(&format!(
                " {} {}",
                mode_badge(resolution.mode),
                origin_label(resolution.origin)
            ));
            row(&format!(
                " direction {}",
                resolution
                    .direction
                    .map_or("(none)", |d| d.as_str())
            ));
            row(&format!(" ambient tokens {:?}", resolution.tokens));
            row(&format!(" passthrough {}", flag(resolution.is_passthrough(scored))));
            section_mid("CHAIN");
            for step in engine.chain(&query) {
                row(&format!(" {:?}", step));
            }
            section_bot();
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<RankingConfig> {
    match path {
        Some(path) => RankingConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(RankingConfig::default()),
    }
}

/// Build a request from the shared sort flags.
fn build_request(phrase: String, sort: &SortArgs) -> Result<SearchRequest> {
    let ambient = AmbientOrder {
        orderby: sort
            .ambient_orderby
            .as_deref()
            .map(parse_orderby_arg)
            .transpose()?,
        meta_key: sort.meta_key.clone(),
        order: sort.order.clone(),
    };

    let mut request = SearchRequest::new(phrase)
        .with_ambient(ambient)
        .with_item_types(sort.item_types.iter().cloned());
    request.orderby = sort.orderby.clone();
    request.random_seed = sort.seed;
    Ok(request)
}

/// JSON lists and maps parse as such; anything else is a plain token string.
fn parse_orderby_arg(raw: &str) -> Result<OrderByValue> {
    let trimmed = raw.trim_start();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        serde_json::from_str(trimmed).with_context(|| format!("parsing --ambient-orderby {raw}"))
    } else {
        Ok(OrderByValue::from(raw))
    }
}

fn side_tables(exposed: &[Exposed]) -> SideTables {
    let mut tables = SideTables::NONE;
    for column in exposed {
        match column {
            Exposed::Price => tables.price = true,
            Exposed::Sku => tables.sku = true,
            Exposed::Attributes => tables.attributes = true,
            Exposed::Popularity => tables.popularity = true,
            Exposed::Rating => tables.rating = true,
        }
    }
    tables
}

fn print_results(engine: &Engine, query: &shelfsort::Query, results: &[RankedItem], explain: bool) {
    let resolution = engine.sort(query);
    section_top("RESULTS");
    row(&format!(
        " {} {}   tokens {:?}",
        mode_badge(resolution.mode),
        origin_label(resolution.origin),
        query.tokens().as_slice()
    ));

    if results.is_empty() {
        row(&themed(Tone::Muted, &[DIM], " no matches"));
        section_bot();
        return;
    }

    section_mid(&format!("{} ITEMS", results.len()));
    for (rank, ranked) in results.iter().enumerate() {
        let title = pad_right(&truncate_text(&ranked.item.title, 44), 44);
        let price = ranked.item.price.as_deref().unwrap_or("-");
        let score = ranked
            .score
            .map_or_else(|| "     -".to_string(), |s| relevance_value(s.relevance));
        row(&format!(
            " {:>3}. {} {} {:>10} #{}",
            rank + 1,
            themed(Tone::Heading, &[], &title),
            score,
            truncate_text(price, 10),
            ranked.item.id
        ));

        if let (true, Some(s)) = (explain, ranked.score) {
            row(&themed(
                Tone::Muted,
                &[DIM],
                &format!(
                    "      exact {} title-phrase {} ordered {} all(t/a/c) {}{}{}",
                    flag(s.exact_match),
                    flag(s.title_exact_phrase),
                    flag(s.title_ordered_phrase),
                    flag(s.title_all_tokens),
                    flag(s.attr_all_tokens),
                    flag(s.content_all_tokens),
                ),
            ));
            row(&themed(
                Tone::Muted,
                &[DIM],
                &format!(
                    "      hits t{} a{} c{} any{}   token score {}   penalty {}",
                    s.title_token_hits,
                    s.attr_token_hits,
                    s.content_token_hits,
                    s.overall_token_hits,
                    s.token_score,
                    s.universal_penalty
                ),
            ));
        }
    }
    section_bot();
}
