use basket_core::catalog::Catalog;
use basket_core::config::LoadOptions;
use basket_core::domain::product::Product;
use serde::Serialize;

use crate::commands::{load_config, CommandResult};

#[derive(Debug, Serialize)]
struct SearchReport<'a> {
    command: &'static str,
    status: &'static str,
    term: &'a str,
    limit: usize,
    matches: Vec<&'a Product>,
}

pub fn run(options: &LoadOptions, term: &str) -> CommandResult {
    let config = match load_config("search", options) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let catalog = Catalog::sample();
    let limit = config.catalog.autocomplete_limit;
    let matches = catalog.search(term, limit);
    tracing::debug!(
        event_name = "cli.search",
        term,
        matches = matches.len(),
        "catalog search completed"
    );

    CommandResult::report(
        "search",
        &SearchReport { command: "search", status: "ok", term, limit, matches },
    )
}
