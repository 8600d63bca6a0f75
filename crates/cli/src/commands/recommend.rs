use basket_core::catalog::Catalog;
use basket_core::config::LoadOptions;
use basket_core::errors::DomainError;
use basket_core::recommendation::{Recommendation, RecommendationGraph};
use serde::Serialize;

use crate::commands::{load_config, CommandResult};

#[derive(Debug, Serialize)]
struct RecommendReport {
    command: &'static str,
    status: &'static str,
    products: Vec<String>,
    limit: usize,
    recommendations: Vec<Recommendation>,
}

pub fn run(options: &LoadOptions, products: &[String]) -> CommandResult {
    let config = match load_config("recommend", options) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let catalog = Catalog::sample();
    let products = match canonical_names(&catalog, products) {
        Ok(products) => products,
        Err(error) => return CommandResult::from_domain_error("recommend", &error),
    };

    let graph = RecommendationGraph::sample();
    let limit = config.catalog.recommendation_limit;
    let recommendations = match products.as_slice() {
        [single] => graph.recommendations(single, limit),
        many => graph.multi_product_recommendations(many, limit),
    };

    CommandResult::report(
        "recommend",
        &RecommendReport { command: "recommend", status: "ok", products, limit, recommendations },
    )
}

fn canonical_names(catalog: &Catalog, products: &[String]) -> Result<Vec<String>, DomainError> {
    if products.iter().all(|name| name.trim().is_empty()) {
        return Err(DomainError::BlankProductName);
    }

    products
        .iter()
        .filter(|name| !name.trim().is_empty())
        .map(|name| {
            catalog
                .find_by_name(name)
                .map(|product| product.name.clone())
                .ok_or_else(|| DomainError::ProductNotFound(name.trim().to_string()))
        })
        .collect()
}
