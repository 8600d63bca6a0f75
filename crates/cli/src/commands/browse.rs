use basket_core::catalog::Catalog;
use basket_core::category_index::CategoryTree;
use basket_core::config::LoadOptions;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::commands::{load_config, CommandResult};

#[derive(Debug, Serialize)]
struct BrowseReport<'a> {
    command: &'static str,
    status: &'static str,
    category: &'a str,
    product_count: usize,
    height: usize,
    levels: Vec<LevelView<'a>>,
    by_price: Vec<&'a str>,
    available_categories: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct LevelView<'a> {
    depth: usize,
    nodes: Vec<NodeView<'a>>,
}

#[derive(Debug, Serialize)]
struct NodeView<'a> {
    name: &'a str,
    icon: &'a str,
    price: Decimal,
    has_left: bool,
    has_right: bool,
}

pub fn run(options: &LoadOptions, category: &str) -> CommandResult {
    if let Err(result) = load_config("browse", options) {
        return result;
    }

    let catalog = Catalog::sample();
    let tree = CategoryTree::build(&catalog, category);
    let levels = tree
        .levels()
        .into_iter()
        .map(|level| LevelView {
            depth: level.depth,
            nodes: level
                .nodes
                .into_iter()
                .map(|node| NodeView {
                    name: &node.product.name,
                    icon: &node.product.icon,
                    price: node.product.price,
                    has_left: node.has_left,
                    has_right: node.has_right,
                })
                .collect(),
        })
        .collect();
    let by_price = tree.in_order().into_iter().map(|product| product.name.as_str()).collect();

    CommandResult::report(
        "browse",
        &BrowseReport {
            command: "browse",
            status: "ok",
            category,
            product_count: tree.len(),
            height: tree.height(),
            levels,
            by_price,
            available_categories: catalog.categories(),
        },
    )
}
