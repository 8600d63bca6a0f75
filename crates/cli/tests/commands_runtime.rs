use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};

use basket_cli::commands::{browse, config, recommend, search, simulate};
use basket_core::config::LoadOptions;
use serde_json::Value;
use tempfile::TempDir;

#[test]
fn search_returns_capped_case_insensitive_matches() {
    with_env(&[("BASKET_CATALOG_AUTOCOMPLETE_LIMIT", "2")], || {
        let result = search::run(&LoadOptions::default(), "DAL");
        assert_eq!(result.exit_code, 0, "expected successful search");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "search");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["limit"], 2);

        let matches = payload["matches"].as_array().expect("matches array");
        assert_eq!(matches.len(), 2);
        for product in matches {
            let name = product["name"].as_str().unwrap_or_default().to_lowercase();
            assert!(name.contains("dal"), "unexpected match {name}");
        }
    });
}

#[test]
fn blank_search_returns_no_matches() {
    with_env(&[], || {
        let result = search::run(&LoadOptions::default(), "   ");
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["matches"].as_array().map(Vec::len), Some(0));
    });
}

#[test]
fn browse_reports_levels_and_sorted_prices() {
    with_env(&[], || {
        let result = browse::run(&LoadOptions::default(), "vegetables");
        assert_eq!(result.exit_code, 0, "expected successful browse");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "browse");
        let levels = payload["levels"].as_array().expect("levels array");
        assert!(!levels.is_empty());
        assert_eq!(levels[0]["nodes"].as_array().map(Vec::len), Some(1));
        assert_eq!(payload["height"], levels.len());

        let by_price = payload["by_price"].as_array().expect("by_price array");
        assert_eq!(Some(by_price.len() as u64), payload["product_count"].as_u64());
    });
}

#[test]
fn browse_unknown_category_is_an_empty_tree() {
    with_env(&[], || {
        let result = browse::run(&LoadOptions::default(), "Hardware");
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["product_count"], 0);
        assert_eq!(payload["levels"].as_array().map(Vec::len), Some(0));
        let categories = payload["available_categories"].as_array().expect("categories");
        assert!(categories.iter().any(|category| category == "Vegetables"));
    });
}

#[test]
fn recommend_single_product_ranks_by_weight() {
    with_env(&[], || {
        let result = recommend::run(&LoadOptions::default(), &["Onion - Red".to_string()]);
        assert_eq!(result.exit_code, 0, "expected successful recommendation");

        let payload = parse_payload(&result.output);
        let names = payload["recommendations"]
            .as_array()
            .expect("recommendations array")
            .iter()
            .map(|entry| entry["name"].as_str().unwrap_or_default().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, ["Tomato", "Ginger", "Garlic", "Paneer", "Potato"]);
    });
}

#[test]
fn recommend_multiple_products_excludes_the_inputs() {
    with_env(&[], || {
        let products = ["Paneer".to_string(), "ginger".to_string()];
        let result = recommend::run(&LoadOptions::default(), &products);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["products"], serde_json::json!(["Paneer", "Ginger"]));
        let recommendations = payload["recommendations"].as_array().expect("recommendations");
        assert_eq!(recommendations[0]["name"], "Onion - Red");
        assert_eq!(recommendations[0]["weight"], 21);
        assert!(recommendations
            .iter()
            .all(|entry| entry["name"] != "Paneer" && entry["name"] != "Ginger"));
    });
}

#[test]
fn recommend_unknown_product_is_a_domain_failure() {
    with_env(&[], || {
        let result = recommend::run(&LoadOptions::default(), &["Caviar".to_string()]);
        assert_eq!(result.exit_code, 4, "expected domain validation exit code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "domain_validation");
    });
}

#[test]
fn simulate_drains_every_order_in_fifo_order() {
    with_env(&[], || {
        let result = simulate::run(&LoadOptions::default(), 3, Some(10));
        assert_eq!(result.exit_code, 0, "expected successful simulation: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "simulate");
        assert_eq!(payload["tick_ms"], 10);

        let placed = payload["placed"].as_array().expect("placed array");
        let positions =
            placed.iter().map(|order| order["queue_position"].clone()).collect::<Vec<_>>();
        assert_eq!(positions, [1, 2, 3]);

        let completed = payload["completed"]
            .as_array()
            .expect("completed array")
            .iter()
            .map(|order| order["order_id"].as_str().unwrap_or_default().to_string())
            .collect::<Vec<_>>();
        assert_eq!(completed, ["ORD001", "ORD002", "ORD003"]);

        let events = payload["events"].as_array().expect("events array");
        assert!(events.iter().any(|event| event
            .as_str()
            .unwrap_or_default()
            .contains("has been processed")));
    });
}

#[test]
fn simulate_rejects_zero_orders_and_zero_tick() {
    with_env(&[], || {
        let result = simulate::run(&LoadOptions::default(), 0, Some(10));
        assert_eq!(result.exit_code, 4);
        assert_eq!(parse_payload(&result.output)["error_class"], "domain_validation");

        let result = simulate::run(&LoadOptions::default(), 1, Some(0));
        assert_eq!(result.exit_code, 2);
        assert_eq!(parse_payload(&result.output)["error_class"], "config_validation");
    });
}

#[test]
fn commands_fail_with_config_exit_code_on_invalid_env() {
    with_env(&[("BASKET_PROCESSING_TICK_INTERVAL_SECS", "0")], || {
        let result = search::run(&LoadOptions::default(), "milk");
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "search");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn config_attributes_sources() {
    with_env(&[("BASKET_LOG_LEVEL", "debug")], || {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("basket.toml");
        fs::write(&path, "[pricing]\ntax_rate = \"0.08\"\n").expect("write config");

        let options = LoadOptions { config_path: Some(path), ..LoadOptions::default() };
        let result = config::run(&options);
        assert_eq!(result.exit_code, 0, "expected config report");

        let payload = parse_payload(&result.output);
        let entries = payload["entries"].as_array().expect("entries array");
        let entry = |key: &str| {
            entries.iter().find(|entry| entry["key"] == key).cloned().expect("entry present")
        };

        assert_eq!(entry("pricing.tax_rate")["value"], "0.08");
        let tax_source = entry("pricing.tax_rate")["source"].clone();
        assert!(tax_source.as_str().unwrap_or_default().starts_with("file"));
        assert_eq!(entry("logging.level")["value"], "debug");
        assert_eq!(entry("logging.level")["source"], "env (BASKET_LOG_LEVEL)");
        assert_eq!(entry("processing.tick_interval_secs")["source"], "default");
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "BASKET_PROCESSING_TICK_INTERVAL_SECS",
        "BASKET_PRICING_FREE_SHIPPING_THRESHOLD",
        "BASKET_PRICING_FLAT_SHIPPING_FEE",
        "BASKET_PRICING_TAX_RATE",
        "BASKET_PRICING_DISCOUNT_RATE",
        "BASKET_CATALOG_AUTOCOMPLETE_LIMIT",
        "BASKET_CATALOG_RECOMMENDATION_LIMIT",
        "BASKET_LOGGING_LEVEL",
        "BASKET_LOGGING_FORMAT",
        "BASKET_LOG_LEVEL",
        "BASKET_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
