use std::env;
use std::fs;
use std::path::Path;

use basket_core::config::{resolve_config_path, LoadOptions};
use serde::Serialize;
use toml::Value;

use crate::commands::{load_config, CommandResult};

#[derive(Debug, Serialize)]
struct ConfigReport {
    command: &'static str,
    status: &'static str,
    precedence: &'static str,
    config_file: Option<String>,
    entries: Vec<ConfigEntry>,
}

#[derive(Debug, Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
    source: String,
}

struct SourceLookup<'a> {
    doc: Option<Value>,
    path: Option<&'a Path>,
}

impl SourceLookup<'_> {
    fn entry(&self, key: &'static str, value: String, env_keys: &[&str]) -> ConfigEntry {
        ConfigEntry { key, value, source: self.source_of(key, env_keys) }
    }

    fn source_of(&self, key_path: &str, env_keys: &[&str]) -> String {
        let env_hit = env_keys
            .iter()
            .find(|env_key| env::var(env_key).is_ok_and(|value| !value.trim().is_empty()));
        if let Some(env_key) = env_hit {
            return format!("env ({env_key})");
        }

        if let Some(doc) = &self.doc {
            if contains_path(doc, key_path) {
                let file_path = self
                    .path
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "config file".to_string());
                return format!("file ({file_path})");
            }
        }

        "default".to_string()
    }
}

pub fn run(options: &LoadOptions) -> CommandResult {
    let config = match load_config("config", options) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let config_path = resolve_config_path(options.config_path.as_deref());
    let lookup = SourceLookup {
        doc: load_config_file_doc(config_path.as_deref()),
        path: config_path.as_deref(),
    };

    let entries = vec![
        lookup.entry(
            "processing.tick_interval_secs",
            config.processing.tick_interval_secs.to_string(),
            &["BASKET_PROCESSING_TICK_INTERVAL_SECS"],
        ),
        lookup.entry(
            "pricing.free_shipping_threshold",
            config.pricing.free_shipping_threshold.to_string(),
            &["BASKET_PRICING_FREE_SHIPPING_THRESHOLD"],
        ),
        lookup.entry(
            "pricing.flat_shipping_fee",
            config.pricing.flat_shipping_fee.to_string(),
            &["BASKET_PRICING_FLAT_SHIPPING_FEE"],
        ),
        lookup.entry(
            "pricing.tax_rate",
            config.pricing.tax_rate.to_string(),
            &["BASKET_PRICING_TAX_RATE"],
        ),
        lookup.entry(
            "pricing.discount_rate",
            config.pricing.discount_rate.to_string(),
            &["BASKET_PRICING_DISCOUNT_RATE"],
        ),
        lookup.entry(
            "catalog.autocomplete_limit",
            config.catalog.autocomplete_limit.to_string(),
            &["BASKET_CATALOG_AUTOCOMPLETE_LIMIT"],
        ),
        lookup.entry(
            "catalog.recommendation_limit",
            config.catalog.recommendation_limit.to_string(),
            &["BASKET_CATALOG_RECOMMENDATION_LIMIT"],
        ),
        lookup.entry(
            "logging.level",
            config.logging.level.clone(),
            &["BASKET_LOGGING_LEVEL", "BASKET_LOG_LEVEL"],
        ),
        lookup.entry(
            "logging.format",
            format!("{:?}", config.logging.format).to_lowercase(),
            &["BASKET_LOGGING_FORMAT", "BASKET_LOG_FORMAT"],
        ),
    ];

    CommandResult::report(
        "config",
        &ConfigReport {
            command: "config",
            status: "ok",
            precedence: "env > file > default",
            config_file: config_path.as_ref().map(|path| path.display().to_string()),
            entries,
        },
    )
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}
