use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::DEFAULT_AUTOCOMPLETE_LIMIT;
use crate::orders::DEFAULT_TICK_INTERVAL;
use crate::pricing::PricingPolicy;
use crate::recommendation::DEFAULT_RECOMMENDATION_LIMIT;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub processing: ProcessingConfig,
    pub pricing: PricingPolicy,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct ProcessingConfig {
    pub tick_interval_secs: u64,
}

impl ProcessingConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }
}

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub autocomplete_limit: usize,
    pub recommendation_limit: usize,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub tick_interval_secs: Option<u64>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub autocomplete_limit: Option<usize>,
    pub recommendation_limit: Option<usize>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            processing: ProcessingConfig { tick_interval_secs: DEFAULT_TICK_INTERVAL.as_secs() },
            pricing: PricingPolicy::default(),
            catalog: CatalogConfig {
                autocomplete_limit: DEFAULT_AUTOCOMPLETE_LIMIT,
                recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("basket.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(processing) = patch.processing {
            if let Some(tick_interval_secs) = processing.tick_interval_secs {
                self.processing.tick_interval_secs = tick_interval_secs;
            }
        }

        if let Some(pricing) = patch.pricing {
            if let Some(threshold) = pricing.free_shipping_threshold {
                self.pricing.free_shipping_threshold = threshold;
            }
            if let Some(fee) = pricing.flat_shipping_fee {
                self.pricing.flat_shipping_fee = fee;
            }
            if let Some(tax_rate) = pricing.tax_rate {
                self.pricing.tax_rate = tax_rate;
            }
            if let Some(discount_rate) = pricing.discount_rate {
                self.pricing.discount_rate = discount_rate;
            }
        }

        if let Some(catalog) = patch.catalog {
            if let Some(autocomplete_limit) = catalog.autocomplete_limit {
                self.catalog.autocomplete_limit = autocomplete_limit;
            }
            if let Some(recommendation_limit) = catalog.recommendation_limit {
                self.catalog.recommendation_limit = recommendation_limit;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("BASKET_PROCESSING_TICK_INTERVAL_SECS") {
            self.processing.tick_interval_secs =
                parse_value("BASKET_PROCESSING_TICK_INTERVAL_SECS", &value)?;
        }

        if let Some(value) = read_env("BASKET_PRICING_FREE_SHIPPING_THRESHOLD") {
            self.pricing.free_shipping_threshold =
                parse_value("BASKET_PRICING_FREE_SHIPPING_THRESHOLD", &value)?;
        }
        if let Some(value) = read_env("BASKET_PRICING_FLAT_SHIPPING_FEE") {
            self.pricing.flat_shipping_fee =
                parse_value("BASKET_PRICING_FLAT_SHIPPING_FEE", &value)?;
        }
        if let Some(value) = read_env("BASKET_PRICING_TAX_RATE") {
            self.pricing.tax_rate = parse_value("BASKET_PRICING_TAX_RATE", &value)?;
        }
        if let Some(value) = read_env("BASKET_PRICING_DISCOUNT_RATE") {
            self.pricing.discount_rate = parse_value("BASKET_PRICING_DISCOUNT_RATE", &value)?;
        }

        if let Some(value) = read_env("BASKET_CATALOG_AUTOCOMPLETE_LIMIT") {
            self.catalog.autocomplete_limit =
                parse_value("BASKET_CATALOG_AUTOCOMPLETE_LIMIT", &value)?;
        }
        if let Some(value) = read_env("BASKET_CATALOG_RECOMMENDATION_LIMIT") {
            self.catalog.recommendation_limit =
                parse_value("BASKET_CATALOG_RECOMMENDATION_LIMIT", &value)?;
        }

        let log_level = read_env("BASKET_LOGGING_LEVEL").or_else(|| read_env("BASKET_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("BASKET_LOGGING_FORMAT").or_else(|| read_env("BASKET_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(tick_interval_secs) = overrides.tick_interval_secs {
            self.processing.tick_interval_secs = tick_interval_secs;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
        if let Some(autocomplete_limit) = overrides.autocomplete_limit {
            self.catalog.autocomplete_limit = autocomplete_limit;
        }
        if let Some(recommendation_limit) = overrides.recommendation_limit {
            self.catalog.recommendation_limit = recommendation_limit;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_processing(&self.processing)?;
        validate_pricing(&self.pricing)?;
        validate_catalog(&self.catalog)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("basket.toml"), PathBuf::from("config/basket.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_processing(processing: &ProcessingConfig) -> Result<(), ConfigError> {
    if processing.tick_interval_secs == 0 || processing.tick_interval_secs > 3_600 {
        return Err(ConfigError::Validation(
            "processing.tick_interval_secs must be in range 1..=3600".to_string(),
        ));
    }

    Ok(())
}

fn validate_pricing(pricing: &PricingPolicy) -> Result<(), ConfigError> {
    if pricing.free_shipping_threshold.is_sign_negative() {
        return Err(ConfigError::Validation(
            "pricing.free_shipping_threshold must not be negative".to_string(),
        ));
    }
    if pricing.flat_shipping_fee.is_sign_negative() {
        return Err(ConfigError::Validation(
            "pricing.flat_shipping_fee must not be negative".to_string(),
        ));
    }

    for (key, rate) in
        [("pricing.tax_rate", pricing.tax_rate), ("pricing.discount_rate", pricing.discount_rate)]
    {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(ConfigError::Validation(format!(
                "{key} must be a fraction in range 0..=1 (got {rate})"
            )));
        }
    }

    Ok(())
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    if catalog.autocomplete_limit == 0 {
        return Err(ConfigError::Validation(
            "catalog.autocomplete_limit must be greater than zero".to_string(),
        ));
    }
    if catalog.recommendation_limit == 0 {
        return Err(ConfigError::Validation(
            "catalog.recommendation_limit must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    processing: Option<ProcessingPatch>,
    pricing: Option<PricingPatch>,
    catalog: Option<CatalogPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ProcessingPatch {
    tick_interval_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct PricingPatch {
    free_shipping_threshold: Option<Decimal>,
    flat_shipping_fee: Option<Decimal>,
    tax_rate: Option<Decimal>,
    discount_rate: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    autocomplete_limit: Option<usize>,
    recommendation_limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
