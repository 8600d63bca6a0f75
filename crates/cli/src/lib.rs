pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use basket_core::config::{AppConfig, LoadOptions, LogFormat};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "basket",
    about = "Basket storefront simulator CLI",
    long_about = "Search the sample catalog, browse category price trees, ask for pairing \
                  recommendations and run the order fulfillment loop.",
    after_help = "Examples:\n  basket search dal\n  basket browse Vegetables\n  \
                  basket recommend \"Onion - Red\" Paneer\n  \
                  basket simulate --orders 3 --tick-ms 200"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a basket.toml configuration file")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Autocomplete product names from the catalog")]
    Search { term: String },
    #[command(about = "Show a category's products as a price-ordered tree")]
    Browse { category: String },
    #[command(about = "Recommend products that pair well with one or more products")]
    Recommend {
        #[arg(required = true, num_args = 1..)]
        products: Vec<String>,
    },
    #[command(about = "Place sample orders and run the fulfillment loop until the queue drains")]
    Simulate {
        #[arg(long, default_value_t = 3, help = "Number of orders to place")]
        orders: u32,
        #[arg(long, help = "Tick interval in milliseconds (defaults to the configured interval)")]
        tick_ms: Option<u64>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = LoadOptions { config_path: cli.config.clone(), ..LoadOptions::default() };

    if let Ok(config) = AppConfig::load(options.clone()) {
        init_logging(&config);
    }

    let result = match cli.command {
        Command::Search { term } => commands::search::run(&options, &term),
        Command::Browse { category } => commands::browse::run(&options, &category),
        Command::Recommend { products } => commands::recommend::run(&options, &products),
        Command::Simulate { orders, tick_ms } => commands::simulate::run(&options, orders, tick_ms),
        Command::Config => commands::config::run(&options),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Logs go to stderr so stdout carries only the command payload.
pub fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(log_level);

    let _ = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
