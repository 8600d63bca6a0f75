use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use basket_core::config::{AppConfig, LoadOptions};
use basket_core::domain::customer::CustomerDetails;
use basket_core::domain::order::{Order, OrderId};
use basket_core::errors::{ApplicationError, DomainError};
use basket_core::notify::InMemoryNotifier;
use basket_core::pricing::CartTotals;
use basket_core::session::ShopSession;
use serde::Serialize;

use crate::commands::{load_config, CommandResult, EXIT_CONFIG, EXIT_DOMAIN, EXIT_RUNTIME};

const DRAIN_GRACE: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
struct SimulationReport {
    command: &'static str,
    status: &'static str,
    session_id: String,
    tick_ms: u64,
    placed: Vec<PlacedOrder>,
    completed: Vec<CompletedOrder>,
    events: Vec<String>,
}

#[derive(Debug, Serialize)]
struct PlacedOrder {
    order_id: OrderId,
    queue_position: Option<usize>,
}

#[derive(Debug, Serialize)]
struct CompletedOrder {
    order_id: OrderId,
    customer: String,
    items: Vec<String>,
    totals: CartTotals,
}

impl From<Order> for CompletedOrder {
    fn from(order: Order) -> Self {
        let items = order
            .items
            .iter()
            .map(|line| format!("{} {} x{}", line.icon, line.name, line.quantity))
            .collect();
        Self { order_id: order.id, customer: order.customer.name, items, totals: order.totals }
    }
}

enum SimulationFailure {
    Application(ApplicationError),
    Stalled(anyhow::Error),
}

pub fn run(options: &LoadOptions, orders: u32, tick_ms: Option<u64>) -> CommandResult {
    let config = match load_config("simulate", options) {
        Ok(config) => config,
        Err(result) => return result,
    };

    if orders == 0 {
        return CommandResult::failure(
            "simulate",
            "domain_validation",
            "--orders must be at least 1",
            EXIT_DOMAIN,
        );
    }
    let tick = match tick_ms {
        Some(0) => {
            return CommandResult::failure(
                "simulate",
                "config_validation",
                "--tick-ms must be greater than zero",
                EXIT_CONFIG,
            );
        }
        Some(ms) => Duration::from_millis(ms),
        None => config.processing.tick_interval(),
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "simulate",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                EXIT_RUNTIME,
            );
        }
    };

    match runtime.block_on(simulate(&config, orders, tick)) {
        Ok(report) => CommandResult::report("simulate", &report),
        Err(SimulationFailure::Application(error)) => {
            CommandResult::from_application_error("simulate", &error)
        }
        Err(SimulationFailure::Stalled(error)) => {
            CommandResult::failure(
                "simulate",
                "runtime_stalled",
                format!("{error:#}"),
                EXIT_RUNTIME,
            )
        }
    }
}

async fn simulate(
    config: &AppConfig,
    orders: u32,
    tick: Duration,
) -> Result<SimulationReport, SimulationFailure> {
    let notifier = InMemoryNotifier::default();
    let mut session = ShopSession::with_tick_interval(config, tick, Arc::new(notifier.clone()))
        .map_err(SimulationFailure::Application)?;

    let mut placed = Vec::with_capacity(orders as usize);
    for index in 0..orders as usize {
        fill_cart(&mut session, index)
            .map_err(|error| SimulationFailure::Application(error.into()))?;
        let customer = CustomerDetails::new(
            format!("Shopper {}", index + 1),
            format!("90000 {:05}", index + 1),
            "",
        );
        let order_id = session.checkout(customer).map_err(SimulationFailure::Application)?;
        let queue_position = session.queue_position(&order_id);
        placed.push(PlacedOrder { order_id, queue_position });
    }

    wait_for_drain(&session, tick, orders).await.map_err(SimulationFailure::Stalled)?;

    let mut completed = session.order_history();
    completed.reverse();
    Ok(SimulationReport {
        command: "simulate",
        status: "ok",
        session_id: session.session_id().to_string(),
        tick_ms: tick.as_millis() as u64,
        placed,
        completed: completed.into_iter().map(CompletedOrder::from).collect(),
        events: notifier.events().iter().map(|event| event.message()).collect(),
    })
}

/// Two catalog products per order, walking the catalog so consecutive
/// orders differ.
fn fill_cart(session: &mut ShopSession, index: usize) -> Result<(), DomainError> {
    let products = session.catalog().products();
    if products.is_empty() {
        return Err(DomainError::EmptyCart);
    }

    let first = products[(index * 3) % products.len()].name.clone();
    let second = products[(index * 3 + 1) % products.len()].name.clone();
    session.add_catalog_item(&first, (index % 3 + 1) as i64)?;
    session.add_catalog_item(&second, 1)?;
    Ok(())
}

async fn wait_for_drain(session: &ShopSession, tick: Duration, orders: u32) -> anyhow::Result<()> {
    let budget = tick.saturating_mul(orders.saturating_add(2)).saturating_add(DRAIN_GRACE);
    let processor = session.processor();

    tokio::time::timeout(budget, async {
        while processor.is_running() || processor.queue_len() > 0 {
            tokio::time::sleep(tick / 2).await;
        }
    })
    .await
    .context("order queue did not drain")?;

    if processor.queue_len() > 0 {
        bail!("{} orders still queued after the loop stopped", processor.queue_len());
    }
    Ok(())
}
