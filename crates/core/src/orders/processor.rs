//! Timer-driven order fulfillment.
//!
//! The processor owns at most one tokio task. Each tick completes one order;
//! the task ends itself on the tick that leaves the queue empty and is
//! spawned again by the next `submit`. The decision to stop and the
//! decision to restart are both taken under the desk lock, so an order placed
//! while the loop is winding down is never stranded.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::domain::cart_line::CartLine;
use crate::domain::customer::CustomerDetails;
use crate::domain::order::{Order, OrderId};
use crate::errors::ApplicationError;
use crate::notify::{FulfillmentEvent, FulfillmentEventKind, FulfillmentNotifier};
use crate::orders::desk::{FulfillmentDesk, TickOutcome};
use crate::pricing::CartTotals;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(15);

pub struct OrderProcessor {
    desk: Arc<Mutex<FulfillmentDesk>>,
    notifier: Arc<dyn FulfillmentNotifier>,
    interval: Duration,
    correlation_id: String,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl OrderProcessor {
    /// Fails with `ApplicationError::Configuration` for a zero interval.
    pub fn new(
        notifier: Arc<dyn FulfillmentNotifier>,
        interval: Duration,
        correlation_id: impl Into<String>,
    ) -> Result<Self, ApplicationError> {
        if interval.is_zero() {
            return Err(ApplicationError::Configuration(
                "order processing tick interval must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            desk: Arc::new(Mutex::new(FulfillmentDesk::new())),
            notifier,
            interval,
            correlation_id: correlation_id.into(),
            task: Mutex::new(None),
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Enqueues an order and restarts the loop if it is idle. Fails without
    /// enqueuing when called outside a tokio runtime.
    pub fn submit(
        &self,
        items: Vec<CartLine>,
        totals: CartTotals,
        customer: CustomerDetails,
    ) -> Result<OrderId, ApplicationError> {
        let runtime = current_runtime()?;
        let (order_id, queue_len, needs_start) = {
            let mut desk = lock(&self.desk);
            let order_id = desk.place_order(items, totals, customer);
            let needs_start = !desk.loop_active;
            (order_id, desk.queue().len(), needs_start)
        };

        self.emit(FulfillmentEventKind::OrderPlaced, Some(order_id.clone()), queue_len);
        if needs_start {
            self.start_on(&runtime);
        }
        Ok(order_id)
    }

    /// Starts the processing loop, replacing any loop already running.
    pub fn start(&self) -> Result<(), ApplicationError> {
        let runtime = current_runtime()?;
        self.start_on(&runtime);
        Ok(())
    }

    fn start_on(&self, runtime: &Handle) {
        let mut task = lock(&self.task);
        if let Some(previous) = task.take() {
            previous.abort();
            debug!(
                event_name = "orders.processor_replaced",
                correlation_id = %self.correlation_id,
                "previous processing loop aborted"
            );
        }

        let queue_len = {
            let mut desk = lock(&self.desk);
            desk.loop_active = true;
            desk.queue().len()
        };

        *task = Some(runtime.spawn(run_loop(
            Arc::clone(&self.desk),
            Arc::clone(&self.notifier),
            self.interval,
            self.correlation_id.clone(),
        )));
        drop(task);

        info!(
            event_name = "orders.processor_started",
            correlation_id = %self.correlation_id,
            interval_ms = self.interval.as_millis() as u64,
            queue_len,
            "order processing loop started"
        );
        self.emit(FulfillmentEventKind::ProcessorStarted, None, queue_len);
    }

    pub fn stop(&self) {
        let previous = lock(&self.task).take();
        let queue_len = {
            let mut desk = lock(&self.desk);
            desk.loop_active = false;
            desk.queue().len()
        };

        if let Some(handle) = previous {
            let was_running = !handle.is_finished();
            handle.abort();
            if was_running {
                info!(
                    event_name = "orders.processor_stopped",
                    correlation_id = %self.correlation_id,
                    queue_len,
                    "order processing loop stopped"
                );
                self.emit(FulfillmentEventKind::ProcessorStopped, None, queue_len);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        lock(&self.desk).loop_active
    }

    /// Runs one tick immediately, outside the timer.
    pub fn tick_now(&self) -> TickOutcome {
        process_tick(&self.desk, self.notifier.as_ref(), &self.correlation_id)
    }

    pub fn queue_len(&self) -> usize {
        lock(&self.desk).queue().len()
    }

    pub fn position(&self, order_id: &OrderId) -> Option<usize> {
        lock(&self.desk).position(order_id)
    }

    pub fn queued_orders(&self) -> Vec<Order> {
        lock(&self.desk).queue().orders().cloned().collect()
    }

    pub fn peek(&self) -> Option<Order> {
        lock(&self.desk).queue().peek().cloned()
    }

    /// Completed orders, most recent first.
    pub fn history(&self) -> Vec<Order> {
        lock(&self.desk).history().most_recent_first().cloned().collect()
    }

    pub fn current_order(&self) -> Option<OrderId> {
        lock(&self.desk).current_order().cloned()
    }

    fn emit(&self, kind: FulfillmentEventKind, order_id: Option<OrderId>, queue_len: usize) {
        self.notifier.notify(FulfillmentEvent::new(
            kind,
            order_id,
            queue_len,
            &self.correlation_id,
        ));
    }
}

impl Drop for OrderProcessor {
    fn drop(&mut self) {
        if let Some(handle) = lock(&self.task).take() {
            handle.abort();
        }
    }
}

async fn run_loop(
    desk: Arc<Mutex<FulfillmentDesk>>,
    notifier: Arc<dyn FulfillmentNotifier>,
    interval: Duration,
    correlation_id: String,
) {
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let outcome = process_tick(&desk, notifier.as_ref(), &correlation_id);
        if outcome.remaining == 0 {
            break;
        }
    }

    info!(
        event_name = "orders.processor_stopped",
        correlation_id = %correlation_id,
        queue_len = 0,
        "order queue drained; processing loop stopped"
    );
    notifier.notify(FulfillmentEvent::new(
        FulfillmentEventKind::ProcessorStopped,
        None,
        0,
        correlation_id,
    ));
}

fn process_tick(
    desk: &Mutex<FulfillmentDesk>,
    notifier: &dyn FulfillmentNotifier,
    correlation_id: &str,
) -> TickOutcome {
    let outcome = {
        let mut desk = lock(desk);
        let outcome = desk.tick();
        if outcome.remaining == 0 {
            desk.loop_active = false;
        }
        outcome
    };

    if let Some(order) = &outcome.completed {
        notifier.notify(FulfillmentEvent::new(
            FulfillmentEventKind::OrderCompleted,
            Some(order.id.clone()),
            outcome.remaining,
            correlation_id,
        ));
        if outcome.tracked {
            notifier.notify(FulfillmentEvent::new(
                FulfillmentEventKind::TrackedOrderCompleted,
                Some(order.id.clone()),
                outcome.remaining,
                correlation_id,
            ));
        }
    }

    outcome
}

fn current_runtime() -> Result<Handle, ApplicationError> {
    Handle::try_current().map_err(|error| ApplicationError::Scheduler(error.to_string()))
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
