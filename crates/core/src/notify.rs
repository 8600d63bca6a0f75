use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::order::OrderId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentEventKind {
    OrderPlaced,
    OrderCompleted,
    /// The order the shopper is currently following has been fulfilled.
    TrackedOrderCompleted,
    ProcessorStarted,
    ProcessorStopped,
}

impl FulfillmentEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrderPlaced => "orders.order_placed",
            Self::OrderCompleted => "orders.order_completed",
            Self::TrackedOrderCompleted => "orders.tracked_order_completed",
            Self::ProcessorStarted => "orders.processor_started",
            Self::ProcessorStopped => "orders.processor_stopped",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentEvent {
    pub kind: FulfillmentEventKind,
    pub order_id: Option<OrderId>,
    pub queue_len: usize,
    pub correlation_id: String,
    pub occurred_at: DateTime<Utc>,
}

impl FulfillmentEvent {
    pub fn new(
        kind: FulfillmentEventKind,
        order_id: Option<OrderId>,
        queue_len: usize,
        correlation_id: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            order_id,
            queue_len,
            correlation_id: correlation_id.into(),
            occurred_at: Utc::now(),
        }
    }

    pub fn message(&self) -> String {
        let order = self.order_id.as_ref().map(|id| id.0.as_str()).unwrap_or("-");
        match self.kind {
            FulfillmentEventKind::OrderPlaced => {
                format!("Order {order} placed. Queue length: {}", self.queue_len)
            }
            FulfillmentEventKind::OrderCompleted => format!("Order {order} completed"),
            FulfillmentEventKind::TrackedOrderCompleted => {
                format!("Your order {order} has been processed and is on its way!")
            }
            FulfillmentEventKind::ProcessorStarted => "Order processing started".to_string(),
            FulfillmentEventKind::ProcessorStopped => {
                "Order queue empty, processing paused".to_string()
            }
        }
    }
}

pub trait FulfillmentNotifier: Send + Sync {
    fn notify(&self, event: FulfillmentEvent);
}

#[derive(Clone, Default)]
pub struct InMemoryNotifier {
    events: Arc<Mutex<Vec<FulfillmentEvent>>>,
}

impl InMemoryNotifier {
    pub fn events(&self) -> Vec<FulfillmentEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn kinds(&self) -> Vec<FulfillmentEventKind> {
        self.events().into_iter().map(|event| event.kind).collect()
    }
}

impl FulfillmentNotifier for InMemoryNotifier {
    fn notify(&self, event: FulfillmentEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl FulfillmentNotifier for TracingNotifier {
    fn notify(&self, event: FulfillmentEvent) {
        info!(
            event_name = event.kind.as_str(),
            correlation_id = %event.correlation_id,
            order_id = event.order_id.as_ref().map(|id| id.0.as_str()).unwrap_or("unknown"),
            queue_len = event.queue_len,
            "{}",
            event.message()
        );
    }
}
