use tracing::{info, warn};

use crate::domain::cart_line::CartLine;
use crate::domain::customer::CustomerDetails;
use crate::domain::order::{Order, OrderId};
use crate::orders::queue::OrderQueue;
use crate::pricing::CartTotals;

/// Issues sequential order ids (`ORD001`, `ORD002`, ...).
#[derive(Clone, Debug)]
pub struct OrderIdIssuer {
    next: u64,
}

impl Default for OrderIdIssuer {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl OrderIdIssuer {
    pub fn next_id(&mut self) -> OrderId {
        let id = OrderId(format!("ORD{:03}", self.next));
        self.next += 1;
        id
    }
}

#[derive(Clone, Debug, Default)]
pub struct OrderHistory {
    completed: Vec<Order>,
}

impl OrderHistory {
    pub fn record(&mut self, order: Order) {
        self.completed.push(order);
    }

    pub fn most_recent_first(&self) -> impl Iterator<Item = &Order> {
        self.completed.iter().rev()
    }

    pub fn find(&self, order_id: &OrderId) -> Option<&Order> {
        self.completed.iter().find(|order| &order.id == order_id)
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickOutcome {
    pub completed: Option<Order>,
    /// True when the completed order was the one being tracked.
    pub tracked: bool,
    pub remaining: usize,
}

/// Everything the processing loop mutates. One desk sits behind one mutex so
/// enqueue, dequeue and position reads are always serialized.
#[derive(Clone, Debug, Default)]
pub struct FulfillmentDesk {
    queue: OrderQueue,
    history: OrderHistory,
    current: Option<OrderId>,
    ids: OrderIdIssuer,
    pub(crate) loop_active: bool,
}

impl FulfillmentDesk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a new order and makes it the tracked order.
    pub fn place_order(
        &mut self,
        items: Vec<CartLine>,
        totals: CartTotals,
        customer: CustomerDetails,
    ) -> OrderId {
        let id = self.ids.next_id();
        self.queue.enqueue(Order::new(id.clone(), items, totals, customer));
        self.current = Some(id.clone());

        info!(
            event_name = "orders.order_enqueued",
            order_id = %id,
            queue_len = self.queue.len(),
            "order enqueued"
        );
        id
    }

    /// Completes at most one order from the front of the queue.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(mut order) = self.queue.dequeue() else {
            return TickOutcome { completed: None, tracked: false, remaining: 0 };
        };

        if let Err(error) = order.complete() {
            warn!(
                event_name = "orders.invalid_completion",
                order_id = %order.id,
                error = %error,
                "dequeued order was already completed"
            );
        }

        let tracked = self.current.as_ref() == Some(&order.id);
        if tracked {
            self.current = None;
        }
        self.history.record(order.clone());

        info!(
            event_name = "orders.tick_completed",
            order_id = %order.id,
            tracked,
            remaining = self.queue.len(),
            "order completed"
        );
        TickOutcome { completed: Some(order), tracked, remaining: self.queue.len() }
    }

    pub fn queue(&self) -> &OrderQueue {
        &self.queue
    }

    pub fn history(&self) -> &OrderHistory {
        &self.history
    }

    pub fn current_order(&self) -> Option<&OrderId> {
        self.current.as_ref()
    }

    pub fn position(&self, order_id: &OrderId) -> Option<usize> {
        self.queue.position(order_id)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{FulfillmentDesk, OrderIdIssuer};
    use crate::domain::cart_line::{CartLine, CartLineId};
    use crate::domain::customer::CustomerDetails;
    use crate::domain::order::{OrderId, OrderStatus};
    use crate::pricing::PricingPolicy;

    fn place(desk: &mut FulfillmentDesk) -> OrderId {
        let items = vec![CartLine {
            id: CartLineId(1),
            name: "Banana".to_string(),
            price: Decimal::new(5_000, 2),
            quantity: 1,
            icon: "🍌".to_string(),
            category: "Fruits".to_string(),
        }];
        let totals = PricingPolicy::default().calculate(&items);
        desk.place_order(items, totals, CustomerDetails::new("Meera", "90000 00002", ""))
    }

    #[test]
    fn ids_are_zero_padded_and_sequential() {
        let mut issuer = OrderIdIssuer::default();
        assert_eq!(issuer.next_id().0, "ORD001");
        assert_eq!(issuer.next_id().0, "ORD002");

        let mut issuer = OrderIdIssuer { next: 1_000 };
        assert_eq!(issuer.next_id().0, "ORD1000");
    }

    #[test]
    fn tick_completes_front_order_into_history() {
        let mut desk = FulfillmentDesk::new();
        let first = place(&mut desk);
        let second = place(&mut desk);
        let third = place(&mut desk);

        let outcome = desk.tick();
        let completed = outcome.completed.expect("an order was completed");
        assert_eq!(completed.id, first);
        assert_eq!(completed.status, OrderStatus::Completed);
        assert_eq!(outcome.remaining, 2);
        assert!(!outcome.tracked);

        assert_eq!(desk.position(&second), Some(1));
        let queued = desk.queue().orders().map(|order| order.id.clone()).collect::<Vec<_>>();
        assert_eq!(queued, [second, third]);
        assert_eq!(
            desk.history().find(&first).map(|order| order.status),
            Some(OrderStatus::Completed)
        );
    }

    #[test]
    fn completing_the_tracked_order_clears_tracking() {
        let mut desk = FulfillmentDesk::new();
        let only = place(&mut desk);
        assert_eq!(desk.current_order(), Some(&only));

        let outcome = desk.tick();
        assert!(outcome.tracked);
        assert_eq!(outcome.remaining, 0);
        assert_eq!(desk.current_order(), None);
    }

    #[test]
    fn history_lists_most_recent_first() {
        let mut desk = FulfillmentDesk::new();
        let first = place(&mut desk);
        let second = place(&mut desk);
        desk.tick();
        desk.tick();

        let history =
            desk.history().most_recent_first().map(|order| order.id.clone()).collect::<Vec<_>>();
        assert_eq!(history, [second, first]);
    }

    #[test]
    fn tick_on_empty_queue_is_a_no_op() {
        let mut desk = FulfillmentDesk::new();
        let outcome = desk.tick();

        assert!(outcome.completed.is_none());
        assert_eq!(outcome.remaining, 0);
        assert!(desk.history().is_empty());
    }
}
