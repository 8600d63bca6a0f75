use std::collections::VecDeque;

use crate::domain::order::{Order, OrderId};

/// FIFO of placed orders. Backed by a ring buffer, so storage tracks the
/// number of orders currently waiting rather than every order ever placed.
#[derive(Clone, Debug, Default)]
pub struct OrderQueue {
    orders: VecDeque<Order>,
}

impl OrderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, order: Order) {
        self.orders.push_back(order);
    }

    pub fn dequeue(&mut self) -> Option<Order> {
        self.orders.pop_front()
    }

    pub fn peek(&self) -> Option<&Order> {
        self.orders.front()
    }

    /// 1-based position counted from the front.
    pub fn position(&self, order_id: &OrderId) -> Option<usize> {
        self.orders.iter().position(|order| &order.id == order_id).map(|index| index + 1)
    }

    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::OrderQueue;
    use crate::domain::customer::CustomerDetails;
    use crate::domain::order::{Order, OrderId};
    use crate::pricing::CartTotals;

    fn order(id: &str) -> Order {
        Order::new(
            OrderId(id.to_string()),
            Vec::new(),
            CartTotals::default(),
            CustomerDetails::new("Ravi", "90000 00001", ""),
        )
    }

    fn ids(queue: &OrderQueue) -> Vec<&str> {
        queue.orders().map(|order| order.id.0.as_str()).collect()
    }

    #[test]
    fn dequeue_shifts_positions_forward() {
        let mut queue = OrderQueue::new();
        for id in ["O1", "O2", "O3"] {
            queue.enqueue(order(id));
        }

        let first = queue.dequeue().expect("queue has orders");
        assert_eq!(first.id.0, "O1");
        assert_eq!(queue.position(&OrderId("O2".to_string())), Some(1));
        assert_eq!(queue.position(&OrderId("O3".to_string())), Some(2));
        assert_eq!(queue.position(&OrderId("O1".to_string())), None);
        assert_eq!(ids(&queue), ["O2", "O3"]);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn empty_queue_reports_nothing() {
        let mut queue = OrderQueue::new();
        assert!(queue.dequeue().is_none());
        assert!(queue.peek().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn peek_does_not_remove() {
        let mut queue = OrderQueue::new();
        queue.enqueue(order("O1"));

        assert_eq!(queue.peek().map(|order| order.id.0.as_str()), Some("O1"));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn interleaved_traffic_stays_fifo() {
        let mut queue = OrderQueue::new();
        let mut served = Vec::new();

        for round in 1..=6 {
            queue.enqueue(order(&format!("O{round}")));
            if round % 2 == 0 {
                served.extend(queue.dequeue().map(|order| order.id.0));
            }
        }
        while let Some(order) = queue.dequeue() {
            served.push(order.id.0);
        }

        assert_eq!(served, ["O1", "O2", "O3", "O4", "O5", "O6"]);
    }
}
