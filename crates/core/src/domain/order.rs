use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::cart_line::CartLine;
use crate::domain::customer::CustomerDetails;
use crate::errors::DomainError;
use crate::pricing::CartTotals;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    InQueue,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InQueue => "in_queue",
            Self::Completed => "completed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
    pub customer: CustomerDetails,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Builds a queued order. `items` is taken by value so the order keeps its
    /// own snapshot independent of the cart it came from.
    pub fn new(
        id: OrderId,
        items: Vec<CartLine>,
        totals: CartTotals,
        customer: CustomerDetails,
    ) -> Self {
        Self {
            id,
            items,
            totals,
            customer,
            status: OrderStatus::InQueue,
            placed_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    pub fn complete(&mut self) -> Result<(), DomainError> {
        match self.status {
            OrderStatus::InQueue => {
                self.status = OrderStatus::Completed;
                self.completed_at = Some(Utc::now());
                Ok(())
            }
            OrderStatus::Completed => Err(DomainError::InvalidOrderTransition {
                order_id: self.id.clone(),
                from: self.status,
                to: OrderStatus::Completed,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{Order, OrderId, OrderStatus};
    use crate::domain::cart_line::{CartLine, CartLineId};
    use crate::domain::customer::CustomerDetails;
    use crate::errors::DomainError;
    use crate::pricing::PricingPolicy;

    fn order() -> Order {
        let items = vec![CartLine {
            id: CartLineId(1),
            name: "Paneer".to_string(),
            price: Decimal::new(9_000, 2),
            quantity: 2,
            icon: "🧀".to_string(),
            category: "Dairy".to_string(),
        }];
        let totals = PricingPolicy::default().calculate(&items);
        Order::new(
            OrderId("ORD001".to_string()),
            items,
            totals,
            CustomerDetails::new("Asha", "98450 00000", "12 Market Road"),
        )
    }

    #[test]
    fn queued_order_completes_once() {
        let mut order = order();
        assert_eq!(order.status, OrderStatus::InQueue);

        order.complete().expect("in_queue -> completed");
        assert_eq!(order.status, OrderStatus::Completed);
        assert!(order.completed_at.is_some());
    }

    #[test]
    fn completed_is_terminal() {
        let mut order = order();
        order.complete().expect("first completion");

        let error = order.complete().expect_err("second completion should fail");
        assert!(matches!(error, DomainError::InvalidOrderTransition { .. }));
    }

    #[test]
    fn status_serializes_as_snake_case() {
        let encoded = serde_json::to_string(&OrderStatus::InQueue).expect("serialize status");
        assert_eq!(encoded, "\"in_queue\"");
        assert_eq!(order().item_count(), 2);
    }
}
