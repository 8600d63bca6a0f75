use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::cart_line::CartLine;

/// Rounded cart summary. Every amount is computed from unrounded inputs and
/// rounded to two decimal places only when reported.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub free_shipping: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: Decimal,
    pub flat_shipping_fee: Decimal,
    pub tax_rate: Decimal,
    pub discount_rate: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Decimal::new(1000, 0),
            flat_shipping_fee: Decimal::new(100, 0),
            tax_rate: Decimal::new(5, 2),
            discount_rate: Decimal::new(10, 2),
        }
    }
}

impl PricingPolicy {
    pub fn subtotal(lines: &[CartLine]) -> Decimal {
        lines.iter().map(CartLine::line_total).sum()
    }

    pub fn shipping_for(&self, subtotal: Decimal) -> Decimal {
        if subtotal.is_zero() || subtotal > self.free_shipping_threshold {
            Decimal::ZERO
        } else {
            self.flat_shipping_fee
        }
    }

    pub fn calculate(&self, lines: &[CartLine]) -> CartTotals {
        let subtotal = Self::subtotal(lines);
        let shipping = self.shipping_for(subtotal);
        let tax = subtotal * self.tax_rate;
        let discount = subtotal * self.discount_rate;
        let total = subtotal + shipping + tax - discount;

        CartTotals {
            subtotal: round_money(subtotal),
            shipping: round_money(shipping),
            tax: round_money(tax),
            discount: round_money(discount),
            total: round_money(total),
            free_shipping: subtotal > Decimal::ZERO && shipping.is_zero(),
        }
    }
}

pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
