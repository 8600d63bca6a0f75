use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CartLineId(pub u64);

impl fmt::Display for CartLineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: CartLineId,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub icon: String,
    pub category: String,
}

impl CartLine {
    pub fn from_product(id: CartLineId, product: &Product, quantity: u32) -> Self {
        Self {
            id,
            name: product.name.clone(),
            price: product.price,
            quantity,
            icon: product.icon.clone(),
            category: product.category.clone(),
        }
    }

    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}
