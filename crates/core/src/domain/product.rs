use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog entry. `name` is the unique key used by the cart, the category
/// index and the recommendation graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub icon: String,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        category: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self { name: name.into(), price, category: category.into(), icon: icon.into() }
    }

    pub fn with_price(&self, price: Decimal) -> Self {
        Self { price, ..self.clone() }
    }
}
