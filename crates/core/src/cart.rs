//! Shopping cart.
//!
//! Lines keep insertion order: new lines are appended at the tail and the
//! display order is the order in which products were added. Line ids come
//! from a counter owned by the cart and are never reused, even across
//! `clear`. Unit prices and line quantities are bounded so every total
//! stays well inside `Decimal` range.

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::cart_line::{CartLine, CartLineId};
use crate::domain::product::Product;
use crate::errors::DomainError;
use crate::pricing::{CartTotals, PricingPolicy};

pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
pub const MAX_LINE_QUANTITY: u32 = 10_000;

/// Accepts prices in `(0, MAX_UNIT_PRICE]`.
pub fn checked_price(price: Decimal) -> Result<Decimal, DomainError> {
    if price <= Decimal::ZERO || price > MAX_UNIT_PRICE {
        return Err(DomainError::InvalidPrice(price));
    }
    Ok(price)
}

/// Accepts quantities in `1..=MAX_LINE_QUANTITY`.
pub fn checked_quantity(quantity: i64) -> Result<u32, DomainError> {
    u32::try_from(quantity)
        .ok()
        .filter(|quantity| (1..=MAX_LINE_QUANTITY).contains(quantity))
        .ok_or(DomainError::InvalidQuantity(quantity))
}

#[derive(Clone, Debug)]
pub struct Cart {
    lines: Vec<CartLine>,
    next_line_id: u64,
}

impl Default for Cart {
    fn default() -> Self {
        Self { lines: Vec::new(), next_line_id: 1 }
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: u32,
    ) -> Result<CartLineId, DomainError> {
        checked_price(product.price)?;
        let quantity = checked_quantity(i64::from(quantity))?;

        let id = CartLineId(self.next_line_id);
        self.next_line_id += 1;
        self.lines.push(CartLine::from_product(id, product, quantity));

        debug!(
            event_name = "cart.line_added",
            line_id = id.0,
            product = %product.name,
            quantity,
            cart_size = self.lines.len(),
            "cart line added"
        );
        Ok(id)
    }

    pub fn delete_item(&mut self, id: CartLineId) -> Result<CartLine, DomainError> {
        let index = self.index_of(id)?;
        let removed = self.lines.remove(index);

        debug!(
            event_name = "cart.line_removed",
            line_id = id.0,
            product = %removed.name,
            cart_size = self.lines.len(),
            "cart line removed"
        );
        Ok(removed)
    }

    /// Sets the quantity of a line. Out-of-range quantities are rejected and
    /// leave the line untouched.
    pub fn update_quantity(&mut self, id: CartLineId, quantity: i64) -> Result<(), DomainError> {
        let index = self.index_of(id)?;
        let quantity = checked_quantity(quantity)?;

        self.lines[index].quantity = quantity;
        Ok(())
    }

    pub fn increase_quantity(&mut self, id: CartLineId) -> Result<u32, DomainError> {
        let line = self.line_mut(id)?;
        line.quantity = checked_quantity(i64::from(line.quantity) + 1)?;
        Ok(line.quantity)
    }

    pub fn decrease_quantity(&mut self, id: CartLineId) -> Result<u32, DomainError> {
        let line = self.line_mut(id)?;
        if line.quantity <= 1 {
            return Err(DomainError::QuantityFloor(id));
        }
        line.quantity -= 1;
        Ok(line.quantity)
    }

    pub fn items(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, id: CartLineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    pub fn product_names(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn calculate_totals(&self) -> CartTotals {
        self.calculate_totals_with(&PricingPolicy::default())
    }

    pub fn calculate_totals_with(&self, policy: &PricingPolicy) -> CartTotals {
        policy.calculate(&self.lines)
    }

    fn index_of(&self, id: CartLineId) -> Result<usize, DomainError> {
        self.lines.iter().position(|line| line.id == id).ok_or(DomainError::LineNotFound(id))
    }

    fn line_mut(&mut self, id: CartLineId) -> Result<&mut CartLine, DomainError> {
        self.lines.iter_mut().find(|line| line.id == id).ok_or(DomainError::LineNotFound(id))
    }
}
