use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::cart_line::CartLineId;
use crate::domain::order::{OrderId, OrderStatus};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("product name must not be blank")]
    BlankProductName,
    #[error("price must be greater than zero and at most 1000000, got {0}")]
    InvalidPrice(Decimal),
    #[error("quantity must be between 1 and 10000, got {0}")]
    InvalidQuantity(i64),
    #[error("product `{0}` is not in the catalog")]
    ProductNotFound(String),
    #[error("cart line {0} not found")]
    LineNotFound(CartLineId),
    #[error("cart line {0} is already at the minimum quantity of 1")]
    QuantityFloor(CartLineId),
    #[error("cart is empty")]
    EmptyCart,
    #[error("missing customer details: {0}")]
    MissingCustomerFields(String),
    #[error("invalid order transition for {order_id} from {from:?} to {to:?}")]
    InvalidOrderTransition { order_id: OrderId, from: OrderStatus, to: OrderStatus },
}

impl DomainError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BlankProductName | Self::InvalidPrice(_) | Self::InvalidQuantity(_) => {
                "Please fill all fields correctly!"
            }
            Self::ProductNotFound(_) => "This item is not available in our store!",
            Self::LineNotFound(_) => "That item is no longer in your cart.",
            Self::QuantityFloor(_) => "Quantity cannot go below 1. Remove the item instead.",
            Self::EmptyCart => "Your cart is empty!",
            Self::MissingCustomerFields(_) => "Please fill in your name and phone number.",
            Self::InvalidOrderTransition { .. } => "An unexpected internal error occurred.",
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("configuration failure: {0}")]
    Configuration(String),
    #[error("scheduler failure: {0}")]
    Scheduler(String),
}

impl ApplicationError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(_) => "domain_validation",
            Self::Configuration(_) => "config_validation",
            Self::Scheduler(_) => "runtime_init",
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::cart_line::CartLineId;
    use crate::errors::{ApplicationError, DomainError};

    #[test]
    fn validation_failures_share_the_form_message() {
        for error in [
            DomainError::BlankProductName,
            DomainError::InvalidPrice(Decimal::ZERO),
            DomainError::InvalidQuantity(-1),
        ] {
            assert_eq!(error.user_message(), "Please fill all fields correctly!");
        }
    }

    #[test]
    fn unknown_product_has_store_message() {
        let error = DomainError::ProductNotFound("Dragonfruit".to_owned());
        assert_eq!(error.user_message(), "This item is not available in our store!");
        assert_eq!(error.to_string(), "product `Dragonfruit` is not in the catalog");
    }

    #[test]
    fn domain_error_maps_to_domain_validation_class() {
        let error = ApplicationError::from(DomainError::LineNotFound(CartLineId(7)));
        assert_eq!(error.error_class(), "domain_validation");
        assert_eq!(error.to_string(), "cart line #7 not found");
    }

    #[test]
    fn configuration_error_maps_to_config_validation() {
        let error = ApplicationError::Configuration("tick interval must be non-zero".to_owned());
        assert_eq!(error.error_class(), "config_validation");
    }

    #[test]
    fn scheduler_error_maps_to_runtime_init() {
        let error = ApplicationError::Scheduler("no tokio runtime".to_owned());
        assert_eq!(error.error_class(), "runtime_init");
    }
}
