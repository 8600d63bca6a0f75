pub mod cart;
pub mod catalog;
pub mod category_index;
pub mod config;
pub mod domain;
pub mod errors;
pub mod notify;
pub mod orders;
pub mod pricing;
pub mod recommendation;
pub mod seeds;
pub mod session;

pub use cart::Cart;
pub use catalog::Catalog;
pub use category_index::{CategoryTree, LevelNode, TreeLevel};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::cart_line::{CartLine, CartLineId};
pub use domain::customer::CustomerDetails;
pub use domain::order::{Order, OrderId, OrderStatus};
pub use domain::product::Product;
pub use errors::{ApplicationError, DomainError};
pub use notify::{
    FulfillmentEvent, FulfillmentEventKind, FulfillmentNotifier, InMemoryNotifier, TracingNotifier,
};
pub use orders::{OrderProcessor, OrderQueue, TickOutcome};
pub use pricing::{CartTotals, PricingPolicy};
pub use recommendation::{Recommendation, RecommendationGraph};
pub use session::ShopSession;
