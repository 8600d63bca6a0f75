pub mod desk;
pub mod processor;
pub mod queue;

pub use desk::{FulfillmentDesk, OrderHistory, OrderIdIssuer, TickOutcome};
pub use processor::{OrderProcessor, DEFAULT_TICK_INTERVAL};
pub use queue::OrderQueue;
