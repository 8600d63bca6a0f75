//! Shopper-facing facade tying the catalog, cart, recommendation graph and
//! order processor together for one browsing session.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::cart::{checked_price, checked_quantity, Cart};
use crate::catalog::Catalog;
use crate::category_index::CategoryTree;
use crate::config::AppConfig;
use crate::domain::cart_line::CartLineId;
use crate::domain::customer::CustomerDetails;
use crate::domain::order::{Order, OrderId};
use crate::domain::product::Product;
use crate::errors::{ApplicationError, DomainError};
use crate::notify::FulfillmentNotifier;
use crate::orders::OrderProcessor;
use crate::pricing::{CartTotals, PricingPolicy};
use crate::recommendation::{Recommendation, RecommendationGraph};

pub struct ShopSession {
    session_id: String,
    catalog: Catalog,
    graph: RecommendationGraph,
    cart: Cart,
    pricing: PricingPolicy,
    processor: OrderProcessor,
    autocomplete_limit: usize,
    recommendation_limit: usize,
}

impl ShopSession {
    /// Session over the bundled sample catalog and relationship data.
    pub fn new(
        config: &AppConfig,
        notifier: Arc<dyn FulfillmentNotifier>,
    ) -> Result<Self, ApplicationError> {
        Self::with_data(Catalog::sample(), RecommendationGraph::sample(), config, notifier)
    }

    /// Sample-data session whose loop ticks at `tick_interval` instead of the
    /// configured interval.
    pub fn with_tick_interval(
        config: &AppConfig,
        tick_interval: Duration,
        notifier: Arc<dyn FulfillmentNotifier>,
    ) -> Result<Self, ApplicationError> {
        Self::assemble(
            Catalog::sample(),
            RecommendationGraph::sample(),
            config,
            tick_interval,
            notifier,
        )
    }

    pub fn with_data(
        catalog: Catalog,
        graph: RecommendationGraph,
        config: &AppConfig,
        notifier: Arc<dyn FulfillmentNotifier>,
    ) -> Result<Self, ApplicationError> {
        Self::assemble(catalog, graph, config, config.processing.tick_interval(), notifier)
    }

    fn assemble(
        catalog: Catalog,
        graph: RecommendationGraph,
        config: &AppConfig,
        tick_interval: Duration,
        notifier: Arc<dyn FulfillmentNotifier>,
    ) -> Result<Self, ApplicationError> {
        let session_id = Uuid::new_v4().to_string();
        let processor = OrderProcessor::new(notifier, tick_interval, session_id.clone())?;

        info!(
            event_name = "session.started",
            correlation_id = %session_id,
            products = catalog.len(),
            graph_nodes = graph.node_count(),
            tick_interval_ms = tick_interval.as_millis() as u64,
            "shop session started"
        );

        Ok(Self {
            session_id,
            catalog,
            graph,
            cart: Cart::new(),
            pricing: config.pricing.clone(),
            processor,
            autocomplete_limit: config.catalog.autocomplete_limit,
            recommendation_limit: config.catalog.recommendation_limit,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn graph(&self) -> &RecommendationGraph {
        &self.graph
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn processor(&self) -> &OrderProcessor {
        &self.processor
    }

    pub fn search(&self, term: &str) -> Vec<&Product> {
        self.catalog.search(term, self.autocomplete_limit)
    }

    pub fn browse_category(&self, category: &str) -> CategoryTree {
        CategoryTree::build(&self.catalog, category)
    }

    /// Adds a catalog product at a shopper-entered price. The line takes the
    /// catalog's canonical name, icon and category.
    pub fn add_to_cart(
        &mut self,
        name: &str,
        price: Decimal,
        quantity: i64,
    ) -> Result<CartLineId, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::BlankProductName);
        }
        let price = checked_price(price)?;
        let quantity = checked_quantity(quantity)?;

        let product = self
            .catalog
            .find_by_name(name)
            .ok_or_else(|| DomainError::ProductNotFound(name.to_string()))?
            .with_price(price);

        self.cart.add_item(&product, quantity)
    }

    /// Adds a catalog product at its listed price.
    pub fn add_catalog_item(
        &mut self,
        name: &str,
        quantity: i64,
    ) -> Result<CartLineId, DomainError> {
        let price = self
            .catalog
            .find_by_name(name)
            .map(|product| product.price)
            .ok_or_else(|| DomainError::ProductNotFound(name.trim().to_string()))?;
        self.add_to_cart(name, price, quantity)
    }

    pub fn delete_item(&mut self, id: CartLineId) -> Result<(), DomainError> {
        self.cart.delete_item(id).map(|_| ())
    }

    pub fn update_quantity(&mut self, id: CartLineId, quantity: i64) -> Result<(), DomainError> {
        self.cart.update_quantity(id, quantity)
    }

    pub fn increase_quantity(&mut self, id: CartLineId) -> Result<u32, DomainError> {
        self.cart.increase_quantity(id)
    }

    pub fn decrease_quantity(&mut self, id: CartLineId) -> Result<u32, DomainError> {
        self.cart.decrease_quantity(id)
    }

    pub fn clear_cart(&mut self) -> Result<(), DomainError> {
        if self.cart.is_empty() {
            return Err(DomainError::EmptyCart);
        }
        self.cart.clear();
        Ok(())
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.calculate_totals_with(&self.pricing)
    }

    pub fn recommendations_for(&self, name: &str) -> Vec<Recommendation> {
        self.graph.recommendations(name, self.recommendation_limit)
    }

    /// "Pairs well with your cart": ranked over every product in the cart.
    pub fn recommendations_for_cart(&self) -> Vec<Recommendation> {
        self.graph
            .multi_product_recommendations(&self.cart.product_names(), self.recommendation_limit)
    }

    /// Turns the cart into a queued order, tracks it as the current order
    /// and empties the cart.
    pub fn checkout(&mut self, customer: CustomerDetails) -> Result<OrderId, ApplicationError> {
        if self.cart.is_empty() {
            return Err(DomainError::EmptyCart.into());
        }
        customer.validate()?;

        let items = self.cart.items().to_vec();
        let totals = self.totals();
        let total = totals.total;
        let order_id = self.processor.submit(items, totals, customer)?;
        self.cart.clear();

        info!(
            event_name = "session.checkout_completed",
            correlation_id = %self.session_id,
            order_id = %order_id,
            total = %total,
            "checkout completed"
        );
        Ok(order_id)
    }

    pub fn current_order(&self) -> Option<OrderId> {
        self.processor.current_order()
    }

    pub fn queue_position(&self, order_id: &OrderId) -> Option<usize> {
        self.processor.position(order_id)
    }

    pub fn queued_orders(&self) -> Vec<Order> {
        self.processor.queued_orders()
    }

    pub fn order_history(&self) -> Vec<Order> {
        self.processor.history()
    }
}
