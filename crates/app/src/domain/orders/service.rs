//! Orders service.
//!
//! Orchestrates order creation, lookup, listing and status changes across the
//! [`OrdersStore`] and the remote [`ProductsValidator`].

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use orders::prelude::{
    LineItem, OrderStatus, OrderStatuses, Page, ProductCatalog, TransitionPolicy, aggregate,
    check_items, distinct_product_ids,
};
use tracing::{debug, info, instrument, warn};

use crate::domain::{
    orders::{
        errors::OrdersServiceError,
        models::{NewOrder, Order, OrderDetails, OrderFilter, OrderUuid},
        store::OrdersStore,
    },
    products::ProductsValidator,
};

#[derive(Clone)]
pub struct OrdersLifecycle {
    store: Arc<dyn OrdersStore>,
    products: Arc<dyn ProductsValidator>,
    transitions: Arc<dyn TransitionPolicy>,
    statuses: OrderStatuses,
}

impl OrdersLifecycle {
    #[must_use]
    pub fn new(
        store: Arc<dyn OrdersStore>,
        products: Arc<dyn ProductsValidator>,
        transitions: Arc<dyn TransitionPolicy>,
        statuses: OrderStatuses,
    ) -> Self {
        Self {
            store,
            products,
            transitions,
            statuses,
        }
    }

    fn check_status(&self, status: &OrderStatus) -> Result<(), OrdersServiceError> {
        self.statuses.parse(status.as_str())?;

        Ok(())
    }
}

#[async_trait]
impl OrdersService for OrdersLifecycle {
    #[instrument(skip_all, fields(items = items.len()))]
    async fn create_order(&self, items: Vec<LineItem>) -> Result<OrderDetails, OrdersServiceError> {
        check_items(&items)?;

        let product_ids = distinct_product_ids(items.iter().map(|item| item.product_id));

        let products = self
            .products
            .validate(&product_ids)
            .await
            .inspect_err(|error| warn!(%error, "product validation failed"))?;

        let priced = aggregate(&items, &products)?;

        let order = NewOrder::priced(OrderUuid::new(), self.statuses.initial().clone(), priced);

        let created = self.store.create_order(order).await?;

        info!(
            order = %created.uuid,
            total_amount = %created.total_amount,
            total_items = created.total_items,
            "order created"
        );

        Ok(OrderDetails::new(created, &ProductCatalog::new(&products)))
    }

    #[instrument(skip_all, fields(page = filter.pagination.page(), limit = filter.pagination.limit()))]
    async fn list_orders(&self, filter: OrderFilter) -> Result<Page<Order>, OrdersServiceError> {
        if let Some(status) = &filter.status {
            self.check_status(status)?;
        }

        Ok(self.store.list_orders(filter).await?)
    }

    #[instrument(skip(self))]
    async fn get_order(&self, order: OrderUuid) -> Result<OrderDetails, OrdersServiceError> {
        let found = self
            .store
            .get_order(order)
            .await
            .map_err(OrdersServiceError::for_order(order))?;

        let product_ids = distinct_product_ids(found.items.iter().map(|item| item.product_id));

        if product_ids.is_empty() {
            return Ok(OrderDetails::new(found, &ProductCatalog::default()));
        }

        let products = self
            .products
            .validate(&product_ids)
            .await
            .inspect_err(|error| warn!(%error, "product validation failed"))?;

        Ok(OrderDetails::new(found, &ProductCatalog::new(&products)))
    }

    #[instrument(skip(self))]
    async fn change_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderDetails, OrdersServiceError> {
        self.check_status(&status)?;

        let current = self.get_order(order).await?;

        if current.status == status {
            debug!("order status unchanged");

            return Ok(current);
        }

        if !self.transitions.permits(&current.status, &status) {
            return Err(OrdersServiceError::TransitionRejected {
                from: current.status,
                to: status,
            });
        }

        let updated = self
            .store
            .update_status(order, status)
            .await
            .map_err(OrdersServiceError::for_order(order))?;

        info!(from = %current.status, to = %updated.status, "order status changed");

        Ok(OrderDetails {
            status: updated.status,
            updated_at: updated.updated_at,
            ..current
        })
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Validates, prices and stores a new order.
    async fn create_order(&self, items: Vec<LineItem>) -> Result<OrderDetails, OrdersServiceError>;

    /// Retrieves one page of orders.
    async fn list_orders(&self, filter: OrderFilter) -> Result<Page<Order>, OrdersServiceError>;

    /// Retrieve a single order with product names resolved.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderDetails, OrdersServiceError>;

    /// Moves an order to `status`. Re-applying the current status is a no-op.
    async fn change_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderDetails, OrdersServiceError>;
}
