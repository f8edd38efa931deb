//! Orders store.

use async_trait::async_trait;
use mockall::automock;
use orders::{
    pagination::{Page, PageMeta},
    status::OrderStatus,
};
use tracing::debug;

use crate::{
    database::Db,
    domain::orders::{
        errors::OrdersStoreError,
        models::{NewOrder, Order, OrderFilter, OrderUuid},
        repositories::{PgOrderItemsRepository, PgOrdersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersStore {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
}

impl PgOrdersStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersStore for PgOrdersStore {
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersStoreError> {
        if order.items.is_empty() {
            return Err(OrdersStoreError::EmptyOrder);
        }

        let mut tx = self.db.begin().await?;

        let mut created = self.orders_repository.create_order(&mut tx, &order).await?;

        for (position, item) in order.items.iter().enumerate() {
            let item = self
                .items_repository
                .create_order_item(&mut tx, created.uuid, i32::try_from(position)?, item)
                .await?;

            created.items.push(item);
        }

        tx.commit().await?;

        Ok(created)
    }

    async fn list_orders(&self, filter: OrderFilter) -> Result<Page<Order>, OrdersStoreError> {
        let limit = i64::from(filter.pagination.limit());
        // Offsets past the largest row number select nothing either way.
        let offset = i64::try_from(filter.pagination.offset()).unwrap_or(i64::MAX);

        let mut tx = self.db.begin().await?;

        let total = self
            .orders_repository
            .count_orders(&mut tx, filter.status.as_ref())
            .await?;

        let data = self
            .orders_repository
            .list_orders(&mut tx, filter.status.as_ref(), limit, offset)
            .await?;

        tx.commit().await?;

        Ok(Page {
            data,
            meta: PageMeta::new(filter.pagination, u64::try_from(total)?),
        })
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersStoreError> {
        let mut tx = self.db.begin().await?;

        let mut found = self.orders_repository.get_order(&mut tx, order).await?;

        let items = self.items_repository.get_order_items(&mut tx, order).await?;

        tx.commit().await?;

        found.items.extend(items);

        Ok(found)
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersStoreError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .orders_repository
            .lock_order_status(&mut tx, order)
            .await?;

        let mut updated = if current == status {
            debug!(%order, %status, "order status unchanged, skipping write");

            self.orders_repository.get_order(&mut tx, order).await?
        } else {
            self.orders_repository
                .update_order_status(&mut tx, order, &status)
                .await?
        };

        let items = self.items_repository.get_order_items(&mut tx, order).await?;

        tx.commit().await?;

        updated.items.extend(items);

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersStore: Send + Sync {
    /// Creates an order and all of its items in one transaction.
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersStoreError>;

    /// Retrieves one page of orders, without items.
    async fn list_orders(&self, filter: OrderFilter) -> Result<Page<Order>, OrdersStoreError>;

    /// Retrieve a single order with its items.
    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersStoreError>;

    /// Sets the status of an order. No write happens when the status is unchanged.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersStoreError>;
}
