//! Order Models

use jiff::Timestamp;
use orders::{
    pagination::Pagination,
    pricing::{PricedItem, PricedOrder},
    products::{ProductCatalog, ProductId},
    status::OrderStatus,
};
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Model
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub uuid: OrderUuid,
    pub total_amount: Decimal,
    pub total_items: i32,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// OrderItem Model
///
/// `price` is the unit price captured when the order was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: i32,
    pub price: Decimal,
}

impl From<PricedItem> for OrderItem {
    fn from(item: PricedItem) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

/// New Order Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub total_amount: Decimal,
    pub total_items: i32,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
}

impl NewOrder {
    /// Build a new order from priced line items.
    #[must_use]
    pub fn priced(uuid: OrderUuid, status: OrderStatus, priced: PricedOrder) -> Self {
        Self {
            uuid,
            total_amount: priced.total_amount,
            total_items: priced.total_items,
            status,
            items: priced.items.into_iter().map(OrderItem::from).collect(),
        }
    }
}

/// Order item with the product name resolved
#[derive(Debug, Clone, PartialEq)]
pub struct NamedOrderItem {
    pub product_id: ProductId,
    pub quantity: i32,
    pub price: Decimal,
    pub name: String,
}

/// Order with its items and their product names
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub uuid: OrderUuid,
    pub total_amount: Decimal,
    pub total_items: i32,
    pub status: OrderStatus,
    pub items: Vec<NamedOrderItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderDetails {
    /// Attach product names from `catalog` to the items of `order`.
    #[must_use]
    pub fn new(order: Order, catalog: &ProductCatalog<'_>) -> Self {
        let items = order
            .items
            .into_iter()
            .map(|item| NamedOrderItem {
                product_id: item.product_id,
                quantity: item.quantity,
                price: item.price,
                name: catalog.name_of(item.product_id).to_string(),
            })
            .collect();

        Self {
            uuid: order.uuid,
            total_amount: order.total_amount,
            total_items: order.total_items,
            status: order.status,
            items,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// Order listing filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub pagination: Pagination,

    /// Only orders in this status; all orders when unset
    pub status: Option<OrderStatus>,
}
