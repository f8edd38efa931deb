//! Order request and response payloads

use jiff::Timestamp;
use orders::{items::LineItem, products::ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orders_app::domain::orders::models::{NamedOrderItem, Order, OrderDetails, OrderUuid};

/// Create Order Request
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CreateOrderRequest {
    pub items: Vec<LineItem>,
}

/// List Orders Request
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ListOrdersRequest {
    #[serde(default)]
    pub page: Option<u32>,

    #[serde(default)]
    pub limit: Option<u32>,

    #[serde(default)]
    pub status: Option<String>,
}

/// Find Order Request
///
/// Also accepted as a bare uuid string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum FindOrderRequest {
    Object {
        id: OrderUuid,
    },
    Id(OrderUuid),
}

impl FindOrderRequest {
    pub(crate) fn id(&self) -> OrderUuid {
        match self {
            Self::Object { id } | Self::Id(id) => *id,
        }
    }
}

/// Change Order Status Request
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ChangeOrderStatusRequest {
    pub id: OrderUuid,
    pub status: String,
}

/// Order Response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub id: OrderUuid,
    pub total_amount: Decimal,
    pub total_items: i32,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.uuid,
            total_amount: order.total_amount,
            total_items: order.total_items,
            status: order.status.into_string(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemResponse {
    pub product_id: ProductId,
    pub quantity: i32,
    pub price: Decimal,
    pub name: String,
}

impl From<NamedOrderItem> for OrderItemResponse {
    fn from(item: NamedOrderItem) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
            price: item.price,
            name: item.name,
        }
    }
}

/// Order Details Response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderDetailsResponse {
    pub id: OrderUuid,
    pub total_amount: Decimal,
    pub total_items: i32,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    #[serde(rename = "OrderItem")]
    pub items: Vec<OrderItemResponse>,
}

impl From<OrderDetails> for OrderDetailsResponse {
    fn from(order: OrderDetails) -> Self {
        Self {
            id: order.uuid,
            total_amount: order.total_amount,
            total_items: order.total_items,
            status: order.status.into_string(),
            created_at: order.created_at,
            updated_at: order.updated_at,
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
        }
    }
}
