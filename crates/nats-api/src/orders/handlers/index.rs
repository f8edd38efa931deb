//! List Orders Handler

use orders::{
    pagination::{Page, Pagination},
    status::OrderStatus,
};
use orders_app::{domain::orders::models::OrderFilter, messaging::RpcError};

use crate::{
    orders::{
        errors::{bad_request, into_rpc_error},
        models::{ListOrdersRequest, OrderResponse},
    },
    state::State,
};

pub(crate) async fn handler(
    state: &State,
    request: ListOrdersRequest,
) -> Result<Page<OrderResponse>, RpcError> {
    let pagination = Pagination::new(request.page, request.limit)
        .map_err(|error| bad_request(error.to_string()))?;

    let filter = OrderFilter {
        pagination,
        status: request.status.map(OrderStatus::from),
    };

    let page = state
        .app
        .orders
        .list_orders(filter)
        .await
        .map_err(into_rpc_error)?;

    Ok(page.map(OrderResponse::from))
}
