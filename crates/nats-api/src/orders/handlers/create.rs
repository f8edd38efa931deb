//! Create Order Handler

use orders_app::messaging::RpcError;

use crate::{
    orders::{
        errors::into_rpc_error,
        models::{CreateOrderRequest, OrderDetailsResponse},
    },
    state::State,
};

pub(crate) async fn handler(
    state: &State,
    request: CreateOrderRequest,
) -> Result<OrderDetailsResponse, RpcError> {
    let order = state
        .app
        .orders
        .create_order(request.items)
        .await
        .map_err(into_rpc_error)?;

    Ok(order.into())
}
