//! Get Order Handler

use orders_app::messaging::RpcError;

use crate::{
    orders::{
        errors::into_rpc_error,
        models::{FindOrderRequest, OrderDetailsResponse},
    },
    state::State,
};

pub(crate) async fn handler(
    state: &State,
    request: FindOrderRequest,
) -> Result<OrderDetailsResponse, RpcError> {
    let order = state
        .app
        .orders
        .get_order(request.id())
        .await
        .map_err(into_rpc_error)?;

    Ok(order.into())
}
