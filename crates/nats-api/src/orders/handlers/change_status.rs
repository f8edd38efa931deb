//! Change Order Status Handler

use orders::status::OrderStatus;
use orders_app::messaging::RpcError;

use crate::{
    orders::{
        errors::into_rpc_error,
        models::{ChangeOrderStatusRequest, OrderDetailsResponse},
    },
    state::State,
};

pub(crate) async fn handler(
    state: &State,
    request: ChangeOrderStatusRequest,
) -> Result<OrderDetailsResponse, RpcError> {
    let order = state
        .app
        .orders
        .change_status(request.id, OrderStatus::from(request.status))
        .await
        .map_err(into_rpc_error)?;

    Ok(order.into())
}
