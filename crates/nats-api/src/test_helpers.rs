//! Test helpers.

use std::sync::Arc;

use serde_json::Value;

use orders_app::{context::AppContext, domain::orders::MockOrdersService, messaging::RequestPacket};

use crate::{
    router::{Command, dispatch},
    state::State,
};

/// Orders service mock that fails on any call.
pub(crate) fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_create_order().never();
    orders.expect_list_orders().never();
    orders.expect_get_order().never();
    orders.expect_change_status().never();

    orders
}

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    State::from_app_context(AppContext::new(Arc::new(orders)))
}

/// Dispatch `data` as `command` and return the reply packet as JSON.
pub(crate) async fn send(
    orders: MockOrdersService,
    command: Command,
    data: Value,
) -> Result<Value, serde_json::Error> {
    let state = state_with_orders(orders);

    let payload = serde_json::to_vec(&RequestPacket::new(
        Value::String(command.subject().to_string()),
        data,
    ))?;

    serde_json::to_value(dispatch(&state, command, &payload).await)
}
