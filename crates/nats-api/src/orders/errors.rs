//! Order Errors

use tracing::{error, warn};

use orders_app::{
    domain::{
        orders::{OrdersServiceError, OrdersStoreError},
        products::ProductsValidatorError,
    },
    messaging::RpcError,
};

const BAD_REQUEST: u16 = 400;
const NOT_FOUND: u16 = 404;
const CONFLICT: u16 = 409;
const INTERNAL_SERVER_ERROR: u16 = 500;
const SERVICE_UNAVAILABLE: u16 = 503;

pub(crate) fn bad_request(message: impl Into<String>) -> RpcError {
    RpcError::new(BAD_REQUEST, message)
}

pub(crate) fn internal_error() -> RpcError {
    RpcError::new(INTERNAL_SERVER_ERROR, "Internal server error")
}

pub(crate) fn into_rpc_error(error: OrdersServiceError) -> RpcError {
    match error {
        OrdersServiceError::NotFound(id) => {
            RpcError::new(NOT_FOUND, format!("Order with id {id} not found"))
        }
        OrdersServiceError::ProductValidation(source) => products_error(source),
        OrdersServiceError::InvalidOrder(source) => bad_request(source.to_string()),
        OrdersServiceError::InvalidStatus(source) => bad_request(source.to_string()),
        error @ OrdersServiceError::TransitionRejected { .. } => {
            RpcError::new(CONFLICT, error.to_string())
        }
        OrdersServiceError::Store(OrdersStoreError::NotFound) => {
            RpcError::new(NOT_FOUND, "Order not found")
        }
        OrdersServiceError::Store(
            source @ (OrdersStoreError::EmptyOrder
            | OrdersStoreError::InvalidData
            | OrdersStoreError::MissingRequiredData
            | OrdersStoreError::InvalidReference),
        ) => bad_request(format!("Invalid order: {source}")),
        OrdersServiceError::Store(source) => {
            error!(error = ?source, "order store failure");

            internal_error()
        }
    }
}

fn products_error(error: ProductsValidatorError) -> RpcError {
    if error.is_unavailable() {
        warn!(%error, "products service unavailable");

        return RpcError::new(SERVICE_UNAVAILABLE, "Products service unavailable");
    }

    match error {
        ProductsValidatorError::Rejected { message, .. } => bad_request(message),
        ProductsValidatorError::MissingProducts(ids) => {
            let ids = ids
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");

            bad_request(format!("Products not found: {ids}"))
        }
        ProductsValidatorError::Decode(source) => {
            warn!(error = %source, "unreadable products service reply");

            RpcError::new(SERVICE_UNAVAILABLE, "Products service unavailable")
        }
        other => {
            error!(error = ?other, "products validation failed");

            internal_error()
        }
    }
}
