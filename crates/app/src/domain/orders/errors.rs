//! Orders errors.

use std::num::TryFromIntError;

use orders::{pricing::PricingError, status::{OrderStatus, StatusError}};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{orders::models::OrderUuid, products::ProductsValidatorError};

#[derive(Debug, Error)]
pub enum OrdersStoreError {
    #[error("order already exists")]
    AlreadyExists,

    #[error("order not found")]
    NotFound,

    #[error("order has no items")]
    EmptyOrder,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("value out of range")]
    OutOfRange(#[from] TryFromIntError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersStoreError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order with id {0} not found")]
    NotFound(OrderUuid),

    #[error("product validation failed: {0}")]
    ProductValidation(#[from] ProductsValidatorError),

    #[error("invalid order: {0}")]
    InvalidOrder(#[from] PricingError),

    #[error("invalid status: {0}")]
    InvalidStatus(#[from] StatusError),

    #[error("cannot change order status from {from} to {to}")]
    TransitionRejected { from: OrderStatus, to: OrderStatus },

    #[error("storage error")]
    Store(#[source] OrdersStoreError),
}

impl From<OrdersStoreError> for OrdersServiceError {
    fn from(error: OrdersStoreError) -> Self {
        Self::Store(error)
    }
}

impl OrdersServiceError {
    /// Map a store error raised while addressing a single order.
    pub(crate) fn for_order(order: OrderUuid) -> impl FnOnce(OrdersStoreError) -> Self {
        move |error| match error {
            OrdersStoreError::NotFound => Self::NotFound(order),
            other => Self::Store(other),
        }
    }
}
