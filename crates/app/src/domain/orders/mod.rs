//! Orders

pub mod errors;
pub mod models;
mod repositories;
pub mod service;
pub mod store;

pub use errors::{OrdersServiceError, OrdersStoreError};
pub use service::*;
pub use store::*;
