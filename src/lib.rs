//! Orders
//!
//! Order domain shared by the order service: line items, the product read
//! model, pricing aggregation, status tokens and pagination. Nothing in this
//! crate performs I/O.

pub mod items;
pub mod pagination;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod status;
