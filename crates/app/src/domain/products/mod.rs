//! Products
//!
//! Products are owned by the remote product service; this module only asks
//! it to confirm identifiers and report current prices and names.

pub mod errors;
pub mod validator;

pub use errors::ProductsValidatorError;
pub use validator::*;
