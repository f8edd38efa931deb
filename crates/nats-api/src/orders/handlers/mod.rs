//! Order command handlers

pub(crate) mod change_status;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
