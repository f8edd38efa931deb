//! Order persistence, product validation and lifecycle orchestration.

pub mod context;
pub mod database;
pub mod domain;
pub mod messaging;

#[cfg(test)]
mod test;

mod uuids;
