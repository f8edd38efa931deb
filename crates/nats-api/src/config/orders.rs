//! Orders Config

use std::time::Duration;

use clap::Args;
use orders::status::{DEFAULT_STATUSES, OrderStatuses, StatusError};

/// Order lifecycle settings.
#[derive(Debug, Args)]
pub struct OrdersConfig {
    /// Timeout for the product validation round trip, in milliseconds
    #[arg(long, env = "PRODUCTS_REQUEST_TIMEOUT_MS", default_value_t = 5_000_u64)]
    pub products_request_timeout_ms: u64,

    /// Allowed order statuses, comma separated; the first one is given to new orders
    #[arg(
        long,
        env = "ORDER_STATUSES",
        value_delimiter = ',',
        default_values_t = DEFAULT_STATUSES.map(String::from)
    )]
    pub order_statuses: Vec<String>,

    /// Statuses an order may not leave once reached, comma separated
    #[arg(long, env = "ORDER_TERMINAL_STATUSES", value_delimiter = ',')]
    pub terminal_statuses: Vec<String>,
}

impl OrdersConfig {
    #[must_use]
    pub fn products_timeout(&self) -> Duration {
        Duration::from_millis(self.products_request_timeout_ms)
    }

    /// Validated set of configured statuses.
    ///
    /// # Errors
    ///
    /// Returns an error when the list is empty or holds blank or repeated entries.
    pub fn statuses(&self) -> Result<OrderStatuses, StatusError> {
        OrderStatuses::new(&self.order_statuses)
    }
}
