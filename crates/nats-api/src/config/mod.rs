//! Service configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig, messaging::MessagingConfig, observability::LoggingConfig,
    orders::OrdersConfig,
};

pub(crate) mod db;
pub(crate) mod messaging;
pub(crate) mod observability;
pub(crate) mod orders;

/// Orders NATS service configuration
#[derive(Debug, Parser)]
#[command(name = "orders-nats", about = "Orders NATS Service", long_about = None)]
pub struct ServiceConfig {
    /// Messaging fabric settings.
    #[command(flatten)]
    pub messaging: MessagingConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Order lifecycle settings.
    #[command(flatten)]
    pub orders: OrdersConfig,
}

impl ServiceConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_apply_when_only_required_values_are_given() -> TestResult {
        let config = ServiceConfig::try_parse_from([
            "orders-nats",
            "--database-url",
            "postgres://localhost/orders",
            "--nats-servers",
            "nats://a:4222,nats://b:4222",
        ])?;

        assert_eq!(
            config.messaging.nats_servers,
            vec!["nats://a:4222", "nats://b:4222"]
        );
        assert_eq!(config.messaging.queue_group, "orders-ms");
        assert!(!config.database.run_migrations);
        assert_eq!(config.orders.products_timeout(), Duration::from_secs(5));
        assert_eq!(
            config.orders.statuses()?.to_string(),
            "PENDING,PAID,DELIVERED,CANCELLED"
        );
        assert!(config.orders.terminal_statuses.is_empty());

        Ok(())
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let result = ServiceConfig::try_parse_from([
            "orders-nats",
            "--nats-servers",
            "nats://localhost:4222",
        ]);

        assert!(result.is_err(), "expected parse error");
    }
}
