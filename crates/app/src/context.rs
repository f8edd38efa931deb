//! App Context

use std::{sync::Arc, time::Duration};

use orders::status::{AnyTransition, OrderStatus, OrderStatuses, TerminalStatuses, TransitionPolicy};
use thiserror::Error;
use tracing::info;

use crate::{
    database::{self, Db},
    domain::{
        orders::{OrdersLifecycle, OrdersService, PgOrdersStore},
        products::NatsProductsValidator,
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),

    #[error("terminal status {0} is not a configured order status")]
    UnknownTerminalStatus(String),
}

/// Everything the application needs to wire itself, resolved by the caller.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub run_migrations: bool,
    pub products_timeout: Duration,
    pub statuses: OrderStatuses,
    pub terminal_statuses: Vec<String>,
}

#[derive(Clone)]
pub struct AppContext {
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Wrap an already built orders service.
    #[must_use]
    pub fn new(orders: Arc<dyn OrdersService>) -> Self {
        Self { orders }
    }

    /// Build application context from settings and a connected NATS client.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting to the database or applying migrations
    /// fails, or when a terminal status is not one of the configured statuses.
    pub async fn from_settings(
        settings: &AppSettings,
        nats: async_nats::Client,
    ) -> Result<Self, AppInitError> {
        let transitions = transition_policy(&settings.statuses, &settings.terminal_statuses)?;

        let pool = database::connect(&settings.database_url)
            .await
            .map_err(AppInitError::Database)?;

        if settings.run_migrations {
            info!("applying database migrations");

            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;
        }

        let store = PgOrdersStore::new(Db::new(pool));
        let products = NatsProductsValidator::new(nats, settings.products_timeout);

        let lifecycle = OrdersLifecycle::new(
            Arc::new(store),
            Arc::new(products),
            transitions,
            settings.statuses.clone(),
        );

        Ok(Self::new(Arc::new(lifecycle)))
    }
}

fn transition_policy(
    statuses: &OrderStatuses,
    terminal: &[String],
) -> Result<Arc<dyn TransitionPolicy>, AppInitError> {
    if terminal.is_empty() {
        return Ok(Arc::new(AnyTransition));
    }

    let terminal = terminal
        .iter()
        .map(|token| {
            statuses
                .parse(token)
                .map_err(|_error| AppInitError::UnknownTerminalStatus(token.clone()))
        })
        .collect::<Result<Vec<OrderStatus>, _>>()?;

    Ok(Arc::new(TerminalStatuses::new(terminal)))
}
