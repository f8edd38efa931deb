//! Orders NATS Service

use std::process::ExitCode;

use tracing::{error, info};

use orders_app::context::{AppContext, AppSettings};

use crate::{config::ServiceConfig, state::State};

mod config;
mod observability;
mod orders;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Orders NATS service entry point
#[tokio::main]
pub async fn main() -> ExitCode {
    let config = match ServiceConfig::load() {
        Ok(config) => config,
        Err(error) => {
            #[expect(
                clippy::print_stderr,
                reason = "logging not initialized yet, must use eprintln for config errors"
            )]
            {
                eprintln!("Configuration error: {error}");
            }

            return ExitCode::FAILURE;
        }
    };

    let statuses = match config.orders.statuses() {
        Ok(statuses) => statuses,
        Err(error) => {
            #[expect(
                clippy::print_stderr,
                reason = "logging not initialized yet, must use eprintln for config errors"
            )]
            {
                eprintln!("Configuration error: {error}");
            }

            return ExitCode::FAILURE;
        }
    };

    if let Err(error) = observability::init_subscriber(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("{error}");
        }

        return ExitCode::FAILURE;
    }

    let servers = config.messaging.nats_servers.join(",");

    info!(%servers, "connecting to NATS");

    let client = match async_nats::connect(servers.as_str()).await {
        Ok(client) => client,
        Err(connect_error) => {
            error!("failed to connect to NATS: {connect_error}");

            return ExitCode::FAILURE;
        }
    };

    let settings = AppSettings {
        database_url: config.database.database_url.clone(),
        run_migrations: config.database.run_migrations,
        products_timeout: config.orders.products_timeout(),
        statuses,
        terminal_statuses: config
            .orders
            .terminal_statuses
            .iter()
            .filter(|status| !status.trim().is_empty())
            .cloned()
            .collect(),
    };

    let app = match AppContext::from_settings(&settings, client.clone()).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            return ExitCode::FAILURE;
        }
    };

    info!(statuses = %settings.statuses, "orders service ready");

    let served = router::serve(
        client,
        State::from_app_context(app),
        &config.messaging.queue_group,
        shutdown::requested(),
    )
    .await;

    match served {
        Ok(()) => {
            info!("orders service stopped");

            ExitCode::SUCCESS
        }
        Err(serve_error) => {
            error!("orders service failed: {serve_error}");

            ExitCode::FAILURE
        }
    }
}
