//! Messaging Config

use clap::Args;

/// NATS connection and subscription settings.
#[derive(Debug, Args)]
pub struct MessagingConfig {
    /// NATS servers, comma separated
    #[arg(long, env = "NATS_SERVERS", value_delimiter = ',', required = true)]
    pub nats_servers: Vec<String>,

    /// Queue group shared by every instance of this service
    #[arg(long, env = "NATS_QUEUE_GROUP", default_value = "orders-ms")]
    pub queue_group: String,
}
