//! Command subscriptions and dispatch.

use std::sync::Arc;

use async_nats::{Client, Message, SubscribeError, client::FlushError};
use futures::{StreamExt, stream};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use orders_app::messaging::{ReplyPacket, RequestPacket, RpcError};

use crate::{
    orders::{
        errors::{bad_request, internal_error},
        handlers::{change_status, create, get, index},
    },
    state::State,
};

/// Inbound commands and the subjects they are received on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    CreateOrder,
    FindAllOrders,
    FindOneOrder,
    ChangeOrderStatus,
}

impl Command {
    pub(crate) const ALL: [Self; 4] = [
        Self::CreateOrder,
        Self::FindAllOrders,
        Self::FindOneOrder,
        Self::ChangeOrderStatus,
    ];

    pub(crate) const fn subject(self) -> &'static str {
        match self {
            Self::CreateOrder => "createOrder",
            Self::FindAllOrders => "findAllOrders",
            Self::FindOneOrder => "findOneOrder",
            Self::ChangeOrderStatus => "changeOrderStatus",
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum RouterError {
    #[error("failed to subscribe to {subject}: {source}")]
    Subscribe {
        subject: &'static str,
        #[source]
        source: SubscribeError,
    },

    #[error("failed to flush pending replies: {0}")]
    Flush(#[source] FlushError),
}

/// Serve every command until `shutdown` resolves.
///
/// Each message is handled on its own task. On shutdown the subscriptions are
/// dropped, in-flight handlers are awaited and pending replies are flushed.
pub(crate) async fn serve<F>(
    client: Client,
    state: Arc<State>,
    queue_group: &str,
    shutdown: F,
) -> Result<(), RouterError>
where
    F: Future<Output = ()>,
{
    let mut subscriptions = Vec::with_capacity(Command::ALL.len());

    for command in Command::ALL {
        let subscriber = client
            .queue_subscribe(command.subject(), queue_group.to_string())
            .await
            .map_err(|source| RouterError::Subscribe {
                subject: command.subject(),
                source,
            })?;

        info!(subject = command.subject(), queue_group, "subscribed");

        subscriptions.push(subscriber.map(move |message| (command, message)));
    }

    let mut messages = stream::select_all(subscriptions);
    let mut tasks = JoinSet::new();

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            () = &mut shutdown => break,
            next = messages.next() => {
                let Some((command, message)) = next else {
                    warn!("all subscriptions closed");
                    break;
                };

                let client = client.clone();
                let state = Arc::clone(&state);

                tasks.spawn(async move {
                    handle_message(&client, &state, command, message).await;
                });
            }
            Some(joined) = tasks.join_next() => {
                if let Err(join_error) = joined {
                    error!(%join_error, "command handler task failed");
                }
            }
        }
    }

    drop(messages);

    info!(in_flight = tasks.len(), "draining in-flight commands");

    while let Some(joined) = tasks.join_next().await {
        if let Err(join_error) = joined {
            error!(%join_error, "command handler task failed");
        }
    }

    client.flush().await.map_err(RouterError::Flush)
}

async fn handle_message(client: &Client, state: &State, command: Command, message: Message) {
    let Some(reply) = message.reply else {
        warn!(subject = %message.subject, "dropping message without reply subject");
        return;
    };

    debug!(subject = command.subject(), "dispatching command");

    let packet = dispatch(state, command, &message.payload).await;

    let payload = match serde_json::to_vec(&packet) {
        Ok(payload) => payload,
        Err(error) => {
            error!(%error, "failed to encode reply");
            return;
        }
    };

    if let Err(error) = client.publish(reply, payload.into()).await {
        error!(%error, subject = command.subject(), "failed to publish reply");
    }
}

/// Decode a request packet, run the command and wrap its outcome in a reply.
pub(crate) async fn dispatch(state: &State, command: Command, payload: &[u8]) -> ReplyPacket<Value> {
    let packet: RequestPacket<Value> = match serde_json::from_slice(payload) {
        Ok(packet) => packet,
        Err(error) => {
            return ReplyPacket::error(None, bad_request(format!("malformed request: {error}")));
        }
    };

    match route(state, command, packet.data).await {
        Ok(response) => ReplyPacket::ok(packet.id, response),
        Err(error) => ReplyPacket::error(packet.id, error),
    }
}

async fn route(state: &State, command: Command, data: Value) -> Result<Value, RpcError> {
    match command {
        Command::CreateOrder => encode(&create::handler(state, decode(data)?).await?),
        Command::FindAllOrders => encode(&index::handler(state, decode_or_default(data)?).await?),
        Command::FindOneOrder => encode(&get::handler(state, decode(data)?).await?),
        Command::ChangeOrderStatus => {
            encode(&change_status::handler(state, decode(data)?).await?)
        }
    }
}

fn decode<T: DeserializeOwned>(data: Value) -> Result<T, RpcError> {
    serde_json::from_value(data).map_err(|error| bad_request(error.to_string()))
}

/// Like [`decode`], but a missing payload yields the default request.
fn decode_or_default<T: DeserializeOwned + Default>(data: Value) -> Result<T, RpcError> {
    if data.is_null() {
        return Ok(T::default());
    }

    decode(data)
}

fn encode<T: Serialize>(response: &T) -> Result<Value, RpcError> {
    serde_json::to_value(response).map_err(|error| {
        error!(%error, "failed to encode response");

        internal_error()
    })
}
