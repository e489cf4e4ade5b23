//! Redis-backed broker using a dedicated pub/sub connection per request.

use async_trait::async_trait;
use futures_util::StreamExt;

use super::{Broker, BrokerError, BrokerSession, ChannelMessage};

/// Factory for per-request Redis pub/sub sessions.
pub struct RedisBroker {
    client: ::redis::Client,
}

impl RedisBroker {
    /// Parse and validate the Redis URL. No connection is opened until a
    /// request subscribes.
    pub fn new(redis_url: &str) -> Result<Self, BrokerError> {
        let client = ::redis::Client::open(redis_url)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Broker for RedisBroker {
    async fn connect(&self) -> Result<Box<dyn BrokerSession>, BrokerError> {
        let pubsub = self.client.get_async_pubsub().await?;
        Ok(Box::new(RedisSession {
            pubsub,
            channels: Vec::new(),
            unsubscribed: false,
        }))
    }
}

struct RedisSession {
    pubsub: ::redis::aio::PubSub,
    /// Channels subscribed on this connection, kept for the unsubscribe.
    channels: Vec<String>,
    unsubscribed: bool,
}

#[async_trait]
impl BrokerSession for RedisSession {
    async fn subscribe(&mut self, channels: &[String]) -> Result<(), BrokerError> {
        // SUBSCRIBE with zero channels is a protocol error; an empty set is
        // simply a connection that will never see a message.
        if !channels.is_empty() {
            self.pubsub.subscribe(channels).await?;
        }
        self.channels = channels.to_vec();
        Ok(())
    }

    async fn receive_next(&mut self) -> Result<Option<ChannelMessage>, BrokerError> {
        if self.unsubscribed {
            return Ok(None);
        }
        match self.pubsub.on_message().next().await {
            Some(msg) => Ok(Some(ChannelMessage {
                channel: msg.get_channel_name().to_string(),
                payload: String::from_utf8_lossy(msg.get_payload_bytes()).into_owned(),
            })),
            // The connection dropped out from under the subscription.
            None => Err(BrokerError::ConnectionClosed),
        }
    }

    async fn unsubscribe(&mut self) -> Result<(), BrokerError> {
        self.unsubscribed = true;
        if !self.channels.is_empty() {
            self.pubsub.unsubscribe(std::mem::take(&mut self.channels)).await?;
        }
        Ok(())
    }
}
