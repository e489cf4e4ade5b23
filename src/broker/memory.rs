//! In-memory broker for tests and local development.
//!
//! A single `tokio::sync::broadcast` fan-out stands in for the Redis
//! pub/sub plane; each session filters the firehose down to its own
//! channel set.

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::{Broker, BrokerError, BrokerSession, ChannelMessage};

/// Capacity of the fan-out channel. Sessions that fall this far behind
/// skip messages (delivery is best effort while connected).
const FANOUT_CAPACITY: usize = 256;

pub struct MemoryBroker {
    sender: broadcast::Sender<ChannelMessage>,
}

impl MemoryBroker {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(FANOUT_CAPACITY);
        Self { sender }
    }

    /// Publish a payload to a channel, delivered to every live session
    /// subscribed to it.
    pub fn publish(&self, channel: &str, payload: &str) {
        // send() errs when no session is connected; publishing into the
        // void is fine for a broker.
        let _ = self.sender.send(ChannelMessage {
            channel: channel.to_string(),
            payload: payload.to_string(),
        });
    }

    /// Number of live sessions. Lets tests assert that teardown actually
    /// released the session.
    pub fn session_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for MemoryBroker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Broker for MemoryBroker {
    async fn connect(&self) -> Result<Box<dyn BrokerSession>, BrokerError> {
        Ok(Box::new(MemorySession {
            receiver: self.sender.subscribe(),
            channels: Vec::new(),
            unsubscribed: false,
        }))
    }
}

struct MemorySession {
    receiver: broadcast::Receiver<ChannelMessage>,
    channels: Vec<String>,
    unsubscribed: bool,
}

#[async_trait]
impl BrokerSession for MemorySession {
    async fn subscribe(&mut self, channels: &[String]) -> Result<(), BrokerError> {
        self.channels = channels.to_vec();
        Ok(())
    }

    async fn receive_next(&mut self) -> Result<Option<ChannelMessage>, BrokerError> {
        loop {
            if self.unsubscribed {
                return Ok(None);
            }
            match self.receiver.recv().await {
                Ok(msg) if self.channels.contains(&msg.channel) => return Ok(Some(msg)),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "session lagged behind the fan-out");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(BrokerError::ConnectionClosed);
                }
            }
        }
    }

    async fn unsubscribe(&mut self) -> Result<(), BrokerError> {
        self.unsubscribed = true;
        self.channels.clear();
        Ok(())
    }
}
