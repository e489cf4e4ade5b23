//! Pub/sub broker abstraction.
//!
//! Backed by Redis in production and an in-memory fan-out in tests and
//! local development, mirroring the split between the two backends at the
//! trait seam. Each event-stream request gets its own session (a dedicated
//! broker connection); the session is exclusively owned by that request's
//! receive task, so dropping it closes the connection exactly once.

pub mod memory;
pub mod redis;

pub use memory::MemoryBroker;
pub use redis::RedisBroker;

use async_trait::async_trait;

/// One message published to a channel.
///
/// Transient: decoded from the broker and written to the client
/// immediately, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMessage {
    pub channel: String,
    pub payload: String,
}

/// Errors surfaced by a broker backend.
#[derive(Debug, thiserror::Error)]
pub enum BrokerError {
    #[error("redis error: {0}")]
    Redis(#[from] ::redis::RedisError),
    #[error("broker connection closed")]
    ConnectionClosed,
}

/// Handle to a pub/sub backend.
///
/// `connect` opens one dedicated session per event-stream request; failure
/// is fatal for that request only.
#[async_trait]
pub trait Broker: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn BrokerSession>, BrokerError>;
}

/// A dedicated subscription connection for one event-stream request.
#[async_trait]
pub trait BrokerSession: Send {
    /// Register interest in the given channels. Messages published to any
    /// of them after this call returns are eligible for delivery.
    async fn subscribe(&mut self, channels: &[String]) -> Result<(), BrokerError>;

    /// Wait for the next event on this subscription.
    ///
    /// Resolves to `Ok(Some(message))` for a data message, `Ok(None)` once
    /// the subscription has terminated cleanly (after [`unsubscribe`]), or
    /// `Err` if the underlying connection failed.
    ///
    /// [`unsubscribe`]: BrokerSession::unsubscribe
    async fn receive_next(&mut self) -> Result<Option<ChannelMessage>, BrokerError>;

    /// End the subscription. A pending or subsequent `receive_next`
    /// resolves to `Ok(None)`.
    async fn unsubscribe(&mut self) -> Result<(), BrokerError>;
}
