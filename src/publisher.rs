//! Publishing helper, the counterpart of the stream endpoint.
//!
//! Anything able to PUBLISH to Redis can feed the gateway; this helper
//! keeps the repository self-contained for demos and smoke tests.

use crate::broker::BrokerError;

/// Publish one payload to one channel over a short-lived connection.
///
/// Returns the number of subscribers the broker delivered it to.
pub async fn publish(
    redis_url: &str,
    channel: &str,
    payload: &str,
) -> Result<usize, BrokerError> {
    let client = ::redis::Client::open(redis_url)?;
    let mut conn = client.get_multiplexed_async_connection().await?;
    let receivers: usize = ::redis::cmd("PUBLISH")
        .arg(channel)
        .arg(payload)
        .query_async(&mut conn)
        .await?;
    Ok(receivers)
}
