//! The bridge loop: pumps messages from one broker session into one
//! event-stream response body.
//!
//! Two termination sources (client disconnect, broker error or close) feed
//! a single teardown path. A cancellation token fires when the client goes
//! away; the receive task exits on either signal; and the queue is closed
//! by the receive task alone, so the consumer always observes a clean end
//! of stream rather than a hang or a double-close.

use futures_util::Stream;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::broker::{BrokerError, BrokerSession, ChannelMessage};

/// Depth of the per-connection queue between the receive task and the
/// response body. Bounded so a slow client applies backpressure to the
/// broker connection instead of buffering without limit.
const QUEUE_DEPTH: usize = 64;

/// Subscribe the session and start its receive task; returns the message
/// stream to serve as the response body.
///
/// The returned stream holds a drop guard: when hyper drops the body
/// because the client went away, the receive task is cancelled, the
/// session unsubscribed and the broker connection released — even while
/// the task sits in `receive_next` with no message due.
pub async fn open(
    mut session: Box<dyn BrokerSession>,
    channels: Vec<String>,
) -> Result<impl Stream<Item = ChannelMessage>, BrokerError> {
    session.subscribe(&channels).await?;
    tracing::debug!(?channels, "subscribed");

    let (tx, mut rx) = mpsc::channel(QUEUE_DEPTH);
    let cancel = CancellationToken::new();
    let guard = cancel.clone().drop_guard();
    tokio::spawn(receive_loop(session, tx, cancel));

    Ok(async_stream::stream! {
        let _disconnect = guard;
        while let Some(msg) = rx.recv().await {
            yield msg;
        }
    })
}

/// Runs with exclusive ownership of the broker session and is the sole
/// closer of the queue: `tx` drops when this function returns.
async fn receive_loop(
    mut session: Box<dyn BrokerSession>,
    tx: mpsc::Sender<ChannelMessage>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                if let Err(err) = session.unsubscribe().await {
                    tracing::debug!(%err, "unsubscribe after disconnect failed");
                }
                tracing::debug!("client disconnected, receive task exiting");
                break;
            }
            received = session.receive_next() => match received {
                Ok(Some(msg)) => {
                    tracing::trace!(channel = %msg.channel, "message received");
                    if tx.send(msg).await.is_err() {
                        // Consumer already gone; its drop guard fires the
                        // cancellation we would otherwise wait for.
                        break;
                    }
                }
                Ok(None) => {
                    tracing::debug!("subscription ended, receive task exiting");
                    break;
                }
                Err(err) => {
                    tracing::warn!(%err, "broker receive failed, ending stream");
                    break;
                }
            },
        }
    }
    // The session drops here: the one and only close of this request's
    // broker connection.
}
