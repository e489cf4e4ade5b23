//! Bridge loop behavior against the in-memory broker.

use std::time::Duration;

use futures_util::StreamExt;

use sse_gateway::bridge;
use sse_gateway::broker::{Broker, MemoryBroker};

#[tokio::test]
async fn delivers_only_subscribed_channels_in_order() {
    let broker = MemoryBroker::new();
    let session = broker.connect().await.unwrap();
    let stream = bridge::open(session, vec!["news".into(), "sports".into()])
        .await
        .unwrap();
    tokio::pin!(stream);

    broker.publish("weather", "rain");
    broker.publish("sports", "goal");
    broker.publish("news", "headline");

    let first = stream.next().await.expect("stream open");
    assert_eq!(first.channel, "sports");
    assert_eq!(first.payload, "goal");

    let second = stream.next().await.expect("stream open");
    assert_eq!(second.channel, "news");
    assert_eq!(second.payload, "headline");
}

#[tokio::test]
async fn broker_failure_ends_the_stream_cleanly() {
    let broker = MemoryBroker::new();
    let session = broker.connect().await.unwrap();
    let stream = bridge::open(session, vec!["news".into()]).await.unwrap();
    tokio::pin!(stream);

    // Connection lost mid-stream: the receive task closes the queue and
    // the consumer sees the end of the stream, not a hang.
    drop(broker);
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn dropping_the_stream_stops_the_receive_task() {
    let broker = MemoryBroker::new();
    let session = broker.connect().await.unwrap();
    let stream = bridge::open(session, vec!["news".into()]).await.unwrap();
    assert_eq!(broker.session_count(), 1);

    drop(stream);

    for _ in 0..100 {
        if broker.session_count() == 0 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("receive task leaked after the stream was dropped");
}

#[tokio::test]
async fn empty_channel_set_is_a_valid_idle_subscription() {
    let broker = MemoryBroker::new();
    let session = broker.connect().await.unwrap();
    let stream = bridge::open(session, Vec::new()).await.unwrap();
    tokio::pin!(stream);

    broker.publish("news", "ignored");

    let next = tokio::time::timeout(Duration::from_millis(50), stream.next()).await;
    assert!(next.is_err(), "expected no event on an empty subscription");
}
