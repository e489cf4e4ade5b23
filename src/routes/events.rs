//! The event-stream endpoint.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::{RawQuery, State};
use axum::http::header::{self, HeaderName};
use axum::http::HeaderMap;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use futures_util::StreamExt;

use crate::error::ApiError;
use crate::{accept, bridge, channels, AppState};

/// Period between heartbeat comments on an idle stream, so half-open
/// connections are eventually detected by both ends.
const HEARTBEAT_PERIOD: Duration = Duration::from_secs(15);

/// `GET <any path>?<channel>&<channel>...`
///
/// Streams every message published to the requested channels as one SSE
/// event each, in broker arrival order, until the client disconnects or
/// the broker connection fails.
pub async fn stream(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let accept_header = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok());
    if !accept::accepts_event_stream(accept_header) {
        return Err(ApiError::NotAcceptable);
    }

    let channels = channels::from_query(query.as_deref());
    tracing::debug!(?channels, "stream requested");

    let session = state.broker.connect().await?;
    let messages = bridge::open(session, channels).await?;
    let events = messages.map(|msg| Ok::<_, Infallible>(Event::default().data(msg.payload)));

    let sse =
        Sse::new(events).keep_alive(KeepAlive::new().interval(HEARTBEAT_PERIOD).text("hb"));

    Ok((
        [
            (header::CACHE_CONTROL, "no-cache"),
            // Keeps nginx and friends from buffering the stream.
            (HeaderName::from_static("x-accel-buffering"), "no"),
        ],
        sse,
    )
        .into_response())
}
