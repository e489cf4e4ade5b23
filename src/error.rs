use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::broker::BrokerError;

/// Failures that end a request before streaming begins.
///
/// Bodies are plain text: the only success representation this service
/// offers is an event stream, so error responses stay deliberately simple.
#[derive(Debug)]
pub enum ApiError {
    /// The client's Accept header rules out `text/event-stream`.
    NotAcceptable,
    /// The broker could not be reached or refused the subscription.
    BrokerUnavailable(BrokerError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotAcceptable => (
                StatusCode::NOT_ACCEPTABLE,
                [(header::CONTENT_TYPE, "text/plain")],
                "406 Not Acceptable\n\
                 This resource can only be represented as text/event-stream.\n",
            )
                .into_response(),
            ApiError::BrokerUnavailable(err) => {
                tracing::error!(%err, "broker unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    [(header::CONTENT_TYPE, "text/plain")],
                    "503 Service Unavailable\n",
                )
                    .into_response()
            }
        }
    }
}

impl From<BrokerError> for ApiError {
    fn from(err: BrokerError) -> Self {
        ApiError::BrokerUnavailable(err)
    }
}
