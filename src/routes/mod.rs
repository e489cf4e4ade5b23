pub mod events;

use axum::routing::get;
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    // Every path serves the stream, so the gateway can be mounted anywhere
    // behind a proxy.
    Router::new().fallback(get(events::stream))
}
