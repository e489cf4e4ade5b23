pub mod accept;
pub mod bridge;
pub mod broker;
pub mod channels;
pub mod config;
pub mod error;
pub mod publisher;
pub mod routes;

use std::sync::Arc;

use broker::Broker;
use config::Config;

/// Shared application state available to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub broker: Arc<dyn Broker>,
}
