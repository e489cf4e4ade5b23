//! Command-line publisher for the gateway.
//!
//! Usage:
//!   cargo run --bin publish -- <channel> <payload>
//!
//! Reads REDIS_URL from the environment (or .env via dotenvy).

use std::path::Path;

use sse_gateway::config::Config;

#[tokio::main]
async fn main() {
    if dotenvy::dotenv().is_err() {
        let env_path = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
        let _ = dotenvy::from_path(env_path);
    }

    let mut args = std::env::args().skip(1);
    let (Some(channel), Some(payload)) = (args.next(), args.next()) else {
        eprintln!("usage: publish <channel> <payload>");
        std::process::exit(2);
    };

    let config = Config::from_env();
    match sse_gateway::publisher::publish(&config.redis_url, &channel, &payload).await {
        Ok(receivers) => println!("delivered to {receivers} subscriber(s)"),
        Err(err) => {
            eprintln!("publish failed: {err}");
            std::process::exit(1);
        }
    }
}
