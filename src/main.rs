//! venuebook main entrypoint.

use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = venuebook::run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
