//! Environment-driven configuration with logged defaults.

use std::env;
use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub database: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: load_port("VENUEBOOK_PORT", 3000),
            database: env_or("VENUEBOOK_DB", "venuebook.sqlite"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => {
            info!("{key} not set, using default: {default}");
            default.to_string()
        }
    }
}

fn load_port(key: &str, default: u16) -> u16 {
    env_or(key, &default.to_string()).parse().unwrap_or_else(|e| {
        warn!("invalid {key} value: {e}, using default: {default}");
        default
    })
}
