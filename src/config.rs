// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the hosted data service.
    pub service_url: String,
    /// API key sent with every request to the hosted service.
    pub service_api_key: String,
    pub rust_log: String,
    /// When set, a daily-rolling log file is written here in addition
    /// to stdout.
    pub log_dir: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let service_url =
            env::var("MATHTRACK_SERVICE_URL").expect("MATHTRACK_SERVICE_URL must be set");

        let service_api_key =
            env::var("MATHTRACK_SERVICE_API_KEY").expect("MATHTRACK_SERVICE_API_KEY must be set");

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("MATHTRACK_LOG_DIR").ok();

        Self {
            service_url,
            service_api_key,
            rust_log,
            log_dir,
        }
    }
}
