use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::infrastructure::marketplace::{RetryPolicy, PRODUCTION_BASE_URL, SANDBOX_BASE_URL};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Partner API
    pub marketplace_base_url: String,
    pub marketplace_timeout_secs: u64,
    pub marketplace_retry_max_attempts: u32,
    pub marketplace_retry_base_delay_ms: u64,
    pub marketplace_retry_max_delay_ms: u64,
    // Category cache
    pub category_cache_ttl_secs: u64,
    pub category_cache_max_capacity: u64,
    pub default_language: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let sandbox = env::var("MARKETPLACE_SANDBOX")
            .map(|s| s.to_lowercase() == "true")
            .unwrap_or(false);

        let environment = match env::var("ENVIRONMENT").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        };
        let log_format = log_format_for(env::var("LOG_FORMAT").ok().as_deref(), &environment);

        let config = Config {
            database_url: env::var("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment,
            log_format,
            marketplace_base_url: env::var("MARKETPLACE_BASE_URL")
                .unwrap_or_else(|_| default_base_url(sandbox).to_string()),
            marketplace_timeout_secs: env::var("MARKETPLACE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,
            marketplace_retry_max_attempts: env::var("MARKETPLACE_RETRY_MAX_ATTEMPTS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()?,
            marketplace_retry_base_delay_ms: env::var("MARKETPLACE_RETRY_BASE_DELAY_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()?,
            marketplace_retry_max_delay_ms: env::var("MARKETPLACE_RETRY_MAX_DELAY_MS")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()?,
            category_cache_ttl_secs: env::var("CATEGORY_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()?,
            category_cache_max_capacity: env::var("CATEGORY_CACHE_MAX_CAPACITY")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()?,
            default_language: env::var("DEFAULT_LANGUAGE").unwrap_or_else(|_| "pt-br".to_string()),
        };

        Ok(config)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.marketplace_retry_max_attempts,
            base_delay: Duration::from_millis(self.marketplace_retry_base_delay_ms),
            max_delay: Duration::from_millis(self.marketplace_retry_max_delay_ms),
        }
    }

    pub fn marketplace_timeout(&self) -> Duration {
        Duration::from_secs(self.marketplace_timeout_secs)
    }

    pub fn category_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.category_cache_ttl_secs)
    }
}

/// Explicit `LOG_FORMAT` wins; otherwise production logs JSON.
fn log_format_for(value: Option<&str>, environment: &Environment) -> LogFormat {
    match (value, environment) {
        (Some("json"), _) => LogFormat::Json,
        (Some("pretty"), _) => LogFormat::Pretty,
        (_, Environment::Production) => LogFormat::Json,
        (_, Environment::Development) => LogFormat::Pretty,
    }
}

fn default_base_url(sandbox: bool) -> &'static str {
    if sandbox {
        SANDBOX_BASE_URL
    } else {
        PRODUCTION_BASE_URL
    }
}
