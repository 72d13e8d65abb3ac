use anyhow::Result;
use std::env;
use std::str::FromStr;
use crate::constants::*;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store_path: String,
    pub namespace: String,
    pub asset_dir: String,
    pub invite_ttl_minutes: i64,
    pub sweep_interval_secs: u64,
    pub response_delay_ms: u64,
    pub accept_probability: f64,
    pub feedback_endpoint: String,
    pub cache_version: String,
    /// Empty means any origin may call the API.
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_SERVER_PORT,
            store_path: DEFAULT_STORE_PATH.to_string(),
            namespace: DEFAULT_STORE_NAMESPACE.to_string(),
            asset_dir: DEFAULT_ASSET_DIR.to_string(),
            invite_ttl_minutes: DEFAULT_INVITE_TTL_MINUTES,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            response_delay_ms: DEFAULT_RESPONSE_DELAY_MS,
            accept_probability: DEFAULT_ACCEPT_PROBABILITY,
            feedback_endpoint: DEFAULT_FEEDBACK_ENDPOINT.to_string(),
            cache_version: DEFAULT_CACHE_VERSION.to_string(),
            allowed_origins: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();
        let config = Self {
            port: parse_or("PORT", defaults.port),
            store_path: env::var("WALKIEPAL_STORE_PATH").unwrap_or(defaults.store_path),
            namespace: env::var("WALKIEPAL_NAMESPACE").unwrap_or(defaults.namespace),
            asset_dir: env::var("WALKIEPAL_ASSET_DIR").unwrap_or(defaults.asset_dir),
            invite_ttl_minutes: parse_or("INVITE_TTL_MINUTES", defaults.invite_ttl_minutes),
            sweep_interval_secs: parse_or("SWEEP_INTERVAL_SECS", defaults.sweep_interval_secs),
            response_delay_ms: parse_or("RESPONSE_DELAY_MS", defaults.response_delay_ms),
            accept_probability: parse_or("ACCEPT_PROBABILITY", defaults.accept_probability),
            feedback_endpoint: env::var("FEEDBACK_ENDPOINT").unwrap_or(defaults.feedback_endpoint),
            cache_version: env::var("CACHE_VERSION").unwrap_or(defaults.cache_version),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or(defaults.allowed_origins),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.invite_ttl_minutes <= 0 || self.invite_ttl_minutes > MAX_INVITE_TTL_MINUTES {
            anyhow::bail!("INVITE_TTL_MINUTES must be between 1 and {}", MAX_INVITE_TTL_MINUTES);
        }
        if self.sweep_interval_secs == 0 || self.sweep_interval_secs > MAX_SWEEP_INTERVAL_SECS {
            anyhow::bail!("SWEEP_INTERVAL_SECS must be between 1 and {}", MAX_SWEEP_INTERVAL_SECS);
        }
        if self.response_delay_ms > MAX_RESPONSE_DELAY_MS {
            anyhow::bail!("RESPONSE_DELAY_MS must be at most {}", MAX_RESPONSE_DELAY_MS);
        }
        if !is_valid_probability(self.accept_probability) {
            anyhow::bail!("ACCEPT_PROBABILITY must be between 0 and 1");
        }
        if self.namespace.is_empty() {
            anyhow::bail!("WALKIEPAL_NAMESPACE must not be empty");
        }
        Ok(())
    }
}

/// Splits a comma separated origin list, skipping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {} value {:?}, using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}
