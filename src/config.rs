//! Dashboard configuration, loaded from environment variables.

use crate::domain::dashboard::StalePolicy;
use crate::error::ConfigError;
use crate::poll::PollConfig;
use crate::shared::{Interval, Ticker};

use std::path::PathBuf;
use std::time::Duration;

pub const ENV_API_URL: &str = "MARKETIQ_API_URL";
pub const ENV_POLL_INTERVAL_SECS: &str = "MARKETIQ_POLL_INTERVAL_SECS";
pub const ENV_DEFAULT_TICKER: &str = "MARKETIQ_DEFAULT_TICKER";
pub const ENV_INTERVAL: &str = "MARKETIQ_INTERVAL";
pub const ENV_THEME_FILE: &str = "MARKETIQ_THEME_FILE";
pub const ENV_STALE_POLICY: &str = "MARKETIQ_STALE_POLICY";
pub const ENV_ALPHA_VANTAGE_KEY: &str = "ALPHA_VANTAGE_API_KEY";

const PREFERENCES_DIR: &str = ".marketiq";
const PREFERENCES_FILE: &str = "preferences.json";

/// Everything needed to wire up a dashboard.
#[derive(Clone)]
pub struct DashboardConfig {
    pub api_url: String,
    /// When set, quotes are fetched from Alpha Vantage directly.
    pub alpha_vantage_key: Option<String>,
    pub poll_interval: Duration,
    pub default_ticker: Ticker,
    pub interval: Interval,
    pub theme_file: PathBuf,
    pub stale_policy: StalePolicy,
}

impl std::fmt::Debug for DashboardConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardConfig")
            .field("api_url", &self.api_url)
            .field(
                "alpha_vantage_key",
                &self.alpha_vantage_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("poll_interval", &self.poll_interval)
            .field("default_ticker", &self.default_ticker)
            .field("interval", &self.interval)
            .field("theme_file", &self.theme_file)
            .field("stale_policy", &self.stale_policy)
            .finish()
    }
}

impl DashboardConfig {
    /// Read the process environment. Unset variables take their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DashboardConfig::from_env`] over an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = var(ENV_API_URL)
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| crate::network::DEFAULT_API_URL.to_string());

        let poll_interval = match var(ENV_POLL_INTERVAL_SECS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(invalid(ENV_POLL_INTERVAL_SECS, raw)),
            },
            None => crate::network::DEFAULT_POLL_INTERVAL,
        };

        let default_ticker = match var(ENV_DEFAULT_TICKER) {
            Some(raw) => Ticker::parse(&raw).ok_or_else(|| invalid(ENV_DEFAULT_TICKER, raw.clone()))?,
            None => Ticker::parse(crate::network::DEFAULT_TICKER)
                .ok_or_else(|| invalid(ENV_DEFAULT_TICKER, String::new()))?,
        };

        let interval = match var(ENV_INTERVAL) {
            Some(raw) => raw.parse().map_err(|_| invalid(ENV_INTERVAL, raw.clone()))?,
            None => Interval::default(),
        };

        let stale_policy = match var(ENV_STALE_POLICY) {
            Some(raw) => raw.parse().map_err(|_| invalid(ENV_STALE_POLICY, raw.clone()))?,
            None => StalePolicy::default(),
        };

        let theme_file = match var(ENV_THEME_FILE) {
            Some(path) => PathBuf::from(path.trim()),
            None => {
                let home = var("HOME")
                    .or_else(|| var("USERPROFILE"))
                    .ok_or(ConfigError::NoHomeDir(ENV_THEME_FILE))?;
                PathBuf::from(home).join(PREFERENCES_DIR).join(PREFERENCES_FILE)
            }
        };

        let alpha_vantage_key = var(ENV_ALPHA_VANTAGE_KEY).map(|k| k.trim().to_string());

        Ok(Self {
            api_url,
            alpha_vantage_key,
            poll_interval,
            default_ticker,
            interval,
            theme_file,
            stale_policy,
        })
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            interval: self.poll_interval,
        }
    }

    /// Build the HTTP client this configuration describes.
    #[cfg(feature = "http")]
    pub fn client(&self) -> Result<crate::client::MarketIqClient, crate::error::SdkError> {
        let mut builder = crate::client::MarketIqClient::builder()
            .base_url(&self.api_url)
            .interval(self.interval);
        if let Some(key) = &self.alpha_vantage_key {
            builder = builder.alpha_vantage_key(key);
        }
        builder.build()
    }

    /// Theme storage backed by [`DashboardConfig::theme_file`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn file_store(&self) -> crate::storage::FileStore {
        crate::storage::FileStore::new(&self.theme_file)
    }
}

fn invalid(key: &'static str, value: String) -> ConfigError {
    ConfigError::InvalidValue { key, value }
}
