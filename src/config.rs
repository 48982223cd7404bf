use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Cache entry TTL in minutes. Zero keeps entries until restart.
    pub default_expiration_minutes: u64,
    /// Purge sweep interval in minutes. Zero disables the sweep.
    pub purge_interval_minutes: u64,
    pub bmkg_base_url: String,
    pub bmkg_timeout_secs: u64,
    pub warm_area_index: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            port: parse_var("PORT", 80)?,
            default_expiration_minutes: parse_var("DEFAULT_EXPIRATION_DURATION", 0)?,
            purge_interval_minutes: parse_var("PURGE_EXPIRED_ITEMS_DURATION", 0)?,
            bmkg_base_url: env::var("BMKG_BASE_URL").unwrap_or_else(|_| {
                "https://data.bmkg.go.id/datamkg/MEWS/DigitalForecast".to_string()
            }),
            bmkg_timeout_secs: parse_var("BMKG_TIMEOUT_SECS", 30)?,
            warm_area_index: env::var("WARM_AREA_INDEX")
                .ok()
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(true),
        })
    }

    pub fn default_expiration(&self) -> Option<Duration> {
        minutes(self.default_expiration_minutes)
    }

    pub fn purge_interval(&self) -> Option<Duration> {
        minutes(self.purge_interval_minutes)
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests(bmkg_base_url: &str) -> Self {
        Config {
            port: 0,
            default_expiration_minutes: 0,
            purge_interval_minutes: 0,
            bmkg_base_url: bmkg_base_url.to_string(),
            bmkg_timeout_secs: 5,
            warm_area_index: false,
        }
    }
}

fn minutes(value: u64) -> Option<Duration> {
    (value > 0).then(|| Duration::from_secs(value * 60))
}

// Unset or empty falls back to the default; garbage is an error.
fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> anyhow::Result<T> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a number, got {:?}", name, raw)),
        _ => Ok(default),
    }
}
