use moka::future::Cache;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::interval;

use crate::config::Config;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to serialize cache entry: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Key namespaces for the two result shapes. Writing one never touches the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Map,
    Sequence,
}

impl Namespace {
    fn prefix(self) -> &'static str {
        match self {
            Namespace::Map => "area:map",
            Namespace::Sequence => "area:province",
        }
    }
}

pub fn cache_key(namespace: Namespace, province: &str) -> String {
    format!("{}:{}", namespace.prefix(), province).to_lowercase()
}

/// TTL cache of JSON-serialized forecast results, keyed per province.
#[derive(Clone)]
pub struct ForecastStore {
    cache: Cache<String, String>,
}

impl ForecastStore {
    /// `None` keeps entries until the process exits.
    pub fn new(default_expiration: Option<Duration>) -> Self {
        let mut builder = Cache::builder();
        if let Some(ttl) = default_expiration {
            builder = builder.time_to_live(ttl);
        }

        Self {
            cache: builder.build(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.default_expiration())
    }

    pub async fn put<T: Serialize>(
        &self,
        namespace: Namespace,
        province: &str,
        value: &T,
    ) -> Result<(), CacheError> {
        let blob = serde_json::to_string(value)?;
        self.cache.insert(cache_key(namespace, province), blob).await;
        Ok(())
    }

    /// Returns `None` on a missing or expired entry, and also when the stored
    /// blob no longer deserializes so the caller refetches instead.
    pub async fn get<T: DeserializeOwned>(&self, namespace: Namespace, province: &str) -> Option<T> {
        let key = cache_key(namespace, province);
        let blob = self.cache.get(&key).await?;

        match serde_json::from_str(&blob) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = %key, "Discarding unreadable cache entry: {}", e);
                None
            }
        }
    }

    /// Drop expired entries now instead of waiting for the next sweep.
    pub async fn purge_expired(&self) {
        self.cache.run_pending_tasks().await;
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn spawn_purge_task(&self, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tracing::info!(interval_secs = every.as_secs(), "Starting cache purge task");

        tokio::spawn(async move {
            let mut ticker = interval(every);
            loop {
                ticker.tick().await;
                store.purge_expired().await;
                tracing::debug!(entries = store.entry_count(), "Cache purge sweep finished");
            }
        })
    }
}
