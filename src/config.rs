//! Runtime configuration for the cart system.
//!
//! Defaults match a browser client: the snapshot lives under
//! `@RocketShoes:cart` and collaborator queries have no timeout.
//! Values can be overlaid from the environment ([`CartConfig::from_env`]) or
//! parsed from JSON ([`CartConfig::from_json_str`]).

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";
pub const DEFAULT_BUFFER_SIZE: usize = 32;

pub const ENV_STORAGE_KEY: &str = "CART_STORAGE_KEY";
pub const ENV_BUFFER_SIZE: &str = "CART_BUFFER_SIZE";
pub const ENV_QUERY_TIMEOUT_MS: &str = "CART_QUERY_TIMEOUT_MS";

/// Messages shown to the shopper when an operation fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserMessages {
    pub insufficient_stock: String,
    pub add_failed: String,
    pub remove_failed: String,
    pub update_failed: String,
}

impl Default for UserMessages {
    fn default() -> Self {
        Self {
            insufficient_stock: "Requested quantity is out of stock".to_string(),
            add_failed: "Failed to add product".to_string(),
            remove_failed: "Failed to remove product".to_string(),
            update_failed: "Failed to update product quantity".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Durable storage key holding the cart snapshot.
    pub storage_key: String,
    /// Capacity of the cart actor's request channel.
    pub buffer_size: usize,
    /// Upper bound for each stock/catalog query, `None` waits forever.
    pub query_timeout_ms: Option<u64>,
    pub messages: UserMessages,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            buffer_size: DEFAULT_BUFFER_SIZE,
            query_timeout_ms: None,
            messages: UserMessages::default(),
        }
    }
}

impl CartConfig {
    /// Defaults overlaid with `CART_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().overlay(|name| std::env::var(name).ok())
    }

    /// Parse a (possibly partial) JSON document; missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn query_timeout(&self) -> Option<Duration> {
        self.query_timeout_ms.map(Duration::from_millis)
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(ENV_STORAGE_KEY).filter(|k| !k.is_empty()) {
            self.storage_key = key;
        }
        if let Some(raw) = lookup(ENV_BUFFER_SIZE) {
            match raw.parse::<usize>() {
                Ok(size) if size > 0 => self.buffer_size = size,
                _ => warn!(variable = ENV_BUFFER_SIZE, value = %raw, "Ignoring invalid value"),
            }
        }
        if let Some(raw) = lookup(ENV_QUERY_TIMEOUT_MS) {
            match raw.parse::<u64>() {
                Ok(ms) => self.query_timeout_ms = Some(ms),
                Err(_) => warn!(variable = ENV_QUERY_TIMEOUT_MS, value = %raw, "Ignoring invalid value"),
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CartConfig::default();

        assert_eq!(config.storage_key, "@RocketShoes:cart");
        assert_eq!(config.buffer_size, 32);
        assert_eq!(config.query_timeout(), None);
        assert_eq!(config.with_storage_key("shop:cart").storage_key, "shop:cart");
    }

    #[test]
    fn test_huge_query_timeout_saturates() {
        let config = CartConfig::default().with_query_timeout(Duration::MAX);

        assert_eq!(config.query_timeout_ms, Some(u64::MAX));
    }

    #[test]
    fn test_env_overlay() {
        let config = CartConfig::default().overlay(env(&[
            (ENV_STORAGE_KEY, "shop:cart"),
            (ENV_BUFFER_SIZE, "8"),
            (ENV_QUERY_TIMEOUT_MS, "250"),
        ]));

        assert_eq!(config.storage_key, "shop:cart");
        assert_eq!(config.buffer_size, 8);
        assert_eq!(config.query_timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_env_overlay_ignores_garbage() {
        let config = CartConfig::default().overlay(env(&[
            (ENV_BUFFER_SIZE, "0"),
            (ENV_QUERY_TIMEOUT_MS, "soon"),
        ]));

        assert_eq!(config, CartConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config = CartConfig::from_json_str(
            r#"{ "query_timeout_ms": 1000, "messages": { "add_failed": "Erro na adição do produto" } }"#,
        )
        .unwrap();

        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.query_timeout(), Some(Duration::from_secs(1)));
        assert_eq!(config.messages.add_failed, "Erro na adição do produto");
        assert_eq!(
            config.messages.remove_failed,
            UserMessages::default().remove_failed
        );
    }
}
