//! Per-cache configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::duration_to_ms;
use crate::error::{Error, Result};

/// Environment variable holding the default lifetime in milliseconds
pub const ENV_DEFAULT_LIFETIME_MS: &str = "TOONCACHE_DEFAULT_LIFETIME_MS";

/// Settings owned by a single cache instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Lifetime applied when `set` is called without one
    ///
    /// `None` means such entries expire as soon as the clock moves.
    pub default_lifetime_ms: Option<u64>,
}

impl CacheConfig {
    /// Config with no default lifetime
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default lifetime in milliseconds; negative values clamp to zero
    pub fn with_default_lifetime_ms(mut self, lifetime_ms: i64) -> Self {
        self.default_lifetime_ms = Some(clamp_lifetime(lifetime_ms));
        self
    }

    /// Set the default lifetime
    pub fn with_default_lifetime(mut self, lifetime: Duration) -> Self {
        self.default_lifetime_ms = Some(duration_to_ms(lifetime));
        self
    }

    /// Load from `TOONCACHE_DEFAULT_LIFETIME_MS`
    ///
    /// An unset or blank variable means no default lifetime.
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var(ENV_DEFAULT_LIFETIME_MS).ok();
        let config = Self::from_env_value(raw.as_deref())?;
        debug!(default_lifetime_ms = ?config.default_lifetime_ms, "Loaded cache config from environment");
        Ok(config)
    }

    /// Parse from a JSON document such as `{"default_lifetime_ms": 5000}`
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn from_env_value(raw: Option<&str>) -> Result<Self> {
        let value = match raw.map(str::trim) {
            None | Some("") => return Ok(Self::default()),
            Some(value) => value,
        };

        let lifetime_ms: i64 = value.parse().map_err(|e: std::num::ParseIntError| {
            Error::InvalidConfig {
                key: ENV_DEFAULT_LIFETIME_MS.to_string(),
                value: value.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self::default().with_default_lifetime_ms(lifetime_ms))
    }
}

/// Negative lifetimes become zero
pub(crate) fn clamp_lifetime(lifetime_ms: i64) -> u64 {
    u64::try_from(lifetime_ms).unwrap_or(0)
}
