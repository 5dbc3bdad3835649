//! # tooncache
//!
//! Time-to-live cache for ToonKit.
//!
//! ## Architecture
//! - **HashMap**: AHash keyed map from name to `(value, expiry)`
//! - **Lazy expiry**: no timers; reads re-check expiry against the clock
//! - **Clock**: pluggable millisecond source (`SystemClock`, `ManualClock`)
//! - **Config**: per-instance default lifetime, from code, JSON or env
//!
//! ```
//! use tooncache::{Cache, CacheConfig, ManualClock};
//!
//! let clock = ManualClock::new(0);
//! let mut cache: Cache<i32, String, ManualClock> = Cache::with_clock(CacheConfig::new(), clock.clone());
//!
//! cache.set("session".to_string(), 42, Some(1_000));
//! assert_eq!(cache.get("session"), Some(&42));
//!
//! clock.advance(1_001);
//! assert_eq!(cache.get("session"), None);
//! ```

#![warn(missing_docs)]

mod cache;
mod clock;
mod config;
mod error;
mod stats;

pub use cache::{Cache, CacheEntry};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CacheConfig, ENV_DEFAULT_LIFETIME_MS};
pub use error::{Error, Result};
pub use stats::CacheStats;
