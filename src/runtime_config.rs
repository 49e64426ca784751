//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for the router's runtime behavior.
//!
//! ## Environment Variables
//!
//! ### `FASTROUTER_PARAM_POOL_CAPACITY`
//!
//! Maximum number of idle parameter containers kept by a router's
//! [`ParamPool`](crate::router::ParamPool). Released containers beyond this
//! bound are dropped.
//!
//! Default: `256`
//!
//! ### `FASTROUTER_SLOW_MATCH_US`
//!
//! Match latency, in microseconds, above which [`Router::route`](crate::router::Router::route)
//! logs a `Slow route matching detected` warning.
//!
//! Default: `1000` (1 ms)
//!
//! ## Usage
//!
//! ```rust
//! use fastrouter::runtime_config::RouterConfig;
//!
//! let config = RouterConfig::from_env();
//! println!("Pool capacity: {}", config.param_pool_capacity);
//! ```
//!
//! Unparseable values fall back to the defaults.

use std::env;
use std::time::Duration;

use crate::router::DEFAULT_POOL_CAPACITY;

/// Default slow-match warning threshold in microseconds
pub const DEFAULT_SLOW_MATCH_US: u64 = 1_000;

/// Router configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterConfig {
    /// Maximum idle parameter containers kept for reuse
    pub param_pool_capacity: usize,
    /// Latency above which a match is logged as slow
    pub slow_match_threshold: Duration,
}

impl RouterConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let param_pool_capacity = env::var("FASTROUTER_PARAM_POOL_CAPACITY")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_POOL_CAPACITY);

        let slow_match_us = env::var("FASTROUTER_SLOW_MATCH_US")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_SLOW_MATCH_US);

        RouterConfig {
            param_pool_capacity,
            slow_match_threshold: Duration::from_micros(slow_match_us),
        }
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        RouterConfig {
            param_pool_capacity: DEFAULT_POOL_CAPACITY,
            slow_match_threshold: Duration::from_micros(DEFAULT_SLOW_MATCH_US),
        }
    }
}
