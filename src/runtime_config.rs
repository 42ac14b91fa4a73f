//! # Runtime Configuration Module
//!
//! Environment variable based configuration for the [`Router`](crate::router::Router).
//!
//! ## Environment Variables
//!
//! ### `ROUTEMAP_SLOW_MATCH_US`
//!
//! Route resolutions taking longer than this many microseconds are logged at
//! `warn` instead of `info`.
//!
//! Default: `1000` (1 ms)
//!
//! ### `ROUTEMAP_SORT`
//!
//! When `on`, `Router::new` sorts the route map by specificity before
//! freezing it, so the most literal templates are tried first.
//!
//! Default: `off` (registration order)
//!
//! ### `ROUTEMAP_PRECOMPILE`
//!
//! When `on`, every route pattern is compiled when the table is loaded
//! instead of on first match. Broken patterns are logged; they still report
//! their error on the first match attempt.
//!
//! Default: `off`
//!
//! ## Usage
//!
//! ```rust
//! use routemap::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Slow match threshold: {:?}", config.slow_match_threshold);
//! ```

use std::env;
use std::time::Duration;

const DEFAULT_SLOW_MATCH_US: u64 = 1_000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Resolutions slower than this are logged at `warn`
    pub slow_match_threshold: Duration,
    /// Sort the route map by specificity when a table is loaded
    pub sort_routes: bool,
    /// Compile all route patterns when a table is loaded
    pub precompile: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            slow_match_threshold: Duration::from_micros(DEFAULT_SLOW_MATCH_US),
            sort_routes: false,
            precompile: false,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let slow_match_us = lookup("ROUTEMAP_SLOW_MATCH_US")
            .and_then(|val| val.trim().parse().ok())
            .unwrap_or(DEFAULT_SLOW_MATCH_US);
        RuntimeConfig {
            slow_match_threshold: Duration::from_micros(slow_match_us),
            sort_routes: flag(lookup("ROUTEMAP_SORT")),
            precompile: flag(lookup("ROUTEMAP_PRECOMPILE")),
        }
    }
}

fn flag(value: Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::trim),
        Some("on" | "1" | "true" | "yes")
    )
}
