// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Environment variable configuration for the bridge.
//!
//! - `DDS_BRIDGE_DOMAIN_ID`: domain used by `create_participant_default`
//!   (default: 0, or `DDS_DOMAIN_ID` if set)
//! - `DDS_BRIDGE_LOG_LEVEL`: `off`, `error`, `warn`, `info`, `debug`, `trace`
//! - `DDS_BRIDGE_REGISTRY_CAPACITY`: initial size of the handle registry
//! - `DDS_BRIDGE_FIND_TOPIC_TIMEOUT_MS`: default wait of `find_topic`
//!
//! # Example
//!
//! ```bash
//! export DDS_BRIDGE_DOMAIN_ID=42
//! export DDS_BRIDGE_LOG_LEVEL=debug
//! export DDS_BRIDGE_FIND_TOPIC_TIMEOUT_MS=500
//! ```

use std::env;
use std::str::FromStr;

use crate::error::Result;
use crate::time::Duration;

/// Environment variable names
pub const ENV_DOMAIN_ID: &str = "DDS_BRIDGE_DOMAIN_ID";
pub const ENV_LOG_LEVEL: &str = "DDS_BRIDGE_LOG_LEVEL";
pub const ENV_REGISTRY_CAPACITY: &str = "DDS_BRIDGE_REGISTRY_CAPACITY";
pub const ENV_FIND_TOPIC_TIMEOUT_MS: &str = "DDS_BRIDGE_FIND_TOPIC_TIMEOUT_MS";

/// Generic domain variable (fallback for `DDS_BRIDGE_DOMAIN_ID`)
pub const ENV_FALLBACK_DOMAIN_ID: &str = "DDS_DOMAIN_ID";

pub const DEFAULT_REGISTRY_CAPACITY: usize = 64;
pub const DEFAULT_FIND_TOPIC_TIMEOUT_MS: u32 = 1_000;

/// Runtime configuration of a participant factory.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    /// Domain of `create_participant_default` (0-232)
    pub domain_id: i32,

    /// Log level applied by [`apply_log_level`](Self::apply_log_level)
    pub log_level: Option<log::LevelFilter>,

    /// Initial capacity of the handle registry
    pub registry_capacity: usize,

    /// Wait used by `find_topic` when the caller passes none
    pub find_topic_timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            domain_id: 0,
            log_level: None,
            registry_capacity: DEFAULT_REGISTRY_CAPACITY,
            find_topic_timeout: Duration::from_millis(DEFAULT_FIND_TOPIC_TIMEOUT_MS),
        }
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = lookup(name)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring {}={:?}: not a valid value", name, raw);
            None
        }
    }
}

impl BridgeConfig {
    /// Load configuration from environment variables
    ///
    /// Priority for domain ID:
    /// 1. DDS_BRIDGE_DOMAIN_ID
    /// 2. DDS_DOMAIN_ID
    /// 3. Default (0)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let domain_id = parse::<i32>(&lookup, ENV_DOMAIN_ID)
            .or_else(|| parse::<i32>(&lookup, ENV_FALLBACK_DOMAIN_ID))
            .unwrap_or(defaults.domain_id);

        let log_level = parse::<log::LevelFilter>(&lookup, ENV_LOG_LEVEL);

        let registry_capacity =
            parse(&lookup, ENV_REGISTRY_CAPACITY).unwrap_or(defaults.registry_capacity);

        let find_topic_timeout = parse::<u32>(&lookup, ENV_FIND_TOPIC_TIMEOUT_MS)
            .map_or(defaults.find_topic_timeout, Duration::from_millis);

        Self {
            domain_id,
            log_level,
            registry_capacity,
            find_topic_timeout,
        }
    }

    /// Check if any custom configuration was provided
    #[must_use]
    pub fn is_custom(&self) -> bool {
        *self != Self::default()
    }

    /// Install a console logger at the configured level, or adjust the
    /// maximum level if a logger is already installed. No-op without a level.
    pub fn apply_log_level(&self) -> Result<()> {
        let Some(level) = self.log_level else {
            return Ok(());
        };
        if crate::logging::init_env(level).is_err() {
            log::set_max_level(level);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name: &str| map.get(name).map(|v| (*v).to_string())
    }

    #[test]
    fn test_default_config() {
        let config = BridgeConfig::default();
        assert_eq!(config.domain_id, 0);
        assert!(config.log_level.is_none());
        assert_eq!(config.find_topic_timeout, Duration::from_millis(1_000));
        assert!(!config.is_custom());
    }

    #[test]
    fn test_empty_environment_is_default() {
        let config = BridgeConfig::from_lookup(lookup(&[]));
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn test_bridge_domain_id_takes_priority() {
        let config =
            BridgeConfig::from_lookup(lookup(&[(ENV_DOMAIN_ID, "42"), (ENV_FALLBACK_DOMAIN_ID, "99")]));
        assert_eq!(config.domain_id, 42);
        assert!(config.is_custom());
    }

    #[test]
    fn test_fallback_domain_id() {
        let config = BridgeConfig::from_lookup(lookup(&[(ENV_FALLBACK_DOMAIN_ID, "77")]));
        assert_eq!(config.domain_id, 77);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = BridgeConfig::from_lookup(lookup(&[
            (ENV_DOMAIN_ID, "many"),
            (ENV_REGISTRY_CAPACITY, "-3"),
            (ENV_LOG_LEVEL, "loud"),
        ]));
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn test_log_level_and_timeout() {
        let config = BridgeConfig::from_lookup(lookup(&[
            (ENV_LOG_LEVEL, "Debug"),
            (ENV_FIND_TOPIC_TIMEOUT_MS, " 250 "),
            (ENV_REGISTRY_CAPACITY, "8"),
        ]));
        assert_eq!(config.log_level, Some(log::LevelFilter::Debug));
        assert_eq!(config.find_topic_timeout, Duration::from_millis(250));
        assert_eq!(config.registry_capacity, 8);
    }
}
