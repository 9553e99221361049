// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Console logging for applications embedding the bridge.
//!
//! The crate itself only emits through the `log` facade; these helpers
//! install `env_logger` for callers that have no logger of their own.

use crate::error::{Error, Result};

/// Install a console logger at `level`.
///
/// Fails with [`Error::PreconditionNotMet`] if a logger is already installed.
pub fn init(level: log::LevelFilter) -> Result<()> {
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp_millis()
        .try_init()
        .map_err(|_| Error::PreconditionNotMet)
}

/// Install a console logger driven by `RUST_LOG`, falling back to
/// `default_level` when the variable is unset.
pub fn init_env(default_level: log::LevelFilter) -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level.to_string()),
    )
    .format_timestamp_millis()
    .try_init()
    .map_err(|_| Error::PreconditionNotMet)
}

/// Install a console logger from a filter string such as
/// `"dds_bridge=debug,info"`.
pub fn init_with_filter(filter: &str) -> Result<()> {
    if filter.is_empty() {
        return Err(Error::BadParameter);
    }
    env_logger::Builder::new()
        .parse_filters(filter)
        .format_timestamp_millis()
        .try_init()
        .map_err(|_| Error::PreconditionNotMet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_is_rejected() {
        assert!(matches!(init_with_filter(""), Err(Error::BadParameter)));
    }

    #[test]
    fn second_install_fails() {
        // The first call may lose against another test's logger.
        let _ = init(log::LevelFilter::Warn);
        assert!(matches!(
            init(log::LevelFilter::Warn),
            Err(Error::PreconditionNotMet)
        ));
    }
}
