// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! DDS time pair.

use dds_sys::{DdsDuration, DDS_DURATION_INFINITE_NSEC, DDS_DURATION_INFINITE_SEC};

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Seconds/nanoseconds pair as exchanged with the native library.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Duration {
    pub seconds: i32,
    pub nanoseconds: u32,
}

impl Duration {
    pub const ZERO: Duration = Duration {
        seconds: 0,
        nanoseconds: 0,
    };

    pub const INFINITE: Duration = Duration {
        seconds: DDS_DURATION_INFINITE_SEC,
        nanoseconds: DDS_DURATION_INFINITE_NSEC,
    };

    pub const fn new(seconds: i32, nanoseconds: u32) -> Self {
        Self {
            seconds,
            nanoseconds,
        }
    }

    pub const fn from_millis(millis: u32) -> Self {
        Self {
            seconds: (millis / 1000) as i32,
            nanoseconds: (millis % 1000) * 1_000_000,
        }
    }

    pub fn is_infinite(&self) -> bool {
        *self == Self::INFINITE
    }

    /// `None` for the infinite duration or a negative one.
    pub fn to_std(self) -> Option<std::time::Duration> {
        if self.is_infinite() || self.seconds < 0 {
            return None;
        }
        Some(std::time::Duration::new(
            self.seconds as u64,
            self.nanoseconds.min(NANOS_PER_SEC - 1),
        ))
    }
}

/// Saturates to [`Duration::INFINITE`] past `i32::MAX` seconds.
impl From<std::time::Duration> for Duration {
    fn from(d: std::time::Duration) -> Self {
        match i32::try_from(d.as_secs()) {
            Ok(seconds) if seconds != DDS_DURATION_INFINITE_SEC => Self {
                seconds,
                nanoseconds: d.subsec_nanos(),
            },
            _ => Self::INFINITE,
        }
    }
}

impl From<DdsDuration> for Duration {
    fn from(raw: DdsDuration) -> Self {
        Self {
            seconds: raw.sec,
            nanoseconds: raw.nanosec,
        }
    }
}

impl From<Duration> for DdsDuration {
    fn from(d: Duration) -> Self {
        DdsDuration {
            sec: d.seconds,
            nanosec: d.nanoseconds,
        }
    }
}
